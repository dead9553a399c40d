//! This module defines and re-exports the interfaces for the inventory repository.
mod inventory;

pub use inventory::InventoryRepository;
