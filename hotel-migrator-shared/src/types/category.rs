use crate::types::{Dimension, DimensionKind};

/// A hotel category (e.g. "Hotel", "Hostel") as carried by the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Dimension for Category {
    const KIND: DimensionKind = DimensionKind::Category;

    fn new(id: String, name: String) -> Self {
        Self { id, name }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
