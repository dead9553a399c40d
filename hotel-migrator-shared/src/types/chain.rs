use crate::types::{Dimension, DimensionKind};

/// A hotel chain (brand) as carried by the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub id: String,
    pub name: String,
}

impl Dimension for Chain {
    const KIND: DimensionKind = DimensionKind::Chain;

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
