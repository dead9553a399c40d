use std::fmt;

/// The two reference tables a hotel can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionKind {
    Category,
    Chain,
}

impl DimensionKind {
    /// Name of the block that carries this dimension in a source record.
    pub fn field(&self) -> &'static str {
        match self {
            DimensionKind::Category => "category",
            DimensionKind::Chain => "chain",
        }
    }

    pub fn id_field(&self) -> &'static str {
        match self {
            DimensionKind::Category => "category.id",
            DimensionKind::Chain => "chain.id",
        }
    }

    pub fn name_field(&self) -> &'static str {
        match self {
            DimensionKind::Category => "category.name",
            DimensionKind::Chain => "chain.name",
        }
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// A reference entity that hotels point at.
///
/// Dimensions are keyed by a textual identifier that must hold a
/// non-negative integer. They are immutable once stored: a second insert of
/// the same id is a no-op.
pub trait Dimension: Clone + fmt::Debug + Send + Sync {
    const KIND: DimensionKind;

    fn new(id: String, name: String) -> Self;
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}
