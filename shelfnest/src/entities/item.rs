use crate::geometry::primitives::Polygon;

/// A shape to be nested, immutable once extracted.
#[derive(Clone, Debug)]
pub struct Item {
    /// Position of the item in the input sequence
    pub id: usize,
    /// Identifier of the source document the shape was extracted from
    pub source: String,
    /// Representative outline of the source document
    pub shape: Polygon,
}

impl Item {
    pub fn new(id: usize, source: impl Into<String>, shape: Polygon) -> Self {
        Item {
            id,
            source: source.into(),
            shape,
        }
    }
}
