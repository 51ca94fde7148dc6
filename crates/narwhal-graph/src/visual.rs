//! The vertex attributes arrangements read and write.

use crate::graph::{AttributeId, AttributeKind, ElementType, StoreGraph};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    X,
    Y,
    Z,
    /// Secondary position, used by callers that animate between two layouts.
    X2,
    Y2,
    Z2,
    NodeRadius,
    LabelRadius,
    Selected,
    /// Pinned vertices are never moved by an arrangement.
    Pinned,
}

impl VertexAttribute {
    pub const POSITION: [VertexAttribute; 3] =
        [VertexAttribute::X, VertexAttribute::Y, VertexAttribute::Z];
    pub const SECONDARY_POSITION: [VertexAttribute; 3] =
        [VertexAttribute::X2, VertexAttribute::Y2, VertexAttribute::Z2];

    pub fn name(self) -> &'static str {
        match self {
            VertexAttribute::X => "x",
            VertexAttribute::Y => "y",
            VertexAttribute::Z => "z",
            VertexAttribute::X2 => "x2",
            VertexAttribute::Y2 => "y2",
            VertexAttribute::Z2 => "z2",
            VertexAttribute::NodeRadius => "nradius",
            VertexAttribute::LabelRadius => "lradius",
            VertexAttribute::Selected => "selected",
            VertexAttribute::Pinned => "pinned",
        }
    }

    pub fn kind(self) -> AttributeKind {
        match self {
            VertexAttribute::Selected | VertexAttribute::Pinned => AttributeKind::Boolean,
            _ => AttributeKind::Float,
        }
    }

    pub fn default_value(self) -> Value {
        match self {
            VertexAttribute::NodeRadius | VertexAttribute::LabelRadius => Value::from(1.0),
            other => other.kind().default_value(),
        }
    }

    pub fn get(self, g: &StoreGraph) -> Option<AttributeId> {
        g.attribute(ElementType::Vertex, self.name())
    }

    pub fn ensure(self, g: &mut StoreGraph) -> AttributeId {
        g.add_attribute(
            ElementType::Vertex,
            self.kind(),
            self.name(),
            self.default_value(),
        )
    }
}

/// The `x,y,z` attribute ids, creating any that are missing.
pub fn ensure_position(g: &mut StoreGraph) -> [AttributeId; 3] {
    VertexAttribute::POSITION.map(|a| a.ensure(g))
}

/// The `x2,y2,z2` attribute ids, if all three exist.
pub fn secondary_position(g: &StoreGraph) -> Option<[AttributeId; 3]> {
    Some([
        VertexAttribute::X2.get(g)?,
        VertexAttribute::Y2.get(g)?,
        VertexAttribute::Z2.get(g)?,
    ])
}
