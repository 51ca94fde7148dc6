//! Batched writes and the edit log.
//!
//! While a graph records edits every mutation appends an [`Edit`]. Callers that touch many
//! elements should build a [`SetFloatValues`] and hand it to
//! [`StoreGraph::execute`](super::StoreGraph::execute) so the log gets one entry per
//! attribute instead of one per element.

use super::{AttributeId, TransactionId, VertexId};

#[derive(Debug, Clone, PartialEq)]
pub struct SetFloatValues {
    attribute: AttributeId,
    values: Vec<(usize, f64)>,
}

impl SetFloatValues {
    pub fn new(attribute: AttributeId) -> Self {
        Self {
            attribute,
            values: Vec::new(),
        }
    }

    pub fn with_capacity(attribute: AttributeId, capacity: usize) -> Self {
        Self {
            attribute,
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn set_value(&mut self, element: usize, value: f64) {
        self.values.push((element, value));
    }

    pub fn attribute(&self) -> AttributeId {
        self.attribute
    }

    pub fn values(&self) -> &[(usize, f64)] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    AddVertex(VertexId),
    RemoveVertex(VertexId),
    AddTransaction(TransactionId),
    RemoveTransaction(TransactionId),
    AddAttribute(AttributeId),
    SetFloat {
        attribute: AttributeId,
        element: usize,
        value: f64,
    },
    SetBoolean {
        attribute: AttributeId,
        element: usize,
        value: bool,
    },
    SetObject {
        attribute: AttributeId,
        element: usize,
    },
    SetFloatValues {
        attribute: AttributeId,
        count: usize,
    },
}
