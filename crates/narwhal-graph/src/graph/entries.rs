//! Internal storage entries for [`StoreGraph`](super::StoreGraph).

use super::{TransactionId, VertexId};

#[derive(Debug, Clone)]
pub(in crate::graph) struct TransactionEntry {
    pub(in crate::graph) id: TransactionId,
    pub(in crate::graph) source: VertexId,
    pub(in crate::graph) destination: VertexId,
    pub(in crate::graph) directed: bool,
}

impl TransactionEntry {
    pub(in crate::graph) fn touches(&self, v: VertexId) -> bool {
        self.source == v || self.destination == v
    }

    /// Endpoints ordered low-to-high, the identity of the link this transaction belongs to.
    pub(in crate::graph) fn link_key(&self) -> (VertexId, VertexId) {
        if self.source <= self.destination {
            (self.source, self.destination)
        } else {
            (self.destination, self.source)
        }
    }

    /// Undirected transactions share an edge regardless of which end was the source.
    pub(in crate::graph) fn edge_key(&self) -> (VertexId, VertexId, bool) {
        if self.directed {
            (self.source, self.destination, true)
        } else {
            let (lo, hi) = self.link_key();
            (lo, hi, false)
        }
    }
}
