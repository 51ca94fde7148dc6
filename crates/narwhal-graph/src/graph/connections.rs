//! Edge, link and neighbour views used by [`StoreGraph`](super::StoreGraph).
//!
//! Transactions are the only stored connections. Arrangements mostly ask for neighbours and
//! links, so those views are rebuilt lazily whenever the structure generation moves on.

use super::HashMap;
use super::entries::TransactionEntry;
use super::{TransactionId, VertexId};

/// All transactions sharing a source, a destination and a direction.
///
/// Undirected transactions between `a` and `b` form one edge with `source <= destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: VertexId,
    pub destination: VertexId,
    pub directed: bool,
    pub transactions: Vec<TransactionId>,
}

/// All transactions between an unordered pair of vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub low: VertexId,
    pub high: VertexId,
    pub transactions: Vec<TransactionId>,
}

impl Link {
    pub fn other(&self, v: VertexId) -> VertexId {
        if self.low == v { self.high } else { self.low }
    }
}

#[derive(Debug, Clone, Default)]
pub(in crate::graph) struct ConnectionCache {
    pub(in crate::graph) generation: Option<u64>,
    pub(in crate::graph) edges: Vec<Edge>,
    pub(in crate::graph) links: Vec<Link>,
    pub(in crate::graph) neighbours: HashMap<VertexId, Vec<VertexId>>,
}

impl ConnectionCache {
    pub(in crate::graph) fn is_current(&self, generation: u64) -> bool {
        self.generation == Some(generation)
    }

    pub(in crate::graph) fn rebuild(&mut self, generation: u64, transactions: &[TransactionEntry]) {
        let mut edges: Vec<Edge> = Vec::new();
        let mut links: Vec<Link> = Vec::new();
        let mut neighbours: HashMap<VertexId, Vec<VertexId>> = HashMap::default();
        let mut edge_ix: HashMap<(VertexId, VertexId, bool), usize> = HashMap::default();
        let mut link_ix: HashMap<(VertexId, VertexId), usize> = HashMap::default();

        for tx in transactions {
            let edge_key = tx.edge_key();
            match edge_ix.get(&edge_key) {
                Some(&ix) => edges[ix].transactions.push(tx.id),
                None => {
                    edge_ix.insert(edge_key, edges.len());
                    edges.push(Edge {
                        source: edge_key.0,
                        destination: edge_key.1,
                        directed: edge_key.2,
                        transactions: vec![tx.id],
                    });
                }
            }

            let (low, high) = tx.link_key();
            match link_ix.get(&(low, high)) {
                Some(&ix) => links[ix].transactions.push(tx.id),
                None => {
                    link_ix.insert((low, high), links.len());
                    links.push(Link {
                        low,
                        high,
                        transactions: vec![tx.id],
                    });
                    neighbours.entry(low).or_default().push(high);
                    if low != high {
                        neighbours.entry(high).or_default().push(low);
                    }
                }
            }
        }

        self.generation = Some(generation);
        self.edges = edges;
        self.links = links;
        self.neighbours = neighbours;
    }

    pub(in crate::graph) fn neighbours(&self, v: VertexId) -> &[VertexId] {
        self.neighbours.get(&v).map(Vec::as_slice).unwrap_or(&[])
    }
}
