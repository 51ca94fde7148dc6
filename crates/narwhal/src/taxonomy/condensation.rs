//! Collapsing each taxon to a single vertex, and moving taxa after that vertex moved.

use super::Taxonomy;
use crate::cancel::CancellationToken;
use crate::error::Result;
use crate::extent::Extent;
use indexmap::IndexMap;
use narwhal_graph::visual::ensure_position;
use narwhal_graph::{AttributeKind, ElementType, StoreGraph, VertexAttribute, VertexId};
use rustc_hash::FxHashSet;
use serde_json::Value;

/// Where each condensation vertex started, so [`Taxonomy::reposition`] can tell how far it
/// was moved.
const ORIGINAL_POSITION: [&str; 3] = ["x_orig", "y_orig", "z_orig"];

/// A graph with one vertex per non-empty taxon and a directed transaction between taxa
/// whose members are linked.
#[derive(Debug, Clone)]
pub struct Condensation {
    graph: StoreGraph,
    taxon_keys: IndexMap<VertexId, VertexId>,
}

impl Condensation {
    pub fn graph(&self) -> &StoreGraph {
        &self.graph
    }

    /// The condensed graph, for an arranger to lay out.
    pub fn graph_mut(&mut self) -> &mut StoreGraph {
        &mut self.graph
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// The key of the taxon a condensation vertex stands for.
    pub fn taxon_key(&self, vertex: VertexId) -> Option<VertexId> {
        self.taxon_keys.get(&vertex).copied()
    }

    /// `(condensation vertex, taxon key)` pairs in the order the vertices were added.
    pub fn taxon_keys(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.taxon_keys.iter().map(|(&v, &k)| (v, k))
    }
}

impl Taxonomy {
    /// Builds the condensation of `graph` under this taxonomy.
    ///
    /// Each condensation vertex sits at the center of its taxon's [`Extent`] and takes the
    /// extent's radii. Taxa are visited singleton first, doublet second, then by ascending
    /// size; a taxon only receives transactions from taxa visited before it, so every
    /// linked pair of taxa ends up with exactly one transaction however many graph
    /// transactions run between them.
    pub fn condense(&self, graph: &StoreGraph, cancel: &CancellationToken) -> Result<Condensation> {
        let order = self.condensation_order();

        let mut condensed = StoreGraph::new();
        let position = ensure_position(&mut condensed);
        let original = ORIGINAL_POSITION.map(|name| {
            condensed.add_attribute(
                ElementType::Vertex,
                AttributeKind::Float,
                name,
                Value::from(0.0),
            )
        });
        let node_radius = VertexAttribute::NodeRadius.ensure(&mut condensed);
        let label_radius = VertexAttribute::LabelRadius.ensure(&mut condensed);

        let mut condensed_vertex: Vec<Option<VertexId>> = vec![None; self.taxa.len()];
        let mut taxon_keys: IndexMap<VertexId, VertexId> = IndexMap::with_capacity(order.len());
        for &slot in &order {
            cancel.check()?;
            let taxon = &self.taxa[slot];
            if taxon.is_empty() {
                continue;
            }
            let extent = Extent::of(graph, &taxon.members);
            let cv = condensed.add_vertex();
            for axis in 0..3 {
                condensed.set_float_value(position[axis], cv, extent.center[axis]);
                condensed.set_float_value(original[axis], cv, extent.center[axis]);
            }
            condensed.set_float_value(node_radius, cv, extent.node_radius);
            condensed.set_float_value(label_radius, cv, extent.label_radius);
            condensed_vertex[slot] = Some(cv);
            taxon_keys.insert(cv, taxon.key);
        }

        let mut consumed = vec![false; self.taxa.len()];
        let mut found: FxHashSet<usize> = FxHashSet::default();
        for &src in &order {
            cancel.check()?;
            consumed[src] = true;
            let Some(src_vertex) = condensed_vertex[src] else {
                continue;
            };
            found.clear();
            for &member in &self.taxa[src].members {
                cancel.check()?;
                for neighbour in graph.vertex_neighbours(member) {
                    cancel.check()?;
                    let Some(dst) = self.slot_of_vertex(neighbour) else {
                        continue;
                    };
                    if dst == src || consumed[dst] || !found.insert(dst) {
                        continue;
                    }
                    if let Some(dst_vertex) = condensed_vertex[dst] {
                        condensed.add_transaction(src_vertex, dst_vertex, true);
                    }
                }
            }
        }

        tracing::debug!(
            taxa = self.taxa.len(),
            vertices = condensed.vertex_count(),
            transactions = condensed.transaction_count(),
            "condensed taxonomy"
        );
        Ok(Condensation {
            graph: condensed,
            taxon_keys,
        })
    }

    /// Moves every taxon by the distance its condensation vertex moved since
    /// [`condense`](Self::condense).
    ///
    /// Taxa whose vertex did not move are left untouched.
    pub fn reposition(
        &self,
        graph: &mut StoreGraph,
        condensation: &Condensation,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let condensed = &condensation.graph;
        let current = VertexAttribute::POSITION.map(|a| a.get(condensed));
        let original = ORIGINAL_POSITION.map(|name| condensed.attribute(ElementType::Vertex, name));
        debug_assert!(
            original.iter().all(Option::is_some),
            "condensation is missing its original positions"
        );
        let read = |attr: Option<_>, v: VertexId| attr.map_or(0.0, |a| condensed.float_value(a, v));

        let position = ensure_position(graph);
        for cv in condensed.vertices() {
            cancel.check()?;
            let delta = [0, 1, 2].map(|axis| read(current[axis], cv) - read(original[axis], cv));
            if delta == [0.0; 3] {
                continue;
            }
            let Some(taxon) = condensation
                .taxon_key(cv)
                .and_then(|key| self.taxon(key))
            else {
                continue;
            };
            for &v in &taxon.members {
                for axis in 0..3 {
                    let moved = graph.float_value(position[axis], v) + delta[axis];
                    graph.set_float_value(position[axis], v, moved);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condensation_records_original_positions() {
        let mut g = StoreGraph::new();
        let [x, _, _] = ensure_position(&mut g);
        for i in 0..3 {
            let v = g.add_vertex();
            g.set_float_value(x, v, 10.0 * i as f64);
        }
        let t = Taxonomy::from_partition([(0, vec![0, 1]), (2, vec![2])]);
        let c = t
            .condense(&g, &CancellationToken::new())
            .expect("not cancelled");

        let cg = c.graph();
        let x_orig = cg
            .attribute(ElementType::Vertex, ORIGINAL_POSITION[0])
            .expect("original x");
        let cx = VertexAttribute::X.get(cg).expect("x");
        // Taxon 2 is smaller, so it comes first.
        assert_eq!(c.taxon_key(0), Some(2));
        assert_eq!(cg.float_value(cx, 0), 20.0);
        assert_eq!(cg.float_value(x_orig, 1), 5.0);
    }
}
