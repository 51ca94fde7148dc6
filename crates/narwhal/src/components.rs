//! A taxonomy source that puts each connected component in its own taxon.

use crate::arranger::TaxonomySource;
use crate::cancel::CancellationToken;
use crate::error::Result;
use crate::taxonomy::Taxonomy;
use narwhal_graph::{StoreGraph, VertexId, alg};
use rustc_hash::FxHashSet;

/// One taxon per weakly connected component, keyed by the first vertex reached.
///
/// With a subset, only the subset's vertices are partitioned and components are computed
/// on the subgraph they induce.
#[derive(Debug, Clone, Default)]
pub struct ComponentTaxonomy {
    subset: Option<FxHashSet<VertexId>>,
}

impl ComponentTaxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subset(vertices: impl IntoIterator<Item = VertexId>) -> Self {
        Self {
            subset: Some(vertices.into_iter().collect()),
        }
    }
}

impl TaxonomySource for ComponentTaxonomy {
    fn taxonomy(&self, graph: &StoreGraph, cancel: &CancellationToken) -> Result<Taxonomy> {
        cancel.check()?;
        let components = match &self.subset {
            Some(subset) => alg::components_among(graph, |v| subset.contains(&v)),
            None => alg::components(graph),
        };
        cancel.check()?;

        let mut taxonomy = Taxonomy::new();
        for members in components {
            let key = members[0];
            taxonomy.insert(key, members);
        }
        tracing::debug!(taxa = taxonomy.len(), "found component taxa");
        Ok(taxonomy)
    }
}
