//! The capabilities an arrangement is assembled from.

use crate::cancel::CancellationToken;
use crate::error::Result;
use crate::taxonomy::Taxonomy;
use narwhal_graph::StoreGraph;

/// Lays out the vertices of a graph by writing their `x,y,z` attributes.
///
/// Implementations must leave vertex and transaction ids alone; callers copy positions
/// between graphs by id. Long-running implementations should call
/// [`CancellationToken::check`] between units of work.
pub trait Arranger {
    fn arrange(&mut self, graph: &mut StoreGraph, cancel: &CancellationToken) -> Result<()>;

    /// When set, the arrangement should leave the mean position of the graph unchanged.
    fn set_maintain_mean(&mut self, maintain_mean: bool);
}

impl<A: Arranger + ?Sized> Arranger for Box<A> {
    fn arrange(&mut self, graph: &mut StoreGraph, cancel: &CancellationToken) -> Result<()> {
        (**self).arrange(graph, cancel)
    }

    fn set_maintain_mean(&mut self, maintain_mean: bool) {
        (**self).set_maintain_mean(maintain_mean);
    }
}

/// Partitions a graph's vertices into taxa.
pub trait TaxonomySource {
    fn taxonomy(&self, graph: &StoreGraph, cancel: &CancellationToken) -> Result<Taxonomy>;
}

/// Receives progress reports.
pub trait ProgressSink {
    fn set_progress(&mut self, step: usize, total: usize, message: &str, cancellable: bool);
}
