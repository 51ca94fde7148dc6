//! Hierarchical arrangement by taxonomy.

use crate::arranger::{Arranger, ProgressSink, TaxonomySource};
use crate::cancel::CancellationToken;
use crate::error::Result;
use crate::inclusion::{Connections, InclusionGraph, VertexList, copy_coordinates};
use crate::mean::{move_mean, xyz_mean};
use crate::options::TaxonomyArrangerOptions;
use crate::taxonomy::{Taxon, TaxonRole};
use narwhal_graph::StoreGraph;

/// How far an arrangement got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArrangementPhase {
    Start,
    TaxonomyDiscovered,
    TaxaArranged,
    Condensed,
    OuterArranged,
    UncollideApplied,
    /// Positions were written to the caller's graph.
    Repositioned,
    Done,
}

/// Arranges a graph in two levels.
///
/// The taxonomy source splits the vertices into taxa. Each taxon is laid out on its own
/// by the arranger matching its [`TaxonRole`], then every taxon is condensed to a single
/// vertex and the condensation is laid out by the outer arranger. Finally every taxon is
/// shifted by however far its condensed vertex moved.
///
/// All of this happens on a copy of the graph. The caller's graph only receives the final
/// positions, so a cancelled arrangement leaves it as it was.
pub struct TaxonomyArranger {
    taxonomy_source: Box<dyn TaxonomySource>,
    inner: Box<dyn Arranger>,
    outer: Box<dyn Arranger>,
    grid: Option<Box<dyn Arranger>>,
    singleton: Option<Box<dyn Arranger>>,
    doublet: Option<Box<dyn Arranger>>,
    uncollide: Option<Box<dyn Arranger>>,
    progress: Option<Box<dyn ProgressSink>>,
    options: TaxonomyArrangerOptions,
    last_phase: ArrangementPhase,
}

impl std::fmt::Debug for TaxonomyArranger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaxonomyArranger")
            .field("grid", &self.grid.is_some())
            .field("singleton", &self.singleton.is_some())
            .field("doublet", &self.doublet.is_some())
            .field("uncollide", &self.uncollide.is_some())
            .field("options", &self.options)
            .field("last_phase", &self.last_phase)
            .finish_non_exhaustive()
    }
}

impl TaxonomyArranger {
    /// `inner` lays out taxa without a more specific arranger; `outer` lays out the
    /// condensation.
    pub fn new(
        taxonomy_source: impl TaxonomySource + 'static,
        inner: impl Arranger + 'static,
        outer: impl Arranger + 'static,
    ) -> Self {
        Self {
            taxonomy_source: Box::new(taxonomy_source),
            inner: Box::new(inner),
            outer: Box::new(outer),
            grid: None,
            singleton: None,
            doublet: None,
            uncollide: None,
            progress: None,
            options: TaxonomyArrangerOptions::default(),
            last_phase: ArrangementPhase::Start,
        }
    }

    /// Lays out taxa marked with [`Taxonomy::set_arrange_rectangularly`](crate::Taxonomy::set_arrange_rectangularly).
    pub fn with_grid(mut self, arranger: impl Arranger + 'static) -> Self {
        self.grid = Some(Box::new(arranger));
        self
    }

    /// Merges all single-vertex taxa into one and lays that out with `arranger`.
    pub fn with_singleton(mut self, arranger: impl Arranger + 'static) -> Self {
        self.singleton = Some(Box::new(arranger));
        self
    }

    /// Merges all connected two-vertex taxa into one and lays that out with `arranger`.
    pub fn with_doublet(mut self, arranger: impl Arranger + 'static) -> Self {
        self.doublet = Some(Box::new(arranger));
        self
    }

    /// Runs `arranger` over the arranged condensation, unless it is larger than
    /// [`TaxonomyArrangerOptions::uncollide_limit`].
    pub fn with_uncollide(mut self, arranger: impl Arranger + 'static) -> Self {
        self.uncollide = Some(Box::new(arranger));
        self
    }

    pub fn with_progress(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.progress = Some(Box::new(sink));
        self
    }

    pub fn with_options(mut self, options: TaxonomyArrangerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &TaxonomyArrangerOptions {
        &self.options
    }

    /// The last phase the most recent [`arrange`](Arranger::arrange) call reached.
    pub fn last_phase(&self) -> ArrangementPhase {
        self.last_phase
    }

    fn enter(&mut self, phase: ArrangementPhase) {
        self.last_phase = phase;
        tracing::debug!(?phase, "taxonomy arrangement");
    }

    fn report(&mut self, step: usize, total: usize, message: &str) {
        if let Some(progress) = self.progress.as_mut() {
            progress.set_progress(step, total, message, true);
        }
    }

    fn arrange_working(
        &mut self,
        working: &mut StoreGraph,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let mut taxonomy = self.taxonomy_source.taxonomy(working, cancel)?;
        self.enter(ArrangementPhase::TaxonomyDiscovered);

        if taxonomy.len() == 1 {
            cancel.check()?;
            self.inner.arrange(working, cancel)?;
            self.enter(ArrangementPhase::TaxaArranged);
            return Ok(());
        }

        if self.singleton.is_some() {
            taxonomy.merge_singleton_taxa();
        }
        if self.doublet.is_some() {
            taxonomy.merge_doublet_taxa(working);
        }

        let total = taxonomy.len() + 2;
        let connections = self.options.connections;
        for (step, taxon) in taxonomy.iter().enumerate() {
            cancel.check()?;
            self.report(step, total, "Arranging taxa");
            // An empty inclusion list would pass the whole graph through.
            if taxon.is_empty() {
                continue;
            }
            tracing::trace!(
                key = taxon.key(),
                members = taxon.len(),
                role = ?taxon.role(),
                "arranging taxon"
            );
            let inner = self.inner.as_mut();
            let arranger = match taxon.role() {
                TaxonRole::Rectangular => self.grid.as_deref_mut().unwrap_or(inner),
                TaxonRole::Singleton => self.singleton.as_deref_mut().unwrap_or(inner),
                TaxonRole::Doublet => self.doublet.as_deref_mut().unwrap_or(inner),
                TaxonRole::Generic => inner,
            };
            arrange_taxon(arranger, working, taxon, connections, cancel)?;
        }
        self.enter(ArrangementPhase::TaxaArranged);

        let mut condensation = taxonomy.condense(working, cancel)?;
        self.enter(ArrangementPhase::Condensed);

        self.report(taxonomy.len(), total, "Arranging condensation");
        self.outer.arrange(condensation.graph_mut(), cancel)?;
        self.enter(ArrangementPhase::OuterArranged);

        if self.uncollide.is_some() {
            self.report(taxonomy.len() + 1, total, "Uncolliding");
        }
        if let Some(uncollide) = self.uncollide.as_mut() {
            if condensation.vertex_count() <= self.options.uncollide_limit {
                uncollide.arrange(condensation.graph_mut(), cancel)?;
                self.enter(ArrangementPhase::UncollideApplied);
            } else {
                tracing::debug!(
                    vertices = condensation.vertex_count(),
                    limit = self.options.uncollide_limit,
                    "condensation too large to uncollide"
                );
            }
        }

        taxonomy.reposition(working, &condensation, cancel)
    }
}

fn arrange_taxon(
    arranger: &mut dyn Arranger,
    graph: &mut StoreGraph,
    taxon: &Taxon,
    connections: Connections,
    cancel: &CancellationToken,
) -> Result<()> {
    let members = VertexList::new(taxon.members().iter().copied());
    let mut inclusion = InclusionGraph::new(graph, connections, members);
    arranger.arrange(inclusion.materialize(), cancel)?;
    inclusion.retrieve_coordinates();
    Ok(())
}

impl Arranger for TaxonomyArranger {
    fn arrange(&mut self, graph: &mut StoreGraph, cancel: &CancellationToken) -> Result<()> {
        self.enter(ArrangementPhase::Start);

        let mut working = graph.clone();
        working.set_recording_edit(false);
        working.take_edits();

        let mean = self.options.maintain_mean.then(|| xyz_mean(&working));
        self.arrange_working(&mut working, cancel)?;
        if let Some(mean) = mean {
            move_mean(&mut working, mean);
        }

        cancel.check()?;
        copy_coordinates(&working, graph, true);
        self.enter(ArrangementPhase::Repositioned);
        self.enter(ArrangementPhase::Done);
        Ok(())
    }

    fn set_maintain_mean(&mut self, maintain_mean: bool) {
        self.options.maintain_mean = maintain_mean;
    }
}
