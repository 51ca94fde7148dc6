#![forbid(unsafe_code)]

//! Taxonomy-based hierarchical graph arrangement.
//!
//! A [`TaxonomyArranger`] splits a graph's vertices into taxa, lays out each taxon with an
//! injected [`Arranger`], condenses every taxon into a single vertex, lays out the
//! condensation, and moves each taxon by however far its condensed vertex travelled.
//! The concrete layouts (grid, circle, force-directed, ...) live outside this crate.

pub mod arranger;
pub mod cancel;
pub mod components;
pub mod error;
pub mod extent;
pub mod inclusion;
pub mod mean;
pub mod options;
pub mod taxonomy;
pub mod taxonomy_arranger;

pub use narwhal_graph as graph;

pub use arranger::{Arranger, ProgressSink, TaxonomySource};
pub use cancel::CancellationToken;
pub use components::ComponentTaxonomy;
pub use error::{Error, Result};
pub use extent::Extent;
pub use inclusion::{Connections, InclusionGraph, SelectedVertices, VertexInclusion, VertexList};
pub use options::{OptionsError, TaxonomyArrangerOptions};
pub use taxonomy::{Condensation, Taxon, TaxonRole, Taxonomy};
pub use taxonomy_arranger::{ArrangementPhase, TaxonomyArranger};
