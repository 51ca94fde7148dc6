#![forbid(unsafe_code)]

//! Graph store used by `narwhal`.
//!
//! Vertices and transactions are addressed by stable integer ids. Derived graphs
//! (inclusion graphs, condensations) add elements with the ids of the graph they were
//! built from, so positions can be copied back without an id mapping.

pub mod graph;
pub mod visual;

pub use graph::{
    Attribute, AttributeId, AttributeKind, Edge, Edit, ElementType, Link, SetFloatValues,
    StoreGraph, TransactionId, VertexId, alg,
};
pub use visual::VertexAttribute;
