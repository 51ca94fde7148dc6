//! Projecting a graph onto the vertices an arrangement is allowed to move.
//!
//! Arrangers work on whatever graph they are handed. To arrange only part of a graph (the
//! selection, one taxon), an [`InclusionGraph`] builds a copy containing just the included,
//! unpinned vertices, lets the arranger loose on that, and copies the resulting coordinates
//! back by vertex id. When the part is the whole graph the source is handed out directly.

use narwhal_graph::visual::{ensure_position, secondary_position};
use narwhal_graph::{
    AttributeId, AttributeKind, ElementType, SetFloatValues, StoreGraph, VertexAttribute,
    VertexId,
};
use rustc_hash::FxHashSet;
use serde::Deserialize;

/// How connections are carried into a materialized inclusion graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Connections {
    /// No connections at all.
    None,
    /// One undirected transaction per link.
    #[default]
    Links,
    /// One transaction per edge, keeping the edge's direction.
    Edges,
    /// Every transaction, with its id and direction.
    Transactions,
}

/// Chooses the vertices of an inclusion graph.
pub trait VertexInclusion {
    fn is_included(&self, graph: &StoreGraph, vertex: VertexId) -> bool;
}

/// Includes the vertices whose `selected` attribute is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectedVertices;

impl VertexInclusion for SelectedVertices {
    fn is_included(&self, graph: &StoreGraph, vertex: VertexId) -> bool {
        VertexAttribute::Selected
            .get(graph)
            .is_some_and(|a| graph.boolean_value(a, vertex))
    }
}

/// Includes an explicit set of vertex ids.
#[derive(Debug, Clone, Default)]
pub struct VertexList {
    vertices: FxHashSet<VertexId>,
}

impl VertexList {
    pub fn new(vertices: impl IntoIterator<Item = VertexId>) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
        }
    }
}

impl FromIterator<VertexId> for VertexList {
    fn from_iter<I: IntoIterator<Item = VertexId>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl VertexInclusion for VertexList {
    fn is_included(&self, _graph: &StoreGraph, vertex: VertexId) -> bool {
        self.vertices.contains(&vertex)
    }
}

#[derive(Debug)]
enum Projection {
    Passthrough,
    Copy(StoreGraph),
}

pub struct InclusionGraph<'g, P> {
    source: &'g mut StoreGraph,
    connections: Connections,
    inclusion: P,
    extra_attributes: Vec<AttributeId>,
    projection: Option<Projection>,
    frozen: bool,
}

impl<'g, P> InclusionGraph<'g, P>
where
    P: VertexInclusion,
{
    pub fn new(source: &'g mut StoreGraph, connections: Connections, inclusion: P) -> Self {
        Self {
            source,
            connections,
            inclusion,
            extra_attributes: Vec::new(),
            projection: None,
            frozen: false,
        }
    }

    /// Registers a source attribute to be copied along with positions and radii.
    ///
    /// Only takes effect when called before the graph is first materialized.
    pub fn add_attribute_to_copy(&mut self, attribute: AttributeId) {
        debug_assert!(
            self.projection.is_none(),
            "attributes must be registered before materialization"
        );
        self.extra_attributes.push(attribute);
    }

    /// The graph to arrange: the source itself, or a copy of the included unpinned vertices.
    ///
    /// Built on first call and reused afterwards.
    pub fn materialize(&mut self) -> &mut StoreGraph {
        self.ensure_projection();
        match &mut self.projection {
            Some(Projection::Copy(copy)) => copy,
            _ => &mut *self.source,
        }
    }

    /// True when every vertex is being arranged and the source is passed straight through.
    pub fn is_arranging_all(&mut self) -> bool {
        self.ensure_projection();
        matches!(self.projection, Some(Projection::Passthrough))
    }

    /// Stops [`retrieve_coordinates`](Self::retrieve_coordinates) from touching `x,y,z`.
    /// The secondary position is still written.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    /// Copies arranged coordinates back onto the source. Nothing to do on pass-through.
    pub fn retrieve_coordinates(&mut self) {
        self.ensure_projection();
        let Some(Projection::Copy(copy)) = &self.projection else {
            return;
        };
        copy_coordinates(copy, self.source, !self.frozen);
    }

    fn ensure_projection(&mut self) {
        if self.projection.is_none() {
            self.projection = Some(self.project());
        }
    }

    fn project(&self) -> Projection {
        let source: &StoreGraph = &*self.source;
        let pinned_attr = VertexAttribute::Pinned.get(source);
        let is_pinned = |v: VertexId| pinned_attr.is_some_and(|a| source.boolean_value(a, v));

        let included: Vec<bool> = source
            .vertices()
            .map(|v| self.inclusion.is_included(source, v))
            .collect();
        let included_count = included.iter().filter(|&&inc| inc).count();
        let any_pinned = source.vertices().any(|v| is_pinned(v));

        // Nothing included means everything is.
        let all_implied = included_count == source.vertex_count() || included_count == 0;
        if all_implied && !any_pinned {
            return Projection::Passthrough;
        }

        let mut copy = StoreGraph::new();
        let src_position = VertexAttribute::POSITION.map(|a| a.get(source));
        let dst_position = ensure_position(&mut copy);
        let secondary = secondary_position(source).map(|src| {
            let dst = VertexAttribute::SECONDARY_POSITION.map(|a| a.ensure(&mut copy));
            (src, dst)
        });
        let radii: Vec<(AttributeId, AttributeId)> =
            [VertexAttribute::NodeRadius, VertexAttribute::LabelRadius]
                .into_iter()
                .filter_map(|a| Some((a.get(source)?, a.ensure(&mut copy))))
                .collect();
        let extras: Vec<(AttributeId, AttributeId, ElementType, AttributeKind)> = self
            .extra_attributes
            .iter()
            .filter_map(|&attr| {
                let info = source.attribute_info(attr)?;
                let id = copy.add_attribute(info.element, info.kind, &info.name, info.default.clone());
                Some((attr, id, info.element, info.kind))
            })
            .collect();

        let mut members: FxHashSet<VertexId> = FxHashSet::default();
        for (v, inc) in source.vertices().zip(included) {
            if !(all_implied || inc) || is_pinned(v) {
                continue;
            }
            members.insert(v);
            copy.add_vertex_with_id(v);
            for axis in 0..3 {
                let value = src_position[axis].map_or(0.0, |a| source.float_value(a, v));
                copy.set_float_value(dst_position[axis], v, value);
            }
            if let Some((src, dst)) = secondary {
                for axis in 0..3 {
                    copy.set_float_value(dst[axis], v, source.float_value(src[axis], v));
                }
            }
            for &(src, dst) in &radii {
                copy.set_float_value(dst, v, source.float_value(src, v));
            }
            for &(src, dst, element, kind) in &extras {
                if element == ElementType::Vertex {
                    copy_value(source, &mut copy, src, dst, kind, v);
                }
            }
        }

        let both_in = |a: VertexId, b: VertexId| members.contains(&a) && members.contains(&b);
        match self.connections {
            Connections::None => {}
            Connections::Transactions => {
                for tx in source.transactions() {
                    let (Some(s), Some(d), Some(directed)) = (
                        source.transaction_source(tx),
                        source.transaction_destination(tx),
                        source.transaction_directed(tx),
                    ) else {
                        continue;
                    };
                    if both_in(s, d) {
                        copy.add_transaction_with_id(tx, s, d, directed);
                        for &(src, dst, element, kind) in &extras {
                            if element == ElementType::Transaction {
                                copy_value(source, &mut copy, src, dst, kind, tx);
                            }
                        }
                    }
                }
            }
            Connections::Edges => {
                for edge in source.edges() {
                    if both_in(edge.source, edge.destination) {
                        copy.add_transaction(edge.source, edge.destination, edge.directed);
                    }
                }
            }
            Connections::Links => {
                for link in source.links() {
                    if both_in(link.low, link.high) {
                        copy.add_transaction(link.low, link.high, false);
                    }
                }
            }
        }

        tracing::trace!(
            source_vertices = source.vertex_count(),
            included = copy.vertex_count(),
            connections = copy.transaction_count(),
            "materialized inclusion graph"
        );
        Projection::Copy(copy)
    }
}

fn copy_value(
    from: &StoreGraph,
    to: &mut StoreGraph,
    src: AttributeId,
    dst: AttributeId,
    kind: AttributeKind,
    element: usize,
) {
    match kind {
        AttributeKind::Float => to.set_float_value(dst, element, from.float_value(src, element)),
        AttributeKind::Boolean => {
            to.set_boolean_value(dst, element, from.boolean_value(src, element))
        }
        AttributeKind::Object => to.set_object_value(dst, element, from.object_value(src, element)),
    }
}

/// Copies `x,y,z` (when `primary` is set) and `x2,y2,z2` (when `from` has them) of every
/// vertex of `from` onto the same vertex ids of `to`.
///
/// A graph that is recording edits receives one batched write per axis.
pub(crate) fn copy_coordinates(from: &StoreGraph, to: &mut StoreGraph, primary: bool) {
    let mut axes: Vec<(Option<AttributeId>, AttributeId)> = Vec::with_capacity(6);
    if primary {
        let src = VertexAttribute::POSITION.map(|a| a.get(from));
        let dst = ensure_position(to);
        axes.extend(src.into_iter().zip(dst));
    }
    if let Some(src) = secondary_position(from) {
        let dst = VertexAttribute::SECONDARY_POSITION.map(|a| a.ensure(to));
        axes.extend(src.map(Some).into_iter().zip(dst));
    }

    let read = |attr: Option<AttributeId>, v: VertexId| attr.map_or(0.0, |a| from.float_value(a, v));

    if to.is_recording_edit() {
        for (src, dst) in axes {
            let mut op = SetFloatValues::with_capacity(dst, from.vertex_count());
            for v in from.vertices() {
                op.set_value(v, read(src, v));
            }
            to.execute(op);
        }
    } else {
        for v in from.vertices() {
            for &(src, dst) in &axes {
                to.set_float_value(dst, v, read(src, v));
            }
        }
    }
}
