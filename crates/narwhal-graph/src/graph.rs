//! The [`StoreGraph`] container.
//!
//! Vertices and transactions keep the ids they were created with for their whole lifetime.
//! Positions (`vertex_at`, `transaction_at`) are dense and shift when elements are removed.

pub mod alg;
mod attribute;
mod connections;
mod entries;
mod operation;

use rustc_hash::FxBuildHasher;
use serde_json::Value;
use std::cell::{Ref, RefCell};

pub use attribute::{Attribute, AttributeId, AttributeKind, ElementType};
pub use connections::{Edge, Link};
pub use operation::{Edit, SetFloatValues};

use attribute::Column;
use connections::ConnectionCache;
use entries::TransactionEntry;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

pub type VertexId = usize;
pub type TransactionId = usize;

#[derive(Debug, Clone, Default)]
pub struct StoreGraph {
    vertices: Vec<VertexId>,
    vertex_positions: HashMap<VertexId, usize>,
    next_vertex_id: VertexId,

    transactions: Vec<TransactionEntry>,
    transaction_positions: HashMap<TransactionId, usize>,
    next_transaction_id: TransactionId,

    attributes: Vec<Attribute>,
    columns: Vec<Column>,

    recording: bool,
    edits: Vec<Edit>,

    // Bumped on every structural change; the connection cache compares against it.
    structure_gen: u64,
    connections: RefCell<ConnectionCache>,
}

impl StoreGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn invalidate_connections(&mut self) {
        self.structure_gen = self.structure_gen.wrapping_add(1);
    }

    fn ensure_connections(&self) -> Ref<'_, ConnectionCache> {
        if !self.connections.borrow().is_current(self.structure_gen) {
            self.connections
                .borrow_mut()
                .rebuild(self.structure_gen, &self.transactions);
        }
        self.connections.borrow()
    }

    fn log(&mut self, edit: Edit) {
        if self.recording {
            self.edits.push(edit);
        }
    }

    // ---- vertices -------------------------------------------------------------------------

    pub fn add_vertex(&mut self) -> VertexId {
        let id = self.next_vertex_id;
        self.add_vertex_with_id(id)
    }

    /// Adds a vertex with a caller-chosen id. Adding an existing id is a no-op.
    pub fn add_vertex_with_id(&mut self, id: VertexId) -> VertexId {
        if self.vertex_positions.contains_key(&id) {
            return id;
        }
        self.invalidate_connections();
        self.vertex_positions.insert(id, self.vertices.len());
        self.vertices.push(id);
        self.next_vertex_id = self.next_vertex_id.max(id.saturating_add(1));
        self.log(Edit::AddVertex(id));
        id
    }

    /// Removes a vertex together with its incident transactions and attribute values.
    pub fn remove_vertex(&mut self, id: VertexId) -> bool {
        let Some(position) = self.vertex_positions.remove(&id) else {
            return false;
        };

        let incident: Vec<TransactionId> = self
            .transactions
            .iter()
            .filter(|t| t.touches(id))
            .map(|t| t.id)
            .collect();
        for tx in incident {
            self.remove_transaction(tx);
        }

        self.invalidate_connections();
        self.vertices.remove(position);
        for i in position..self.vertices.len() {
            let v = self.vertices[i];
            if let Some(p) = self.vertex_positions.get_mut(&v) {
                *p = i;
            }
        }
        for (attr, column) in self.attributes.iter().zip(self.columns.iter_mut()) {
            if attr.element == ElementType::Vertex {
                column.clear(id);
            }
        }
        self.log(Edit::RemoveVertex(id));
        true
    }

    pub fn has_vertex(&self, id: VertexId) -> bool {
        self.vertex_positions.contains_key(&id)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// One more than the largest vertex id ever used.
    pub fn vertex_capacity(&self) -> usize {
        self.next_vertex_id
    }

    pub fn vertex_at(&self, position: usize) -> Option<VertexId> {
        self.vertices.get(position).copied()
    }

    pub fn vertex_position(&self, id: VertexId) -> Option<usize> {
        self.vertex_positions.get(&id).copied()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().copied()
    }

    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices.clone()
    }

    // ---- transactions ---------------------------------------------------------------------

    /// Adds a transaction, creating missing endpoints.
    pub fn add_transaction(
        &mut self,
        source: VertexId,
        destination: VertexId,
        directed: bool,
    ) -> TransactionId {
        let id = self.next_transaction_id;
        self.add_transaction_with_id(id, source, destination, directed)
    }

    /// Adds a transaction with a caller-chosen id. Adding an existing id is a no-op.
    pub fn add_transaction_with_id(
        &mut self,
        id: TransactionId,
        source: VertexId,
        destination: VertexId,
        directed: bool,
    ) -> TransactionId {
        if self.transaction_positions.contains_key(&id) {
            return id;
        }
        self.add_vertex_with_id(source);
        self.add_vertex_with_id(destination);

        self.invalidate_connections();
        self.transaction_positions.insert(id, self.transactions.len());
        self.transactions.push(TransactionEntry {
            id,
            source,
            destination,
            directed,
        });
        self.next_transaction_id = self.next_transaction_id.max(id.saturating_add(1));
        self.log(Edit::AddTransaction(id));
        id
    }

    pub fn remove_transaction(&mut self, id: TransactionId) -> bool {
        let Some(position) = self.transaction_positions.remove(&id) else {
            return false;
        };
        self.invalidate_connections();
        self.transactions.remove(position);
        for i in position..self.transactions.len() {
            let t = self.transactions[i].id;
            if let Some(p) = self.transaction_positions.get_mut(&t) {
                *p = i;
            }
        }
        for (attr, column) in self.attributes.iter().zip(self.columns.iter_mut()) {
            if attr.element == ElementType::Transaction {
                column.clear(id);
            }
        }
        self.log(Edit::RemoveTransaction(id));
        true
    }

    pub fn has_transaction(&self, id: TransactionId) -> bool {
        self.transaction_positions.contains_key(&id)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn transaction_at(&self, position: usize) -> Option<TransactionId> {
        self.transactions.get(position).map(|t| t.id)
    }

    pub fn transactions(&self) -> impl Iterator<Item = TransactionId> + '_ {
        self.transactions.iter().map(|t| t.id)
    }

    fn transaction_entry(&self, id: TransactionId) -> Option<&TransactionEntry> {
        self.transaction_positions
            .get(&id)
            .map(|&ix| &self.transactions[ix])
    }

    pub fn transaction_source(&self, id: TransactionId) -> Option<VertexId> {
        self.transaction_entry(id).map(|t| t.source)
    }

    pub fn transaction_destination(&self, id: TransactionId) -> Option<VertexId> {
        self.transaction_entry(id).map(|t| t.destination)
    }

    pub fn transaction_directed(&self, id: TransactionId) -> Option<bool> {
        self.transaction_entry(id).map(|t| t.directed)
    }

    // ---- derived connections --------------------------------------------------------------

    pub fn edge_count(&self) -> usize {
        self.ensure_connections().edges.len()
    }

    pub fn edge_at(&self, position: usize) -> Option<Edge> {
        self.ensure_connections().edges.get(position).cloned()
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.ensure_connections().edges.clone()
    }

    pub fn link_count(&self) -> usize {
        self.ensure_connections().links.len()
    }

    pub fn link_at(&self, position: usize) -> Option<Link> {
        self.ensure_connections().links.get(position).cloned()
    }

    pub fn links(&self) -> Vec<Link> {
        self.ensure_connections().links.clone()
    }

    pub fn vertex_neighbour_count(&self, v: VertexId) -> usize {
        self.ensure_connections().neighbours(v).len()
    }

    pub fn vertex_neighbours(&self, v: VertexId) -> Vec<VertexId> {
        self.ensure_connections().neighbours(v).to_vec()
    }

    pub fn for_each_neighbour<F>(&self, v: VertexId, mut f: F)
    where
        F: FnMut(VertexId),
    {
        let cache = self.ensure_connections();
        for &w in cache.neighbours(v) {
            f(w);
        }
    }

    // ---- attributes -----------------------------------------------------------------------

    /// Adds an attribute, or returns the existing one with the same element type and name.
    pub fn add_attribute(
        &mut self,
        element: ElementType,
        kind: AttributeKind,
        name: &str,
        default: Value,
    ) -> AttributeId {
        if let Some(id) = self.attribute(element, name) {
            return id;
        }
        let id = self.attributes.len();
        self.columns.push(Column::new(kind, &default));
        self.attributes.push(Attribute {
            id,
            element,
            kind,
            name: name.to_string(),
            default,
        });
        self.log(Edit::AddAttribute(id));
        id
    }

    pub fn ensure_attribute(
        &mut self,
        element: ElementType,
        kind: AttributeKind,
        name: &str,
    ) -> AttributeId {
        self.add_attribute(element, kind, name, kind.default_value())
    }

    pub fn attribute(&self, element: ElementType, name: &str) -> Option<AttributeId> {
        self.attributes
            .iter()
            .find(|a| a.element == element && a.name == name)
            .map(|a| a.id)
    }

    pub fn attribute_info(&self, id: AttributeId) -> Option<&Attribute> {
        self.attributes.get(id)
    }

    pub fn attributes(&self, element: ElementType) -> impl Iterator<Item = &Attribute> + '_ {
        self.attributes.iter().filter(move |a| a.element == element)
    }

    pub fn float_value(&self, attribute: AttributeId, element: usize) -> f64 {
        self.columns
            .get(attribute)
            .map_or(0.0, |c| c.float(element))
    }

    pub fn set_float_value(&mut self, attribute: AttributeId, element: usize, value: f64) {
        let Some(column) = self.columns.get_mut(attribute) else {
            debug_assert!(false, "unknown attribute {attribute}");
            return;
        };
        column.set_float(element, value);
        self.log(Edit::SetFloat {
            attribute,
            element,
            value,
        });
    }

    pub fn boolean_value(&self, attribute: AttributeId, element: usize) -> bool {
        self.columns
            .get(attribute)
            .is_some_and(|c| c.boolean(element))
    }

    pub fn set_boolean_value(&mut self, attribute: AttributeId, element: usize, value: bool) {
        let Some(column) = self.columns.get_mut(attribute) else {
            debug_assert!(false, "unknown attribute {attribute}");
            return;
        };
        column.set_boolean(element, value);
        self.log(Edit::SetBoolean {
            attribute,
            element,
            value,
        });
    }

    pub fn object_value(&self, attribute: AttributeId, element: usize) -> Value {
        self.columns
            .get(attribute)
            .map_or(Value::Null, |c| c.object(element))
    }

    pub fn set_object_value(&mut self, attribute: AttributeId, element: usize, value: Value) {
        let Some(column) = self.columns.get_mut(attribute) else {
            debug_assert!(false, "unknown attribute {attribute}");
            return;
        };
        column.set_object(element, value);
        self.log(Edit::SetObject { attribute, element });
    }

    // ---- edit recording -------------------------------------------------------------------

    pub fn is_recording_edit(&self) -> bool {
        self.recording
    }

    pub fn set_recording_edit(&mut self, recording: bool) {
        self.recording = recording;
    }

    /// Applies a batched float write. A recording graph logs it as a single edit.
    pub fn execute(&mut self, operation: SetFloatValues) {
        let attribute = operation.attribute();
        let Some(column) = self.columns.get_mut(attribute) else {
            debug_assert!(false, "unknown attribute {attribute}");
            return;
        };
        for &(element, value) in operation.values() {
            column.set_float(element, value);
        }
        self.log(Edit::SetFloatValues {
            attribute,
            count: operation.len(),
        });
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn take_edits(&mut self) -> Vec<Edit> {
        std::mem::take(&mut self.edits)
    }
}
