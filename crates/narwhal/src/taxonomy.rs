//! Partitions of a graph's vertices into taxa.
//!
//! A [`Taxonomy`] is an arena: taxa live in a slot vector and a vertex index maps every
//! member to the slot of the taxon holding it, so looking up a neighbour's taxon while
//! condensing is a single hash lookup. Taxa are addressed from the outside by their key,
//! which is normally one of their members.

mod condensation;

pub use condensation::Condensation;

use narwhal_graph::{StoreGraph, VertexId};
use rustc_hash::FxHashMap;

/// Which arranger lays out a taxon.
///
/// Fixed when the taxonomy is discovered and merged. When a taxon qualifies for several
/// roles the earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaxonRole {
    /// Laid out on a grid.
    Rectangular,
    /// The taxon all single-vertex taxa were merged into.
    Singleton,
    /// The taxon all connected two-vertex taxa were merged into.
    Doublet,
    #[default]
    Generic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxon {
    key: VertexId,
    members: Vec<VertexId>,
    role: TaxonRole,
}

impl Taxon {
    pub fn key(&self) -> VertexId {
        self.key
    }

    pub fn members(&self) -> &[VertexId] {
        &self.members
    }

    pub fn role(&self) -> TaxonRole {
        self.role
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    taxa: Vec<Taxon>,
    /// Taxon key -> slot.
    slots: FxHashMap<VertexId, usize>,
    /// Vertex id -> slot of the taxon containing it.
    vertex_slots: FxHashMap<VertexId, usize>,
    singleton_key: Option<VertexId>,
    doublet_key: Option<VertexId>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a taxonomy from `(key, members)` pairs, in order.
    pub fn from_partition<I, M>(taxa: I) -> Self
    where
        I: IntoIterator<Item = (VertexId, M)>,
        M: IntoIterator<Item = VertexId>,
    {
        let mut taxonomy = Self::new();
        for (key, members) in taxa {
            taxonomy.insert(key, members);
        }
        taxonomy
    }

    /// Appends a taxon.
    ///
    /// Keys must be unique and no vertex may belong to two taxa.
    pub fn insert(&mut self, key: VertexId, members: impl IntoIterator<Item = VertexId>) {
        debug_assert!(!self.slots.contains_key(&key), "duplicate taxon key {key}");
        let slot = self.taxa.len();
        let members: Vec<VertexId> = members.into_iter().collect();
        for &v in &members {
            debug_assert!(
                self.slot_of_vertex(v).is_none(),
                "vertex {v} already belongs to a taxon"
            );
            self.index_vertex(v, slot);
        }
        self.slots.insert(key, slot);
        self.taxa.push(Taxon {
            key,
            members,
            role: TaxonRole::Generic,
        });
    }

    pub fn len(&self) -> usize {
        self.taxa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxa.is_empty()
    }

    pub fn taxon(&self, key: VertexId) -> Option<&Taxon> {
        self.slots.get(&key).map(|&slot| &self.taxa[slot])
    }

    /// The key of the taxon containing `vertex`.
    pub fn key_of(&self, vertex: VertexId) -> Option<VertexId> {
        self.slot_of_vertex(vertex).map(|slot| self.taxa[slot].key)
    }

    /// Taxa in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Taxon> + '_ {
        self.taxa.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.taxa.iter().map(|t| t.key)
    }

    pub fn singleton_key(&self) -> Option<VertexId> {
        self.singleton_key
    }

    pub fn doublet_key(&self) -> Option<VertexId> {
        self.doublet_key
    }

    /// Moves every taxon of `other` into this taxonomy, roles included.
    ///
    /// The two taxonomies must not share keys or vertices. Merge keys of `other` are only
    /// adopted where this taxonomy has none.
    pub fn add(&mut self, other: Taxonomy) {
        self.singleton_key = self.singleton_key.or(other.singleton_key);
        self.doublet_key = self.doublet_key.or(other.doublet_key);
        for taxon in other.taxa {
            let role = taxon.role;
            let key = taxon.key;
            self.insert(key, taxon.members);
            if let Some(&slot) = self.slots.get(&key) {
                self.taxa[slot].role = role;
            }
        }
    }

    /// Marks the taxa with the given keys for grid layout, replacing any earlier marks.
    pub fn set_arrange_rectangularly(&mut self, keys: impl IntoIterator<Item = VertexId>) {
        for slot in 0..self.taxa.len() {
            if self.taxa[slot].role == TaxonRole::Rectangular {
                let role = self.merge_role(self.taxa[slot].key);
                self.taxa[slot].role = role;
            }
        }
        for key in keys {
            if let Some(&slot) = self.slots.get(&key) {
                self.taxa[slot].role = TaxonRole::Rectangular;
            }
        }
    }

    pub fn is_arrange_rectangularly(&self, key: VertexId) -> bool {
        self.taxon(key)
            .is_some_and(|t| t.role == TaxonRole::Rectangular)
    }

    /// Merges every single-vertex taxon into one taxon and returns its key.
    ///
    /// The key is the first merged vertex in slot order, and the merged taxon takes the slot
    /// of that vertex's old taxon. Returns `None`, leaving the taxonomy as it was, when there
    /// is nothing new to merge.
    pub fn merge_singleton_taxa(&mut self) -> Option<VertexId> {
        let previous = self.singleton_key;
        let merged = self.merge_where(previous, TaxonRole::Singleton, |t| {
            t.members.len() == 1 && Some(t.key) != previous
        })?;
        self.singleton_key = Some(merged);
        tracing::debug!(key = merged, "merged singleton taxa");
        Some(merged)
    }

    /// Merges every two-vertex taxon whose first member has a neighbour in `graph`.
    ///
    /// Pairs of isolated vertices stay where they are. Only the first member is checked.
    pub fn merge_doublet_taxa(&mut self, graph: &StoreGraph) -> Option<VertexId> {
        let previous = self.doublet_key;
        let singleton = self.singleton_key;
        let merged = self.merge_where(previous, TaxonRole::Doublet, |t| {
            t.members.len() == 2
                && Some(t.key) != previous
                && Some(t.key) != singleton
                && graph.vertex_neighbour_count(t.members[0]) != 0
        })?;
        self.doublet_key = Some(merged);
        tracing::debug!(key = merged, "merged doublet taxa");
        Some(merged)
    }

    /// Folds the taxa matching `pick`, together with the taxon keyed `existing`, into a
    /// single taxon placed at the first of their slots.
    fn merge_where<F>(
        &mut self,
        existing: Option<VertexId>,
        role: TaxonRole,
        pick: F,
    ) -> Option<VertexId>
    where
        F: Fn(&Taxon) -> bool,
    {
        let picked: Vec<bool> = self
            .taxa
            .iter()
            .map(|t| pick(t) || Some(t.key) == existing)
            .collect();
        if !self.taxa.iter().any(&pick) {
            return None;
        }

        let first = picked.iter().position(|&p| p)?;
        let key = self.taxa[first].key;
        let role = if self.taxa[first].role == TaxonRole::Rectangular {
            TaxonRole::Rectangular
        } else {
            role
        };

        let mut members: Vec<VertexId> = Vec::new();
        let mut kept: Vec<Taxon> = Vec::with_capacity(self.taxa.len());
        for (taxon, merge) in std::mem::take(&mut self.taxa).into_iter().zip(picked) {
            if merge {
                members.extend(taxon.members);
            } else {
                kept.push(taxon);
            }
        }
        kept.insert(first, Taxon { key, members, role });
        self.taxa = kept;
        self.reindex();
        Some(key)
    }

    /// The role a taxon gets back when it stops being rectangular.
    fn merge_role(&self, key: VertexId) -> TaxonRole {
        if Some(key) == self.singleton_key {
            TaxonRole::Singleton
        } else if Some(key) == self.doublet_key {
            TaxonRole::Doublet
        } else {
            TaxonRole::Generic
        }
    }

    fn slot_of_vertex(&self, vertex: VertexId) -> Option<usize> {
        self.vertex_slots.get(&vertex).copied()
    }

    fn index_vertex(&mut self, vertex: VertexId, slot: usize) {
        self.vertex_slots.insert(vertex, slot);
    }

    fn reindex(&mut self) {
        self.slots.clear();
        self.vertex_slots.clear();
        for slot in 0..self.taxa.len() {
            self.slots.insert(self.taxa[slot].key, slot);
            for i in 0..self.taxa[slot].members.len() {
                let v = self.taxa[slot].members[i];
                self.index_vertex(v, slot);
            }
        }
    }

    /// Slots in condensation order: the singleton taxon, the doublet taxon, then the rest
    /// by ascending size with ties broken by key.
    fn condensation_order(&self) -> Vec<usize> {
        let rank = |t: &Taxon| {
            if Some(t.key) == self.singleton_key {
                0
            } else if Some(t.key) == self.doublet_key {
                1
            } else {
                2
            }
        };
        let mut order: Vec<usize> = (0..self.taxa.len()).collect();
        order.sort_by_key(|&slot| {
            let t = &self.taxa[slot];
            (rank(t), t.members.len(), t.key)
        });
        order
    }
}

impl<M> FromIterator<(VertexId, M)> for Taxonomy
where
    M: IntoIterator<Item = VertexId>,
{
    fn from_iter<I: IntoIterator<Item = (VertexId, M)>>(iter: I) -> Self {
        Self::from_partition(iter)
    }
}
