use narwhal::graph::visual::ensure_position;
use narwhal::graph::{
    AttributeKind, Edit, ElementType, StoreGraph, VertexAttribute, VertexId,
};
use narwhal::{Connections, InclusionGraph, SelectedVertices, VertexList};
use serde_json::json;

fn line_graph(n: usize) -> StoreGraph {
    let mut g = StoreGraph::new();
    let [x, y, _] = ensure_position(&mut g);
    for i in 0..n {
        let v = g.add_vertex();
        g.set_float_value(x, v, i as f64);
        g.set_float_value(y, v, -(i as f64));
    }
    for i in 1..n {
        g.add_transaction(i - 1, i, true);
    }
    g
}

fn select(g: &mut StoreGraph, vertices: &[VertexId]) {
    let selected = VertexAttribute::Selected.ensure(g);
    for &v in vertices {
        g.set_boolean_value(selected, v, true);
    }
}

fn pin(g: &mut StoreGraph, vertices: &[VertexId]) {
    let pinned = VertexAttribute::Pinned.ensure(g);
    for &v in vertices {
        g.set_boolean_value(pinned, v, true);
    }
}

fn shift_x(g: &mut StoreGraph, dx: f64) {
    let [x, _, _] = ensure_position(g);
    for v in g.vertex_ids() {
        let moved = g.float_value(x, v) + dx;
        g.set_float_value(x, v, moved);
    }
}

#[test]
fn nothing_selected_passes_the_source_through() {
    let mut g = line_graph(4);
    let source: *const StoreGraph = &g;
    let mut inclusion = InclusionGraph::new(&mut g, Connections::Links, SelectedVertices);
    assert!(inclusion.is_arranging_all());
    let arranged = inclusion.materialize() as *const StoreGraph;
    assert!(std::ptr::eq(arranged, source));
}

#[test]
fn everything_selected_passes_the_source_through() {
    let mut g = line_graph(3);
    select(&mut g, &[0, 1, 2]);
    let mut inclusion = InclusionGraph::new(&mut g, Connections::Links, SelectedVertices);
    assert!(inclusion.is_arranging_all());

    shift_x(inclusion.materialize(), 1.0);
    inclusion.retrieve_coordinates();
    let x = VertexAttribute::X.get(&g).expect("x");
    assert_eq!(g.float_value(x, 2), 3.0);
}

#[test]
fn a_pinned_vertex_forces_a_copy_without_it() {
    let mut g = line_graph(4);
    pin(&mut g, &[1]);
    let mut inclusion = InclusionGraph::new(&mut g, Connections::Links, SelectedVertices);
    assert!(!inclusion.is_arranging_all());

    let copy = inclusion.materialize();
    assert_eq!(copy.vertex_ids(), vec![0, 2, 3]);
    // 0-1 and 1-2 lose an endpoint.
    assert_eq!(copy.transaction_count(), 1);

    shift_x(copy, 10.0);
    inclusion.retrieve_coordinates();
    let x = VertexAttribute::X.get(&g).expect("x");
    assert_eq!(g.float_value(x, 0), 10.0);
    assert_eq!(g.float_value(x, 1), 1.0);
    assert_eq!(g.float_value(x, 3), 13.0);
}

#[test]
fn the_copy_keeps_ids_positions_and_radii() {
    let mut g = line_graph(5);
    let nradius = VertexAttribute::NodeRadius.ensure(&mut g);
    g.set_float_value(nradius, 3, 2.5);
    let mut inclusion =
        InclusionGraph::new(&mut g, Connections::Links, VertexList::new([1, 3, 4]));

    let copy = inclusion.materialize();
    assert_eq!(copy.vertex_ids(), vec![1, 3, 4]);
    let x = VertexAttribute::X.get(copy).expect("x");
    let y = VertexAttribute::Y.get(copy).expect("y");
    assert_eq!(copy.float_value(x, 3), 3.0);
    assert_eq!(copy.float_value(y, 4), -4.0);
    let r = VertexAttribute::NodeRadius.get(copy).expect("nradius");
    assert_eq!(copy.float_value(r, 3), 2.5);
    assert_eq!(copy.float_value(r, 4), 1.0);
    assert_eq!(VertexAttribute::LabelRadius.get(copy), None);
}

#[test]
fn connection_policies() {
    let mut g = StoreGraph::new();
    for _ in 0..3 {
        g.add_vertex();
    }
    let t0 = g.add_transaction(0, 1, true);
    g.add_transaction(0, 1, true);
    g.add_transaction(1, 0, true);
    g.add_transaction(1, 2, false);
    select(&mut g, &[0, 1]);

    let mut none = InclusionGraph::new(&mut g, Connections::None, SelectedVertices);
    assert_eq!(none.materialize().transaction_count(), 0);

    let mut links = InclusionGraph::new(&mut g, Connections::Links, SelectedVertices);
    let copy = links.materialize();
    assert_eq!(copy.transaction_count(), 1);
    let tx = copy.transaction_at(0).expect("link");
    assert_eq!(copy.transaction_directed(tx), Some(false));

    let mut edges = InclusionGraph::new(&mut g, Connections::Edges, SelectedVertices);
    let copy = edges.materialize();
    assert_eq!(copy.transaction_count(), 2);
    assert!(copy.transactions().all(|tx| copy.transaction_directed(tx) == Some(true)));

    let mut transactions =
        InclusionGraph::new(&mut g, Connections::Transactions, SelectedVertices);
    let copy = transactions.materialize();
    assert_eq!(copy.transaction_count(), 3);
    assert!(copy.has_transaction(t0));
    assert_eq!(copy.transaction_source(t0), Some(0));
}

#[test]
fn registered_attributes_are_copied() {
    let mut g = line_graph(3);
    let label = g.add_attribute(ElementType::Vertex, AttributeKind::Object, "label", json!(null));
    let weight = g.add_attribute(ElementType::Transaction, AttributeKind::Float, "weight", json!(0.0));
    g.set_object_value(label, 2, json!("two"));
    let tx = g.transaction_at(1).expect("1 -> 2");
    g.set_float_value(weight, tx, 4.5);

    let mut inclusion =
        InclusionGraph::new(&mut g, Connections::Transactions, VertexList::new([1, 2]));
    inclusion.add_attribute_to_copy(label);
    inclusion.add_attribute_to_copy(weight);
    let copy = inclusion.materialize();

    let copied_label = copy.attribute(ElementType::Vertex, "label").expect("label");
    assert_eq!(copy.object_value(copied_label, 2), json!("two"));
    let copied_weight = copy
        .attribute(ElementType::Transaction, "weight")
        .expect("weight");
    assert_eq!(copy.float_value(copied_weight, tx), 4.5);
}

#[test]
fn recording_sources_get_one_batched_write_per_axis() {
    let mut g = line_graph(6);
    g.set_recording_edit(true);
    let mut inclusion =
        InclusionGraph::new(&mut g, Connections::Links, VertexList::new([0, 2, 4]));
    shift_x(inclusion.materialize(), 1.0);
    inclusion.retrieve_coordinates();

    let edits = g.take_edits();
    assert_eq!(edits.len(), 3);
    assert!(
        edits
            .iter()
            .all(|e| matches!(e, Edit::SetFloatValues { count: 3, .. }))
    );
    let x = VertexAttribute::X.get(&g).expect("x");
    assert_eq!(g.float_value(x, 4), 5.0);
    assert_eq!(g.float_value(x, 5), 5.0);
}

#[test]
fn secondary_positions_are_batched_too() {
    let mut g = line_graph(3);
    for a in VertexAttribute::SECONDARY_POSITION {
        a.ensure(&mut g);
    }
    g.set_recording_edit(true);
    g.take_edits();
    let mut inclusion = InclusionGraph::new(&mut g, Connections::Links, VertexList::new([0]));
    inclusion.materialize();
    inclusion.retrieve_coordinates();

    assert_eq!(g.take_edits().len(), 6);
}

#[test]
fn non_recording_sources_get_direct_writes() {
    let mut g = line_graph(3);
    let mut inclusion = InclusionGraph::new(&mut g, Connections::Links, VertexList::new([1]));
    shift_x(inclusion.materialize(), 1.0);
    inclusion.retrieve_coordinates();
    assert!(g.edits().is_empty());
}

#[test]
fn frozen_graphs_keep_their_primary_position() {
    let mut g = line_graph(3);
    let x2 = VertexAttribute::X2.ensure(&mut g);
    VertexAttribute::Y2.ensure(&mut g);
    VertexAttribute::Z2.ensure(&mut g);
    let mut inclusion = InclusionGraph::new(&mut g, Connections::Links, VertexList::new([0, 1]));

    let copy = inclusion.materialize();
    shift_x(copy, 5.0);
    let copy_x2 = VertexAttribute::X2.get(copy).expect("x2");
    copy.set_float_value(copy_x2, 1, 8.0);

    inclusion.freeze();
    inclusion.retrieve_coordinates();
    let x = VertexAttribute::X.get(&g).expect("x");
    assert_eq!(g.float_value(x, 1), 1.0);
    assert_eq!(g.float_value(x2, 1), 8.0);

    let mut inclusion = InclusionGraph::new(&mut g, Connections::Links, VertexList::new([0, 1]));
    shift_x(inclusion.materialize(), 5.0);
    inclusion.freeze();
    inclusion.unfreeze();
    inclusion.retrieve_coordinates();
    assert_eq!(g.float_value(x, 1), 6.0);
}
