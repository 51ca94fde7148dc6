use narwhal_graph::{StoreGraph, alg};

fn two_triangles_and_a_loner() -> StoreGraph {
    let mut g = StoreGraph::new();
    for _ in 0..7 {
        g.add_vertex();
    }
    g.add_transaction(0, 1, true);
    g.add_transaction(1, 2, true);
    g.add_transaction(2, 0, true);
    g.add_transaction(4, 3, true);
    g.add_transaction(4, 5, false);
    g.add_transaction(5, 3, true);
    g
}

#[test]
fn components_follow_links_in_both_directions() {
    let g = two_triangles_and_a_loner();
    let mut comps = alg::components(&g);
    for c in &mut comps {
        c.sort();
    }
    assert_eq!(comps, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6]]);
}

#[test]
fn components_start_with_the_discovering_vertex() {
    let g = two_triangles_and_a_loner();
    let comps = alg::components(&g);
    assert_eq!(comps[0][0], 0);
    assert_eq!(comps[1][0], 3);
}

#[test]
fn components_among_respects_the_filter() {
    let g = two_triangles_and_a_loner();
    let mut comps = alg::components_among(&g, |v| v != 1);
    for c in &mut comps {
        c.sort();
    }
    assert_eq!(comps, vec![vec![0, 2], vec![3, 4, 5], vec![6]]);
}

#[test]
fn component_containing_a_vertex() {
    let g = two_triangles_and_a_loner();
    let mut comp = alg::component_containing(&g, 5);
    assert_eq!(comp[0], 5);
    comp.sort();
    assert_eq!(comp, vec![3, 4, 5]);
    assert!(alg::component_containing(&g, 99).is_empty());
}
