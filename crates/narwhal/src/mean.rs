//! Mean position helpers, used to keep a graph centred where it was before an arrangement.

use narwhal_graph::visual::secondary_position;
use narwhal_graph::{AttributeId, StoreGraph, VertexAttribute};

/// Mean `x,y,z` over every vertex. An empty graph, or one without position attributes,
/// has its mean at the origin.
pub fn xyz_mean(graph: &StoreGraph) -> [f64; 3] {
    let count = graph.vertex_count();
    if count == 0 {
        return [0.0; 3];
    }
    let position = VertexAttribute::POSITION.map(|a| a.get(graph));
    let mut sum = [0.0; 3];
    for v in graph.vertices() {
        for axis in 0..3 {
            if let Some(attr) = position[axis] {
                sum[axis] += graph.float_value(attr, v);
            }
        }
    }
    sum.map(|s| s / count as f64)
}

/// Translates every vertex so the mean position becomes `old_mean` again.
///
/// `x2,y2,z2` move by the same amount when the graph has them.
pub fn move_mean(graph: &mut StoreGraph, old_mean: [f64; 3]) {
    let new_mean = xyz_mean(graph);
    let shift = [0, 1, 2].map(|axis| old_mean[axis] - new_mean[axis]);
    if shift == [0.0; 3] {
        return;
    }

    let mut axes: Vec<(usize, AttributeId)> = Vec::with_capacity(6);
    for (axis, attr) in VertexAttribute::POSITION.into_iter().enumerate() {
        if let Some(id) = attr.get(graph) {
            axes.push((axis, id));
        }
    }
    if let Some(secondary) = secondary_position(graph) {
        axes.extend(secondary.into_iter().enumerate());
    }

    let vertices = graph.vertex_ids();
    for v in vertices {
        for &(axis, attr) in &axes {
            let value = graph.float_value(attr, v) + shift[axis];
            graph.set_float_value(attr, v, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use narwhal_graph::visual::ensure_position;

    #[test]
    fn mean_of_an_empty_graph_is_the_origin() {
        assert_eq!(xyz_mean(&StoreGraph::new()), [0.0; 3]);
    }

    #[test]
    fn move_mean_shifts_secondary_positions_too() {
        let mut g = StoreGraph::new();
        let [x, y, _] = ensure_position(&mut g);
        let x2 = VertexAttribute::X2.ensure(&mut g);
        VertexAttribute::Y2.ensure(&mut g);
        VertexAttribute::Z2.ensure(&mut g);
        let a = g.add_vertex();
        let b = g.add_vertex();
        g.set_float_value(x, a, 2.0);
        g.set_float_value(x, b, 4.0);
        g.set_float_value(y, b, 6.0);
        assert_eq!(xyz_mean(&g), [3.0, 3.0, 0.0]);

        move_mean(&mut g, [0.0, 0.0, 0.0]);
        assert_eq!(xyz_mean(&g), [0.0, 0.0, 0.0]);
        assert_eq!(g.float_value(x, a), -1.0);
        assert_eq!(g.float_value(x2, a), -3.0);
    }
}
