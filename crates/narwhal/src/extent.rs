//! Bounding summaries of vertex sets.

use narwhal_graph::{StoreGraph, VertexAttribute, VertexId};

/// The box around a set of vertices, padded by their node radii, summarised as a center and
/// a radius, plus the radius of the box padded by label radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub center: [f64; 3],
    pub node_radius: f64,
    pub label_radius: f64,
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: [f64; 3],
    max: [f64; 3],
}

impl Bounds {
    fn empty() -> Self {
        Self {
            min: [f64::INFINITY; 3],
            max: [f64::NEG_INFINITY; 3],
        }
    }

    fn include(&mut self, pos: [f64; 3], radius: f64) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(pos[axis] - radius);
            self.max[axis] = self.max[axis].max(pos[axis] + radius);
        }
    }

    fn half_largest_span(&self) -> f64 {
        (0..3)
            .map(|axis| self.max[axis] - self.min[axis])
            .fold(f64::NEG_INFINITY, f64::max)
            / 2.0
    }

    fn midpoint(&self) -> [f64; 3] {
        [0, 1, 2].map(|axis| (self.min[axis] + self.max[axis]) / 2.0)
    }
}

impl Extent {
    /// Computes the extent of `vertices`.
    ///
    /// Vertices without a radius attribute count as radius 1. `vertices` must not be empty;
    /// taxa are never empty when this is called.
    pub fn of(graph: &StoreGraph, vertices: &[VertexId]) -> Self {
        debug_assert!(!vertices.is_empty(), "extent of an empty vertex set");

        let position = VertexAttribute::POSITION.map(|a| a.get(graph));
        let node_radius = VertexAttribute::NodeRadius.get(graph);
        let label_radius = VertexAttribute::LabelRadius.get(graph);

        let mut node_box = Bounds::empty();
        let mut label_box = Bounds::empty();
        for &v in vertices {
            let pos = position.map(|attr| attr.map_or(0.0, |a| graph.float_value(a, v)));
            let nr = node_radius.map_or(1.0, |a| graph.float_value(a, v));
            let lr = label_radius.map_or(1.0, |a| graph.float_value(a, v));
            node_box.include(pos, nr);
            label_box.include(pos, lr);
        }

        Self {
            center: node_box.midpoint(),
            node_radius: node_box.half_largest_span(),
            label_radius: label_box.half_largest_span(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use narwhal_graph::visual::ensure_position;

    fn graph_with(points: &[([f64; 3], f64)]) -> (StoreGraph, Vec<VertexId>) {
        let mut g = StoreGraph::new();
        let [x, y, z] = ensure_position(&mut g);
        let r = VertexAttribute::NodeRadius.ensure(&mut g);
        let mut ids = Vec::new();
        for &(p, radius) in points {
            let v = g.add_vertex();
            g.set_float_value(x, v, p[0]);
            g.set_float_value(y, v, p[1]);
            g.set_float_value(z, v, p[2]);
            g.set_float_value(r, v, radius);
            ids.push(v);
        }
        (g, ids)
    }

    #[test]
    fn two_vertices_on_the_x_axis() {
        let (g, ids) = graph_with(&[([0.0, 0.0, 0.0], 1.0), ([10.0, 0.0, 0.0], 1.0)]);
        let e = Extent::of(&g, &ids);
        assert_eq!(e.node_radius, 6.0);
        assert_eq!(e.center, [5.0, 0.0, 0.0]);
        // No label radius attribute: defaults to 1 as well.
        assert_eq!(e.label_radius, 6.0);
    }

    #[test]
    fn radius_comes_from_the_widest_axis() {
        let (g, ids) = graph_with(&[([0.0, 0.0, 0.0], 2.0), ([4.0, 20.0, -6.0], 0.5)]);
        let e = Extent::of(&g, &ids);
        // y spans [-2, 20.5].
        assert_eq!(e.node_radius, 11.25);
        assert_eq!(e.center, [1.25, 9.25, -2.25]);
    }

    #[test]
    fn label_radius_uses_its_own_box() {
        let (mut g, ids) = graph_with(&[([0.0, 0.0, 0.0], 1.0)]);
        let lr = VertexAttribute::LabelRadius.ensure(&mut g);
        g.set_float_value(lr, ids[0], 4.0);
        let e = Extent::of(&g, &ids);
        assert_eq!(e.node_radius, 1.0);
        assert_eq!(e.label_radius, 4.0);
        assert_eq!(e.center, [0.0, 0.0, 0.0]);
    }
}
