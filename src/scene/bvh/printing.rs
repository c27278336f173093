use std::fmt::Display;

use crate::util::Stats;

use super::{Bvh, NodeIdx, NodeLink};

/// Shape of a built hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct BvhStatistics {
    pub primitive_count: usize,
    pub node_count: usize,
    /// Depths of nodes that link directly to objects, root has depth 1
    pub depth: Stats,
    /// Number of distinct objects linked directly from each node
    pub leaf_fill: Stats,
    /// Nodes over a single object, linking to it from both sides
    pub single_object_nodes: usize,
}

impl<H> Bvh<H> {
    pub fn statistics(&self) -> BvhStatistics {
        let leaf_fill = self
            .nodes
            .iter()
            .map(|node| match (node.left, node.right) {
                (NodeLink::Leaf(a), NodeLink::Leaf(b)) if a == b => 1,
                (NodeLink::Leaf(_), NodeLink::Leaf(_)) => 2,
                (NodeLink::Leaf(_), _) | (_, NodeLink::Leaf(_)) => 1,
                _ => 0,
            })
            .collect();

        BvhStatistics {
            primitive_count: self.primitives.len(),
            node_count: self.nodes.len(),
            depth: self.depth_statistics_recursive(NodeIdx::root(), 1),
            leaf_fill,
            single_object_nodes: self
                .nodes
                .iter()
                .filter(|node| node.left == node.right)
                .count(),
        }
    }

    pub fn print_statistics(&self) {
        println!("{}", self.statistics());
    }

    pub fn print_tree(&self) {
        self.print_recursive(0, NodeIdx::root());
    }

    fn depth_statistics_recursive(&self, index: NodeIdx, depth: usize) -> Stats {
        let node = &self.nodes[index];

        [node.left, node.right]
            .into_iter()
            .map(|link| match link {
                NodeLink::Inner(child) => self.depth_statistics_recursive(child, depth + 1),
                NodeLink::Leaf(_) => Stats::new_single(depth),
            })
            .fold(Stats::default(), |a, b| a.merge(&b))
    }

    fn print_recursive(&self, indent: usize, index: NodeIdx) {
        let node = &self.nodes[index];
        println!(
            "{}- N{}: {:?}-{:?}",
            "  ".repeat(indent),
            index.index(),
            node.bounding_box.min.coords.as_slice(),
            node.bounding_box.max.coords.as_slice(),
        );

        let distinct_right = (node.right != node.left).then_some(node.right);

        for link in std::iter::once(node.left).chain(distinct_right) {
            match link {
                NodeLink::Inner(child) => self.print_recursive(indent + 1, child),
                NodeLink::Leaf(primitive) => {
                    println!("{}- P{}", "  ".repeat(indent + 1), primitive.index())
                }
            }
        }
    }
}

impl Display for BvhStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Objects: {}; nodes: {}",
            self.primitive_count, self.node_count
        )?;
        writeln!(f, "Depth: {}", self.depth)?;
        writeln!(f, "Objects per node: {}", self.leaf_fill)?;
        write!(f, "Single object nodes: {}", self.single_object_nodes)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        geometry::{FloatType, WorldPoint},
        scene::primitives::Sphere,
    };

    use assert2::{assert, let_assert};

    fn spheres_along_x(count: usize) -> Vec<Sphere> {
        (0..count)
            .map(|i| Sphere::new(WorldPoint::new(i as FloatType * 3.0, 0.0, 0.0), 1.0))
            .collect()
    }

    #[test]
    fn single_object_statistics() {
        let_assert!(Ok(bvh) = Bvh::build(spheres_along_x(1)));
        let stats = bvh.statistics();

        assert!(stats.primitive_count == 1);
        assert!(stats.node_count == 1);
        assert!(stats.single_object_nodes == 1);
        assert!(stats.depth.min == 1);
        assert!(stats.depth.max == 1);
        assert!(stats.leaf_fill == Stats::new_single(1));
    }

    #[test]
    fn evenly_spaced_statistics() {
        // 0, 3, 6, 9 split at 4.5 into two nodes of two
        let_assert!(Ok(bvh) = Bvh::build(spheres_along_x(4)));
        let stats = bvh.statistics();

        assert!(stats.node_count == 3);
        assert!(stats.single_object_nodes == 0);
        assert!(stats.depth.count == 4);
        assert!(stats.depth.min == 2);
        assert!(stats.depth.max == 2);
        assert!(stats.leaf_fill.max == 2);
        assert!(stats.leaf_fill.min == 0);
    }

    #[test]
    fn display_and_printing() {
        let_assert!(Ok(bvh) = Bvh::build(spheres_along_x(7)));
        let output = bvh.statistics().to_string();

        assert!(output.contains("Objects: 7"));
        assert!(output.contains("Depth: "));

        bvh.print_tree();
        bvh.print_statistics();
    }
}
