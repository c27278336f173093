use std::ops::Range;

use index_vec::IndexVec;
use itertools::{Itertools as _, MinMaxResult};
use ordered_float::OrderedFloat;
use thiserror::Error;

use crate::{
    geometry::{FloatType, WorldBox, WorldPoint},
    scene::Hittable,
};

use super::{Bvh, Node, NodeIdx, NodeLink, PrimitiveIdx};

#[derive(Debug, Error, PartialEq)]
pub enum BvhError {
    #[error("Cannot create a BVH from an empty list of objects")]
    EmptyPrimitiveList,

    #[error("Object {index} has an invalid bounding box: {bounding_box:?}")]
    InvalidBoundingBox {
        index: usize,
        bounding_box: WorldBox,
    },
}

/// Part of the object list that still needs to be turned into a subtree rooted at `node`.
struct BuildTask {
    range: Range<usize>,
    node: NodeIdx,
}

impl<H: Hittable> Bvh<H> {
    /// Builds the hierarchy, taking ownership of the objects.
    /// The objects get reordered in the process.
    pub fn build(mut primitives: Vec<H>) -> Result<Bvh<H>, BvhError> {
        if primitives.is_empty() {
            return Err(BvhError::EmptyPrimitiveList);
        }

        for (index, primitive) in primitives.iter().enumerate() {
            let bounding_box = primitive.get_bounding_box();
            if !bounding_box.is_valid() {
                return Err(BvhError::InvalidBoundingBox {
                    index,
                    bounding_box,
                });
            }
        }

        // Centroids are kept in a parallel vector and permuted together with the objects
        let mut centroids: Vec<WorldPoint> = primitives.iter().map(|p| p.center()).collect();

        let mut nodes: IndexVec<NodeIdx, Node> = IndexVec::new();
        let root = nodes.push(Node::placeholder());
        let mut stack = vec![BuildTask {
            range: 0..primitives.len(),
            node: root,
        }];

        while let Some(BuildTask { range, node }) = stack.pop() {
            let start = range.start;
            let (left, right) = match range.len() {
                1 => (NodeLink::leaf(start), NodeLink::leaf(start)),
                2 => (NodeLink::leaf(start), NodeLink::leaf(start + 1)),
                len => {
                    let mut mid = start
                        + split_by_most_spread_axis(
                            &mut primitives[range.clone()],
                            &mut centroids[range.clone()],
                        );

                    // Could not split with objects on both sides. Just split at the middle index
                    if mid == start || mid == range.end {
                        mid = start + len / 2;
                    }

                    let left = nodes.push(Node::placeholder());
                    let right = nodes.push(Node::placeholder());

                    // Left is popped first, keeping the arena in depth first order
                    stack.push(BuildTask {
                        range: mid..range.end,
                        node: right,
                    });
                    stack.push(BuildTask {
                        range: start..mid,
                        node: left,
                    });

                    (NodeLink::Inner(left), NodeLink::Inner(right))
                }
            };

            nodes[node].left = left;
            nodes[node].right = right;
        }

        let mut bvh = Bvh {
            primitives: IndexVec::from_vec(primitives),
            nodes,
        };
        bvh.update_bounding_boxes();

        Ok(bvh)
    }

    /// Fills in node bounding boxes bottom up.
    /// Relies on children having higher indices than their parents.
    fn update_bounding_boxes(&mut self) {
        for index in (0..self.nodes.len()).rev().map(NodeIdx::new) {
            let node = &self.nodes[index];
            let bounding_box = self
                .link_bounding_box(node.left)
                .union(&self.link_bounding_box(node.right));
            self.nodes[index].bounding_box = bounding_box;
        }
    }
}

impl NodeLink {
    fn leaf(index: usize) -> NodeLink {
        NodeLink::Leaf(PrimitiveIdx::new(index))
    }
}

/// Reorders the objects so that the ones with centroid below the middle of the most spread
/// axis come first. Returns index of the first object in the second group.
fn split_by_most_spread_axis<H>(primitives: &mut [H], centroids: &mut [WorldPoint]) -> usize {
    let (axis, pivot) = most_spread_axis(centroids);
    partition_by_centroid(primitives, centroids, axis, pivot)
}

/// Returns the axis along which the centroids are most spread out and the midpoint of
/// the centroid range on that axis.
/// Ties prefer x, then y.
fn most_spread_axis(centroids: &[WorldPoint]) -> (usize, FloatType) {
    let [(x_spread, x_mid), (y_spread, y_mid), (z_spread, z_mid)] =
        [0, 1, 2].map(|axis| centroid_spread(centroids, axis));

    if x_spread >= y_spread && x_spread >= z_spread {
        (0, x_mid)
    } else if y_spread >= x_spread && y_spread >= z_spread {
        (1, y_mid)
    } else {
        (2, z_mid)
    }
}

/// Size and midpoint of the range of centroid coordinates along one axis.
fn centroid_spread(centroids: &[WorldPoint], axis: usize) -> (FloatType, FloatType) {
    let (min, max) = match centroids.iter().map(|c| OrderedFloat(c[axis])).minmax() {
        MinMaxResult::NoElements => return (0.0, 0.0),
        MinMaxResult::OneElement(x) => (x.0, x.0),
        MinMaxResult::MinMax(min, max) => (min.0, max.0),
    };
    (max - min, (min + max) * 0.5)
}

/// Two pointer in-place partition, objects with centroid strictly below the pivot
/// end up in front. Returns the number of objects in front.
fn partition_by_centroid<H>(
    primitives: &mut [H],
    centroids: &mut [WorldPoint],
    axis: usize,
    pivot: FloatType,
) -> usize {
    assert2::debug_assert!(primitives.len() == centroids.len());

    let mut i = 0;
    let mut j = centroids.len();

    while i < j {
        if centroids[i][axis] < pivot {
            i += 1;
        } else {
            j -= 1;
            primitives.swap(i, j);
            centroids.swap(i, j);
        }
    }

    i
}
