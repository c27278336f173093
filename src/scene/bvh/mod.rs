mod building;
mod printing;
mod ray_bvh_intersection;

use index_vec::IndexVec;

use crate::geometry::{WorldBox, WorldPoint};

pub use building::BvhError;
pub use printing::BvhStatistics;

/// Binary bounding volume hierarchy over a fixed list of hittable objects.
///
/// Built once, immutable afterwards. Implements `Hittable` itself, so from the
/// outside it can't be told apart from a single primitive.
///
/// Exception at the ends of the ray length range: a hit exactly at `ray_length.max`
/// (or `min`) is missed when the ray enters (or leaves) a node's box at that same
/// length, because touching a box is not an intersection.
#[derive(Clone, Debug)]
pub struct Bvh<H> {
    /// Objects, reordered during the build so that every subtree covers a contiguous range.
    primitives: IndexVec<PrimitiveIdx, H>,
    /// Node arena, root is at index 0, children always come after their parent.
    nodes: IndexVec<NodeIdx, Node>,
}

#[derive(Clone, Debug)]
struct Node {
    /// Union of bounding boxes of both children
    bounding_box: WorldBox,
    left: NodeLink,
    right: NodeLink,
}

/// Child of a node: either another node or directly an object.
/// A node over a single object links to that object from both sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum NodeLink {
    Inner(NodeIdx),
    Leaf(PrimitiveIdx),
}

index_vec::define_index_type! {
    struct NodeIdx = u32;
}

index_vec::define_index_type! {
    struct PrimitiveIdx = u32;
}

impl NodeIdx {
    fn root() -> NodeIdx {
        NodeIdx::new(0)
    }
}

impl Node {
    /// Node that will be overwritten once the real children are known.
    fn placeholder() -> Node {
        Node {
            bounding_box: WorldBox::new(WorldPoint::origin(), WorldPoint::origin()),
            left: NodeLink::Leaf(PrimitiveIdx::new(0)),
            right: NodeLink::Leaf(PrimitiveIdx::new(0)),
        }
    }
}

impl<H> Bvh<H> {
    /// Number of objects in the hierarchy.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The objects in their post-build order.
    pub fn primitives(&self) -> &[H] {
        &self.primitives.raw
    }

    pub fn root_bounding_box(&self) -> &WorldBox {
        &self.nodes[NodeIdx::root()].bounding_box
    }

    fn link_bounding_box(&self, link: NodeLink) -> WorldBox
    where
        H: super::Hittable,
    {
        match link {
            NodeLink::Inner(index) => self.nodes[index].bounding_box,
            NodeLink::Leaf(index) => self.primitives[index].get_bounding_box(),
        }
    }
}
