use crate::puzzle::{Move, Puzzle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct Node {
    pub puzzle: Puzzle,
    pub parent: Option<NodeId>,
    pub movement: Option<Move>,
    pub g: u32,
    pub h: u32,
    pub f: u32,
}

/// Arena owning every node created during one search.
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    pub fn with_root(puzzle: Puzzle, h: u32) -> (Self, NodeId) {
        let mut tree = Self::default();
        let root = tree.push(Node {
            puzzle,
            parent: None,
            movement: None,
            g: 0,
            h,
            f: h,
        });
        (tree, root)
    }

    pub fn insert_child(
        &mut self,
        parent: NodeId,
        movement: Move,
        puzzle: Puzzle,
        g: u32,
        h: u32,
    ) -> NodeId {
        self.push(Node {
            puzzle,
            parent: Some(parent),
            movement: Some(movement),
            g,
            h,
            f: g + h,
        })
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn puzzle(&self, id: NodeId) -> &Puzzle {
        &self.nodes[id.0].puzzle
    }

    /// Walks parent links from `id` up to the root, `id` first.
    pub fn ancestry(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        std::iter::successors(Some(self.node(id)), move |node| {
            node.parent.map(|parent| self.node(parent))
        })
    }
}
