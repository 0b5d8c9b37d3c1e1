/// Node color, every node, including the sentinel, carries one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// Index of a node within the tree's arena.
///
/// [NodeId::NIL] is the sentinel, the single external node that stands for
/// "child of a leaf" and "parent of the root". It never indexes the arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NodeId(usize);

impl NodeId {
    pub const NIL: NodeId = NodeId(usize::MAX);

    #[inline]
    pub fn from_index(index: usize) -> NodeId {
        if index == usize::MAX {
            panic!("NodeId::from_index(): index collides with sentinel");
        }
        NodeId(index)
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.0
    }

    #[inline]
    pub fn is_external(self) -> bool {
        self == NodeId::NIL
    }

    #[inline]
    pub fn is_internal(self) -> bool {
        !self.is_external()
    }
}

/// Color and structural links of a node.
///
/// The sentinel owns one instance of `Links` as well, its parent field
/// is written transiently while a deletion is in progress and reset
/// before the deletion returns.
#[derive(Clone, Debug)]
pub struct Links {
    pub color: Color,
    pub parent: NodeId, // store: parent, NIL for root
    pub left: NodeId,   // store: left child
    pub right: NodeId,  // store: right child
}

impl Links {
    pub fn sentinel() -> Links {
        Links {
            color: Color::Black,
            parent: NodeId::NIL,
            left: NodeId::NIL,
            right: NodeId::NIL,
        }
    }

    /// Whether this is the pristine sentinel state, black with no links.
    pub fn is_detached(&self) -> bool {
        self.color == Color::Black
            && self.parent.is_external()
            && self.left.is_external()
            && self.right.is_external()
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }
}

/// Internal node, correspond to a single event in the tree.
#[derive(Clone, Debug)]
pub struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub links: Links,
}

impl<K, V> Node<K, V> {
    /// New isolated node, red, with every link pointing at the sentinel.
    pub fn new(key: K, value: V) -> Node<K, V> {
        Node {
            key,
            value,
            links: Links {
                color: Color::Red,
                parent: NodeId::NIL,
                left: NodeId::NIL,
                right: NodeId::NIL,
            },
        }
    }

    #[inline]
    pub fn set_black(&mut self) {
        self.links.color = Color::Black
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
