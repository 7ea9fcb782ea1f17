use std::cmp::{self, Ordering};
use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, trace};

/// An AVL tree of unique `i32` keys.
///
/// Every node exclusively owns its children, there are no parent links.
/// All mutations walk down from the root and restore balance on the way back up.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Tree {
    root: Link,
    num_nodes: usize,
}

type Link = Option<Box<Node>>;

#[derive(Clone, PartialEq, Eq)]
struct Node {
    key: i32,
    left: Link,
    right: Link,
    height: usize,
}

/// Rebalancing case of a node whose balance factor left the range -1..=1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Imbalance {
    LeftLeft,
    LeftRight,
    RightRight,
    RightLeft,
}

/// Child visiting order of a depth-first walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    LeftFirst,
    RightFirst,
}

/// What a traversal reports about a single node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visit {
    pub key: i32,
    pub height: usize,
    pub balance_factor: i32,
    /// Distance from the root, which has depth 0.
    pub depth: usize,
    pub left: Option<i32>,
    pub right: Option<i32>,
}

/// Read-only handle to a node of a [`Tree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    node: &'a Node,
}

enum Direction {
    FromParent,
    FromFirst,
    FromSecond,
}

impl Tree {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree. A single leaf has height 1.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Removes all keys.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns a handle to the root node, if any.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.as_deref().map(|node| NodeRef { node })
    }

    /// Returns true if the tree contains the key.
    pub fn contains(&self, key: i32) -> bool {
        self.find(key).is_some()
    }

    /// Inserts a key.
    /// Returns false and leaves the tree untouched if the key was already present.
    pub fn insert(&mut self, key: i32) -> bool {
        let mut inserted = false;
        let root = Self::insert_at(self.root.take(), key, &mut inserted);
        self.root = Some(root);
        if inserted {
            self.num_nodes += 1;
        }
        debug!(key, inserted, len = self.num_nodes, "insert");
        inserted
    }

    /// Removes a key.
    /// Returns false if the key was not present.
    pub fn remove(&mut self, key: i32) -> bool {
        let mut removed = false;
        self.root = Self::remove_at(self.root.take(), key, &mut removed);
        if removed {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
            debug_assert!(!self.contains(key));
        }
        debug!(key, removed, len = self.num_nodes, "remove");
        removed
    }

    /// Returns all keys in ascending order.
    pub fn keys(&self) -> Vec<i32> {
        let mut keys = Vec::with_capacity(self.num_nodes);
        self.inorder(|visit| keys.push(visit.key));
        keys
    }

    pub fn preorder<F: FnMut(Visit)>(&self, order: Order, f: F) {
        self.traverse(order, f, |_| {}, |_| {});
    }

    pub fn inorder<F: FnMut(Visit)>(&self, f: F) {
        self.traverse(Order::LeftFirst, |_| {}, f, |_| {});
    }

    /// Visits keys in descending order, the layout used by sideways listings.
    pub fn reverse_inorder<F: FnMut(Visit)>(&self, f: F) {
        self.traverse(Order::RightFirst, |_| {}, f, |_| {});
    }

    pub fn postorder<F: FnMut(Visit)>(&self, order: Order, f: F) {
        self.traverse(order, |_| {}, |_| {}, f);
    }

    /// Depth-first walk calling `preorder`, `inorder` and `postorder` for each node.
    pub fn traverse<Pre, In, Post>(
        &self,
        order: Order,
        mut preorder: Pre,
        mut inorder: In,
        mut postorder: Post,
    ) where
        Pre: FnMut(Visit),
        In: FnMut(Visit),
        Post: FnMut(Visit),
    {
        let mut stack: Vec<(&Node, usize, Direction)> = Vec::with_capacity(self.height());
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 0, Direction::FromParent));
        }
        while let Some((node, depth, dir)) = stack.pop() {
            let (first, second) = match order {
                Order::LeftFirst => (&node.left, &node.right),
                Order::RightFirst => (&node.right, &node.left),
            };
            match dir {
                Direction::FromParent => {
                    preorder(node.visit(depth));
                    stack.push((node, depth, Direction::FromFirst));
                    if let Some(child) = first.as_deref() {
                        stack.push((child, depth + 1, Direction::FromParent));
                    }
                }
                Direction::FromFirst => {
                    inorder(node.visit(depth));
                    stack.push((node, depth, Direction::FromSecond));
                    if let Some(child) = second.as_deref() {
                        stack.push((child, depth + 1, Direction::FromParent));
                    }
                }
                Direction::FromSecond => postorder(node.visit(depth)),
            }
        }
    }

    /// Breadth-first walk, left to right within each level.
    pub fn traverse_level_order<F: FnMut(Visit)>(&self, mut f: F) {
        let mut queue = VecDeque::new();
        if let Some(root) = self.root.as_deref() {
            queue.push_back((root, 0));
        }
        while let Some((node, depth)) = queue.pop_front() {
            f(node.visit(depth));
            if let Some(left) = node.left.as_deref() {
                queue.push_back((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                queue.push_back((right, depth + 1));
            }
        }
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        fn check(link: &Link, lower: Option<i32>, upper: Option<i32>) -> (usize, usize) {
            let node = match link {
                None => return (0, 0),
                Some(node) => node,
            };

            // Check search order against the bounds inherited from the ancestors
            if let Some(lower) = lower {
                assert!(node.key > lower, "key {} not above {}", node.key, lower);
            }
            if let Some(upper) = upper {
                assert!(node.key < upper, "key {} not below {}", node.key, upper);
            }

            let (left_height, left_nodes) = check(&node.left, lower, Some(node.key));
            let (right_height, right_nodes) = check(&node.right, Some(node.key), upper);

            // Check height
            assert_eq!(node.height, cmp::max(left_height, right_height) + 1);

            // Check AVL condition (nearly balance)
            assert!(left_height <= right_height + 1, "left heavy at {}", node.key);
            assert!(right_height <= left_height + 1, "right heavy at {}", node.key);

            (node.height, left_nodes + right_nodes + 1)
        }

        let (height, num_nodes) = check(&self.root, None, None);
        assert_eq!(height, self.height());

        // Check number of nodes
        assert_eq!(num_nodes, self.num_nodes);
    }

    fn find(&self, key: i32) -> Option<&Node> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Equal => break,
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        current
    }

    fn insert_at(link: Link, key: i32, inserted: &mut bool) -> Box<Node> {
        let mut node = match link {
            None => {
                *inserted = true;
                return Node::create(key);
            }
            Some(node) => node,
        };
        match key.cmp(&node.key) {
            Ordering::Less => node.left = Some(Self::insert_at(node.left.take(), key, inserted)),
            Ordering::Greater => {
                node.right = Some(Self::insert_at(node.right.take(), key, inserted))
            }
            // Duplicate, nothing below changed
            Ordering::Equal => return node,
        }
        Self::rebalance_node(node)
    }

    fn remove_at(link: Link, key: i32, removed: &mut bool) -> Link {
        let mut node = link?;
        match key.cmp(&node.key) {
            Ordering::Less => node.left = Self::remove_at(node.left.take(), key, removed),
            Ordering::Greater => node.right = Self::remove_at(node.right.take(), key, removed),
            Ordering::Equal => {
                *removed = true;
                match (node.left.take(), node.right.take()) {
                    // Stem or leaf, splice in the only child
                    (None, child) | (child, None) => return child,
                    (left, Some(right)) => {
                        // Take over the key of the smallest node in the right sub tree,
                        // then remove that node instead
                        let successor = Self::min_key(&right);
                        node.key = successor;
                        node.left = left;
                        node.right = Self::remove_at(Some(right), successor, removed);
                    }
                }
            }
        }
        Some(Self::rebalance_node(node))
    }

    fn min_key(mut node: &Node) -> i32 {
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        node.key
    }

    fn rotate_left(mut node: Box<Node>) -> Box<Node> {
        match node.right.take() {
            None => node,
            Some(mut right) => {
                trace!(key = node.key, pivot = right.key, "rotate left");
                node.right = right.left.take();
                node.adjust_height();
                right.left = Some(node);
                right.adjust_height();
                right
            }
        }
    }

    fn rotate_right(mut node: Box<Node>) -> Box<Node> {
        match node.left.take() {
            None => node,
            Some(mut left) => {
                trace!(key = node.key, pivot = left.key, "rotate right");
                node.left = left.right.take();
                node.adjust_height();
                left.right = Some(node);
                left.adjust_height();
                left
            }
        }
    }

    // Refresh the height of a node whose children may have changed and
    // rotate it back into balance. Returns the new root of the sub tree.
    fn rebalance_node(mut node: Box<Node>) -> Box<Node> {
        node.adjust_height();
        let imbalance = match node.imbalance() {
            None => return node,
            Some(imbalance) => imbalance,
        };
        trace!(key = node.key, ?imbalance, "rebalance");
        match imbalance {
            Imbalance::LeftLeft => Self::rotate_right(node),
            Imbalance::LeftRight => {
                node.left = node.left.take().map(Self::rotate_left);
                Self::rotate_right(node)
            }
            Imbalance::RightRight => Self::rotate_left(node),
            Imbalance::RightLeft => {
                node.right = node.right.take().map(Self::rotate_right);
                Self::rotate_left(node)
            }
        }
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

impl FromIterator<i32> for Tree {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<i32> for Tree {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

impl Node {
    fn create(key: i32) -> Box<Node> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn adjust_height(&mut self) {
        self.height = cmp::max(height(&self.left), height(&self.right)) + 1;
    }

    fn balance_factor(&self) -> i32 {
        height(&self.left) as i32 - height(&self.right) as i32
    }

    fn imbalance(&self) -> Option<Imbalance> {
        let balance = self.balance_factor();
        if balance > 1 {
            let left = self.left.as_deref().map_or(0, Node::balance_factor);
            Some(if left >= 0 {
                Imbalance::LeftLeft
            } else {
                Imbalance::LeftRight
            })
        } else if balance < -1 {
            let right = self.right.as_deref().map_or(0, Node::balance_factor);
            Some(if right <= 0 {
                Imbalance::RightRight
            } else {
                Imbalance::RightLeft
            })
        } else {
            None
        }
    }

    fn visit(&self, depth: usize) -> Visit {
        Visit {
            key: self.key,
            height: self.height,
            balance_factor: self.balance_factor(),
            depth,
            left: self.left.as_ref().map(|left| left.key),
            right: self.right.as_ref().map(|right| right.key),
        }
    }
}

impl<'a> NodeRef<'a> {
    pub fn key(&self) -> i32 {
        self.node.key
    }

    pub fn height(&self) -> usize {
        self.node.height
    }

    /// Height of the left sub tree minus height of the right sub tree.
    pub fn balance_factor(&self) -> i32 {
        self.node.balance_factor()
    }

    pub fn left(&self) -> Option<NodeRef<'a>> {
        self.node.left.as_deref().map(|node| NodeRef { node })
    }

    pub fn right(&self) -> Option<NodeRef<'a>> {
        self.node.right.as_deref().map(|node| NodeRef { node })
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.node.key)
            .field("height", &self.node.height)
            .finish()
    }
}
