// Copyright 2025 Lars Brubaker
// License: MIT
//
// The active-edge dictionary used by the monotone decomposition sweep.
//
// Edges crossing the sweep line are kept in a top-down splay tree ordered by
// their x-intercept at the current sweep height. Keys are re-evaluated in
// place before each event (`retarget`); since active edges of a simple
// polygon never cross, the in-order sequence stays sorted.
//
// Ties in x are broken by edge id, giving a strict total order without
// nudging keys by an epsilon.

use std::cmp::Ordering;

use crate::bucketalloc::BucketAlloc;
use crate::geom::Real;
use crate::polygon::{EdgeIdx, INVALID};

/// Index into the node arena.
pub type NodeIdx = u32;

/// Composite key of an active edge: its x at the sweep height, then its id.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SweepKey {
    pub x: Real,
    pub edge: EdgeIdx,
}

impl SweepKey {
    pub fn new(x: Real, edge: EdgeIdx) -> Self {
        SweepKey { x, edge }
    }

    fn order(&self, other: &SweepKey) -> Ordering {
        self.x
            .partial_cmp(&other.x)
            .unwrap_or(Ordering::Equal)
            .then(self.edge.cmp(&other.edge))
    }
}

#[derive(Clone, Debug)]
struct SplayNode {
    key: SweepKey,
    left: NodeIdx,
    right: NodeIdx,
}

impl SplayNode {
    fn leaf(key: SweepKey) -> Self {
        SplayNode {
            key,
            left: INVALID,
            right: INVALID,
        }
    }
}

/// Ordered set of the edges currently crossing the sweep line.
#[derive(Clone, Debug)]
pub struct OrderedEdgeSet {
    nodes: BucketAlloc<SplayNode>,
    root: NodeIdx,
    /// Scratch node used to assemble the left/right trees while splaying.
    header: NodeIdx,
}

impl OrderedEdgeSet {
    pub fn new() -> Self {
        let mut nodes = BucketAlloc::new();
        let header = nodes.alloc(SplayNode::leaf(SweepKey::new(0.0, INVALID)));
        OrderedEdgeSet {
            nodes,
            root: INVALID,
            header,
        }
    }

    /// Number of edges in the set.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.root == INVALID
    }

    /// Sorted, lazily produced sequence of the edges in the set.
    /// Calling `iter` again restarts from the leftmost edge.
    pub fn iter(&self) -> InOrder<'_> {
        InOrder {
            set: self,
            stack: Vec::new(),
            cur: self.root,
        }
    }

    /// Current key of every edge, in order.
    pub fn keys(&self) -> Vec<SweepKey> {
        let mut it = self.iter();
        let mut out = Vec::with_capacity(self.len());
        while let Some(n) = it.next_node() {
            out.push(self.nodes[n].key);
        }
        out
    }

    /// Re-evaluate every key for sweep height `y`; `eval(edge, y)` returns
    /// the edge's x-intercept.
    pub fn retarget<F>(&mut self, y: Real, eval: F)
    where
        F: Fn(EdgeIdx, Real) -> Real,
    {
        let mut stack: Vec<NodeIdx> = Vec::new();
        let mut cur = self.root;
        loop {
            while cur != INVALID {
                stack.push(cur);
                cur = self.nodes[cur].left;
            }
            let Some(n) = stack.pop() else { break };
            let node = &mut self.nodes[n];
            node.key.x = eval(node.key.edge, y);
            cur = node.right;
        }
    }

    /// Insert `edge` at x-position `x`. Returns false if the edge is already
    /// present under the same key.
    pub fn insert(&mut self, edge: EdgeIdx, x: Real) -> bool {
        let key = SweepKey::new(x, edge);
        if self.root == INVALID {
            self.root = self.nodes.alloc(SplayNode::leaf(key));
            return true;
        }

        self.root = self.splay(key, self.root);
        let root = self.root;
        let new_node = match key.order(&self.nodes[root].key) {
            Ordering::Less => {
                let left = self.nodes[root].left;
                self.nodes[root].left = INVALID;
                SplayNode {
                    key,
                    left,
                    right: root,
                }
            }
            Ordering::Greater => {
                let right = self.nodes[root].right;
                self.nodes[root].right = INVALID;
                SplayNode {
                    key,
                    left: root,
                    right,
                }
            }
            Ordering::Equal => return false,
        };
        self.root = self.nodes.alloc(new_node);
        true
    }

    /// Remove the edge stored under `key`. Returns the removed edge, or None
    /// if no node carries exactly that key.
    pub fn delete_by_key(&mut self, key: SweepKey) -> Option<EdgeIdx> {
        if self.root == INVALID {
            return None;
        }
        self.root = self.splay(key, self.root);
        let root = self.root;
        if key.order(&self.nodes[root].key) != Ordering::Equal {
            return None;
        }

        let left = self.nodes[root].left;
        let right = self.nodes[root].right;
        self.root = if left == INVALID {
            right
        } else {
            // Everything on the left is smaller, so this brings its maximum
            // to the top with a free right slot.
            let new_root = self.splay(key, left);
            self.nodes[new_root].right = right;
            new_root
        };
        self.nodes.free(root).map(|node| node.key.edge)
    }

    /// The edge with the greatest x strictly less than `x`, i.e. the edge
    /// directly to the left of a vertex at `x` on the sweep line.
    pub fn find_greatest_less_than(&mut self, x: Real) -> Option<EdgeIdx> {
        if self.root == INVALID {
            return None;
        }
        // Every key with this x compares >= (x, 0), so they are excluded.
        let probe = SweepKey::new(x, 0);
        self.root = self.splay(probe, self.root);
        let root = self.root;
        if self.nodes[root].key.order(&probe) == Ordering::Less {
            return Some(self.nodes[root].key.edge);
        }
        let mut node = self.nodes[root].left;
        if node == INVALID {
            return None;
        }
        while self.nodes[node].right != INVALID {
            node = self.nodes[node].right;
        }
        Some(self.nodes[node].key.edge)
    }

    /// Top-down splay: restructure the subtree rooted at `t` so that the last
    /// node on the search path for `key` becomes its root. Returns that root.
    fn splay(&mut self, key: SweepKey, mut t: NodeIdx) -> NodeIdx {
        let header = self.header;
        self.nodes[header].left = INVALID;
        self.nodes[header].right = INVALID;
        let mut left_max = header;
        let mut right_min = header;

        loop {
            match key.order(&self.nodes[t].key) {
                Ordering::Less => {
                    let mut l = self.nodes[t].left;
                    if l == INVALID {
                        break;
                    }
                    if key.order(&self.nodes[l].key) == Ordering::Less {
                        // rotate right
                        self.nodes[t].left = self.nodes[l].right;
                        self.nodes[l].right = t;
                        t = l;
                        l = self.nodes[t].left;
                        if l == INVALID {
                            break;
                        }
                    }
                    // link right
                    self.nodes[right_min].left = t;
                    right_min = t;
                    t = l;
                }
                Ordering::Greater => {
                    let mut r = self.nodes[t].right;
                    if r == INVALID {
                        break;
                    }
                    if key.order(&self.nodes[r].key) == Ordering::Greater {
                        // rotate left
                        self.nodes[t].right = self.nodes[r].left;
                        self.nodes[r].left = t;
                        t = r;
                        r = self.nodes[t].right;
                        if r == INVALID {
                            break;
                        }
                    }
                    // link left
                    self.nodes[left_max].right = t;
                    left_max = t;
                    t = r;
                }
                Ordering::Equal => break,
            }
        }

        // assemble
        self.nodes[left_max].right = self.nodes[t].left;
        self.nodes[right_min].left = self.nodes[t].right;
        self.nodes[t].left = self.nodes[header].right;
        self.nodes[t].right = self.nodes[header].left;
        t
    }
}

impl Default for OrderedEdgeSet {
    fn default() -> Self {
        Self::new()
    }
}

/// In-order iterator over an [`OrderedEdgeSet`].
pub struct InOrder<'a> {
    set: &'a OrderedEdgeSet,
    stack: Vec<NodeIdx>,
    cur: NodeIdx,
}

impl InOrder<'_> {
    fn next_node(&mut self) -> Option<NodeIdx> {
        while self.cur != INVALID {
            self.stack.push(self.cur);
            self.cur = self.set.nodes[self.cur].left;
        }
        let n = self.stack.pop()?;
        self.cur = self.set.nodes[n].right;
        Some(n)
    }
}

impl Iterator for InOrder<'_> {
    type Item = EdgeIdx;

    fn next(&mut self) -> Option<EdgeIdx> {
        let n = self.next_node()?;
        Some(self.set.nodes[n].key.edge)
    }
}
