// Copyright 2025 Lars Brubaker
// License: MIT
//
// Binary min-heap driven by a caller-supplied `leq` ordering.
//
// The sweep fills the queue with every polygon vertex up front and heapifies
// once (`from_keys`); the monotone triangulator does the same for the
// vertices of one piece. "Minimum" is whatever `leq` puts first, which for
// both users is the topmost vertex in sweep order.
//
// nodes[1..=size] hold the heap; nodes[0] is unused so that the parent of
// slot i is i >> 1 and its children are 2i and 2i + 1.

/// Heap of copyable keys.
pub struct PriorityQ<K: Copy> {
    nodes: Vec<K>,
    size: usize,
    /// Comparison function: returns true iff key1 <= key2
    leq: fn(&K, &K) -> bool,
}

impl<K: Copy> PriorityQ<K> {
    /// Build a heap holding all of `keys` in O(n).
    pub fn from_keys(keys: &[K], leq: fn(&K, &K) -> bool) -> Self {
        let mut pq = PriorityQ {
            nodes: Vec::with_capacity(keys.len() + 1),
            size: keys.len(),
            leq,
        };
        if let Some(&first) = keys.first() {
            pq.nodes.push(first);
            pq.nodes.extend_from_slice(keys);
            for i in (1..=pq.size >> 1).rev() {
                pq.float_down(i);
            }
        }
        pq
    }

    fn float_down(&mut self, mut curr: usize) {
        let k_curr = self.nodes[curr];
        loop {
            let mut child = curr << 1;
            if child > self.size {
                break;
            }
            if child < self.size && (self.leq)(&self.nodes[child + 1], &self.nodes[child]) {
                child += 1;
            }
            if (self.leq)(&k_curr, &self.nodes[child]) {
                break;
            }
            self.nodes[curr] = self.nodes[child];
            curr = child;
        }
        self.nodes[curr] = k_curr;
    }

    /// Remove and return the minimum key.
    pub fn extract_min(&mut self) -> Option<K> {
        if self.size == 0 {
            return None;
        }
        let min_key = self.nodes[1];
        self.nodes[1] = self.nodes[self.size];
        self.size -= 1;
        if self.size > 0 {
            self.float_down(1);
        }
        Some(min_key)
    }

    /// Peek at the minimum key without extracting.
    pub fn minimum(&self) -> Option<K> {
        if self.size == 0 {
            None
        } else {
            Some(self.nodes[1])
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}
