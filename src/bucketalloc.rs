// Copyright 2025 Lars Brubaker
// License: MIT
//
// Vec-backed arena with slot reuse. The ordered edge set allocates its
// splay-tree nodes here so that insert/delete churn during the sweep does not
// grow the node storage past the peak number of active edges.

use std::ops::{Index, IndexMut};

/// A simple arena allocator backed by a Vec.
/// Items are allocated by pushing to the vec and freed via a freelist.
#[derive(Debug, Clone)]
pub struct BucketAlloc<T> {
    items: Vec<Option<T>>,
    free_list: Vec<u32>,
}

impl<T> BucketAlloc<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Store `value`, returning its slot index.
    pub fn alloc(&mut self, value: T) -> u32 {
        if let Some(idx) = self.free_list.pop() {
            self.items[idx as usize] = Some(value);
            idx
        } else {
            let idx = self.items.len() as u32;
            self.items.push(Some(value));
            idx
        }
    }

    /// Free a slot, returning what it held.
    pub fn free(&mut self, idx: u32) -> Option<T> {
        let taken = self.items.get_mut(idx as usize)?.take();
        if taken.is_some() {
            self.free_list.push(idx);
        }
        taken
    }

    pub fn get(&self, idx: u32) -> Option<&T> {
        self.items.get(idx as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, idx: u32) -> Option<&mut T> {
        self.items.get_mut(idx as usize)?.as_mut()
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.items.len() - self.free_list.len()
    }
}

impl<T> Default for BucketAlloc<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<u32> for BucketAlloc<T> {
    type Output = T;

    fn index(&self, idx: u32) -> &T {
        match self.get(idx) {
            Some(item) => item,
            None => panic!("bucket slot {} is not allocated", idx),
        }
    }
}

impl<T> IndexMut<u32> for BucketAlloc<T> {
    fn index_mut(&mut self, idx: u32) -> &mut T {
        match self.get_mut(idx) {
            Some(item) => item,
            None => panic!("bucket slot {} is not allocated", idx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_and_free() {
        let mut ba: BucketAlloc<u32> = BucketAlloc::new();
        let a = ba.alloc(10);
        let b = ba.alloc(20);
        assert_ne!(a, b);
        assert_eq!(ba.free(a), Some(10));
        let c = ba.alloc(30);
        // c should reuse a's slot
        assert_eq!(c, a);
        assert_eq!(ba[c], 30);
        assert_eq!(ba.len(), 2);
    }

    #[test]
    fn double_free_is_ignored() {
        let mut ba: BucketAlloc<i32> = BucketAlloc::new();
        let idx = ba.alloc(1);
        assert_eq!(ba.free(idx), Some(1));
        assert_eq!(ba.free(idx), None);
        assert_eq!(ba.len(), 0);
        // The slot must be handed out once, not twice.
        let a = ba.alloc(2);
        let b = ba.alloc(3);
        assert_ne!(a, b);
    }

    #[test]
    fn get_after_free_returns_none() {
        let mut ba: BucketAlloc<i32> = BucketAlloc::new();
        let idx = ba.alloc(7);
        ba.free(idx);
        assert!(ba.get(idx).is_none());
    }

    #[test]
    fn index_mut_updates_in_place() {
        let mut ba: BucketAlloc<(u32, u32)> = BucketAlloc::new();
        let idx = ba.alloc((1, 2));
        ba[idx].1 = 5;
        assert_eq!(ba[idx], (1, 5));
    }
}
