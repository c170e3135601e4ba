//! Fixed-capacity binary min-heap.
//!
//! The heap backs Huffman tree construction: it repeatedly yields the two
//! lowest-weight outstanding subtrees. It is array-backed and generic over
//! any `Ord` element; for tree nodes the ordering is by weight with an
//! insertion-sequence tie-break (see `tree::HeapEntry`).
//!
//! # Index arithmetic
//!
//! For a node at 0-based position `r`:
//! - parent: `(r - 1) / 2` (absent for the root)
//! - left child: `2r + 1` (present iff `< size`)
//! - right child: `2r + 2` (present iff `< size`)
//!
//! # Capacity
//!
//! Capacity is fixed at construction. Tree construction sizes the heap to
//! the alphabet size; since every merge pops two and pushes one, the size
//! never grows past the initial fill and `CapacityExceeded` cannot occur
//! there.

use crate::error::{HeapError, Result};

/// Array-backed binary min-heap with a fixed capacity.
///
/// # Invariants
/// - `elements.len() <= capacity`
/// - every element is `<=` both of its children (min-heap property)
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
    capacity: usize,
}

impl<T: Ord> MinHeap<T> {
    /// Create an empty heap that can hold at most `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Current number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True if the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Insert a value, percolating it toward the root. O(log n).
    ///
    /// # Errors
    /// `HeapError::CapacityExceeded` if the heap is at its fixed capacity.
    pub fn put(&mut self, value: T) -> Result<()> {
        if self.elements.len() == self.capacity {
            return Err(HeapError::CapacityExceeded {
                capacity: self.capacity,
            }
            .into());
        }

        self.elements.push(value);
        self.percolate_up(self.elements.len() - 1);
        Ok(())
    }

    /// Remove and return the minimum element. O(log n).
    ///
    /// Swaps the root with the last element, shrinks, then percolates the
    /// new root down.
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if no elements remain.
    pub fn pop(&mut self) -> Result<T> {
        if self.elements.is_empty() {
            return Err(HeapError::EmptyHeap.into());
        }

        let last = self.elements.len() - 1;
        self.elements.swap(0, last);
        let min = self.elements.pop().expect("heap verified non-empty");

        if !self.elements.is_empty() {
            self.percolate_down(0);
        }

        Ok(min)
    }

    /// True iff the node at `index` has no children within the logical size.
    ///
    /// # Errors
    /// `HeapError::InvalidIndex` if `index` is outside the logical size.
    pub fn is_leaf(&self, index: usize) -> Result<bool> {
        if index >= self.elements.len() {
            return Err(HeapError::InvalidIndex {
                index,
                size: self.elements.len(),
            }
            .into());
        }
        Ok(left_child(index) >= self.elements.len())
    }

    /// Swap with the parent while the parent is greater.
    fn percolate_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.elements[parent] <= self.elements[index] {
                break;
            }
            self.elements.swap(parent, index);
            index = parent;
        }
    }

    /// Swap with the smaller child while that child is smaller.
    fn percolate_down(&mut self, mut index: usize) {
        let size = self.elements.len();
        loop {
            let left = left_child(index);
            let right = left + 1;

            let mut smallest = index;
            if left < size && self.elements[left] < self.elements[smallest] {
                smallest = left;
            }
            if right < size && self.elements[right] < self.elements[smallest] {
                smallest = right;
            }

            if smallest == index {
                break;
            }
            self.elements.swap(index, smallest);
            index = smallest;
        }
    }
}

fn left_child(index: usize) -> usize {
    2 * index + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_put_pop_ordering() {
        let mut heap = MinHeap::with_capacity(8);
        for v in [5, 10, 2, 4] {
            heap.put(v).unwrap();
        }

        assert_eq!(heap.pop().unwrap(), 2);
        assert_eq!(heap.pop().unwrap(), 4);
        assert_eq!(heap.pop().unwrap(), 5);
        assert_eq!(heap.pop().unwrap(), 10);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_pop_empty() {
        let mut heap: MinHeap<u32> = MinHeap::with_capacity(4);
        assert!(matches!(
            heap.pop(),
            Err(Error::Heap(HeapError::EmptyHeap))
        ));
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut heap = MinHeap::with_capacity(2);
        heap.put(1).unwrap();
        heap.put(2).unwrap();
        assert!(matches!(
            heap.put(3),
            Err(Error::Heap(HeapError::CapacityExceeded { capacity: 2 }))
        ));
    }

    #[test]
    fn test_single_element() {
        let mut heap = MinHeap::with_capacity(1);
        heap.put(5).unwrap();
        assert_eq!(heap.pop().unwrap(), 5);
        assert!(heap.pop().is_err());
    }

    #[test]
    fn test_is_leaf() {
        let mut heap = MinHeap::with_capacity(8);
        for v in [3, 7, 9, 11] {
            heap.put(v).unwrap();
        }
        // Layout: index 0 has children 1,2; index 1 has child 3; 2,3 are leaves.
        assert!(!heap.is_leaf(0).unwrap());
        assert!(!heap.is_leaf(1).unwrap());
        assert!(heap.is_leaf(2).unwrap());
        assert!(heap.is_leaf(3).unwrap());
    }

    #[test]
    fn test_is_leaf_out_of_range() {
        let mut heap = MinHeap::with_capacity(4);
        heap.put(1).unwrap();
        assert!(matches!(
            heap.is_leaf(1),
            Err(Error::Heap(HeapError::InvalidIndex { index: 1, size: 1 }))
        ));
    }

    #[test]
    fn test_root_is_minimum_after_mixed_ops() {
        let mut heap = MinHeap::with_capacity(32);
        for v in [20, 3, 15, 8, 1, 12, 7] {
            heap.put(v).unwrap();
        }
        assert_eq!(heap.pop().unwrap(), 1);
        heap.put(2).unwrap();
        heap.put(30).unwrap();

        // Draining must yield a non-decreasing sequence.
        let mut prev = heap.pop().unwrap();
        while let Ok(next) = heap.pop() {
            assert!(prev <= next, "heap order violated: {} then {}", prev, next);
            prev = next;
        }
    }

    #[test]
    fn test_duplicate_values() {
        let mut heap = MinHeap::with_capacity(8);
        for v in [4, 4, 4, 1, 1] {
            heap.put(v).unwrap();
        }
        let drained: Vec<u32> = std::iter::from_fn(|| heap.pop().ok()).collect();
        assert_eq!(drained, vec![1, 1, 4, 4, 4]);
    }
}
