use std::collections::VecDeque;

/// Fixed-capacity FIFO that evicts from the front once full.
///
/// `len() <= capacity()` holds after every operation.
#[derive(Clone, Debug)]
pub struct BoundedDeque<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedDeque<T> {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "BoundedDeque capacity must be > 0");
        Self {
            items: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append `item` and return whatever had to be evicted (oldest first).
    pub fn push_back(&mut self, item: T) -> Vec<T> {
        self.items.push_back(item);
        let overflow = self.items.len().saturating_sub(self.capacity);
        self.items.drain(..overflow).collect()
    }

    pub fn back(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a, T> IntoIterator for &'a BoundedDeque<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/deque.rs"]
mod tests;
