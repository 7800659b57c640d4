//! The ring of past hidden states fed back into a recurrent network.

use num_traits::Float;

/// A fixed number of equally sized buffers stored in one arena. Pushing a buffer overwrites the
/// oldest one, so no allocation happens after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextRing<T> {
    // All buffers, back to back
    arena: Vec<T>,
    // The length of each buffer
    width: usize,
    // The number of buffers
    capacity: usize,
    // The slot holding the most recent buffer
    head: usize,
}

impl<T: Float> ContextRing<T> {
    /// Returns a ring with no buffers.
    pub fn empty(width: usize) -> Self {
        Self {
            arena: Vec::new(),
            width,
            capacity: 0,
            head: 0,
        }
    }

    /// Returns a ring of `capacity` buffers of length `width`, all filled with `value`.
    pub fn filled(capacity: usize, width: usize, value: T) -> Self {
        Self {
            arena: vec![value; capacity * width],
            width,
            capacity,
            head: 0,
        }
    }

    /// Returns a ring holding `buffers`, where index 0 is the most recent. Fails with the index of
    /// the first buffer that is not `width` long.
    pub fn from_buffers(width: usize, buffers: &[Vec<T>]) -> Result<Self, usize> {
        if let Some(index) = buffers.iter().position(|b| b.len() != width) {
            return Err(index);
        }

        Ok(Self {
            arena: buffers.iter().flatten().cloned().collect(),
            width,
            capacity: buffers.len(),
            head: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Returns the `i`th most recent buffer, or `None` if `i` is out of range.
    pub fn get(&self, i: usize) -> Option<&[T]> {
        if i >= self.capacity {
            return None;
        }

        let slot = (self.head + i) % self.capacity;
        Some(&self.arena[slot * self.width..(slot + 1) * self.width])
    }

    /// Iterates over the buffers from the most recent to the oldest.
    pub fn iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.capacity).filter_map(move |i| self.get(i))
    }

    /// Discards the oldest buffer and stores a copy of `values` as the most recent one. Does
    /// nothing if the ring has no buffers.
    pub fn push(&mut self, values: &[T]) {
        if self.capacity == 0 {
            return;
        }

        // The oldest slot sits just before the head
        self.head = (self.head + self.capacity - 1) % self.capacity;
        let width = self.width;
        let start = self.head * width;
        for (dst, &src) in self.arena[start..start + width].iter_mut().zip(values) {
            *dst = src;
        }
    }

    /// Returns the sum of the first `n` entries of every buffer.
    pub fn sum_prefix(&self, n: usize) -> T {
        let n = n.min(self.width);
        self.iter()
            .flat_map(|b| b[..n].iter())
            .fold(T::zero(), |sum, &v| sum + v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring() {
        let mut ring = ContextRing::filled(3, 2, 0.5);
        assert_eq!(3, ring.len());
        assert_eq!(3.0, ring.sum_prefix(2));
        assert_eq!(1.5, ring.sum_prefix(1));

        ring.push(&[1.0, 2.0]);
        assert_eq!(Some(&[1.0, 2.0][..]), ring.get(0));
        assert_eq!(Some(&[0.5, 0.5][..]), ring.get(1));

        ring.push(&[3.0, 4.0]);
        ring.push(&[5.0, 6.0]);
        let buffers = ring.iter().map(|b| b.to_vec()).collect::<Vec<_>>();
        assert_eq!(vec![vec![5.0, 6.0], vec![3.0, 4.0], vec![1.0, 2.0]], buffers);

        // The oldest buffer is discarded
        ring.push(&[7.0, 8.0]);
        assert_eq!(Some(&[3.0, 4.0][..]), ring.get(2));
        assert_eq!(None, ring.get(3));
        assert_eq!(15.0, ring.sum_prefix(1));
    }

    #[test]
    fn test_empty() {
        let mut ring = ContextRing::<f64>::empty(4);
        assert!(ring.is_empty());
        ring.push(&[1.0, 1.0, 1.0, 1.0]);
        assert!(ring.is_empty());
        assert_eq!(0.0, ring.sum_prefix(4));
        assert_eq!(None, ring.get(0));
    }

    #[test]
    fn test_from_buffers() {
        let ring = ContextRing::from_buffers(2, &[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(Some(&[1.0, 2.0][..]), ring.get(0));
        assert_eq!(Some(&[3.0, 4.0][..]), ring.get(1));

        assert_eq!(
            Err(1),
            ContextRing::from_buffers(2, &[vec![1.0, 2.0], vec![3.0]])
        );
    }
}
