//! Fixed-capacity ring buffer of recent positions

use robosim_core::Point;

/// A fixed-capacity circular buffer
///
/// Once full, each push overwrites the oldest element.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    data: Vec<T>,
    capacity: usize,
    /// Next overwrite index once the buffer has wrapped
    head: usize,
}

impl<T> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.data.len() < self.capacity {
            self.data.push(item);
        } else {
            self.data[self.head] = item;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.data.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.head = 0;
    }

    /// Element at logical index (0 = oldest)
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.data.len() {
            return None;
        }
        self.data.get((self.head + index) % self.data.len())
    }

    pub fn newest(&self) -> Option<&T> {
        self.data.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        RingBufferIter {
            buffer: self,
            index: 0,
        }
    }
}

struct RingBufferIter<'a, T> {
    buffer: &'a RingBuffer<T>,
    index: usize,
}

impl<'a, T> Iterator for RingBufferIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }
}

impl RingBuffer<Point> {
    /// Mean of the stored positions
    pub fn centroid(&self) -> Option<Point> {
        if self.data.is_empty() {
            return None;
        }
        let sum = self
            .data
            .iter()
            .fold(Point::new(0.0, 0.0), |acc, p| acc + *p);
        Some(sum / self.data.len() as f64)
    }

    /// Full, and every position within `radius` of the centroid
    pub fn is_clustered(&self, radius: f64) -> bool {
        if !self.is_full() {
            return false;
        }
        match self.centroid() {
            Some(center) => self.data.iter().all(|p| p.distance(&center) <= radius),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_wrap() {
        let mut buffer = RingBuffer::new(3);
        assert!(buffer.is_empty());

        buffer.push(1);
        buffer.push(2);
        assert_eq!(buffer.len(), 2);
        assert!(!buffer.is_full());

        buffer.push(3);
        buffer.push(4);
        assert!(buffer.is_full());
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(buffer.get(0), Some(&2));
        assert_eq!(buffer.newest(), Some(&4));
        assert_eq!(buffer.get(3), None);

        buffer.push(5);
        buffer.push(6);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![4, 5, 6]);
    }

    #[test]
    fn test_clear() {
        let mut buffer = RingBuffer::new(2);
        buffer.push(1);
        buffer.push(2);
        buffer.push(3);
        buffer.clear();

        assert!(buffer.is_empty());
        buffer.push(7);
        assert_eq!(buffer.newest(), Some(&7));
    }

    #[test]
    fn test_clustered() {
        let mut history = RingBuffer::new(4);
        for p in [(1.0, 1.0), (1.5, 1.0), (1.0, 1.5), (1.5, 1.5)] {
            history.push(Point::from(p));
        }
        assert_eq!(history.centroid(), Some(Point::new(1.25, 1.25)));
        assert!(history.is_clustered(1.0));
        assert!(!history.is_clustered(0.2));

        history.push(Point::new(5.0, 5.0));
        assert!(!history.is_clustered(1.0));
    }

    #[test]
    fn test_partial_history_never_clustered() {
        let mut history = RingBuffer::new(10);
        for _ in 0..9 {
            history.push(Point::new(2.0, 2.0));
        }
        assert!(!history.is_clustered(1.0));

        history.push(Point::new(2.0, 2.0));
        assert!(history.is_clustered(1.0));
    }
}
