//! Bounded history buffer
//!
//! Keeps the last N samples in chronological order. Pushing past capacity
//! evicts the oldest sample first.

use std::collections::VecDeque;

use crate::error::TrackingError;

/// Fixed-capacity FIFO of recent samples
#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    /// Oldest sample at the front, newest at the back
    samples: VecDeque<T>,
    capacity: usize,
}

impl<T: Copy> BoundedHistory<T> {
    /// Create an empty buffer. Capacity must be at least 1.
    pub fn new(capacity: usize) -> Result<Self, TrackingError> {
        if capacity == 0 {
            return Err(TrackingError::InvalidConfig(
                "history capacity must be at least 1".into(),
            ));
        }
        Ok(Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append a sample, evicting the oldest one when full
    pub fn push(&mut self, value: T) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Mean of the buffered samples.
    ///
    /// `combine` sums two samples, `scale` divides the running sum by the
    /// sample count.
    pub fn average<C, S>(&self, combine: C, scale: S) -> Result<T, TrackingError>
    where
        C: Fn(T, T) -> T,
        S: Fn(T, usize) -> T,
    {
        let mut iter = self.samples.iter().copied();
        let first = iter.next().ok_or(TrackingError::EmptyBuffer)?;
        let sum = iter.fold(first, combine);
        Ok(scale(sum, self.samples.len()))
    }

    /// Drop every sample, keeping the capacity
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest-first iteration
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.samples.iter()
    }

    pub fn newest(&self) -> Option<&T> {
        self.samples.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean(history: &BoundedHistory<f32>) -> Result<f32, TrackingError> {
        history.average(|a, b| a + b, |sum, n| sum / n as f32)
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            BoundedHistory::<f32>::new(0),
            Err(TrackingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut history = BoundedHistory::new(3).unwrap();
        for v in 1..=5 {
            history.push(v as f32);
        }
        assert_eq!(history.len(), 3);
        let kept: Vec<f32> = history.iter().copied().collect();
        assert_eq!(kept, vec![3.0, 4.0, 5.0]);
        assert_eq!(history.newest(), Some(&5.0));
    }

    #[test]
    fn test_length_never_exceeds_capacity() {
        let mut history = BoundedHistory::new(4).unwrap();
        for i in 0..100 {
            history.push(i as f32);
            assert!(history.len() <= history.capacity());
        }
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn test_average_of_partial_buffer() {
        let mut history = BoundedHistory::new(4).unwrap();
        history.push(1.0);
        history.push(2.0);
        assert!((mean(&history).unwrap() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_average_only_counts_retained_samples() {
        let mut history = BoundedHistory::new(2).unwrap();
        history.push(100.0);
        history.push(2.0);
        history.push(4.0);
        assert!((mean(&history).unwrap() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_average_fails() {
        let history = BoundedHistory::<f32>::new(2).unwrap();
        assert_eq!(mean(&history), Err(TrackingError::EmptyBuffer));
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut history = BoundedHistory::new(3).unwrap();
        history.push(1.0);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 3);
        assert_eq!(mean(&history), Err(TrackingError::EmptyBuffer));
    }
}
