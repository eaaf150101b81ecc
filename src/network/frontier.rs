use crossbeam::queue::SegQueue;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A lock-free, unbounded queue of claimed words awaiting expansion.
///
/// Pushes never fail, so a claimed word can't be dropped. `len` and
/// `is_empty` are snapshots and only serve as hints.
pub struct Frontier<T = String> {
    queue: SegQueue<T>,
    size: AtomicUsize,
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> {
    pub fn new() -> Self {
        Self {
            queue: SegQueue::new(),
            size: AtomicUsize::new(0),
        }
    }

    pub fn push(&self, item: T) {
        // count first so a concurrent pop never drives size below zero
        self.size.fetch_add(1, Ordering::AcqRel);
        self.queue.push(item);
    }

    /// Non-blocking pop
    pub fn pop(&self) -> Option<T> {
        let item = self.queue.pop()?;
        self.size.fetch_sub(1, Ordering::AcqRel);
        Some(item)
    }

    /// Returns the current number of items in the queue
    pub fn len(&self) -> usize {
        self.size.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[test]
    fn test_basic_operations() {
        let frontier = Frontier::new();

        assert!(frontier.is_empty());
        assert_eq!(frontier.len(), 0);
        assert_eq!(frontier.pop(), None);

        frontier.push("cat".to_string());
        frontier.push("cot".to_string());
        assert_eq!(frontier.len(), 2);
        assert!(!frontier.is_empty());

        let mut popped = vec![frontier.pop().unwrap(), frontier.pop().unwrap()];
        popped.sort();
        assert_eq!(popped, vec!["cat", "cot"]);
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_concurrent_push_pop_loses_nothing() {
        let frontier = Arc::new(Frontier::new());
        let num_threads = 8;
        let items_per_thread = 500;
        let seen = Arc::new(Mutex::new(HashSet::new()));

        let mut handles = vec![];

        for i in 0..num_threads {
            let frontier = Arc::clone(&frontier);
            handles.push(thread::spawn(move || {
                for j in 0..items_per_thread {
                    frontier.push(i * items_per_thread + j);
                }
            }));
        }

        for _ in 0..num_threads {
            let frontier = Arc::clone(&frontier);
            let seen = Arc::clone(&seen);
            handles.push(thread::spawn(move || {
                let mut count = 0;
                while count < items_per_thread {
                    if let Some(item) = frontier.pop() {
                        // a popped item must never be delivered twice
                        assert!(seen.lock().unwrap().insert(item));
                        count += 1;
                    } else {
                        thread::yield_now();
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(frontier.is_empty());
        assert_eq!(frontier.len(), 0);
        assert_eq!(seen.lock().unwrap().len(), num_threads * items_per_thread);
    }
}
