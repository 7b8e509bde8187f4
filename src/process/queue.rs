/*!
 * Ready Queue
 * Bounded FIFO of process ids awaiting dispatch
 *
 * Insertion order is preserved except where a policy explicitly reorders
 * the queue via `promote_to_front` before dequeuing. The queue holds no
 * lock; every operation runs inside the engine's critical section.
 */

use crate::core::types::Pid;
use log::warn;
use std::collections::VecDeque;

/// FIFO of ready process ids, capacity-bounded
#[derive(Debug, Clone)]
pub struct ReadyQueue {
    entries: VecDeque<Pid>,
    capacity: usize,
}

impl ReadyQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append at the tail. Overflow and duplicates are logged and dropped;
    /// callers must not assume success.
    pub fn enqueue(&mut self, pid: Pid) {
        if self.entries.len() >= self.capacity {
            warn!("ready queue full (capacity {}), dropping pid {}", self.capacity, pid);
            return;
        }
        if self.entries.contains(&pid) {
            warn!("pid {} already queued, dropping duplicate", pid);
            return;
        }
        self.entries.push_back(pid);
    }

    /// Remove and return the head, if any.
    pub fn dequeue(&mut self) -> Option<Pid> {
        self.entries.pop_front()
    }

    /// Return the head without removing it.
    pub fn peek(&self) -> Option<Pid> {
        self.entries.front().copied()
    }

    /// Move the entry with the minimum key to the head, preserving the
    /// relative order of the rest. Ties break toward the earliest queue
    /// position. Maximum-keyed selection is expressed with `cmp::Reverse`.
    pub fn promote_to_front<K: Ord>(&mut self, mut key: impl FnMut(Pid) -> K) {
        let Some(best) = self
            .entries
            .iter()
            .enumerate()
            .min_by_key(|(_, &pid)| key(pid))
            .map(|(pos, _)| pos)
        else {
            return;
        };
        if best != 0 {
            // remove + push_front keeps the remaining entries in order
            if let Some(pid) = self.entries.remove(best) {
                self.entries.push_front(pid);
            }
        }
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.entries.contains(&pid)
    }

    pub fn iter(&self) -> impl Iterator<Item = Pid> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Reverse;

    #[test]
    fn test_fifo_order() {
        let mut q = ReadyQueue::new(4);
        q.enqueue(1);
        q.enqueue(2);
        q.enqueue(3);
        assert_eq!(q.peek(), Some(1));
        assert_eq!(q.dequeue(), Some(1));
        assert_eq!(q.dequeue(), Some(2));
        assert_eq!(q.dequeue(), Some(3));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn test_capacity_drops_overflow() {
        let mut q = ReadyQueue::new(2);
        q.enqueue(1);
        q.enqueue(2);
        q.enqueue(3); // dropped
        assert_eq!(q.len(), 2);
        assert!(!q.contains(3));
    }

    #[test]
    fn test_duplicate_dropped() {
        let mut q = ReadyQueue::new(4);
        q.enqueue(7);
        q.enqueue(7);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_promote_to_front_preserves_rest() {
        let mut q = ReadyQueue::new(8);
        for pid in [1, 2, 3, 4] {
            q.enqueue(pid);
        }
        // key favors pid 3
        q.promote_to_front(|pid| if pid == 3 { 0 } else { 1 });
        let order: Vec<Pid> = q.iter().collect();
        assert_eq!(order, vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_promote_tie_keeps_earliest() {
        let mut q = ReadyQueue::new(8);
        for pid in [5, 6, 7] {
            q.enqueue(pid);
        }
        // all keys equal: head must not change
        q.promote_to_front(|_| 0);
        assert_eq!(q.peek(), Some(5));
    }

    #[test]
    fn test_promote_max_via_reverse() {
        let mut q = ReadyQueue::new(8);
        for pid in [1, 2, 3] {
            q.enqueue(pid);
        }
        q.promote_to_front(|pid| Reverse(pid));
        assert_eq!(q.peek(), Some(3));
    }

    #[test]
    fn test_promote_on_empty_is_noop() {
        let mut q = ReadyQueue::new(2);
        q.promote_to_front(|pid| pid);
        assert!(q.is_empty());
    }
}
