//! Probe hashes (h1 start index, h2 step) and the probe sequence they drive.
//!
//! Both hashes fold the key's elements from last to first with
//! `acc = (m * acc + e) mod capacity`. They depend only on the key, the
//! multiplier and the capacity, so a grow-rehash recomputes them against
//! the new capacity and lands every live key on a reproducible chain.

use crate::key::{Element, ProbeKey};

#[inline]
fn fold<K>(key: &K, multiplier: u64, capacity: usize) -> u64
where
    K: ?Sized + ProbeKey,
{
    debug_assert!(capacity > 0);
    let m = capacity as u128;
    let mul = multiplier as u128;
    key.elements()
        .iter()
        .rev()
        .fold(0u128, |acc, &e| (mul * acc + e.to_u64() as u128) % m) as u64
}

/// h1: index of the first probe, in `0..capacity`.
#[inline]
pub fn primary_index<K>(key: &K, capacity: usize, multiplier: u64) -> usize
where
    K: ?Sized + ProbeKey,
{
    fold(key, multiplier, capacity) as usize
}

/// h2: distance between consecutive probes. Odd whenever `capacity` is an
/// even power of two, so a full-length probe visits every slot once.
#[inline]
pub fn probe_step<K>(key: &K, capacity: usize, multiplier: u64) -> usize
where
    K: ?Sized + ProbeKey,
{
    let acc = fold(key, multiplier, capacity) as u128;
    ((acc * 2 + 1) % capacity as u128) as usize
}

/// Indices `(start + i * step) mod capacity` for `i` in `0..capacity`.
#[derive(Debug, Clone)]
pub struct ProbeSeq {
    next: usize,
    step: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSeq {
    pub fn new(start: usize, step: usize, capacity: usize) -> Self {
        Self {
            next: start,
            step,
            capacity,
            remaining: capacity,
        }
    }

    /// Probe sequence of `key` for a table of `capacity` slots.
    pub fn for_key<K>(key: &K, capacity: usize, primary: u64, step: u64) -> Self
    where
        K: ?Sized + ProbeKey,
    {
        Self::new(
            primary_index(key, capacity, primary),
            probe_step(key, capacity, step),
            capacity,
        )
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let idx = self.next;
        // step < capacity, so the sum cannot exceed 2 * capacity
        self.next = (self.next + self.step) % self.capacity;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}
