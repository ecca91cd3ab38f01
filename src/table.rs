//! DoubleHashSet: the open-addressing table with tombstones and grow-rehash.

use crate::config::{ConfigError, TableConfig};
use crate::hash::ProbeSeq;
use crate::key::ProbeKey;
use crate::slot::Slot;
use core::borrow::Borrow;
use core::fmt;
use std::collections::TryReserveError;

/// Failure to allocate the doubled slot array during a grow-rehash.
#[derive(Debug, thiserror::Error)]
pub enum GrowError {
    #[error("cannot double a table of {0} slots without overflowing usize")]
    CapacityOverflow(usize),
    #[error("failed to allocate {capacity} slots")]
    Alloc {
        capacity: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Where a probe for an insertion ended up.
enum Vacancy {
    Duplicate,
    At(usize),
    Exhausted,
}

/// Open-addressing hash set probing with two key-derived hashes.
///
/// `add`, `remove` and `contains` report their outcome as a plain `bool`:
/// `false` means "did not apply" (duplicate insert, absent key), never an
/// error.
pub struct DoubleHashSet<T> {
    slots: Vec<Slot<T>>,
    live: usize,
    tombstones: usize,
    config: TableConfig,
}

impl<T: ProbeKey> DoubleHashSet<T> {
    pub fn new() -> Self {
        Self::from_valid_config(TableConfig::default())
    }

    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TableConfig) -> Self {
        let mut slots = Vec::with_capacity(config.initial_capacity);
        slots.resize_with(config.initial_capacity, Slot::default);
        Self {
            slots,
            live: 0,
            tombstones: 0,
            config,
        }
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.live
    }
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots; always a power of two.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots holding a tombstone. Reset to zero by every grow.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    pub fn load_factor(&self) -> f64 {
        self.live as f64 / self.capacity() as f64
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    fn probe<Q>(&self, key: &Q) -> ProbeSeq
    where
        Q: ?Sized + ProbeKey,
    {
        ProbeSeq::for_key(
            key,
            self.capacity(),
            self.config.primary_multiplier,
            self.config.step_multiplier,
        )
    }

    /// Slot index of the live entry equal to `key`. An empty slot ends the
    /// chain; tombstones are walked past.
    fn find_index<Q>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + ProbeKey,
    {
        for idx in self.probe(key) {
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied(k) if k.borrow() == key => return Some(idx),
                _ => {}
            }
        }
        None
    }

    /// Probe for an insertion point. The first tombstone on the chain wins
    /// over the empty slot that terminates it.
    fn locate_vacancy(&self, key: &T) -> Vacancy {
        let mut reuse = None;
        for idx in self.probe(key) {
            match &self.slots[idx] {
                Slot::Empty => return Vacancy::At(reuse.unwrap_or(idx)),
                Slot::Occupied(k) if k == key => return Vacancy::Duplicate,
                Slot::Occupied(_) => {}
                Slot::Tombstone => {
                    if reuse.is_none() {
                        reuse = Some(idx);
                    }
                }
            }
        }
        reuse.map_or(Vacancy::Exhausted, Vacancy::At)
    }

    /// True when inserting one more key would bring the load to the threshold.
    fn needs_grow(&self) -> bool {
        (self.live + 1) as f64 / self.capacity() as f64 >= self.config.max_load_factor
    }

    /// Insert `key`, growing first if the insert would reach the load
    /// threshold. Returns `Ok(false)` if an equal key is already live.
    ///
    /// The threshold check runs before the duplicate probe, so a rejected
    /// duplicate can still grow the table.
    pub fn try_add(&mut self, key: T) -> Result<bool, GrowError> {
        if self.needs_grow() {
            self.grow()?;
        }
        loop {
            match self.locate_vacancy(&key) {
                Vacancy::Duplicate => return Ok(false),
                Vacancy::At(idx) => {
                    if self.slots[idx].is_tombstone() {
                        self.tombstones -= 1;
                    }
                    self.slots[idx] = Slot::Occupied(key);
                    self.live += 1;
                    return Ok(true);
                }
                Vacancy::Exhausted => {
                    tracing::warn!(
                        capacity = self.capacity(),
                        live = self.live,
                        "probe exhausted without a vacancy, growing"
                    );
                    self.grow()?;
                }
            }
        }
    }

    /// Insert `key`; `false` if it was already present.
    ///
    /// # Panics
    /// If the doubled slot array cannot be allocated. Use [`try_add`] to
    /// observe that failure instead.
    ///
    /// [`try_add`]: DoubleHashSet::try_add
    pub fn add(&mut self, key: T) -> bool {
        match self.try_add(key) {
            Ok(inserted) => inserted,
            Err(e) => panic!("DoubleHashSet::add: {e}"),
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + ProbeKey,
    {
        self.find_index(key).is_some()
    }

    /// Remove `key`, leaving a tombstone in its slot; `false` if absent.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + ProbeKey,
    {
        self.take(key).is_some()
    }

    /// Remove `key` and hand back the stored key.
    pub fn take<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + ProbeKey,
    {
        let idx = self.find_index(key)?;
        let removed = self.slots[idx].bury()?;
        self.live -= 1;
        self.tombstones += 1;
        Some(removed)
    }

    /// Drop every key and tombstone. Capacity is kept.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.live = 0;
        self.tombstones = 0;
    }

    fn empty_slots(capacity: usize) -> Result<Vec<Slot<T>>, GrowError> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|source| GrowError::Alloc { capacity, source })?;
        slots.resize_with(capacity, Slot::default);
        Ok(slots)
    }

    /// Double the capacity and re-probe every live key against it.
    /// Tombstones are not carried over.
    fn grow(&mut self) -> Result<(), GrowError> {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity
            .checked_mul(2)
            .ok_or(GrowError::CapacityOverflow(old_capacity))?;
        let fresh = Self::empty_slots(new_capacity)?;
        let old = core::mem::replace(&mut self.slots, fresh);
        let dropped_tombstones = self.tombstones;
        self.tombstones = 0;

        // Capacity is a power of two and the odd step visits every slot; the
        // fresh array holds fewer live keys than slots, so `find` succeeds.
        for key in old.into_iter().filter_map(Slot::into_key) {
            let idx = self
                .probe(&key)
                .find(|&i| self.slots[i].is_empty())
                .expect("a full probe of the grown table always reaches an empty slot");
            self.slots[idx] = Slot::Occupied(key);
        }

        tracing::debug!(
            old_capacity,
            new_capacity,
            live = self.live,
            dropped_tombstones,
            "grew table"
        );
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }
}

impl<T: ProbeKey> Default for DoubleHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for DoubleHashSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleHashSet")
            .field("len", &self.live)
            .field("capacity", &self.slots.len())
            .field("tombstones", &self.tombstones)
            .finish()
    }
}

impl<T: ProbeKey> Extend<T> for DoubleHashSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<T: ProbeKey> FromIterator<T> for DoubleHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
