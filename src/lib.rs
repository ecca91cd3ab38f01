//! dh-hashset: an open-addressing hash set probing with two key-derived
//! hashes, deleting through tombstones and growing by doubling.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the table engine small enough that its slot lifecycle,
//!   probe termination and growth rules can be checked by reading it.
//! - Layers:
//!   - `key`: the capability a key must offer (`ProbeKey`): an ordered,
//!     finite slice of integral elements plus equality.
//!   - `hash`: h1 (start index) and h2 (odd step) folded from those
//!     elements, and the `ProbeSeq` they drive.
//!   - `slot`: the tri-state `Slot` cell (Empty / Occupied / Tombstone).
//!   - `table`: `DoubleHashSet`, owning the slot array and the add /
//!     remove / contains / grow algorithms.
//!   - `command`: the `+key` / `?key` / `-key` driver used by the `dhset`
//!     binary.
//!
//! Constraints
//! - Single-threaded and synchronous; callers serialize access.
//! - Capacity is always a power of two, so every odd step is coprime with
//!   it and a probe of `capacity` steps visits each slot exactly once.
//! - `add` grows before inserting when `(len + 1) / capacity` would reach
//!   the configured load factor (0.75 by default). Growth never shrinks.
//! - Outcomes are booleans: `false` means the operation did not apply.
//!   Only allocation failure during growth is an error (`try_add`).
//!
//! Probing rules
//! - Lookups stop at the first Empty slot or after `capacity` probes and
//!   walk past tombstones.
//! - Inserts remember the first tombstone on the chain and reuse it in
//!   preference to the terminating Empty slot; a live equal key rejects
//!   the insert.
//! - Growth re-probes every live key against the doubled capacity and
//!   drops all tombstones. It is the only way tombstone space is
//!   reclaimed besides reuse by a later insert.
//!
//! Hash fold
//! - `acc = (m * acc + e) mod capacity` over the key's elements from the
//!   last to the first, with `m = 11` for h1 and `m = 13` for h2; h2 then
//!   maps `acc` to `(2 * acc + 1) mod capacity`. Both depend only on the
//!   key and the capacity, which is what lets growth recompute them.
//!
//! Notes and non-goals
//! - No iteration, no shrinking, no concurrent access.
//! - Tombstones drop their key when created; `take` hands the key back.

pub mod command;
pub mod config;
pub mod hash;
pub mod key;
pub mod slot;
mod table;
mod table_proptest;

// Public surface
pub use config::{ConfigError, TableConfig};
pub use key::{Element, ProbeKey};
pub use table::{DoubleHashSet, GrowError};
