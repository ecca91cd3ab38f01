#![cfg(test)]

// Property tests for DoubleHashSet kept inside the crate so they can read
// the slot array directly.

use crate::config::TableConfig;
use crate::key::ProbeKey;
use crate::slot::Slot;
use crate::table::DoubleHashSet;
use proptest::prelude::*;
use std::collections::HashSet;

// Pool-indexed operations so shrinking moves toward earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum OpI {
    Add(usize),
    Remove(usize),
    Contains(usize),
    ContainsForeign(String),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,6}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => idx.clone().prop_map(OpI::Add),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Contains),
            1 => "[A-Z]{1,4}".prop_map(OpI::ContainsForeign),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

/// Structural invariants that must hold between operations.
fn check_structure<T: ProbeKey>(sut: &DoubleHashSet<T>) -> Result<(), TestCaseError> {
    let occupied = sut.slots().iter().filter(|s| s.is_occupied()).count();
    let buried = sut.slots().iter().filter(|s| s.is_tombstone()).count();
    prop_assert_eq!(occupied, sut.len(), "live count matches occupied slots");
    prop_assert_eq!(buried, sut.tombstones(), "tombstone count matches");
    prop_assert!(sut.capacity().is_power_of_two());
    prop_assert!(sut.len() <= sut.capacity());
    if !sut.is_empty() {
        prop_assert!(
            sut.load_factor() < sut.config().max_load_factor,
            "load {} reached threshold",
            sut.load_factor()
        );
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashSet.
// - `add` succeeds iff the key is absent; `remove` succeeds iff present.
// - `contains` agrees with the model for pool keys and unrelated keys.
// - Capacity only grows and only by doubling.
// - Occupied/tombstone counts and the load bound hold after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: DoubleHashSet<String> = DoubleHashSet::new();
        let mut model: HashSet<String> = HashSet::new();

        for op in ops {
            let cap_before = sut.capacity();
            match op {
                OpI::Add(i) => {
                    let k = pool[i].clone();
                    let fresh = !model.contains(&k);
                    prop_assert_eq!(sut.add(k.clone()), fresh);
                    model.insert(k);
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.remove(k.as_str()), model.remove(k));
                }
                OpI::Contains(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.contains(k.as_str()), model.contains(k));
                    // repeated lookups without mutation agree
                    prop_assert_eq!(sut.contains(k.as_str()), model.contains(k));
                }
                OpI::ContainsForeign(s) => {
                    prop_assert!(!sut.contains(s.as_str()));
                }
            }

            let cap_after = sut.capacity();
            prop_assert!(cap_after == cap_before || cap_after == cap_before * 2);
            prop_assert_eq!(sut.len(), model.len());
            for k in &model {
                prop_assert!(sut.contains(k.as_str()), "lost {:?}", k);
            }
            check_structure(&sut)?;
        }
    }
}

// Key whose element view is empty: every key starts at slot 0 with step 1,
// so the table degrades to linear probing over one long chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Collide(String);

impl ProbeKey for Collide {
    type Element = u8;

    fn elements(&self) -> &[u8] {
        &[]
    }
}

// Property: the same state-machine invariants under total collision. This
// stresses tombstone reuse and chain walking past tombstones.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let mut sut: DoubleHashSet<Collide> = DoubleHashSet::new();
        let mut model: HashSet<Collide> = HashSet::new();

        for op in ops {
            match op {
                OpI::Add(i) => {
                    let k = Collide(pool[i].clone());
                    let fresh = !model.contains(&k);
                    prop_assert_eq!(sut.add(k.clone()), fresh);
                    model.insert(k);
                }
                OpI::Remove(i) => {
                    let k = Collide(pool[i].clone());
                    prop_assert_eq!(sut.remove(&k), model.remove(&k));
                }
                OpI::Contains(i) => {
                    let k = Collide(pool[i].clone());
                    prop_assert_eq!(sut.contains(&k), model.contains(&k));
                }
                OpI::ContainsForeign(s) => {
                    prop_assert!(!sut.contains(&Collide(s)));
                }
            }
            prop_assert_eq!(sut.len(), model.len());
            check_structure(&sut)?;
        }
    }
}

// Property: growth relocates every live key to a slot reachable by its own
// probe sequence for the new capacity, ahead of any empty slot.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_live_keys_sit_on_their_probe_chain(keys in proptest::collection::hash_set("[a-z]{1,8}", 1..200)) {
        let cfg = TableConfig::default();
        let mut sut: DoubleHashSet<String> = DoubleHashSet::new();
        for k in &keys {
            prop_assert!(sut.add(k.clone()));
        }
        for k in &keys {
            let seq = crate::hash::ProbeSeq::for_key(
                k.as_str(),
                sut.capacity(),
                cfg.primary_multiplier,
                cfg.step_multiplier,
            );
            let mut found = false;
            for idx in seq {
                match &sut.slots()[idx] {
                    Slot::Occupied(x) if x == k => { found = true; break; }
                    Slot::Empty => break,
                    _ => {}
                }
            }
            prop_assert!(found, "{:?} not reachable on its chain", k);
        }
    }
}
