// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Property-based tests for the tier invariants and query results.
//!
//! 1. Tiers stay ordered: Low <= Mid <= High.
//! 2. Tier sizes match their targets for the current element count.
//! 3. The middle tier sum is exact.
//! 4. Queries match a naive sort-and-compute reference.
//! 5. Inserting then removing an element restores the previous shape.
//! 6. Removing one of several equal values leaves the others.

use std::collections::VecDeque;

use orderstats::engine::Mode;
use orderstats::engine::StatEngine;
use orderstats::error::ErrorKind;
use orderstats::tier::Element;
use orderstats::tier::Tier;
use orderstats::tier::TriPartition;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn values_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop_oneof![
        // narrow range: plenty of duplicates
        prop::collection::vec(-8i64..8, 0..200),
        prop::collection::vec(any::<i64>(), 0..200),
    ]
}

fn config_strategy() -> impl Strategy<Value = (Mode, usize)> {
    prop_oneof![
        (0usize..5).prop_map(|k| (Mode::Unbounded, k)),
        (1usize..16)
            .prop_flat_map(|m| (Just(m), 0..m.div_ceil(2)))
            .prop_map(|(m, k)| (Mode::Windowed(m), k)),
    ]
}

fn check_partition(p: &TriPartition) -> Result<(), TestCaseError> {
    let n = p.len();
    let (low, mid, high) = (p.low().len(), p.mid().len(), p.high().len());
    prop_assert_eq!(low + mid + high, n);

    let k = p.k();
    if k == 0 {
        prop_assert_eq!(mid, 0);
        prop_assert_eq!(low, n.div_ceil(2));
        prop_assert_eq!(high, n / 2);
    } else {
        prop_assert_eq!(low, k.min(n));
        prop_assert_eq!(high, k.min(n - low));
    }

    let sorted = p.sorted_values();
    prop_assert!(sorted.is_sorted(), "tiers out of order: {:?}", sorted);

    let mid_sum: i128 = p.mid().iter().map(|e| e.value() as i128).sum();
    prop_assert_eq!(p.mid_sum(), mid_sum);

    for (tier, elements) in [(Tier::Low, p.low()), (Tier::Mid, p.mid()), (Tier::High, p.high())] {
        for e in elements.iter() {
            prop_assert_eq!(p.tier_of(e.id()), Some(tier));
        }
    }
    Ok(())
}

fn reference_median(sorted: &[i64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] as i128 + sorted[n / 2] as i128) as f64 / 2.0
    }
}

fn reference_trimmed(sorted: &[i64], k: usize) -> (f64, i64) {
    let middle = &sorted[k..sorted.len() - k];
    let sum = middle.iter().map(|&v| v as i128).sum::<i128>();
    let count = middle.len() as i128;
    (sum as f64 / count as f64, (sum / count) as i64)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Invariants hold after every mutation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn invariants_hold_after_every_update(
        (mode, k) in config_strategy(),
        values in values_strategy(),
    ) {
        let mut engine = StatEngine::new(mode, k);
        for value in values {
            engine.add_element(value);
            check_partition(engine.partition())?;
            if let Mode::Windowed(m) = mode {
                prop_assert!(engine.len() <= m);
            }
        }
    }
}

proptest! {
    #[test]
    fn invariants_hold_under_arbitrary_removals(
        k in 0usize..4,
        ops in prop::collection::vec((any::<bool>(), -10i64..10, any::<prop::sample::Index>()), 0..300),
    ) {
        let mut p = TriPartition::new(k);
        let mut live = Vec::new();
        for (id, (remove, value, index)) in ops.into_iter().enumerate() {
            if remove && !live.is_empty() {
                let victim = live.swap_remove(index.index(live.len()));
                p.remove_by_id(victim).unwrap();
            } else {
                p.insert(Element::new(id as u64, value));
                live.push(id as u64);
            }
            check_partition(&p)?;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Queries match a naive reference
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn queries_match_reference(
        (mode, k) in config_strategy(),
        values in values_strategy(),
    ) {
        let mut engine = StatEngine::new(mode, k);
        let mut retained = VecDeque::new();
        for value in values {
            engine.add_element(value);
            retained.push_back(value);
            if let Mode::Windowed(m) = mode {
                if retained.len() > m {
                    retained.pop_front();
                }
            }

            let mut sorted = retained.iter().copied().collect::<Vec<_>>();
            sorted.sort_unstable();
            let n = sorted.len();
            let full = match mode {
                Mode::Windowed(m) => n == m,
                Mode::Unbounded => true,
            };

            if k == 0 {
                if full {
                    prop_assert_eq!(engine.median().unwrap(), reference_median(&sorted));
                } else {
                    prop_assert_eq!(engine.median().unwrap_err().kind(), ErrorKind::InsufficientData);
                }
            } else if full && n > 2 * k {
                let (mean, truncated) = reference_trimmed(&sorted, k);
                prop_assert_eq!(engine.trimmed_mean().unwrap(), mean);
                prop_assert_eq!(engine.trimmed_mean_truncated().unwrap(), truncated);
            } else {
                prop_assert_eq!(
                    engine.trimmed_mean().unwrap_err().kind(),
                    ErrorKind::InsufficientData
                );
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Insert then remove restores the shape
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn insert_then_remove_round_trips(
        k in 0usize..4,
        values in values_strategy(),
        extra in -10i64..10,
    ) {
        let mut p = TriPartition::new(k);
        for (id, value) in values.into_iter().enumerate() {
            p.insert(Element::new(id as u64, value));
        }
        let shape = |p: &TriPartition| (p.low().len(), p.mid().len(), p.high().len(), p.mid_sum());
        let before = shape(&p);
        let sorted_before = p.sorted_values();

        let id = u64::MAX;
        p.insert(Element::new(id, extra));
        check_partition(&p)?;
        let removed = p.remove_by_id(id).unwrap();
        prop_assert_eq!(removed, Element::new(id, extra));
        check_partition(&p)?;

        prop_assert_eq!(shape(&p), before);
        prop_assert_eq!(p.sorted_values(), sorted_before);
        prop_assert_eq!(p.tier_of(id), None);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Duplicates are counted individually
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn removing_one_duplicate_keeps_the_rest(
        k in 0usize..4,
        values in prop::collection::vec(-5i64..5, 0..50),
        dup in -5i64..5,
        which in 0usize..3,
    ) {
        let mut p = TriPartition::new(k);
        let mut next_id = 0u64;
        let mut dup_ids = vec![];
        for value in values {
            p.insert(Element::new(next_id, value));
            next_id += 1;
            if dup_ids.len() < 3 {
                p.insert(Element::new(next_id, dup));
                dup_ids.push(next_id);
                next_id += 1;
            }
        }
        while dup_ids.len() < 3 {
            p.insert(Element::new(next_id, dup));
            dup_ids.push(next_id);
            next_id += 1;
        }

        let count = |p: &TriPartition| p.sorted_values().iter().filter(|&&v| v == dup).count();
        let before = count(&p);
        p.remove_by_id(dup_ids[which]).unwrap();
        check_partition(&p)?;
        prop_assert_eq!(count(&p), before - 1);
        for (i, &id) in dup_ids.iter().enumerate() {
            prop_assert_eq!(p.tier_of(id).is_some(), i != which);
        }
    }
}
