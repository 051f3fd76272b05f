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

use std::collections::HashMap;

use crate::error::Error;
use crate::logging::trace;
use crate::tier::Element;
use crate::tier::OrderedTier;

/// One of the three ordered partitions of a [`TriPartition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// The smallest elements.
    Low,
    /// The elements between the trimmed ends.
    Mid,
    /// The largest elements.
    High,
}

/// A multiset split into three ordered tiers, `Low`, `Mid` and `High`.
///
/// After every mutation:
///
/// * every element of `Low` is at most every element of `Mid`, which is at most every
///   element of `High`;
/// * with a trim of `k > 0`, `|Low| = min(k, n)`, `|High| = min(k, n - |Low|)` and `Mid`
///   holds the rest;
/// * with `k = 0`, `Mid` is empty, `|Low| = ceil(n / 2)` and `|High| = floor(n / 2)`.
///
/// Every element is tracked by id, so duplicated values can be removed individually.
#[derive(Debug, Clone)]
pub struct TriPartition {
    k: usize,
    low: OrderedTier,
    mid: OrderedTier,
    high: OrderedTier,
    // id -> (tier holding it, value)
    index: HashMap<u64, (Tier, i64)>,
}

impl TriPartition {
    /// Creates an empty partition with trim parameter `k`.
    pub fn new(k: usize) -> Self {
        TriPartition {
            k,
            low: OrderedTier::new(),
            mid: OrderedTier::new(),
            high: OrderedTier::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the trim parameter.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the total number of elements.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the partition holds no elements.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the tier of the smallest elements.
    pub fn low(&self) -> &OrderedTier {
        &self.low
    }

    /// Returns the middle tier.
    pub fn mid(&self) -> &OrderedTier {
        &self.mid
    }

    /// Returns the tier of the largest elements.
    pub fn high(&self) -> &OrderedTier {
        &self.high
    }

    /// Returns the exact sum of the middle tier.
    pub fn mid_sum(&self) -> i128 {
        self.mid.sum()
    }

    /// Returns the tier currently holding the element with the given id.
    pub fn tier_of(&self, id: u64) -> Option<Tier> {
        self.index.get(&id).map(|&(tier, _)| tier)
    }

    /// Returns all values in ascending order.
    pub fn sorted_values(&self) -> Vec<i64> {
        self.low
            .iter()
            .chain(self.mid.iter())
            .chain(self.high.iter())
            .map(Element::value)
            .collect()
    }

    /// Inserts an element and restores the tier invariants.
    ///
    /// # Panics
    ///
    /// Panics if an element with the same id is already held.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orderstats::tier::Element;
    /// # use orderstats::tier::TriPartition;
    /// let mut partition = TriPartition::new(1);
    /// for (id, value) in [3, 1, 10].into_iter().enumerate() {
    ///     partition.insert(Element::new(id as u64, value));
    /// }
    /// assert_eq!(partition.mid_sum(), 3);
    /// assert_eq!(partition.sorted_values(), vec![1, 3, 10]);
    /// ```
    pub fn insert(&mut self, element: Element) {
        assert!(
            !self.index.contains_key(&element.id()),
            "element id {} is already held",
            element.id()
        );

        let value = element.value();
        let tier = match (self.low.max(), self.high.min()) {
            (None, _) => Tier::Low,
            (Some(low_max), _) if value <= low_max.value() => Tier::Low,
            (_, None) => Tier::High,
            (_, Some(high_min)) if value >= high_min.value() => Tier::High,
            _ => Tier::Mid,
        };
        self.put(tier, element);
        self.rebalance();
    }

    /// Removes the element with the given id and restores the tier invariants.
    ///
    /// # Errors
    ///
    /// If no element with this id is held, returns
    /// [`ErrorKind::InternalInvariantViolation`](crate::error::ErrorKind::InternalInvariantViolation).
    pub fn remove_by_id(&mut self, id: u64) -> Result<Element, Error> {
        let Some(&(tier, value)) = self.index.get(&id) else {
            return Err(
                Error::invariant_violation("id is not held by the partition").with_context("id", id)
            );
        };
        let element = Element::new(id, value);
        self.tier_mut(tier)
            .erase_one(&element)
            .map_err(|err| err.with_context("tier", format!("{tier:?}")))?;
        self.index.remove(&id);
        self.rebalance();
        Ok(element)
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.low.clear();
        self.mid.clear();
        self.high.clear();
        self.index.clear();
    }

    // target sizes of (Low, High) for the current element count
    fn targets(&self) -> (usize, usize) {
        let n = self.len();
        if self.k == 0 {
            (n.div_ceil(2), n / 2)
        } else {
            let low = self.k.min(n);
            (low, self.k.min(n - low))
        }
    }

    fn rebalance(&mut self) {
        let (low_target, high_target) = self.targets();

        // After the first two loops Low and High are at most their targets, so Mid always
        // holds enough elements to top them up.
        while self.low.len() > low_target {
            self.shift(Tier::Low, Tier::Mid);
        }
        while self.high.len() > high_target {
            self.shift(Tier::High, Tier::Mid);
        }
        while self.low.len() < low_target {
            self.shift(Tier::Mid, Tier::Low);
        }
        while self.high.len() < high_target {
            self.shift(Tier::Mid, Tier::High);
        }

        // Each swap removes at least one inversion from the concatenation Low, Mid, High.
        while self.swap_across(Tier::Low, Tier::Mid)
            || self.swap_across(Tier::Mid, Tier::High)
            || self.swap_across(Tier::Low, Tier::High)
        {}
    }

    // moves the element nearest to `to` out of `from`
    fn shift(&mut self, from: Tier, to: Tier) {
        let source = self.tier_mut(from);
        let element = if from < to {
            source.pop_max()
        } else {
            source.pop_min()
        };
        let element = element.expect("tier sizes guarantee a donor element");
        trace!(id = element.id(), ?from, ?to, "shift");
        self.put(to, element);
    }

    // swaps max(lower) and min(upper) if they are out of order
    fn swap_across(&mut self, lower: Tier, upper: Tier) -> bool {
        let (Some(a), Some(b)) = (self.tier(lower).max(), self.tier(upper).min()) else {
            return false;
        };
        if a <= b {
            return false;
        }
        self.tier_mut(lower).pop_max();
        self.tier_mut(upper).pop_min();
        trace!(down = b.id(), up = a.id(), ?lower, ?upper, "swap");
        self.put(lower, b);
        self.put(upper, a);
        true
    }

    fn put(&mut self, tier: Tier, element: Element) {
        self.tier_mut(tier).insert(element);
        self.index.insert(element.id(), (tier, element.value()));
    }

    fn tier(&self, tier: Tier) -> &OrderedTier {
        match tier {
            Tier::Low => &self.low,
            Tier::Mid => &self.mid,
            Tier::High => &self.high,
        }
    }

    fn tier_mut(&mut self, tier: Tier) -> &mut OrderedTier {
        match tier {
            Tier::Low => &mut self.low,
            Tier::Mid => &mut self.mid,
            Tier::High => &mut self.high,
        }
    }
}
