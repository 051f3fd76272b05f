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

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::collections::btree_set;

use crate::error::Error;

/// A stream element: a value tagged with the sequence number it arrived with.
///
/// Elements order by value first and sequence number second, so equal values stay
/// individually addressable and the ordering is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element {
    id: u64,
    value: i64,
}

impl Element {
    /// Creates an element with the given sequence number and value.
    pub fn new(id: u64, value: i64) -> Self {
        Element { id, value }
    }

    /// Returns the sequence number of this element.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the value of this element.
    pub fn value(&self) -> i64 {
        self.value
    }
}

impl Ord for Element {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Element {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A sorted multiset of values with a running sum.
///
/// Insert and removal are `O(log s)`. Duplicated values are held as distinct [`Element`]s.
#[derive(Debug, Clone, Default)]
pub struct OrderedTier {
    items: BTreeSet<Element>,
    sum: i128,
}

impl OrderedTier {
    /// Creates an empty tier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an element.
    ///
    /// Returns false, leaving the tier untouched, if this exact element is already present.
    pub fn insert(&mut self, element: Element) -> bool {
        let inserted = self.items.insert(element);
        if inserted {
            self.sum += element.value as i128;
        }
        inserted
    }

    /// Removes exactly one element.
    ///
    /// # Errors
    ///
    /// If the element is not held by this tier, returns
    /// [`ErrorKind::InternalInvariantViolation`](crate::error::ErrorKind::InternalInvariantViolation).
    ///
    /// # Examples
    ///
    /// ```
    /// # use orderstats::tier::Element;
    /// # use orderstats::tier::OrderedTier;
    /// let mut tier = OrderedTier::new();
    /// tier.insert(Element::new(0, 5));
    /// tier.insert(Element::new(1, 5));
    /// tier.erase_one(&Element::new(0, 5)).unwrap();
    /// assert_eq!(tier.len(), 1);
    /// assert!(tier.erase_one(&Element::new(0, 5)).is_err());
    /// ```
    pub fn erase_one(&mut self, element: &Element) -> Result<(), Error> {
        if !self.items.remove(element) {
            return Err(Error::invariant_violation("element not found in tier")
                .with_context("id", element.id)
                .with_context("value", element.value));
        }
        self.sum -= element.value as i128;
        Ok(())
    }

    /// Returns the smallest element; `None` if the tier is empty.
    pub fn min(&self) -> Option<Element> {
        self.items.first().copied()
    }

    /// Returns the largest element; `None` if the tier is empty.
    pub fn max(&self) -> Option<Element> {
        self.items.last().copied()
    }

    pub(crate) fn pop_min(&mut self) -> Option<Element> {
        let element = self.items.pop_first()?;
        self.sum -= element.value as i128;
        Some(element)
    }

    pub(crate) fn pop_max(&mut self) -> Option<Element> {
        let element = self.items.pop_last()?;
        self.sum -= element.value as i128;
        Some(element)
    }

    /// Returns the number of elements in the tier.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the tier holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the exact sum of all values in the tier.
    pub fn sum(&self) -> i128 {
        self.sum
    }

    /// Returns true if this exact element is held by the tier.
    pub fn contains(&self, element: &Element) -> bool {
        self.items.contains(element)
    }

    /// Iterates over the elements in ascending order.
    pub fn iter(&self) -> btree_set::Iter<'_, Element> {
        self.items.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.sum = 0;
    }
}
