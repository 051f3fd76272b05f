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

//! Insertion-ordered record of the element ids inside a bounded window.

use std::collections::VecDeque;

/// A FIFO of element ids holding at most `capacity` entries.
///
/// Eviction is always oldest-first.
#[derive(Debug, Clone)]
pub struct WindowManager {
    capacity: usize,
    ids: VecDeque<u64>,
}

impl WindowManager {
    /// Creates an empty window.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be positive");
        WindowManager {
            capacity,
            ids: VecDeque::new(),
        }
    }

    /// Records `id` as the newest entry.
    ///
    /// Returns the oldest id if the window now exceeds its capacity. The caller owns the
    /// removal of that element from wherever else it is stored.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orderstats::window::WindowManager;
    /// let mut window = WindowManager::new(2);
    /// assert_eq!(window.push(0), None);
    /// assert_eq!(window.push(1), None);
    /// assert_eq!(window.push(2), Some(0));
    /// assert_eq!(window.len(), 2);
    /// ```
    pub fn push(&mut self, id: u64) -> Option<u64> {
        self.ids.push_back(id);
        if self.ids.len() > self.capacity {
            self.ids.pop_front()
        } else {
            None
        }
    }

    /// Returns the oldest id in the window.
    pub fn oldest(&self) -> Option<u64> {
        self.ids.front().copied()
    }

    /// Returns the configured maximum number of ids.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of ids currently in the window.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the window holds no ids.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns true if the window holds exactly `capacity` ids.
    pub fn is_full(&self) -> bool {
        self.ids.len() == self.capacity
    }

    /// Forgets all ids.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
