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

//! Ordered tiers and the three-way partition built from them.
//!
//! An [`OrderedTier`] is a sorted multiset of [`Element`]s. A [`TriPartition`] owns three of
//! them and keeps the smallest `k` elements in `Low`, the largest `k` in `High` and the rest in
//! `Mid`, rebalancing after every insert and removal. With `k = 0` it degenerates to the classic
//! two-heap median split.

mod ordered;
mod partition;

pub use self::ordered::Element;
pub use self::ordered::OrderedTier;
pub use self::partition::Tier;
pub use self::partition::TriPartition;
