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

//! # Exact Streaming Order Statistics
//!
//! Running median, sliding-window median and windowed trimmed mean over a stream of integers,
//! each answered in constant time after an `O(log n)` update.
//!
//! The library is layered bottom-up:
//!
//! * [`tier`]: sorted multisets ([`OrderedTier`](tier::OrderedTier)) and the three-way
//!   partition ([`TriPartition`](tier::TriPartition)) that keeps them ordered and sized;
//! * [`window`]: the FIFO that decides which value leaves a bounded window;
//! * [`engine`]: the public [`StatEngine`](engine::StatEngine) tying both together.
//!
//! Enable the `tracing` feature to receive structured events for tier moves and evictions.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod engine;
pub mod error;
pub mod tier;
pub mod window;

mod logging;
