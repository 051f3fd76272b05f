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

//! Exact streaming order statistics.
//!
//! A [`StatEngine`] keeps every retained value in a [`TriPartition`](crate::tier::TriPartition)
//! and answers two queries in constant time after each update:
//!
//! * [`median`](StatEngine::median), when built with a trim of zero;
//! * [`trimmed_mean`](StatEngine::trimmed_mean), the mean after dropping the `k` smallest and
//!   `k` largest values, when built with `k > 0`.
//!
//! An engine is either [`Mode::Unbounded`], retaining everything it has seen, or
//! [`Mode::Windowed`], retaining only the `m` most recent values. In windowed mode queries fail
//! with [`ErrorKind::InsufficientData`](crate::error::ErrorKind::InsufficientData) until the
//! window has filled once; afterwards every update evicts exactly one value and the engine stays
//! at `m` values.
//!
//! Updates cost `O(log n)` where `n` is the number of retained values. Results are exact, unlike
//! the sketches that trade accuracy for space: memory grows with `n` (or `m`).
//!
//! An engine is not synchronized; share it across threads behind a lock.
//!
//! # Examples
//!
//! ```
//! # use orderstats::engine::StatEngine;
//! let mut engine = StatEngine::windowed_trimmed(3, 1);
//! for value in [3, 1, 10, 5] {
//!     engine.add_element(value);
//! }
//! // window is [1, 10, 5]
//! assert_eq!(engine.trimmed_mean().unwrap(), 5.0);
//! ```

mod batch;
mod builder;
mod sketch;

pub use self::batch::running_medians;
pub use self::batch::sliding_window_medians;
pub use self::batch::windowed_trimmed_means;
pub use self::builder::StatEngineBuilder;
pub use self::sketch::Mode;
pub use self::sketch::StatEngine;
