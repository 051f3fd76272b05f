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

use super::Mode;
use super::StatEngine;
use crate::error::Error;

/// Builder for creating [`StatEngine`] instances.
///
/// Starts from a retention mode, [`unbounded()`](Self::unbounded) or
/// [`windowed()`](Self::windowed), with a trim of zero.
#[derive(Debug, Clone)]
pub struct StatEngineBuilder {
    mode: Mode,
    k: usize,
}

impl StatEngineBuilder {
    /// Creates a builder for an engine that retains every value.
    pub fn unbounded() -> Self {
        StatEngineBuilder {
            mode: Mode::Unbounded,
            k: 0,
        }
    }

    /// Creates a builder for an engine that retains the `m` most recent values.
    pub fn windowed(m: usize) -> Self {
        StatEngineBuilder {
            mode: Mode::Windowed(m),
            k: 0,
        }
    }

    /// Sets the number of smallest and largest values excluded from the trimmed mean
    /// (default: 0).
    ///
    /// # Examples
    ///
    /// ```
    /// # use orderstats::engine::StatEngineBuilder;
    /// let engine = StatEngineBuilder::windowed(10).trim(3).build();
    /// assert_eq!(engine.k(), 3);
    /// ```
    pub fn trim(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Builds the engine.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`StatEngine::new`].
    pub fn build(self) -> StatEngine {
        StatEngine::new(self.mode, self.k)
    }

    /// Builds the engine.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`StatEngine::try_new`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use orderstats::engine::StatEngineBuilder;
    /// assert!(StatEngineBuilder::windowed(4).trim(2).try_build().is_err());
    /// assert!(StatEngineBuilder::windowed(5).trim(2).try_build().is_ok());
    /// ```
    pub fn try_build(self) -> Result<StatEngine, Error> {
        StatEngine::try_new(self.mode, self.k)
    }
}
