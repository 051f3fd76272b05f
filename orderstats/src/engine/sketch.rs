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

use crate::error::Error;
use crate::error::ErrorKind;
use crate::logging::debug;
use crate::logging::trace;
use crate::tier::Element;
use crate::tier::TriPartition;
use crate::window::WindowManager;

/// Retention policy of a [`StatEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Every element ever added is retained.
    Unbounded,
    /// Only the `m` most recent elements are retained.
    Windowed(usize),
}

/// Exact order statistics over a stream of `i64` values.
///
/// See the [module level documentation](super) for more.
#[derive(Debug, Clone)]
pub struct StatEngine {
    mode: Mode,
    partition: TriPartition,
    window: Option<WindowManager>,
    next_id: u64,
}

impl StatEngine {
    /// Creates an engine with the given retention mode and trim parameter `k`.
    ///
    /// The fallible version of this method is [`StatEngine::try_new`].
    ///
    /// # Panics
    ///
    /// Panics if the mode is windowed and `2k >= m`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orderstats::engine::Mode;
    /// # use orderstats::engine::StatEngine;
    /// let engine = StatEngine::new(Mode::Windowed(5), 2);
    /// assert_eq!(engine.k(), 2);
    /// assert_eq!(engine.window_size(), Some(5));
    /// ```
    pub fn new(mode: Mode, k: usize) -> Self {
        Self::try_new(mode, k).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Creates an engine with the given retention mode and trim parameter `k`.
    ///
    /// The panicking version of this method is [`StatEngine::new`].
    ///
    /// # Errors
    ///
    /// If the mode is windowed and `m == 0` or `2k >= m`, returns
    /// [`ErrorKind::InvalidConfig`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use orderstats::engine::Mode;
    /// # use orderstats::engine::StatEngine;
    /// # use orderstats::error::ErrorKind;
    /// let err = StatEngine::try_new(Mode::Windowed(4), 2).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    /// ```
    pub fn try_new(mode: Mode, k: usize) -> Result<Self, Error> {
        let window = match mode {
            Mode::Unbounded => None,
            Mode::Windowed(0) => {
                return Err(Error::invalid_config("window size must be positive"));
            }
            Mode::Windowed(m) => {
                if k.checked_mul(2).is_none_or(|trimmed| trimmed >= m) {
                    return Err(Error::invalid_config("2k must be less than the window size")
                        .with_context("k", k)
                        .with_context("window_size", m));
                }
                Some(WindowManager::new(m))
            }
        };

        debug!(?mode, k, "created stat engine");
        Ok(StatEngine {
            mode,
            partition: TriPartition::new(k),
            window,
            next_id: 0,
        })
    }

    /// Creates an unbounded engine that tracks the running median.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orderstats::engine::StatEngine;
    /// let mut engine = StatEngine::running_median();
    /// engine.add_element(3);
    /// engine.add_element(4);
    /// assert_eq!(engine.median().unwrap(), 3.5);
    /// ```
    pub fn running_median() -> Self {
        Self::new(Mode::Unbounded, 0)
    }

    /// Creates an engine that tracks the median of the `m` most recent values.
    ///
    /// # Panics
    ///
    /// Panics if `m` is zero.
    pub fn sliding_median(m: usize) -> Self {
        Self::new(Mode::Windowed(m), 0)
    }

    /// Creates an engine that tracks the mean of the `m` most recent values after dropping
    /// the `k` smallest and `k` largest of them.
    ///
    /// # Panics
    ///
    /// Panics if `2k >= m`.
    pub fn windowed_trimmed(m: usize, k: usize) -> Self {
        Self::new(Mode::Windowed(m), k)
    }

    /// Adds a value to the stream.
    ///
    /// In windowed mode, once more than `m` values are held the oldest one is evicted.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orderstats::engine::StatEngine;
    /// let mut engine = StatEngine::sliding_median(2);
    /// for value in [10, 20, 30] {
    ///     engine.add_element(value);
    /// }
    /// assert_eq!(engine.len(), 2);
    /// assert_eq!(engine.median().unwrap(), 25.0);
    /// ```
    pub fn add_element(&mut self, value: i64) {
        let id = self.next_id;
        self.next_id += 1;
        self.partition.insert(Element::new(id, value));

        if let Some(window) = &mut self.window {
            if let Some(evicted) = window.push(id) {
                let element = self
                    .partition
                    .remove_by_id(evicted)
                    .expect("window ids are always held by the partition");
                debug_assert_eq!(element.id(), evicted);
                trace!(id = element.id(), value = element.value(), "evict");
            }
        }
    }

    /// Returns the median of the current values.
    ///
    /// With an even number of values this is the mean of the two middle ones.
    ///
    /// # Errors
    ///
    /// * [`ErrorKind::InvalidConfig`] if the engine was built with `k > 0`.
    /// * [`ErrorKind::InsufficientData`] if no value is held, or the window is not yet full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orderstats::engine::StatEngine;
    /// # use orderstats::error::ErrorKind;
    /// let mut engine = StatEngine::running_median();
    /// assert_eq!(engine.median().unwrap_err().kind(), ErrorKind::InsufficientData);
    /// engine.add_element(7);
    /// assert_eq!(engine.median().unwrap(), 7.0);
    /// ```
    pub fn median(&self) -> Result<f64, Error> {
        let k = self.partition.k();
        if k > 0 {
            return Err(Error::invalid_config("median requires a trim of zero").with_context("k", k));
        }
        self.check_window()?;

        let n = self.len();
        let (Some(low_max), high_min) = (self.partition.low().max(), self.partition.high().min())
        else {
            return Err(Error::insufficient_data(n, 1));
        };
        match high_min {
            Some(high_min) if n % 2 == 0 => {
                let total = low_max.value() as i128 + high_min.value() as i128;
                Ok(total as f64 / 2.0)
            }
            _ => Ok(low_max.value() as f64),
        }
    }

    /// Returns the mean of the current values after dropping the `k` smallest and the `k`
    /// largest of them.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InsufficientData`] if `k == 0`, if fewer than `2k + 1` values are
    /// held, or if the window is not yet full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orderstats::engine::Mode;
    /// # use orderstats::engine::StatEngine;
    /// let mut engine = StatEngine::new(Mode::Unbounded, 1);
    /// for value in [1, 2, 4, 100] {
    ///     engine.add_element(value);
    /// }
    /// assert_eq!(engine.trimmed_mean().unwrap(), 3.0);
    /// ```
    pub fn trimmed_mean(&self) -> Result<f64, Error> {
        let (sum, count) = self.mid_aggregate()?;
        Ok(sum as f64 / count as f64)
    }

    /// Same as [`StatEngine::trimmed_mean`], with the mean truncated toward zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orderstats::engine::StatEngine;
    /// let mut engine = StatEngine::windowed_trimmed(4, 1);
    /// for value in [1, 2, 3, 9] {
    ///     engine.add_element(value);
    /// }
    /// assert_eq!(engine.trimmed_mean().unwrap(), 2.5);
    /// assert_eq!(engine.trimmed_mean_truncated().unwrap(), 2);
    /// ```
    pub fn trimmed_mean_truncated(&self) -> Result<i64, Error> {
        let (sum, count) = self.mid_aggregate()?;
        // the mean of i64 values always fits in i64
        Ok((sum / count as i128) as i64)
    }

    /// Returns the number of values currently held.
    pub fn len(&self) -> usize {
        self.partition.len()
    }

    /// Returns true if no value is held.
    pub fn is_empty(&self) -> bool {
        self.partition.is_empty()
    }

    /// Returns the trim parameter.
    pub fn k(&self) -> usize {
        self.partition.k()
    }

    /// Returns the retention mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the window size; `None` in unbounded mode.
    pub fn window_size(&self) -> Option<usize> {
        self.window.as_ref().map(WindowManager::capacity)
    }

    /// Returns the number of values ever added since construction or the last reset.
    pub fn total_observed(&self) -> u64 {
        self.next_id
    }

    /// Returns the smallest value held; `None` if the engine is empty.
    pub fn min_value(&self) -> Option<i64> {
        self.partition.low().min().map(|e| e.value())
    }

    /// Returns the largest value held; `None` if the engine is empty.
    pub fn max_value(&self) -> Option<i64> {
        let partition = &self.partition;
        partition
            .high()
            .max()
            .or_else(|| partition.mid().max())
            .or_else(|| partition.low().max())
            .map(|e| e.value())
    }

    /// Returns the underlying partition.
    pub fn partition(&self) -> &TriPartition {
        &self.partition
    }

    /// Drops all values, keeping the configuration.
    pub fn reset(&mut self) {
        self.partition.clear();
        if let Some(window) = &mut self.window {
            window.clear();
        }
        self.next_id = 0;
    }

    fn check_window(&self) -> Result<(), Error> {
        if let Some(window) = &self.window {
            if !window.is_full() {
                return Err(Error::insufficient_data(window.len(), window.capacity())
                    .with_context("window_size", window.capacity()));
            }
        }
        Ok(())
    }

    // (sum, count) of the middle tier
    fn mid_aggregate(&self) -> Result<(i128, usize), Error> {
        let k = self.partition.k();
        if k == 0 {
            return Err(Error::new(
                ErrorKind::InsufficientData,
                "the middle tier is always empty with a trim of zero",
            ));
        }
        self.check_window()?;

        let n = self.len();
        // 2k + 1 may not fit in usize, in which case no element count can reach it
        let Some(required) = k.checked_mul(2).and_then(|trimmed| trimmed.checked_add(1)) else {
            return Err(Error::new(
                ErrorKind::InsufficientData,
                "trim is larger than any possible element count",
            )
            .with_context("k", k));
        };
        if n < required {
            return Err(Error::insufficient_data(n, required).with_context("k", k));
        }

        let mid = self.partition.mid();
        debug_assert!(!mid.is_empty());
        Ok((mid.sum(), mid.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(StatEngine::try_new(Mode::Unbounded, 0).is_ok());
        assert!(StatEngine::try_new(Mode::Unbounded, 50).is_ok());
        assert!(StatEngine::try_new(Mode::Windowed(1), 0).is_ok());
        assert!(StatEngine::try_new(Mode::Windowed(3), 1).is_ok());

        for (m, k) in [(0, 0), (2, 1), (4, 2), (1, usize::MAX)] {
            let err = StatEngine::try_new(Mode::Windowed(m), k).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfig, "m={m}, k={k}");
        }
    }

    #[test]
    #[should_panic(expected = "2k must be less than the window size")]
    fn test_new_panics_on_invalid_config() {
        StatEngine::windowed_trimmed(2, 1);
    }

    #[test]
    fn test_median_rejected_with_trim() {
        let mut engine = StatEngine::new(Mode::Unbounded, 1);
        engine.add_element(1);
        assert_eq!(engine.median().unwrap_err().kind(), ErrorKind::InvalidConfig);
    }

    #[test]
    fn test_trimmed_mean_rejected_without_trim() {
        let mut engine = StatEngine::running_median();
        for value in 0..10 {
            engine.add_element(value);
        }
        assert_eq!(
            engine.trimmed_mean().unwrap_err().kind(),
            ErrorKind::InsufficientData
        );
    }

    #[test]
    fn test_min_max_and_reset() {
        let mut engine = StatEngine::new(Mode::Unbounded, 2);
        assert_eq!(engine.min_value(), None);
        assert_eq!(engine.max_value(), None);

        engine.add_element(4);
        assert_eq!(engine.min_value(), Some(4));
        assert_eq!(engine.max_value(), Some(4));

        for value in [9, -3, 7] {
            engine.add_element(value);
        }
        assert_eq!(engine.min_value(), Some(-3));
        assert_eq!(engine.max_value(), Some(9));
        assert_eq!(engine.total_observed(), 4);

        engine.reset();
        assert!(engine.is_empty());
        assert_eq!(engine.total_observed(), 0);
        assert_eq!(engine.k(), 2);
        assert_eq!(engine.mode(), Mode::Unbounded);
    }

    #[test]
    fn test_window_not_full() {
        let mut engine = StatEngine::sliding_median(3);
        engine.add_element(1);
        engine.add_element(2);
        assert_eq!(
            engine.median().unwrap_err().kind(),
            ErrorKind::InsufficientData
        );
        engine.add_element(3);
        assert_eq!(engine.median().unwrap(), 2.0);

        engine.reset();
        engine.add_element(1);
        assert_eq!(
            engine.median().unwrap_err().kind(),
            ErrorKind::InsufficientData
        );
    }

    #[test]
    fn test_truncation_toward_zero() {
        let mut engine = StatEngine::windowed_trimmed(4, 1);
        for value in [-100, -3, -2, 100] {
            engine.add_element(value);
        }
        assert_eq!(engine.trimmed_mean().unwrap(), -2.5);
        assert_eq!(engine.trimmed_mean_truncated().unwrap(), -2);
    }

    #[test]
    fn test_huge_window_is_accepted() {
        let mut engine = StatEngine::try_new(Mode::Windowed(1 << 62), 0).unwrap();
        assert_eq!(engine.window_size(), Some(1 << 62));
        engine.add_element(1);
        assert_eq!(
            engine.median().unwrap_err().kind(),
            ErrorKind::InsufficientData
        );
    }

    #[test]
    fn test_trim_too_large_for_threshold() {
        for k in [usize::MAX, usize::MAX / 2 + 1] {
            let mut engine = StatEngine::new(Mode::Unbounded, k);
            engine.add_element(1);
            assert_eq!(
                engine.trimmed_mean().unwrap_err().kind(),
                ErrorKind::InsufficientData
            );
            assert_eq!(
                engine.trimmed_mean_truncated().unwrap_err().kind(),
                ErrorKind::InsufficientData
            );
        }
    }

    #[test]
    fn test_extreme_values() {
        let mut engine = StatEngine::running_median();
        engine.add_element(i64::MAX);
        engine.add_element(i64::MAX);
        assert_eq!(engine.median().unwrap(), i64::MAX as f64);

        let mut engine = StatEngine::new(Mode::Unbounded, 1);
        for value in [i64::MIN, i64::MAX, i64::MAX, i64::MAX, i64::MAX] {
            engine.add_element(value);
        }
        assert_eq!(engine.trimmed_mean_truncated().unwrap(), i64::MAX);
    }
}
