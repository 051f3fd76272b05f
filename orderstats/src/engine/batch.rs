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
use crate::error::ErrorKind;

/// Returns the running median after each value.
///
/// # Examples
///
/// ```
/// # use orderstats::engine::running_medians;
/// let medians = running_medians([1, 2, 3, 4, 5]).unwrap();
/// assert_eq!(medians, vec![1.0, 1.5, 2.0, 2.5, 3.0]);
/// ```
pub fn running_medians(values: impl IntoIterator<Item = i64>) -> Result<Vec<f64>, Error> {
    let mut engine = StatEngine::running_median();
    values
        .into_iter()
        .map(|value| {
            engine.add_element(value);
            engine.median()
        })
        .collect()
}

/// Returns the median of every full window of `m` consecutive values.
///
/// The result has `values.len() - m + 1` entries, or none if there are fewer than `m` values.
///
/// # Errors
///
/// If `m` is zero, returns [`ErrorKind::InvalidConfig`].
///
/// # Examples
///
/// ```
/// # use orderstats::engine::sliding_window_medians;
/// let medians = sliding_window_medians(&[1, 3, -1, -3, 5, 3, 6, 7], 3).unwrap();
/// assert_eq!(medians, vec![1.0, -1.0, -1.0, 3.0, 5.0, 6.0]);
/// ```
pub fn sliding_window_medians(values: &[i64], m: usize) -> Result<Vec<f64>, Error> {
    let mut engine = StatEngine::try_new(Mode::Windowed(m), 0)?;
    let mut medians = Vec::with_capacity(values.len().saturating_sub(m - 1));
    for &value in values {
        engine.add_element(value);
        if engine.len() == m {
            medians.push(engine.median()?);
        }
    }
    Ok(medians)
}

/// Returns, after each value, the truncated mean of the last `m` values with the `k`
/// smallest and `k` largest dropped; `None` while fewer than `m` values have been seen.
///
/// # Errors
///
/// If `2k >= m`, returns [`ErrorKind::InvalidConfig`].
///
/// # Examples
///
/// ```
/// # use orderstats::engine::windowed_trimmed_means;
/// let means = windowed_trimmed_means(&[3, 1, 10, 5, 5, 5], 3, 1).unwrap();
/// assert_eq!(means, vec![None, None, Some(3), Some(5), Some(5), Some(5)]);
/// ```
pub fn windowed_trimmed_means(
    values: &[i64],
    m: usize,
    k: usize,
) -> Result<Vec<Option<i64>>, Error> {
    let mut engine = StatEngine::try_new(Mode::Windowed(m), k)?;
    let mut means = Vec::with_capacity(values.len());
    for &value in values {
        engine.add_element(value);
        match engine.trimmed_mean_truncated() {
            Ok(mean) => means.push(Some(mean)),
            Err(err) if err.kind() == ErrorKind::InsufficientData => means.push(None),
            Err(err) => return Err(err),
        }
    }
    Ok(means)
}
