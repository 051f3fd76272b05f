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

use orderstats::engine::StatEngine;
use orderstats::engine::StatEngineBuilder;
use orderstats::engine::sliding_window_medians;

fn main() {
    // Run with `--features tracing` and RUST_LOG=orderstats=trace to see tier moves
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let readings = [12, 15, 11, 90, 14, 13, 16, 12, 300, 15];

    println!("Running median over {} readings", readings.len());
    let mut running = StatEngine::running_median();
    for value in readings {
        running.add_element(value);
        println!("  + {value:>4} -> median {:.1}", running.median().unwrap());
    }

    println!("\nMedian of each window of 3:");
    let medians = sliding_window_medians(&readings, 3).unwrap();
    println!("  {medians:?}");

    println!("\nMean of the last 5 readings, dropping the smallest and largest:");
    let mut trimmed = StatEngineBuilder::windowed(5).trim(1).build();
    for value in readings {
        trimmed.add_element(value);
        match trimmed.trimmed_mean() {
            Ok(mean) => println!("  + {value:>4} -> trimmed mean {mean:.2}"),
            Err(err) => println!("  + {value:>4} -> {err}"),
        }
    }
}
