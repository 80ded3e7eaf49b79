//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

use std::fmt::Error;
use std::fmt::Formatter;
use std::time::Instant;

use log::info;

/// Naive timing output through the `log` facade
///
/// Make sure a logger backend is configured, otherwise the lines are lost.
/// A line looks like
/// `[raw intersect | merge size: 10000] elapsed: 0.00625 sec [qps: 1600435]`
///
/// # Example
///
/// ```
/// use common::timer;
/// {
///     let mut t = timer::Timer::new("my method");
///     t.set_extra_label("sort");
///     t.set_size(3);
/// } // on exiting the block the timer logs the elapsed time
/// ```
pub struct Timer {
    start: Instant,
    label: String,
    extra_label: Option<String>,
    size: Option<usize>,
    silent: bool,
}

impl Timer {
    pub fn new(label: &str) -> Timer {
        Timer {
            start: Instant::now(),
            label: String::from(label),
            extra_label: None,
            size: None,
            silent: false,
        }
    }

    /// A silent timer does not log when it is dropped,
    /// only on explicit `qps` calls
    pub fn new_silent(label: &str) -> Timer {
        let mut t = Timer::new(label);
        t.silent = true;
        t
    }

    pub fn set_size(&mut self, sz: usize) {
        self.size = Some(sz);
    }

    pub fn set_extra_label(&mut self, label: &str) {
        self.extra_label = Some(String::from(label));
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Seconds since creation or the last `qps` call
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Formats labels, elapsed time and, when `size` is known, the rate
    pub fn qps_str(&self, label: Option<&str>, size: Option<usize>) -> String {
        let e = self.elapsed_secs();

        let fixed_label = label.map(|x| format!(" | {}", x)).unwrap_or_default();
        let fixed_size = size.map(|x| format!(" size: {}", x)).unwrap_or_default();
        let fixed_qps = size
            .map(|x| format!(" [qps: {:.0}]", (x as f64) / e))
            .unwrap_or_default();

        format!(
            "[{}{}{}] elapsed: {:.5} sec{}",
            self.label, fixed_label, fixed_size, e, fixed_qps
        )
    }

    /// Logs one step of `size` records and restarts the clock
    pub fn qps(&mut self, label: &str, size: usize) {
        info!("{}", self.qps_str(Some(label), Some(size)));
        self.start = Instant::now();
    }
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "timer, label: {}", self.label)
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.silent {
            info!("{}", self.qps_str(self.extra_label.as_deref(), self.size));
        }
    }
}
