// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Optimal charging window selection
//!
//! Finds the contiguous run of sampling slots with the highest average clean
//! energy share using a single forward pass with a running sum.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::{EnergyError, FuelShareSample, Result, SampleSource, Window};

pub const MIN_WINDOW_HOURS: i64 = 1;
pub const MAX_WINDOW_HOURS: i64 = 6;

/// Averages closer than this are treated as equal; the earlier window wins.
const TIE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct WindowSelector {
    interval_minutes: u32,
    lookahead_hours: u32,
}

impl WindowSelector {
    #[must_use]
    pub fn new(interval_minutes: u32, lookahead_hours: u32) -> Self {
        Self {
            interval_minutes,
            lookahead_hours,
        }
    }

    #[must_use]
    pub fn interval(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.interval_minutes))
    }

    /// Number of samples forming one window of `hours`.
    ///
    /// Durations outside 1..=6 hours, or not a whole multiple of the sampling
    /// interval, are rejected rather than rounded.
    pub fn samples_per_window(&self, hours: i64) -> Result<usize> {
        if !(MIN_WINDOW_HOURS..=MAX_WINDOW_HOURS).contains(&hours) {
            return Err(EnergyError::InvalidDuration { hours });
        }
        let minutes = hours * 60;
        let interval = i64::from(self.interval_minutes);
        match (minutes.checked_div(interval), minutes.checked_rem(interval)) {
            (Some(k), Some(0)) => {
                usize::try_from(k).map_err(|_| EnergyError::InvalidDuration { hours })
            }
            _ => Err(EnergyError::InvalidDuration { hours }),
        }
    }

    /// Slots considered at `now`: from the start of the current slot up to
    /// the lookahead horizon.
    pub fn search_range(&self, now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let slot_secs = i64::from(self.interval_minutes.max(1)) * 60;
        let secs = now.timestamp();
        let from = DateTime::from_timestamp(secs - secs.rem_euclid(slot_secs), 0).ok_or_else(
            || EnergyError::DataUnavailable(format!("timestamp out of range: {now}")),
        )?;
        let to = TimeDelta::try_hours(i64::from(self.lookahead_hours))
            .and_then(|lookahead| from.checked_add_signed(lookahead))
            .ok_or_else(|| {
                EnergyError::DataUnavailable(format!(
                    "lookahead of {} h from {from} is out of range",
                    self.lookahead_hours
                ))
            })?;
        Ok((from, to))
    }

    /// Reads the upcoming samples from `source` and selects the best window.
    pub fn find_optimal_window(
        &self,
        source: &dyn SampleSource,
        hours: i64,
        now: DateTime<Utc>,
    ) -> Result<Window> {
        // Reject bad durations before touching the store
        self.samples_per_window(hours)?;
        let (from, to) = self.search_range(now)?;
        let samples = source.samples_between(from, to)?;
        self.select(&samples, hours)
    }

    /// Selects the best window of `hours` among time-ordered `samples`.
    ///
    /// Consecutive samples must be exactly one interval apart to share a
    /// window; any other spacing restarts the running window.
    pub fn select(&self, samples: &[FuelShareSample], hours: i64) -> Result<Window> {
        let k = self.samples_per_window(hours)?;
        if samples.len() < k {
            return Err(EnergyError::InsufficientData {
                needed: k,
                available: samples.len(),
            });
        }

        let interval = self.interval();
        #[expect(
            clippy::cast_precision_loss,
            reason = "window holds at most a few hundred samples"
        )]
        let k_f64 = k as f64;

        let mut best: Option<(usize, f64)> = None;
        let mut window_start = 0;
        let mut run_start = 0;
        let mut longest_run = 0;
        let mut sum = 0.0;

        for (i, sample) in samples.iter().enumerate() {
            if i > 0 && sample.timestamp - samples[i - 1].timestamp != interval {
                window_start = i;
                run_start = i;
                sum = 0.0;
            }

            sum += sample.clean_energy_share;
            if i + 1 - window_start > k {
                sum -= samples[window_start].clean_energy_share;
                window_start += 1;
            }
            longest_run = longest_run.max(i + 1 - run_start);

            if i + 1 - window_start == k {
                let average = sum / k_f64;
                if best.is_none_or(|(_, best_avg)| average > best_avg + TIE_EPSILON) {
                    best = Some((window_start, average));
                }
            }
        }

        let Some((start_idx, _)) = best else {
            return Err(EnergyError::InsufficientData {
                needed: k,
                available: longest_run,
            });
        };

        // Recompute the reported average exactly; the running sum may drift
        let exact: f64 = samples[start_idx..start_idx + k]
            .iter()
            .map(|s| s.clean_energy_share)
            .sum::<f64>()
            / k_f64;
        let start = samples[start_idx].timestamp;
        let window = Window {
            start,
            end: start + TimeDelta::hours(hours),
            average_clean_energy_share: exact,
        };

        debug!(
            hours,
            samples = samples.len(),
            start = %window.start,
            average = window.average_clean_energy_share,
            "Selected optimal charging window"
        );
        Ok(window)
    }
}
