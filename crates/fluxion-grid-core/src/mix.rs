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

//! Daily energy-mix aggregation

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::{DailyMix, EnergyError, FuelShareSample, Result, SampleSource};

/// Produces per-day mix summaries for the most recent `days` local calendar
/// days, today included.
#[derive(Debug, Clone)]
pub struct MixProvider {
    days: u32,
    timezone: Tz,
}

#[derive(Debug, Default)]
struct DayAccumulator {
    samples: u32,
    clean_sum: f64,
    fuel_sums: BTreeMap<String, f64>,
}

impl MixProvider {
    #[must_use]
    pub fn new(days: u32, timezone: Tz) -> Self {
        Self {
            days: days.max(1),
            timezone,
        }
    }

    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// First and last local date covered at instant `now`.
    #[must_use]
    pub fn day_range(&self, now: DateTime<Utc>) -> (NaiveDate, NaiveDate) {
        let today = now.with_timezone(&self.timezone).date_naive();
        let first = today
            .checked_sub_days(Days::new(u64::from(self.days - 1)))
            .unwrap_or(NaiveDate::MIN);
        (first, today)
    }

    /// UTC bounds `[start of first day, start of the day after today)`.
    pub fn query_bounds(&self, now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let (first, last) = self.day_range(now);
        let after_last = last.succ_opt().ok_or_else(|| {
            EnergyError::DataUnavailable(format!("date out of range after {last}"))
        })?;
        Ok((
            self.local_midnight(first)?,
            self.local_midnight(after_last)?,
        ))
    }

    pub fn get_mix(&self, source: &dyn SampleSource, now: DateTime<Utc>) -> Result<Vec<DailyMix>> {
        let (from, to) = self.query_bounds(now)?;
        let (first, last) = self.day_range(now);
        let samples = source.samples_between(from, to)?;

        let mix: Vec<DailyMix> = aggregate_daily(&samples, &self.timezone)
            .into_iter()
            .filter(|day| day.date >= first && day.date <= last)
            .collect();

        debug!(
            samples = samples.len(),
            days = mix.len(),
            %first,
            %last,
            "Aggregated daily energy mix"
        );
        Ok(mix)
    }

    // Midnight may fall into a DST gap in a few zones; take the first valid
    // instant after it in that case.
    fn local_midnight(&self, date: NaiveDate) -> Result<DateTime<Utc>> {
        let midnight = date.and_time(NaiveTime::MIN);
        (0..=4)
            .find_map(|step| {
                self.timezone
                    .from_local_datetime(&(midnight + TimeDelta::minutes(30 * step)))
                    .earliest()
            })
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| {
                EnergyError::DataUnavailable(format!(
                    "no valid local midnight for {date} in {}",
                    self.timezone
                ))
            })
    }
}

/// Groups samples by local calendar day and averages them.
///
/// A fuel type absent from some samples of a day counts as 0 for those
/// samples. Days without samples do not appear in the output, which is
/// ordered by ascending date.
#[must_use]
pub fn aggregate_daily(samples: &[FuelShareSample], timezone: &Tz) -> Vec<DailyMix> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    for sample in samples {
        let date = sample.timestamp.with_timezone(timezone).date_naive();
        let acc = days.entry(date).or_default();
        acc.samples += 1;
        acc.clean_sum += sample.clean_energy_share;
        for (fuel, share) in &sample.fuel_shares {
            *acc.fuel_sums.entry(fuel.clone()).or_insert(0.0) += share;
        }
    }

    days.into_iter()
        .map(|(date, acc)| {
            let count = f64::from(acc.samples);
            DailyMix {
                date,
                average_fuel_share: acc
                    .fuel_sums
                    .into_iter()
                    .map(|(fuel, sum)| (fuel, sum / count))
                    .collect(),
                clean_energy_share: acc.clean_sum / count,
            }
        })
        .collect()
}
