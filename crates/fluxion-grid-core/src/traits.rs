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

use chrono::{DateTime, Utc};

use crate::{FuelShareSample, Result};

/// Read access to recorded generation-mix samples.
///
/// Implementations return samples with `from <= timestamp < to`, ordered by
/// ascending timestamp with no duplicate timestamps. Any backend failure is
/// reported as [`EnergyError::DataUnavailable`](crate::EnergyError::DataUnavailable).
pub trait SampleSource: Send + Sync {
    fn samples_between(&self, from: DateTime<Utc>, to: DateTime<Utc>)
    -> Result<Vec<FuelShareSample>>;
}
