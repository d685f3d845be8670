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

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One generation-mix measurement for a single sampling slot.
///
/// `fuel_shares` maps a fuel type (e.g. "wind", "gas") to its percentage of
/// generation; the values of one sample sum to roughly 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelShareSample {
    pub timestamp: DateTime<Utc>,
    pub fuel_shares: BTreeMap<String, f64>,
    pub clean_energy_share: f64,
}

/// Per-day aggregate of all samples falling into one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMix {
    pub date: NaiveDate,
    pub average_fuel_share: BTreeMap<String, f64>,
    pub clean_energy_share: f64,
}

/// Contiguous charging window with the best average clean share.
///
/// `end - start` always equals the requested duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub average_clean_energy_share: f64,
}
