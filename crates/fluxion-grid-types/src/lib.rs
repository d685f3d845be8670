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

//! Wire and data types shared between the FluxION Grid server and its clients.

pub mod api;
pub mod energy;
pub mod ingest;

pub use api::{ApiErrorBody, HealthResponse};
pub use energy::{DailyMix, FuelShareSample, Window};
pub use ingest::{IngestRequest, IngestResponse};
