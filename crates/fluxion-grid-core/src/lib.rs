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

//! Grid energy-mix aggregation and charging-window selection.
//!
//! Everything here is pure computation over [`FuelShareSample`] series read
//! through a [`SampleSource`]; storage and HTTP live in `fluxion-grid-server`.

pub mod error;
pub mod mix;
pub mod traits;
pub mod window;

pub use error::{EnergyError, Result};
pub use mix::{MixProvider, aggregate_daily};
pub use traits::SampleSource;
pub use window::{MAX_WINDOW_HOURS, MIN_WINDOW_HOURS, WindowSelector};

pub use fluxion_grid_types::{DailyMix, FuelShareSample, Window};
