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

//! Error types for mix and window queries

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnergyError {
    #[error("energy data unavailable: {0}")]
    DataUnavailable(String),

    #[error("invalid charging duration: {hours} h")]
    InvalidDuration { hours: i64 },

    #[error("insufficient data: need {needed} consecutive samples, found {available}")]
    InsufficientData { needed: usize, available: usize },
}

impl EnergyError {
    /// Stable identifier sent to clients in the `error` field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DataUnavailable(_) => "data_unavailable",
            Self::InvalidDuration { .. } => "invalid_duration",
            Self::InsufficientData { .. } => "insufficient_data",
        }
    }
}

pub type Result<T> = std::result::Result<T, EnergyError>;
