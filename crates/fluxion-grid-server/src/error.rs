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

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use fluxion_grid_core::EnergyError;
use fluxion_grid_types::ApiErrorBody;

/// Failure of an API request, rendered as status + [`ApiErrorBody`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Energy(#[from] EnergyError),

    #[error("hours must be a whole number, got {0:?}")]
    UnparsableDuration(String),

    #[error("malformed query: {0}")]
    MalformedQuery(String),

    #[error("invalid sample: {0}")]
    InvalidSample(String),

    #[error("invalid shared secret")]
    Unauthorized,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Energy(EnergyError::DataUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Energy(EnergyError::InvalidDuration { .. })
            | Self::UnparsableDuration(_)
            | Self::MalformedQuery(_)
            | Self::InvalidSample(_) => StatusCode::BAD_REQUEST,
            Self::Energy(EnergyError::InsufficientData { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Energy(e) => e.kind(),
            Self::UnparsableDuration(_) | Self::MalformedQuery(_) => "invalid_duration",
            Self::InvalidSample(_) => "invalid_sample",
            Self::Unauthorized => "unauthorized",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(kind = self.kind(), error = %self, "Request failed");
        } else {
            warn!(kind = self.kind(), error = %self, "Request rejected");
        }

        let body = ApiErrorBody {
            error: self.kind().to_owned(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
