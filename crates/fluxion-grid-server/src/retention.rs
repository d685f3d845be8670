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

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::db::Database;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(86400);

/// Deletes samples older than `retention_days`, once at startup and then daily.
pub fn spawn_retention(db: Arc<Database>, retention_days: u32) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        info!(retention_days, "Sample retention task started");

        loop {
            interval.tick().await;
            let db = Arc::clone(&db);
            let result =
                tokio::task::spawn_blocking(move || db.cleanup_old_samples(retention_days)).await;
            match result {
                Ok(Ok(deleted)) if deleted > 0 => {
                    info!(deleted, "Cleaned up old samples");
                }
                Ok(Err(e)) => {
                    error!(error = %e, "Failed to clean up old samples");
                }
                Err(e) => {
                    error!(error = %e, "Sample cleanup task failed");
                }
                Ok(Ok(_)) => {}
            }
        }
    })
}
