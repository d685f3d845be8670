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
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use parking_lot::Mutex;
use rusqlite::params;

use fluxion_grid_core::{EnergyError, SampleSource};
use fluxion_grid_types::FuelShareSample;

#[derive(Debug)]
pub struct Database {
    conn: Mutex<rusqlite::Connection>,
}

// Fixed-width UTC form so TEXT comparison orders like time.
fn ts_key(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl Database {
    pub fn open(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let conn = rusqlite::Connection::open(path)
            .with_context(|| format!("Failed to open database: {path}"))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS samples (
                timestamp           TEXT PRIMARY KEY,
                clean_energy_share  REAL NOT NULL,
                fuel_shares_json    TEXT NOT NULL,
                received_at         TEXT NOT NULL
            );",
        )
        .context("Failed to initialize database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Inserts samples in one transaction; a stored timestamp is overwritten.
    pub fn upsert_samples(&self, samples: &[FuelShareSample]) -> Result<usize> {
        let mut conn = self.conn.lock();
        let now = ts_key(Utc::now());
        let tx = conn
            .transaction()
            .context("Failed to begin sample transaction")?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO samples (timestamp, clean_energy_share, fuel_shares_json, received_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(timestamp) DO UPDATE SET
                    clean_energy_share = excluded.clean_energy_share,
                    fuel_shares_json = excluded.fuel_shares_json,
                    received_at = excluded.received_at",
            )?;

            for sample in samples {
                let fuel_json = serde_json::to_string(&sample.fuel_shares)?;
                stmt.execute(params![
                    ts_key(sample.timestamp),
                    sample.clean_energy_share,
                    fuel_json,
                    now,
                ])?;
            }
        }

        tx.commit().context("Failed to commit samples")?;
        Ok(samples.len())
    }

    /// Samples with `from <= timestamp < to`, oldest first.
    pub fn load_samples(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<FuelShareSample>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT timestamp, clean_energy_share, fuel_shares_json
             FROM samples
             WHERE timestamp >= ?1 AND timestamp < ?2
             ORDER BY timestamp ASC",
        )?;

        let rows = stmt
            .query_map(params![ts_key(from), ts_key(to)], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(ts, clean_energy_share, fuel_json)| {
                let timestamp = DateTime::parse_from_rfc3339(&ts)
                    .with_context(|| format!("Corrupt sample timestamp: {ts}"))?
                    .with_timezone(&Utc);
                let fuel_shares: BTreeMap<String, f64> = serde_json::from_str(&fuel_json)
                    .with_context(|| format!("Corrupt fuel shares for sample at {ts}"))?;
                Ok(FuelShareSample {
                    timestamp,
                    fuel_shares,
                    clean_energy_share,
                })
            })
            .collect()
    }

    pub fn sample_count(&self) -> Result<u64> {
        let conn = self.conn.lock();
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM samples", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn cleanup_old_samples(&self, retention_days: u32) -> Result<u64> {
        let conn = self.conn.lock();
        let cutoff = Utc::now() - TimeDelta::days(i64::from(retention_days));
        let deleted = conn.execute(
            "DELETE FROM samples WHERE timestamp < ?1",
            params![ts_key(cutoff)],
        )?;
        Ok(deleted as u64)
    }
}

impl SampleSource for Database {
    fn samples_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> fluxion_grid_core::Result<Vec<FuelShareSample>> {
        self.load_samples(from, to)
            .map_err(|e| EnergyError::DataUnavailable(format!("{e:#}")))
    }
}
