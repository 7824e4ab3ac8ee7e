// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared exchange-rate cell read by several tasks
//!
//! Run with `RUST_LOG=debug cargo run --example refresh_loop` to see refresh
//! notices and the refresh spans around the simulated upstream call.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ttlcell::{AsyncTtlCell, CellConfig};

#[derive(Debug, thiserror::Error)]
#[error("rate service timed out on request {0}")]
struct RateServiceTimeout(u32);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config: CellConfig = serde_json::from_str(r#"{ "name": "eur_usd", "ttl_ms": 400 }"#)
        .context("parsing cell config")?;

    let requests = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&requests);
    let rates = Arc::new(AsyncTtlCell::from_config(&config, move || {
        let request = counter.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            tokio::time::sleep(Duration::from_millis(120)).await;
            // Every third upstream request fails
            if request % 3 == 0 {
                Err(RateServiceTimeout(request))
            } else {
                Ok(1.08 + f64::from(request) / 1000.0)
            }
        }
    })?);

    let readers: Vec<_> = (0..3)
        .map(|reader| {
            let rates = Arc::clone(&rates);
            tokio::spawn(async move {
                for tick in 0..6 {
                    match rates.get().await {
                        Ok(rate) => info!(reader, tick, rate, "read rate"),
                        Err(err) => info!(reader, tick, error = %err, "rate unavailable"),
                    }
                    tokio::time::sleep(Duration::from_millis(150)).await;
                }
            })
        })
        .collect();

    for reader in readers {
        reader.await.context("reader task panicked")?;
    }

    info!(upstream_requests = requests.load(Ordering::SeqCst), "Done");
    Ok(())
}
