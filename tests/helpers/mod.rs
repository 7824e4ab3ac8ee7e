// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for ttlcell integration tests
//!
//! Provides scripted producers and log capture so cell behavior can be
//! checked without real upstream services or wall-clock sleeps.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing_subscriber::fmt::MakeWriter;

/// Error returned by scripted producers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("upstream unavailable: {0}")]
pub struct UpstreamError(pub &'static str);

/// Fixed starting instant for manual clocks
#[allow(dead_code)]
pub fn start() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// Counts producer invocations across clones
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    /// Records one call and returns its 1-based index
    pub fn record(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of calls recorded so far
    pub fn calls(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Producer that returns `outcomes` in order, repeating the last one once exhausted
///
/// # Example
///
/// ```rust,ignore
/// let (refresh, counter) = scripted(vec![Err(UpstreamError("boot")), Ok("X")]);
/// let cell = TtlCell::new(Duration::from_secs(1), refresh);
/// ```
#[allow(dead_code)]
pub fn scripted<T: Clone>(
    outcomes: Vec<Result<T, UpstreamError>>,
) -> (impl Fn() -> Result<T, UpstreamError>, CallCounter) {
    assert!(!outcomes.is_empty(), "scripted producer needs an outcome");
    let counter = CallCounter::default();
    let recorder = counter.clone();
    let refresh = move || {
        let index = recorder.record() - 1;
        outcomes[index.min(outcomes.len() - 1)].clone()
    };
    (refresh, counter)
}

/// In-memory sink for formatted tracing output
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl LogCapture {
    /// Subscriber writing plain-text events at DEBUG and above into this capture
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::DEBUG)
            .finish()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Lines containing `needle`
    pub fn lines_matching(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
