// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Producer traits for cached values
//!
//! Any zero-argument closure returning a `Result` is a [`Refresh`], and any
//! zero-argument closure returning a `Send` future of a `Result` is an
//! [`AsyncRefresh`]. Implement the traits directly when the producer carries
//! its own state, such as a client handle.

use std::future::Future;

use async_trait::async_trait;

/// Blocking producer of a fresh value
///
/// Called with the owning cell's lock held. Implementations must not read
/// from the same cell, which would deadlock.
pub trait Refresh {
    /// The cached payload
    type Value;
    /// Failure returned verbatim from [`crate::TtlCell::get`]
    type Error;

    /// Produces a new value, or fails leaving the cell's state untouched
    fn refresh(&self) -> Result<Self::Value, Self::Error>;
}

impl<F, T, E> Refresh for F
where
    F: Fn() -> Result<T, E>,
{
    type Value = T;
    type Error = E;

    fn refresh(&self) -> Result<T, E> {
        self()
    }
}

/// Async producer of a fresh value
///
/// The returned future is awaited with the owning cell's lock held.
#[async_trait]
pub trait AsyncRefresh: Send + Sync {
    /// The cached payload
    type Value: Send;
    /// Failure returned verbatim from [`crate::AsyncTtlCell::get`]
    type Error: Send;

    /// Produces a new value, or fails leaving the cell's state untouched
    async fn refresh(&self) -> Result<Self::Value, Self::Error>;
}

#[async_trait]
impl<F, Fut, T, E> AsyncRefresh for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Value = T;
    type Error = E;

    async fn refresh(&self) -> Result<T, E> {
        self().await
    }
}
