// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Resilient caller.
//!
//! Wraps any outbound call with bounded retry for transient failures, as
//! classified by [`ClientError::is_transient`]. Non-transient errors rethrow
//! immediately; transient ones retry with a fixed pause until the attempt
//! budget runs out, at which point the last error rethrows.

use std::future::Future;
use std::time::Duration;

use crate::client::{ClientError, ClientResult};

/// Total attempts per call, first try included.
pub const MAX_ATTEMPTS: u32 = 8;

/// Fixed pause between attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Runs `op`, retrying transient failures up to [`MAX_ATTEMPTS`] total tries.
///
/// Stateless across calls; `label` only feeds the per-attempt warning.
pub async fn call_with_retry<T, F, Fut>(label: &str, mut op: F) -> ClientResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClientResult<T>>,
{
    let mut attempt = 1u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_transient() => return Err(err),
            Err(err) => {
                log_attempt(label, attempt, &err);
                if attempt >= MAX_ATTEMPTS {
                    return Err(err);
                }
                attempt += 1;
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}

fn log_attempt(label: &str, attempt: u32, err: &ClientError) {
    tracing::warn!(
        label,
        attempt,
        max_attempts = MAX_ATTEMPTS,
        error = %err,
        "transient failure"
    );
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
