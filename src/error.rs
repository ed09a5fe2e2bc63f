// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use thiserror::Error;

/// Failures talking to the upstream REST API. A request is attempted exactly
/// once; there are no retries.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request to {url} failed with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures of the read-through cache: either the upstream fetch failed, or
/// the local store could not be read or written.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("cache store error: {0}")]
    Store(#[from] sqlx::Error),
    #[error("cached value could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("no exchange rate for {code}")]
    MissingRate { code: String },
}
