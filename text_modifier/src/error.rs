// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

use crate::bag::AttributeKey;

/// Result type alias using the crate [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by precondition checks and persisted-state decoding.
///
/// Style derivation itself is total: modifiers and resolution always produce a value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A raw font style value outside `0..=3`.
    #[error("invalid font style bits {0:#x}: expected plain (0), bold (1), italic (2) or bold italic (3)")]
    InvalidFontFlags(u8),

    /// An explicit clear was requested for an attribute that has no "absent" state.
    #[error("attribute `{0}` cannot be cleared")]
    NotClearable(AttributeKey),

    /// A clickable action was created with an empty command string.
    #[error("clickable action command must not be empty")]
    EmptyCommand,

    /// A persisted listener list ended without its terminating entry.
    #[error("persisted listener list is not terminated")]
    UnterminatedListeners,

    /// A listener collaborator failed to decode a persisted listener.
    #[error("listener decode failed: {0}")]
    Listener(String),

    /// JSON encoding or decoding of persisted state failed.
    #[cfg(feature = "serde")]
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
