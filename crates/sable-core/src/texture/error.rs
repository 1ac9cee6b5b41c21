// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The error hierarchy of the texture resolution path.

use thiserror::Error;

/// An error produced while resolving a texture request.
///
/// Every failure is attributable to a specific source image and request, and
/// propagates unchanged to the caller that asked for that key; a failure for
/// one key never affects others.
///
/// The type is `Clone`: when several concurrent requests for the same key are
/// coalesced into one load, a single failure has to be delivered to every
/// waiter. Underlying error details are therefore captured as strings rather
/// than boxed sources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureError {
    /// The scene document has no image backing the request: the index is out
    /// of range, an auxiliary index is bad, or the request named no source at
    /// all (`index` is `None`).
    #[error("scene document has no image for source index {index:?}")]
    NotFound {
        /// The offending image index, when the request carried one.
        index: Option<usize>,
    },

    /// Reading the image's bytes failed (disk, archive, or network).
    /// Transient; the caller may retry the same key, nothing was cached.
    #[error("failed to read image {index} ({name}): {detail}")]
    Io {
        /// The scene image index being read.
        index: usize,
        /// The image's display name, when known.
        name: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The image bytes are in a format the decoder does not support.
    /// Fatal for this key; retrying will not help.
    #[error("unsupported image format for '{name}': {detail}")]
    UnsupportedFormat {
        /// The image's display name.
        name: String,
        /// The decoder's description of the problem.
        detail: String,
    },

    /// The image bytes claim a supported format but fail to decode.
    /// Fatal for this key; retrying will not help.
    #[error("corrupt image data in '{name}': {detail}")]
    CorruptData {
        /// The image's display name.
        name: String,
        /// The decoder's description of the problem.
        detail: String,
    },

    /// The requested interpretation has no transform wired up.
    ///
    /// This is a programming error, not a data error: it means an
    /// interpretation was introduced without teaching the configured
    /// transform set about it. It is surfaced immediately rather than
    /// silently treated as a plain color texture.
    #[error("no transform available for interpretation {interpretation}")]
    UnsupportedInterpretation {
        /// Debug rendering of the interpretation that could not be handled.
        interpretation: String,
    },

    /// A second writer tried to populate an already-populated cache slot.
    ///
    /// Cache entries are append-only; seeing this means request coalescing
    /// failed and two loads ran for one key.
    #[error("cache slot for {key} was populated twice")]
    DuplicateInsertion {
        /// Debug rendering of the offending request key.
        key: String,
    },
}

impl TextureError {
    /// Whether retrying the same request can reasonably succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, TextureError::Io { .. })
    }
}
