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

use crate::texture::{TextureError, TextureImage};

/// Decodes raw image file bytes into a [`TextureImage`].
///
/// A pure computation: same bytes in, same pixels out, no side effects. The
/// `name` parameter is only used to attribute failures to a specific scene
/// image in the resulting error.
pub trait ImageDecoder: Send + Sync {
    /// Decodes `bytes` into pixels.
    ///
    /// # Errors
    ///
    /// [`TextureError::UnsupportedFormat`] when the container format is not
    /// recognized, [`TextureError::CorruptData`] when a recognized format
    /// fails to decode.
    fn decode(&self, bytes: &[u8], name: &str) -> Result<TextureImage, TextureError>;
}
