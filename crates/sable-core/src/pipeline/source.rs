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

use crate::texture::TextureError;
use async_trait::async_trait;

/// The raw bytes of one scene image together with its display name.
#[derive(Debug, Clone)]
pub struct SceneImageData {
    /// The undecoded image file contents.
    pub bytes: Vec<u8>,
    /// Human-readable name for diagnostics and override lookup.
    pub name: String,
}

/// Read access to the image list of a loaded scene document.
///
/// Implementations map an image index to its bytes and display name. Reading
/// may involve disk, archive, or network I/O, so the byte accessor is
/// asynchronous; the name accessor must be cheap since it is consulted on
/// every override lookup, before any bytes are needed.
///
/// The scene document behind an implementation is read-only for the lifetime
/// of the importing cache; implementations need no interior mutability.
#[async_trait]
pub trait SceneImageSource: Send + Sync {
    /// Number of images in the scene's image list.
    fn image_count(&self) -> usize;

    /// Display name of the image at `index`, or `None` if out of range.
    fn image_name(&self, index: usize) -> Option<String>;

    /// Reads the raw bytes of the image at `index`.
    ///
    /// # Errors
    ///
    /// [`TextureError::NotFound`] for an out-of-range index,
    /// [`TextureError::Io`] when the backing storage fails.
    async fn read_image(&self, index: usize) -> Result<SceneImageData, TextureError>;
}
