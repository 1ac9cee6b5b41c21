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

use crate::texture::TextureImage;
use thiserror::Error;

/// Failure of an interpretation-specific pixel transform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The transform set does not handle the interpretation it was asked for.
    ///
    /// Raised by implementations built before a new interpretation was wired
    /// up. The cache surfaces this to the caller instead of falling back to
    /// the untransformed image.
    #[error("transform set does not handle this interpretation")]
    Unsupported,

    /// The input image cannot be transformed (wrong shape, bad channel data).
    #[error("transform rejected its input: {detail}")]
    Rejected {
        /// Description of what the transform objected to.
        detail: String,
    },
}

/// The interpretation-specific pixel transforms, as pure functions.
///
/// Each method derives a new image from decoded input pixels. Implementations
/// must be deterministic and side-effect free; the cache relies on being able
/// to run each at most once per distinct request and share the result.
pub trait PixelTransforms: Send + Sync {
    /// Repacks a tangent-space normal map into the engine's expected layout.
    fn normal(&self, base: &TextureImage) -> Result<TextureImage, TransformError>;

    /// Bakes a combined metallic-roughness image, scaling the roughness
    /// channel by `roughness_factor`.
    fn metallic_roughness(
        &self,
        base: &TextureImage,
        roughness_factor: f32,
    ) -> Result<TextureImage, TransformError>;

    /// Bakes an occlusion image from `base`, optionally sourcing the packed
    /// occlusion channel from auxiliary images.
    fn occlusion(
        &self,
        base: &TextureImage,
        aux: &[&TextureImage],
    ) -> Result<TextureImage, TransformError>;
}
