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

//! Reference pixel transforms for the standard interpretations.
//!
//! These are straightforward channel operations over RGBA8 buffers. Hosts
//! with their own texture processing can swap in another
//! [`PixelTransforms`] implementation; the cache only requires the
//! transforms to be pure.

use sable_core::{
    pipeline::{PixelTransforms, TransformError},
    texture::{PixelFormat, TextureImage},
};

/// Channel-swizzle implementations of the standard interpretation
/// transforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTransforms;

impl PixelTransforms for StandardTransforms {
    /// Renormalizes the tangent-space vector per pixel: XY pass through,
    /// Z is recomputed from them. Output is linear, not sRGB.
    fn normal(&self, base: &TextureImage) -> Result<TextureImage, TransformError> {
        let mut pixels = base.pixels.clone();
        for px in pixels.chunks_exact_mut(4) {
            let x = px[0] as f32 / 127.5 - 1.0;
            let y = px[1] as f32 / 127.5 - 1.0;
            let z = (1.0 - x * x - y * y).max(0.0).sqrt();
            px[2] = ((z + 1.0) * 127.5).min(255.0) as u8;
            px[3] = 255;
        }
        Ok(TextureImage::new(
            pixels,
            base.width,
            base.height,
            PixelFormat::Rgba8Unorm,
        ))
    }

    /// Scales the roughness channel (green, per the usual packed layout) by
    /// `roughness_factor`; metallic (blue) passes through.
    fn metallic_roughness(
        &self,
        base: &TextureImage,
        roughness_factor: f32,
    ) -> Result<TextureImage, TransformError> {
        if !roughness_factor.is_finite() || roughness_factor < 0.0 {
            return Err(TransformError::Rejected {
                detail: format!("roughness factor {roughness_factor} is not a valid multiplier"),
            });
        }
        let mut pixels = base.pixels.clone();
        for px in pixels.chunks_exact_mut(4) {
            px[1] = (px[1] as f32 * roughness_factor).clamp(0.0, 255.0) as u8;
            px[3] = 255;
        }
        Ok(TextureImage::new(
            pixels,
            base.width,
            base.height,
            PixelFormat::Rgba8Unorm,
        ))
    }

    /// Broadcasts the occlusion channel to RGB. The channel comes from the
    /// first auxiliary image's red channel when one is supplied (occlusion
    /// packed alongside other data in a second source), otherwise from the
    /// base image's own red channel.
    fn occlusion(
        &self,
        base: &TextureImage,
        aux: &[&TextureImage],
    ) -> Result<TextureImage, TransformError> {
        let channel_source = aux.first().copied().unwrap_or(base);
        if channel_source.width != base.width || channel_source.height != base.height {
            return Err(TransformError::Rejected {
                detail: format!(
                    "auxiliary image is {}x{} but the base is {}x{}",
                    channel_source.width,
                    channel_source.height,
                    base.width,
                    base.height
                ),
            });
        }
        let mut pixels = Vec::with_capacity(base.pixels.len());
        for px in channel_source.pixels.chunks_exact(4) {
            let occlusion = px[0];
            pixels.extend_from_slice(&[occlusion, occlusion, occlusion, 255]);
        }
        Ok(TextureImage::new(
            pixels,
            base.width,
            base.height,
            PixelFormat::Rgba8Unorm,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(r: u8, g: u8, b: u8) -> TextureImage {
        TextureImage::new(vec![r, g, b, 255], 1, 1, PixelFormat::Rgba8UnormSrgb)
    }

    #[test]
    fn normal_recomputes_z_for_flat_normals() {
        // (128, 128) maps to roughly (0, 0), so Z should be near +1.
        let out = StandardTransforms.normal(&flat(128, 128, 0)).unwrap();
        assert!(out.pixels[2] > 250);
        assert_eq!(out.format, PixelFormat::Rgba8Unorm);
    }

    #[test]
    fn roughness_factor_scales_green() {
        let out = StandardTransforms
            .metallic_roughness(&flat(0, 200, 50), 0.5)
            .unwrap();
        assert_eq!(out.pixels[1], 100);
        assert_eq!(out.pixels[2], 50);
    }

    #[test]
    fn negative_roughness_is_rejected() {
        let err = StandardTransforms
            .metallic_roughness(&flat(0, 0, 0), -1.0)
            .unwrap_err();
        assert!(matches!(err, TransformError::Rejected { .. }));
    }

    #[test]
    fn occlusion_prefers_aux_channel() {
        let base = flat(10, 0, 0);
        let aux = flat(200, 0, 0);
        let out = StandardTransforms.occlusion(&base, &[&aux]).unwrap();
        assert_eq!(&out.pixels[..3], &[200, 200, 200]);

        let own = StandardTransforms.occlusion(&base, &[]).unwrap();
        assert_eq!(&own.pixels[..3], &[10, 10, 10]);
    }

    #[test]
    fn occlusion_rejects_mismatched_aux() {
        let base = flat(10, 0, 0);
        let aux = TextureImage::new(vec![0; 2 * 1 * 4], 2, 1, PixelFormat::Rgba8UnormSrgb);
        let err = StandardTransforms.occlusion(&base, &[&aux]).unwrap_err();
        assert!(matches!(err, TransformError::Rejected { .. }));
    }
}
