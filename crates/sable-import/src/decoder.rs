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

//! Byte-level image decoding via the `image` crate.

use image::ImageError;
use sable_core::{
    pipeline::ImageDecoder,
    texture::{PixelFormat, TextureError, TextureImage},
};

/// Decodes raw image file bytes (PNG, JPEG, ...) with the `image` crate.
///
/// Output is always expanded to RGBA8 and kept in sRGB space; non-color data
/// is reinterpreted by the pixel transforms downstream, not here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRsDecoder;

impl ImageDecoder for ImageRsDecoder {
    fn decode(&self, bytes: &[u8], name: &str) -> Result<TextureImage, TextureError> {
        let decoded = image::load_from_memory(bytes).map_err(|err| match err {
            ImageError::Unsupported(detail) => TextureError::UnsupportedFormat {
                name: name.to_owned(),
                detail: detail.to_string(),
            },
            other => TextureError::CorruptData {
                name: name.to_owned(),
                detail: other.to_string(),
            },
        })?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(TextureImage::new(
            rgba.into_raw(),
            width,
            height,
            PixelFormat::Rgba8UnormSrgb,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest well-formed input: a 1x1 PNG encoded on the fly.
    fn tiny_png() -> Vec<u8> {
        let mut bytes = Vec::new();
        let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([10, 20, 30, 255]));
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
        bytes
    }

    #[test]
    fn decodes_png_to_rgba8() {
        let image = ImageRsDecoder.decode(&tiny_png(), "tiny").unwrap();
        assert_eq!((image.width, image.height), (1, 1));
        assert_eq!(image.pixels, vec![10, 20, 30, 255]);
        assert_eq!(image.format, PixelFormat::Rgba8UnormSrgb);
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        let err = ImageRsDecoder
            .decode(&[0xde, 0xad, 0xbe, 0xef], "junk")
            .unwrap_err();
        assert!(matches!(
            err,
            TextureError::UnsupportedFormat { .. } | TextureError::CorruptData { .. }
        ));
    }

    #[test]
    fn truncated_png_is_corrupt() {
        let mut bytes = tiny_png();
        bytes.truncate(bytes.len() / 2);
        let err = ImageRsDecoder.decode(&bytes, "cut").unwrap_err();
        assert!(matches!(err, TextureError::CorruptData { .. }));
    }
}
