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

use std::fmt;

/// Pixel layout of a decoded [`TextureImage`].
///
/// Import-time images are always expanded to 8-bit RGBA; the only distinction
/// that survives decoding is whether the data is color (sRGB-encoded) or
/// non-color data such as normals and packed material channels (linear).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit RGBA, sRGB transfer function. The default for color textures.
    Rgba8UnormSrgb,
    /// 8-bit RGBA, linear. Used for normal maps and packed channel data.
    Rgba8Unorm,
}

/// A CPU-side decoded image, ready for further processing or upload.
///
/// The pixel buffer is tightly packed, `width * height * 4` bytes, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct TextureImage {
    /// The raw pixel data in RGBA order.
    pub pixels: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// The layout and color space of `pixels`.
    pub format: PixelFormat,
}

impl TextureImage {
    /// Creates an image from a tightly packed RGBA buffer.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != width * height * 4`. Collaborators that
    /// produce images are expected to uphold this themselves; the check exists
    /// to catch transform implementations that miscompute their output size.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "pixel buffer does not match {width}x{height} RGBA dimensions"
        );
        Self {
            pixels,
            width,
            height,
            format,
        }
    }

    /// Row size in bytes (relevant for upload alignment downstream).
    pub fn row_size(&self) -> usize {
        self.width as usize * 4
    }

    /// Number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Debug for TextureImage {
    // The pixel buffer is elided; a megabyte of hex is not a useful Debug dump.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_matching_buffer() {
        let img = TextureImage::new(vec![0; 2 * 3 * 4], 2, 3, PixelFormat::Rgba8UnormSrgb);
        assert_eq!(img.row_size(), 8);
        assert_eq!(img.pixel_count(), 6);
    }

    #[test]
    #[should_panic]
    fn new_rejects_short_buffer() {
        TextureImage::new(vec![0; 7], 2, 1, PixelFormat::Rgba8Unorm);
    }
}
