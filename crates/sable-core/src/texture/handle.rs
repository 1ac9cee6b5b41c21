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

use super::TextureImage;
use std::{
    ops::Deref,
    sync::{Arc, Weak},
};

/// A thread-safe, reference-counted handle to a decoded texture image.
///
/// Acts as a smart pointer providing shared ownership of the pixel data.
/// Cloning is cheap (a reference-count increment); the image deallocates when
/// the last handle is dropped.
#[derive(Debug, Clone)]
pub struct TextureHandle(Arc<TextureImage>);

impl TextureHandle {
    /// Wraps an image, taking ownership of its pixel data.
    pub fn new(image: TextureImage) -> Self {
        Self(Arc::new(image))
    }

    /// Creates a non-owning observer of this image.
    ///
    /// Useful for asserting lifetime behavior: the weak handle can tell
    /// whether the underlying buffer has been released without keeping it
    /// alive itself.
    pub fn downgrade(&self) -> WeakTextureHandle {
        WeakTextureHandle(Arc::downgrade(&self.0))
    }

    /// True if both handles point at the same underlying buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for TextureHandle {
    type Target = TextureImage;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A non-owning counterpart to [`TextureHandle`].
#[derive(Debug, Clone)]
pub struct WeakTextureHandle(Weak<TextureImage>);

impl WeakTextureHandle {
    /// Attempts to reacquire a strong handle; `None` once the image is gone.
    pub fn upgrade(&self) -> Option<TextureHandle> {
        self.0.upgrade().map(TextureHandle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::PixelFormat;

    fn one_pixel() -> TextureImage {
        TextureImage::new(vec![255, 0, 0, 255], 1, 1, PixelFormat::Rgba8UnormSrgb)
    }

    #[test]
    fn clones_share_the_buffer() {
        let a = TextureHandle::new(one_pixel());
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(b.width, 1);
    }

    #[test]
    fn weak_observes_release() {
        let handle = TextureHandle::new(one_pixel());
        let weak = handle.downgrade();
        assert!(weak.upgrade().is_some());
        drop(handle);
        assert!(weak.upgrade().is_none());
    }
}
