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

use futures::future::{BoxFuture, Shared};
use sable_core::texture::{TextureError, TextureHandle};
use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
    sync::Arc,
};

/// A resolved texture held by the cache.
///
/// The pixel buffer is shared through [`TextureHandle`]; for entries produced
/// by the load/convert path the cache entry is the buffer's only long-lived
/// owner, while `external` entries borrow an image supplied by the caller
/// through the override map and never assume ownership of it.
pub struct LoadedTexture {
    image: TextureHandle,
    used: AtomicBool,
    external: bool,
}

impl LoadedTexture {
    /// Entry for an image produced by the decode/transform pipeline.
    pub(crate) fn owned(image: TextureHandle, used: bool) -> Self {
        Self {
            image,
            used: AtomicBool::new(used),
            external: false,
        }
    }

    /// Entry for a caller-supplied override image.
    pub(crate) fn external(image: TextureHandle, used: bool) -> Self {
        Self {
            image,
            used: AtomicBool::new(used),
            external: true,
        }
    }

    /// The decoded, possibly transformed image.
    pub fn image(&self) -> &TextureHandle {
        &self.image
    }

    /// Whether the final material graph references this texture, as opposed
    /// to it existing only as an intermediate for a derived transform.
    /// Drives downstream decisions about which images persist as standalone
    /// assets.
    pub fn is_used(&self) -> bool {
        self.used.load(Ordering::Relaxed)
    }

    /// Whether the image came from the override map rather than the decode
    /// path. External images are never owned, and never destroyed, by the
    /// cache.
    pub fn is_external(&self) -> bool {
        self.external
    }

    /// Upgrades the usage flag. Monotonic: once a texture is referenced by
    /// the material graph it stays referenced. Relaxed ordering suffices for
    /// a bookkeeping bit that synchronizes nothing else.
    pub(crate) fn mark_used(&self) {
        self.used.store(true, Ordering::Relaxed);
    }
}

impl fmt::Debug for LoadedTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedTexture")
            .field("image", &self.image)
            .field("used", &self.is_used())
            .field("external", &self.external)
            .finish()
    }
}

/// Result type fanned out to every caller coalesced onto one load.
pub(crate) type LoadResult = Result<Arc<LoadedTexture>, TextureError>;

/// A cloneable in-flight load, shareable between coalesced callers.
pub(crate) type LoadFuture = Shared<BoxFuture<'static, LoadResult>>;

/// One slot of the cache table.
///
/// A key's slot starts `Pending` the moment the first request for it begins
/// loading and transitions to `Ready` exactly once, inside the shared load
/// future itself. Failed loads vacate the slot instead, so a retry starts
/// clean.
pub(crate) enum CacheSlot {
    /// A load is in flight; later requests await this same future.
    Pending(LoadFuture),
    /// The resolved texture.
    Ready(Arc<LoadedTexture>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::texture::{PixelFormat, TextureImage};

    fn handle() -> TextureHandle {
        TextureHandle::new(TextureImage::new(
            vec![0, 0, 0, 255],
            1,
            1,
            PixelFormat::Rgba8UnormSrgb,
        ))
    }

    #[test]
    fn used_flag_upgrades_monotonically() {
        let entry = LoadedTexture::owned(handle(), false);
        assert!(!entry.is_used());
        entry.mark_used();
        entry.mark_used();
        assert!(entry.is_used());
    }

    #[test]
    fn external_is_recorded() {
        assert!(LoadedTexture::external(handle(), true).is_external());
        assert!(!LoadedTexture::owned(handle(), true).is_external());
    }
}
