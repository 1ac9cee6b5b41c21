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

use super::{entry::LoadedTexture, key::TextureKey, CacheInner};
use std::sync::Arc;

/// Attempts to satisfy a request from the caller-supplied override map.
///
/// The request's source index is resolved to the image's display name, and
/// the name looked up in the override map. On a hit the resulting entry is
/// marked `external`: the cache holds a reference to the caller's image but
/// never owns it.
///
/// The entry is cached under the *original* request key by the caller of this
/// function, so an overridden normal-map request lands under its Normal key
/// and a second request cannot fall into the base-plus-convert path.
///
/// `None` means "no override applies, fall through to the standard load"; it
/// is not an error. Requests without a source index can never be overridden.
///
/// Entries start unused; the resolving caller's usage intent is applied by
/// the cache once the entry is handed back.
pub(super) fn resolve(inner: &CacheInner, key: &TextureKey) -> Option<Arc<LoadedTexture>> {
    let index = key.source?;
    if inner.overrides.is_empty() {
        return None;
    }
    let name = inner.scene.image_name(index)?;
    let image = inner.overrides.get(&name)?;
    log::debug!("scene image {index} ('{name}') satisfied by external override");
    Some(Arc::new(LoadedTexture::external(image.clone(), false)))
}
