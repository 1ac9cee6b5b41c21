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

//! The texture resolution cache.
//!
//! Maps a [`TextureKey`] to a shared [`LoadedTexture`], loading each distinct
//! scene image at most once and applying each requested interpretation
//! transform at most once per distinct key. Concurrent requests for the same
//! key coalesce onto a single in-flight load; requests for different keys
//! never serialize behind one another.

mod dispatch;
mod entry;
mod key;
mod overrides;

pub use entry::LoadedTexture;
pub use key::{Interpretation, RoughnessFactor, TextureKey};

use ahash::AHashMap;
use entry::{CacheSlot, LoadResult};
use futures::{future::BoxFuture, FutureExt};
use sable_core::{
    pipeline::{ExecutionMode, ImageDecoder, PixelTransforms, SceneImageSource},
    texture::{TextureError, TextureHandle},
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// The texture resolution cache of one import.
///
/// Bound at construction to one scene document, one override map, and one
/// [`ExecutionMode`]; all three are read-only for the cache's lifetime. The
/// cache itself is cheaply cloneable and safe to share across tasks.
///
/// # Example
///
/// ```no_run
/// # use std::{collections::HashMap, sync::Arc};
/// # use sable_core::pipeline::ExecutionMode;
/// # use sable_import::{ImageRsDecoder, StandardTransforms, TextureCache, TextureKey};
/// # async fn import(scene: Arc<dyn sable_core::pipeline::SceneImageSource>) -> Result<(), sable_core::texture::TextureError> {
/// let cache = TextureCache::new(
///     scene,
///     Arc::new(ImageRsDecoder),
///     Arc::new(StandardTransforms),
///     ExecutionMode::Runtime,
///     HashMap::new(),
/// );
/// let albedo = cache.resolve(TextureKey::base(0), true).await?;
/// let normal = cache.resolve(TextureKey::normal(1), true).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TextureCache {
    inner: Arc<CacheInner>,
}

pub(crate) struct CacheInner {
    /// The single shared mutable resource. Held only for map operations,
    /// never across an await.
    slots: Mutex<AHashMap<TextureKey, CacheSlot>>,
    pub(crate) scene: Arc<dyn SceneImageSource>,
    pub(crate) decoder: Arc<dyn ImageDecoder>,
    pub(crate) transforms: Arc<dyn PixelTransforms>,
    pub(crate) mode: ExecutionMode,
    pub(crate) overrides: HashMap<String, TextureHandle>,
}

impl TextureCache {
    /// Creates a cache bound to one scene document and one override map.
    pub fn new(
        scene: Arc<dyn SceneImageSource>,
        decoder: Arc<dyn ImageDecoder>,
        transforms: Arc<dyn PixelTransforms>,
        mode: ExecutionMode,
        overrides: HashMap<String, TextureHandle>,
    ) -> Self {
        log::debug!(
            "texture cache created over {} scene images, {} overrides, mode {:?}",
            scene.image_count(),
            overrides.len(),
            mode
        );
        Self {
            inner: Arc::new(CacheInner {
                slots: Mutex::new(AHashMap::new()),
                scene,
                decoder,
                transforms,
                mode,
                overrides,
            }),
        }
    }

    /// Resolves a texture request to its shared cached result.
    ///
    /// The first request for a key performs the load (override lookup, then
    /// decode and interpretation-specific transform); every later request for
    /// an equal key, sequential or concurrent, observes the same
    /// [`LoadedTexture`] instance without a second decode or transform.
    ///
    /// `used` declares whether the caller references the result from the
    /// final material graph. It upgrades an existing entry's usage flag but
    /// never downgrades it.
    ///
    /// # Errors
    ///
    /// Propagates the collaborator failure for this key; see
    /// [`TextureError`]. Nothing is cached on failure, so resolving the same
    /// key again retries the full load.
    pub async fn resolve(
        &self,
        key: TextureKey,
        used: bool,
    ) -> Result<Arc<LoadedTexture>, TextureError> {
        self.inner.clone().resolve(key, used).await
    }

    /// Snapshot of every fully resolved entry, in unspecified order.
    ///
    /// In-flight loads are not included. Restartable: iterate the returned
    /// vector as often as needed.
    pub fn enumerate_all(&self) -> Vec<Arc<LoadedTexture>> {
        self.inner
            .slots
            .lock()
            .unwrap()
            .values()
            .filter_map(|slot| match slot {
                CacheSlot::Ready(entry) => Some(entry.clone()),
                CacheSlot::Pending(_) => None,
            })
            .collect()
    }

    /// Releases every cached entry.
    ///
    /// Images produced by the load path drop with their last outstanding
    /// handle; external override images stay alive with their owners, the
    /// cache only held a reference. Calling this twice is a no-op the second
    /// time: the table is already empty.
    pub fn teardown(&self) {
        // Drain under the lock, drop the buffers outside of it.
        let drained: Vec<_> = {
            let mut slots = self.inner.slots.lock().unwrap();
            slots.drain().collect()
        };
        if !drained.is_empty() {
            log::debug!("texture cache torn down, {} entries released", drained.len());
        }
        drop(drained);
    }

    /// Number of fully resolved entries currently cached.
    pub fn len(&self) -> usize {
        self.inner
            .slots
            .lock()
            .unwrap()
            .values()
            .filter(|slot| matches!(slot, CacheSlot::Ready(_)))
            .count()
    }

    /// True if no entry has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheInner {
    /// Boxed so the dispatcher can recurse through the cache for base and
    /// auxiliary decodes of derived interpretations.
    pub(crate) fn resolve(
        self: Arc<Self>,
        key: TextureKey,
        used: bool,
    ) -> BoxFuture<'static, LoadResult> {
        async move {
            let load = {
                let mut slots = self.slots.lock().unwrap();
                match slots.get(&key) {
                    Some(CacheSlot::Ready(entry)) => {
                        log::trace!("cache hit for {key:?}");
                        if used {
                            entry.mark_used();
                        }
                        return Ok(entry.clone());
                    }
                    Some(CacheSlot::Pending(load)) => {
                        log::trace!("joining in-flight load for {key:?}");
                        load.clone()
                    }
                    None => {
                        let load = Self::load_and_install(self.clone(), key.clone())
                            .boxed()
                            .shared();
                        slots.insert(key.clone(), CacheSlot::Pending(load.clone()));
                        load
                    }
                }
            };
            let result = load.await;
            if used {
                if let Ok(entry) = &result {
                    entry.mark_used();
                }
            }
            result
        }
        .boxed()
    }

    /// The single load that all coalesced callers share.
    ///
    /// Runs the override lookup and the interpretation dispatch, then
    /// performs the slot's state transition itself: on success the `Pending`
    /// slot becomes `Ready`, on failure it is vacated. Because the transition
    /// happens inside this shared future, cancelled callers can never leave a
    /// half-populated slot behind; the slot is either absent or complete, and
    /// whichever caller polls next simply continues driving the load.
    async fn load_and_install(inner: Arc<Self>, key: TextureKey) -> LoadResult {
        // Base and override entries start unused; each resolving caller's
        // own `used` intent is applied by `resolve` once the result comes
        // back, so coalesced callers with different intents all land
        // correctly. Derived entries are material textures and start used.
        let outcome = match overrides::resolve(&inner, &key) {
            Some(entry) => Ok(entry),
            None => dispatch::load(inner.clone(), &key).await,
        };

        let mut slots = inner.slots.lock().unwrap();
        match outcome {
            Ok(entry) => match slots.get_mut(&key) {
                Some(slot) => {
                    if matches!(slot, CacheSlot::Ready(_)) {
                        // Append-only table: a second write to a populated
                        // slot means coalescing failed.
                        return Err(TextureError::DuplicateInsertion {
                            key: format!("{key:?}"),
                        });
                    }
                    *slot = CacheSlot::Ready(entry.clone());
                    Ok(entry)
                }
                // Torn down while the load was in flight: hand the caller
                // its result but do not resurrect the slot.
                None => Ok(entry),
            },
            Err(err) => {
                log::warn!("failed to resolve {key:?}: {err}");
                if matches!(slots.get(&key), Some(CacheSlot::Pending(_))) {
                    slots.remove(&key);
                }
                Err(err)
            }
        }
    }
}
