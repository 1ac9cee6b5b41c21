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

//! Per-interpretation load and derive logic.
//!
//! Every derived interpretation resolves its base (and auxiliary) decodes
//! back through the cache, so two derived requests over the same raw source
//! share one decoded buffer without a second decode.

use super::{
    entry::{LoadResult, LoadedTexture},
    key::{Interpretation, TextureKey},
    CacheInner,
};
use sable_core::{
    pipeline::{ExecutionMode, TransformError},
    texture::{TextureError, TextureHandle, TextureImage},
};
use std::sync::Arc;

/// Produces the texture for a key that no override satisfied.
///
/// Base entries start unused (the resolving caller's intent is applied by
/// the cache afterwards); derived entries are material textures by
/// definition and start used.
pub(super) async fn load(inner: Arc<CacheInner>, key: &TextureKey) -> LoadResult {
    let index = key.source.ok_or(TextureError::NotFound { index: None })?;
    match key.interpretation {
        Interpretation::Base => {
            let data = inner.scene.read_image(index).await?;
            let image = inner.decoder.decode(&data.bytes, &data.name)?;
            log::debug!(
                "decoded scene image {index} ('{}'), {}x{}",
                data.name,
                image.width,
                image.height
            );
            Ok(Arc::new(LoadedTexture::owned(
                TextureHandle::new(image),
                false,
            )))
        }
        Interpretation::Normal => {
            let handle = match &inner.mode {
                ExecutionMode::Runtime => {
                    let base = resolve_base(&inner, index).await?;
                    let repacked = inner
                        .transforms
                        .normal(base.image())
                        .map_err(|err| transform_failure(&inner, key, index, err))?;
                    TextureHandle::new(repacked)
                }
                // Offline tooling pass: route through the host asset pipeline
                // so the persisted asset carries the normal-map annotation.
                ExecutionMode::Tooling(pipeline) => {
                    let name = inner
                        .scene
                        .image_name(index)
                        .ok_or(TextureError::NotFound {
                            index: Some(index),
                        })?;
                    log::debug!("importing scene image {index} ('{name}') as a normal map asset");
                    pipeline.import_normal_map(index, &name).await?
                }
            };
            Ok(Arc::new(LoadedTexture::owned(handle, true)))
        }
        Interpretation::MetallicRoughness(factor) => {
            let base = resolve_base(&inner, index).await?;
            let baked = inner
                .transforms
                .metallic_roughness(base.image(), factor.value())
                .map_err(|err| transform_failure(&inner, key, index, err))?;
            Ok(Arc::new(LoadedTexture::owned(
                TextureHandle::new(baked),
                true,
            )))
        }
        Interpretation::Occlusion => {
            let base = resolve_base(&inner, index).await?;
            let mut aux_entries = Vec::with_capacity(key.aux_sources.len());
            for &aux in &key.aux_sources {
                aux_entries.push(resolve_base(&inner, aux).await?);
            }
            let aux_images: Vec<&TextureImage> =
                aux_entries.iter().map(|entry| &**entry.image()).collect();
            let baked = inner
                .transforms
                .occlusion(base.image(), &aux_images)
                .map_err(|err| transform_failure(&inner, key, index, err))?;
            Ok(Arc::new(LoadedTexture::owned(
                TextureHandle::new(baked),
                true,
            )))
        }
    }
}

/// Resolves the untransformed decode of `index` through the cache.
///
/// The base decode of a derived request is an intermediate, not a material
/// texture, so it is requested with `used = false`; if anything else asks
/// for the same base as a final texture, the shared entry's usage flag
/// upgrades on that request.
async fn resolve_base(
    inner: &Arc<CacheInner>,
    index: usize,
) -> Result<Arc<LoadedTexture>, TextureError> {
    inner.clone().resolve(TextureKey::base(index), false).await
}

fn transform_failure(
    inner: &CacheInner,
    key: &TextureKey,
    index: usize,
    err: TransformError,
) -> TextureError {
    match err {
        TransformError::Unsupported => TextureError::UnsupportedInterpretation {
            interpretation: format!("{:?}", key.interpretation),
        },
        TransformError::Rejected { detail } => TextureError::CorruptData {
            name: inner
                .scene
                .image_name(index)
                .unwrap_or_else(|| format!("image_{index}")),
            detail,
        },
    }
}
