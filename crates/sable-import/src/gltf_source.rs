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

//! A [`SceneImageSource`] backed by a glTF document.
//!
//! Supports all three ways a glTF image can be stored: a buffer view into the
//! binary chunk, an external URI resolved through a [`ResourceResolver`], and
//! a base64 data URI.

use async_trait::async_trait;
use base64::Engine;
use sable_core::{
    pipeline::{SceneImageData, SceneImageSource},
    texture::TextureError,
};
use std::{
    error::Error,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Resolves an external URI referenced by the scene document to its bytes.
pub trait ResourceResolver: Send + Sync {
    /// Resolves a (non-data) URI to its binary contents.
    fn resolve(&self, uri: &str) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>>;
}

/// Resolves URIs against a base directory on the local filesystem.
pub struct FileSystemResolver {
    base_path: PathBuf,
}

impl FileSystemResolver {
    /// Creates a resolver rooted at `base_path`, typically the directory the
    /// scene file was read from.
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }
}

impl ResourceResolver for FileSystemResolver {
    fn resolve(&self, uri: &str) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
        let path = self.base_path.join(uri);
        std::fs::read(&path)
            .map_err(|e| format!("failed to read external resource '{:?}': {}", path, e).into())
    }
}

/// Read access to the image list of a parsed glTF document.
///
/// Buffer data (binary chunk, external buffers, data URIs) is materialized
/// once at construction, mirroring how mesh import handles buffers; image
/// byte extraction afterwards is pure slicing plus, for URI-sourced images,
/// one resolver call.
pub struct GltfImageSource {
    document: gltf::Document,
    buffers: Vec<Vec<u8>>,
    resolver: Arc<dyn ResourceResolver>,
}

impl GltfImageSource {
    /// Wraps a parsed glTF file, loading its buffer data eagerly.
    pub fn new(
        gltf: gltf::Gltf,
        resolver: Arc<dyn ResourceResolver>,
    ) -> Result<Self, TextureError> {
        let mut buffers = Vec::new();
        for buffer in gltf.document.buffers() {
            let data = match buffer.source() {
                gltf::buffer::Source::Bin => {
                    gltf.blob
                        .as_deref()
                        .map(<[u8]>::to_vec)
                        .ok_or_else(|| TextureError::Io {
                            index: buffer.index(),
                            name: "<bin>".to_owned(),
                            detail: "file references a binary chunk but none is present"
                                .to_owned(),
                        })?
                }
                gltf::buffer::Source::Uri(uri) if uri.starts_with("data:") => {
                    decode_data_uri(uri).map_err(|detail| TextureError::Io {
                        index: buffer.index(),
                        name: uri_stem(uri).unwrap_or_else(|| "<data>".to_owned()),
                        detail,
                    })?
                }
                gltf::buffer::Source::Uri(uri) => {
                    resolver.resolve(uri).map_err(|e| TextureError::Io {
                        index: buffer.index(),
                        name: uri.to_owned(),
                        detail: e.to_string(),
                    })?
                }
            };
            buffers.push(data);
        }
        Ok(Self {
            document: gltf.document,
            buffers,
            resolver,
        })
    }

    fn image_at(&self, index: usize) -> Option<gltf::Image<'_>> {
        self.document.images().nth(index)
    }

    fn display_name(image: &gltf::Image<'_>, index: usize) -> String {
        if let Some(name) = image.name() {
            return name.to_owned();
        }
        if let gltf::image::Source::Uri { uri, .. } = image.source() {
            if !uri.starts_with("data:") {
                if let Some(stem) = uri_stem(uri) {
                    return stem;
                }
            }
        }
        format!("image_{index}")
    }
}

#[async_trait]
impl SceneImageSource for GltfImageSource {
    fn image_count(&self) -> usize {
        self.document.images().len()
    }

    fn image_name(&self, index: usize) -> Option<String> {
        self.image_at(index)
            .map(|image| Self::display_name(&image, index))
    }

    async fn read_image(&self, index: usize) -> Result<SceneImageData, TextureError> {
        let image = self.image_at(index).ok_or(TextureError::NotFound {
            index: Some(index),
        })?;
        let name = Self::display_name(&image, index);

        let bytes = match image.source() {
            gltf::image::Source::View { view, .. } => {
                let buffer = self.buffers.get(view.buffer().index()).ok_or_else(|| {
                    TextureError::CorruptData {
                        name: name.clone(),
                        detail: format!("image references missing buffer {}", view.buffer().index()),
                    }
                })?;
                let start = view.offset();
                let end = start + view.length();
                buffer
                    .get(start..end)
                    .ok_or_else(|| TextureError::CorruptData {
                        name: name.clone(),
                        detail: format!(
                            "buffer view {start}..{end} exceeds buffer of {} bytes",
                            buffer.len()
                        ),
                    })?
                    .to_vec()
            }
            gltf::image::Source::Uri { uri, .. } if uri.starts_with("data:") => {
                decode_data_uri(uri).map_err(|detail| TextureError::Io {
                    index,
                    name: name.clone(),
                    detail,
                })?
            }
            gltf::image::Source::Uri { uri, .. } => {
                self.resolver.resolve(uri).map_err(|e| TextureError::Io {
                    index,
                    name: name.clone(),
                    detail: e.to_string(),
                })?
            }
        };

        Ok(SceneImageData { bytes, name })
    }
}

fn decode_data_uri(uri: &str) -> Result<Vec<u8>, String> {
    let (_, payload) = uri
        .split_once(";base64,")
        .ok_or_else(|| format!("unsupported data URI encoding: {uri:.32}"))?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| e.to_string())
}

/// File stem of a URI path: `textures/wall.png` becomes `wall`.
fn uri_stem(uri: &str) -> Option<String> {
    let tail = uri.rsplit('/').next()?;
    let stem = tail.rsplit_once('.').map_or(tail, |(stem, _)| stem);
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_roundtrip() {
        let payload = base64::engine::general_purpose::STANDARD.encode([1u8, 2, 3]);
        let uri = format!("data:application/octet-stream;base64,{payload}");
        assert_eq!(decode_data_uri(&uri).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn non_base64_data_uri_is_rejected() {
        assert!(decode_data_uri("data:image/png,rawdata").is_err());
    }

    #[test]
    fn uri_stems() {
        assert_eq!(uri_stem("textures/wall.png").as_deref(), Some("wall"));
        assert_eq!(uri_stem("wall.png").as_deref(), Some("wall"));
        assert_eq!(uri_stem("wall").as_deref(), Some("wall"));
        assert_eq!(uri_stem(".png"), None);
    }
}
