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

//! Image extraction from a glTF document: buffer views, external URIs, and
//! data URIs.

use base64::Engine;
use sable_core::{pipeline::SceneImageSource, texture::TextureError};
use sable_import::{FileSystemResolver, GltfImageSource};
use std::sync::Arc;

fn b64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Three images: a data URI, an external file, and a buffer-view slice of a
/// data-URI buffer.
fn scene_json() -> String {
    format!(
        r#"{{
            "asset": {{ "version": "2.0" }},
            "images": [
                {{ "uri": "data:image/png;base64,{embedded}" }},
                {{ "name": "wall", "uri": "wall.png" }},
                {{ "bufferView": 0, "mimeType": "image/png" }}
            ],
            "buffers": [
                {{ "byteLength": 4, "uri": "data:application/octet-stream;base64,{buffer}" }}
            ],
            "bufferViews": [
                {{ "buffer": 0, "byteOffset": 1, "byteLength": 2 }}
            ]
        }}"#,
        embedded = b64(&[9, 8, 7]),
        buffer = b64(&[0, 10, 20, 30]),
    )
}

fn source_in(dir: &std::path::Path) -> GltfImageSource {
    let gltf = gltf::Gltf::from_slice(scene_json().as_bytes()).unwrap();
    GltfImageSource::new(gltf, Arc::new(FileSystemResolver::new(dir))).unwrap()
}

#[tokio::test]
async fn resolves_all_three_image_storage_kinds() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("wall.png"), [1, 2, 3, 4, 5]).unwrap();
    let source = source_in(dir.path());

    assert_eq!(source.image_count(), 3);

    let embedded = source.read_image(0).await.unwrap();
    assert_eq!(embedded.bytes, vec![9, 8, 7]);

    let external = source.read_image(1).await.unwrap();
    assert_eq!(external.bytes, vec![1, 2, 3, 4, 5]);
    assert_eq!(external.name, "wall");

    let view = source.read_image(2).await.unwrap();
    assert_eq!(view.bytes, vec![10, 20]);
}

#[tokio::test]
async fn display_names_fall_back_sensibly() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_in(dir.path());

    // Data URI has no usable name, explicit name wins, buffer view falls
    // back to the index.
    assert_eq!(source.image_name(0).as_deref(), Some("image_0"));
    assert_eq!(source.image_name(1).as_deref(), Some("wall"));
    assert_eq!(source.image_name(2).as_deref(), Some("image_2"));
    assert_eq!(source.image_name(3), None);
}

#[tokio::test]
async fn out_of_range_index_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_in(dir.path());
    assert_eq!(
        source.read_image(17).await.unwrap_err(),
        TextureError::NotFound { index: Some(17) }
    );
}

#[tokio::test]
async fn missing_external_file_is_an_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_in(dir.path());
    let err = source.read_image(1).await.unwrap_err();
    assert!(matches!(err, TextureError::Io { index: 1, .. }));
    assert!(err.is_transient());
}
