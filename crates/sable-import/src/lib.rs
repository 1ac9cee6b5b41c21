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

//! Import-time texture resolution.
//!
//! The centerpiece is [`TextureCache`]: given a scene document and a request
//! describing how a source image should be interpreted, it loads each
//! distinct raw image at most once, applies each interpretation transform at
//! most once per distinct request, and returns shared handles. Concurrent
//! identical requests coalesce onto a single in-flight load.
//!
//! Alongside it live the concrete collaborators for a glTF pipeline: a
//! [`GltfImageSource`] over a parsed document, an [`ImageRsDecoder`] for
//! byte-level decoding, and [`StandardTransforms`] with reference
//! channel-swizzle implementations of the interpretation transforms.

mod decoder;
mod gltf_source;
mod texture_cache;
mod transforms;

pub use decoder::ImageRsDecoder;
pub use gltf_source::{FileSystemResolver, GltfImageSource, ResourceResolver};
pub use texture_cache::{
    Interpretation, LoadedTexture, RoughnessFactor, TextureCache, TextureKey,
};
pub use transforms::StandardTransforms;
