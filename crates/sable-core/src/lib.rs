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

//! Foundational types and interface contracts for the Sable import pipeline.
//!
//! This crate defines the "common language" shared by the import-time systems:
//! the CPU-side image representation, the shared texture handle, the error
//! hierarchy, and the narrow traits through which the texture cache talks to
//! its collaborators (scene document, byte decoder, pixel transforms, tooling
//! pipeline). It has no knowledge of how caching or loading is orchestrated;
//! that lives in `sable-import`.

pub mod pipeline;
pub mod texture;
