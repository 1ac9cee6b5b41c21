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

use crate::texture::{TextureError, TextureHandle};
use async_trait::async_trait;
use std::{fmt, sync::Arc};

/// Design-time asset pipeline for normal maps.
///
/// Only available when importing as an offline tooling pass. Instead of
/// repacking the normal map in memory, the tooling route loads the texture
/// through the host's standard asset path and annotates the persisted asset
/// as a normal map, so the host's own texture processing applies. The
/// returned handle is what the persisted asset decodes to, letting the cache
/// treat both routes uniformly.
#[async_trait]
pub trait ToolingAssetPipeline: Send + Sync {
    /// Imports the image at `source_index` as a normal map and annotates the
    /// persisted asset accordingly.
    async fn import_normal_map(
        &self,
        source_index: usize,
        name: &str,
    ) -> Result<TextureHandle, TextureError>;
}

/// Whether the importer runs inside a live instance or an offline tooling
/// pass.
///
/// Decided once at construction and injected; the two normal-map routes are
/// not interchangeable (persistence side effects only exist in tooling), so
/// this must never be derived from ambient global state per call.
#[derive(Clone)]
pub enum ExecutionMode {
    /// Live runtime: transforms run in memory, nothing is persisted.
    Runtime,
    /// Offline tooling pass with access to the host asset pipeline.
    Tooling(Arc<dyn ToolingAssetPipeline>),
}

impl ExecutionMode {
    /// True when running as an offline tooling pass.
    pub fn is_tooling(&self) -> bool {
        matches!(self, ExecutionMode::Tooling(_))
    }
}

impl fmt::Debug for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Runtime => f.write_str("Runtime"),
            ExecutionMode::Tooling(_) => f.write_str("Tooling"),
        }
    }
}
