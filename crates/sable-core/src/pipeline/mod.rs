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

//! The narrow interfaces the texture cache consumes.
//!
//! Each trait covers one external concern: reading raw image bytes out of the
//! scene document, decoding bytes into pixels, the interpretation-specific
//! pixel transforms, and the design-time asset pipeline. The cache in
//! `sable-import` orchestrates these; it never reaches around them.

mod decode;
mod mode;
mod source;
mod transform;

pub use decode::*;
pub use mode::*;
pub use source::*;
pub use transform::*;
