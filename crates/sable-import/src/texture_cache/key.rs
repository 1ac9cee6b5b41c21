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

use std::hash::{Hash, Hasher};

/// A roughness multiplier that participates in cache-key identity.
///
/// Comparison and hashing are bit-exact on the underlying `f32`: requests
/// carrying the same factor value hit the same cache entry, while factors
/// that differ in any bit produce distinct entries. No tolerance is applied.
#[derive(Debug, Clone, Copy)]
pub struct RoughnessFactor(f32);

impl RoughnessFactor {
    /// Wraps a raw factor value.
    pub fn new(value: f32) -> Self {
        Self(value)
    }

    /// The raw factor value.
    pub fn value(self) -> f32 {
        self.0
    }
}

impl PartialEq for RoughnessFactor {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for RoughnessFactor {}

impl Hash for RoughnessFactor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<f32> for RoughnessFactor {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// The semantic role a request assigns to a source image.
///
/// Each role may require a distinct pixel transform of the decoded base
/// image; [`Base`](Interpretation::Base) is the untransformed decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interpretation {
    /// The raw decoded image, no transform applied.
    Base,
    /// Tangent-space normal map, repacked for the engine.
    Normal,
    /// Baked metallic-roughness, scaled by the given roughness factor.
    MetallicRoughness(RoughnessFactor),
    /// Baked ambient occlusion.
    Occlusion,
}

/// Identity of one logical texture output.
///
/// Two keys are equal iff every field is equal, including the roughness
/// factor (bit-exact) and the full auxiliary list in order. Keys built
/// independently from equal inputs compare equal and hash identically, which
/// is what makes them usable as hash-map cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureKey {
    /// Index into the scene document's image list, when the request is
    /// backed by a scene image.
    pub source: Option<usize>,
    /// How the image is to be interpreted.
    pub interpretation: Interpretation,
    /// Additional source images for interpretations that combine more than
    /// one (occlusion may take its packed channel from a second source).
    /// Empty for single-source requests.
    pub aux_sources: Vec<usize>,
}

impl TextureKey {
    /// Key for the untransformed decode of a scene image.
    pub fn base(source: usize) -> Self {
        Self {
            source: Some(source),
            interpretation: Interpretation::Base,
            aux_sources: Vec::new(),
        }
    }

    /// Key for the normal-map repack of a scene image.
    pub fn normal(source: usize) -> Self {
        Self {
            source: Some(source),
            interpretation: Interpretation::Normal,
            aux_sources: Vec::new(),
        }
    }

    /// Key for a metallic-roughness bake with the given factor.
    pub fn metallic_roughness(source: usize, roughness_factor: f32) -> Self {
        Self {
            source: Some(source),
            interpretation: Interpretation::MetallicRoughness(roughness_factor.into()),
            aux_sources: Vec::new(),
        }
    }

    /// Key for an occlusion bake, optionally combining auxiliary sources.
    pub fn occlusion(source: usize, aux_sources: Vec<usize>) -> Self {
        Self {
            source: Some(source),
            interpretation: Interpretation::Occlusion,
            aux_sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn independently_built_keys_agree() {
        let a = TextureKey::metallic_roughness(2, 0.5);
        let b = TextureKey::metallic_roughness(2, 0.5);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn roughness_is_bit_exact() {
        assert_ne!(
            TextureKey::metallic_roughness(2, 0.5),
            TextureKey::metallic_roughness(2, 0.51)
        );
        // Negative zero and zero differ in bits, so they differ as keys.
        assert_ne!(
            RoughnessFactor::new(0.0),
            RoughnessFactor::new(-0.0)
        );
    }

    #[test]
    fn interpretation_separates_outputs() {
        assert_ne!(TextureKey::base(1), TextureKey::normal(1));
        assert_ne!(TextureKey::base(1), TextureKey::base(2));
    }

    #[test]
    fn aux_list_is_compared_in_order() {
        assert_ne!(
            TextureKey::occlusion(0, vec![1, 2]),
            TextureKey::occlusion(0, vec![2, 1])
        );
        assert_eq!(
            TextureKey::occlusion(0, vec![1, 2]),
            TextureKey::occlusion(0, vec![1, 2])
        );
    }
}
