//! Static clip catalog
//!
//! The catalog is the ordered, immutable list of clips the soundboard
//! offers. It is built once at startup, in code or from a JSON document,
//! and is read-only afterwards, so every component may consult it freely.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::types::ClipDescriptor;

/// Immutable ordered collection of clip descriptors
///
/// Declaration order is preserved: `list()` and `iter()` always return
/// clips in the order they were supplied, which is the order the UI renders
/// them in. Lookups by id are indexed.
#[derive(Debug, Clone)]
pub struct ClipCatalog {
    clips: Vec<ClipDescriptor>,
    index: HashMap<String, usize>,
}

impl ClipCatalog {
    /// Build a catalog from descriptors, preserving their order
    ///
    /// Fails with `DuplicateId` if two descriptors share an id, or `EmptyId`
    /// if a descriptor has an empty id. Duplicate ids would break the
    /// one-channel-per-clip guarantee downstream, so they are rejected here
    /// at the configuration boundary.
    pub fn new(clips: Vec<ClipDescriptor>) -> Result<Self> {
        let mut index = HashMap::with_capacity(clips.len());

        for (position, clip) in clips.iter().enumerate() {
            if clip.id.is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if index.insert(clip.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId {
                    id: clip.id.clone(),
                });
            }
        }

        Ok(Self { clips, index })
    }

    /// Build a catalog from a JSON array of descriptors
    pub fn from_json_str(document: &str) -> Result<Self> {
        let clips: Vec<ClipDescriptor> = serde_json::from_str(document)?;
        Self::new(clips)
    }

    /// Build a catalog from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let document = std::fs::read_to_string(path)?;
        Self::from_json_str(&document)
    }

    /// Look up a clip by id
    pub fn get(&self, id: &str) -> Result<&ClipDescriptor> {
        self.index
            .get(id)
            .map(|&position| &self.clips[position])
            .ok_or_else(|| CatalogError::not_found(id))
    }

    /// Check whether an id exists in the catalog
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All clips, in declaration order
    pub fn list(&self) -> &[ClipDescriptor] {
        &self.clips
    }

    /// Iterate over clips in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, ClipDescriptor> {
        self.clips.iter()
    }

    /// Number of clips in the catalog
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

impl<'a> IntoIterator for &'a ClipCatalog {
    type Item = &'a ClipDescriptor;
    type IntoIter = std::slice::Iter<'a, ClipDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.clips.iter()
    }
}
