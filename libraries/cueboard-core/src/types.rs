//! Clip descriptor type

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata for one clip in the catalog
///
/// Descriptors are created once at startup and never mutated. The id is the
/// key every playback operation uses; the asset path is resolved by the host
/// audio facility the first time the clip is toggled on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipDescriptor {
    /// Unique clip identifier
    pub id: String,

    /// Human-readable name for the UI button
    pub display_name: String,

    /// Path to the audio asset
    pub asset_path: PathBuf,

    /// Whether the clip loops continuously while playing (default: true)
    ///
    /// A non-looping clip plays once and returns to idle on its own; a
    /// looping clip plays until it is explicitly toggled off.
    #[serde(default = "default_looped")]
    pub looped: bool,
}

fn default_looped() -> bool {
    true
}

impl ClipDescriptor {
    /// Create a looping clip descriptor
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        asset_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            asset_path: asset_path.into(),
            looped: true,
        }
    }

    /// Create a play-once clip descriptor
    ///
    /// The clip stops and returns to idle when it reaches its natural end.
    pub fn one_shot(
        id: impl Into<String>,
        display_name: impl Into<String>,
        asset_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            looped: false,
            ..Self::new(id, display_name, asset_path)
        }
    }
}
