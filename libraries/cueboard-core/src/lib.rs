//! Cueboard Core
//!
//! Catalog types and error handling for Cueboard, a soundboard playback
//! engine. This crate is the leaf of the workspace: it knows nothing about
//! audio devices or playback state, only about *which clips exist*.
//!
//! # Architecture
//!
//! - **`ClipDescriptor`**: immutable metadata for one clip (id, display
//!   name, asset path, loop flag).
//! - **`ClipCatalog`**: the ordered, immutable set of descriptors supplied
//!   once at startup, either in code or from a JSON document.
//! - **Error Handling**: `CatalogError` and `Result` types.
//!
//! # Example
//!
//! ```rust
//! use cueboard_core::{ClipCatalog, ClipDescriptor};
//! use std::path::PathBuf;
//!
//! let catalog = ClipCatalog::new(vec![
//!     ClipDescriptor::new("boom", "Explosão", PathBuf::from("/sounds/boom.mp3")),
//!     ClipDescriptor::new("horn", "Corneta", PathBuf::from("/sounds/corneta.mp3")),
//! ])
//! .unwrap();
//!
//! assert_eq!(catalog.get("boom").unwrap().display_name, "Explosão");
//! assert_eq!(catalog.list().len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use catalog::ClipCatalog;
pub use error::{CatalogError, Result};
pub use types::ClipDescriptor;
