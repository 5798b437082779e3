//! Voice asset matching.
//!
//! A voice directory holds one audio file per recorded line plus a
//! same-named transcript sidecar:
//!
//! ```text
//! Voice/
//!   001_こんにちは.wav
//!   001_こんにちは.txt   ← "こんにちは" (Shift_JIS)
//! ```
//!
//! [`build_index`] scans the directory into an [`AssetIndex`] keyed by
//! transcript text, [`match_captions`] binds captions whose body equals a
//! transcript exactly, and [`plan_insertions`] turns the bindings into
//! timeline positions.  Nothing here mutates the timeline.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use caption_voice::assets::{build_index, match_captions, AssetLayout, FsAssetLoader};
//! use caption_voice::config::AssetConfig;
//!
//! let layout = AssetLayout::from_config(&AssetConfig::default()).unwrap();
//! let result = build_index(&FsAssetLoader, Path::new("Voice"), &layout).unwrap();
//! let matches = match_captions(&[], &result.index);
//! assert!(matches.is_empty());
//! ```

pub mod index;
pub mod loader;
pub mod matcher;

pub use index::{build_index, AssetDiagnostic, AssetIndex, AssetLayout, AssetPair, IndexResult};
pub use loader::{AssetError, AssetLoader, FsAssetLoader};
pub use matcher::{match_captions, plan_insertions, AssetBinding, InsertionPlanItem, MatchResult};
