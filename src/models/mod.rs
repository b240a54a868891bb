//! Data models for the keepsake TUI
//!
//! This module contains the core data structures:
//! - The media manifest types for loading manifest.json
//! - Per-screen surface state (selections, clocks, flags)
//! - Enums for state management
//!
pub mod enums;
pub mod manifest;
pub mod screen;

// Re-exports for convenient access
pub use enums::{MediaKind, Step};
pub use manifest::{ManifestError, MediaManifest, ResolvedMedia};
pub use screen::{
    GalleryState, LetterState, ProposalState, VideoPhase, VideoState, select_next, select_prev,
};
