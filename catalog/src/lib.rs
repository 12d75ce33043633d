//! Static asset catalog and shared viewer constants.
//!
//! Everything here is defined at process start and never mutated: the
//! selectable bodies, sticker designs and background panoramas, the
//! aspect-ratio correction tables for legacy sticker art, and the tuning
//! constants the viewer reads (camera presets, decal offsets, reveal
//! timings).

/// Background panorama descriptors under the `bgs` asset root.
pub mod backgrounds;

/// Body mesh descriptors under the `models` asset root.
pub mod bodies;

/// Aspect-ratio correction table for non-square legacy sticker art.
pub mod corrections;

/// Sticker design descriptors under the `tattoos` asset root.
pub mod stickers;

/// Camera presets, decal constants and reveal-sequence timings.
pub mod viewer_settings;

pub use backgrounds::{BACKGROUNDS, BGS_ROOT, BackgroundDescriptor, DEFAULT_BACKGROUND_ID};
pub use bodies::{BODIES, BodyDescriptor, MODELS_ROOT};
pub use corrections::correction_for;
pub use stickers::{STICKERS, StickerDescriptor, TATTOOS_ROOT};
