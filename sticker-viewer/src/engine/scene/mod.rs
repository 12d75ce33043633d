//! The viewer scene: mounted body model and background panorama.
//!
//! The body loads as a multi-submesh scene; each submesh is tagged with a
//! stable index so placed decals can name the surface they sit on. The root
//! is uniformly fitted and centred so every model presents at the same size
//! regardless of its authored units.

/// Body mounting, submesh indexing, fit transform, and skin tones.
pub mod body;

/// Panorama dome and background selection.
pub mod environment;
