//! Viewer engine: staged entry, asset preloading, scene mounting, camera,
//! and still-frame capture.

/// Orbit camera and the Center reset.
pub mod camera;

/// Screenshot capture and the on-disk gallery index.
pub mod capture;

/// App stage state machine and first-frame confirmation.
pub mod core;

/// Sequential preload queue, progress log, and the reveal transition.
pub mod loading;

/// Body model and background panorama.
pub mod scene;
