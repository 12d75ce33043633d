//! Orbit camera for the viewer.

/// Orbit camera resource, controller system, and the Center reset event.
pub mod orbit_camera;

pub use orbit_camera::{CameraResetEvent, OrbitCamera, camera_controller, handle_camera_reset};
