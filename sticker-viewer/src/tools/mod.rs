//! Interactive tools layered on the viewer.

/// Decal placement, moving, editing, and the side panel.
pub mod decal_manager;
