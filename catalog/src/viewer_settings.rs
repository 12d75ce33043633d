use bevy::prelude::*;

/// Camera pose preset (world-space position plus orbit target).
#[derive(Clone, Copy)]
pub struct CameraPreset {
    pub position: Vec3,
    pub target: Vec3,
}

/// Pose the camera starts in when the viewer mounts.
pub const LOAD_CAMERA: CameraPreset = CameraPreset {
    position: Vec3::new(-1.0, 0.0, -1.1),
    target: Vec3::new(0.0, 0.05, 0.0),
};

/// Pose the "Center" action snaps to.
pub const CENTER_CAMERA: CameraPreset = CameraPreset {
    position: Vec3::new(0.0, 0.25, 1.5),
    target: Vec3::new(0.0, 0.05, 0.0),
};

pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const MIN_ORBIT_DISTANCE: f32 = 0.3;
pub const MAX_ORBIT_DISTANCE: f32 = 500.0;

/// Offset along the surface normal keeping decals clear of the surface.
pub const DECAL_SURFACE_OFFSET: f32 = 0.002;

pub const DEFAULT_DECAL_SCALE: f32 = 0.06;
pub const DECAL_SCALE_MIN: f32 = 0.01;
pub const DECAL_SCALE_MAX: f32 = 0.4;
pub const DECAL_SCALE_STEP: f32 = 0.01;
pub const DECAL_ROTATE_STEP_DEGREES: f32 = 15.0;

/// Opacity of the half-transparent drag preview while placing or moving.
pub const PREVIEW_DECAL_OPACITY: f32 = 0.45;

/// Update passes that must complete after the scene mounts before the
/// first frame counts as visually complete.
pub const FIRST_FRAME_CONFIRM_PASSES: u32 = 2;

pub const REVEAL_FADE_DELAY_MS: u64 = 160;
pub const REVEAL_FADE_DURATION_MS: u64 = 950;

pub const DEFAULT_SKIN_COLOR: Color = Color::srgb(0.631, 0.416, 0.373);

/// Skin tones the colour selector cycles through, starting at the default.
pub const SKIN_PRESETS: &[Color] = &[
    DEFAULT_SKIN_COLOR,
    Color::srgb(0.945, 0.800, 0.686),
    Color::srgb(0.796, 0.600, 0.459),
    Color::srgb(0.467, 0.302, 0.231),
    Color::srgb(0.275, 0.173, 0.137),
    Color::srgb(1.0, 0.412, 0.706),
];
