use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use catalog::viewer_settings::{
    CENTER_CAMERA, CameraPreset, LOAD_CAMERA, MAX_ORBIT_DISTANCE, MIN_ORBIT_DISTANCE,
};

/// Orbit camera state around a focus target. `enabled` is cleared while a
/// decal placement or move is in progress so drags raycast against the body
/// instead of orbiting.
#[derive(Resource)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub enabled: bool,
}

impl OrbitCamera {
    pub fn from_preset(preset: CameraPreset) -> Self {
        let offset = preset.position - preset.target;
        let distance = offset.length().max(MIN_ORBIT_DISTANCE);
        Self {
            target: preset.target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            enabled: true,
        }
    }

    pub fn snap_to(&mut self, preset: CameraPreset) {
        let fresh = Self::from_preset(preset);
        self.target = fresh.target;
        self.yaw = fresh.yaw;
        self.pitch = fresh.pitch;
        self.distance = fresh.distance;
    }

    pub fn eye(&self) -> Vec3 {
        let dir = Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        );
        self.target + dir * self.distance
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_preset(LOAD_CAMERA)
    }
}

/// Fired by the "Center" action; snaps the orbit back to the centre preset.
#[derive(Event)]
pub struct CameraResetEvent;

pub fn handle_camera_reset(
    mut events: EventReader<CameraResetEvent>,
    mut orbit: ResMut<OrbitCamera>,
) {
    for _ in events.read() {
        orbit.snap_to(CENTER_CAMERA);
    }
}

// Drag to orbit, wheel to dolly, right-drag to pan; lerped like the viewport
pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y * 1.0,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }

    if orbit.enabled {
        // Left drag orbits around the focus target.
        if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
            let yaw_sens = 0.005;
            let pitch_sens = 0.004;
            orbit.yaw -= mouse_delta.x * yaw_sens;
            orbit.pitch += mouse_delta.y * pitch_sens;
            // Upper hemisphere only, matching the viewer's polar clamp.
            orbit.pitch = orbit.pitch.clamp(0.0, 1.55);
        }

        // Right drag pans the focus target in the view plane.
        if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
            let view_rot = Quat::from_euler(EulerRot::YXZ, orbit.yaw, -orbit.pitch, 0.0);
            let right = view_rot * Vec3::X;
            let up = view_rot * Vec3::Y;
            let pan_speed = orbit.distance * 0.0015;
            let delta = (-right * mouse_delta.x + up * mouse_delta.y) * pan_speed;
            orbit.target += delta;
        }

        if scroll_accum.abs() > f32::EPSILON {
            let dolly = (orbit.distance * 0.15).max(0.02);
            orbit.distance =
                (orbit.distance - scroll_accum * dolly).clamp(MIN_ORBIT_DISTANCE, MAX_ORBIT_DISTANCE);
        }
    }

    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let target_pos = orbit.eye();
    let target_rot = Transform::from_translation(target_pos)
        .looking_at(orbit.target, Vec3::Y)
        .rotation;

    let lerp_speed = (12.0 * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(target_pos, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target_rot, lerp_speed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_round_trips_through_spherical_coordinates() {
        let orbit = OrbitCamera::from_preset(CENTER_CAMERA);
        let eye = orbit.eye();
        assert!((eye - CENTER_CAMERA.position).length() < 1e-4);
    }

    #[test]
    fn snap_to_overwrites_pose_but_not_enabled_flag() {
        let mut orbit = OrbitCamera::from_preset(LOAD_CAMERA);
        orbit.enabled = false;
        orbit.snap_to(CENTER_CAMERA);
        assert!(!orbit.enabled);
        assert!((orbit.eye() - CENTER_CAMERA.position).length() < 1e-4);
    }
}
