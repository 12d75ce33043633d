use bevy::prelude::*;

use catalog::viewer_settings::DECAL_SURFACE_OFFSET;

/// Pose a raycast hit resolves to, expressed in the hit submesh's local
/// space so it survives body refits and camera motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecalPlacement {
    pub mesh_index: usize,
    pub local_position: Vec3,
    pub local_rotation: Vec3,
}

/// Turns a world-space surface hit into a local decal pose.
///
/// The surface normal is flipped when it faces away from the viewer (the
/// ray), then both point and normal are carried into the submesh's local
/// space; the surface offset and the XYZ Euler rotation that carries the
/// decal's +Z onto the normal are derived there, so a rotated or scaled
/// body root cannot skew the rendered facing. Pure in its inputs; the
/// same hit always yields the same pose.
pub fn resolve_placement(
    hit_point: Vec3,
    hit_normal: Option<Vec3>,
    ray_direction: Vec3,
    world_from_local: &GlobalTransform,
    mesh_index: usize,
) -> DecalPlacement {
    let local_from_world = world_from_local.affine().inverse();

    let local_normal = hit_normal
        .and_then(|n| n.try_normalize())
        .map(|n| if n.dot(ray_direction) > 0.0 { -n } else { n })
        .map(|n| local_from_world.transform_vector3(n))
        .and_then(|n| n.try_normalize())
        .unwrap_or(Vec3::Z);

    let local_position =
        local_from_world.transform_point3(hit_point) + local_normal * DECAL_SURFACE_OFFSET;

    let orient = Quat::from_rotation_arc(Vec3::Z, local_normal);
    let (x, y, z) = orient.to_euler(EulerRot::XYZ);

    DecalPlacement {
        mesh_index,
        local_position,
        local_rotation: Vec3::new(x, y, z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identical_hits_resolve_to_identical_poses() {
        let transform = GlobalTransform::from(Transform {
            translation: Vec3::new(0.2, -0.1, 0.4),
            rotation: Quat::from_rotation_y(0.7),
            scale: Vec3::splat(0.01),
        });
        let a = resolve_placement(
            Vec3::new(0.1, 0.5, 0.2),
            Some(Vec3::new(0.3, 0.1, 0.9)),
            Vec3::new(0.0, 0.0, -1.0),
            &transform,
            3,
        );
        let b = resolve_placement(
            Vec3::new(0.1, 0.5, 0.2),
            Some(Vec3::new(0.3, 0.1, 0.9)),
            Vec3::new(0.0, 0.0, -1.0),
            &transform,
            3,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn normal_is_flipped_towards_the_viewer() {
        let identity = GlobalTransform::IDENTITY;
        // Normal pointing the same way as the ray means a back face.
        let placement = resolve_placement(Vec3::ZERO, Some(Vec3::Z), Vec3::Z, &identity, 0);
        // The offset follows the flipped normal, so the pose sits at -Z.
        assert!(placement.local_position.z < 0.0);
    }

    #[test]
    fn pose_lands_in_submesh_local_space() {
        let transform = GlobalTransform::from(Transform {
            translation: Vec3::new(1.0, 0.0, 0.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(2.0),
        });
        let placement = resolve_placement(
            Vec3::new(2.0, 0.0, 0.0),
            Some(Vec3::Y),
            Vec3::new(0.0, -1.0, 0.0),
            &transform,
            1,
        );
        // World (2,0,0) under translate(1)+scale(2) is local (0.5, ..).
        assert!((placement.local_position.x - 0.5).abs() < 1e-5);
        assert_eq!(placement.mesh_index, 1);
    }

    #[test]
    fn rendered_facing_survives_a_rotated_parent() {
        // The body root carries an orientation correction, so the submesh's
        // global rotation is not identity. Re-composing parent * local must
        // still face the world-space surface normal.
        let parent_rotation = Quat::from_rotation_x(-FRAC_PI_2);
        let transform = GlobalTransform::from(Transform::from_rotation(parent_rotation));

        let placement = resolve_placement(
            Vec3::new(0.0, 1.0, 0.0),
            Some(Vec3::Y),
            Vec3::new(0.0, -1.0, 0.0),
            &transform,
            0,
        );

        let local = Quat::from_euler(
            EulerRot::XYZ,
            placement.local_rotation.x,
            placement.local_rotation.y,
            placement.local_rotation.z,
        );
        let facing = parent_rotation * (local * Vec3::Z);
        assert!((facing - Vec3::Y).length() < 1e-4, "decal faces {facing}");

        // The offset is along the surface too, not along the parent's axes.
        let world_position = transform.affine().transform_point3(placement.local_position);
        assert!((world_position - Vec3::new(0.0, 1.002, 0.0)).length() < 1e-4);
    }

    #[test]
    fn missing_normal_falls_back_to_the_local_surface() {
        let placement = resolve_placement(
            Vec3::ZERO,
            None,
            Vec3::new(0.0, 0.0, -1.0),
            &GlobalTransform::IDENTITY,
            0,
        );
        // Fallback is local +Z: no rotation, offset straight out.
        assert!(placement.local_rotation.length() < 1e-5);
        assert!(placement.local_position.z > 0.0);
    }
}
