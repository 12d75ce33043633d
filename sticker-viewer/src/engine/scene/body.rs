use bevy::prelude::*;
use bevy::render::mesh::MeshAabb;

use catalog::bodies::{BODIES, BodyDescriptor};
use catalog::viewer_settings::{DEFAULT_SKIN_COLOR, SKIN_PRESETS};

use crate::tools::decal_manager::interactions::RebuildDecalsEvent;

/// Which catalog body is currently mounted.
#[derive(Resource, Default)]
pub struct SelectedBody {
    pub index: usize,
}

/// Which skin tone preset is applied to the shared skin material.
#[derive(Resource, Default)]
pub struct SkinTone {
    pub preset: usize,
}

/// Derived layout of the mounted body: the uniform fit applied to normalise
/// the model to unit height, and whether submesh indexing has completed for
/// the current mount.
#[derive(Resource)]
pub struct BodyLayout {
    pub fit_scale: f32,
    pub indexed: bool,
}

impl Default for BodyLayout {
    fn default() -> Self {
        Self {
            fit_scale: 1.0,
            indexed: false,
        }
    }
}

/// Root entity of the mounted body scene.
#[derive(Component)]
pub struct BodyRoot;

/// Stable index of one raycastable submesh under the body root. Indices are
/// assigned in descendant-iteration order, which follows the submesh order
/// of the source model file.
#[derive(Component)]
pub struct BodySubmesh(pub usize);

/// The one skin material shared by every submesh, so a tone change is a
/// single asset edit.
#[derive(Resource)]
pub struct SkinMaterial(pub Handle<StandardMaterial>);

impl FromWorld for SkinMaterial {
    fn from_world(world: &mut World) -> Self {
        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        Self(materials.add(StandardMaterial {
            base_color: DEFAULT_SKIN_COLOR,
            perceptual_roughness: 0.75,
            metallic: 0.0,
            ..default()
        }))
    }
}

fn spawn_body_scene(commands: &mut Commands, asset_server: &AssetServer, body: &BodyDescriptor) {
    commands.spawn((
        BodyRoot,
        Name::new(format!("Body:{}", body.id)),
        SceneRoot(asset_server.load(body.asset_path())),
        Transform::default(),
        Visibility::default(),
    ));
    info!("Mounting body '{}'", body.name);
}

/// Mounts the initially selected body when the viewer scene comes up.
pub fn mount_body(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    selected: Res<SelectedBody>,
    mut layout: ResMut<BodyLayout>,
) {
    let body = &BODIES[selected.index % BODIES.len()];
    *layout = BodyLayout::default();
    spawn_body_scene(&mut commands, &asset_server, body);
}

/// Swaps the mounted scene when the body selection changes. Placed decals are
/// left untouched; they re-attach by submesh index on the new body once it is
/// indexed.
pub fn respawn_body_on_selection(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    selected: Res<SelectedBody>,
    mut layout: ResMut<BodyLayout>,
    roots: Query<Entity, With<BodyRoot>>,
) {
    if !selected.is_changed() || selected.is_added() {
        return;
    }
    for entity in &roots {
        commands.entity(entity).despawn();
    }
    let body = &BODIES[selected.index % BODIES.len()];
    *layout = BodyLayout::default();
    spawn_body_scene(&mut commands, &asset_server, body);
}

/// Walks the instantiated body scene once per mount: tags each mesh entity
/// with its submesh index, swaps in the shared skin material, and fits the
/// root so the whole model is unit-sized and centred at the origin.
pub fn index_body_submeshes(
    mut commands: Commands,
    mut layout: ResMut<BodyLayout>,
    selected: Res<SelectedBody>,
    roots: Query<Entity, With<BodyRoot>>,
    children: Query<&Children>,
    mesh_entities: Query<&Mesh3d>,
    meshes: Res<Assets<Mesh>>,
    skin: Res<SkinMaterial>,
    mut rebuilds: EventWriter<RebuildDecalsEvent>,
) {
    if layout.indexed {
        return;
    }
    let Ok(root) = roots.single() else {
        return;
    };

    let mut index = 0usize;
    let mut min = Vec3::MAX;
    let mut max = Vec3::MIN;
    for entity in children.iter_descendants(root) {
        let Ok(mesh3d) = mesh_entities.get(entity) else {
            continue;
        };
        let Some(mesh) = meshes.get(&mesh3d.0) else {
            continue;
        };
        if let Some(aabb) = mesh.compute_aabb() {
            min = min.min(Vec3::from(aabb.min()));
            max = max.max(Vec3::from(aabb.max()));
        }
        commands
            .entity(entity)
            .insert((BodySubmesh(index), MeshMaterial3d(skin.0.clone())));
        index += 1;
    }
    if index == 0 {
        // Scene not instantiated yet; try again next frame.
        return;
    }

    let size = max - min;
    let max_dim = size.x.max(size.y).max(size.z);
    let fit = if max_dim.is_finite() && max_dim > f32::EPSILON {
        1.0 / max_dim
    } else {
        1.0
    };
    let center = (min + max) * 0.5;

    let body = &BODIES[selected.index % BODIES.len()];
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        body.rotation[0],
        body.rotation[1],
        body.rotation[2],
    );
    commands.entity(root).insert(Transform {
        translation: -(rotation * (center * fit)),
        rotation,
        scale: Vec3::splat(fit),
    });

    layout.fit_scale = fit;
    layout.indexed = true;
    rebuilds.write(RebuildDecalsEvent);
    info!("Body '{}' indexed: {} submeshes, fit {:.4}", body.name, index, fit);
}

/// Applies the selected tone preset to the shared skin material.
pub fn apply_skin_tone(
    tone: Res<SkinTone>,
    skin: Res<SkinMaterial>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !tone.is_changed() || tone.is_added() {
        return;
    }
    let Some(material) = materials.get_mut(&skin.0) else {
        return;
    };
    material.base_color = SKIN_PRESETS[tone.preset % SKIN_PRESETS.len()];
}
