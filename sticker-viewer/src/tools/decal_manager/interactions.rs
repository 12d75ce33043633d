use std::collections::HashMap;

use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use catalog::viewer_settings::PREVIEW_DECAL_OPACITY;

use crate::engine::camera::OrbitCamera;
use crate::engine::scene::body::{BodyLayout, BodySubmesh};
use crate::tools::decal_manager::correction::decal_scale;
use crate::tools::decal_manager::placement::resolve_placement;
use crate::tools::decal_manager::state::{
    DecalIdAllocator, InteractionMode, OpenPanels, PlacedDecals,
};

/// Fired whenever the set of visible decals changed and the quad entities
/// must be resynchronised.
#[derive(Event)]
pub struct RebuildDecalsEvent;

/// Fired by a decal panel's remove button.
#[derive(Event)]
pub struct RemoveDecalEvent(pub String);

/// Marker on every spawned decal quad; the rebuild clears these wholesale.
#[derive(Component)]
pub struct DecalVisual;

/// Unit quad shared by every decal; per-decal size lives in the transform.
#[derive(Resource)]
pub struct DecalQuad(pub Handle<Mesh>);

impl FromWorld for DecalQuad {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        Self(meshes.add(Rectangle::new(1.0, 1.0)))
    }
}

/// Material cache keyed by design path, one entry for committed decals and
/// one for the translucent preview, so dragging does not mint a material
/// per frame.
#[derive(Resource, Default)]
pub struct DecalMaterials {
    committed: HashMap<String, Handle<StandardMaterial>>,
    preview: HashMap<String, Handle<StandardMaterial>>,
}

impl DecalMaterials {
    fn get_or_create(
        &mut self,
        materials: &mut Assets<StandardMaterial>,
        asset_server: &AssetServer,
        path: &str,
        preview: bool,
    ) -> Handle<StandardMaterial> {
        let cache = if preview {
            &mut self.preview
        } else {
            &mut self.committed
        };
        cache
            .entry(path.to_string())
            .or_insert_with(|| {
                let alpha = if preview { PREVIEW_DECAL_OPACITY } else { 1.0 };
                materials.add(StandardMaterial {
                    base_color: Color::srgba(1.0, 1.0, 1.0, alpha),
                    base_color_texture: Some(asset_server.load(path.to_string())),
                    alpha_mode: AlphaMode::Blend,
                    unlit: true,
                    cull_mode: None,
                    double_sided: true,
                    ..default()
                })
            })
            .clone()
    }
}

/// Drags the in-flight draft across the body and commits it on release.
///
/// Raycasts the cursor against tagged body submeshes only. The commit fires
/// solely on a release over a submesh; a release anywhere else (including
/// the release of the grid click that started the placement) leaves the
/// mode in flight.
pub fn update_active_draft(
    mut ray_cast: MeshRayCast,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    submeshes: Query<&BodySubmesh>,
    transforms: Query<&GlobalTransform>,
    mut mode: ResMut<InteractionMode>,
    mut allocator: ResMut<DecalIdAllocator>,
    mut decals: ResMut<PlacedDecals>,
    mut panels: ResMut<OpenPanels>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut rebuilds: EventWriter<RebuildDecalsEvent>,
) {
    if !mode.is_interactive() {
        return;
    }
    let Ok(window) = windows.single() else { return };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };

    let filter = |entity: Entity| submeshes.contains(entity);
    let settings = MeshRayCastSettings::default()
        .with_filter(&filter)
        .always_early_exit();

    if let Some((entity, hit)) = ray_cast.cast_ray(ray, &settings).first() {
        let Ok(submesh) = submeshes.get(*entity) else {
            return;
        };
        let Ok(world_from_local) = transforms.get(*entity) else {
            return;
        };
        let placement = resolve_placement(
            hit.point,
            Some(hit.normal),
            *ray.direction,
            world_from_local,
            submesh.0,
        );
        mode.apply_placement(&placement);
        rebuilds.write(RebuildDecalsEvent);

        if mouse.just_released(MouseButton::Left) {
            if let Some(id) = mode.commit(&mut allocator, &mut decals) {
                panels.open_exclusive(&id);
                info!("Decal committed: {id}");
            }
            rebuilds.write(RebuildDecalsEvent);
        }
    }
}

/// Escape abandons the in-flight placement or move.
pub fn cancel_on_escape(
    keys: Res<ButtonInput<KeyCode>>,
    mut mode: ResMut<InteractionMode>,
    mut rebuilds: EventWriter<RebuildDecalsEvent>,
) {
    if keys.just_pressed(KeyCode::Escape) && mode.is_interactive() {
        mode.cancel();
        rebuilds.write(RebuildDecalsEvent);
        info!("Placement cancelled");
    }
}

/// Hands the pointer back and forth between decal dragging and the orbit
/// camera.
pub fn sync_orbit_lock(mode: Res<InteractionMode>, mut orbit: ResMut<OrbitCamera>) {
    let enabled = !mode.is_interactive();
    if orbit.enabled != enabled {
        orbit.enabled = enabled;
    }
}

/// Applies remove requests and tidies every structure that may still point
/// at the removed decal.
pub fn handle_decal_removal(
    mut events: EventReader<RemoveDecalEvent>,
    mut decals: ResMut<PlacedDecals>,
    mut mode: ResMut<InteractionMode>,
    mut panels: ResMut<OpenPanels>,
    mut rebuilds: EventWriter<RebuildDecalsEvent>,
) {
    for RemoveDecalEvent(id) in events.read() {
        if decals.remove(id) {
            mode.on_decal_removed(id);
            panels.close(id);
            rebuilds.write(RebuildDecalsEvent);
            info!("Decal removed: {id}");
        }
    }
}

/// Tears down and respawns every decal quad from the committed list plus
/// the in-flight preview. Decals whose submesh index does not exist on the
/// current body are skipped, not dropped; they come back when a body with
/// enough submeshes is mounted.
pub fn rebuild_decals_on_event(
    mut events: EventReader<RebuildDecalsEvent>,
    mut commands: Commands,
    existing: Query<Entity, With<DecalVisual>>,
    submeshes: Query<(Entity, &BodySubmesh)>,
    decals: Res<PlacedDecals>,
    mode: Res<InteractionMode>,
    layout: Res<BodyLayout>,
    quad: Res<DecalQuad>,
    mut cache: ResMut<DecalMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let submesh_by_index: HashMap<usize, Entity> =
        submeshes.iter().map(|(entity, s)| (s.0, entity)).collect();

    for decal in &decals.decals {
        if mode.hidden_decal_id() == Some(decal.id.as_str()) {
            continue;
        }
        let Some(&parent) = submesh_by_index.get(&decal.mesh_index) else {
            continue;
        };
        let material = cache.get_or_create(&mut materials, &asset_server, &decal.path, false);
        spawn_decal_quad(
            &mut commands,
            &quad,
            material,
            parent,
            decal.local_position,
            decal.local_rotation,
            decal_scale(&decal.path, decal.scale, decal.mirrored, layout.fit_scale),
        );
    }

    let Some(draft) = mode.active_draft() else {
        return;
    };
    let Some(mesh_index) = draft.mesh_index else {
        return;
    };
    let Some(&parent) = submesh_by_index.get(&mesh_index) else {
        return;
    };
    let material = cache.get_or_create(&mut materials, &asset_server, &draft.path, true);
    spawn_decal_quad(
        &mut commands,
        &quad,
        material,
        parent,
        draft.local_position,
        draft.local_rotation,
        decal_scale(&draft.path, draft.scale, draft.mirrored, layout.fit_scale),
    );
}

fn spawn_decal_quad(
    commands: &mut Commands,
    quad: &DecalQuad,
    material: Handle<StandardMaterial>,
    parent: Entity,
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
) {
    commands.spawn((
        DecalVisual,
        Mesh3d(quad.0.clone()),
        MeshMaterial3d(material),
        Transform {
            translation: position,
            rotation: Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z),
            scale,
        },
        ChildOf(parent),
    ));
}
