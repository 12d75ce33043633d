use bevy::prelude::*;

use catalog::backgrounds::{BACKGROUNDS, DEFAULT_BACKGROUND_ID};

/// Which catalog background is shown on the dome.
#[derive(Resource)]
pub struct SelectedBackground {
    pub index: usize,
}

impl Default for SelectedBackground {
    fn default() -> Self {
        let index = BACKGROUNDS
            .iter()
            .position(|b| b.id == DEFAULT_BACKGROUND_ID)
            .unwrap_or(0);
        Self { index }
    }
}

/// Inward-facing panorama sphere surrounding the scene.
#[derive(Component)]
pub struct BackgroundDome;

/// Material the panorama texture is swapped on.
#[derive(Resource)]
pub struct DomeMaterial(pub Handle<StandardMaterial>);

fn panorama_texture(
    asset_server: &AssetServer,
    index: usize,
) -> Option<Handle<Image>> {
    let background = &BACKGROUNDS[index % BACKGROUNDS.len()];
    background.asset_path().map(|path| asset_server.load(path))
}

/// Spawns the dome with the selected panorama. Unlit and rendered on the
/// inside faces so it reads as a sky rather than a lit object.
pub fn mount_background(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    selected: Res<SelectedBackground>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let material = materials.add(StandardMaterial {
        base_color_texture: panorama_texture(&asset_server, selected.index),
        unlit: true,
        cull_mode: None,
        double_sided: true,
        ..default()
    });
    commands.spawn((
        BackgroundDome,
        Name::new("BackgroundDome"),
        Mesh3d(meshes.add(Sphere::new(60.0))),
        MeshMaterial3d(material.clone()),
        Transform::default(),
    ));
    commands.insert_resource(DomeMaterial(material));
}

/// Retextures the dome when the background selection changes.
pub fn swap_background_on_selection(
    asset_server: Res<AssetServer>,
    selected: Res<SelectedBackground>,
    dome: Option<Res<DomeMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !selected.is_changed() || selected.is_added() {
        return;
    }
    let Some(dome) = dome else { return };
    let Some(material) = materials.get_mut(&dome.0) else {
        return;
    };
    material.base_color_texture = panorama_texture(&asset_server, selected.index);
    let background = &BACKGROUNDS[selected.index % BACKGROUNDS.len()];
    info!("Background switched to '{}'", background.name);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_is_the_sky_panorama() {
        let selected = SelectedBackground::default();
        assert_eq!(BACKGROUNDS[selected.index].id, DEFAULT_BACKGROUND_ID);
    }
}
