//! skinsticker.xyz viewer: place flash designs on a 3D body, move and edit
//! them, and capture the result.

mod engine;
mod tools;

use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_obj::ObjPlugin;

use catalog::viewer_settings::{CAMERA_FOV_DEGREES, LOAD_CAMERA};

use engine::camera::{CameraResetEvent, OrbitCamera, camera_controller, handle_camera_reset};
use engine::capture::{CaptureGallery, CaptureRequestEvent, handle_capture_requests};
use engine::core::app_stage::{
    AppStage, FirstFrameGate, confirm_first_frame, reset_first_frame_gate,
};
use engine::loading::enter_screen::{
    enter_button_interaction, reflect_enter_button_label, reflect_preload_progress,
    run_reveal_sequence, spawn_enter_screen, start_reveal,
};
use engine::loading::preload::{
    CurrentDownload, PreloadedAssets, begin_preload_run, pump_preload_queue,
};
use engine::loading::progress::PreloadProgress;
use engine::scene::body::{
    BodyLayout, SelectedBody, SkinMaterial, SkinTone, apply_skin_tone, index_body_submeshes,
    mount_body, respawn_body_on_selection,
};
use engine::scene::environment::{
    SelectedBackground, mount_background, swap_background_on_selection,
};
use tools::decal_manager::DecalManagerPlugin;

fn main() {
    create_app().run();
}

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "skinsticker.xyz".into(),
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                meta_check: AssetMetaCheck::Never,
                ..default()
            }),
    )
    .add_plugins(ObjPlugin)
    .init_state::<AppStage>()
    .init_resource::<OrbitCamera>()
    .init_resource::<PreloadProgress>()
    .init_resource::<CurrentDownload>()
    .init_resource::<PreloadedAssets>()
    .init_resource::<FirstFrameGate>()
    .init_resource::<SelectedBody>()
    .init_resource::<SelectedBackground>()
    .init_resource::<SkinTone>()
    .init_resource::<BodyLayout>()
    .init_resource::<SkinMaterial>()
    .init_resource::<CaptureGallery>()
    .add_event::<CameraResetEvent>()
    .add_event::<CaptureRequestEvent>()
    .add_plugins(DecalManagerPlugin)
    // Enter screen lifecycle.
    .add_systems(Startup, spawn_enter_screen)
    .add_systems(
        Update,
        (
            enter_button_interaction.run_if(in_state(AppStage::NotStarted)),
            reflect_enter_button_label,
            reflect_preload_progress,
        ),
    )
    // Sequential preload.
    .add_systems(OnEnter(AppStage::Preloading), begin_preload_run)
    .add_systems(
        Update,
        pump_preload_queue.run_if(in_state(AppStage::Preloading)),
    )
    // Viewer mounts behind the enter screen, then the reveal uncovers it.
    .add_systems(
        OnEnter(AppStage::AwaitingFirstFrame),
        (
            mount_viewer_scene,
            mount_body,
            mount_background,
            reset_first_frame_gate,
        ),
    )
    .add_systems(
        Update,
        (index_body_submeshes, confirm_first_frame)
            .chain()
            .run_if(in_state(AppStage::AwaitingFirstFrame)),
    )
    .add_systems(OnEnter(AppStage::Revealing), start_reveal)
    .add_systems(
        Update,
        run_reveal_sequence.run_if(in_state(AppStage::Revealing)),
    )
    // Interactive viewer.
    .add_systems(
        Update,
        (
            camera_controller,
            handle_camera_reset,
            respawn_body_on_selection,
            index_body_submeshes,
            apply_skin_tone,
            swap_background_on_selection,
            handle_capture_requests,
        )
            .run_if(in_state(AppStage::Entered)),
    );

    app
}

// Camera and lighting for the viewer scene
fn mount_viewer_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(LOAD_CAMERA.position).looking_at(LOAD_CAMERA.target, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(2.0, 4.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });

    info!("Viewer scene mounted");
}
