use bevy::prelude::*;

use catalog::viewer_settings::FIRST_FRAME_CONFIRM_PASSES;

use crate::engine::loading::progress::PreloadProgress;
use crate::engine::loading::reveal::RevealSequence;
use crate::engine::scene::body::BodySubmesh;

/// Staged entry sequence, one direction only. The single backwards edge is
/// `Preloading -> NotStarted` on a failed preload run (log retained for the
/// manual retry).
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppStage {
    #[default]
    NotStarted,
    Preloading,
    AwaitingFirstFrame,
    Revealing,
    Entered,
}

/// Counts Update passes completed while the body scene is mounted. The first
/// pass after a scene spawn can present a half-initialised frame, so the
/// reveal waits for `FIRST_FRAME_CONFIRM_PASSES` full passes.
#[derive(Resource, Default)]
pub struct FirstFrameGate {
    pub passes: u32,
}

pub fn reset_first_frame_gate(mut gate: ResMut<FirstFrameGate>) {
    gate.passes = 0;
}

// Two-pass confirmation before the reveal sequence starts
pub fn confirm_first_frame(
    mut gate: ResMut<FirstFrameGate>,
    submeshes: Query<(), With<BodySubmesh>>,
    mut progress: ResMut<PreloadProgress>,
    mut commands: Commands,
    mut next_stage: ResMut<NextState<AppStage>>,
) {
    if submeshes.is_empty() {
        gate.passes = 0;
        return;
    }

    gate.passes += 1;
    if gate.passes < FIRST_FRAME_CONFIRM_PASSES {
        return;
    }

    progress.push_log("First 3D frame ready. Entering app...");
    info!("First frame confirmed after {} passes", gate.passes);
    commands.insert_resource(RevealSequence::standard());
    next_stage.set(AppStage::Revealing);
}
