use bevy::asset::{LoadState, UntypedHandle};
use bevy::prelude::*;
use thiserror::Error;

use catalog::{BACKGROUNDS, BODIES, BackgroundDescriptor, BodyDescriptor, STICKERS,
    StickerDescriptor};

use crate::engine::core::app_stage::AppStage;
use crate::engine::loading::progress::PreloadProgress;

/// Decoder family a preload task routes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    BodyMesh,
    StickerTexture,
    BackgroundPanorama,
}

/// One queued download. `label` is the human-readable form logged to the
/// enter screen; `path` is the asset-server path.
#[derive(Debug, Clone)]
pub struct PreloadTask {
    pub label: String,
    pub class: AssetClass,
    pub path: String,
}

#[derive(Error, Debug)]
pub enum PreloadError {
    #[error("Failed asset: {label}")]
    AssetFailed { label: String },
}

/// Flattens the three catalogs into one ordered queue: bodies, then
/// stickers, then backgrounds. Descriptors without a path are skipped.
pub fn build_preload_queue(
    bodies: &[BodyDescriptor],
    stickers: &[StickerDescriptor],
    backgrounds: &[BackgroundDescriptor],
) -> Vec<PreloadTask> {
    let mut tasks = Vec::new();
    for body in bodies {
        tasks.push(PreloadTask {
            label: format!("model /{}", body.asset_path()),
            class: AssetClass::BodyMesh,
            path: body.asset_path(),
        });
    }
    for sticker in stickers {
        if let Some(path) = sticker.asset_path() {
            tasks.push(PreloadTask {
                label: format!("sticker /{path}"),
                class: AssetClass::StickerTexture,
                path,
            });
        }
    }
    for background in backgrounds {
        if let Some(path) = background.asset_path() {
            tasks.push(PreloadTask {
                label: format!("background /{path}"),
                class: AssetClass::BackgroundPanorama,
                path,
            });
        }
    }
    tasks
}

/// Strictly sequential download queue. At most one task is in flight; the
/// next is not started until the current one reports loaded. A failure
/// aborts the remainder of the queue permanently (a retry builds a fresh
/// queue from the catalogs).
#[derive(Resource, Default)]
pub struct PreloadQueue {
    tasks: Vec<PreloadTask>,
    cursor: usize,
    in_flight: bool,
    aborted: bool,
}

impl PreloadQueue {
    pub fn new(tasks: Vec<PreloadTask>) -> Self {
        Self {
            tasks,
            cursor: 0,
            in_flight: false,
            aborted: false,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks finished and none failed.
    pub fn is_exhausted(&self) -> bool {
        !self.aborted && !self.in_flight && self.cursor >= self.tasks.len()
    }

    /// Starts the next task if none is in flight. Returns the task to hand
    /// to its decoder, or `None` when busy, aborted, or exhausted.
    pub fn start_next(&mut self, progress: &mut PreloadProgress) -> Option<&PreloadTask> {
        if self.in_flight || self.aborted {
            return None;
        }
        let task = self.tasks.get(self.cursor)?;
        self.in_flight = true;
        progress.push_log(&format!("Downloading {}...", task.label));
        Some(task)
    }

    /// Marks the in-flight task as loaded and advances the cursor.
    pub fn complete_current(&mut self, progress: &mut PreloadProgress) {
        if !self.in_flight {
            return;
        }
        let task = &self.tasks[self.cursor];
        progress.completed += 1;
        progress.push_log(&format!("Loaded {}", task.label));
        self.in_flight = false;
        self.cursor += 1;
    }

    /// Marks the in-flight task as failed and aborts the remaining queue.
    pub fn fail_current(&mut self, progress: &mut PreloadProgress) -> PreloadError {
        let label = self
            .tasks
            .get(self.cursor)
            .map(|t| t.label.clone())
            .unwrap_or_default();
        let error = PreloadError::AssetFailed { label };
        progress.push_log(&format!("Error: {error}"));
        progress.push_log("Preload stopped. Press Enter to retry.");
        self.in_flight = false;
        self.aborted = true;
        error
    }
}

/// Handle of the download currently in flight, polled against the asset
/// server each frame.
#[derive(Resource, Default)]
pub struct CurrentDownload(pub Option<UntypedHandle>);

/// Keeps every successfully preloaded handle alive so nothing is evicted
/// between preload and viewer mount.
#[derive(Resource, Default)]
pub struct PreloadedAssets {
    pub handles: Vec<UntypedHandle>,
}

// Fresh queue and progress for this run; a retry restarts from zero
pub fn begin_preload_run(
    mut commands: Commands,
    mut progress: ResMut<PreloadProgress>,
    mut current: ResMut<CurrentDownload>,
    mut retained: ResMut<PreloadedAssets>,
) {
    progress.reset();
    current.0 = None;
    retained.handles.clear();

    let tasks = build_preload_queue(BODIES, STICKERS, BACKGROUNDS);
    progress.total = tasks.len();
    progress.push_log(&format!("Queue prepared ({} assets)", tasks.len()));
    info!("Preload queue prepared with {} assets", tasks.len());
    commands.insert_resource(PreloadQueue::new(tasks));
}

// One-at-a-time pump: poll the in-flight download, then start the next
pub fn pump_preload_queue(
    asset_server: Res<AssetServer>,
    mut queue: ResMut<PreloadQueue>,
    mut progress: ResMut<PreloadProgress>,
    mut current: ResMut<CurrentDownload>,
    mut retained: ResMut<PreloadedAssets>,
    mut next_stage: ResMut<NextState<AppStage>>,
) {
    if let Some(handle) = current.0.clone() {
        match asset_server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => {
                queue.complete_current(&mut progress);
                retained.handles.push(handle);
                current.0 = None;
            }
            Some(LoadState::Failed(_)) => {
                let error = queue.fail_current(&mut progress);
                warn!("Preload aborted: {error}");
                current.0 = None;
                next_stage.set(AppStage::NotStarted);
            }
            // Still downloading or decoding; check again next frame.
            _ => return,
        }
    }

    if current.0.is_none() {
        if let Some(task) = queue.start_next(&mut progress) {
            let handle = match task.class {
                AssetClass::BodyMesh => asset_server.load::<Scene>(task.path.clone()).untyped(),
                AssetClass::StickerTexture | AssetClass::BackgroundPanorama => {
                    asset_server.load::<Image>(task.path.clone()).untyped()
                }
            };
            current.0 = Some(handle);
        } else if queue.is_exhausted() {
            progress.push_log("All assets loaded. Rendering first 3D frame...");
            info!(
                "Preload complete: {}/{} assets",
                progress.completed, progress.total
            );
            next_stage.set(AppStage::AwaitingFirstFrame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_and_progress() -> (PreloadQueue, PreloadProgress) {
        let tasks = build_preload_queue(BODIES, STICKERS, BACKGROUNDS);
        let mut progress = PreloadProgress::default();
        progress.total = tasks.len();
        (PreloadQueue::new(tasks), progress)
    }

    #[test]
    fn queue_skips_pathless_descriptors_and_keeps_catalog_order() {
        let tasks = build_preload_queue(BODIES, STICKERS, BACKGROUNDS);
        let with_paths = STICKERS.iter().filter(|s| s.path.is_some()).count()
            + BACKGROUNDS.iter().filter(|b| b.path.is_some()).count()
            + BODIES.len();
        assert_eq!(tasks.len(), with_paths);

        // Bodies first, then stickers, then backgrounds.
        assert!(tasks[0].label.starts_with("model /models/"));
        assert_eq!(tasks[0].class, AssetClass::BodyMesh);
        assert_eq!(tasks[BODIES.len()].class, AssetClass::StickerTexture);
        assert_eq!(
            tasks.last().unwrap().class,
            AssetClass::BackgroundPanorama
        );
    }

    #[test]
    fn successful_run_logs_one_loaded_line_per_asset_in_order() {
        let (mut queue, mut progress) = queue_and_progress();
        let total = queue.len();

        while !queue.is_exhausted() {
            assert!(queue.start_next(&mut progress).is_some());
            // Strictly sequential: starting again while in flight is refused.
            assert!(queue.start_next(&mut progress).is_none());
            queue.complete_current(&mut progress);
        }

        assert_eq!(progress.completed, total);
        assert_eq!(progress.lines_matching("Loaded "), total);

        // Loaded lines appear in declared order.
        let loaded: Vec<&String> = progress
            .log
            .iter()
            .filter(|l| l.contains("Loaded "))
            .collect();
        assert!(loaded[0].contains("model /models/"));
        assert!(loaded[total - 1].contains("background /bgs/"));
    }

    #[test]
    fn failure_at_nth_asset_stops_the_queue() {
        let (mut queue, mut progress) = queue_and_progress();
        let fail_at = 3;

        let mut started = 0;
        for _ in 0..fail_at - 1 {
            queue.start_next(&mut progress).unwrap();
            started += 1;
            queue.complete_current(&mut progress);
        }
        let failed_label = queue.start_next(&mut progress).unwrap().label.clone();
        started += 1;
        let error = queue.fail_current(&mut progress);

        assert_eq!(progress.completed, fail_at - 1);
        assert_eq!(progress.lines_matching("Loaded "), fail_at - 1);
        assert!(error.to_string().contains(&failed_label));
        assert!(progress.log.last().unwrap().contains("Press Enter to retry"));

        // Nothing after the failure is ever requested.
        assert!(queue.start_next(&mut progress).is_none());
        assert!(!queue.is_exhausted());
        assert_eq!(started, fail_at);
    }

    #[test]
    fn two_bodies_two_stickers_two_backgrounds_build_a_six_task_queue() {
        let bodies = [
            BodyDescriptor {
                id: "b1",
                name: "B1",
                path: "b1.obj",
                rotation: [0.0; 3],
            },
            BodyDescriptor {
                id: "b2",
                name: "B2",
                path: "b2.obj",
                rotation: [0.0; 3],
            },
        ];
        let stickers = [
            StickerDescriptor {
                id: "s1",
                name: "s1",
                path: Some("s1.png"),
            },
            StickerDescriptor {
                id: "s2",
                name: "s2",
                path: Some("s2.png"),
            },
            StickerDescriptor {
                id: "s3",
                name: "",
                path: None,
            },
        ];
        let backgrounds = [
            BackgroundDescriptor {
                id: "g1",
                name: "G1",
                path: Some("g1.hdr"),
            },
            BackgroundDescriptor {
                id: "g2",
                name: "G2",
                path: Some("g2.hdr"),
            },
        ];

        let tasks = build_preload_queue(&bodies, &stickers, &backgrounds);
        assert_eq!(tasks.len(), 6);

        let mut queue = PreloadQueue::new(tasks);
        let mut progress = PreloadProgress::default();
        progress.total = queue.len();
        while !queue.is_exhausted() {
            queue.start_next(&mut progress).unwrap();
            queue.complete_current(&mut progress);
        }
        assert_eq!(progress.completed, 6);
        assert_eq!(progress.total, 6);
    }
}
