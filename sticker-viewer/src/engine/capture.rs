//! Still-frame capture of the viewer window.
//!
//! Each capture writes a PNG under `captures/` and appends a record to
//! `captures/index.json` so the gallery survives restarts of the process.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::render::view::screenshot::{Screenshot, save_to_disk};
use serde::Serialize;

const CAPTURES_DIR: &str = "captures";

/// One saved capture.
#[derive(Serialize, Clone)]
pub struct CaptureRecord {
    pub id: String,
    pub path: String,
}

/// Accumulated captures for the current run plus a counter that keeps ids
/// unique within one second.
#[derive(Resource, Default)]
pub struct CaptureGallery {
    pub records: Vec<CaptureRecord>,
    counter: u64,
}

impl CaptureGallery {
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!(
            "capture-{}-{}",
            chrono::Local::now().format("%Y%m%d-%H%M%S"),
            self.counter
        )
    }
}

/// Fired by the "Capture" action.
#[derive(Event)]
pub struct CaptureRequestEvent;

/// Schedules a screenshot of the primary window and records it in the
/// gallery index. A failed index write keeps the PNG on disk; the gallery
/// just will not list it after a restart.
pub fn handle_capture_requests(
    mut events: EventReader<CaptureRequestEvent>,
    mut gallery: ResMut<CaptureGallery>,
    mut commands: Commands,
) {
    for _ in events.read() {
        if let Err(err) = std::fs::create_dir_all(CAPTURES_DIR) {
            warn!("Could not create captures directory: {err}");
            continue;
        }

        let id = gallery.next_id();
        let path = PathBuf::from(CAPTURES_DIR).join(format!("{id}.png"));
        let record = CaptureRecord {
            id,
            path: path.to_string_lossy().into_owned(),
        };

        commands
            .spawn(Screenshot::primary_window())
            .observe(save_to_disk(path));
        info!("Capture scheduled: {}", record.path);
        gallery.records.push(record);

        match serde_json::to_string_pretty(&gallery.records) {
            Ok(json) => {
                let index_path = PathBuf::from(CAPTURES_DIR).join("index.json");
                if let Err(err) = std::fs::write(&index_path, json) {
                    warn!("Could not write capture index: {err}");
                }
            }
            Err(err) => warn!("Could not serialise capture index: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_ids_are_unique_within_a_run() {
        let mut gallery = CaptureGallery::default();
        let a = gallery.next_id();
        let b = gallery.next_id();
        assert_ne!(a, b);
        assert!(a.starts_with("capture-"));
    }
}
