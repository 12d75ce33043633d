//! Asset preload orchestration and the loading-to-viewer transition.
//!
//! Builds one flat download queue from the three catalogs, executes it
//! strictly sequentially with per-item progress reporting, and stages the
//! enter screen's reveal once the first visually complete frame has been
//! presented.

/// Enter-screen overlay UI and the reveal-driving systems.
pub mod enter_screen;

/// Sequential preload queue, task construction, and the asset-server pump.
pub mod preload;

/// Observable per-run progress and the timestamped, UI-visible log.
pub mod progress;

/// The delay+fade reveal pair as one cancellable compound sequence.
pub mod reveal;
