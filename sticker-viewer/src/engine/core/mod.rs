//! Core application stage machine.
//!
//! Drives the one-way entry sequence from the enter screen through preload
//! and first-frame confirmation into the interactive viewer.

/// `AppStage` states enum and the two-pass first-frame confirmation gate.
pub mod app_stage;
