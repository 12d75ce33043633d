//! Interactive decal placement and manipulation tool.
//!
//! ## Architecture
//!
//! Pointer input over the body is interpreted through one mode resource:
//!
//! ### Idle
//! Dragging orbits the camera; decals are inert quads on the body.
//!
//! ### Placing
//! Active after a design is picked from the grid:
//! - The draft follows the cursor as a half-transparent preview
//! - Release over the body commits it and opens its edit panel
//! - Escape abandons the draft
//!
//! ### Moving
//! Active after a decal's Move button:
//! - The committed decal hides; a preview of it follows the cursor
//! - Release writes the new pose back onto the same decal id
//! - Escape, or Move again, cancels and restores the original pose
//!
//! ## Decal data flow
//!
//! ```text
//! PlacedDecals (Resource)
//!   └─> Master list, poses in submesh-local space
//!
//! InteractionMode (Resource)
//!   └─> The single in-flight draft, if any
//!
//! DecalVisual (Component)
//!   └─> Spawned quad entities parented to body submeshes
//! ```
//!
//! Any change to the above fires `RebuildDecalsEvent`, and
//! `rebuild_decals_on_event()` resynchronises the quad entities wholesale.

/// Aspect-correction and mirroring of the decal render scale.
pub mod correction;

/// Raycast dragging, commit/cancel, and decal quad rebuilding.
pub mod interactions;

/// Surface-hit to local-pose resolution.
pub mod placement;

/// Mode state machine, drafts, the committed-decal list, and panel state.
pub mod state;

/// Side panel: design grid, scene selectors, and per-decal edit controls.
pub mod ui;

use bevy::prelude::*;

use crate::engine::core::app_stage::AppStage;

pub use state::{DecalDraft, DecalIdAllocator, InteractionMode, OpenPanels, PlacedDecals};

use interactions::{
    DecalMaterials, DecalQuad, RebuildDecalsEvent, RemoveDecalEvent, cancel_on_escape,
    handle_decal_removal, rebuild_decals_on_event, sync_orbit_lock, update_active_draft,
};

use ui::{
    ViewerUiState, apply_collapse_state, background_cycle_interaction, body_cycle_interaction,
    capture_button_interaction, center_button_interaction, collapse_button_interaction,
    decal_edit_interactions, decal_move_interaction, decal_remove_interaction,
    decal_row_toggle_interaction, draft_edit_interactions, edit_draft_hotkeys,
    rebuild_capture_gallery, rebuild_decal_list, reflect_draft_controls, reflect_hint_text,
    reflect_selector_labels, skin_cycle_interaction, spawn_viewer_ui, sticker_grid_interaction,
};

// Registers the decal tool's panel, resources, and systems.
pub struct DecalManagerPlugin;

impl Plugin for DecalManagerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InteractionMode>()
            .init_resource::<PlacedDecals>()
            .init_resource::<DecalIdAllocator>()
            .init_resource::<OpenPanels>()
            .init_resource::<DecalQuad>()
            .init_resource::<DecalMaterials>()
            .init_resource::<ViewerUiState>()
            .add_event::<RebuildDecalsEvent>()
            .add_event::<RemoveDecalEvent>()
            .add_systems(OnEnter(AppStage::AwaitingFirstFrame), spawn_viewer_ui)
            .add_systems(
                Update,
                (
                    // World
                    update_active_draft,
                    cancel_on_escape,
                    edit_draft_hotkeys,
                    sync_orbit_lock,
                    handle_decal_removal,
                    rebuild_decals_on_event,
                )
                    .run_if(in_state(AppStage::Entered)),
            )
            .add_systems(
                Update,
                (
                    // Panel
                    collapse_button_interaction,
                    apply_collapse_state,
                    sticker_grid_interaction,
                    body_cycle_interaction,
                    background_cycle_interaction,
                    skin_cycle_interaction,
                    reflect_selector_labels,
                    center_button_interaction,
                    capture_button_interaction,
                    rebuild_decal_list,
                    decal_row_toggle_interaction,
                    decal_edit_interactions,
                    decal_move_interaction,
                    decal_remove_interaction,
                    reflect_hint_text,
                    reflect_draft_controls,
                    draft_edit_interactions,
                    rebuild_capture_gallery,
                )
                    .run_if(in_state(AppStage::Entered)),
            );
    }
}
