use std::collections::HashSet;

use bevy::prelude::*;

use catalog::stickers::StickerDescriptor;
use catalog::viewer_settings::DEFAULT_DECAL_SCALE;

use crate::tools::decal_manager::placement::DecalPlacement;

/// The in-flight decal being dragged across the body during a placement or
/// move. Holds a full pose so previewing and committing share one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct DecalDraft {
    pub source_id: String,
    pub name: String,
    pub path: String,
    /// `None` until the first surface hit lands a pose.
    pub mesh_index: Option<usize>,
    pub local_position: Vec3,
    pub local_rotation: Vec3,
    pub scale: f32,
    pub mirrored: bool,
}

impl DecalDraft {
    /// Fresh draft for a catalog design. Blank grid slots have no design
    /// file and cannot start a placement.
    pub fn for_design(design: &StickerDescriptor) -> Option<Self> {
        let path = design.asset_path()?;
        Some(Self {
            source_id: design.id.to_string(),
            name: design.name.to_string(),
            path,
            mesh_index: None,
            local_position: Vec3::ZERO,
            local_rotation: Vec3::ZERO,
            scale: DEFAULT_DECAL_SCALE,
            mirrored: false,
        })
    }

    /// Draft seeded from an already placed decal, for moving it.
    pub fn from_decal(decal: &PlacedDecal) -> Self {
        Self {
            source_id: decal.source_id.clone(),
            name: decal.name.clone(),
            path: decal.path.clone(),
            mesh_index: Some(decal.mesh_index),
            local_position: decal.local_position,
            local_rotation: decal.local_rotation,
            scale: decal.scale,
            mirrored: decal.mirrored,
        }
    }

    /// Overwrites the draft's pose with a resolved surface hit.
    pub fn apply(&mut self, placement: &DecalPlacement) {
        self.mesh_index = Some(placement.mesh_index);
        self.local_position = placement.local_position;
        self.local_rotation = placement.local_rotation;
    }
}

/// A committed decal, posed in the local space of one body submesh.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedDecal {
    pub id: String,
    pub source_id: String,
    pub name: String,
    pub path: String,
    pub mesh_index: usize,
    pub local_position: Vec3,
    pub local_rotation: Vec3,
    pub scale: f32,
    pub mirrored: bool,
}

/// Master list of committed decals, in placement order.
#[derive(Resource, Default)]
pub struct PlacedDecals {
    pub decals: Vec<PlacedDecal>,
}

impl PlacedDecals {
    pub fn get(&self, id: &str) -> Option<&PlacedDecal> {
        self.decals.iter().find(|d| d.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut PlacedDecal> {
        self.decals.iter_mut().find(|d| d.id == id)
    }

    /// Removes a decal; `false` when the id is already gone.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.decals.len();
        self.decals.retain(|d| d.id != id);
        self.decals.len() != before
    }
}

/// Allocates committed-decal ids unique across a session: the source design,
/// a wall-clock millisecond stamp, and a counter breaking same-millisecond
/// ties.
#[derive(Resource, Default)]
pub struct DecalIdAllocator {
    counter: u64,
}

impl DecalIdAllocator {
    pub fn next_id(&mut self, source_id: &str) -> String {
        self.counter += 1;
        format!(
            "{}-{}-{}",
            source_id,
            chrono::Utc::now().timestamp_millis(),
            self.counter
        )
    }
}

/// What pointer input over the body currently means. Exactly one of these
/// holds at a time, so a new placement implicitly abandons a move and
/// vice versa.
#[derive(Resource, Default)]
pub enum InteractionMode {
    /// Pointer input orbits the camera.
    #[default]
    Idle,
    /// A new decal follows the pointer; release commits it.
    Placing(DecalDraft),
    /// An existing decal (hidden from the rendered list) follows the
    /// pointer; release commits the new pose back onto it.
    Moving { decal_id: String, draft: DecalDraft },
}

impl InteractionMode {
    /// Starts placing a design, abandoning whatever was in flight.
    pub fn begin_placing(&mut self, draft: DecalDraft) {
        *self = InteractionMode::Placing(draft);
    }

    /// Toggles move mode for a decal: selecting the decal already being
    /// moved cancels, selecting another switches to it.
    pub fn toggle_moving(&mut self, decal: &PlacedDecal) {
        if let InteractionMode::Moving { decal_id, .. } = self {
            if decal_id == &decal.id {
                *self = InteractionMode::Idle;
                return;
            }
        }
        *self = InteractionMode::Moving {
            decal_id: decal.id.clone(),
            draft: DecalDraft::from_decal(decal),
        };
    }

    pub fn cancel(&mut self) {
        *self = InteractionMode::Idle;
    }

    /// Drops back to idle if the decal being moved was removed under us.
    pub fn on_decal_removed(&mut self, id: &str) {
        if let InteractionMode::Moving { decal_id, .. } = self {
            if decal_id == id {
                *self = InteractionMode::Idle;
            }
        }
    }

    pub fn active_draft(&self) -> Option<&DecalDraft> {
        match self {
            InteractionMode::Idle => None,
            InteractionMode::Placing(draft) => Some(draft),
            InteractionMode::Moving { draft, .. } => Some(draft),
        }
    }

    pub fn active_draft_mut(&mut self) -> Option<&mut DecalDraft> {
        match self {
            InteractionMode::Idle => None,
            InteractionMode::Placing(draft) => Some(draft),
            InteractionMode::Moving { draft, .. } => Some(draft),
        }
    }

    /// Updates the in-flight draft with a resolved surface hit.
    pub fn apply_placement(&mut self, placement: &DecalPlacement) {
        if let Some(draft) = self.active_draft_mut() {
            draft.apply(placement);
        }
    }

    /// The decal excluded from rendering while its replacement preview is
    /// being dragged.
    pub fn hidden_decal_id(&self) -> Option<&str> {
        match self {
            InteractionMode::Moving { decal_id, .. } => Some(decal_id),
            _ => None,
        }
    }

    /// Whether pointer input is claimed by a placement or move (and the
    /// orbit camera should stand down).
    pub fn is_interactive(&self) -> bool {
        !matches!(self, InteractionMode::Idle)
    }

    /// Commits the in-flight draft and returns the id of the decal it
    /// landed on. A draft that never touched the surface commits nothing
    /// and stays in flight, so a stray release cannot eat the mode; a move
    /// whose decal has since been removed commits nothing and returns to
    /// idle.
    pub fn commit(
        &mut self,
        allocator: &mut DecalIdAllocator,
        decals: &mut PlacedDecals,
    ) -> Option<String> {
        if self.active_draft().is_some_and(|d| d.mesh_index.is_none()) {
            return None;
        }
        let mode = std::mem::take(self);
        match mode {
            InteractionMode::Idle => None,
            InteractionMode::Placing(draft) => {
                let mesh_index = draft.mesh_index?;
                let id = allocator.next_id(&draft.source_id);
                decals.decals.push(PlacedDecal {
                    id: id.clone(),
                    source_id: draft.source_id,
                    name: draft.name,
                    path: draft.path,
                    mesh_index,
                    local_position: draft.local_position,
                    local_rotation: draft.local_rotation,
                    scale: draft.scale,
                    mirrored: draft.mirrored,
                });
                Some(id)
            }
            InteractionMode::Moving { decal_id, draft } => {
                let mesh_index = draft.mesh_index?;
                let decal = decals.get_mut(&decal_id)?;
                // Only the pose moves; scale and mirror edits made through
                // the decal's panel are already on the decal itself.
                decal.mesh_index = mesh_index;
                decal.local_position = draft.local_position;
                decal.local_rotation = draft.local_rotation;
                Some(decal_id)
            }
        }
    }
}

/// Which placed-decal edit panels are open. Committing a placement opens
/// the new decal's panel exclusively, so the edit controls always refer to
/// an unambiguous target.
#[derive(Resource, Default)]
pub struct OpenPanels {
    open: HashSet<String>,
}

impl OpenPanels {
    pub fn is_open(&self, id: &str) -> bool {
        self.open.contains(id)
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.open.remove(id) {
            self.open.insert(id.to_string());
        }
    }

    pub fn open_exclusive(&mut self, id: &str) {
        self.open.clear();
        self.open.insert(id.to_string());
    }

    pub fn close(&mut self, id: &str) {
        self.open.remove(id);
    }

    pub fn clear(&mut self) {
        self.open.clear();
    }

    /// The edit target when exactly one panel is open.
    pub fn sole_open(&self) -> Option<&str> {
        if self.open.len() == 1 {
            self.open.iter().next().map(String::as_str)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::stickers::STICKERS;
    use catalog::viewer_settings::{DECAL_SCALE_MAX, DECAL_SCALE_MIN};

    fn design(index: usize) -> DecalDraft {
        DecalDraft::for_design(&STICKERS[index]).unwrap()
    }

    fn place_at(
        mode: &mut InteractionMode,
        allocator: &mut DecalIdAllocator,
        decals: &mut PlacedDecals,
        mesh_index: usize,
        position: Vec3,
    ) -> String {
        mode.apply_placement(&DecalPlacement {
            mesh_index,
            local_position: position,
            local_rotation: Vec3::ZERO,
        });
        mode.commit(allocator, decals).unwrap()
    }

    #[test]
    fn blank_slots_cannot_start_a_placement() {
        let blank = STICKERS.iter().find(|s| s.path.is_none()).unwrap();
        assert!(DecalDraft::for_design(blank).is_none());
    }

    #[test]
    fn committing_a_placement_records_the_full_pose() {
        let mut mode = InteractionMode::default();
        let mut allocator = DecalIdAllocator::default();
        let mut decals = PlacedDecals::default();

        mode.begin_placing(design(0));
        let id = place_at(
            &mut mode,
            &mut allocator,
            &mut decals,
            2,
            Vec3::new(0.1, 0.2, 0.3),
        );

        let decal = decals.get(&id).unwrap();
        assert_eq!(decal.mesh_index, 2);
        assert_eq!(decal.local_position, Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(decal.scale, DEFAULT_DECAL_SCALE);
        assert!(!decal.mirrored);
        assert!(decal.id.starts_with(&decal.source_id));
        assert!(!mode.is_interactive());
    }

    #[test]
    fn a_release_with_no_surface_hit_keeps_placing_active() {
        let mut mode = InteractionMode::default();
        let mut allocator = DecalIdAllocator::default();
        let mut decals = PlacedDecals::default();

        mode.begin_placing(design(0));
        // The release of the grid click itself, or a release over empty
        // space, commits nothing and must not eat the mode.
        assert_eq!(mode.commit(&mut allocator, &mut decals), None);
        assert!(decals.decals.is_empty());
        assert!(matches!(mode, InteractionMode::Placing(_)));

        // The placement still works afterwards.
        let id = place_at(&mut mode, &mut allocator, &mut decals, 0, Vec3::ZERO);
        assert!(decals.get(&id).is_some());
    }

    #[test]
    fn moving_commits_pose_only_and_keeps_identity() {
        let mut mode = InteractionMode::default();
        let mut allocator = DecalIdAllocator::default();
        let mut decals = PlacedDecals::default();

        mode.begin_placing(design(0));
        let id = place_at(&mut mode, &mut allocator, &mut decals, 0, Vec3::ZERO);
        decals.get_mut(&id).unwrap().scale = 0.2;

        let snapshot = decals.get(&id).unwrap().clone();
        mode.toggle_moving(&snapshot);
        assert_eq!(mode.hidden_decal_id(), Some(id.as_str()));

        let committed = place_at(
            &mut mode,
            &mut allocator,
            &mut decals,
            1,
            Vec3::new(0.5, 0.0, 0.0),
        );
        assert_eq!(committed, id);

        let decal = decals.get(&id).unwrap();
        assert_eq!(decal.mesh_index, 1);
        assert_eq!(decal.local_position, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(decal.scale, 0.2);
        assert_eq!(decal.id, id);
    }

    #[test]
    fn toggling_the_same_decal_cancels_the_move() {
        let mut mode = InteractionMode::default();
        let mut allocator = DecalIdAllocator::default();
        let mut decals = PlacedDecals::default();

        mode.begin_placing(design(0));
        let id = place_at(&mut mode, &mut allocator, &mut decals, 0, Vec3::ZERO);
        let decal = decals.get(&id).unwrap().clone();

        mode.toggle_moving(&decal);
        assert!(mode.is_interactive());
        mode.toggle_moving(&decal);
        assert!(!mode.is_interactive());
    }

    #[test]
    fn toggling_a_second_decal_switches_the_move_target() {
        let mut mode = InteractionMode::default();
        let mut allocator = DecalIdAllocator::default();
        let mut decals = PlacedDecals::default();

        mode.begin_placing(design(0));
        let id_a = place_at(&mut mode, &mut allocator, &mut decals, 0, Vec3::ZERO);
        mode.begin_placing(design(1));
        let id_b = place_at(&mut mode, &mut allocator, &mut decals, 0, Vec3::X);
        let a_before = decals.get(&id_a).unwrap().clone();

        let decal_a = decals.get(&id_a).unwrap().clone();
        mode.toggle_moving(&decal_a);
        // Dragging A around before switching to B.
        mode.apply_placement(&DecalPlacement {
            mesh_index: 2,
            local_position: Vec3::ONE,
            local_rotation: Vec3::ZERO,
        });

        let decal_b = decals.get(&id_b).unwrap().clone();
        mode.toggle_moving(&decal_b);

        // Only B is being moved now; A never received the abandoned drag.
        assert_eq!(mode.hidden_decal_id(), Some(id_b.as_str()));
        assert_eq!(decals.get(&id_a).unwrap(), &a_before);

        let committed = place_at(
            &mut mode,
            &mut allocator,
            &mut decals,
            1,
            Vec3::new(0.0, 0.5, 0.0),
        );
        assert_eq!(committed, id_b);
        assert_eq!(decals.get(&id_a).unwrap(), &a_before);
    }

    #[test]
    fn starting_a_placement_abandons_an_active_move() {
        let mut mode = InteractionMode::default();
        let mut allocator = DecalIdAllocator::default();
        let mut decals = PlacedDecals::default();

        mode.begin_placing(design(0));
        let id = place_at(&mut mode, &mut allocator, &mut decals, 0, Vec3::ZERO);
        let before = decals.get(&id).unwrap().clone();

        mode.toggle_moving(&before);
        mode.apply_placement(&DecalPlacement {
            mesh_index: 3,
            local_position: Vec3::ONE,
            local_rotation: Vec3::ZERO,
        });
        mode.begin_placing(design(1));

        // The interrupted move never lands on the original decal.
        assert_eq!(decals.get(&id).unwrap(), &before);
        assert!(matches!(mode, InteractionMode::Placing(_)));
    }

    #[test]
    fn committing_a_move_of_a_removed_decal_is_a_no_op() {
        let mut mode = InteractionMode::default();
        let mut allocator = DecalIdAllocator::default();
        let mut decals = PlacedDecals::default();

        mode.begin_placing(design(0));
        let id = place_at(&mut mode, &mut allocator, &mut decals, 0, Vec3::ZERO);
        let decal = decals.get(&id).unwrap().clone();

        mode.toggle_moving(&decal);
        mode.apply_placement(&DecalPlacement {
            mesh_index: 0,
            local_position: Vec3::ONE,
            local_rotation: Vec3::ZERO,
        });
        assert!(decals.remove(&id));

        assert_eq!(mode.commit(&mut allocator, &mut decals), None);
        assert!(decals.decals.is_empty());
        assert!(!mode.is_interactive());
    }

    #[test]
    fn removal_while_moving_resets_the_mode() {
        let mut mode = InteractionMode::default();
        let mut allocator = DecalIdAllocator::default();
        let mut decals = PlacedDecals::default();

        mode.begin_placing(design(0));
        let id = place_at(&mut mode, &mut allocator, &mut decals, 0, Vec3::ZERO);
        let decal = decals.get(&id).unwrap().clone();

        mode.toggle_moving(&decal);
        decals.remove(&id);
        mode.on_decal_removed(&id);
        assert!(!mode.is_interactive());
    }

    #[test]
    fn ids_stay_unique_for_rapid_commits_of_one_design() {
        let mut mode = InteractionMode::default();
        let mut allocator = DecalIdAllocator::default();
        let mut decals = PlacedDecals::default();

        let mut seen = HashSet::new();
        for _ in 0..20 {
            mode.begin_placing(design(0));
            let id = place_at(&mut mode, &mut allocator, &mut decals, 0, Vec3::ZERO);
            assert!(seen.insert(id));
        }
    }

    #[test]
    fn exclusive_open_leaves_one_panel() {
        let mut panels = OpenPanels::default();
        panels.toggle("a");
        panels.toggle("b");
        assert!(panels.sole_open().is_none());
        panels.open_exclusive("c");
        assert_eq!(panels.sole_open(), Some("c"));
        assert!(!panels.is_open("a"));
    }

    #[test]
    fn scale_bounds_are_a_valid_range() {
        assert!(DECAL_SCALE_MIN < DEFAULT_DECAL_SCALE);
        assert!(DEFAULT_DECAL_SCALE < DECAL_SCALE_MAX);
    }
}
