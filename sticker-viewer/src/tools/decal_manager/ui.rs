use bevy::prelude::*;

use catalog::backgrounds::BACKGROUNDS;
use catalog::bodies::BODIES;
use catalog::stickers::STICKERS;
use catalog::viewer_settings::{
    DECAL_ROTATE_STEP_DEGREES, DECAL_SCALE_MAX, DECAL_SCALE_MIN, DECAL_SCALE_STEP, SKIN_PRESETS,
};

use crate::engine::camera::CameraResetEvent;
use crate::engine::capture::{CaptureGallery, CaptureRequestEvent};
use crate::engine::scene::body::{SelectedBody, SkinTone};
use crate::engine::scene::environment::SelectedBackground;
use crate::tools::decal_manager::interactions::{RebuildDecalsEvent, RemoveDecalEvent};
use crate::tools::decal_manager::state::{InteractionMode, OpenPanels, PlacedDecals};

const PANEL_BG: Color = Color::srgb(0.10, 0.11, 0.13);
const BUTTON_BG: Color = Color::srgb(0.22, 0.24, 0.28);
const BUTTON_BG_ACTIVE: Color = Color::srgb(0.30, 0.34, 0.40);
const DANGER_BG: Color = Color::srgb(0.28, 0.10, 0.10);

#[derive(Resource)]
pub struct ViewerUiState {
    pub collapsed: bool,
    pub open_width: f32,
    pub closed_width: f32,
}
impl Default for ViewerUiState {
    fn default() -> Self {
        Self {
            collapsed: false,
            open_width: 300.0,
            closed_width: 32.0,
        }
    }
}

// Panel chrome
#[derive(Component)]
pub struct ViewerPanelRoot;
#[derive(Component)]
pub struct ViewerPanelBody;
#[derive(Component)]
pub struct PanelHeaderNode;
#[derive(Component)]
pub struct PanelTitleText;
#[derive(Component)]
pub struct PanelCollapseButton;
#[derive(Component)]
pub struct PanelCollapseLabel;

// Catalog controls
#[derive(Component)]
pub struct StickerGridButton(pub usize);
#[derive(Component)]
pub struct BodyCycleButton;
#[derive(Component)]
pub struct BodyValueLabel;
#[derive(Component)]
pub struct BackgroundCycleButton;
#[derive(Component)]
pub struct BackgroundValueLabel;
#[derive(Component)]
pub struct SkinCycleButton;
#[derive(Component)]
pub struct SkinValueLabel;

// Placed-decal list
#[derive(Component)]
pub struct DecalListContainer;
#[derive(Component)]
pub struct DecalRowToggle(pub String);
#[derive(Component)]
pub struct DecalScaleUp(pub String);
#[derive(Component)]
pub struct DecalScaleDown(pub String);
#[derive(Component)]
pub struct DecalRotateCw(pub String);
#[derive(Component)]
pub struct DecalRotateCcw(pub String);
#[derive(Component)]
pub struct DecalMirror(pub String);
#[derive(Component)]
pub struct DecalMove(pub String);
#[derive(Component)]
pub struct DecalRemove(pub String);

// In-flight draft edit bar
#[derive(Component)]
pub struct DraftControlsBar;
#[derive(Component)]
pub struct DraftScaleUp;
#[derive(Component)]
pub struct DraftScaleDown;
#[derive(Component)]
pub struct DraftRotateCw;
#[derive(Component)]
pub struct DraftRotateCcw;
#[derive(Component)]
pub struct DraftMirror;
#[derive(Component)]
pub struct DraftCancel;

// Capture gallery
#[derive(Component)]
pub struct CaptureGalleryContainer;

// Bottom strip
#[derive(Component)]
pub struct CenterButton;
#[derive(Component)]
pub struct CaptureButton;
#[derive(Component)]
pub struct HintText;

fn button_node(width: Val, height: f32) -> Node {
    Node {
        width,
        height: Val::Px(height),
        display: Display::Flex,
        align_items: AlignItems::Center,
        justify_content: JustifyContent::Center,
        border: UiRect::all(Val::Px(1.0)),
        ..default()
    }
}

fn spawn_labelled_button<M: Component>(
    parent: &mut ChildSpawnerCommands,
    marker: M,
    label: &str,
    bg: Color,
    width: Val,
    height: f32,
    font_size: f32,
) {
    parent
        .spawn((
            marker,
            Button,
            BackgroundColor(bg),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
            button_node(width, height),
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

// Spawns the viewer side panel: design grid, scene selectors, decal list
pub fn spawn_viewer_ui(
    mut commands: Commands,
    state: Res<ViewerUiState>,
    asset_server: Res<AssetServer>,
) {
    let width = if state.collapsed {
        state.closed_width
    } else {
        state.open_width
    };
    let body_display = if state.collapsed {
        Display::None
    } else {
        Display::Flex
    };

    commands
        .spawn((
            ViewerPanelRoot,
            Name::new("ViewerPanel"),
            BackgroundColor(PANEL_BG),
            Node {
                width: Val::Px(width),
                min_width: Val::Px(0.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                justify_content: JustifyContent::FlexStart,
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    PanelHeaderNode,
                    Name::new("Header"),
                    BackgroundColor(Color::srgb(0.14, 0.16, 0.20)),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::all(Val::Px(12.0)),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::SpaceBetween,
                        ..default()
                    },
                ))
                .with_children(|header| {
                    header.spawn((
                        PanelTitleText,
                        Text::new("Flash Designs"),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                    spawn_labelled_button(
                        header,
                        PanelCollapseButton,
                        ">",
                        BUTTON_BG,
                        Val::Px(28.0),
                        28.0,
                        16.0,
                    );
                });

            parent
                .spawn((
                    ViewerPanelBody,
                    Name::new("Body"),
                    BackgroundColor(Color::srgb(0.12, 0.13, 0.15)),
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                        row_gap: Val::Px(8.0),
                        display: body_display,
                        flex_direction: FlexDirection::Column,
                        overflow: Overflow::clip_y(),
                        ..default()
                    },
                ))
                .with_children(|body| {
                    // Sticker design grid. Blank catalog slots render as
                    // inert dark squares.
                    body.spawn((
                        Name::new("StickerGrid"),
                        Node {
                            width: Val::Percent(100.0),
                            display: Display::Flex,
                            flex_wrap: FlexWrap::Wrap,
                            row_gap: Val::Px(4.0),
                            column_gap: Val::Px(4.0),
                            ..default()
                        },
                    ))
                    .with_children(|grid| {
                        for (index, design) in STICKERS.iter().enumerate() {
                            let Some(path) = design.asset_path() else {
                                grid.spawn((
                                    BackgroundColor(Color::srgb(0.08, 0.09, 0.10)),
                                    Node {
                                        width: Val::Px(44.0),
                                        height: Val::Px(44.0),
                                        ..default()
                                    },
                                ));
                                continue;
                            };
                            grid.spawn((
                                StickerGridButton(index),
                                Button,
                                BackgroundColor(BUTTON_BG),
                                Node {
                                    width: Val::Px(44.0),
                                    height: Val::Px(44.0),
                                    ..default()
                                },
                            ))
                            .with_children(|btn| {
                                btn.spawn((
                                    ImageNode::new(asset_server.load(path)),
                                    Node {
                                        width: Val::Percent(100.0),
                                        height: Val::Percent(100.0),
                                        ..default()
                                    },
                                ));
                            });
                        }
                    });

                    // Scene selectors cycle body, backdrop, and skin tone.
                    body.spawn(Node {
                        width: Val::Percent(100.0),
                        display: Display::Flex,
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(4.0),
                        ..default()
                    })
                    .with_children(|selectors| {
                        spawn_selector_row(
                            selectors,
                            BodyCycleButton,
                            BodyValueLabel,
                            BODIES[0].name,
                        );
                        spawn_selector_row(
                            selectors,
                            BackgroundCycleButton,
                            BackgroundValueLabel,
                            BACKGROUNDS[0].name,
                        );
                        spawn_selector_row(selectors, SkinCycleButton, SkinValueLabel, "Tone 1");
                    });

                    body.spawn((
                        HintText,
                        Text::new(""),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.72, 1.0, 0.0)),
                    ));

                    // Edit strip for the in-flight draft; hidden while idle.
                    body.spawn((
                        DraftControlsBar,
                        Name::new("DraftControls"),
                        Node {
                            width: Val::Percent(100.0),
                            display: Display::None,
                            flex_wrap: FlexWrap::Wrap,
                            column_gap: Val::Px(4.0),
                            row_gap: Val::Px(4.0),
                            ..default()
                        },
                    ))
                    .with_children(|bar| {
                        spawn_labelled_button(bar, DraftScaleDown, "-", BUTTON_BG, Val::Px(30.0), 24.0, 13.0);
                        spawn_labelled_button(bar, DraftScaleUp, "+", BUTTON_BG, Val::Px(30.0), 24.0, 13.0);
                        spawn_labelled_button(bar, DraftRotateCcw, "ccw", BUTTON_BG, Val::Px(42.0), 24.0, 12.0);
                        spawn_labelled_button(bar, DraftRotateCw, "cw", BUTTON_BG, Val::Px(42.0), 24.0, 12.0);
                        spawn_labelled_button(bar, DraftMirror, "Mirror", BUTTON_BG, Val::Px(52.0), 24.0, 12.0);
                        spawn_labelled_button(bar, DraftCancel, "Cancel", DANGER_BG, Val::Px(56.0), 24.0, 12.0);
                    });

                    body.spawn((
                        DecalListContainer,
                        Name::new("DecalList"),
                        Node {
                            width: Val::Percent(100.0),
                            display: Display::Flex,
                            flex_direction: FlexDirection::Column,
                            row_gap: Val::Px(4.0),
                            overflow: Overflow::clip_y(),
                            ..default()
                        },
                    ));

                    body.spawn((
                        Text::new("Captures"),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.85, 0.86, 0.88)),
                    ));
                    body.spawn((
                        CaptureGalleryContainer,
                        Name::new("CaptureGallery"),
                        Node {
                            width: Val::Percent(100.0),
                            max_height: Val::Px(120.0),
                            display: Display::Flex,
                            flex_direction: FlexDirection::Column,
                            row_gap: Val::Px(2.0),
                            overflow: Overflow::scroll_y(),
                            ..default()
                        },
                    ));
                });

            // Bottom strip.
            parent
                .spawn((
                    Name::new("BottomStrip"),
                    BackgroundColor(Color::srgb(0.14, 0.16, 0.20)),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::all(Val::Px(8.0)),
                        display: Display::Flex,
                        column_gap: Val::Px(8.0),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                ))
                .with_children(|strip| {
                    spawn_labelled_button(
                        strip,
                        CenterButton,
                        "Center",
                        BUTTON_BG,
                        Val::Px(110.0),
                        32.0,
                        14.0,
                    );
                    spawn_labelled_button(
                        strip,
                        CaptureButton,
                        "Capture",
                        BUTTON_BG,
                        Val::Px(110.0),
                        32.0,
                        14.0,
                    );
                });
        });
}

fn spawn_selector_row<B: Component, L: Component>(
    parent: &mut ChildSpawnerCommands,
    button: B,
    label: L,
    initial: &str,
) {
    parent
        .spawn(Node {
            width: Val::Percent(100.0),
            display: Display::Flex,
            align_items: AlignItems::Center,
            justify_content: JustifyContent::SpaceBetween,
            ..default()
        })
        .with_children(|row| {
            row.spawn((
                label,
                Text::new(initial),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.86, 0.88)),
            ));
            spawn_labelled_button(row, button, "Next", BUTTON_BG, Val::Px(64.0), 26.0, 12.0);
        });
}

pub fn collapse_button_interaction(
    q: Query<&Interaction, (Changed<Interaction>, With<PanelCollapseButton>)>,
    mut state: ResMut<ViewerUiState>,
) {
    for interaction in &q {
        if *interaction == Interaction::Pressed {
            state.collapsed = !state.collapsed;
        }
    }
}

pub fn apply_collapse_state(
    state: Res<ViewerUiState>,
    mut nodes: ParamSet<(
        Query<&mut Node, With<ViewerPanelRoot>>,
        Query<&mut Node, With<ViewerPanelBody>>,
    )>,
    mut titles: Query<&mut Node, (With<PanelTitleText>, Without<ViewerPanelRoot>, Without<ViewerPanelBody>)>,
) {
    if !state.is_changed() {
        return;
    }
    if let Ok(mut n) = nodes.p0().single_mut() {
        n.width = Val::Px(if state.collapsed {
            state.closed_width
        } else {
            state.open_width
        });
    }
    if let Ok(mut n) = nodes.p1().single_mut() {
        n.display = if state.collapsed {
            Display::None
        } else {
            Display::Flex
        };
    }
    if let Ok(mut n) = titles.single_mut() {
        n.display = if state.collapsed {
            Display::None
        } else {
            Display::Flex
        };
    }
}

// Clicking a design starts a fresh placement and closes any open panels
pub fn sticker_grid_interaction(
    q: Query<(&Interaction, &StickerGridButton), Changed<Interaction>>,
    mut mode: ResMut<InteractionMode>,
    mut panels: ResMut<OpenPanels>,
    mut rebuilds: EventWriter<RebuildDecalsEvent>,
) {
    for (interaction, button) in &q {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let design = &STICKERS[button.0];
        let Some(draft) = crate::tools::decal_manager::state::DecalDraft::for_design(design) else {
            continue;
        };
        info!("Placing design '{}'", design.name);
        panels.clear();
        mode.begin_placing(draft);
        rebuilds.write(RebuildDecalsEvent);
    }
}

pub fn body_cycle_interaction(
    q: Query<&Interaction, (Changed<Interaction>, With<BodyCycleButton>)>,
    mut selected: ResMut<SelectedBody>,
) {
    for interaction in &q {
        if *interaction == Interaction::Pressed {
            selected.index = (selected.index + 1) % BODIES.len();
        }
    }
}

pub fn background_cycle_interaction(
    q: Query<&Interaction, (Changed<Interaction>, With<BackgroundCycleButton>)>,
    mut selected: ResMut<SelectedBackground>,
) {
    for interaction in &q {
        if *interaction == Interaction::Pressed {
            selected.index = (selected.index + 1) % BACKGROUNDS.len();
        }
    }
}

pub fn skin_cycle_interaction(
    q: Query<&Interaction, (Changed<Interaction>, With<SkinCycleButton>)>,
    mut tone: ResMut<SkinTone>,
) {
    for interaction in &q {
        if *interaction == Interaction::Pressed {
            tone.preset = (tone.preset + 1) % SKIN_PRESETS.len();
        }
    }
}

pub fn reflect_selector_labels(
    body: Res<SelectedBody>,
    background: Res<SelectedBackground>,
    tone: Res<SkinTone>,
    mut labels: ParamSet<(
        Query<&mut Text, With<BodyValueLabel>>,
        Query<&mut Text, With<BackgroundValueLabel>>,
        Query<&mut Text, With<SkinValueLabel>>,
    )>,
) {
    if body.is_changed() {
        if let Ok(mut text) = labels.p0().single_mut() {
            *text = Text::new(BODIES[body.index % BODIES.len()].name);
        }
    }
    if background.is_changed() {
        if let Ok(mut text) = labels.p1().single_mut() {
            *text = Text::new(BACKGROUNDS[background.index % BACKGROUNDS.len()].name);
        }
    }
    if tone.is_changed() {
        if let Ok(mut text) = labels.p2().single_mut() {
            *text = Text::new(format!("Tone {}", tone.preset % SKIN_PRESETS.len() + 1));
        }
    }
}

pub fn center_button_interaction(
    q: Query<&Interaction, (Changed<Interaction>, With<CenterButton>)>,
    mut resets: EventWriter<CameraResetEvent>,
) {
    for interaction in &q {
        if *interaction == Interaction::Pressed {
            resets.write(CameraResetEvent);
        }
    }
}

pub fn capture_button_interaction(
    q: Query<&Interaction, (Changed<Interaction>, With<CaptureButton>)>,
    mut captures: EventWriter<CaptureRequestEvent>,
) {
    for interaction in &q {
        if *interaction == Interaction::Pressed {
            captures.write(CaptureRequestEvent);
        }
    }
}

// One row per committed decal; the open panel gains an edit-control strip
pub fn rebuild_decal_list(
    mut commands: Commands,
    decals: Res<PlacedDecals>,
    panels: Res<OpenPanels>,
    containers: Query<Entity, With<DecalListContainer>>,
    children: Query<&Children>,
) {
    if !decals.is_changed() && !panels.is_changed() {
        return;
    }
    let Ok(container) = containers.single() else {
        return;
    };
    if let Ok(kids) = children.get(container) {
        for &kid in kids {
            commands.entity(kid).despawn();
        }
    }

    commands.entity(container).with_children(|list| {
        for decal in &decals.decals {
            let open = panels.is_open(&decal.id);
            list.spawn((
                BackgroundColor(Color::srgb(0.15, 0.16, 0.19)),
                Node {
                    width: Val::Percent(100.0),
                    padding: UiRect::all(Val::Px(4.0)),
                    display: Display::Flex,
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(4.0),
                    ..default()
                },
            ))
            .with_children(|row| {
                spawn_labelled_button(
                    row,
                    DecalRowToggle(decal.id.clone()),
                    &format!("{} {}", decal.name, if open { "-" } else { "+" }),
                    if open { BUTTON_BG_ACTIVE } else { BUTTON_BG },
                    Val::Percent(100.0),
                    26.0,
                    13.0,
                );
                if open {
                    row.spawn(Node {
                        width: Val::Percent(100.0),
                        display: Display::Flex,
                        flex_wrap: FlexWrap::Wrap,
                        column_gap: Val::Px(4.0),
                        row_gap: Val::Px(4.0),
                        ..default()
                    })
                    .with_children(|controls| {
                        let id = &decal.id;
                        spawn_labelled_button(controls, DecalScaleDown(id.clone()), "-", BUTTON_BG, Val::Px(30.0), 24.0, 13.0);
                        spawn_labelled_button(controls, DecalScaleUp(id.clone()), "+", BUTTON_BG, Val::Px(30.0), 24.0, 13.0);
                        spawn_labelled_button(controls, DecalRotateCcw(id.clone()), "ccw", BUTTON_BG, Val::Px(42.0), 24.0, 12.0);
                        spawn_labelled_button(controls, DecalRotateCw(id.clone()), "cw", BUTTON_BG, Val::Px(42.0), 24.0, 12.0);
                        spawn_labelled_button(controls, DecalMirror(id.clone()), "Mirror", BUTTON_BG, Val::Px(52.0), 24.0, 12.0);
                        spawn_labelled_button(controls, DecalMove(id.clone()), "Move", BUTTON_BG, Val::Px(48.0), 24.0, 12.0);
                        spawn_labelled_button(controls, DecalRemove(id.clone()), "Remove", DANGER_BG, Val::Px(60.0), 24.0, 12.0);
                    });
                }
            });
        }
    });
}

pub fn decal_row_toggle_interaction(
    q: Query<(&Interaction, &DecalRowToggle), Changed<Interaction>>,
    mut panels: ResMut<OpenPanels>,
) {
    for (interaction, toggle) in &q {
        if *interaction == Interaction::Pressed {
            panels.toggle(&toggle.0);
        }
    }
}

// Scale, rotation, and mirror edits on committed decals
pub fn decal_edit_interactions(
    scale_up: Query<(&Interaction, &DecalScaleUp), Changed<Interaction>>,
    scale_down: Query<(&Interaction, &DecalScaleDown), Changed<Interaction>>,
    rotate_cw: Query<(&Interaction, &DecalRotateCw), Changed<Interaction>>,
    rotate_ccw: Query<(&Interaction, &DecalRotateCcw), Changed<Interaction>>,
    mirror: Query<(&Interaction, &DecalMirror), Changed<Interaction>>,
    mut decals: ResMut<PlacedDecals>,
    mut rebuilds: EventWriter<RebuildDecalsEvent>,
) {
    let step = DECAL_ROTATE_STEP_DEGREES.to_radians();
    let mut touched = false;

    for (interaction, button) in &scale_up {
        if *interaction == Interaction::Pressed {
            if let Some(decal) = decals.get_mut(&button.0) {
                decal.scale = (decal.scale + DECAL_SCALE_STEP).clamp(DECAL_SCALE_MIN, DECAL_SCALE_MAX);
                touched = true;
            }
        }
    }
    for (interaction, button) in &scale_down {
        if *interaction == Interaction::Pressed {
            if let Some(decal) = decals.get_mut(&button.0) {
                decal.scale = (decal.scale - DECAL_SCALE_STEP).clamp(DECAL_SCALE_MIN, DECAL_SCALE_MAX);
                touched = true;
            }
        }
    }
    // Rotation edits spin the decal in its surface plane only.
    for (interaction, button) in &rotate_cw {
        if *interaction == Interaction::Pressed {
            if let Some(decal) = decals.get_mut(&button.0) {
                decal.local_rotation.z -= step;
                touched = true;
            }
        }
    }
    for (interaction, button) in &rotate_ccw {
        if *interaction == Interaction::Pressed {
            if let Some(decal) = decals.get_mut(&button.0) {
                decal.local_rotation.z += step;
                touched = true;
            }
        }
    }
    for (interaction, button) in &mirror {
        if *interaction == Interaction::Pressed {
            if let Some(decal) = decals.get_mut(&button.0) {
                decal.mirrored = !decal.mirrored;
                touched = true;
            }
        }
    }

    if touched {
        rebuilds.write(RebuildDecalsEvent);
    }
}

pub fn decal_move_interaction(
    q: Query<(&Interaction, &DecalMove), Changed<Interaction>>,
    decals: Res<PlacedDecals>,
    mut mode: ResMut<InteractionMode>,
    mut rebuilds: EventWriter<RebuildDecalsEvent>,
) {
    for (interaction, button) in &q {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(decal) = decals.get(&button.0) else {
            continue;
        };
        mode.toggle_moving(decal);
        rebuilds.write(RebuildDecalsEvent);
    }
}

pub fn decal_remove_interaction(
    q: Query<(&Interaction, &DecalRemove), Changed<Interaction>>,
    mut removals: EventWriter<RemoveDecalEvent>,
) {
    for (interaction, button) in &q {
        if *interaction == Interaction::Pressed {
            removals.write(RemoveDecalEvent(button.0.clone()));
        }
    }
}

pub fn reflect_hint_text(
    mode: Res<InteractionMode>,
    mut hints: Query<&mut Text, With<HintText>>,
) {
    if !mode.is_changed() {
        return;
    }
    let hint = match mode.active_draft() {
        Some(draft) if mode.hidden_decal_id().is_some() => {
            format!(
                "Moving {}: release over the body to drop. Esc cancels. Keys: +/- scale, [ ] rotate, M mirror.",
                draft.name
            )
        }
        Some(draft) => {
            format!(
                "Placing {}: release over the body to place. Esc cancels. Keys: +/- scale, [ ] rotate, M mirror.",
                draft.name
            )
        }
        None => String::new(),
    };
    if let Ok(mut text) = hints.single_mut() {
        if text.0 != hint {
            *text = Text::new(hint);
        }
    }
}

// The draft edit bar only shows while a placement or move is in flight
pub fn reflect_draft_controls(
    mode: Res<InteractionMode>,
    mut bars: Query<&mut Node, With<DraftControlsBar>>,
) {
    if !mode.is_changed() {
        return;
    }
    let display = if mode.is_interactive() {
        Display::Flex
    } else {
        Display::None
    };
    for mut node in &mut bars {
        if node.display != display {
            node.display = display;
        }
    }
}

// Panel edits for the in-flight draft before it is committed
pub fn draft_edit_interactions(
    scale_up: Query<&Interaction, (Changed<Interaction>, With<DraftScaleUp>)>,
    scale_down: Query<&Interaction, (Changed<Interaction>, With<DraftScaleDown>)>,
    rotate_cw: Query<&Interaction, (Changed<Interaction>, With<DraftRotateCw>)>,
    rotate_ccw: Query<&Interaction, (Changed<Interaction>, With<DraftRotateCcw>)>,
    mirror: Query<&Interaction, (Changed<Interaction>, With<DraftMirror>)>,
    cancel: Query<&Interaction, (Changed<Interaction>, With<DraftCancel>)>,
    mut mode: ResMut<InteractionMode>,
    mut rebuilds: EventWriter<RebuildDecalsEvent>,
) {
    if !mode.is_interactive() {
        return;
    }
    let mut touched = false;
    let step = DECAL_ROTATE_STEP_DEGREES.to_radians();

    if cancel.iter().any(|i| *i == Interaction::Pressed) {
        mode.cancel();
        rebuilds.write(RebuildDecalsEvent);
        return;
    }

    let Some(draft) = mode.active_draft_mut() else {
        return;
    };
    if scale_up.iter().any(|i| *i == Interaction::Pressed) {
        draft.scale = (draft.scale + DECAL_SCALE_STEP).clamp(DECAL_SCALE_MIN, DECAL_SCALE_MAX);
        touched = true;
    }
    if scale_down.iter().any(|i| *i == Interaction::Pressed) {
        draft.scale = (draft.scale - DECAL_SCALE_STEP).clamp(DECAL_SCALE_MIN, DECAL_SCALE_MAX);
        touched = true;
    }
    if rotate_cw.iter().any(|i| *i == Interaction::Pressed) {
        draft.local_rotation.z -= step;
        touched = true;
    }
    if rotate_ccw.iter().any(|i| *i == Interaction::Pressed) {
        draft.local_rotation.z += step;
        touched = true;
    }
    if mirror.iter().any(|i| *i == Interaction::Pressed) {
        draft.mirrored = !draft.mirrored;
        touched = true;
    }

    if touched {
        rebuilds.write(RebuildDecalsEvent);
    }
}

// One text row per saved capture, newest at the bottom
pub fn rebuild_capture_gallery(
    mut commands: Commands,
    gallery: Res<CaptureGallery>,
    containers: Query<Entity, With<CaptureGalleryContainer>>,
    children: Query<&Children>,
) {
    if !gallery.is_changed() || gallery.is_added() {
        return;
    }
    let Ok(container) = containers.single() else {
        return;
    };
    if let Ok(kids) = children.get(container) {
        for &kid in kids {
            commands.entity(kid).despawn();
        }
    }

    commands.entity(container).with_children(|list| {
        for (index, record) in gallery.records.iter().enumerate() {
            list.spawn((
                Text::new(format!("{}. {}", index + 1, record.path)),
                TextFont {
                    font_size: 11.0,
                    ..default()
                },
                TextColor(Color::srgb(0.65, 0.68, 0.70)),
            ));
        }
    });
}

// Keyboard edits for the in-flight draft before it is committed
pub fn edit_draft_hotkeys(
    keys: Res<ButtonInput<KeyCode>>,
    mut mode: ResMut<InteractionMode>,
    mut rebuilds: EventWriter<RebuildDecalsEvent>,
) {
    if !mode.is_interactive() {
        return;
    }
    let Some(draft) = mode.active_draft_mut() else {
        return;
    };
    let mut touched = false;

    if keys.just_pressed(KeyCode::Equal) {
        draft.scale = (draft.scale + DECAL_SCALE_STEP).clamp(DECAL_SCALE_MIN, DECAL_SCALE_MAX);
        touched = true;
    }
    if keys.just_pressed(KeyCode::Minus) {
        draft.scale = (draft.scale - DECAL_SCALE_STEP).clamp(DECAL_SCALE_MIN, DECAL_SCALE_MAX);
        touched = true;
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        draft.local_rotation.z -= DECAL_ROTATE_STEP_DEGREES.to_radians();
        touched = true;
    }
    if keys.just_pressed(KeyCode::BracketLeft) {
        draft.local_rotation.z += DECAL_ROTATE_STEP_DEGREES.to_radians();
        touched = true;
    }
    if keys.just_pressed(KeyCode::KeyM) {
        draft.mirrored = !draft.mirrored;
        touched = true;
    }

    if touched {
        rebuilds.write(RebuildDecalsEvent);
    }
}
