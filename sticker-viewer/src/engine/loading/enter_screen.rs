use bevy::prelude::*;

use crate::engine::core::app_stage::AppStage;
use crate::engine::loading::progress::PreloadProgress;
use crate::engine::loading::reveal::{RevealPhase, RevealSequence};

const ENTER_SCREEN_BG: Color = Color::srgb(0.05, 0.05, 0.06);

#[derive(Component)]
pub struct EnterScreenRoot;
#[derive(Component)]
pub struct EnterScreenContent;
#[derive(Component)]
pub struct EnterButton;
#[derive(Component)]
pub struct EnterButtonLabel;
#[derive(Component)]
pub struct ProgressReadout;
#[derive(Component)]
pub struct PreloadLogText;

// Full-screen loading surface shown until the reveal sequence removes it
pub fn spawn_enter_screen(mut commands: Commands) {
    commands
        .spawn((
            EnterScreenRoot,
            Name::new("EnterScreen"),
            GlobalZIndex(10),
            BackgroundColor(ENTER_SCREEN_BG),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    EnterScreenContent,
                    Name::new("EnterPanel"),
                    BackgroundColor(Color::srgb(0.10, 0.11, 0.13)),
                    Node {
                        width: Val::Px(420.0),
                        padding: UiRect::all(Val::Px(16.0)),
                        display: Display::Flex,
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(10.0),
                        ..default()
                    },
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new("SKINSTICKER.XYZ"),
                        TextFont {
                            font_size: 26.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.72, 1.0, 0.0)),
                    ));
                    panel.spawn((
                        Text::new(
                            "Select flash designs and place them on a body. \
                             Capture and download the result.",
                        ),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.75, 0.76, 0.78)),
                    ));

                    panel
                        .spawn((
                            EnterButton,
                            Button,
                            Name::new("EnterButton"),
                            BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                            Node {
                                width: Val::Px(180.0),
                                height: Val::Px(40.0),
                                display: Display::Flex,
                                align_items: AlignItems::Center,
                                justify_content: JustifyContent::Center,
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                        ))
                        .with_children(|btn| {
                            btn.spawn((
                                EnterButtonLabel,
                                Text::new("Enter"),
                                TextFont {
                                    font_size: 18.0,
                                    ..default()
                                },
                                TextColor(Color::WHITE),
                            ));
                        });

                    panel.spawn((
                        ProgressReadout,
                        Text::new("0/0"),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.85, 0.86, 0.88)),
                    ));

                    panel.spawn((
                        PreloadLogText,
                        Text::new(""),
                        TextFont {
                            font_size: 11.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.55, 0.58, 0.60)),
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Px(150.0),
                            overflow: Overflow::clip_y(),
                            ..default()
                        },
                    ));
                });
        });
}

// Enter starts (or restarts) a preload run; only valid on the enter screen
pub fn enter_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<EnterButton>),
    >,
    mut next_stage: ResMut<NextState<AppStage>>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                *bg = BackgroundColor(Color::srgb(0.18, 0.20, 0.24));
                next_stage.set(AppStage::Preloading);
            }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
            Interaction::None => *bg = BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
        }
    }
}

pub fn reflect_enter_button_label(
    stage: Res<State<AppStage>>,
    mut labels: Query<&mut Text, With<EnterButtonLabel>>,
) {
    let label = match stage.get() {
        AppStage::NotStarted => "Enter",
        AppStage::Preloading => "Loading...",
        _ => "Rendering...",
    };
    for mut text in &mut labels {
        if text.0 != label {
            *text = Text::new(label);
        }
    }
}

// Mirrors PreloadProgress into the completed/total readout and the log pane
pub fn reflect_preload_progress(
    progress: Res<PreloadProgress>,
    mut readouts: Query<&mut Text, (With<ProgressReadout>, Without<PreloadLogText>)>,
    mut logs: Query<&mut Text, With<PreloadLogText>>,
) {
    if !progress.is_changed() {
        return;
    }
    if let Ok(mut text) = readouts.single_mut() {
        *text = Text::new(format!("{}/{}", progress.completed, progress.total));
    }
    if let Ok(mut text) = logs.single_mut() {
        // Tail of the log; older lines scroll out of the clipped pane.
        let tail: Vec<&str> = progress
            .log
            .iter()
            .rev()
            .take(10)
            .rev()
            .map(String::as_str)
            .collect();
        *text = Text::new(tail.join("\n"));
    }
}

// The panel snaps closed the moment the reveal starts; only the backdrop fades
pub fn start_reveal(mut content: Query<&mut Node, With<EnterScreenContent>>) {
    info!("Reveal sequence started");
    for mut node in &mut content {
        node.display = Display::None;
    }
}

// Drives the compound delay+fade unit and unmounts the surface when done
pub fn run_reveal_sequence(
    time: Res<Time>,
    sequence: Option<ResMut<RevealSequence>>,
    mut roots: Query<(Entity, &mut BackgroundColor), With<EnterScreenRoot>>,
    mut commands: Commands,
    mut next_stage: ResMut<NextState<AppStage>>,
) {
    let Some(mut sequence) = sequence else { return };

    match sequence.tick(time.delta()) {
        RevealPhase::Waiting => {}
        RevealPhase::Fading { progress } => {
            for (_, mut bg) in &mut roots {
                *bg = BackgroundColor(ENTER_SCREEN_BG.with_alpha(1.0 - progress));
            }
        }
        RevealPhase::Finished => {
            for (entity, _) in &roots {
                commands.entity(entity).despawn();
            }
            commands.remove_resource::<RevealSequence>();
            info!("Loading surface removed, viewer entered");
            next_stage.set(AppStage::Entered);
        }
    }
}
