//! Headless demo: runs the presentation core against the recording scene
//! and replays a short scripted session, logging what the engine was asked
//! to draw. Useful for eyeballing the event->scene pipeline without a GPU.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rendering::RecordingScene;

use duskhollow::events::{EntityEvent, EntityWalk, SpawnEntity};
use duskhollow::ecs::components::EffectKind;
use duskhollow::{HudEvent, PanelKind, SceneState};

const TICK: Duration = Duration::from_millis(100);

fn main() {
    // Configure tracing to respect RUST_LOG if set, otherwise default to
    // the fmt layer's defaults.
    tracing_subscriber::fmt().with_target(false).try_init().ok();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(duskhollow::CorePlugin)
        .insert_resource(SceneState::new(RecordingScene::new()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(TICK));

    app.finish();
    app.cleanup();

    let script: Vec<(u64, EntityEvent)> = vec![
        (
            0,
            EntityEvent::Spawn(SpawnEntity {
                id: 1,
                kind: "mage".to_string(),
                x: 6.0,
                y: 8.0,
                direction: "d".to_string(),
                display_name_color: None,
            }),
        ),
        (
            2,
            EntityEvent::Walk(EntityWalk {
                id: 1,
                to: (6.0, 7.0),
                direction: "u".to_string(),
                play_animation: true,
            }),
        ),
        (
            10,
            EntityEvent::StatusEffect {
                id: 1,
                effect: EffectKind::Poison,
                active: true,
                looping: true,
            },
        ),
        (12, EntityEvent::Stopped { id: 1 }),
        (
            18,
            EntityEvent::StatusEffect {
                id: 1,
                effect: EffectKind::Poison,
                active: false,
                looping: false,
            },
        ),
        (24, EntityEvent::Remove { id: 1 }),
    ];

    for tick in 0..30u64 {
        for (at, event) in &script {
            if *at == tick {
                app.world_mut()
                    .resource_mut::<Messages<EntityEvent>>()
                    .write(event.clone());
            }
        }
        if tick == 20 {
            app.world_mut()
                .resource_mut::<Messages<HudEvent>>()
                .write(HudEvent::OpenPanel(PanelKind::Stats));
        }
        app.update();
    }

    let hud = app.world().resource::<duskhollow::HudState>();
    tracing::info!("Final HUD panel: {:?}", hud.snapshot.shown_panel);

    let scene = app.world().resource::<SceneState>();
    if let Some(recording) = scene.backend.as_any().downcast_ref::<RecordingScene>() {
        tracing::info!(
            "Scene after session: {} sprites, {} labels, {} clips registered",
            recording.sprite_count(),
            recording.label_count(),
            recording.clip_count(),
        );
        for command in recording.commands() {
            tracing::info!("scene <- {command:?}");
        }
    }
}
