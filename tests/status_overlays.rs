mod common;

use std::time::Duration;

use common::TestScene;
use duskhollow::ecs::components::{EffectKind, IconKind};
use duskhollow::events::EntityEvent;
use rendering::recording::SceneCommand;

fn status(id: u32, effect: EffectKind, active: bool, looping: bool) -> EntityEvent {
    EntityEvent::StatusEffect {
        id,
        effect,
        active,
        looping,
    }
}

#[test]
fn sustained_poison_shows_until_cured() {
    let mut scene = TestScene::new();
    let id = scene.spawn_entity("grass-scamp", "d");
    let overlay = scene.overlay_sprite(id, EffectKind::Poison);

    assert!(!scene.scene().sprite(overlay).unwrap().visible);

    scene.send(status(id, EffectKind::Poison, true, true));
    scene.update();
    let state = scene.scene().sprite(overlay).unwrap();
    assert!(state.visible);
    assert_eq!(state.playing.as_deref(), Some("poison"));

    // A looping overlay never hides on its own.
    for _ in 0..8 {
        scene.advance_time(Duration::from_millis(500));
    }
    assert!(scene.scene().sprite(overlay).unwrap().visible);

    scene.send(status(id, EffectKind::Poison, false, false));
    scene.update();
    let state = scene.scene().sprite(overlay).unwrap();
    assert!(!state.visible);
    assert_eq!(state.playing, None);

    // Visibility flipped true exactly once and false exactly once, with no
    // stale poison animation after the cure.
    let toggles: Vec<bool> = scene
        .scene()
        .commands()
        .iter()
        .filter_map(|c| match c {
            SceneCommand::SetVisible { sprite, visible } if *sprite == overlay => Some(*visible),
            _ => None,
        })
        .collect();
    assert_eq!(toggles, vec![false, true, false]); // hidden at spawn, shown, cured
}

#[test]
fn one_shot_overlay_hides_itself_after_its_clip() {
    let mut scene = TestScene::new();
    let id = scene.spawn_entity("knight", "d");
    let overlay = scene.overlay_sprite(id, EffectKind::EnergyRegen);

    scene.send(status(id, EffectKind::EnergyRegen, true, false));
    scene.update();
    assert!(scene.scene().sprite(overlay).unwrap().visible);

    // Two frames at 500 ms each, then the overlay hides without an
    // explicit hide call.
    scene.advance_time(Duration::from_millis(500));
    assert!(scene.scene().sprite(overlay).unwrap().visible);
    scene.advance_time(Duration::from_millis(500));

    let state = scene.scene().sprite(overlay).unwrap();
    assert!(!state.visible);
    assert_eq!(state.playing, None);
}

#[test]
fn overlays_toggle_independently() {
    let mut scene = TestScene::new();
    let id = scene.spawn_entity("mage", "d");
    let poison = scene.overlay_sprite(id, EffectKind::Poison);
    let burn = scene.overlay_sprite(id, EffectKind::Burn);

    scene.send(status(id, EffectKind::Poison, true, true));
    scene.send(status(id, EffectKind::Burn, true, true));
    scene.update();
    assert!(scene.scene().sprite(poison).unwrap().visible);
    assert!(scene.scene().sprite(burn).unwrap().visible);

    scene.send(status(id, EffectKind::Burn, false, false));
    scene.update();
    assert!(scene.scene().sprite(poison).unwrap().visible);
    assert!(!scene.scene().sprite(burn).unwrap().visible);
    assert_eq!(scene.scene().playing(poison), Some("poison"));
}

#[test]
fn status_icons_are_plain_visibility_toggles() {
    let mut scene = TestScene::new();
    let id = scene.spawn_entity("knight", "d");

    scene.send(EntityEvent::StatusIcon {
        id,
        icon: IconKind::Curse,
        active: true,
    });
    scene.update();

    // The curse icon never animates; no clip may be playing on any sprite
    // other than the base walk clips.
    let curse_visible = scene
        .scene()
        .commands()
        .iter()
        .any(|c| matches!(c, SceneCommand::SetVisible { visible: true, .. }));
    assert!(curse_visible);
    assert!(!scene
        .scene()
        .commands()
        .iter()
        .any(|c| matches!(c, SceneCommand::PlayClip { key, .. } if key == "curse-icon")));

    scene.send(EntityEvent::StatusIcon {
        id,
        icon: IconKind::Curse,
        active: false,
    });
    scene.update();
}

#[test]
fn damage_markers_flash_and_expire() {
    let mut scene = TestScene::new();
    let id = scene.spawn_entity("grass-scamp", "d");
    let marker = scene.damage_marker_label(id).unwrap();

    scene.send(EntityEvent::Damaged { id, amount: 12 });
    scene.update();

    let label = scene.scene().label(marker).unwrap();
    assert!(label.visible);
    assert_eq!(label.text, "-12");

    scene.advance_time(Duration::from_millis(1100));
    assert!(!scene.scene().label(marker).unwrap().visible);
}

#[test]
fn status_updates_for_unknown_entities_are_no_ops() {
    let mut scene = TestScene::new();
    scene.send(status(999, EffectKind::Burn, true, true));
    scene.send(EntityEvent::Damaged {
        id: 999,
        amount: 5,
    });
    scene.update();
    assert_eq!(scene.scene().sprite_count(), 0);
}
