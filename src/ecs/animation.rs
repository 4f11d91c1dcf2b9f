use bevy::prelude::*;

use super::catalog::AnimationSet;

/// Shadow of the clip currently playing on an entity's sprite. The scene
/// backend animates the frames; this component tracks where playback is so
/// the core knows when a non-looping clip has finished.
#[derive(Component)]
pub struct Animation {
    pub clip: String,
    pub mode: AnimationMode,
    pub current_frame: usize,
    pub end_index: usize,
    pub frame_duration: f32,
}

#[derive(Component)]
pub struct AnimationTimer(pub Timer);

#[derive(Bundle)]
pub struct AnimationBundle {
    pub animation: Animation,
    pub timer: AnimationTimer,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationMode {
    OneShot,
    Loop,
    Finished,
}

impl Animation {
    pub fn new(clip: impl Into<String>, mode: AnimationMode, frame_duration: f32, frame_count: usize) -> Self {
        Self {
            clip: clip.into(),
            mode,
            current_frame: 0,
            end_index: frame_count.max(1) - 1,
            frame_duration,
        }
    }
}

impl AnimationBundle {
    /// Shadow for a compiled per-direction clip.
    pub fn from_set(set: &AnimationSet) -> Self {
        let mode = if set.looping {
            AnimationMode::Loop
        } else {
            AnimationMode::OneShot
        };
        let frame_count = set.frames.len();
        let frame_duration = set.duration_ms as f32 / 1000.0 / frame_count.max(1) as f32;
        Self::from_animation(Animation::new(set.key.clone(), mode, frame_duration, frame_count))
    }

    /// Shadow for a two-frame status overlay clip (500 ms per frame).
    pub fn overlay(clip: impl Into<String>, looping: bool) -> Self {
        let mode = if looping {
            AnimationMode::Loop
        } else {
            AnimationMode::OneShot
        };
        Self::from_animation(Animation::new(clip, mode, 0.5, 2))
    }

    pub fn from_animation(animation: Animation) -> Self {
        let duration = animation.frame_duration;
        Self {
            animation,
            timer: AnimationTimer(Timer::from_seconds(duration, TimerMode::Repeating)),
        }
    }
}

pub fn animation_system(
    time: Res<Time>,
    mut query: Query<(&mut Animation, &mut AnimationTimer)>,
) {
    for (mut animation, mut timer) in query.iter_mut() {
        if animation.mode == AnimationMode::Finished {
            animation.bypass_change_detection();
            continue;
        }

        timer.0.tick(time.delta());

        if timer.0.just_finished() {
            if animation.current_frame < animation.end_index {
                animation.current_frame += 1;
            } else {
                match animation.mode {
                    AnimationMode::Loop => {
                        animation.current_frame = 0;
                    }
                    AnimationMode::OneShot => {
                        animation.current_frame = 0;
                        animation.mode = AnimationMode::Finished;
                        // Keep the component; render sync detects Finished
                        // and reverts the sprite to its resting state.
                    }
                    AnimationMode::Finished => {
                        // Unreachable due to top-level skip
                    }
                }
            }
        } else {
            // Prevent triggering change detection unless the frame actually advanced
            animation.bypass_change_detection();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn tick(app: &mut App, ms: u64) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(ms));
        app.update();
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.add_systems(Update, animation_system);
        app
    }

    #[test]
    fn one_shot_finishes_after_its_frames() {
        let mut app = test_app();
        let entity = app
            .world_mut()
            .spawn(AnimationBundle::from_animation(Animation::new(
                "knight-up",
                AnimationMode::OneShot,
                0.125,
                4,
            )))
            .id();

        for _ in 0..3 {
            tick(&mut app, 125);
            let anim = app.world().get::<Animation>(entity).unwrap();
            assert_ne!(anim.mode, AnimationMode::Finished);
        }
        tick(&mut app, 125);
        let anim = app.world().get::<Animation>(entity).unwrap();
        assert_eq!(anim.mode, AnimationMode::Finished);
    }

    #[test]
    fn looping_clip_never_finishes() {
        let mut app = test_app();
        let entity = app
            .world_mut()
            .spawn(AnimationBundle::overlay("poison", true))
            .id();

        for _ in 0..20 {
            tick(&mut app, 500);
        }
        let anim = app.world().get::<Animation>(entity).unwrap();
        assert_eq!(anim.mode, AnimationMode::Loop);
    }

    #[test]
    fn one_shot_overlay_finishes_after_both_frames() {
        let mut app = test_app();
        let entity = app
            .world_mut()
            .spawn(AnimationBundle::overlay("cured", false))
            .id();

        tick(&mut app, 500);
        assert_ne!(
            app.world().get::<Animation>(entity).unwrap().mode,
            AnimationMode::Finished
        );
        tick(&mut app, 500);
        assert_eq!(
            app.world().get::<Animation>(entity).unwrap().mode,
            AnimationMode::Finished
        );
    }
}
