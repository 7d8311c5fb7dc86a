//! Built-in sample content. The tool defines no file formats, so the scene
//! and its clips are constructed procedurally: one rig with an animator on
//! the root, one object without any animator (to exercise the rejection
//! path), and one with the animator on a child.

use std::sync::Arc;

use nalgebra_glm as glm;

use crate::animation::{AnimationClip, KeyframeTrack, Track, TrackData};
use crate::scene::{AnimatorState, Scene, SceneObject, Selection};

pub fn build() -> (Scene, Selection) {
    let villager = SceneObject::new("Villager")
        .with_animator()
        .with_child(
            SceneObject::new("Pelvis")
                .at(0.0, 1.0, 0.0)
                .with_child(
                    SceneObject::new("Spine")
                        .at(0.0, 0.5, 0.0)
                        .with_child(SceneObject::new("Head").at(0.0, 0.6, 0.0))
                        .with_child(SceneObject::new("ArmL").at(-0.45, 0.4, 0.0))
                        .with_child(SceneObject::new("ArmR").at(0.45, 0.4, 0.0)),
                )
                .with_child(SceneObject::new("LegL").at(-0.2, -0.1, 0.0))
                .with_child(SceneObject::new("LegR").at(0.2, -0.1, 0.0)),
        );

    let crate_obj = SceneObject::new("Old Crate").with_child(SceneObject::new("Lid"));

    let campfire = SceneObject::new("Campfire")
        .with_child(SceneObject::new("Flame").at(0.0, 0.3, 0.0).with_animator());

    let scene = Scene::new(vec![villager, crate_obj, campfire]);

    let selection = Selection::new(vec![
        AnimatorState::new("Idle", Some(Arc::new(idle_clip()))),
        AnimatorState::new("Walk", Some(Arc::new(walk_clip()))),
        AnimatorState::new("Flicker", Some(Arc::new(flicker_clip()))),
        AnimatorState::new("Empty", None),
    ]);

    (scene, selection)
}

fn rot_x(degrees: f32) -> glm::Qua<f32> {
    glm::quat_angle_axis(degrees.to_radians(), &glm::vec3(1.0, 0.0, 0.0))
}

fn idle_clip() -> AnimationClip {
    AnimationClip::new(
        "Idle",
        vec![
            Track {
                node: "Pelvis".into(),
                data: TrackData::Translation(KeyframeTrack::new(
                    vec![0.0, 1.0, 2.0],
                    vec![
                        glm::vec3(0.0, 1.0, 0.0),
                        glm::vec3(0.0, 1.06, 0.0),
                        glm::vec3(0.0, 1.0, 0.0),
                    ],
                )),
            },
            Track {
                node: "Spine".into(),
                data: TrackData::Rotation(KeyframeTrack::new(
                    vec![0.0, 1.0, 2.0],
                    vec![rot_x(0.0), rot_x(3.0), rot_x(0.0)],
                )),
            },
        ],
    )
}

fn walk_clip() -> AnimationClip {
    let swing = |phase: f32| {
        KeyframeTrack::new(
            vec![0.0, 0.3, 0.6, 0.9, 1.2],
            vec![
                rot_x(25.0 * phase),
                rot_x(0.0),
                rot_x(-25.0 * phase),
                rot_x(0.0),
                rot_x(25.0 * phase),
            ],
        )
    };
    AnimationClip::new(
        "Walk",
        vec![
            Track {
                node: "LegL".into(),
                data: TrackData::Rotation(swing(1.0)),
            },
            Track {
                node: "LegR".into(),
                data: TrackData::Rotation(swing(-1.0)),
            },
            Track {
                node: "ArmL".into(),
                data: TrackData::Rotation(swing(-0.6)),
            },
            Track {
                node: "ArmR".into(),
                data: TrackData::Rotation(swing(0.6)),
            },
        ],
    )
}

fn flicker_clip() -> AnimationClip {
    AnimationClip::new(
        "Flicker",
        vec![Track {
            node: "Flame".into(),
            data: TrackData::Scale(KeyframeTrack::new(
                vec![0.0, 0.2, 0.4, 0.6, 0.8],
                vec![
                    glm::vec3(1.0, 1.0, 1.0),
                    glm::vec3(1.15, 0.9, 1.15),
                    glm::vec3(0.9, 1.2, 0.9),
                    glm::vec3(1.1, 0.95, 1.1),
                    glm::vec3(1.0, 1.0, 1.0),
                ],
            )),
        }],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_covers_every_target_kind() {
        let (scene, _) = build();
        let villager = scene.object(scene.index_of("Villager").unwrap()).unwrap();
        assert!(villager.find_animator().is_some());

        let crate_obj = scene.object(scene.index_of("Old Crate").unwrap()).unwrap();
        assert!(crate_obj.find_animator().is_none());

        // Animator on a descendant, not the root.
        let campfire = scene.object(scene.index_of("Campfire").unwrap()).unwrap();
        assert!(campfire.animator.is_none());
        assert!(campfire.find_animator().is_some());
    }

    #[test]
    fn demo_clips_have_positive_duration() {
        let (_, selection) = build();
        for state in selection.states() {
            if let Some(clip) = &state.motion {
                assert!(clip.duration > 0.0, "clip {} has no keyframes", clip.name);
            }
        }
    }
}
