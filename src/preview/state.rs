use std::sync::Arc;

use log::debug;

use crate::animation::{AnimationClip, PlayableGraph};
use crate::error::PreviewError;
use crate::preview::OrbitCamera;
use crate::scene::{AnimatorId, Scene, SceneObject};

/// Graph binding as a tagged state: either nothing is bound, or a graph
/// exists for one concrete animator identity. Reconstructed from
/// (instance, detected animator) on every redraw, so the variant can never
/// dangle across a target or component swap.
#[derive(Debug, Default)]
pub enum GraphBinding {
    #[default]
    Unbound,
    Bound {
        animator: AnimatorId,
        graph: PlayableGraph,
    },
}

impl GraphBinding {
    pub fn graph(&self) -> Option<&PlayableGraph> {
        match self {
            GraphBinding::Bound { graph, .. } => Some(graph),
            GraphBinding::Unbound => None,
        }
    }

    pub fn graph_mut(&mut self) -> Option<&mut PlayableGraph> {
        match self {
            GraphBinding::Bound { graph, .. } => Some(graph),
            GraphBinding::Unbound => None,
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, GraphBinding::Bound { .. })
    }
}

/// All mutable window state in one owned struct, passed by exclusive
/// reference into the tick and redraw entry points.
pub struct PreviewState {
    pub(crate) target: Option<usize>,
    pub(crate) instance: Option<SceneObject>,
    pub(crate) binding: GraphBinding,
    pub(crate) clip: Option<Arc<AnimationClip>>,
    pub looping: bool,
    pub camera: OrbitCamera,
    pub(crate) missing_animator: bool,
}

impl PreviewState {
    pub fn new(target: Option<usize>) -> Self {
        Self {
            target,
            instance: None,
            binding: GraphBinding::Unbound,
            clip: None,
            looping: true,
            camera: OrbitCamera::default(),
            missing_animator: false,
        }
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn instance(&self) -> Option<&SceneObject> {
        self.instance.as_ref()
    }

    /// True while a valid target's instance currently lacks an animator;
    /// rendered as a persistent inline warning.
    pub fn missing_animator(&self) -> bool {
        self.missing_animator
    }

    /// Assigns or clears the preview target. A target without an animator
    /// anywhere in its hierarchy is rejected and the previous state is kept.
    /// Any existing instance and graph are dropped so the next redraw
    /// rebuilds them from scratch.
    pub fn set_target(&mut self, scene: &Scene, new: Option<usize>) -> Result<(), PreviewError> {
        if let Some(index) = new {
            let Some(object) = scene.object(index) else {
                return Ok(());
            };
            if object.find_animator().is_none() {
                return Err(PreviewError::MissingAnimator(object.name.clone()));
            }
        }
        self.target = new;
        self.instance = None;
        self.binding = GraphBinding::Unbound;
        Ok(())
    }

    /// Adopts the clip derived from the current selection. A changed clip
    /// invalidates the playable and rebuilds it against the bound graph.
    pub fn set_clip(&mut self, clip: Option<Arc<AnimationClip>>) {
        let unchanged = match (&self.clip, &clip) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        if unchanged {
            return;
        }
        debug!(
            "selected clip changed to {:?}",
            clip.as_ref().map(|c| c.name.as_str())
        );
        self.clip = clip;
        self.rebuild_playable();
    }

    /// Transport controls are shown only while a clip and a valid playable
    /// both exist.
    pub fn transport_ready(&self) -> bool {
        self.clip.is_some() && self.binding.graph().is_some_and(|g| g.source().is_some())
    }

    pub fn is_paused(&self) -> bool {
        self.binding
            .graph()
            .and_then(PlayableGraph::source)
            .is_none_or(|s| s.speed() == 0.0)
    }

    pub fn current_time(&self) -> f32 {
        self.binding
            .graph()
            .and_then(PlayableGraph::source)
            .map_or(0.0, |s| s.time())
    }

    pub fn clip_duration(&self) -> f32 {
        self.clip.as_ref().map_or(0.0, |c| c.duration)
    }

    /// Play/pause toggle: swaps the playable speed between 0 and 1.
    pub fn toggle_play(&mut self) {
        let Some(source) = self.binding.graph_mut().and_then(PlayableGraph::source_mut) else {
            return;
        };
        let speed = if source.speed() == 0.0 { 1.0 } else { 0.0 };
        source.set_speed(speed);
    }

    /// Slider drag: set absolute time and force a zero-delta re-evaluation
    /// so the pose updates immediately, playing or paused.
    pub fn scrub(&mut self, time: f32) {
        let GraphBinding::Bound { graph, .. } = &mut self.binding else {
            return;
        };
        let Some(instance) = self.instance.as_mut() else {
            return;
        };
        if let Some(source) = graph.source_mut() {
            source.set_time(time);
        }
        graph.evaluate(instance, 0.0);
    }

    /// Per-frame update: advance a playing graph by the wall-clock delta,
    /// then wrap time to zero once it reaches the clip length (overshoot is
    /// dropped on purpose; the wrap happens before the next evaluation).
    pub fn tick(&mut self, dt: f32) {
        let GraphBinding::Bound { graph, .. } = &mut self.binding else {
            return;
        };
        let Some(instance) = self.instance.as_mut() else {
            return;
        };
        if !graph.is_playing() {
            return;
        }
        graph.evaluate(instance, dt);

        if self.looping {
            if let (Some(clip), Some(source)) = (self.clip.as_ref(), graph.source_mut()) {
                if source.time() >= clip.duration {
                    source.set_time(0.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{KeyframeTrack, Track, TrackData};
    use crate::scene::{AnimatorState, Selection};
    use nalgebra_glm as glm;

    fn test_scene() -> Scene {
        Scene::new(vec![
            SceneObject::new("ObjectA")
                .with_animator()
                .with_child(SceneObject::new("Pelvis").at(0.0, 1.0, 0.0)),
            SceneObject::new("ObjectB").with_child(SceneObject::new("Lid")),
        ])
    }

    fn clip_x() -> Arc<AnimationClip> {
        Arc::new(AnimationClip::new(
            "ClipX",
            vec![Track {
                node: "Pelvis".into(),
                data: TrackData::Translation(KeyframeTrack::new(
                    vec![0.0, 1.0],
                    vec![glm::vec3(0.0, 1.0, 0.0), glm::vec3(0.0, 2.0, 0.0)],
                )),
            }],
        ))
    }

    fn ready_preview(scene: &Scene) -> PreviewState {
        let mut preview = PreviewState::new(None);
        preview.set_target(scene, Some(0)).unwrap();
        preview.sync(scene);
        preview.set_clip(Some(clip_x()));
        preview
    }

    #[test]
    fn assign_select_scenario_ends_playing() {
        let scene = test_scene();
        let mut preview = PreviewState::new(None);
        preview.set_target(&scene, Some(0)).unwrap();
        preview.sync(&scene);
        assert!(preview.instance().is_some());
        assert!(preview.binding.is_bound());

        // Selection changes to a state whose motion is ClipX.
        let mut selection = Selection::new(vec![AnimatorState::new("X", Some(clip_x()))]);
        selection.set_active(Some(0));
        preview.set_clip(selection.active_clip());

        let graph = preview.binding.graph().unwrap();
        assert!(graph.is_playing());
        assert_eq!(graph.source().unwrap().clip().name, "ClipX");
        assert!(preview.transport_ready());
    }

    #[test]
    fn target_without_animator_is_rejected_and_state_kept() {
        let scene = test_scene();
        let mut preview = ready_preview(&scene);
        let err = preview.set_target(&scene, Some(1)).unwrap_err();
        assert!(matches!(err, PreviewError::MissingAnimator(_)));
        assert_eq!(preview.target(), Some(0));
        assert!(preview.instance().is_some());
        assert!(preview.binding.is_bound());
    }

    #[test]
    fn toggle_play_swaps_speed_between_zero_and_one() {
        let scene = test_scene();
        let mut preview = ready_preview(&scene);
        assert!(!preview.is_paused());

        preview.toggle_play();
        assert!(preview.is_paused());
        assert_eq!(
            preview.binding.graph().unwrap().source().unwrap().speed(),
            0.0
        );

        preview.toggle_play();
        assert_eq!(
            preview.binding.graph().unwrap().source().unwrap().speed(),
            1.0
        );
    }

    #[test]
    fn scrub_sets_time_immediately_even_when_paused() {
        let scene = test_scene();
        let mut preview = ready_preview(&scene);
        preview.toggle_play();

        preview.scrub(0.37);
        assert!((preview.current_time() - 0.37).abs() < 1e-6);

        // Zero-delta evaluation applied the pose despite speed 0.
        let pelvis = preview
            .instance
            .as_mut()
            .unwrap()
            .find_node_mut("Pelvis")
            .unwrap();
        assert!((pelvis.transform.translation.y - 1.37).abs() < 1e-5);
    }

    #[test]
    fn looping_wraps_time_to_zero_at_clip_end() {
        let scene = test_scene();
        let mut preview = ready_preview(&scene);
        preview.scrub(0.9);

        preview.tick(0.25);
        assert_eq!(preview.current_time(), 0.0);
    }

    #[test]
    fn without_looping_time_runs_past_clip_end() {
        let scene = test_scene();
        let mut preview = ready_preview(&scene);
        preview.looping = false;
        preview.scrub(0.9);

        preview.tick(0.25);
        assert!((preview.current_time() - 1.15).abs() < 1e-6);
    }

    #[test]
    fn tick_without_binding_is_noop() {
        let mut preview = PreviewState::new(None);
        preview.tick(0.5);
        preview.scrub(1.0);
        preview.toggle_play();
        assert!(!preview.transport_ready());
    }
}
