use log::debug;

use crate::animation::ClipPlayable;
use crate::scene::{AnimatorId, SceneObject};

/// Output end of the graph: addresses the animator component whose subtree
/// receives sampled poses.
#[derive(Debug, Clone, Copy)]
pub struct AnimationOutput {
    animator: AnimatorId,
}

/// Manual-update evaluation graph: at most one clip playable feeding one
/// animation output. `evaluate` is the only thing that moves time forward;
/// there is no internal clock.
#[derive(Debug)]
pub struct PlayableGraph {
    output: AnimationOutput,
    source: Option<ClipPlayable>,
    playing: bool,
}

impl PlayableGraph {
    pub fn new(animator: AnimatorId) -> Self {
        debug!("playable graph created for animator {animator:?}");
        Self {
            output: AnimationOutput { animator },
            source: None,
            playing: false,
        }
    }

    pub fn bound_animator(&self) -> AnimatorId {
        self.output.animator
    }

    pub fn set_source(&mut self, playable: ClipPlayable) {
        self.source = Some(playable);
    }

    pub fn clear_source(&mut self) {
        self.source = None;
    }

    pub fn source(&self) -> Option<&ClipPlayable> {
        self.source.as_ref()
    }

    pub fn source_mut(&mut self) -> Option<&mut ClipPlayable> {
        self.source.as_mut()
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advances the source by `dt` (scaled by its speed) and writes the
    /// sampled pose into the subtree owned by the bound animator. A zero
    /// delta re-evaluates the current time, which is how scrubbing gets
    /// immediate visual feedback. No-op without a source or when the bound
    /// animator is gone from `root`.
    pub fn evaluate(&mut self, root: &mut SceneObject, dt: f32) {
        let Some(source) = self.source.as_mut() else {
            return;
        };
        source.advance(dt);
        let clip = source.clip().clone();
        let time = source.time();
        if let Some(node) = root.find_animated_mut(self.output.animator) {
            clip.apply(time, node);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nalgebra_glm as glm;

    use super::*;
    use crate::animation::{AnimationClip, KeyframeTrack, Track, TrackData};

    fn slide_clip() -> Arc<AnimationClip> {
        Arc::new(AnimationClip::new(
            "Slide",
            vec![Track {
                node: "Pelvis".into(),
                data: TrackData::Translation(KeyframeTrack::new(
                    vec![0.0, 1.0],
                    vec![glm::vec3(0.0, 0.0, 0.0), glm::vec3(1.0, 0.0, 0.0)],
                )),
            }],
        ))
    }

    fn animated_root() -> SceneObject {
        SceneObject::new("Root")
            .with_child(SceneObject::new("Pelvis").with_animator())
    }

    #[test]
    fn evaluate_advances_and_applies_pose() {
        let mut root = animated_root();
        let id = root.find_animator().unwrap().id();
        let mut graph = PlayableGraph::new(id);
        graph.set_source(ClipPlayable::new(slide_clip()));
        graph.play();

        graph.evaluate(&mut root, 0.5);

        let pelvis = root.find_node_mut("Pelvis").unwrap();
        assert!((pelvis.transform.translation.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn evaluate_without_source_is_noop() {
        let mut root = animated_root();
        let id = root.find_animator().unwrap().id();
        let mut graph = PlayableGraph::new(id);
        graph.evaluate(&mut root, 1.0);
        let pelvis = root.find_node_mut("Pelvis").unwrap();
        assert_eq!(pelvis.transform.translation.x, 0.0);
    }

    #[test]
    fn evaluate_tolerates_missing_animator() {
        let mut root = animated_root();
        let id = root.find_animator().unwrap().id();
        let mut graph = PlayableGraph::new(id);
        graph.set_source(ClipPlayable::new(slide_clip()));

        // Rebuild the subtree so the bound identity no longer exists.
        root = animated_root();
        graph.evaluate(&mut root, 0.5);
        assert!((graph.source().unwrap().time() - 0.5).abs() < 1e-6);
    }
}
