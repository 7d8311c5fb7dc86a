//! Per-redraw reconciliation of target, instance and playable graph. Runs
//! before the UI every frame, so user edits from the previous frame are
//! always reflected in what gets drawn next.

use log::{debug, info, warn};

use crate::animation::{ClipPlayable, PlayableGraph};
use crate::preview::{GraphBinding, PreviewState};
use crate::scene::Scene;

impl PreviewState {
    /// Reconciles instance and graph with the current target:
    /// instantiates a missing instance, drops one whose target was cleared,
    /// and rebinds the graph whenever the detected animator identity
    /// differs from the bound one.
    pub fn sync(&mut self, scene: &Scene) {
        if self.instance.is_none() {
            if let Some(index) = self.target {
                if let Some(object) = scene.object(index) {
                    info!("instantiating preview copy of '{}'", object.name);
                    self.instance = Some(object.instantiate());
                } else {
                    // Stale index, e.g. a restored target that no longer exists.
                    self.target = None;
                }
            }
        }
        if self.target.is_none() && self.instance.is_some() {
            info!("destroying preview instance");
            self.instance = None;
        }

        let Some(instance) = self.instance.as_ref() else {
            self.binding = GraphBinding::Unbound;
            self.missing_animator = false;
            return;
        };

        let Some(animator) = instance.find_animator().map(|a| a.id()) else {
            if self.binding.is_bound() {
                warn!("preview instance lost its animator, tearing down graph");
            }
            self.binding = GraphBinding::Unbound;
            self.missing_animator = true;
            return;
        };
        self.missing_animator = false;

        let already_bound = matches!(
            &self.binding,
            GraphBinding::Bound { animator: bound, .. } if *bound == animator
        );
        if already_bound {
            return;
        }

        debug!("binding playable graph to animator {animator:?}");
        self.binding = GraphBinding::Bound {
            animator,
            graph: PlayableGraph::new(animator),
        };
        self.rebuild_playable();
    }

    /// Drops any prior playable; with a clip selected, attaches a fresh one
    /// at normal speed and starts the graph, otherwise stops it. No-op while
    /// nothing is bound.
    pub(crate) fn rebuild_playable(&mut self) {
        let GraphBinding::Bound { graph, .. } = &mut self.binding else {
            return;
        };
        graph.clear_source();
        match &self.clip {
            Some(clip) => {
                let mut playable = ClipPlayable::new(clip.clone());
                playable.set_speed(1.0);
                graph.set_source(playable);
                graph.play();
            }
            None => graph.stop(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::animation::AnimationClip;
    use crate::scene::SceneObject;

    fn scene() -> Scene {
        Scene::new(vec![
            SceneObject::new("Hero").with_animator(),
            SceneObject::new("Prop"),
            SceneObject::new("Lantern")
                .with_child(SceneObject::new("Bulb").with_animator()),
        ])
    }

    #[test]
    fn sync_creates_instance_once_and_binds_graph() {
        let scene = scene();
        let mut preview = PreviewState::new(Some(0));
        preview.sync(&scene);
        assert!(preview.instance().is_some());
        assert!(preview.binding.is_bound());

        let first = preview.binding.graph().unwrap().bound_animator();
        preview.sync(&scene);
        // Identity unchanged, so the graph is not rebuilt.
        assert_eq!(preview.binding.graph().unwrap().bound_animator(), first);
    }

    #[test]
    fn clearing_target_destroys_instance_and_graph() {
        let scene = scene();
        let mut preview = PreviewState::new(Some(0));
        preview.sync(&scene);

        preview.set_target(&scene, None).unwrap();
        preview.sync(&scene);
        assert!(preview.instance().is_none());
        assert!(!preview.binding.is_bound());
        assert!(!preview.missing_animator());
    }

    #[test]
    fn swapping_target_rebinds_to_new_identity() {
        let scene = scene();
        let mut preview = PreviewState::new(Some(0));
        preview.sync(&scene);
        let first = preview.binding.graph().unwrap().bound_animator();

        preview.set_target(&scene, Some(2)).unwrap();
        preview.sync(&scene);
        let second = preview.binding.graph().unwrap().bound_animator();
        assert_ne!(first, second);
    }

    #[test]
    fn animator_on_descendant_satisfies_binding() {
        let scene = scene();
        let mut preview = PreviewState::new(Some(2));
        preview.sync(&scene);
        assert!(preview.binding.is_bound());
        assert!(!preview.missing_animator());
    }

    #[test]
    fn instance_losing_animator_reports_warning_and_tears_down() {
        let scene = scene();
        let mut preview = PreviewState::new(Some(0));
        preview.sync(&scene);
        assert!(preview.binding.is_bound());

        // Simulate the component disappearing from the live instance.
        preview.instance.as_mut().unwrap().animator = None;
        preview.sync(&scene);
        assert!(!preview.binding.is_bound());
        assert!(preview.missing_animator());

        // Restoring it clears the warning and rebinds.
        preview.instance.as_mut().unwrap().animator =
            Some(crate::scene::Animator::new());
        preview.sync(&scene);
        assert!(preview.binding.is_bound());
        assert!(!preview.missing_animator());
    }

    #[test]
    fn rebuild_without_clip_leaves_graph_stopped() {
        let scene = scene();
        let mut preview = PreviewState::new(Some(0));
        preview.sync(&scene);
        let graph = preview.binding.graph().unwrap();
        assert!(!graph.is_playing());
        assert!(graph.source().is_none());

        preview.set_clip(Some(Arc::new(AnimationClip::new("Pose", Vec::new()))));
        let graph = preview.binding.graph().unwrap();
        assert!(graph.is_playing());
        assert!(graph.source().is_some());

        preview.set_clip(None);
        let graph = preview.binding.graph().unwrap();
        assert!(!graph.is_playing());
        assert!(graph.source().is_none());
    }

    #[test]
    fn stale_restored_target_degrades_to_none() {
        let scene = scene();
        let mut preview = PreviewState::new(Some(42));
        preview.sync(&scene);
        assert!(preview.target().is_none());
        assert!(preview.instance().is_none());
    }
}
