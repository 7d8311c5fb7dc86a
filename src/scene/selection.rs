use std::sync::Arc;

use crate::animation::AnimationClip;

/// A named entry in the state list; its motion is the clip the preview plays.
/// States without a motion are selectable but leave the preview clip-less.
pub struct AnimatorState {
    pub name: String,
    pub motion: Option<Arc<AnimationClip>>,
}

impl AnimatorState {
    pub fn new(name: impl Into<String>, motion: Option<Arc<AnimationClip>>) -> Self {
        Self {
            name: name.into(),
            motion,
        }
    }
}

/// Stand-in for the host editor's selection: a list of animator states with
/// at most one active. The preview derives its clip from the active state
/// every frame.
pub struct Selection {
    states: Vec<AnimatorState>,
    active: Option<usize>,
}

impl Selection {
    pub fn new(states: Vec<AnimatorState>) -> Self {
        Self {
            states,
            active: None,
        }
    }

    pub fn states(&self) -> &[AnimatorState] {
        &self.states
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn set_active(&mut self, index: Option<usize>) {
        self.active = index.filter(|i| *i < self.states.len());
    }

    pub fn active_clip(&self) -> Option<Arc<AnimationClip>> {
        self.active
            .and_then(|i| self.states.get(i))
            .and_then(|state| state.motion.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_clip_follows_selected_state() {
        let clip = Arc::new(AnimationClip::new("Idle", Vec::new()));
        let mut selection = Selection::new(vec![
            AnimatorState::new("Idle", Some(clip.clone())),
            AnimatorState::new("Empty", None),
        ]);
        assert!(selection.active_clip().is_none());

        selection.set_active(Some(0));
        assert!(Arc::ptr_eq(&selection.active_clip().unwrap(), &clip));

        selection.set_active(Some(1));
        assert!(selection.active_clip().is_none());
    }

    #[test]
    fn out_of_range_selection_is_dropped() {
        let mut selection = Selection::new(Vec::new());
        selection.set_active(Some(3));
        assert!(selection.active().is_none());
    }
}
