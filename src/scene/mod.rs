pub mod demo;
pub mod object;
pub mod selection;

pub use object::{Animator, AnimatorId, Scene, SceneObject, Transform};
pub use selection::{AnimatorState, Selection};
