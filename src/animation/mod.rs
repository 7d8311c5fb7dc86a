// Minimal real-time animation runtime: keyframe clips, a single-clip
// playable node and a manual-update graph binding it to an animator.

pub mod clip;
pub mod graph;
pub mod playable;

pub use clip::{AnimationClip, Interpolate, KeyframeTrack, Track, TrackData};
pub use graph::{AnimationOutput, PlayableGraph};
pub use playable::ClipPlayable;
