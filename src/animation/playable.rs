use std::sync::Arc;

use crate::animation::AnimationClip;

/// Time-driven source node of the playable graph: one clip, a local time and
/// a playback speed. Pausing is speed 0; the node itself never loops, the
/// window decides when to wrap time.
#[derive(Debug, Clone)]
pub struct ClipPlayable {
    clip: Arc<AnimationClip>,
    time: f32,
    speed: f32,
}

impl ClipPlayable {
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            time: 0.0,
            speed: 1.0,
        }
    }

    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn advance(&mut self, dt: f32) {
        self.time += dt * self.speed;
    }
}
