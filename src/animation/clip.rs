use nalgebra_glm as glm;

use crate::scene::SceneObject;

/// Values a keyframe track can interpolate between.
pub trait Interpolate: Copy {
    fn interpolate(a: Self, b: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

impl Interpolate for glm::Vec3 {
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        glm::lerp(&a, &b, t)
    }
}

impl Interpolate for glm::Qua<f32> {
    fn interpolate(a: Self, b: Self, t: f32) -> Self {
        glm::quat_normalize(&glm::quat_slerp(&a, &b, t))
    }
}

/// Sorted keyframe times with one value per key. Sampling clamps at both
/// ends and interpolates linearly inside a segment.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
}

impl<T: Interpolate> KeyframeTrack<T> {
    pub fn new(times: Vec<f32>, values: Vec<T>) -> Self {
        debug_assert!(!times.is_empty());
        debug_assert_eq!(times.len(), values.len());
        debug_assert!(times.windows(2).all(|w| w[0] <= w[1]));
        Self { times, values }
    }

    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    pub fn sample(&self, time: f32) -> T {
        if time <= self.times[0] {
            return self.values[0];
        }
        let last = self.times.len() - 1;
        if time >= self.times[last] {
            return self.values[last];
        }
        let next = self.times.partition_point(|&t| t <= time);
        let prev = next - 1;
        let span = self.times[next] - self.times[prev];
        let t = if span > 0.0 {
            (time - self.times[prev]) / span
        } else {
            0.0
        };
        T::interpolate(self.values[prev], self.values[next], t)
    }
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Translation(KeyframeTrack<glm::Vec3>),
    Rotation(KeyframeTrack<glm::Qua<f32>>),
    Scale(KeyframeTrack<glm::Vec3>),
}

impl TrackData {
    fn end_time(&self) -> f32 {
        match self {
            TrackData::Translation(t) | TrackData::Scale(t) => t.end_time(),
            TrackData::Rotation(t) => t.end_time(),
        }
    }
}

/// One animated property of one node, addressed by node name.
#[derive(Debug, Clone)]
pub struct Track {
    pub node: String,
    pub data: TrackData,
}

/// A fixed animation asset: named keyframe tracks over a shared time range.
/// Duration is the latest keyframe across all tracks.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.data.end_time())
            .fold(0.0_f32, f32::max);
        Self {
            name: name.into(),
            duration,
            tracks,
        }
    }

    /// Writes the pose at `time` into the subtree rooted at `root`. Tracks
    /// addressing nodes missing from the subtree are skipped.
    pub fn apply(&self, time: f32, root: &mut SceneObject) {
        for track in &self.tracks {
            let Some(node) = root.find_node_mut(&track.node) else {
                continue;
            };
            match &track.data {
                TrackData::Translation(t) => node.transform.translation = t.sample(time),
                TrackData::Rotation(t) => node.transform.rotation = t.sample(time),
                TrackData::Scale(t) => node.transform.scale = t.sample(time),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob_clip() -> AnimationClip {
        AnimationClip::new(
            "Bob",
            vec![Track {
                node: "Pelvis".into(),
                data: TrackData::Translation(KeyframeTrack::new(
                    vec![0.0, 1.0, 2.0],
                    vec![
                        glm::vec3(0.0, 1.0, 0.0),
                        glm::vec3(0.0, 2.0, 0.0),
                        glm::vec3(0.0, 1.0, 0.0),
                    ],
                )),
            }],
        )
    }

    #[test]
    fn duration_is_latest_keyframe() {
        assert_eq!(bob_clip().duration, 2.0);
    }

    #[test]
    fn sampling_clamps_at_both_ends() {
        let track = KeyframeTrack::new(vec![0.5, 1.0], vec![2.0_f32, 4.0]);
        assert_eq!(track.sample(0.0), 2.0);
        assert_eq!(track.sample(9.0), 4.0);
    }

    #[test]
    fn sampling_interpolates_inside_segment() {
        let track = KeyframeTrack::new(vec![0.0, 1.0], vec![0.0_f32, 10.0]);
        assert!((track.sample(0.25) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn apply_writes_pose_to_named_node() {
        let clip = bob_clip();
        let mut root = SceneObject::new("Root")
            .with_child(SceneObject::new("Pelvis").at(0.0, 1.0, 0.0));
        clip.apply(1.0, &mut root);
        let pelvis = root.find_node_mut("Pelvis").unwrap();
        assert!((pelvis.transform.translation.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn apply_skips_missing_nodes() {
        let clip = bob_clip();
        let mut root = SceneObject::new("Lamp");
        clip.apply(0.5, &mut root);
    }
}
