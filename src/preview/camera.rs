use nalgebra_glm as glm;

pub const MIN_DISTANCE: f32 = 0.1;

const DEFAULT_YAW: f32 = 120.0;
const DEFAULT_PITCH: f32 = 20.0;
const DEFAULT_DISTANCE: f32 = 5.0;

const FOV_Y_DEGREES: f32 = 30.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

/// Orbit camera around a fixed look point at the origin. Angles are kept in
/// degrees because drag deltas map onto them directly.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            distance: DEFAULT_DISTANCE,
        }
    }
}

impl OrbitCamera {
    /// Primary-button drag inside the viewport.
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw += delta_x * 2.0;
        self.pitch += delta_y * 2.0;
    }

    /// Wheel input in notch-sized steps; positive steps zoom out.
    pub fn zoom(&mut self, wheel: f32) {
        self.distance = (self.distance * (1.0 + wheel * 0.1)).max(MIN_DISTANCE);
    }

    fn forward(&self) -> glm::Vec3 {
        let rotation = glm::rotation(self.yaw.to_radians(), &glm::vec3(0.0, 1.0, 0.0))
            * glm::rotation(self.pitch.to_radians(), &glm::vec3(1.0, 0.0, 0.0));
        glm::vec4_to_vec3(&(rotation * glm::vec4(0.0, 0.0, 1.0, 0.0)))
    }

    /// Eye sits along the negative forward axis, looking at the origin.
    pub fn view_proj(&self, aspect: f32) -> glm::Mat4 {
        let eye = -self.forward() * self.distance;
        let view = glm::look_at(
            &eye,
            &glm::vec3(0.0, 0.0, 0.0),
            &glm::vec3(0.0, 1.0, 0.0),
        );
        let proj = glm::perspective(aspect, FOV_Y_DEGREES.to_radians(), NEAR_PLANE, FAR_PLANE);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_adds_double_delta_to_angles() {
        let mut camera = OrbitCamera::default();
        camera.orbit(10.0, -5.0);
        assert_eq!(camera.yaw, DEFAULT_YAW + 20.0);
        assert_eq!(camera.pitch, DEFAULT_PITCH - 10.0);
    }

    #[test]
    fn distance_never_drops_below_floor() {
        let mut camera = OrbitCamera::default();
        for _ in 0..200 {
            camera.zoom(-3.0);
        }
        assert!(camera.distance >= MIN_DISTANCE);

        // A single huge step that would flip the sign is also clamped.
        let mut camera = OrbitCamera::default();
        camera.zoom(-30.0);
        assert!(camera.distance >= MIN_DISTANCE);
    }

    #[test]
    fn zoom_out_scales_distance() {
        let mut camera = OrbitCamera::default();
        camera.zoom(3.0);
        assert!((camera.distance - DEFAULT_DISTANCE * 1.3).abs() < 1e-5);
    }
}
