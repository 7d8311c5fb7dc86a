pub mod camera;
pub mod lifecycle;
pub mod state;

pub use camera::OrbitCamera;
pub use state::{GraphBinding, PreviewState};
