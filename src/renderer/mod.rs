pub mod line_vertex;
pub mod lines;
mod render;
mod renderer;

pub use line_vertex::LineVertex;
pub use renderer::Renderer;
