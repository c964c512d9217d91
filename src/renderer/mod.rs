//! Rendering module
//!
//! Primitives are tessellated into flat-color triangles (`shapes`), collected
//! per frame (`batch`), and drawn through a WebGPU pipeline (`pipeline`).

pub mod batch;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use batch::{FrameBatch, TextItem};
pub use pipeline::RenderState;
pub use scene::draw_scene;
pub use vertex::Vertex;
