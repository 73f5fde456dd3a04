pub mod body;
pub mod scene;
pub mod vertex;

pub use body::{Body, BodyKind, DrawBody};
pub use scene::Scene;
pub use vertex::Vertex3D;
