pub mod export;
pub mod mesh;
pub mod segment;
pub mod tessellator;

pub use mesh::{LineMesh, SurfaceMesh};
pub use segment::{light_indicator, velocity_path};
pub use tessellator::{GridTessellator, TessellationStats};
