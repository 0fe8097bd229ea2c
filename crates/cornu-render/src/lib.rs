pub mod animation;
pub mod backend;
pub mod camera;
pub mod controls;
pub mod pipeline;
pub mod scene;
pub mod viewer;

// Re-export main types
pub use animation::{AnimationDriver, AnimationState, FrameScheduler, ManualScheduler, TaskHandle};
pub use backend::{RecordingBackend, RenderBackend};
pub use camera::Camera;
pub use controls::{Control, Effect, Key};
pub use pipeline::Renderer;
pub use scene::{Material, SceneConfig, SurfaceUniforms};
pub use viewer::Viewer;
