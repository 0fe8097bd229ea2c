pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{CornuError, Result, ShaderStage};
pub use tolerance::Tolerance;
pub use traits::Validate;
