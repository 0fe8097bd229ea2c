use thiserror::Error;

/// Shader stage reported by a compile failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CornuError {
    #[error("Error in {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("Link error in program: {0}")]
    ShaderLink(String),

    #[error("Degenerate normal at (u={u}, v={v})")]
    DegenerateNormal { u: f64, v: f64 },

    #[error("Unsupported environment: {0}")]
    UnsupportedEnvironment(String),

    #[error("Invalid parameter domain: {0}")]
    InvalidDomain(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CornuError {
    /// Whether the error aborts initialization rather than being recovered locally.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CornuError::DegenerateNormal { .. })
    }
}

pub type Result<T> = std::result::Result<T, CornuError>;
