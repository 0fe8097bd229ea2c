use crate::error::Result;

/// Validate the invariants of a configuration or domain value.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
