use thiserror::Error;

/// Errors raised by the configuration-facing parts of the span packer.
///
/// Packing itself never fails; these only come out of config validation and
/// column-count derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    /// A preferred column size of zero cannot divide the viewport.
    #[error("column size must be positive")]
    ZeroColumnSize,
    /// Viewport-driven column counts need a preferred column size.
    #[error("no column size configured for viewport-driven column count")]
    AutoColumnsUnset,
    #[error("invalid span config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SpanError>;
