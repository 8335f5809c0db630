#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorbarScaleError {
    #[error("Empty domain")]
    EmptyDomain,

    #[error("Empty range")]
    EmptyRange,

    #[error("Domain contains non-finite values: {0:?}")]
    NonFiniteDomain(Vec<f32>),

    #[error("Thresholds must be in ascending order: {0:?}")]
    ThresholdsNotAscending(Vec<f32>),

    #[error(
        "Threshold domain length ({domain_len}) must be one less than range length ({range_len})"
    )]
    ThresholdDomainMismatch { domain_len: usize, range_len: usize },

    #[error("Invalid format specifier: {0:?}")]
    InvalidFormatSpecifier(String),

    #[error("Unsupported format type {format_type:?} in specifier {specifier:?}")]
    UnsupportedFormatType {
        specifier: String,
        format_type: char,
    },

    #[error("Invalid color {0:?}")]
    InvalidColor(String),

    #[error("Color interpolation failed: {0}")]
    InterpolationError(String),
}
