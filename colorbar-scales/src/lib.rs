pub mod array;
pub mod color_interpolator;
pub mod continuous;
pub mod error;
pub mod format_num;
pub mod formatter;
pub mod positional;
pub mod quantile;
pub mod scale;
pub mod scheme;
pub mod threshold;
