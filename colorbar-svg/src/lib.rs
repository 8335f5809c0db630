pub mod error;
pub mod renderer;
pub mod xml;

pub use renderer::SvgRenderer;
