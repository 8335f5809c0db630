use colorbar_common::types::{Rgba, BLACK};

#[derive(Debug, Clone, PartialEq)]
pub struct AxisConfig {
    /// Length of each tick mark below the axis
    pub tick_size: f32,
    /// Gap between the end of a tick mark and its label
    pub tick_padding: f32,
    /// How far tick marks extend above the axis
    pub tick_extent: f32,
    pub font: String,
    pub font_size: f32,
    pub color: Rgba,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            tick_size: 6.0,
            tick_padding: 3.0,
            tick_extent: 0.0,
            font: "sans-serif".to_string(),
            font_size: 10.0,
            color: BLACK,
        }
    }
}
