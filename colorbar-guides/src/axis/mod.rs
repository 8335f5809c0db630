pub mod bottom;
pub mod opts;

/// A positioned, labeled tick
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f32,
    pub label: String,
}

impl Tick {
    pub fn new(position: f32, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}
