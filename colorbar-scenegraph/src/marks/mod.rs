pub mod group;
pub mod image;
pub mod mark;
pub mod rule;
pub mod text;
