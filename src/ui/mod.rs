// Status line formatting module

pub mod icons;
pub mod line;

// Re-export commonly used items
pub use line::render;
