mod slider;

pub use slider::*;
