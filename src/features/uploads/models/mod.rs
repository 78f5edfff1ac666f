mod upload;

pub use upload::*;
