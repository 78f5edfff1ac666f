mod vendor;

pub use vendor::*;
