pub mod constants;
pub mod policy;
pub mod test_helpers;
pub mod types;
pub mod validation;
