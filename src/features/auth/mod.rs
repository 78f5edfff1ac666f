pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod validator;

pub use validator::JwtValidator;
