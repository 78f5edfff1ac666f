pub mod auth;
pub mod categories;
pub mod coupons;
pub mod notifications;
pub mod products;
pub mod sliders;
pub mod uploads;
pub mod vendors;
