mod coupon_dto;

pub use coupon_dto::*;
