// Discounts module

pub mod models;
pub mod services;

pub use models::{
    is_valid_coupon_format, CouponCode, Discount, DiscountRejection, DiscountType,
    DiscountValidation,
};
pub use services::{DiscountEngine, DiscountLookup, InMemoryDiscounts};
