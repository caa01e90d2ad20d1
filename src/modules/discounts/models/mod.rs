mod discount;
mod discount_validation;

pub use discount::{is_valid_coupon_format, CouponCode, Discount, DiscountType};
pub use discount_validation::{DiscountRejection, DiscountValidation};
