mod discount_engine;
mod discount_lookup;

pub use discount_engine::DiscountEngine;
pub use discount_lookup::{DiscountLookup, InMemoryDiscounts};
