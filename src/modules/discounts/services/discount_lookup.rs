use std::collections::HashMap;

use crate::modules::discounts::models::{CouponCode, Discount};

/// Resolves a coupon code to the discount it stands for
///
/// Implemented by whatever owns the promotions (a remote service, a
/// database, or the static catalog below).
pub trait DiscountLookup {
    fn find(&self, code: &CouponCode) -> Option<Discount>;
}

/// Promotions held in memory, keyed by canonical coupon code
#[derive(Debug, Clone, Default)]
pub struct InMemoryDiscounts {
    by_code: HashMap<CouponCode, Discount>,
}

impl InMemoryDiscounts {
    pub fn new(discounts: impl IntoIterator<Item = Discount>) -> Self {
        let by_code = discounts
            .into_iter()
            .map(|discount| (discount.code.clone(), discount))
            .collect();
        Self { by_code }
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl DiscountLookup for InMemoryDiscounts {
    fn find(&self, code: &CouponCode) -> Option<Discount> {
        self.by_code.get(code).cloned()
    }
}

impl<L: DiscountLookup + ?Sized> DiscountLookup for &L {
    fn find(&self, code: &CouponCode) -> Option<Discount> {
        (**self).find(code)
    }
}
