mod service_price;

pub use service_price::ServicePrice;
