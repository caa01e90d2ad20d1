pub mod discounts;
pub mod financing;
pub mod invoices;
pub mod pricebook;
pub mod taxes;
