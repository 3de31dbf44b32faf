pub mod currency_code;
pub mod customer_name;
pub mod invoice_id;
