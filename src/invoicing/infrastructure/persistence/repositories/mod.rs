pub mod in_memory;
pub mod invoice_repository;
pub mod postgres;
