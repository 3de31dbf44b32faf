pub mod invoice_command_service;
pub mod invoice_query_service;
