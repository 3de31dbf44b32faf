pub mod create_invoice_request_resource;
pub mod invoice_resource;
pub mod invoicing_error_response_resource;
