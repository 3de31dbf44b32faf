pub mod get_invoice_query;
pub mod list_invoices_query;
