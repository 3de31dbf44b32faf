pub mod create_invoice_command;
pub mod delete_invoice_command;
