pub mod sqlx_invoice_repository_impl;
