pub mod in_memory_invoice_repository_impl;
