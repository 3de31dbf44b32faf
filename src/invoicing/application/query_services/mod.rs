pub mod invoice_query_service_impl;
