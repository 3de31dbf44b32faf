pub mod invoice_command_service_impl;
