pub mod invoicing_domain_error;
