pub mod invoicing_rest_controller;
