#[path = "support/fakes.rs"]
pub mod fakes;

pub use fakes::LeakyInvoiceRepository;
pub use fixtures::{
    bearer, expired_bearer, invoice_in, json_body, request, tenant, with_json,
};
pub use harness::{create_app, create_app_with_repository, enforcer_for};
