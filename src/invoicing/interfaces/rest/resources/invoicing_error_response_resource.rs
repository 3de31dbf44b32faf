use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    access_control::interfaces::rest::resources::access_control_error_response_resource::map_domain_error as map_access_control_error,
    invoicing::domain::model::enums::invoicing_domain_error::InvoicingDomainError,
};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct InvoicingErrorResponseResource {
    pub reason_code: String,
    pub message: String,
}

pub fn map_domain_error(
    error: InvoicingDomainError,
) -> (StatusCode, Json<InvoicingErrorResponseResource>) {
    let (status, reason_code) = match &error {
        InvoicingDomainError::InvalidInvoiceId => (StatusCode::BAD_REQUEST, "invalid_invoice_id"),
        InvoicingDomainError::InvalidCustomerName => {
            (StatusCode::BAD_REQUEST, "invalid_customer_name")
        }
        InvoicingDomainError::InvalidCurrencyCode => {
            (StatusCode::BAD_REQUEST, "invalid_currency_code")
        }
        InvoicingDomainError::InvalidAmount => (StatusCode::BAD_REQUEST, "invalid_amount"),
        InvoicingDomainError::InvoiceNotFound => (StatusCode::NOT_FOUND, "invoice_not_found"),
        InvoicingDomainError::AccessControl(inner) => {
            let (status, Json(body)) = map_access_control_error(inner.clone());
            return (
                status,
                Json(InvoicingErrorResponseResource {
                    reason_code: body.reason_code,
                    message: body.message,
                }),
            );
        }
        InvoicingDomainError::InfrastructureError(detail) => {
            tracing::error!(error = %detail, "invoicing infrastructure error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(InvoicingErrorResponseResource {
                    reason_code: "infrastructure_error".to_string(),
                    message: "internal error".to_string(),
                }),
            );
        }
    };

    (
        status,
        Json(InvoicingErrorResponseResource {
            reason_code: reason_code.to_string(),
            message: error.to_string(),
        }),
    )
}
