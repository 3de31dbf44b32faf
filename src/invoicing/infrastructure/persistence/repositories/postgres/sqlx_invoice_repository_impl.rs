use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    access_control::{
        application::enforcement::query_scope_enforcer::{
            TenantFilter, TenantOwned, TenantWriteTarget,
        },
        domain::model::value_objects::tenant_id::TenantId,
    },
    invoicing::{
        domain::model::{
            entities::invoice::{Invoice, InvoiceParts},
            enums::invoicing_domain_error::InvoicingDomainError,
            value_objects::{
                currency_code::CurrencyCode, customer_name::CustomerName, invoice_id::InvoiceId,
            },
        },
        infrastructure::persistence::repositories::invoice_repository::InvoiceRepository,
    },
};

pub struct SqlxInvoiceRepositoryImpl {
    pool: PgPool,
}

impl SqlxInvoiceRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type InvoiceRow = (Uuid, String, String, i64, String, String, DateTime<Utc>);

fn map_row(row: InvoiceRow) -> Result<Invoice, InvoicingDomainError> {
    let (id, tenant_id, customer_name, amount_cents, currency, issued_by, issued_at) = row;
    let corrupt = |field: &str| InvoicingDomainError::InfrastructureError(format!("invalid {field} stored"));

    Ok(Invoice::new(InvoiceParts {
        id: InvoiceId::from_uuid(id),
        tenant_id: TenantId::new(tenant_id).map_err(|_| corrupt("tenant_id"))?,
        customer_name: CustomerName::new(customer_name).map_err(|_| corrupt("customer_name"))?,
        amount_cents,
        currency: CurrencyCode::new(currency).map_err(|_| corrupt("currency"))?,
        issued_by,
        issued_at,
    }))
}

#[async_trait]
impl InvoiceRepository for SqlxInvoiceRepositoryImpl {
    async fn find_all(
        &self,
        filter: &TenantFilter,
        limit: u32,
    ) -> Result<Vec<Invoice>, InvoicingDomainError> {
        let statement = r#"
            SELECT id, tenant_id, customer_name, amount_cents, currency, issued_by, issued_at
            FROM invoices
            WHERE ($1::text[] IS NULL OR tenant_id = ANY($1))
            ORDER BY issued_at DESC, id DESC
            LIMIT $2
        "#;

        let rows = sqlx::query_as::<_, InvoiceRow>(statement)
            .bind(filter.tenant_ids())
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| InvoicingDomainError::InfrastructureError(e.to_string()))?;

        rows.into_iter().map(map_row).collect()
    }

    async fn find_by_id(
        &self,
        filter: &TenantFilter,
        invoice_id: InvoiceId,
    ) -> Result<Option<Invoice>, InvoicingDomainError> {
        let statement = r#"
            SELECT id, tenant_id, customer_name, amount_cents, currency, issued_by, issued_at
            FROM invoices
            WHERE id = $1
              AND ($2::text[] IS NULL OR tenant_id = ANY($2))
        "#;

        let row = sqlx::query_as::<_, InvoiceRow>(statement)
            .bind(invoice_id.value())
            .bind(filter.tenant_ids())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| InvoicingDomainError::InfrastructureError(e.to_string()))?;

        row.map(map_row).transpose()
    }

    async fn save(
        &self,
        target: &TenantWriteTarget,
        invoice: &Invoice,
    ) -> Result<(), InvoicingDomainError> {
        if invoice.tenant_id() != target.tenant_id() {
            return Err(InvoicingDomainError::InfrastructureError(
                "invoice tenant differs from the write target".to_string(),
            ));
        }

        let statement = r#"
            INSERT INTO invoices (id, tenant_id, customer_name, amount_cents, currency, issued_by, issued_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#;

        sqlx::query(statement)
            .bind(invoice.id().value())
            .bind(target.tenant_id().value())
            .bind(invoice.customer_name().value())
            .bind(invoice.amount_cents())
            .bind(invoice.currency().value())
            .bind(invoice.issued_by())
            .bind(invoice.issued_at())
            .execute(&self.pool)
            .await
            .map_err(|e| InvoicingDomainError::InfrastructureError(e.to_string()))?;

        Ok(())
    }

    async fn delete(
        &self,
        filter: &TenantFilter,
        invoice_id: InvoiceId,
    ) -> Result<bool, InvoicingDomainError> {
        let statement = r#"
            DELETE FROM invoices
            WHERE id = $1
              AND ($2::text[] IS NULL OR tenant_id = ANY($2))
        "#;

        let result = sqlx::query(statement)
            .bind(invoice_id.value())
            .bind(filter.tenant_ids())
            .execute(&self.pool)
            .await
            .map_err(|e| InvoicingDomainError::InfrastructureError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
