use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::access_control::{
    domain::model::{
        enums::access_control_domain_error::AccessControlDomainError,
        events::authorization_decision_audited_event::AuthorizationDecisionAuditedEvent,
        value_objects::principal_id::PrincipalId,
    },
    infrastructure::persistence::repositories::authorization_decision_audit_repository::AuthorizationDecisionAuditRepository,
};

pub struct SqlxAuthorizationDecisionAuditRepositoryImpl {
    pool: PgPool,
}

impl SqlxAuthorizationDecisionAuditRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type AuditRow = (
    Uuid,
    String,
    String,
    String,
    Option<String>,
    String,
    Option<String>,
    DateTime<Utc>,
);

fn map_row(row: AuditRow) -> Result<AuthorizationDecisionAuditedEvent, AccessControlDomainError> {
    let (event_id, principal_id, operation, decision, reason, scope, request_id, occurred_at) = row;

    Ok(AuthorizationDecisionAuditedEvent {
        event_id,
        principal_id,
        operation,
        effect: decision.parse()?,
        reason: reason.map(|r| r.parse()).transpose()?,
        scope: AuthorizationDecisionAuditedEvent::parse_scope(&scope)?,
        request_id,
        occurred_at,
    })
}

#[async_trait]
impl AuthorizationDecisionAuditRepository for SqlxAuthorizationDecisionAuditRepositoryImpl {
    async fn save_decision(
        &self,
        event: &AuthorizationDecisionAuditedEvent,
    ) -> Result<(), AccessControlDomainError> {
        let statement = r#"
            INSERT INTO authorization_decision_audit (
                event_id,
                principal_id,
                operation,
                decision,
                reason,
                scope,
                request_id,
                occurred_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#;

        sqlx::query(statement)
            .bind(event.event_id)
            .bind(&event.principal_id)
            .bind(&event.operation)
            .bind(event.effect.as_str())
            .bind(event.reason.map(|r| r.as_str()))
            .bind(event.rendered_scope())
            .bind(&event.request_id)
            .bind(event.occurred_at)
            .execute(&self.pool)
            .await
            .map_err(|e| AccessControlDomainError::InfrastructureError(e.to_string()))?;

        Ok(())
    }

    async fn find_decisions_by_principal(
        &self,
        principal_id: &PrincipalId,
        limit: u32,
    ) -> Result<Vec<AuthorizationDecisionAuditedEvent>, AccessControlDomainError> {
        let statement = r#"
            SELECT event_id, principal_id, operation, decision, reason, scope, request_id, occurred_at
            FROM authorization_decision_audit
            WHERE principal_id = $1
            ORDER BY occurred_at DESC, event_id DESC
            LIMIT $2
        "#;

        let rows = sqlx::query_as::<_, AuditRow>(statement)
            .bind(principal_id.value())
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AccessControlDomainError::InfrastructureError(e.to_string()))?;

        rows.into_iter().map(map_row).collect()
    }
}
