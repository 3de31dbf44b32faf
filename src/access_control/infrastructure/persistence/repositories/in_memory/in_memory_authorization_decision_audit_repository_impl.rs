use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::access_control::{
    domain::model::{
        enums::access_control_domain_error::AccessControlDomainError,
        events::authorization_decision_audited_event::AuthorizationDecisionAuditedEvent,
        value_objects::principal_id::PrincipalId,
    },
    infrastructure::persistence::repositories::authorization_decision_audit_repository::AuthorizationDecisionAuditRepository,
};

/// Bounded in-process audit store for development hosts without Postgres.
/// Once `retention` records are held the oldest are discarded.
pub struct InMemoryAuthorizationDecisionAuditRepositoryImpl {
    events: RwLock<VecDeque<AuthorizationDecisionAuditedEvent>>,
    retention: usize,
}

impl InMemoryAuthorizationDecisionAuditRepositoryImpl {
    pub fn new(retention: usize) -> Self {
        Self {
            events: RwLock::new(VecDeque::new()),
            retention: retention.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl AuthorizationDecisionAuditRepository for InMemoryAuthorizationDecisionAuditRepositoryImpl {
    async fn save_decision(
        &self,
        event: &AuthorizationDecisionAuditedEvent,
    ) -> Result<(), AccessControlDomainError> {
        let mut events = self.events.write().await;
        if events.len() >= self.retention {
            events.pop_front();
        }
        events.push_back(event.clone());
        Ok(())
    }

    async fn find_decisions_by_principal(
        &self,
        principal_id: &PrincipalId,
        limit: u32,
    ) -> Result<Vec<AuthorizationDecisionAuditedEvent>, AccessControlDomainError> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .rev()
            .filter(|event| event.principal_id == principal_id.value())
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
