use std::sync::Arc;

use chrono::Utc;

use crate::access_control::{
    application::resolvers::{
        permission_resolver::{PermissionResolver, ResolvedPermissions},
        tenant_grant_resolver::TenantGrantResolver,
    },
    domain::{
        model::{
            entities::authorization_decision::AuthorizationDecision,
            enums::{authorization_stage::AuthorizationStage, denial_reason::DenialReason},
            events::authorization_decision_audited_event::AuthorizationDecisionAuditedEvent,
            queries::evaluate_authorization_query::EvaluateAuthorizationQuery,
            value_objects::{permission_set::PermissionSet, principal_id::PrincipalId},
        },
        services::{
            authorization_audit_recorder::AuthorizationAuditRecorder,
            authorization_gate::{AuthorizationGate, CredentialRejection},
        },
    },
};

pub struct AuthorizationGateImpl {
    permission_resolver: PermissionResolver,
    tenant_grant_resolver: TenantGrantResolver,
    audit_recorder: Arc<dyn AuthorizationAuditRecorder>,
}

impl AuthorizationGateImpl {
    pub fn new(
        permission_resolver: PermissionResolver,
        tenant_grant_resolver: TenantGrantResolver,
        audit_recorder: Arc<dyn AuthorizationAuditRecorder>,
    ) -> Self {
        Self {
            permission_resolver,
            tenant_grant_resolver,
            audit_recorder,
        }
    }

    fn decide(&self, query: &EvaluateAuthorizationQuery) -> AuthorizationDecision {
        let principal = query.principal();
        let stage = step(
            AuthorizationStage::Unauthenticated,
            AuthorizationStage::ClaimsExtracted,
        );

        let ResolvedPermissions { permissions, tier } = self
            .permission_resolver
            .resolve(principal.groups().iter());
        let stage = step(stage, AuthorizationStage::PermissionsResolved);

        let deny = |reached: AuthorizationStage, reason: DenialReason, permissions: PermissionSet| {
            tracing::info!(
                principal_id = %principal.id(),
                operation = %query.operation(),
                stage = step(reached, AuthorizationStage::Denied).as_str(),
                decided_after = reached.as_str(),
                reason = reason.as_str(),
                "authorization denied"
            );
            AuthorizationDecision::denied(
                principal.id().clone(),
                query.operation().clone(),
                reason,
                permissions,
                reached,
            )
        };

        let scope = self
            .tenant_grant_resolver
            .resolve(principal, tier, query.tenant_selection());

        // Capability is judged before tenant state so a caller lacking the
        // permission learns nothing about its tenant grants.
        if !permissions.covers(query.requested_permissions()) {
            return deny(stage, DenialReason::InsufficientPermission, permissions);
        }

        let scope = match scope {
            Ok(scope) => scope,
            Err(error) => {
                let reason = error
                    .denial_reason()
                    .unwrap_or(DenialReason::NoTenantAccess);
                return deny(stage, reason, permissions);
            }
        };
        let stage = step(stage, AuthorizationStage::TenantScopeResolved);

        tracing::debug!(
            principal_id = %principal.id(),
            operation = %query.operation(),
            stage = step(stage, AuthorizationStage::Allowed).as_str(),
            tier = ?tier,
            scope = %scope.render(),
            "authorization allowed"
        );

        AuthorizationDecision::allowed(
            principal.id().clone(),
            query.operation().clone(),
            permissions,
            scope,
        )
    }

    fn audit(&self, decision: &AuthorizationDecision, request_id: Option<&str>) {
        self.audit_recorder
            .record(AuthorizationDecisionAuditedEvent::from_decision(
                decision,
                request_id,
                Utc::now(),
            ));
    }
}

fn step(current: AuthorizationStage, next: AuthorizationStage) -> AuthorizationStage {
    match current.advance(next) {
        Some(next) => next,
        None => {
            tracing::error!(
                from = current.as_str(),
                to = next.as_str(),
                "illegal authorization stage transition"
            );
            AuthorizationStage::Denied
        }
    }
}

impl AuthorizationGate for AuthorizationGateImpl {
    fn evaluate(&self, query: &EvaluateAuthorizationQuery) -> AuthorizationDecision {
        let decision = self.decide(query);
        self.audit(&decision, query.request_id());
        decision
    }

    fn reject_credential(&self, rejection: CredentialRejection) -> AuthorizationDecision {
        let reason = if rejection.reason.is_credential_failure() {
            rejection.reason
        } else {
            tracing::error!(
                reason = rejection.reason.as_str(),
                "credential rejection with a non-credential reason"
            );
            DenialReason::MalformedCredential
        };

        let reached = AuthorizationStage::Unauthenticated;
        tracing::info!(
            operation = %rejection.operation,
            stage = step(reached, AuthorizationStage::Denied).as_str(),
            decided_after = reached.as_str(),
            reason = reason.as_str(),
            "credential rejected"
        );

        let decision = AuthorizationDecision::denied(
            PrincipalId::anonymous(),
            rejection.operation,
            reason,
            PermissionSet::empty(),
            reached,
        );
        self.audit(&decision, rejection.request_id.as_deref());
        decision
    }
}
