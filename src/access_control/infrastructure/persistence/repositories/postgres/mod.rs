pub mod sqlx_authorization_decision_audit_repository_impl;
