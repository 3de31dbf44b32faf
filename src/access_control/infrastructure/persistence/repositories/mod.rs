pub mod authorization_decision_audit_repository;
pub mod in_memory;
pub mod postgres;
