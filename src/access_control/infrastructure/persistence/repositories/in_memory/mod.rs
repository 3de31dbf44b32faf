pub mod in_memory_authorization_decision_audit_repository_impl;
