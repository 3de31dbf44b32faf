pub mod query_scope_enforcer;
