pub mod authorization_audit_recorder;
pub mod authorization_gate;
