pub mod authorization_audit_recorder_impl;
