pub mod access_control_domain_error;
pub mod authorization_stage;
pub mod decision_effect;
pub mod denial_reason;
pub mod principal_tier;
