use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ProfileResource {
    pub principal_id: String,
    pub display_name: String,
    pub groups: Vec<String>,
    pub permissions: Vec<String>,
    pub scope: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AuthorizationDecisionRecordResource {
    pub event_id: String,
    pub operation: String,
    pub decision: String,
    pub reason: Option<String>,
    pub scope: String,
    pub request_id: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema, IntoParams)]
pub struct AuthorizationDecisionHistoryQueryResource {
    #[validate(range(min = 1, max = 200))]
    pub limit: Option<u32>,
}
