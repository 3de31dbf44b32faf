use std::time::Duration;

use crate::{
    access_control::application::audit::authorization_audit_recorder_impl::DEFAULT_AUDIT_QUEUE_CAPACITY,
    shared::infrastructure::observability::LogFormat,
};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub audit_queue_capacity: usize,
    pub log_format: LogFormat,
    pub iam_grpc_endpoint: Option<String>,
    pub iam_timeout: Duration,
    pub iam_failure_threshold: u32,
    pub iam_circuit_open: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            port: non_empty("PORT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(8081),
            database_url: non_empty("DATABASE_URL"),
            audit_queue_capacity: non_empty("AUDIT_QUEUE_CAPACITY")
                .and_then(|value| value.parse().ok())
                .filter(|capacity: &usize| *capacity > 0)
                .unwrap_or(DEFAULT_AUDIT_QUEUE_CAPACITY),
            log_format: non_empty("LOG_FORMAT")
                .map(|value| LogFormat::parse(&value))
                .unwrap_or(LogFormat::Text),
            iam_grpc_endpoint: non_empty("IAM_GRPC_ENDPOINT"),
            iam_timeout: Duration::from_millis(
                non_empty("IAM_TIMEOUT_MS")
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(2_000),
            ),
            iam_failure_threshold: non_empty("IAM_FAILURE_THRESHOLD")
                .and_then(|value| value.parse().ok())
                .unwrap_or(5),
            iam_circuit_open: Duration::from_millis(
                non_empty("IAM_CIRCUIT_OPEN_MS")
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(30_000),
            ),
        }
    }
}
