use std::env;
use std::time::Duration;

use crpt_core::{AppError, AppResult, NonEmptyString};
use crpt_domain::{RateLimitPolicy, WindowUnit};
use crpt_infrastructure::DEFAULT_SUBMISSION_ENDPOINT;
use tracing_subscriber::EnvFilter;

const DEFAULT_WINDOW_UNIT: WindowUnit = WindowUnit::Minutes;
const DEFAULT_REQUEST_LIMIT: u32 = 10;
const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 15;

#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    pub endpoint: String,
    pub signature: NonEmptyString,
    pub window_unit: WindowUnit,
    pub rate_limit: RateLimitPolicy,
    pub http_timeout: Duration,
}

impl SubmitterConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let endpoint =
            optional("CRPT_API_URL").unwrap_or_else(|| DEFAULT_SUBMISSION_ENDPOINT.to_owned());

        let signature = lookup("DOCUMENT_SIGNATURE")
            .ok_or_else(|| AppError::Configuration("DOCUMENT_SIGNATURE is required".to_owned()))
            .and_then(|value| {
                NonEmptyString::new(value).map_err(|_| {
                    AppError::Configuration("DOCUMENT_SIGNATURE must not be empty".to_owned())
                })
            })?;

        let window_unit = optional("RATE_LIMIT_WINDOW")
            .map(|value| value.parse::<WindowUnit>())
            .transpose()?
            .unwrap_or(DEFAULT_WINDOW_UNIT);

        let request_limit = optional("RATE_LIMIT_REQUESTS")
            .map(|value| {
                value.trim().parse::<u32>().map_err(|_| {
                    AppError::Configuration(format!(
                        "RATE_LIMIT_REQUESTS must be a positive integer, got '{value}'"
                    ))
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_REQUEST_LIMIT);
        let rate_limit = RateLimitPolicy::new(window_unit, request_limit)?;

        let http_timeout_seconds = optional("HTTP_TIMEOUT_SECONDS")
            .map(|value| {
                value.trim().parse::<u64>().map_err(|error| {
                    AppError::Configuration(format!("invalid HTTP_TIMEOUT_SECONDS: {error}"))
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECONDS);

        Ok(Self {
            endpoint,
            signature,
            window_unit,
            rate_limit,
            http_timeout: Duration::from_secs(http_timeout_seconds),
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
