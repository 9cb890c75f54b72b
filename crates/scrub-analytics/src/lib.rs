//! Telemetry envelope builder.
//!
//! This crate provides:
//! - [`Analytics`], which accumulates command metadata and errors
//! - Sanitization of the serialized body through `scrub-redact`
//! - [`OutboundRequest`], the plain request value handed to a transport
//! - CI environment detection

pub mod ci;
pub mod envelope;
pub mod error;
pub mod request;

pub use ci::{is_ci_environment, CI_ENV_VARS};
pub use envelope::{Analytics, HeaderProvider};
pub use error::{AnalyticsError, Result};
pub use request::OutboundRequest;

/// API base used when none is configured.
pub const DEFAULT_API_URL: &str = "https://api.snyk.io";

/// Path of the analytics endpoint below the API base.
pub const ANALYTICS_PATH: &str = "v1/analytics/cli";
