//! Analytics envelope accumulation and request assembly.

use serde::Serialize;
use url::Url;

use scrub_redact::{IdentityDescriptor, SanitizePolicy, Sanitizer};

use crate::{ci, OutboundRequest, Result, ANALYTICS_PATH, DEFAULT_API_URL};

/// Supplies headers to propagate onto the outbound request.
pub type HeaderProvider = Box<dyn Fn() -> Vec<(String, String)> + Send + Sync>;

#[derive(Serialize)]
struct Envelope<'a> {
    data: EnvelopeData<'a>,
}

#[derive(Serialize)]
struct EnvelopeData<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    command: &'a str,
    args: &'a [String],
    version: &'a str,
    os: &'static str,
    ci: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    org: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    integration_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    integration_version: Option<&'a str>,
    errors: &'a [String],
}

/// Accumulates telemetry fields and produces a sanitized request.
pub struct Analytics {
    args: Vec<String>,
    errors: Vec<String>,
    version: String,
    org: Option<String>,
    api_url: String,
    integration_name: Option<String>,
    integration_version: Option<String>,
    header_provider: Option<HeaderProvider>,
    sanitizer: Sanitizer,
}

impl Analytics {
    /// Envelope using the environment-adjusted default policy and the
    /// current user's identity.
    pub fn new() -> Result<Self> {
        Self::from_policy(&SanitizePolicy::from_env())
    }

    /// Envelope using `policy`. The current user's identity is attached when
    /// the policy asks for identity redaction and one can be determined.
    pub fn from_policy(policy: &SanitizePolicy) -> Result<Self> {
        let mut sanitizer = Sanitizer::new(policy)?;
        if policy.redact_identity {
            match IdentityDescriptor::current() {
                Some(identity) => sanitizer = sanitizer.with_identity(identity),
                None => tracing::debug!("no user identity available; identity redaction skipped"),
            }
        }
        Ok(Self::with_sanitizer(sanitizer))
    }

    /// Envelope using a prepared sanitizer.
    pub fn with_sanitizer(sanitizer: Sanitizer) -> Self {
        Self {
            args: Vec::new(),
            errors: Vec::new(),
            version: String::new(),
            org: None,
            api_url: DEFAULT_API_URL.to_string(),
            integration_name: None,
            integration_version: None,
            header_provider: None,
            sanitizer,
        }
    }

    /// Record the command line, command name first.
    pub fn set_cmd_arguments<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
    }

    pub fn add_error(&mut self, err: impl std::fmt::Display) {
        self.errors.push(err.to_string());
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    pub fn set_org(&mut self, org: impl Into<String>) {
        self.org = Some(org.into()).filter(|o: &String| !o.is_empty());
    }

    pub fn set_api_url(&mut self, api_url: impl Into<String>) {
        self.api_url = api_url.into();
    }

    pub fn set_integration(&mut self, name: impl Into<String>, version: impl Into<String>) {
        self.integration_name = Some(name.into());
        self.integration_version = Some(version.into());
    }

    /// Headers from `provider` are copied verbatim onto every request.
    pub fn add_header<F>(&mut self, provider: F)
    where
        F: Fn() -> Vec<(String, String)> + Send + Sync + 'static,
    {
        self.header_provider = Some(Box::new(provider));
    }

    pub fn is_ci_environment(&self) -> bool {
        ci::is_ci_environment()
    }

    /// Serialized, unsanitized envelope body.
    fn body(&self) -> Result<Vec<u8>> {
        let (command, args) = match self.args.split_first() {
            Some((command, rest)) => (command.as_str(), rest),
            None => ("", &self.args[..]),
        };

        let envelope = Envelope {
            data: EnvelopeData {
                kind: "analytics",
                command,
                args,
                version: &self.version,
                os: std::env::consts::OS,
                ci: self.is_ci_environment(),
                org: self.org.as_deref(),
                integration_name: self.integration_name.as_deref(),
                integration_version: self.integration_version.as_deref(),
                errors: &self.errors,
            },
        };
        Ok(serde_json::to_vec(&envelope)?)
    }

    fn request_url(&self) -> Result<Url> {
        let base = self.api_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{ANALYTICS_PATH}"))?;
        if let Some(org) = &self.org {
            url.query_pairs_mut().append_pair("org", org);
        }
        Ok(url)
    }

    /// Build the outbound request with a sanitized body.
    pub fn get_request(&self) -> Result<OutboundRequest> {
        let url = self.request_url()?;
        let body = self.body()?;
        let sanitized = self.sanitizer.sanitize(&body)?;

        let mut headers = match &self.header_provider {
            Some(provider) => provider(),
            None => Vec::new(),
        };
        headers.push(("Content-Type".to_string(), "application/json".to_string()));

        tracing::debug!(
            redactions = sanitized.redactions,
            body_bytes = sanitized.bytes.len(),
            "analytics request prepared"
        );

        Ok(OutboundRequest {
            method: "POST".to_string(),
            url,
            headers,
            body: sanitized.into_bytes(),
        })
    }
}
