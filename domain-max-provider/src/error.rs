use serde::{Deserialize, Serialize};

/// Unified error type for all DNS provider operations.
///
/// Variants carry the vendor tag that produced the error plus
/// variant-specific context. All variants serialize with the taxonomy kind
/// as the `code` tag, which is what the upstream HTTP layer surfaces.
///
/// # Retryable Errors
///
/// [`NetworkError`](Self::NetworkError) and [`RateLimited`](Self::RateLimited)
/// are transient; [`is_retryable`](Self::is_retryable) returns `true` for
/// exactly these two kinds. Everything else surfaces immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum DnsError {
    /// A required configuration field is missing or malformed, or the vendor
    /// tag is not in the supported set.
    ConfigError {
        /// Provider (or `"factory"`) that rejected the configuration.
        provider: String,
        /// What is wrong.
        detail: String,
    },

    /// The adapter exists but its vendor integration is not implemented.
    NotImplemented {
        /// Provider tag.
        provider: String,
    },

    /// The vendor rejected the credentials (signature valid, identity invalid).
    AuthError {
        /// Provider that produced the error.
        provider: String,
        /// Original vendor message, if available.
        raw_message: Option<String>,
    },

    /// The domain or record is not known to the vendor.
    NotFound {
        /// Provider that produced the error.
        provider: String,
        /// Human-readable description of the missing resource
        /// (e.g. `"domain 'example.com'"`, `"record '12345'"`).
        resource: String,
        /// Original vendor message, if available.
        raw_message: Option<String>,
    },

    /// A canonical record failed an invariant check before submission
    /// (bad value for its type, TTL out of range, missing SRV fields).
    ValidationError {
        /// The offending field.
        param: String,
        /// What is wrong.
        detail: String,
    },

    /// The vendor returned a business-logic error code.
    ProviderError {
        /// Provider that produced the error.
        provider: String,
        /// Vendor error code.
        #[serde(rename = "vendor_code")]
        code: String,
        /// Vendor error message.
        message: String,
        /// Vendor request id, if the envelope carried one.
        request_id: Option<String>,
    },

    /// Transport-level failure: connection errors, timeouts, or a non-2xx
    /// response without a structured vendor body.
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details (includes the HTTP status and a body prefix when
        /// the failure came from a status code).
        detail: String,
    },

    /// The vendor rate-limited the request (HTTP 429 or a throttle code).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait in seconds, if the vendor supplied one.
        retry_after: Option<u64>,
        /// Original vendor message, if available.
        raw_message: Option<String>,
    },

    /// The vendor response could not be decoded into the expected shape.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the decode failure.
        detail: String,
    },

    /// The caller's deadline fired or the operation was cancelled.
    Cancelled {
        /// What was cancelled.
        detail: String,
    },

    /// A retried operation exhausted its attempt budget.
    ///
    /// Wraps the last underlying error; the envelope code delegates to the
    /// wrapped kind so upstream classification is unaffected.
    RetryExhausted {
        /// Total attempts performed (`max_retries + 1`).
        attempts: u32,
        /// The error from the final attempt.
        source: Box<DnsError>,
    },
}

/// Canonical error envelope surfaced to the upstream API layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Short human-readable label for the failure class.
    pub error: String,
    /// Taxonomy kind (see [`DnsError::kind`]).
    pub code: String,
    /// Full error message.
    pub message: String,
}

impl DnsError {
    /// Taxonomy kind of this error.
    ///
    /// [`RetryExhausted`](Self::RetryExhausted) reports the kind of the
    /// wrapped error so classification survives retry wrapping.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigError { .. } => "ConfigError",
            Self::NotImplemented { .. } => "NotImplemented",
            Self::AuthError { .. } => "AuthError",
            Self::NotFound { .. } => "NotFound",
            Self::ValidationError { .. } => "ValidationError",
            Self::ProviderError { .. } => "ProviderError",
            Self::NetworkError { .. } => "NetworkError",
            Self::RateLimited { .. } => "RateLimited",
            Self::ParseError { .. } => "ParseError",
            Self::Cancelled { .. } => "Cancelled",
            Self::RetryExhausted { source, .. } => source.kind(),
        }
    }

    /// Whether a retry may succeed.
    ///
    /// Only transport failures and rate limits are transient; everything
    /// else (auth, validation, vendor business errors) fails the same way
    /// on every attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::RateLimited { .. }
        )
    }

    /// Whether this is expected behavior (user input, missing resources),
    /// used for log leveling: `warn` when `true`, `error` when `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ConfigError { .. }
            | Self::NotImplemented { .. }
            | Self::AuthError { .. }
            | Self::NotFound { .. }
            | Self::ValidationError { .. } => true,
            Self::RetryExhausted { source, .. } => source.is_expected(),
            _ => false,
        }
    }

    /// Build the canonical `{error, code, message}` envelope.
    #[must_use]
    pub fn envelope(&self) -> ErrorEnvelope {
        let label = match self.kind() {
            "ConfigError" => "invalid provider configuration",
            "NotImplemented" => "provider not implemented",
            "AuthError" => "authentication failed",
            "NotFound" => "resource not found",
            "ValidationError" => "invalid record",
            "ProviderError" => "provider request failed",
            "NetworkError" => "network failure",
            "RateLimited" => "rate limited",
            "ParseError" => "unexpected provider response",
            "Cancelled" => "operation cancelled",
            _ => "error",
        };
        ErrorEnvelope {
            error: label.to_string(),
            code: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

impl std::fmt::Display for DnsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigError { provider, detail } => {
                write!(f, "[{provider}] Configuration error: {detail}")
            }
            Self::NotImplemented { provider } => {
                write!(f, "[{provider}] Provider integration not implemented")
            }
            Self::AuthError {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Authentication failed: {msg}")
                } else {
                    write!(f, "[{provider}] Authentication failed")
                }
            }
            Self::NotFound {
                provider,
                resource,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] {resource} not found: {msg}")
                } else {
                    write!(f, "[{provider}] {resource} not found")
                }
            }
            Self::ValidationError { param, detail } => {
                write!(f, "Invalid record field '{param}': {detail}")
            }
            Self::ProviderError {
                provider,
                code,
                message,
                request_id,
            } => {
                if let Some(rid) = request_id {
                    write!(f, "[{provider}] API error {code}: {message} (RequestId: {rid})")
                } else {
                    write!(f, "[{provider}] API error {code}: {message}")
                }
            }
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::Cancelled { detail } => {
                write!(f, "Cancelled: {detail}")
            }
            Self::RetryExhausted { attempts, source } => {
                write!(f, "Operation failed after {attempts} attempts: {source}")
            }
        }
    }
}

impl std::error::Error for DnsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RetryExhausted { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Convenience alias for `Result<T, DnsError>`.
pub type Result<T> = std::result::Result<T, DnsError>;
