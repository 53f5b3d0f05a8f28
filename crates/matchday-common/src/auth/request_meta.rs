//! Request metadata used for fingerprinting and client identification

/// Sentinel used in fingerprints when no forwarded address is known
pub const UNKNOWN_IP: &str = "Unknown";

/// Snapshot of the request headers the auth core cares about.
///
/// Built by the HTTP layer for every request and passed explicitly into the
/// token codec and the rate limiter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    user_agent: Option<String>,
    forwarded_for: Option<String>,
    real_ip: Option<String>,
}

impl RequestMetadata {
    /// Create metadata from raw header values
    pub fn new(
        user_agent: Option<String>,
        forwarded_for: Option<String>,
        real_ip: Option<String>,
    ) -> Self {
        Self {
            user_agent,
            forwarded_for,
            real_ip,
        }
    }

    /// Metadata for a client identified only by user-agent and a single IP
    pub fn from_client(user_agent: impl Into<String>, ip: impl Into<String>) -> Self {
        Self::new(Some(user_agent.into()), Some(ip.into()), None)
    }

    /// User-agent header, or the empty string
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or("")
    }

    /// First entry of `x-forwarded-for`, if present and non-empty
    pub fn forwarded_ip(&self) -> Option<&str> {
        self.forwarded_for
            .as_deref()
            .and_then(|header| header.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
    }

    /// The IP that goes into fingerprints
    pub fn fingerprint_ip(&self) -> &str {
        self.forwarded_ip().unwrap_or(UNKNOWN_IP)
    }

    /// Client identity for rate limiting: forwarded IP, then `x-real-ip`
    pub fn client_id(&self) -> Option<&str> {
        self.forwarded_ip().or_else(|| {
            self.real_ip
                .as_deref()
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
        })
    }
}
