//! Cross-origin access policy
//!
//! Browsers declare where a script runs from in the `Origin` header. Only the
//! studio front-ends may call the API from a browser; callers without an
//! origin (curl, Postman, server-to-server) are always let through.

/// Outcome of an origin check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginDecision {
    /// Proceed. Carries the origin to echo back, if the request declared one.
    Allow(Option<String>),
    Deny,
}

/// Static allow-list of browser origins
#[derive(Debug, Clone)]
pub struct OriginGate {
    allowed_origins: Vec<String>,
}

impl OriginGate {
    pub fn new(allowed_origins: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            allowed_origins: allowed_origins.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact string match, no wildcards or normalization.
    pub fn decide(&self, origin: Option<&str>) -> OriginDecision {
        let Some(origin) = origin else {
            return OriginDecision::Allow(None);
        };

        if self.allowed_origins.iter().any(|allowed| allowed == origin) {
            OriginDecision::Allow(Some(origin.to_owned()))
        } else {
            OriginDecision::Deny
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> OriginGate {
        OriginGate::new(["https://mpwebstudio.rs", "http://localhost:5500"])
    }

    #[test]
    fn test_missing_origin_is_allowed() {
        assert_eq!(gate().decide(None), OriginDecision::Allow(None));
    }

    #[test]
    fn test_listed_origin_is_allowed() {
        assert_eq!(
            gate().decide(Some("http://localhost:5500")),
            OriginDecision::Allow(Some("http://localhost:5500".to_string()))
        );
    }

    #[test]
    fn test_unlisted_origin_is_denied() {
        for origin in [
            "https://evil.example",
            "https://mpwebstudio.rs/",
            "https://MPWEBSTUDIO.rs",
            "http://mpwebstudio.rs",
            "http://localhost:5501",
            "null",
            "",
        ] {
            assert_eq!(gate().decide(Some(origin)), OriginDecision::Deny, "{origin}");
        }
    }
}
