//! Server and site configuration.
//!
//! The public base URL is resolved through an explicit, ordered candidate
//! list rather than a free-floating global: configured URL, then the
//! request-derived origin, then the deployment platform's URL, then a local
//! default. Resolution happens once per request context.

/// Fallback base URL for local development.
pub const LOCALHOST_URL: &str = "http://localhost:8080";

/// Environment variable for an explicitly configured public URL.
pub const SITE_URL_VAR: &str = "SITE_URL";
/// Environment variable the deployment platform populates with the
/// generated host name.
pub const DEPLOY_URL_VAR: &str = "DEPLOY_URL";

/// One candidate source for the public base URL, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSource {
    /// Operator-configured URL; trailing slashes are stripped.
    Configured(String),
    /// Origin derived from the incoming request.
    RequestOrigin(String),
    /// Host name provided by the deployment platform, always `https`.
    PlatformHost(String),
}

/// Resolve the first usable candidate, falling back to [`LOCALHOST_URL`].
pub fn resolve_site_url(candidates: &[UrlSource]) -> String {
    for candidate in candidates {
        match candidate {
            UrlSource::Configured(url) if !url.trim().is_empty() => {
                return url.trim().trim_end_matches('/').to_owned();
            }
            UrlSource::RequestOrigin(origin) if !origin.is_empty() => {
                return origin.trim_end_matches('/').to_owned();
            }
            UrlSource::PlatformHost(host) if !host.is_empty() => {
                return format!("https://{host}");
            }
            _ => {}
        }
    }
    LOCALHOST_URL.to_owned()
}

/// Build an origin from a Host header value: `https` unless the host is
/// local.
pub fn origin_from_host(host: &str) -> String {
    // Bracketed IPv6 hosts keep their brackets; a port can only follow `]`.
    let bare = match host.find(']') {
        Some(end) => &host[..=end],
        None => host.split(':').next().unwrap_or(host),
    };
    let scheme = if bare == "localhost" || bare == "127.0.0.1" || bare == "[::1]" {
        "http"
    } else {
        "https"
    };
    format!("{scheme}://{host}")
}

/// Site-level settings shared with the handlers.
#[derive(Debug, Clone, Default)]
pub struct SiteConfig {
    pub configured_url: Option<String>,
    pub platform_host: Option<String>,
}

impl SiteConfig {
    /// Read the site settings from the environment.
    pub fn from_env() -> Self {
        Self {
            configured_url: std::env::var(SITE_URL_VAR).ok(),
            platform_host: std::env::var(DEPLOY_URL_VAR).ok(),
        }
    }

    /// Resolve the base URL for one request context.
    pub fn base_url(&self, request_origin: Option<&str>) -> String {
        let mut candidates = Vec::new();
        if let Some(url) = &self.configured_url {
            candidates.push(UrlSource::Configured(url.clone()));
        }
        if let Some(origin) = request_origin {
            candidates.push(UrlSource::RequestOrigin(origin.to_owned()));
        }
        if let Some(host) = &self.platform_host {
            candidates.push(UrlSource::PlatformHost(host.clone()));
        }
        resolve_site_url(&candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn configured_url_wins_and_loses_trailing_slash() {
        let site = SiteConfig {
            configured_url: Some("https://example.net/".into()),
            platform_host: Some("generated.platform.app".into()),
        };
        assert_eq!(
            site.base_url(Some("https://seen.example.org")),
            "https://example.net"
        );
    }

    #[rstest]
    fn request_origin_beats_platform_host() {
        let site = SiteConfig {
            configured_url: None,
            platform_host: Some("generated.platform.app".into()),
        };
        assert_eq!(
            site.base_url(Some("https://seen.example.org")),
            "https://seen.example.org"
        );
    }

    #[rstest]
    fn platform_host_gains_https_scheme() {
        let site = SiteConfig {
            configured_url: None,
            platform_host: Some("generated.platform.app".into()),
        };
        assert_eq!(site.base_url(None), "https://generated.platform.app");
    }

    #[rstest]
    fn everything_absent_falls_back_to_localhost() {
        let site = SiteConfig::default();
        assert_eq!(site.base_url(None), LOCALHOST_URL);
        // Blank configured values are skipped, not returned.
        let blank = SiteConfig {
            configured_url: Some("   ".into()),
            platform_host: None,
        };
        assert_eq!(blank.base_url(None), LOCALHOST_URL);
    }

    #[rstest]
    #[case("localhost:8080", "http://localhost:8080")]
    #[case("127.0.0.1:3000", "http://127.0.0.1:3000")]
    #[case("[::1]:8080", "http://[::1]:8080")]
    #[case("[::1]", "http://[::1]")]
    #[case("[2001:db8::1]:443", "https://[2001:db8::1]:443")]
    #[case("blog.example.net", "https://blog.example.net")]
    fn origins_use_https_except_for_local_hosts(#[case] host: &str, #[case] expected: &str) {
        assert_eq!(origin_from_host(host), expected);
    }
}
