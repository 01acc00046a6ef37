use url::Url;

/// Returns the network location of a URL: host plus explicit port
///
/// The `url` crate already lowercases hosts and drops default ports, so two
/// locations compare equal exactly when a browser would consider them the same
/// origin host. URLs without a host (`mailto:`, `tel:`, `javascript:`) return
/// an empty string.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use mailscout::url::network_location;
///
/// let url = Url::parse("https://Example.com:8080/path").unwrap();
/// assert_eq!(network_location(&url), "example.com:8080");
///
/// let url = Url::parse("http://example.com:80/").unwrap();
/// assert_eq!(network_location(&url), "example.com");
/// ```
pub fn network_location(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

/// Parses the starting URL of a domain task
///
/// Business lists often carry bare hosts such as `www.acme.com`; those are
/// given an `http://` scheme. Returns `None` if the value still does not parse
/// to an HTTP(S) URL with a host.
///
/// # Examples
///
/// ```
/// use mailscout::url::parse_start_url;
///
/// let url = parse_start_url("www.acme.com").unwrap();
/// assert_eq!(url.as_str(), "http://www.acme.com/");
///
/// assert!(parse_start_url("").is_none());
/// ```
pub fn parse_start_url(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    };

    let url = Url::parse(&candidate).ok()?;
    if (url.scheme() == "http" || url.scheme() == "https") && url.host_str().is_some() {
        Some(url)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_simple() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(network_location(&url), "example.com");
    }

    #[test]
    fn test_location_keeps_subdomain() {
        let url = Url::parse("https://www.example.com/").unwrap();
        assert_eq!(network_location(&url), "www.example.com");
    }

    #[test]
    fn test_location_with_port() {
        let url = Url::parse("http://127.0.0.1:4321/page").unwrap();
        assert_eq!(network_location(&url), "127.0.0.1:4321");
    }

    #[test]
    fn test_location_ignores_scheme() {
        let http = Url::parse("http://example.com/a").unwrap();
        let https = Url::parse("https://example.com/b").unwrap();
        assert_eq!(network_location(&http), network_location(&https));
    }

    #[test]
    fn test_location_without_host() {
        let url = Url::parse("mailto:info@example.com").unwrap();
        assert_eq!(network_location(&url), "");
    }

    #[test]
    fn test_start_url_with_scheme() {
        let url = parse_start_url("https://acme.com/start").unwrap();
        assert_eq!(url.as_str(), "https://acme.com/start");
    }

    #[test]
    fn test_start_url_trims_whitespace() {
        let url = parse_start_url("  http://acme.com  ").unwrap();
        assert_eq!(url.host_str(), Some("acme.com"));
    }

    #[test]
    fn test_start_url_rejects_other_schemes() {
        assert!(parse_start_url("ftp://acme.com").is_none());
        assert!(parse_start_url("file:///etc/hosts").is_none());
    }

    #[test]
    fn test_start_url_rejects_garbage() {
        assert!(parse_start_url("http://").is_none());
        assert!(parse_start_url("   ").is_none());
    }
}
