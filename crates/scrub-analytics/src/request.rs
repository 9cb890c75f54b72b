//! Outbound analytics request.

use url::Url;

/// A fully prepared request. Sending it is up to the caller's transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// HTTP method, always `POST` for analytics.
    pub method: String,

    /// Endpoint including the `org` query parameter.
    pub url: Url,

    /// Header name/value pairs in insertion order. Names may repeat.
    pub headers: Vec<(String, String)>,

    /// Sanitized JSON body.
    pub body: Vec<u8>,
}

impl OutboundRequest {
    /// All values of header `name`, compared case-insensitively.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// First value of header `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_values(name).into_iter().next()
    }

    /// Body as text.
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = OutboundRequest {
            method: "POST".to_string(),
            url: Url::parse("http://example.com").unwrap(),
            headers: vec![
                ("Authorization".to_string(), "token a".to_string()),
                ("X-Extra".to_string(), "1".to_string()),
                ("x-extra".to_string(), "2".to_string()),
            ],
            body: b"{}".to_vec(),
        };

        assert_eq!(request.header("authorization"), Some("token a"));
        assert_eq!(request.header_values("X-EXTRA"), vec!["1", "2"]);
        assert_eq!(request.header("missing"), None);
        assert_eq!(request.body_str(), Some("{}"));
    }
}
