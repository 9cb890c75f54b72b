//! Identity of the user whose name and home directory must not leak.

use serde::{Deserialize, Serialize};

/// The (username, home directory) pair scrubbed by the literal redactor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDescriptor {
    /// Username as reported by the OS, optionally `DOMAIN\user`.
    pub raw_user_name: String,

    /// Home directory path in whatever separator convention the OS uses.
    pub home_dir: String,
}

impl IdentityDescriptor {
    pub fn new(raw_user_name: impl Into<String>, home_dir: impl Into<String>) -> Self {
        Self {
            raw_user_name: raw_user_name.into(),
            home_dir: home_dir.into(),
        }
    }

    /// Identity of the user running this process.
    ///
    /// The username comes from `USER` or `USERNAME`, prefixed with
    /// `USERDOMAIN\` when that is set. Returns `None` when no username can be
    /// determined.
    pub fn current() -> Option<Self> {
        let user = std::env::var("USER")
            .ok()
            .or_else(|| std::env::var("USERNAME").ok())
            .filter(|u| !u.trim().is_empty())?;

        let raw_user_name = match std::env::var("USERDOMAIN") {
            Ok(domain) if !domain.is_empty() && !user.contains('\\') => {
                format!("{domain}\\{user}")
            }
            _ => user,
        };

        let home_dir = dirs::home_dir()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        Some(Self::new(raw_user_name, home_dir))
    }

    /// Username with any `DOMAIN\` prefix stripped.
    pub fn simple_user_name(&self) -> &str {
        match self.raw_user_name.rfind('\\') {
            Some(idx) => &self.raw_user_name[idx + 1..],
            None => &self.raw_user_name,
        }
    }

    /// Literal strings to scrub, most specific first.
    ///
    /// Order: home directory as given, home directory in each uniform
    /// separator convention, raw username, bare username. Each is followed by
    /// its JSON-string spelling when that differs, and that spelling goes
    /// first since it is the longer of the two. Empty and duplicate entries
    /// are dropped, as is a home directory that is only a filesystem root.
    pub fn candidates(&self) -> Vec<String> {
        let home = self.home_dir.as_str();
        let mut targets: Vec<String> = Vec::with_capacity(5);
        if !is_root_like(home) {
            targets.push(home.to_string());
            targets.push(home.replace('\\', "/"));
            targets.push(home.replace('/', "\\"));
        }
        targets.push(self.raw_user_name.clone());
        targets.push(self.simple_user_name().to_string());

        let mut out: Vec<String> = Vec::new();
        for target in targets {
            if target.is_empty() {
                continue;
            }
            let escaped = json_escaped(&target);
            for candidate in [escaped, target] {
                if !out.contains(&candidate) {
                    out.push(candidate);
                }
            }
        }
        out
    }
}

/// True for paths that name no particular user: separators alone or a bare
/// drive such as `C:` or `C:\`.
fn is_root_like(path: &str) -> bool {
    let trimmed = path.trim_end_matches(|c| c == '/' || c == '\\');
    match trimmed.as_bytes() {
        [] => true,
        [drive, b':'] => drive.is_ascii_alphabetic(),
        _ => false,
    }
}

/// Spelling of `s` inside a JSON string literal, without the quotes.
fn json_escaped(s: &str) -> String {
    match serde_json::to_string(s) {
        Ok(quoted) if quoted.len() >= 2 => quoted[1..quoted.len() - 1].to_string(),
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_user_name() {
        let id = IdentityDescriptor::new("domainName\\some.user", "");
        assert_eq!(id.simple_user_name(), "some.user");

        let id = IdentityDescriptor::new("some.user", "");
        assert_eq!(id.simple_user_name(), "some.user");
    }

    #[test]
    fn test_candidates_windows_path() {
        let id = IdentityDescriptor::new("domainName\\some.user", r"C:\Users\some.user\AppData\Local");
        let candidates = id.candidates();

        assert_eq!(
            candidates,
            vec![
                r"C:\\Users\\some.user\\AppData\\Local".to_string(),
                r"C:\Users\some.user\AppData\Local".to_string(),
                "C:/Users/some.user/AppData/Local".to_string(),
                r"domainName\\some.user".to_string(),
                r"domainName\some.user".to_string(),
                "some.user".to_string(),
            ]
        );
    }

    #[test]
    fn test_candidates_unix_path() {
        let id = IdentityDescriptor::new("some.user", "/Users/some.user/some/Path");
        let candidates = id.candidates();

        assert_eq!(
            candidates,
            vec![
                "/Users/some.user/some/Path".to_string(),
                r"\\Users\\some.user\\some\\Path".to_string(),
                r"\Users\some.user\some\Path".to_string(),
                "some.user".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_identity_has_no_candidates() {
        let id = IdentityDescriptor::new("", "");
        assert!(id.candidates().is_empty());
    }

    #[test]
    fn test_root_home_dropped() {
        for home in ["/", "\\", "//", "C:", r"C:\", "c:/"] {
            let id = IdentityDescriptor::new("svc", home);
            assert_eq!(id.candidates(), vec!["svc".to_string()], "home {home:?}");
        }
    }

    #[test]
    fn test_is_root_like() {
        assert!(is_root_like(""));
        assert!(is_root_like("/"));
        assert!(is_root_like(r"D:\"));
        assert!(!is_root_like("/root"));
        assert!(!is_root_like(r"C:\Users"));
        assert!(!is_root_like("1:"));
    }

    #[test]
    fn test_json_escaped_quotes() {
        assert_eq!(json_escaped("a\"b"), "a\\\"b");
        assert_eq!(json_escaped("plain"), "plain");
    }
}
