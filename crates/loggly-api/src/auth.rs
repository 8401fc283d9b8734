//! Credential storage and auth header resolution.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::config::LogglyConfig;

/// How a query API request authenticates.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// `Authorization: Bearer <api_token>`.
    Bearer(String),
    /// HTTP basic auth.
    Basic { username: String, password: String },
}

impl AuthMethod {
    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        match self {
            Self::Bearer(token) => format!("Bearer {token}"),
            Self::Basic { username, password } => {
                format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
            }
        }
    }

    pub fn is_bearer(&self) -> bool {
        matches!(self, Self::Bearer(_))
    }
}

impl std::fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Credentials held by a client.
///
/// Both forms may be stored at once; the API token always wins when a
/// request is authenticated.
#[derive(Clone, Default)]
pub struct Credentials {
    pub api_token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn from_config(config: &LogglyConfig) -> Self {
        Self {
            api_token: config.api_token.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    fn bearer(&self) -> Option<AuthMethod> {
        self.api_token
            .as_ref()
            .filter(|t| !t.is_empty())
            .map(|t| AuthMethod::Bearer(t.clone()))
    }

    fn basic(&self) -> Option<AuthMethod> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(AuthMethod::Basic {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }

    /// Pick the auth method for a request: bearer token first, then basic.
    pub fn resolve_auth(&self) -> Option<AuthMethod> {
        self.bearer().or_else(|| self.basic())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(token: Option<&str>, user: Option<&str>, pass: Option<&str>) -> Credentials {
        Credentials {
            api_token: token.map(String::from),
            username: user.map(String::from),
            password: pass.map(String::from),
        }
    }

    #[test]
    fn token_only_resolves_bearer() {
        let auth = creds(Some("abc"), None, None).resolve_auth().unwrap();
        assert_eq!(auth, AuthMethod::Bearer("abc".into()));
        assert_eq!(auth.header_value(), "Bearer abc");
    }

    #[test]
    fn token_wins_over_basic() {
        let auth = creds(Some("abc"), Some("ops"), Some("pw"))
            .resolve_auth()
            .unwrap();
        assert!(auth.is_bearer());
    }

    #[test]
    fn basic_when_no_token() {
        let auth = creds(None, Some("ops"), Some("pw")).resolve_auth().unwrap();
        assert_eq!(
            auth,
            AuthMethod::Basic {
                username: "ops".into(),
                password: "pw".into()
            }
        );
        // base64("ops:pw")
        assert_eq!(auth.header_value(), "Basic b3BzOnB3");
    }

    #[test]
    fn incomplete_basic_resolves_nothing() {
        assert!(creds(None, Some("ops"), None).resolve_auth().is_none());
        assert!(creds(None, None, Some("pw")).resolve_auth().is_none());
        assert!(Credentials::default().resolve_auth().is_none());
    }

    #[test]
    fn empty_token_falls_back_to_basic() {
        let auth = creds(Some(""), Some("ops"), Some("pw"))
            .resolve_auth()
            .unwrap();
        assert!(!auth.is_bearer());
    }

    #[test]
    fn debug_hides_secrets() {
        let c = creds(Some("abc"), Some("ops"), Some("pw"));
        let rendered = format!("{c:?} {:?}", c.resolve_auth().unwrap());
        assert!(!rendered.contains("abc"));
        assert!(!rendered.contains("\"pw\""));
        assert!(rendered.contains("ops"));
    }
}
