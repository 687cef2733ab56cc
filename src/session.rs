//! Session state carried across authenticated checks

use serde_json::Value;

/// Bearer-token session for one runner invocation
///
/// Holds at most one token, set once after a successful login parse and
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Creates an unauthenticated session
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the access token obtained from login
    pub fn authenticate(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Returns true once a token has been stored
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Synthesizes the `Authorization` header value, if authenticated
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }
}

/// Extracts the `access_token` field from a login response body
///
/// Malformed JSON is an error; well-formed JSON without the field (or
/// with a non-string value) is `Ok(None)`. Callers treat both as a
/// warning, never a fatal condition.
pub fn extract_access_token(body: &str) -> Result<Option<String>, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;
    Ok(value
        .get("access_token")
        .and_then(Value::as_str)
        .map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_header_requires_a_token() {
        let mut session = Session::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.bearer(), None);

        session.authenticate("abc".to_string());
        assert!(session.is_authenticated());
        assert_eq!(session.bearer().as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn extracts_token_from_login_body() {
        let body = r#"{"access_token":"tok-123","user":{"email":"a@b.c"}}"#;
        assert_eq!(
            extract_access_token(body).unwrap().as_deref(),
            Some("tok-123")
        );
    }

    #[test]
    fn missing_field_is_none_not_error() {
        let body = r#"{"user":{"email":"a@b.c"}}"#;
        assert_eq!(extract_access_token(body).unwrap(), None);
    }

    #[test]
    fn non_string_token_is_none() {
        let body = r#"{"access_token":42}"#;
        assert_eq!(extract_access_token(body).unwrap(), None);
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(extract_access_token("<html>oops</html>").is_err());
    }
}
