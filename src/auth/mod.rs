use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("password task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// One-way salted hash of a password. Runs on the blocking pool since bcrypt
/// is deliberately slow.
pub async fn hash_password(password: String, cost: u32) -> Result<String, PasswordError> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hashed)
}

/// Check a password against a stored bcrypt hash
pub async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(matches)
}

/// Name/secret pair carried by an `Authorization: Basic` header
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub pass: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("pass", &"<redacted>")
            .finish()
    }
}

/// Extract basic-auth credentials. Anything malformed (wrong scheme, bad
/// base64, no colon, non-UTF-8) counts as no credentials at all.
pub fn parse_basic_auth(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();

    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;

    // The password may itself contain ':'; the name may not
    let (name, pass) = decoded.split_once(':')?;

    Some(Credentials {
        name: name.to_string(),
        pass: pass.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn basic(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn parses_name_and_pass() {
        let creds = parse_basic_auth(&headers_with(&basic("ada@x.com:secret"))).unwrap();
        assert_eq!(creds.name, "ada@x.com");
        assert_eq!(creds.pass, "secret");
    }

    #[test]
    fn password_may_contain_colons() {
        let creds = parse_basic_auth(&headers_with(&basic("ada@x.com:a:b:c"))).unwrap();
        assert_eq!(creds.pass, "a:b:c");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let value = format!("bAsIc {}", STANDARD.encode("ada@x.com:secret"));
        assert!(parse_basic_auth(&headers_with(&value)).is_some());
    }

    #[test]
    fn missing_or_malformed_headers_yield_none() {
        assert!(parse_basic_auth(&HeaderMap::new()).is_none());
        assert!(parse_basic_auth(&headers_with("Bearer abc.def.ghi")).is_none());
        assert!(parse_basic_auth(&headers_with("Basic !!!not-base64!!!")).is_none());
        assert!(parse_basic_auth(&headers_with(&basic("no-colon-here"))).is_none());
        assert!(parse_basic_auth(&headers_with("Basic")).is_none());
    }

    #[test]
    fn debug_output_hides_password() {
        let creds = Credentials {
            name: "ada@x.com".to_string(),
            pass: "secret".to_string(),
        };
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("secret"));
    }

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("secret".to_string(), 4).await.unwrap();
        assert_ne!(hash, "secret");
        assert!(verify_password("secret".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("wrong".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn hashing_is_salted() {
        let a = hash_password("secret".to_string(), 4).await.unwrap();
        let b = hash_password("secret".to_string(), 4).await.unwrap();
        assert_ne!(a, b);
    }
}
