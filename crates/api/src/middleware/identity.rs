//! Caller identity resolution.
//!
//! The caller identity is an opaque string taken from the `Authorization`
//! header as-is. It is not verified. Handlers only see [`MaybeCaller`], so
//! a real authentication scheme can replace [`HeaderIdentity`] without
//! touching them.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderName, header::AUTHORIZATION, request::Parts},
};
use postagram_core::Identity;

use crate::AppState;

/// Resolves who is calling.
pub trait IdentityResolver: Send + Sync {
    /// Returns the caller identity, or `None` when the request carries none.
    fn resolve(&self, parts: &Parts) -> Option<Identity>;
}

/// Reads the identity verbatim from a request header.
#[derive(Debug, Clone)]
pub struct HeaderIdentity {
    header: HeaderName,
}

impl HeaderIdentity {
    /// Reads from `header`.
    #[must_use]
    pub fn new(header: HeaderName) -> Self {
        Self { header }
    }
}

impl Default for HeaderIdentity {
    fn default() -> Self {
        Self::new(AUTHORIZATION)
    }
}

impl IdentityResolver for HeaderIdentity {
    fn resolve(&self, parts: &Parts) -> Option<Identity> {
        parts
            .headers
            .get(&self.header)
            .and_then(|value| value.to_str().ok())
            .and_then(Identity::new)
    }
}

/// Extractor for the caller identity, which a request may omit.
///
/// Never rejects. Handlers decide what an absent identity means; the post
/// routes fall back to [`Identity::anonymous`].
#[derive(Debug, Clone)]
pub struct MaybeCaller(pub Option<Identity>);

impl MaybeCaller {
    /// The resolved identity, or the anonymous one.
    #[must_use]
    pub fn or_anonymous(self) -> Identity {
        self.0.unwrap_or_else(Identity::anonymous)
    }
}

impl FromRequestParts<AppState> for MaybeCaller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.identity.resolve(parts)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: Option<(&str, &str)>) -> Parts {
        let mut builder = Request::builder().uri("/posts");
        if let Some((name, value)) = header {
            builder = builder.header(name, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_authorization_header_is_taken_verbatim() {
        let identity = HeaderIdentity::default()
            .resolve(&parts(Some(("Authorization", "bob"))))
            .unwrap();
        assert_eq!(identity.as_str(), "bob");
    }

    #[test]
    fn test_missing_or_empty_header_is_none() {
        let resolver = HeaderIdentity::default();
        assert!(resolver.resolve(&parts(None)).is_none());
        assert!(resolver.resolve(&parts(Some(("Authorization", "")))).is_none());
    }

    #[test]
    fn test_custom_header() {
        let resolver = HeaderIdentity::new(HeaderName::from_static("x-user"));
        let identity = resolver.resolve(&parts(Some(("x-user", "carol")))).unwrap();
        assert_eq!(identity.as_str(), "carol");
        assert!(resolver.resolve(&parts(Some(("Authorization", "bob")))).is_none());
    }

    #[test]
    fn test_absent_caller_is_anonymous() {
        assert_eq!(MaybeCaller(None).or_anonymous(), Identity::anonymous());

        let bob = Identity::new("bob").unwrap();
        assert_eq!(MaybeCaller(Some(bob.clone())).or_anonymous(), bob);
    }
}
