//! Object keys for post images.
//!
//! Every image lives at `<identity>/<postId>/<filename>`. The first two
//! segments tie an upload back to its post record; everything after the
//! second `/` is free-form and ignored when parsing.

use std::borrow::Cow;

use thiserror::Error;

use crate::identity::Identity;
use crate::post::PostId;

/// Object key errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ObjectKeyError {
    /// The key is not valid percent-encoding.
    #[error("object key '{key}' cannot be decoded: {reason}")]
    Undecodable {
        /// The raw key.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// The key lacks a non-empty identity or post id segment.
    #[error("object key '{key}' does not start with <identity>/<postId>/")]
    MissingSegments {
        /// The decoded key.
        key: String,
    },

    /// A segment contains a path separator and would split the key.
    #[error("{segment} '{value}' must not contain '/'")]
    InvalidSegment {
        /// Which segment.
        segment: &'static str,
        /// The offending value.
        value: String,
    },
}

/// A decoded image key and the post it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageObjectKey {
    /// Owner of the post.
    pub identity: Identity,
    /// Post the image belongs to.
    pub post_id: PostId,
    /// The full decoded object key.
    pub key: String,
}

impl ImageObjectKey {
    /// Builds the key an upload for `post_id` must land at.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSegment` if the identity or post id contains `/`.
    pub fn build(
        identity: &Identity,
        post_id: &PostId,
        filename: &str,
    ) -> Result<String, ObjectKeyError> {
        check_segment("identity", identity.as_str())?;
        check_segment("postId", post_id.as_str())?;
        Ok(format!("{identity}/{post_id}/{filename}"))
    }

    /// Splits a decoded key into identity and post id.
    ///
    /// # Errors
    ///
    /// Returns `MissingSegments` when either of the first two segments is
    /// absent or empty.
    pub fn parse(key: &str) -> Result<Self, ObjectKeyError> {
        let mut segments = key.split('/');
        let identity = segments.next().and_then(Identity::new);
        let post_id = segments.next().and_then(PostId::new);

        match (identity, post_id) {
            (Some(identity), Some(post_id)) => Ok(Self {
                identity,
                post_id,
                key: key.to_string(),
            }),
            _ => Err(ObjectKeyError::MissingSegments {
                key: key.to_string(),
            }),
        }
    }
}

/// Undoes the escaping object-store notifications apply to keys.
///
/// Form-style: `+` is a space, then `%XX` escapes are decoded.
///
/// # Errors
///
/// Returns `Undecodable` if the escapes do not form valid UTF-8.
pub fn decode_notification_key(raw: &str) -> Result<String, ObjectKeyError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .map_err(|e| ObjectKeyError::Undecodable {
            key: raw.to_string(),
            reason: e.to_string(),
        })
}

fn check_segment(segment: &'static str, value: &str) -> Result<(), ObjectKeyError> {
    if value.contains('/') {
        return Err(ObjectKeyError::InvalidSegment {
            segment,
            value: value.to_string(),
        });
    }
    Ok(())
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // A key built for (identity, post id) always parses back to the same pair,
    // whatever the filename.
    proptest! {
        #[test]
        fn prop_built_key_parses_to_owner(
            identity in "[^/]{1,20}",
            post_id in "[a-zA-Z0-9-]{1,36}",
            filename in ".{0,40}",
        ) {
            let identity = Identity::new(identity).unwrap();
            let post_id = PostId::new(post_id).unwrap();

            let key = ImageObjectKey::build(&identity, &post_id, &filename).unwrap();
            let parsed = ImageObjectKey::parse(&key).unwrap();

            prop_assert_eq!(parsed.identity, identity);
            prop_assert_eq!(parsed.post_id, post_id);
        }
    }
}
