//! Resource hints and their token vocabularies
//!
//! Hints describe the declared capabilities and constraints of a resource
//! link: allowed HTTP methods, media types, preconditions for mutating
//! requests, documentation, and lifecycle status. Every collection defaults
//! to empty; an empty `Hints` means "no constraints declared".

use url::Url;

use crate::error::DiscoveryError;

/// HTTP method token for the `allow` hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
}

impl Method {
    /// Wire token (upper-case)
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
        }
    }

    /// Parse a token, case-insensitively
    pub fn from_token(token: &str) -> Result<Self, DiscoveryError> {
        match token.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "HEAD" => Ok(Method::Head),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "OPTIONS" => Ok(Method::Options),
            "TRACE" => Ok(Method::Trace),
            _ => Err(DiscoveryError::UnknownEnumValue {
                expected: "HTTP method",
                token: token.to_string(),
            }),
        }
    }
}

/// Precondition required before mutating requests (`precondition-req` hint)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    Etag,
    LastModified,
}

impl Precondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Precondition::Etag => "ETAG",
            Precondition::LastModified => "LAST_MODIFIED",
        }
    }

    pub fn from_token(token: &str) -> Result<Self, DiscoveryError> {
        match token.to_ascii_uppercase().as_str() {
            "ETAG" => Ok(Precondition::Etag),
            "LAST_MODIFIED" | "LAST-MODIFIED" => Ok(Precondition::LastModified),
            _ => Err(DiscoveryError::UnknownEnumValue {
                expected: "precondition",
                token: token.to_string(),
            }),
        }
    }
}

/// Lifecycle marker for the `status` hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Deprecated,
    Gone,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Deprecated => "DEPRECATED",
            Status::Gone => "GONE",
        }
    }

    pub fn from_token(token: &str) -> Result<Self, DiscoveryError> {
        match token.to_ascii_uppercase().as_str() {
            "DEPRECATED" => Ok(Status::Deprecated),
            "GONE" => Ok(Status::Gone),
            _ => Err(DiscoveryError::UnknownEnumValue {
                expected: "status",
                token: token.to_string(),
            }),
        }
    }
}

/// Per-resource metadata attached to a link
///
/// Collection fields are semantically sets with first-seen insertion order;
/// `docs` and `status` are single-valued.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hints {
    /// Allowed HTTP methods
    pub allow: Vec<Method>,
    /// Media types produced/consumed by the resource
    pub representations: Vec<String>,
    /// Media types accepted on PUT, when they differ from `representations`
    pub accept_put: Vec<String>,
    /// Media types accepted on POST, when they differ from `representations`
    pub accept_post: Vec<String>,
    /// Preconditions required before mutating requests
    pub precondition_req: Vec<Precondition>,
    /// Documentation URI
    pub docs: Option<Url>,
    /// Free-text documentation (extended profile only on the wire)
    pub description: Vec<String>,
    /// Lifecycle status
    pub status: Option<Status>,
}

impl Hints {
    /// True if no hint at all has been declared
    pub fn is_empty(&self) -> bool {
        self.allow.is_empty()
            && self.representations.is_empty()
            && self.accept_put.is_empty()
            && self.accept_post.is_empty()
            && self.precondition_req.is_empty()
            && self.docs.is_none()
            && self.description.is_empty()
            && self.status.is_none()
    }

    /// Merge two hint sets using union strategy
    ///
    /// Collection fields take the union, preserving first-seen order across
    /// `self` then `later`. The single-valued fields (`docs`, `status`) take
    /// the later value when present: a fold over candidates is therefore not
    /// commutative for these fields, and later-declared candidates override
    /// earlier ones.
    pub fn merge(&self, later: &Hints) -> Hints {
        Hints {
            allow: union(&self.allow, &later.allow),
            representations: union(&self.representations, &later.representations),
            accept_put: union(&self.accept_put, &later.accept_put),
            accept_post: union(&self.accept_post, &later.accept_post),
            precondition_req: union(&self.precondition_req, &later.precondition_req),
            docs: later.docs.clone().or_else(|| self.docs.clone()),
            description: union(&self.description, &later.description),
            status: later.status.or(self.status),
        }
    }
}

/// Union of two lists, keeping unique values in first-seen order
pub(crate) fn union<T: Clone + PartialEq>(a: &[T], b: &[T]) -> Vec<T> {
    let mut result: Vec<T> = Vec::new();
    for item in a.iter().chain(b) {
        if !result.contains(item) {
            result.push(item.clone());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_tokens() {
        assert_eq!(Method::from_token("get").unwrap(), Method::Get);
        assert_eq!(Method::from_token("POST").unwrap(), Method::Post);
        assert_eq!(Method::Delete.as_str(), "DELETE");

        let err = Method::from_token("FETCH").unwrap_err();
        assert!(matches!(
            err,
            DiscoveryError::UnknownEnumValue {
                expected: "HTTP method",
                ..
            }
        ));
    }

    #[test]
    fn test_precondition_tokens() {
        assert_eq!(Precondition::from_token("etag").unwrap(), Precondition::Etag);
        assert_eq!(
            Precondition::from_token("last-modified").unwrap(),
            Precondition::LastModified
        );
        assert!(Precondition::from_token("IF-MATCH").is_err());
    }

    #[test]
    fn test_status_tokens() {
        assert_eq!(Status::from_token("deprecated").unwrap(), Status::Deprecated);
        assert!(Status::from_token("OBSOLETE").is_err());
    }

    #[test]
    fn test_union_keeps_first_seen_order() {
        let a = vec!["text/html".to_string(), "application/json".to_string()];
        let b = vec!["application/json".to_string(), "text/plain".to_string()];
        assert_eq!(
            union(&a, &b),
            vec!["text/html", "application/json", "text/plain"]
        );
    }

    #[test]
    fn test_merge_unions_collections() {
        let a = Hints {
            allow: vec![Method::Get],
            representations: vec!["text/html".to_string()],
            ..Default::default()
        };
        let b = Hints {
            allow: vec![Method::Post],
            representations: vec!["application/json".to_string()],
            ..Default::default()
        };

        let merged = a.merge(&b);
        assert_eq!(merged.allow, vec![Method::Get, Method::Post]);
        assert_eq!(merged.representations, vec!["text/html", "application/json"]);
    }

    #[test]
    fn test_merge_scalars_last_write_wins() {
        let a = Hints {
            docs: Some(Url::parse("http://example.org/docs/old").unwrap()),
            status: Some(Status::Deprecated),
            ..Default::default()
        };
        let b = Hints {
            docs: Some(Url::parse("http://example.org/docs/new").unwrap()),
            ..Default::default()
        };

        let merged = a.merge(&b);
        assert_eq!(
            merged.docs.unwrap().as_str(),
            "http://example.org/docs/new"
        );
        // later side declared no status, earlier value survives
        assert_eq!(merged.status, Some(Status::Deprecated));
    }

    #[test]
    fn test_empty_hints() {
        assert!(Hints::default().is_empty());
        let hints = Hints {
            allow: vec![Method::Get],
            ..Default::default()
        };
        assert!(!hints.is_empty());
    }
}
