//! Raw resource-link candidates
//!
//! A candidate is the transient record an external scanner produces per
//! introspected handler method: relation-type URI, one HTTP method token,
//! href or href-template, media-type lists, and optional metadata. The core
//! does not care how candidates were discovered (annotations, struct tags,
//! explicit registration); it only folds them into a document.

use serde::Deserialize;
use url::Url;

use crate::document::Document;
use crate::error::DiscoveryError;
use crate::hints::{union, Hints, Method, Precondition, Status};
use crate::link::{HrefVar, RelationType, ResourceLink};

/// Variable metadata supplied with a templated candidate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VarSpec {
    pub name: String,
    /// URI describing the variable's semantic type
    pub var_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One raw candidate record from the scanner
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawCandidate {
    /// Relation-type URI
    pub rel: String,
    /// HTTP method token (case-insensitive)
    pub method: String,
    /// Concrete address; exactly one of `href` / `href_template` must be set
    #[serde(default)]
    pub href: Option<String>,
    /// URI template with `{var}` placeholders
    #[serde(default)]
    pub href_template: Option<String>,
    #[serde(default)]
    pub href_vars: Vec<VarSpec>,
    /// Media types produced/consumed
    #[serde(default)]
    pub representations: Vec<String>,
    #[serde(default)]
    pub accept_put: Vec<String>,
    #[serde(default)]
    pub accept_post: Vec<String>,
    #[serde(default)]
    pub precondition_req: Vec<String>,
    #[serde(default)]
    pub docs: Option<String>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl RawCandidate {
    /// Convert the candidate into a resource link
    pub fn into_link(self) -> Result<ResourceLink, DiscoveryError> {
        let relation_type = RelationType::parse(&self.rel)?;

        let docs = match &self.docs {
            Some(uri) => Some(Url::parse(uri).map_err(|e| {
                DiscoveryError::InvalidCandidate(format!("invalid docs URI '{}': {}", uri, e))
            })?),
            None => None,
        };

        let precondition_req = self
            .precondition_req
            .iter()
            .map(|token| Precondition::from_token(token))
            .collect::<Result<Vec<_>, _>>()?;

        let status = match &self.status {
            Some(token) => Some(Status::from_token(token)?),
            None => None,
        };

        let hints = Hints {
            allow: vec![Method::from_token(&self.method)?],
            representations: union(&[], &self.representations),
            accept_put: union(&[], &self.accept_put),
            accept_post: union(&[], &self.accept_post),
            precondition_req: union(&[], &precondition_req),
            docs,
            description: union(&[], &self.description),
            status,
        };

        match (self.href, self.href_template) {
            (Some(href), None) => {
                if !self.href_vars.is_empty() {
                    return Err(DiscoveryError::InvalidCandidate(format!(
                        "direct candidate '{}' carries href-vars",
                        relation_type
                    )));
                }
                ResourceLink::direct(relation_type, href, hints)
            }
            (None, Some(template)) => {
                let href_vars = self
                    .href_vars
                    .into_iter()
                    .map(|spec| HrefVar {
                        name: spec.name,
                        var_type: spec.var_type,
                        description: spec.description,
                    })
                    .collect();
                ResourceLink::templated(relation_type, template, href_vars, hints)
            }
            (Some(_), Some(_)) => Err(DiscoveryError::InvalidCandidate(format!(
                "candidate '{}' has both href and href-template",
                relation_type
            ))),
            (None, None) => Err(DiscoveryError::InvalidCandidate(format!(
                "candidate '{}' has neither href nor href-template",
                relation_type
            ))),
        }
    }
}

/// Fold a sequence of raw candidates into a discovery document
///
/// Candidates are converted left to right and merged per relation type, so
/// for the single-valued hints (docs, status) later candidates override
/// earlier ones.
pub fn merge_candidates(
    candidates: impl IntoIterator<Item = RawCandidate>,
) -> Result<Document, DiscoveryError> {
    let links = candidates
        .into_iter()
        .map(RawCandidate::into_link)
        .collect::<Result<Vec<_>, _>>()?;
    Document::build(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(rel: &str, method: &str, href: &str) -> RawCandidate {
        RawCandidate {
            rel: rel.to_string(),
            method: method.to_string(),
            href: Some(href.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_two_methods_one_relation() {
        let doc = merge_candidates(vec![
            RawCandidate {
                representations: vec!["text/html".to_string()],
                ..candidate("/rel/foo", "GET", "/foo")
            },
            RawCandidate {
                representations: vec!["application/json".to_string()],
                ..candidate("/rel/foo", "POST", "/foo")
            },
        ])
        .unwrap();

        assert_eq!(doc.len(), 1);
        let link = doc.lookup("/rel/foo").unwrap();
        assert_eq!(link.hints().allow, vec![Method::Get, Method::Post]);
        assert_eq!(
            link.hints().representations,
            vec!["text/html", "application/json"]
        );
    }

    #[test]
    fn test_templated_candidate() {
        let doc = merge_candidates(vec![RawCandidate {
            rel: "http://example.org/rel/item".to_string(),
            method: "get".to_string(),
            href_template: Some("/item/{itemId}".to_string()),
            href_vars: vec![VarSpec {
                name: "itemId".to_string(),
                var_type: "http://example.org/vartype/item#id".to_string(),
                description: Some("the item's id".to_string()),
            }],
            ..Default::default()
        }])
        .unwrap();

        match doc.lookup("http://example.org/rel/item").unwrap() {
            ResourceLink::Templated(link) => {
                assert_eq!(link.href_template, "/item/{itemId}");
                assert_eq!(link.href_vars.len(), 1);
                assert_eq!(link.href_vars[0].name, "itemId");
            }
            ResourceLink::Direct(_) => panic!("expected templated link"),
        }
    }

    #[test]
    fn test_candidate_requires_exactly_one_address() {
        let both = RawCandidate {
            href_template: Some("/foo/{id}".to_string()),
            ..candidate("/rel/foo", "GET", "/foo")
        };
        assert!(matches!(
            both.into_link(),
            Err(DiscoveryError::InvalidCandidate(_))
        ));

        let neither = RawCandidate {
            rel: "/rel/foo".to_string(),
            method: "GET".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            neither.into_link(),
            Err(DiscoveryError::InvalidCandidate(_))
        ));
    }

    #[test]
    fn test_unknown_method_token() {
        let result = candidate("/rel/foo", "FETCH", "/foo").into_link();
        assert!(matches!(
            result,
            Err(DiscoveryError::UnknownEnumValue { .. })
        ));
    }

    #[test]
    fn test_duplicate_representations_suppressed() {
        let link = RawCandidate {
            representations: vec![
                "text/html".to_string(),
                "text/html".to_string(),
                "application/json".to_string(),
            ],
            ..candidate("/rel/foo", "GET", "/foo")
        }
        .into_link()
        .unwrap();

        assert_eq!(
            link.hints().representations,
            vec!["text/html", "application/json"]
        );
    }

    #[test]
    fn test_deserialize_candidate() {
        let json = r#"{
            "rel": "/rel/basket",
            "method": "put",
            "href": "/basket",
            "representations": ["application/json"],
            "precondition-req": ["etag"],
            "status": "deprecated"
        }"#;

        let parsed: RawCandidate = serde_json::from_str(json).unwrap();
        let link = parsed.into_link().unwrap();
        assert_eq!(link.hints().allow, vec![Method::Put]);
        assert_eq!(link.hints().precondition_req, vec![Precondition::Etag]);
        assert_eq!(link.hints().status, Some(Status::Deprecated));
    }
}
