//! Resource links and relation types
//!
//! A resource link binds one link-relation type to either a concrete href
//! (direct link) or an href-template with variable bindings (templated
//! link). A relation type never resolves to both shapes across an API
//! surface; the two-variant enum keeps matching in merge and codec
//! exhaustive.

use url::Url;

use crate::error::DiscoveryError;
use crate::hints::Hints;

/// URI identifying the abstract role a resource plays (e.g. "the basket")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationType(String);

impl RelationType {
    /// Parse and validate a relation-type URI
    ///
    /// Accepts absolute URIs and relative references; relative references
    /// are validated by resolving against a placeholder base, since that is
    /// the only syntax check `url` offers for them.
    pub fn parse(uri: &str) -> Result<RelationType, DiscoveryError> {
        if uri.is_empty() {
            return Err(DiscoveryError::MalformedDocument(
                "relation type URI is empty".to_string(),
            ));
        }
        match Url::parse(uri) {
            Ok(_) => Ok(RelationType(uri.to_string())),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                // literal is known valid
                let base = Url::parse("http://relative.invalid/").unwrap();
                base.join(uri).map_err(|e| {
                    DiscoveryError::MalformedDocument(format!(
                        "relation type '{}' is not a valid URI reference: {}",
                        uri, e
                    ))
                })?;
                Ok(RelationType(uri.to_string()))
            }
            Err(e) => Err(DiscoveryError::MalformedDocument(format!(
                "relation type '{}' is not a valid URI: {}",
                uri, e
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variable binding of a templated link
///
/// `name` must match a `{name}` placeholder in the owning template.
/// `description` is scanner-side metadata; the wire format has no field for
/// it, so it is dropped on render.
#[derive(Debug, Clone, PartialEq)]
pub struct HrefVar {
    pub name: String,
    /// URI describing the variable's semantic type
    pub var_type: String,
    pub description: Option<String>,
}

/// Link with one fixed, concrete address
#[derive(Debug, Clone, PartialEq)]
pub struct DirectLink {
    pub relation_type: RelationType,
    pub href: String,
    pub hints: Hints,
}

/// Link whose address contains `{var}` placeholders resolved per request
#[derive(Debug, Clone, PartialEq)]
pub struct TemplatedLink {
    pub relation_type: RelationType,
    pub href_template: String,
    pub href_vars: Vec<HrefVar>,
    pub hints: Hints,
}

/// A link to a resource, keyed by relation type in a discovery document
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceLink {
    Direct(DirectLink),
    Templated(TemplatedLink),
}

impl ResourceLink {
    /// Build a direct link
    pub fn direct(
        relation_type: RelationType,
        href: impl Into<String>,
        hints: Hints,
    ) -> Result<ResourceLink, DiscoveryError> {
        let href = href.into();
        if href.is_empty() {
            return Err(DiscoveryError::InvalidCandidate(format!(
                "empty href for relation type '{}'",
                relation_type
            )));
        }
        Ok(ResourceLink::Direct(DirectLink {
            relation_type,
            href,
            hints,
        }))
    }

    /// Build a templated link
    ///
    /// The variable names must be exactly the set of placeholder names in
    /// the template, with no duplicates.
    pub fn templated(
        relation_type: RelationType,
        href_template: impl Into<String>,
        href_vars: Vec<HrefVar>,
        hints: Hints,
    ) -> Result<ResourceLink, DiscoveryError> {
        let href_template = href_template.into();
        if href_template.is_empty() {
            return Err(DiscoveryError::InvalidCandidate(format!(
                "empty href-template for relation type '{}'",
                relation_type
            )));
        }

        let placeholders = template_placeholders(&href_template);
        for var in &href_vars {
            if href_vars.iter().filter(|v| v.name == var.name).count() > 1 {
                return Err(DiscoveryError::InvalidCandidate(format!(
                    "duplicate href-var '{}' for relation type '{}'",
                    var.name, relation_type
                )));
            }
            if !placeholders.contains(&var.name) {
                return Err(DiscoveryError::InvalidCandidate(format!(
                    "href-var '{}' has no placeholder in template '{}'",
                    var.name, href_template
                )));
            }
        }
        for placeholder in &placeholders {
            if !href_vars.iter().any(|v| &v.name == placeholder) {
                return Err(DiscoveryError::InvalidCandidate(format!(
                    "template '{}' placeholder '{}' has no href-var binding",
                    href_template, placeholder
                )));
            }
        }

        Ok(ResourceLink::Templated(TemplatedLink {
            relation_type,
            href_template,
            href_vars,
            hints,
        }))
    }

    pub fn relation_type(&self) -> &RelationType {
        match self {
            ResourceLink::Direct(link) => &link.relation_type,
            ResourceLink::Templated(link) => &link.relation_type,
        }
    }

    pub fn hints(&self) -> &Hints {
        match self {
            ResourceLink::Direct(link) => &link.hints,
            ResourceLink::Templated(link) => &link.hints,
        }
    }
}

/// Extract `{var}` placeholder names from an RFC 6570 level-1 template
///
/// Unique names in first-seen order; an unclosed brace ends the scan.
pub fn template_placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let tail = &rest[start + 1..];
        let Some(end) = tail.find('}') else { break };
        let name = &tail[..end];
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
        rest = &tail[end + 1..];
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(uri: &str) -> RelationType {
        RelationType::parse(uri).unwrap()
    }

    #[test]
    fn test_relation_type_absolute() {
        assert_eq!(rel("http://example.org/rel/basket").as_str(), "http://example.org/rel/basket");
        assert_eq!(rel("urn:example:rel:basket").as_str(), "urn:example:rel:basket");
    }

    #[test]
    fn test_relation_type_relative() {
        assert_eq!(rel("/rel/foo").as_str(), "/rel/foo");
    }

    #[test]
    fn test_relation_type_invalid() {
        assert!(RelationType::parse("").is_err());
        assert!(RelationType::parse("http://exa mple.org/rel").is_err());
    }

    #[test]
    fn test_template_placeholders() {
        assert_eq!(
            template_placeholders("/basket/{basketId}/item/{itemId}"),
            vec!["basketId", "itemId"]
        );
        assert_eq!(template_placeholders("/plain/path"), Vec::<String>::new());
        // repeated placeholder counted once
        assert_eq!(template_placeholders("/a/{id}/b/{id}"), vec!["id"]);
        // unclosed brace ends the scan
        assert_eq!(template_placeholders("/a/{id"), Vec::<String>::new());
    }

    #[test]
    fn test_templated_link_requires_matching_vars() {
        let var = |name: &str| HrefVar {
            name: name.to_string(),
            var_type: format!("http://example.org/vartype#{}", name),
            description: None,
        };

        assert!(ResourceLink::templated(
            rel("/rel/item"),
            "/item/{id}",
            vec![var("id")],
            Hints::default()
        )
        .is_ok());

        // var without placeholder
        assert!(ResourceLink::templated(
            rel("/rel/item"),
            "/item/{id}",
            vec![var("id"), var("other")],
            Hints::default()
        )
        .is_err());

        // placeholder without var
        assert!(ResourceLink::templated(
            rel("/rel/item"),
            "/item/{id}/{rev}",
            vec![var("id")],
            Hints::default()
        )
        .is_err());
    }

    #[test]
    fn test_direct_link_rejects_empty_href() {
        assert!(ResourceLink::direct(rel("/rel/foo"), "", Hints::default()).is_err());
    }
}
