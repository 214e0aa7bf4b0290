//! Union merge logic for resource links
//!
//! A scanner discovers one raw candidate per handler method, so several
//! candidates routinely share a relation type (GET and POST handlers on the
//! same path). They must fold into a single link per relation type with a
//! unioned `allow` set; callers of the discovery document see one entry per
//! relation type, not one per handler.

use crate::error::DiscoveryError;
use crate::link::{HrefVar, ResourceLink};

/// Merge two links bound to the same relation type
///
/// - A direct and a templated link on one relation type are incompatible.
/// - Two direct links must agree on the href; two templated links must
///   agree on the template. Disagreement is a configuration error, not
///   something to resolve by dropping data.
/// - Hints take the union; for the single-valued hints (docs, status) the
///   later link wins, so the overall fold is order-sensitive for those
///   fields.
pub fn merge_links(a: &ResourceLink, b: &ResourceLink) -> Result<ResourceLink, DiscoveryError> {
    if a.relation_type() != b.relation_type() {
        return Err(DiscoveryError::InvalidCandidate(format!(
            "cannot merge links with different relation types '{}' and '{}'",
            a.relation_type(),
            b.relation_type()
        )));
    }

    match (a, b) {
        (ResourceLink::Direct(first), ResourceLink::Direct(second)) => {
            if first.href != second.href {
                return Err(DiscoveryError::ConflictingHref {
                    relation_type: first.relation_type.to_string(),
                    existing: first.href.clone(),
                    conflicting: second.href.clone(),
                });
            }
            ResourceLink::direct(
                first.relation_type.clone(),
                first.href.clone(),
                first.hints.merge(&second.hints),
            )
        }
        (ResourceLink::Templated(first), ResourceLink::Templated(second)) => {
            if first.href_template != second.href_template {
                return Err(DiscoveryError::ConflictingHref {
                    relation_type: first.relation_type.to_string(),
                    existing: first.href_template.clone(),
                    conflicting: second.href_template.clone(),
                });
            }
            ResourceLink::templated(
                first.relation_type.clone(),
                first.href_template.clone(),
                union_href_vars(&first.href_vars, &second.href_vars),
                first.hints.merge(&second.hints),
            )
        }
        _ => Err(DiscoveryError::IncompatibleLinkKind {
            relation_type: a.relation_type().to_string(),
        }),
    }
}

/// Union two href-var lists by variable name
///
/// First occurrence keeps its position; on a name collision the later var's
/// type and description win, mirroring the scalar-hint merge policy.
fn union_href_vars(a: &[HrefVar], b: &[HrefVar]) -> Vec<HrefVar> {
    let mut result = a.to_vec();
    for var in b {
        match result.iter_mut().find(|v| v.name == var.name) {
            Some(existing) => *existing = var.clone(),
            None => result.push(var.clone()),
        }
    }
    result
}
