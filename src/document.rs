//! The discovery document aggregate
//!
//! A document maps each relation type to exactly one resource link. It is
//! built once from a sequence of links and never mutated afterwards;
//! "updating" a document means building a new one, so readers can treat an
//! instance as an atomically replaceable snapshot.

use std::collections::HashMap;

use crate::error::DiscoveryError;
use crate::link::ResourceLink;
use crate::merge::merge_links;

/// Relation type → resource link mapping, keys unique
///
/// Entries keep first-seen insertion order for deterministic serialization,
/// but the mapping is logically unordered: equality ignores entry order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    entries: Vec<ResourceLink>,
    index: HashMap<String, usize>,
}

impl Document {
    /// Fold a sequence of links into a document
    ///
    /// Links are taken in input order. The first link for a relation type is
    /// inserted; every later link for the same relation type is merged into
    /// the existing entry. An empty input yields an empty document. Any
    /// merge failure fails the whole build; nothing is partially committed.
    pub fn build(
        links: impl IntoIterator<Item = ResourceLink>,
    ) -> Result<Document, DiscoveryError> {
        let mut doc = Document::default();
        for link in links {
            let key = link.relation_type().as_str().to_string();
            match doc.index.get(&key) {
                Some(&pos) => {
                    doc.entries[pos] = merge_links(&doc.entries[pos], &link)?;
                }
                None => {
                    doc.index.insert(key, doc.entries.len());
                    doc.entries.push(link);
                }
            }
        }
        Ok(doc)
    }

    /// Look up the link for a relation-type URI
    pub fn lookup(&self, relation_type: &str) -> Option<&ResourceLink> {
        self.index.get(relation_type).map(|&pos| &self.entries[pos])
    }

    /// Entries in first-seen insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ResourceLink> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Document) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|link| other.lookup(link.relation_type().as_str()) == Some(link))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::{Hints, Method};
    use crate::link::RelationType;

    fn direct(rel_uri: &str, href: &str, methods: &[Method]) -> ResourceLink {
        ResourceLink::direct(
            RelationType::parse(rel_uri).unwrap(),
            href,
            Hints {
                allow: methods.to_vec(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_empty_build() {
        let doc = Document::build(vec![]).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_build_merges_same_relation() {
        let doc = Document::build(vec![
            direct("/rel/foo", "/foo", &[Method::Get]),
            direct("/rel/bar", "/bar", &[Method::Get]),
            direct("/rel/foo", "/foo", &[Method::Post]),
        ])
        .unwrap();

        assert_eq!(doc.len(), 2);
        let foo = doc.lookup("/rel/foo").unwrap();
        assert_eq!(foo.hints().allow, vec![Method::Get, Method::Post]);
    }

    #[test]
    fn test_build_preserves_first_seen_order() {
        let doc = Document::build(vec![
            direct("/rel/b", "/b", &[Method::Get]),
            direct("/rel/a", "/a", &[Method::Get]),
            direct("/rel/b", "/b", &[Method::Post]),
        ])
        .unwrap();

        let rels: Vec<&str> = doc.iter().map(|l| l.relation_type().as_str()).collect();
        assert_eq!(rels, vec!["/rel/b", "/rel/a"]);
    }

    #[test]
    fn test_build_fails_whole_on_conflict() {
        let result = Document::build(vec![
            direct("/rel/foo", "/foo", &[Method::Get]),
            direct("/rel/foo", "/elsewhere", &[Method::Post]),
        ]);
        assert!(matches!(result, Err(DiscoveryError::ConflictingHref { .. })));
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = Document::build(vec![
            direct("/rel/a", "/a", &[Method::Get]),
            direct("/rel/b", "/b", &[Method::Get]),
        ])
        .unwrap();
        let b = Document::build(vec![
            direct("/rel/b", "/b", &[Method::Get]),
            direct("/rel/a", "/a", &[Method::Get]),
        ])
        .unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_lookup_missing() {
        let doc = Document::build(vec![direct("/rel/a", "/a", &[Method::Get])]).unwrap();
        assert!(doc.lookup("/rel/missing").is_none());
    }
}
