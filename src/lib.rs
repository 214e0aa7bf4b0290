//! json-home Discovery Document Library
//!
//! This library builds, merges, and parses hypermedia "discovery documents"
//! describing a REST API's resources: for each abstract link-relation type,
//! the concrete href (or URI template), allowed HTTP methods, media types,
//! and additional metadata ("hints").
//!
//! # Overview
//!
//! A scanner-like collaborator (framework introspection, configuration,
//! explicit registration — this library does not care which) produces one
//! raw candidate per handler method. The library:
//!
//! 1. Converts each candidate into a direct or templated resource link
//! 2. Folds candidates sharing a relation type into a single link, unioning
//!    their hints (GET-only + POST-only handlers become one entry with
//!    `allow = [GET, POST]`)
//! 3. Assembles the merged links into an immutable [`Document`]
//! 4. Renders the document to the json-home wire format in a restricted
//!    (`application/json-home`) or extended (`application/json`) profile,
//!    and parses wire documents back
//!
//! # Usage
//!
//! ## Build and render a document
//!
//! ```ignore
//! use jsonhome::{merge_candidates, to_json_string, Profile, RawCandidate};
//!
//! let candidates: Vec<RawCandidate> = // from your registration layer
//! let doc = merge_candidates(candidates)?;
//!
//! println!("{}", to_json_string(&doc, Profile::Restricted, true)?);
//! ```
//!
//! ## Consume a published document
//!
//! ```ignore
//! use jsonhome::parse;
//!
//! let doc = parse(&body_bytes)?;
//! if let Some(link) = doc.lookup("http://example.org/rel/basket") {
//!     // follow the link
//! }
//! ```

pub mod candidate;
pub mod codec;
pub mod document;
pub mod error;
pub mod hints;
pub mod link;
pub mod merge;

// Re-export main types for convenience
pub use crate::candidate::{merge_candidates, RawCandidate, VarSpec};
pub use crate::codec::{parse, parse_value, render, to_bytes, to_json_string, Profile};
pub use crate::document::Document;
pub use crate::error::DiscoveryError;
pub use crate::hints::{Hints, Method, Precondition, Status};
pub use crate::link::{
    template_placeholders, DirectLink, HrefVar, RelationType, ResourceLink, TemplatedLink,
};
pub use crate::merge::merge_links;
