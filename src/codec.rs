//! Wire codec for discovery documents
//!
//! Serializes a document to the json-home wire shape and parses wire JSON
//! back into a document. Rendering is profiled: the restricted profile emits
//! only the fields the json-home format defines, the extended profile
//! additionally emits the free-text `description` hint for local tooling.
//!
//! Wire shape:
//!
//! ```json
//! {
//!   "resources": {
//!     "http://example.org/rel/basket": {
//!       "href": "/basket",
//!       "hints": {"allow": ["GET", "PUT"], "precondition-req": ["ETAG"]}
//!     },
//!     "http://example.org/rel/item": {
//!       "href-template": "/item/{itemId}",
//!       "href-vars": {"itemId": "http://example.org/vartype/item#id"},
//!       "hints": {"allow": ["GET"]}
//!     }
//!   }
//! }
//! ```

use serde_json::{json, Map, Value};
use url::Url;

use crate::document::Document;
use crate::error::DiscoveryError;
use crate::hints::{union, Hints, Method, Precondition, Status};
use crate::link::{template_placeholders, HrefVar, RelationType, ResourceLink};

/// Output profile selecting which hint fields appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Interoperable json-home fields only
    Restricted,
    /// json-home fields plus the free-text `description` hint
    Extended,
}

impl Profile {
    /// Media type a server would serve this profile under
    pub fn media_type(&self) -> &'static str {
        match self {
            Profile::Restricted => "application/json-home",
            Profile::Extended => "application/json",
        }
    }
}

/// Render a document to its wire JSON value
///
/// Resources appear in the document's first-seen order; hint keys are
/// emitted only when non-empty, so an absent constraint never shows up as
/// an empty array.
pub fn render(doc: &Document, profile: Profile) -> Value {
    let mut resources = Map::new();
    for link in doc.iter() {
        resources.insert(
            link.relation_type().as_str().to_string(),
            render_link(link, profile),
        );
    }
    json!({ "resources": resources })
}

/// Render a document to a JSON string
pub fn to_json_string(
    doc: &Document,
    profile: Profile,
    pretty: bool,
) -> Result<String, DiscoveryError> {
    let value = render(doc, profile);
    if pretty {
        Ok(serde_json::to_string_pretty(&value)?)
    } else {
        Ok(serde_json::to_string(&value)?)
    }
}

/// Render a document to UTF-8 JSON bytes
pub fn to_bytes(doc: &Document, profile: Profile) -> Result<Vec<u8>, DiscoveryError> {
    Ok(to_json_string(doc, profile, false)?.into_bytes())
}

fn render_link(link: &ResourceLink, profile: Profile) -> Value {
    let mut resource = Map::new();
    match link {
        ResourceLink::Direct(direct) => {
            resource.insert("href".to_string(), json!(direct.href));
        }
        ResourceLink::Templated(templated) => {
            resource.insert("href-template".to_string(), json!(templated.href_template));
            let mut vars = Map::new();
            for var in &templated.href_vars {
                // var descriptions have no wire field in either profile
                vars.insert(var.name.clone(), json!(var.var_type));
            }
            resource.insert("href-vars".to_string(), Value::Object(vars));
        }
    }

    let hints = render_hints(link.hints(), profile);
    if !hints.is_empty() {
        resource.insert("hints".to_string(), Value::Object(hints));
    }
    Value::Object(resource)
}

fn render_hints(hints: &Hints, profile: Profile) -> Map<String, Value> {
    let mut out = Map::new();

    if !hints.allow.is_empty() {
        let tokens: Vec<&str> = hints.allow.iter().map(Method::as_str).collect();
        out.insert("allow".to_string(), json!(tokens));
    }
    if !hints.representations.is_empty() {
        out.insert("representations".to_string(), json!(hints.representations));
    }
    if !hints.accept_put.is_empty() {
        out.insert("accept-put".to_string(), json!(hints.accept_put));
    }
    if !hints.accept_post.is_empty() {
        out.insert("accept-post".to_string(), json!(hints.accept_post));
    }
    if !hints.precondition_req.is_empty() {
        let tokens: Vec<&str> = hints.precondition_req.iter().map(Precondition::as_str).collect();
        out.insert("precondition-req".to_string(), json!(tokens));
    }
    if let Some(status) = hints.status {
        out.insert("status".to_string(), json!(status.as_str()));
    }
    if let Some(docs) = &hints.docs {
        out.insert("docs".to_string(), json!(docs.as_str()));
    }
    if profile == Profile::Extended && !hints.description.is_empty() {
        out.insert("description".to_string(), json!(hints.description));
    }

    out
}

/// Parse wire bytes into a document
pub fn parse(bytes: &[u8]) -> Result<Document, DiscoveryError> {
    let value: Value = serde_json::from_slice(bytes)?;
    parse_value(&value)
}

/// Parse an already-decoded wire value into a document
///
/// Structure is checked strictly (the `resources` object, relation-type
/// keys, exactly one of `href`/`href-template`, template/var consistency);
/// hints are parsed permissively with unknown keys ignored. Parsing never
/// merges: each wire key becomes exactly one document entry.
pub fn parse_value(value: &Value) -> Result<Document, DiscoveryError> {
    let resources = value
        .get("resources")
        .ok_or_else(|| {
            DiscoveryError::MalformedDocument("missing 'resources' field".to_string())
        })?
        .as_object()
        .ok_or_else(|| {
            DiscoveryError::MalformedDocument("'resources' must be an object".to_string())
        })?;

    let mut links = Vec::with_capacity(resources.len());
    for (key, resource) in resources {
        links.push(parse_resource(key, resource)?);
    }
    Document::build(links)
}

fn parse_resource(key: &str, value: &Value) -> Result<ResourceLink, DiscoveryError> {
    let relation_type = RelationType::parse(key)?;

    let obj = value.as_object().ok_or_else(|| {
        DiscoveryError::MalformedDocument(format!("resource '{}' must be an object", key))
    })?;

    let hints = parse_hints(obj.get("hints"), key)?;

    let href = obj.get("href");
    let template = obj.get("href-template");
    match (href, template) {
        (Some(href), None) => {
            let href = href.as_str().ok_or_else(|| {
                DiscoveryError::MalformedDocument(format!(
                    "resource '{}' href must be a string",
                    key
                ))
            })?;
            ResourceLink::direct(relation_type, href, hints)
        }
        (None, Some(template)) => {
            let template = template.as_str().ok_or_else(|| {
                DiscoveryError::MalformedDocument(format!(
                    "resource '{}' href-template must be a string",
                    key
                ))
            })?;
            let href_vars = parse_href_vars(obj.get("href-vars"), key)?;
            check_template_vars(key, template, &href_vars)?;
            ResourceLink::templated(relation_type, template, href_vars, hints)
        }
        (Some(_), Some(_)) => Err(DiscoveryError::MalformedDocument(format!(
            "resource '{}' has both href and href-template",
            key
        ))),
        (None, None) => Err(DiscoveryError::MalformedDocument(format!(
            "resource '{}' has neither href nor href-template",
            key
        ))),
    }
}

fn parse_href_vars(value: Option<&Value>, key: &str) -> Result<Vec<HrefVar>, DiscoveryError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let obj = value.as_object().ok_or_else(|| {
        DiscoveryError::MalformedDocument(format!("resource '{}' href-vars must be an object", key))
    })?;

    let mut vars = Vec::with_capacity(obj.len());
    for (name, var_type) in obj {
        let var_type = var_type.as_str().ok_or_else(|| {
            DiscoveryError::MalformedDocument(format!(
                "resource '{}' href-var '{}' must map to a var-type URI string",
                key, name
            ))
        })?;
        vars.push(HrefVar {
            name: name.clone(),
            var_type: var_type.to_string(),
            description: None,
        });
    }
    Ok(vars)
}

fn check_template_vars(
    key: &str,
    template: &str,
    href_vars: &[HrefVar],
) -> Result<(), DiscoveryError> {
    let placeholders = template_placeholders(template);
    if href_vars.is_empty() {
        // tolerated as an empty-variable template only when the template
        // really has no placeholders
        if placeholders.is_empty() {
            return Ok(());
        }
        return Err(DiscoveryError::MalformedDocument(format!(
            "resource '{}': templated link without variable bindings",
            key
        )));
    }

    let mismatch = placeholders
        .iter()
        .any(|p| !href_vars.iter().any(|v| &v.name == p))
        || href_vars
            .iter()
            .any(|v| !placeholders.contains(&v.name));
    if mismatch {
        return Err(DiscoveryError::MalformedDocument(format!(
            "resource '{}': href-vars do not match template placeholders in '{}'",
            key, template
        )));
    }
    Ok(())
}

fn parse_hints(value: Option<&Value>, key: &str) -> Result<Hints, DiscoveryError> {
    let Some(value) = value else {
        return Ok(Hints::default());
    };
    let obj = value.as_object().ok_or_else(|| {
        DiscoveryError::MalformedDocument(format!("resource '{}' hints must be an object", key))
    })?;

    let mut hints = Hints::default();
    for (hint_key, hint_value) in obj {
        match hint_key.as_str() {
            "allow" => {
                let tokens = string_array(hint_value, key, "allow")?;
                let methods = tokens
                    .iter()
                    .map(|t| Method::from_token(t))
                    .collect::<Result<Vec<_>, _>>()?;
                hints.allow = union(&[], &methods);
            }
            "representations" => {
                hints.representations =
                    union(&[], &string_array(hint_value, key, "representations")?);
            }
            "accept-put" => {
                hints.accept_put = union(&[], &string_array(hint_value, key, "accept-put")?);
            }
            "accept-post" => {
                hints.accept_post = union(&[], &string_array(hint_value, key, "accept-post")?);
            }
            "precondition-req" => {
                let tokens = string_array(hint_value, key, "precondition-req")?;
                let preconditions = tokens
                    .iter()
                    .map(|t| Precondition::from_token(t))
                    .collect::<Result<Vec<_>, _>>()?;
                hints.precondition_req = union(&[], &preconditions);
            }
            "status" => {
                let token = hint_value.as_str().ok_or_else(|| {
                    DiscoveryError::MalformedDocument(format!(
                        "resource '{}' status hint must be a string",
                        key
                    ))
                })?;
                hints.status = Some(Status::from_token(token)?);
            }
            "docs" => {
                let uri = hint_value.as_str().ok_or_else(|| {
                    DiscoveryError::MalformedDocument(format!(
                        "resource '{}' docs hint must be a string",
                        key
                    ))
                })?;
                hints.docs = Some(Url::parse(uri).map_err(|e| {
                    DiscoveryError::MalformedDocument(format!(
                        "resource '{}' docs hint '{}' is not a valid URL: {}",
                        key, uri, e
                    ))
                })?);
            }
            "description" => {
                hints.description = union(&[], &string_array(hint_value, key, "description")?);
            }
            // unknown hint keys are ignored
            _ => {}
        }
    }
    Ok(hints)
}

fn string_array(value: &Value, key: &str, hint: &str) -> Result<Vec<String>, DiscoveryError> {
    let arr = value.as_array().ok_or_else(|| {
        DiscoveryError::MalformedDocument(format!(
            "resource '{}' {} hint must be an array",
            key, hint
        ))
    })?;
    arr.iter()
        .map(|item| {
            item.as_str().map(String::from).ok_or_else(|| {
                DiscoveryError::MalformedDocument(format!(
                    "resource '{}' {} hint must contain only strings",
                    key, hint
                ))
            })
        })
        .collect()
}
