//! Serialized working-set state:
//! `current|name1&ref11&ref12|name2&ref21`
//!
//! Every free-text field goes through `encode_token`, so the only raw `|`,
//! `&` and `_` in the string are the format's own. A container reference is
//! its encoded href; an item reference is `<encoded container href>_<index>_`.

use crate::codec::{decode, encode_token, CodecError};
use crate::resource::ResourceTree;
use crate::store::report::StoreWarning;
use crate::types::{ResourceRef, WorkingSet};

pub const FIELD_DELIMITER: char = '|';
pub const ELEMENT_DELIMITER: char = '&';
pub const ITEM_TERMINAL: char = '_';

/// A reference as it appears on the wire, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredRef {
    Container { href: String },
    Item { container_href: String, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefParseError {
    Malformed,
    Undecodable(CodecError),
}

impl From<CodecError> for RefParseError {
    fn from(err: CodecError) -> Self {
        RefParseError::Undecodable(err)
    }
}

pub fn serialize<R>(
    current: &str,
    sets: &[WorkingSet],
    tree: &R,
    warnings: &mut Vec<StoreWarning>,
) -> String
where
    R: ResourceTree + ?Sized,
{
    let mut data = encode_token(current);

    for ws in sets {
        data.push(FIELD_DELIMITER);
        data.push_str(&encode_token(&ws.name));

        for element in &ws.elements {
            match encode_ref(element, tree) {
                Some(token) => {
                    data.push(ELEMENT_DELIMITER);
                    data.push_str(&token);
                }
                None => warnings.push(StoreWarning::DetachedElement {
                    set: ws.name.clone(),
                    element: element.clone(),
                }),
            }
        }
    }

    data
}

/// Item positions are checked against the live tree before being written.
fn encode_ref<R>(element: &ResourceRef, tree: &R) -> Option<String>
where
    R: ResourceTree + ?Sized,
{
    match element {
        ResourceRef::Container { href } => Some(encode_token(href)),
        ResourceRef::Item {
            container_href,
            index,
        } => {
            tree.find_item(container_href, *index)?;
            Some(format!(
                "{}{ITEM_TERMINAL}{index}{ITEM_TERMINAL}",
                encode_token(container_href)
            ))
        }
    }
}

pub fn parse_ref(token: &str) -> Result<StoredRef, RefParseError> {
    let Some(body) = token.strip_suffix(ITEM_TERMINAL) else {
        return Ok(StoredRef::Container {
            href: decode(token)?,
        });
    };

    let split = body.rfind(ITEM_TERMINAL).ok_or(RefParseError::Malformed)?;
    // Plain decimal only; `usize::from_str` would also take a leading `+`.
    let digits = &body[split + 1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RefParseError::Malformed);
    }
    let index: usize = digits.parse().map_err(|_| RefParseError::Malformed)?;
    let container_href = decode(&body[..split])?;

    Ok(StoredRef::Item {
        container_href,
        index,
    })
}

fn resolve<R>(stored: &StoredRef, tree: &R) -> Option<ResourceRef>
where
    R: ResourceTree + ?Sized,
{
    match stored {
        StoredRef::Container { href } => tree.find_container(href).map(ResourceRef::container),
        StoredRef::Item {
            container_href,
            index,
        } => {
            tree.find_item(container_href, *index)?;
            Some(ResourceRef::Item {
                container_href: container_href.clone(),
                index: *index,
            })
        }
    }
}

/// Parse and resolve a serialized state. Bad units are dropped one at a time.
/// Returns the current selection and the sets in wire order.
pub fn parse<R>(
    data: &str,
    tree: &R,
    warnings: &mut Vec<StoreWarning>,
) -> (String, Vec<WorkingSet>)
where
    R: ResourceTree + ?Sized,
{
    let mut fields = data.split(FIELD_DELIMITER);

    let current = match decode(fields.next().unwrap_or_default()) {
        Ok(current) => current,
        Err(error) => {
            warnings.push(StoreWarning::UndecodableField {
                field: "current working set".to_string(),
                error,
            });
            String::new()
        }
    };

    let mut sets: Vec<WorkingSet> = Vec::new();
    for segment in fields {
        let mut parts = segment.split(ELEMENT_DELIMITER);
        let raw_name = parts.next().unwrap_or_default();
        let name = match decode(raw_name) {
            Ok(name) => name,
            Err(error) => {
                warnings.push(StoreWarning::UndecodableField {
                    field: format!("working set name {raw_name:?}"),
                    error,
                });
                continue;
            }
        };

        if sets.iter().any(|ws| ws.name == name) {
            warnings.push(StoreWarning::DuplicateSet { name });
            continue;
        }

        let mut elements = Vec::new();
        for token in parts {
            let stored = match parse_ref(token) {
                Ok(stored) => stored,
                Err(RefParseError::Malformed) => {
                    warnings.push(StoreWarning::MalformedReference {
                        set: name.clone(),
                        token: token.to_string(),
                    });
                    continue;
                }
                Err(RefParseError::Undecodable(error)) => {
                    warnings.push(StoreWarning::UndecodableField {
                        field: format!("reference {token:?}"),
                        error,
                    });
                    continue;
                }
            };

            match resolve(&stored, tree) {
                Some(element) => elements.push(element),
                None => warnings.push(StoreWarning::UnresolvedReference {
                    set: name.clone(),
                    token: token.to_string(),
                }),
            }
        }

        // Sets that lost every element are kept so the name stays visible.
        sets.push(WorkingSet::new(name, elements));
    }

    (current, sets)
}
