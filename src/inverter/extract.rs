//! HTML Field Extraction
//!
//! Resolves a [`LocatorTree`] against the inverter's status page. The result is a
//! [`FieldValue`] tree with exactly the shape and key names of the locator tree.
//!
//! # Strictness
//!
//! Every leaf must resolve. A locator that matches no element, more than one
//! element, or an element whose first child is not a text node fails the whole
//! page with [`ExporterError::Extraction`]. A firmware update that moves a row
//! shows up as an error instead of a wrong number in Grafana.
//!
//! # Normalization
//!
//! The text of each cell has all whitespace removed and the firmware's
//! not-applicable marker `xxx` replaced by `0`.

use super::locator::{Locator, LocatorTree};
use crate::error::{ExporterError, Result};
use scraper::{Html, Selector};

/// Marker the firmware prints into cells that have no reading
pub const PLACEHOLDER: &str = "xxx";

/// Resolved value tree, mirroring the [`LocatorTree`] it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Group(Vec<(String, FieldValue)>),
}

impl FieldValue {
    /// Child of a group by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        match self {
            FieldValue::Group(entries) => entries
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Group(_) => None,
        }
    }

    /// Leaf text at a dotted path such as `StringEins.spannung`
    pub fn lookup(&self, path: &str) -> Option<&str> {
        path.split('.')
            .try_fold(self, |node, key| node.get(key))
            .and_then(FieldValue::as_text)
    }
}

enum CompiledNode {
    Leaf { field: String, selector: Selector },
    Group(Vec<(String, CompiledNode)>),
}

/// Locator tree compiled into selectors, ready to be applied to any number of pages
pub struct FieldExtractor {
    fields: Vec<(String, CompiledNode)>,
}

impl FieldExtractor {
    /// Compiles every locator path. Fails with [`ExporterError::InvalidLocator`]
    /// on the first path that is not a valid selector.
    pub fn new(tree: &LocatorTree) -> Result<Self> {
        Ok(Self {
            fields: compile_group(tree, "")?,
        })
    }

    /// Applies the locators to one page, in key order
    pub fn resolve(&self, html: &str) -> Result<FieldValue> {
        let page = html.replace("\r\n", "\n");
        let document = Html::parse_document(&page);
        resolve_group(&document, &self.fields)
    }
}

/// One-shot form of [`FieldExtractor::resolve`]
pub fn resolve(html: &str, tree: &LocatorTree) -> Result<FieldValue> {
    FieldExtractor::new(tree)?.resolve(html)
}

/// Strips all whitespace and replaces the first placeholder with `0`
pub fn normalize(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    compact.replacen(PLACEHOLDER, "0", 1)
}

fn compile_group(tree: &LocatorTree, prefix: &str) -> Result<Vec<(String, CompiledNode)>> {
    tree.iter()
        .map(|(name, locator)| {
            let field = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}.{name}")
            };
            let node = match locator {
                Locator::Path(path) => {
                    let selector =
                        Selector::parse(path).map_err(|e| ExporterError::InvalidLocator {
                            field: field.clone(),
                            reason: e.to_string(),
                        })?;
                    CompiledNode::Leaf { field, selector }
                }
                Locator::Group(children) => CompiledNode::Group(compile_group(children, &field)?),
            };
            Ok((name.to_string(), node))
        })
        .collect()
}

fn resolve_group(document: &Html, fields: &[(String, CompiledNode)]) -> Result<FieldValue> {
    let mut values = Vec::with_capacity(fields.len());
    for (name, node) in fields {
        let value = match node {
            CompiledNode::Leaf { field, selector } => {
                FieldValue::Text(resolve_leaf(document, field, selector)?)
            }
            CompiledNode::Group(children) => resolve_group(document, children)?,
        };
        values.push((name.clone(), value));
    }
    Ok(FieldValue::Group(values))
}

fn resolve_leaf(document: &Html, field: &str, selector: &Selector) -> Result<String> {
    let mut matches = document.select(selector);
    let element = matches
        .next()
        .ok_or_else(|| ExporterError::extraction(field, "no element matches locator"))?;

    let extra = matches.count();
    if extra > 0 {
        return Err(ExporterError::extraction(
            field,
            format!("locator matches {} elements", extra + 1),
        ));
    }

    let text = element
        .first_child()
        .and_then(|node| node.value().as_text())
        .ok_or_else(|| ExporterError::extraction(field, "matched element has no leading text"))?;

    Ok(normalize(text))
}
