//! Field Locators
//!
//! A locator tree names every value on the inverter's status page and says where
//! it lives. Leaves are structural CSS paths that must select exactly one table
//! cell; groups nest further locators under a name. Key order is preserved and is
//! the order in which fields are resolved.
//!
//! The tree is plain data. Compiling the paths against an HTML engine is the job
//! of [`FieldExtractor`](super::extract::FieldExtractor).

/// A single node of the locator tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Structural path to one element, e.g. `body > form > table > tbody > tr:nth-child(4)`
    Path(String),
    /// Named sub-locators
    Group(LocatorTree),
}

/// Ordered mapping of field name to [`Locator`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorTree {
    entries: Vec<(String, Locator)>,
}

impl LocatorTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a leaf locator, keeping insertion order
    pub fn path(mut self, name: &str, path: impl Into<String>) -> Self {
        self.entries
            .push((name.to_string(), Locator::Path(path.into())));
        self
    }

    /// Adds a nested group, keeping insertion order
    pub fn group(mut self, name: &str, tree: LocatorTree) -> Self {
        self.entries.push((name.to_string(), Locator::Group(tree)));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Locator)> {
        self.entries.iter().map(|(name, loc)| (name.as_str(), loc))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const DATA_TABLE: &str = "body > form > font > table:nth-child(2) > tbody";

/// Cell `column` of row `row` in the inverter's measurement table
fn cell(row: u32, column: u32) -> String {
    format!("{DATA_TABLE} > tr:nth-child({row}) > td:nth-child({column})")
}

/// Layout of `index.fhtml` as served by the inverter firmware
pub fn device_layout() -> LocatorTree {
    LocatorTree::new()
        .path("watt", cell(4, 3))
        .path("status", cell(8, 3))
        .group(
            "StringEins",
            LocatorTree::new()
                .path("spannung", cell(14, 3))
                .path("strom", cell(16, 3)),
        )
        .group(
            "StringZwei",
            LocatorTree::new()
                .path("spannung", cell(19, 3))
                .path("strom", cell(21, 3)),
        )
        .path("tagesenergie", cell(6, 6))
}
