use std::collections::BTreeMap;

/// A single class-tagged record decoded from a controller response.
///
/// Records form a tree: some classes carry nested child records (for example
/// health sub-objects attached to a system record). Attribute values are kept
/// as strings; numeric interpretation is the consumer's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Object class name (the wrapper key in the wire envelope).
    pub class: String,
    /// Attributes keyed by name.
    pub attributes: BTreeMap<String, String>,
    /// Nested child records, in wire order.
    pub children: Vec<RawRecord>,
}

impl RawRecord {
    /// Create a record with no attributes or children.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Return the attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Return the attribute value, or `""` when absent.
    pub fn attr_or_empty(&self, name: &str) -> &str {
        self.attr(name).unwrap_or("")
    }

    /// Find the first descendant with the given class, searching children
    /// breadth-first down to `max_depth` levels below this record.
    ///
    /// Depth 1 searches direct children only; depth 2 also searches
    /// grandchildren. The walk is bounded on purpose: nested health
    /// sub-objects sit at most two levels down, and an unbounded scan over a
    /// malformed payload should not be possible.
    pub fn find_class(&self, class: &str, max_depth: usize) -> Option<&RawRecord> {
        let mut frontier: Vec<&RawRecord> = self.children.iter().collect();
        for _ in 0..max_depth {
            if frontier.is_empty() {
                return None;
            }
            if let Some(found) = frontier.iter().find(|r| r.class == class) {
                return Some(found);
            }
            frontier = frontier.iter().flat_map(|r| r.children.iter()).collect();
        }
        None
    }
}
