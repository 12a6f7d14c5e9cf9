use std::collections::HashMap;
use tracing::trace;

/// A label definition site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    /// Character offset of the label's identifier
    pub offset: usize,
}

/// Labels defined so far in one parse.
///
/// Names are compared exactly as written. A registry belongs to a single
/// parse and is never shared between parses.
#[derive(Debug, Default)]
pub struct LabelRegistry {
    labels: HashMap<String, Label>,
}

impl LabelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a label definition
    /// # Errors
    /// Returns the earlier definition if `name` is already defined. The
    /// registry is left unchanged in that case.
    pub fn define(&mut self, name: &str, offset: usize) -> Result<(), Label> {
        if let Some(existing) = self.labels.get(name) {
            return Err(existing.clone());
        }

        trace!(label = name, offset, "label defined");
        self.labels.insert(
            name.to_string(),
            Label {
                name: name.to_string(),
                offset,
            },
        );
        Ok(())
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Label> {
        self.labels.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.labels.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label names in order of definition
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut labels: Vec<&Label> = self.labels.values().collect();
        labels.sort_by_key(|label| label.offset);
        labels.into_iter().map(|label| label.name.as_str()).collect()
    }
}
