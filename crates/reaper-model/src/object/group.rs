use crate::ObjectMeta;

/// Namespace-like partition of instances.
///
/// Groups are read fresh at the start of every cycle and never mutated by the reaper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub meta: ObjectMeta,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: ObjectMeta::named(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// Builder-style helper adding a label.
    pub fn with_label(mut self, key: impl Into<String>, val: impl Into<String>) -> Self {
        self.meta.labels.insert(key, val);
        self
    }

    /// Builder-style helper adding an annotation.
    pub fn with_annotation(mut self, key: impl Into<String>, val: impl Into<String>) -> Self {
        self.meta.annotations.insert(key, val);
        self
    }
}
