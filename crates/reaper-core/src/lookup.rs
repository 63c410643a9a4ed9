use reaper_model::{MetaMap, MetadataSource, ObjectMeta};

/// Reads well-known keys from the configured metadata map.
///
/// The map selector is fixed at construction, so callers stay unaware of whether labels or
/// annotations are in use.
#[derive(Debug, Clone, Copy)]
pub struct MetadataLookup {
    source: MetadataSource,
    select: fn(&ObjectMeta) -> &MetaMap,
}

fn labels_of(meta: &ObjectMeta) -> &MetaMap {
    &meta.labels
}

fn annotations_of(meta: &ObjectMeta) -> &MetaMap {
    &meta.annotations
}

impl MetadataLookup {
    pub fn new(source: MetadataSource) -> Self {
        let select: fn(&ObjectMeta) -> &MetaMap = match source {
            MetadataSource::Labels => labels_of,
            MetadataSource::Annotations => annotations_of,
        };
        Self { source, select }
    }

    pub fn source(&self) -> MetadataSource {
        self.source
    }

    /// Value stored under `key` in the selected map.
    pub fn get<'a>(&self, meta: &'a ObjectMeta, key: &str) -> Option<&'a str> {
        (self.select)(meta).get(key)
    }
}

impl Default for MetadataLookup {
    fn default() -> Self {
        Self::new(MetadataSource::default())
    }
}
