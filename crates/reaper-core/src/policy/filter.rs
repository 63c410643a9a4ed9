use reaper_model::{Group, LABEL_IGNORE_LIFETIME};

use crate::lookup::MetadataLookup;

/// Returns `true` if the group opts out of lifetime enforcement.
///
/// Only the exact value `"true"` exempts; `"TRUE"`, `"yes"` or an empty value do not.
pub fn is_exempt(group: &Group, lookup: &MetadataLookup) -> bool {
    lookup.get(&group.meta, LABEL_IGNORE_LIFETIME) == Some("true")
}

#[cfg(test)]
mod tests {
    use reaper_model::MetadataSource;

    use super::*;

    #[test]
    fn exact_true_exempts() {
        let lookup = MetadataLookup::default();
        let g = Group::new("ops").with_label(LABEL_IGNORE_LIFETIME, "true");
        assert!(is_exempt(&g, &lookup));
    }

    #[test]
    fn other_values_do_not_exempt() {
        let lookup = MetadataLookup::default();
        for value in ["false", "TRUE", "True", " true", "1", "yes", ""] {
            let g = Group::new("ops").with_label(LABEL_IGNORE_LIFETIME, value);
            assert!(!is_exempt(&g, &lookup), "{value:?} must not exempt");
        }
        assert!(!is_exempt(&Group::new("ops"), &lookup));
    }

    #[test]
    fn reads_only_the_configured_source() {
        let g = Group::new("ops").with_annotation(LABEL_IGNORE_LIFETIME, "true");

        assert!(!is_exempt(&g, &MetadataLookup::new(MetadataSource::Labels)));
        assert!(is_exempt(
            &g,
            &MetadataLookup::new(MetadataSource::Annotations)
        ));
    }
}
