use reaper_model::{Instance, LABEL_LIFETIME, LifetimeDeclaration};
use time::OffsetDateTime;

use crate::lookup::MetadataLookup;

/// Classification of one instance at a given instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No lifetime key; the instance is left alone.
    NotDeclared,
    /// The lifetime value does not yield a positive duration.
    Malformed {
        raw: String,
        declaration: LifetimeDeclaration,
    },
    /// Not running, or running without a start time.
    NotRunning,
    /// Still within its lifetime.
    ///
    /// `deadline` is `None` when start + lifetime is beyond the representable range.
    Pending {
        started: OffsetDateTime,
        deadline: Option<OffsetDateTime>,
    },
    /// Lifetime elapsed; eligible for termination.
    Overdue {
        started: OffsetDateTime,
        deadline: OffsetDateTime,
    },
}

impl Decision {
    #[inline]
    pub fn is_overdue(&self) -> bool {
        matches!(self, Decision::Overdue { .. })
    }
}

/// Classify an instance against `now`.
///
/// Steps, in order: declaration present, declaration valid, instance running, deadline passed.
/// An instance is overdue once `now` reaches start + lifetime.
pub fn evaluate(instance: &Instance, lookup: &MetadataLookup, now: OffsetDateTime) -> Decision {
    let Some(raw) = lookup.get(&instance.meta, LABEL_LIFETIME) else {
        return Decision::NotDeclared;
    };

    let declaration = LifetimeDeclaration::parse(raw);
    if !declaration.is_valid() {
        return Decision::Malformed {
            raw: raw.to_string(),
            declaration,
        };
    }

    let Some(started) = instance.running_since() else {
        return Decision::NotRunning;
    };

    match started.checked_add(declaration.lifetime()) {
        Some(deadline) if now >= deadline => Decision::Overdue { started, deadline },
        deadline => Decision::Pending { started, deadline },
    }
}
