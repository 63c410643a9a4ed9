//! Well-known metadata keys.
//!
//! The same key strings are used whether the reaper reads labels or annotations;
//! see [`crate::MetadataSource`].

/// Key declaring the maximum age of an instance.
///
/// The value is either a bare integer (minutes) or a duration expression such as `"2h"` or `"90s"`.
pub const LABEL_LIFETIME: &str = "pod.kubernetes.io/lifetime";

/// Key that exempts a whole group from reaping when its value is exactly `"true"`.
pub const LABEL_IGNORE_LIFETIME: &str = "pod.kubernetes.io/ignore-lifetime";
