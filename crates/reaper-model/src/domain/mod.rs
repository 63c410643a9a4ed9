mod meta;
pub use meta::{MetaMap, ObjectMeta};

mod source;
pub use source::MetadataSource;

mod constants;
pub use constants::{LABEL_IGNORE_LIFETIME, LABEL_LIFETIME};
