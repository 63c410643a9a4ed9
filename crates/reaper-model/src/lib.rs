mod domain;
pub use domain::{LABEL_IGNORE_LIFETIME, LABEL_LIFETIME};
pub use domain::{MetaMap, MetadataSource, ObjectMeta};

mod error;
pub use error::{ModelError, ModelResult};

mod object;
pub use object::{Group, Instance, InstancePhase};

mod lifetime;
pub use lifetime::LifetimeDeclaration;
