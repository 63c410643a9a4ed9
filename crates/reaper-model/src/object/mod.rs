mod group;
pub use group::Group;

mod instance;
pub use instance::{Instance, InstancePhase};
