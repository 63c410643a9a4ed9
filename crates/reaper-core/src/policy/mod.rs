//! Policy stages applied to each group and instance.
//!
//! [`is_exempt`] and [`evaluate`] are pure; [`Governor`] owns the only per-group state.
mod filter;
pub use filter::is_exempt;

mod evaluate;
pub use evaluate::{Decision, evaluate};

mod governor;
pub use governor::{Governor, GovernorState, GroupReport};
