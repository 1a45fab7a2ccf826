//! Version sequence derivation, restore, and comparison.
//!
//! Everything here is synchronous and pure: nothing touches a store. The
//! [`service`](crate::service) module wires these into the store write-back.

pub mod builder;
pub mod compare;
pub mod restore;
pub mod view;

pub use builder::{build_history, build_history_from_value};
pub use compare::{ComparisonSelector, VersionComparison};
pub use restore::{RestorePolicy, check_target, restore, restore_at, restore_with_policy};
pub use view::{ViewMode, ViewState};
