//! Removes variable bindings that are never read.
//!
//! [`DeadBindingPruner`] walks a resolved swc module and drops unused `var`/`let`/`const`
//! declarators, unused names inside destructuring patterns, and the empty patterns those removals
//! leave behind, repeating until nothing changes.
//!
//! The building blocks are public so they can be used on their own:
//!
//! * [`locate_bindings`] lists the names a binding target introduces
//! * [`ReferenceIndex`] answers whether a name is used
//! * [`remove_leaf`] and [`sweep_pattern`] edit a binding target in place
pub use config::PruneConfig;
pub use editor::{remove_leaf, EditOutcome};
pub use error::{NodeKind, PruneError, SourceLocation};
pub use liveness::{Liveness, ReferenceCollector, ReferenceIndex};
pub use locator::{locate_bindings, LeafBinding};
pub use path::{BindingPath, Container, Step};
pub use pruner::{remove_unused_bindings, DeadBindingPruner, PruneStats};
pub use sweeper::{find_empty_patterns, is_empty_pattern, sweep_pattern};

mod config;
mod editor;
mod error;
mod liveness;
mod locator;
mod path;
mod pruner;
mod sweeper;
