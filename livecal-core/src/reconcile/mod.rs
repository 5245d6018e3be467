//! Create/update/no-op decisions for matches against calendar events.

mod action;
mod reconciler;

pub use action::{Action, ActionKind, ChangeSet, FieldChange};
pub use reconciler::{EventReconciler, correlate};
