//! Player actions - the rule matrix and the plan/apply surface

pub mod action;
pub mod catalog;
pub mod preview;

pub use action::{available_actions, Action, Subject};
pub use catalog::{ActionCategory, ActionKind, HiddenReason, Legality, SubjectKind};
pub use preview::ActionPreview;
