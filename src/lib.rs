//! Polytopia Rules - action and consequence core for a turn-based territory game
//!
//! Actions decide what a player may see and do; consequences are the only
//! channel through which the world changes. Planning never mutates the
//! world, committing applies a planned chain in order.

pub mod actions;
pub mod consequence;
pub mod core;
pub mod world;

pub use actions::{available_actions, Action, ActionKind, Legality, Subject};
pub use consequence::{Consequence, ConsequenceChain};
pub use crate::core::{Result, RulesConfig, RulesError};
pub use world::World;
