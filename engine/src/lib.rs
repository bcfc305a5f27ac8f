//! Turn-based Splendor rules engine: the authoritative game state and
//! the validation/application of player actions. Rendering, prompting
//! and input handling live outside, behind the [`agent::Agent`]
//! boundary.

pub mod agent;
pub mod bank;
pub mod card;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod gem;
pub mod market;
pub mod player;
pub mod rules;
pub mod state;

#[cfg(feature = "starter-game")]
pub mod catalog;
