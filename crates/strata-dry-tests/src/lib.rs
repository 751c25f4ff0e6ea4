// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for Strata crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`scene`] - Scene graph builders and geometry helpers

pub mod config;
pub mod scene;

pub use config::InMemoryConfigStore;
pub use scene::{ring, SceneBuilder, AGENTS, OBJECTS, PLACES, ROOMS};
