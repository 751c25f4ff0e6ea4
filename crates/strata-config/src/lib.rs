// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config storage for Strata.
//! Keeps settings loading behind a port so builders only ever see plain values.

pub mod fs;
pub mod store;

pub use fs::FsConfigStore;
pub use store::{ConfigError, ConfigService, ConfigStore};
