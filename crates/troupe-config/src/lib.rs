// Copyright (c) 2026 Troupe Contributors
//
// SPDX-License-Identifier: Apache-2.0
mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::{from_str, load};
pub use schema::*;
