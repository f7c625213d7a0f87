// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod budget;
pub mod categories;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod date_range;
pub mod db;
pub mod display;
pub mod error;
pub mod import;
pub mod insights;
pub mod logging;
pub mod models;
pub mod utils;

pub use error::{Error, Result};
