//! Constants, configuration and errors shared by the whole crate.

#![allow(unused_imports)]

pub mod config;
pub mod constants;
pub mod error;

pub use config::*;
pub use constants::*;
pub use error::*;
