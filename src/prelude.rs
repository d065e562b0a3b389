//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate,
//! allowing for convenient glob imports:
//!
//! ```
//! use edns_opt_wire::prelude::*;
//! ```

pub use crate::error::Error;
pub use crate::opt::{OptRecord, OptionMap, extract_options, find_option};
pub use crate::option::{EdnsOption, OptionCode};
pub use crate::repr::{OptionRepr, emit_options};
pub use crate::scanner::{OptionEntry, OptionIter, OptionView, options};
