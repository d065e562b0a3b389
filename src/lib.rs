#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]

//! # EDNS-OPT-wire
//!
//! This crate parses the option data carried in the RDATA of a DNS OPT
//! pseudo-RR (EDNS(0), RFC 6891) and emits it again. It is `no_std` by
//! default and only needs `alloc` for the option map.
//!
//! ## Features
//!
//! - Zero-copy parsing: every option value is a view into the caller's buffer
//! - Bounds-checked scanning of untrusted input, no panics on any byte string
//! - Single-option lookup (first occurrence) and full extraction (last
//!   occurrence per code)
//! - Option payloads are opaque; client-subnet, cookie and friends are left
//!   to the caller
//!
//! ## Architecture
//!
//! Following the smoltcp wire pattern:
//! - `field` - Field offset definitions
//! - `option` - Option codes and a zero-copy wrapper around one option TLV
//! - `scanner` - Lazy, bounds-checked iterator over OPT RDATA
//! - `opt` - `find_option`, `extract_options` and the OPT record wrapper
//! - `repr` - High-level representation for emitting options
//!
//! ## Example
//!
//! ```
//! use edns_opt_wire::prelude::*;
//!
//! let rdata = [
//!     0x00, 0x0a, 0x00, 0x02, 0xca, 0xfe, // COOKIE
//!     0x00, 0x08, 0x00, 0x00,             // ECS, empty
//! ];
//! let options = extract_options(&rdata[..]).unwrap();
//! assert_eq!(options.len(), 2);
//! assert_eq!(options.get(OptionCode::COOKIE).unwrap().content(), &[0xca, 0xfe]);
//! assert!(find_option(&rdata[..], OptionCode::ECS).unwrap().is_empty());
//! ```

extern crate alloc;

/// Error type for parsing and emission failures.
pub mod error;

/// Field offset definitions for all wire format structures.
pub mod field;

/// Option codes and the single-option zero-copy wrapper.
pub mod option;

/// Bounds-checked scanning of OPT RDATA.
pub mod scanner;

/// Option lookup and extraction over OPT RDATA.
pub mod opt;

/// High-level representation for emit operations.
pub mod repr;

/// Prelude module for convenient imports.
pub mod prelude;
