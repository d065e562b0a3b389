//! Field offset definitions for EDNS(0) OPT wire format structures.
//!
//! All offsets are const ranges or const functions so that slicing can be
//! resolved at compile time wherever the lengths are known.
//!
//! # Wire Format Structure
//!
//! OPT record, starting at RDLENGTH:
//! ```text
//! +---------------------------------+
//! | RDLENGTH (2 bytes)              |
//! +---------------------------------+
//! | RDATA (RDLENGTH bytes)          |
//! +---------------------------------+
//! ```
//!
//! RDATA is a sequence of options, each:
//! ```text
//! +----------------+----------------+
//! | OPTION-CODE(2) | OPTION-LENGTH(2)|
//! +----------------+----------------+
//! | OPTION-DATA (OPTION-LENGTH)     |
//! +---------------------------------+
//! ```

#![allow(non_snake_case)]

/// Type alias for a byte range (slice index range).
pub type Field = ::core::ops::Range<usize>;

/// Option TLV field offsets, relative to the start of one option.
pub mod option {
    use crate::field::Field;

    /// OPTION-CODE (2 bytes at offset 0-1).
    pub const CODE: Field = 0..2;

    /// OPTION-LENGTH (2 bytes at offset 2-3).
    ///
    /// Length of OPTION-DATA in bytes, not counting this header.
    pub const LENGTH: Field = 2..4;

    /// Size of the fixed option header (code + length).
    pub const HEADER_LEN: usize = LENGTH.end;

    /// OPTION-DATA (variable length after the 4-byte header).
    ///
    /// # Parameters
    ///
    /// * `length` - The OPTION-LENGTH value
    pub const fn DATA(length: usize) -> Field {
        HEADER_LEN..(HEADER_LEN + length)
    }
}

/// OPT record field offsets, relative to the RDLENGTH field.
pub mod opt_record {
    use crate::field::Field;

    /// RDLENGTH (2 bytes at offset 0-1).
    pub const RDLENGTH: Field = 0..2;

    /// RDATA (variable length after RDLENGTH).
    ///
    /// # Parameters
    ///
    /// * `rdlength` - The RDLENGTH value
    pub const fn RDATA(rdlength: usize) -> Field {
        RDLENGTH.end..(RDLENGTH.end + rdlength)
    }
}
