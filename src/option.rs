//! Single EDNS(0) option TLV
//!
//! This module provides the option code registry and a zero-copy wrapper
//! around one option as it appears inside OPT RDATA. The option payload is
//! never interpreted here; client-subnet, cookie and every other option are
//! plain byte ranges to this crate.

use crate::error::Error;
use crate::field;
use byteorder::{ByteOrder, NetworkEndian};
use core::fmt;

/// Result type alias using the crate's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// EDNS(0) option code (OPTION-CODE).
///
/// The full 16-bit value space is accepted. Named constants cover the codes
/// registered with IANA that DNS software commonly meets; any other value is
/// carried as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionCode(u16);

impl OptionCode {
    /// Long-Lived Queries (1)
    pub const LLQ: OptionCode = OptionCode(1);
    /// Update Lease (2)
    pub const UL: OptionCode = OptionCode(2);
    /// Name Server Identifier, RFC 5001 (3)
    pub const NSID: OptionCode = OptionCode(3);
    /// DNSSEC Algorithm Understood, RFC 6975 (5)
    pub const DAU: OptionCode = OptionCode(5);
    /// DS Hash Understood, RFC 6975 (6)
    pub const DHU: OptionCode = OptionCode(6);
    /// NSEC3 Hash Understood, RFC 6975 (7)
    pub const N3U: OptionCode = OptionCode(7);
    /// Client Subnet, RFC 7871 (8)
    pub const ECS: OptionCode = OptionCode(8);
    /// Expire, RFC 7314 (9)
    pub const EXPIRE: OptionCode = OptionCode(9);
    /// Cookie, RFC 7873 (10)
    pub const COOKIE: OptionCode = OptionCode(10);
    /// TCP Keepalive, RFC 7828 (11)
    pub const TCP_KEEPALIVE: OptionCode = OptionCode(11);
    /// Padding, RFC 7830 (12)
    pub const PADDING: OptionCode = OptionCode(12);
    /// CHAIN query requests, RFC 7901 (13)
    pub const CHAIN: OptionCode = OptionCode(13);
    /// EDNS Key Tag, RFC 8145 (14)
    pub const KEY_TAG: OptionCode = OptionCode(14);
    /// Extended DNS Error, RFC 8914 (15)
    pub const EXTENDED_ERROR: OptionCode = OptionCode(15);

    /// Create an option code from its wire value.
    pub const fn new(value: u16) -> Self {
        OptionCode(value)
    }

    /// The wire value of this code.
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Registry mnemonic for the well-known codes.
    ///
    /// # Returns
    /// * `Some(&str)` for a code with a named constant
    /// * `None` otherwise
    pub fn mnemonic(&self) -> Option<&'static str> {
        let name = match *self {
            OptionCode::LLQ => "LLQ",
            OptionCode::UL => "UL",
            OptionCode::NSID => "NSID",
            OptionCode::DAU => "DAU",
            OptionCode::DHU => "DHU",
            OptionCode::N3U => "N3U",
            OptionCode::ECS => "ECS",
            OptionCode::EXPIRE => "EXPIRE",
            OptionCode::COOKIE => "COOKIE",
            OptionCode::TCP_KEEPALIVE => "TCP-KEEPALIVE",
            OptionCode::PADDING => "PADDING",
            OptionCode::CHAIN => "CHAIN",
            OptionCode::KEY_TAG => "KEY-TAG",
            OptionCode::EXTENDED_ERROR => "EDE",
            _ => return None,
        };
        Some(name)
    }
}

impl From<u16> for OptionCode {
    fn from(value: u16) -> Self {
        OptionCode(value)
    }
}

impl From<OptionCode> for u16 {
    fn from(code: OptionCode) -> Self {
        code.0
    }
}

impl fmt::Display for OptionCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mnemonic() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "OPT{}", self.0),
        }
    }
}

/// Zero-copy wrapper around one option TLV.
///
/// Wire format:
/// ```text
/// 0               1               2               3
/// 0 1 2 3 4 5 6 7 0 1 2 3 4 5 6 7 0 1 2 3 4 5 6 7 0 1 2 3 4 5 6 7
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          OPTION-CODE          |         OPTION-LENGTH         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /                          OPTION-DATA                          /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The buffer may extend past the option; only `total_len()` bytes belong
/// to it.
#[derive(Debug, Clone, Copy)]
pub struct EdnsOption<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> EdnsOption<T> {
    /// Option header wire format size in bytes.
    pub const HEADER_LEN: usize = field::option::HEADER_LEN;

    /// Create an EdnsOption without validation.
    ///
    /// Accessors panic if the buffer is shorter than the header or the
    /// declared data. Use `new_checked` on untrusted input.
    pub fn new_unchecked(buffer: T) -> Self {
        EdnsOption { buffer }
    }

    /// Create an EdnsOption from a buffer with length validation.
    ///
    /// # Returns
    /// * `Ok(EdnsOption)` if the header and the declared data both fit
    /// * `Err(Error)` otherwise
    pub fn new_checked(buffer: T) -> Result<Self> {
        let option = Self::new_unchecked(buffer);
        option.check_len()?;
        Ok(option)
    }

    /// Validate that the buffer holds the header and the declared data.
    ///
    /// # Returns
    /// * `Err(Error::BufferTooShort)` if fewer than 4 bytes are present
    /// * `Err(Error::TruncatedValue)` if OPTION-LENGTH exceeds what follows
    pub fn check_len(&self) -> Result<()> {
        let len = self.buffer.as_ref().len();
        if len < Self::HEADER_LEN {
            return Err(Error::BufferTooShort);
        }
        let remaining = len - Self::HEADER_LEN;
        let length = self.length();
        if usize::from(length) > remaining {
            return Err(Error::TruncatedValue {
                offset: 0,
                length,
                remaining,
            });
        }
        Ok(())
    }

    /// Get the OPTION-CODE field.
    pub fn code(&self) -> OptionCode {
        OptionCode(NetworkEndian::read_u16(&self.buffer.as_ref()[field::option::CODE]))
    }

    /// Get the OPTION-LENGTH field.
    pub fn length(&self) -> u16 {
        NetworkEndian::read_u16(&self.buffer.as_ref()[field::option::LENGTH])
    }

    /// Size of the whole option on the wire (header + data).
    pub fn total_len(&self) -> usize {
        field::option::DATA(usize::from(self.length())).end
    }

    /// Get the OPTION-DATA bytes.
    pub fn data(&self) -> &[u8] {
        &self.buffer.as_ref()[field::option::DATA(usize::from(self.length()))]
    }

    /// Consume the wrapper and return the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> EdnsOption<T> {
    /// Set the OPTION-CODE field.
    pub fn set_code(&mut self, code: OptionCode) {
        NetworkEndian::write_u16(&mut self.buffer.as_mut()[field::option::CODE], code.as_u16());
    }

    /// Set the OPTION-LENGTH field.
    pub fn set_length(&mut self, length: u16) {
        NetworkEndian::write_u16(&mut self.buffer.as_mut()[field::option::LENGTH], length);
    }

    /// Mutable access to the OPTION-DATA bytes, sized by the current OPTION-LENGTH.
    pub fn data_mut(&mut self) -> &mut [u8] {
        let range = field::option::DATA(usize::from(self.length()));
        &mut self.buffer.as_mut()[range]
    }
}

impl<T: AsRef<[u8]>> fmt::Display for EdnsOption<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EDNS option: code={}, len={}", self.code(), self.length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_code_constants() {
        assert_eq!(OptionCode::ECS.as_u16(), 8);
        assert_eq!(OptionCode::COOKIE.as_u16(), 10);
        assert_eq!(OptionCode::from(12u16), OptionCode::PADDING);
        assert_eq!(u16::from(OptionCode::NSID), 3);
    }

    #[test]
    fn test_option_code_display() {
        assert_eq!(format!("{}", OptionCode::ECS), "ECS");
        assert_eq!(format!("{}", OptionCode::EXTENDED_ERROR), "EDE");
        assert_eq!(format!("{}", OptionCode::new(65001)), "OPT65001");
        assert_eq!(OptionCode::new(4).mnemonic(), None);
    }

    #[test]
    fn test_option_fields() {
        let buffer = [0x00, 0x0a, 0x00, 0x03, 0xaa, 0xbb, 0xcc, 0xff];
        let option = EdnsOption::new_checked(&buffer[..]).unwrap();

        assert_eq!(option.code(), OptionCode::COOKIE);
        assert_eq!(option.length(), 3);
        assert_eq!(option.data(), &[0xaa, 0xbb, 0xcc]);
        assert_eq!(option.total_len(), 7);
    }

    #[test]
    fn test_option_setters() {
        let mut buffer = [0u8; 6];
        let mut option = EdnsOption::new_unchecked(&mut buffer[..]);
        option.set_code(OptionCode::NSID);
        option.set_length(2);
        option.data_mut().copy_from_slice(&[0x61, 0x62]);

        assert_eq!(option.code(), OptionCode::NSID);
        assert_eq!(option.data(), b"ab");
        assert_eq!(buffer, [0x00, 0x03, 0x00, 0x02, 0x61, 0x62]);
    }

    #[test]
    fn test_option_zero_length() {
        let buffer = [0x00, 0x0c, 0x00, 0x00];
        let option = EdnsOption::new_checked(&buffer[..]).unwrap();
        assert_eq!(option.code(), OptionCode::PADDING);
        assert!(option.data().is_empty());
        assert_eq!(option.total_len(), 4);
    }

    #[test]
    fn test_option_check_len() {
        let buffer = [0x00, 0x08, 0x00];
        assert_eq!(
            EdnsOption::new_checked(&buffer[..]).unwrap_err(),
            Error::BufferTooShort
        );

        let buffer = [0x00, 0x08, 0x00, 0x0a, 0x01, 0x02, 0x03, 0x04];
        assert_eq!(
            EdnsOption::new_checked(&buffer[..]).unwrap_err(),
            Error::TruncatedValue {
                offset: 0,
                length: 10,
                remaining: 4
            }
        );
    }

    #[test]
    fn test_option_into_inner() {
        let buffer = [0x00, 0x0a, 0x00, 0x01, 0x07];
        let option = EdnsOption::new_checked(&buffer[..]).unwrap();
        assert!(core::ptr::eq(option.into_inner(), &buffer[..]));
    }

    #[test]
    fn test_option_display() {
        let buffer = [0x00, 0x08, 0x00, 0x00];
        let option = EdnsOption::new_unchecked(&buffer[..]);
        assert_eq!(format!("{}", option), "EDNS option: code=ECS, len=0");
    }
}
