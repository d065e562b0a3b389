/// Error type for EDNS(0) option parsing and emission.
///
/// Parse failures fall in two groups. Structural failures mean the bytes do
/// not decode as a sequence of option TLVs and the enclosing DNS message
/// should be rejected (see [`Error::is_malformed`]). A lookup miss is a normal
/// outcome of [`find_option`](crate::opt::find_option) and says nothing
/// about the integrity of the data (see [`Error::is_not_found`]).
///
/// # Examples
///
/// ```
/// use edns_opt_wire::error::Error;
/// use edns_opt_wire::opt::extract_options;
///
/// // A three byte tail cannot hold an option header.
/// let rdata = [0x00, 0x08, 0x00];
/// let err = extract_options(&rdata[..]).unwrap_err();
/// assert_eq!(err, Error::TruncatedHeader { offset: 0, remaining: 3 });
/// assert!(err.is_malformed());
/// ```
#[derive(PartialEq, Debug, Clone, Copy, Eq)]
pub enum Error {
    /// Input buffer is too short for a fixed-size structure.
    ///
    /// This occurs when:
    /// - An option buffer is smaller than the 4-byte option header
    /// - An OPT record buffer cannot hold the 2-byte RDLENGTH
    BufferTooShort,

    /// Output buffer has no room for the options being emitted.
    ///
    /// Nothing is written when this is returned.
    Exhausted,

    /// Between one and three bytes remain where an option header should start.
    TruncatedHeader {
        /// Offset of the partial header within the RDATA.
        offset: usize,
        /// Number of bytes left in the RDATA at that offset.
        remaining: usize,
    },

    /// An option declares more data than the RDATA has left.
    TruncatedValue {
        /// Offset of the option header within the RDATA.
        offset: usize,
        /// The declared OPTION-LENGTH.
        length: u16,
        /// Number of bytes left after the option header.
        remaining: usize,
    },

    /// The OPT record RDLENGTH exceeds the bytes that follow it.
    RdataOverflow {
        /// The declared RDLENGTH.
        rdlength: u16,
        /// Number of bytes available after the RDLENGTH field.
        remaining: usize,
    },

    /// Option data longer than 65535 bytes cannot be encoded.
    LengthOverflow,

    /// The requested option code does not appear in the RDATA.
    OptionNotFound(u16),
}

impl Error {
    /// Whether the error means the input does not decode as option TLVs.
    ///
    /// Callers should drop or reject the enclosing DNS message rather than
    /// attempt partial interpretation.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::BufferTooShort
                | Error::TruncatedHeader { .. }
                | Error::TruncatedValue { .. }
                | Error::RdataOverflow { .. }
        )
    }

    /// Whether the error is a single-option lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::OptionNotFound(_))
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::BufferTooShort => write!(f, "buffer too short for expected structure"),
            Error::Exhausted => write!(f, "output buffer exhausted"),
            Error::TruncatedHeader { offset, remaining } => write!(
                f,
                "truncated option header at offset {}: {} byte(s) left",
                offset, remaining
            ),
            Error::TruncatedValue {
                offset,
                length,
                remaining,
            } => write!(
                f,
                "option at offset {} declares {} byte(s) but only {} remain",
                offset, length, remaining
            ),
            Error::RdataOverflow {
                rdlength,
                remaining,
            } => write!(
                f,
                "rdlength {} exceeds the {} byte(s) available",
                rdlength, remaining
            ),
            Error::LengthOverflow => write!(f, "option length field overflow"),
            Error::OptionNotFound(code) => write!(f, "option {} not found", code),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(format!("{}", Error::BufferTooShort), "buffer too short for expected structure");
        assert_eq!(
            format!("{}", Error::TruncatedHeader { offset: 12, remaining: 2 }),
            "truncated option header at offset 12: 2 byte(s) left"
        );
        assert_eq!(
            format!(
                "{}",
                Error::TruncatedValue {
                    offset: 0,
                    length: 10,
                    remaining: 4
                }
            ),
            "option at offset 0 declares 10 byte(s) but only 4 remain"
        );
        assert_eq!(
            format!(
                "{}",
                Error::RdataOverflow {
                    rdlength: 40,
                    remaining: 8
                }
            ),
            "rdlength 40 exceeds the 8 byte(s) available"
        );
        assert_eq!(format!("{}", Error::Exhausted), "output buffer exhausted");
        assert_eq!(format!("{}", Error::LengthOverflow), "option length field overflow");
        assert_eq!(format!("{}", Error::OptionNotFound(8)), "option 8 not found");
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::BufferTooShort.is_malformed());
        assert!(Error::TruncatedHeader { offset: 0, remaining: 1 }.is_malformed());
        assert!(
            Error::TruncatedValue {
                offset: 0,
                length: 1,
                remaining: 0
            }
            .is_malformed()
        );
        assert!(
            Error::RdataOverflow {
                rdlength: 1,
                remaining: 0
            }
            .is_malformed()
        );
        assert!(!Error::OptionNotFound(10).is_malformed());
        assert!(!Error::LengthOverflow.is_malformed());
        assert!(!Error::Exhausted.is_malformed());
        assert!(!Error::Exhausted.is_not_found());

        assert!(Error::OptionNotFound(10).is_not_found());
        assert!(!Error::BufferTooShort.is_not_found());
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(Error::OptionNotFound(8), Error::OptionNotFound(8));
        assert_ne!(Error::OptionNotFound(8), Error::OptionNotFound(10));
        assert_ne!(Error::BufferTooShort, Error::LengthOverflow);
    }
}
