use crate::error::Error;
use crate::field;
use crate::option::{EdnsOption, OptionCode};
use core::fmt;

/// Result type alias using the crate's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// A high-level representation of one EDNS(0) option.
///
/// The data is borrowed and written out verbatim; no option payload is
/// interpreted.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct OptionRepr<'a> {
    /// Option code
    pub code: OptionCode,
    /// Option data (at most 65535 bytes)
    pub data: &'a [u8],
}

impl<'a> OptionRepr<'a> {
    /// Create a new option representation.
    pub fn new(code: impl Into<OptionCode>, data: &'a [u8]) -> Self {
        OptionRepr {
            code: code.into(),
            data,
        }
    }

    /// Parse a checked option into a high-level representation.
    ///
    /// # Arguments
    ///
    /// * `option` - An option that passed `check_len`
    pub fn parse<T>(option: &'a EdnsOption<T>) -> Result<OptionRepr<'a>>
    where
        T: AsRef<[u8]>,
    {
        option.check_len()?;
        Ok(OptionRepr {
            code: option.code(),
            data: option.data(),
        })
    }

    /// Emit the option into the front of `buffer`.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of bytes written (`buffer_len()`)
    /// * `Err(Error::LengthOverflow)` - The data does not fit OPTION-LENGTH
    /// * `Err(Error::Exhausted)` - The buffer cannot hold the option
    ///
    /// The buffer is left untouched on error.
    pub fn emit(&self, buffer: &mut [u8]) -> Result<usize> {
        let length = self.length()?;
        let total = self.buffer_len();
        if buffer.len() < total {
            return Err(Error::Exhausted);
        }

        let mut option = EdnsOption::new_unchecked(&mut buffer[..total]);
        option.set_code(self.code);
        option.set_length(length);
        option.data_mut().copy_from_slice(self.data);

        Ok(total)
    }

    fn length(&self) -> Result<u16> {
        u16::try_from(self.data.len()).map_err(|_| Error::LengthOverflow)
    }

    /// Get the wire format size of this option (4 header + data).
    pub fn buffer_len(&self) -> usize {
        field::option::DATA(self.data.len()).end
    }
}

impl<'a> fmt::Display for OptionRepr<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EDNS option: code={}, len={}", self.code, self.data.len())
    }
}

/// Serialize a sequence of options as OPT RDATA.
///
/// Options are written in iteration order, duplicates included. Every
/// option is checked before the first byte is written, so on error the
/// buffer is left untouched.
///
/// # Returns
/// * `Ok(usize)` - Number of bytes written
/// * `Err(Error::LengthOverflow)` - An option's data does not fit OPTION-LENGTH
/// * `Err(Error::Exhausted)` - The options together do not fit the buffer
///
/// # Example
/// ```
/// use edns_opt_wire::option::OptionCode;
/// use edns_opt_wire::repr::{emit_options, OptionRepr};
///
/// let mut buf = [0u8; 16];
/// let options = [
///     OptionRepr::new(OptionCode::NSID, b""),
///     OptionRepr::new(OptionCode::PADDING, &[0, 0]),
/// ];
/// let size = emit_options(options, &mut buf).unwrap();
/// assert_eq!(&buf[..size], &[0, 3, 0, 0, 0, 12, 0, 2, 0, 0]);
/// ```
pub fn emit_options<'a, I>(options: I, buffer: &mut [u8]) -> Result<usize>
where
    I: IntoIterator<Item = OptionRepr<'a>>,
    I::IntoIter: Clone,
{
    let options = options.into_iter();
    let mut total = 0usize;
    for option in options.clone() {
        option.length()?;
        total += option.buffer_len();
    }
    if buffer.len() < total {
        return Err(Error::Exhausted);
    }

    let mut pos = 0;
    for option in options {
        pos += option.emit(&mut buffer[pos..])?;
    }
    Ok(pos)
}

/// Calculate the total wire size of a sequence of options.
pub fn options_len<'a, I>(options: I) -> usize
where
    I: IntoIterator<Item = OptionRepr<'a>>,
{
    options.into_iter().map(|option| option.buffer_len()).sum()
}
