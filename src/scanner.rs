//! Option scanner
//!
//! Walks OPT RDATA as a sequence of option TLVs. Every OPTION-LENGTH read
//! from the buffer is checked against the bytes remaining before it is used
//! to form a sub-slice, so hostile input can end a scan early but can never
//! cause a read outside the buffer.

use crate::error::Error;
use crate::field;
use crate::option::{EdnsOption, OptionCode};
use core::iter::FusedIterator;
use core::ops::Deref;
use tracing::trace;

/// Result type alias using the crate's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Borrowed view of one option's data.
///
/// The view points into the caller's RDATA buffer and lives exactly as long
/// as that buffer. A zero-length option yields an empty view, which is still
/// a present option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionView<'a> {
    content: &'a [u8],
}

impl<'a> OptionView<'a> {
    pub(crate) fn new(content: &'a [u8]) -> Self {
        OptionView { content }
    }

    /// The option data bytes.
    pub fn content(&self) -> &'a [u8] {
        self.content
    }

    /// Number of data bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether the option carries no data.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl Deref for OptionView<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.content
    }
}

impl AsRef<[u8]> for OptionView<'_> {
    fn as_ref(&self) -> &[u8] {
        self.content
    }
}

impl PartialEq<[u8]> for OptionView<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.content == other
    }
}

impl PartialEq<&[u8]> for OptionView<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.content == *other
    }
}

/// One option produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionEntry<'a> {
    /// The OPTION-CODE.
    pub code: OptionCode,
    /// The OPTION-DATA.
    pub view: OptionView<'a>,
    /// Offset of the option header within the RDATA.
    pub offset: usize,
    record: &'a [u8],
}

impl<'a> OptionEntry<'a> {
    /// The whole option on the wire, header included.
    pub fn record(&self) -> EdnsOption<&'a [u8]> {
        EdnsOption::new_unchecked(self.record)
    }

    /// The option's wire bytes, header included.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.record
    }
}

/// Lazy iterator over the options in OPT RDATA.
///
/// Yields options in buffer order. The first structural error is yielded
/// once and the iterator is then exhausted. Scanning again means building a
/// new iterator over the same slice; the iterator holds no other state.
///
/// # Example
///
/// ```
/// use edns_opt_wire::option::OptionCode;
/// use edns_opt_wire::scanner::OptionIter;
///
/// let rdata = [0x00, 0x0c, 0x00, 0x00, 0x00, 0x03, 0x00, 0x01, 0x61];
/// let codes: Vec<_> = OptionIter::new(&rdata[..])
///     .map(|entry| entry.unwrap().code)
///     .collect();
/// assert_eq!(codes, [OptionCode::PADDING, OptionCode::NSID]);
/// ```
#[derive(Debug, Clone)]
pub struct OptionIter<'a> {
    data: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> OptionIter<'a> {
    /// Create a new iterator over OPT RDATA.
    pub fn new(data: &'a [u8]) -> Self {
        OptionIter {
            data,
            pos: 0,
            failed: false,
        }
    }

    /// Offset of the next option header.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn next_entry(&mut self) -> Result<Option<OptionEntry<'a>>> {
        let offset = self.pos;
        let rest = &self.data[offset..];

        if rest.is_empty() {
            return Ok(None);
        }
        if rest.len() < field::option::HEADER_LEN {
            trace!(offset, remaining = rest.len(), "truncated EDNS option header");
            return Err(Error::TruncatedHeader {
                offset,
                remaining: rest.len(),
            });
        }

        let header = EdnsOption::new_unchecked(rest);
        let code = header.code();
        let length = header.length();
        let remaining = rest.len() - field::option::HEADER_LEN;
        if usize::from(length) > remaining {
            trace!(
                offset,
                code = code.as_u16(),
                length,
                remaining,
                "EDNS option length exceeds rdata"
            );
            return Err(Error::TruncatedValue {
                offset,
                length,
                remaining,
            });
        }

        let end = field::option::DATA(usize::from(length)).end;
        let record = &rest[..end];
        self.pos = offset + end;

        Ok(Some(OptionEntry {
            code,
            view: OptionView::new(&record[field::option::HEADER_LEN..]),
            offset,
            record,
        }))
    }
}

impl<'a> Iterator for OptionIter<'a> {
    type Item = Result<OptionEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_entry() {
            Ok(entry) => entry.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.data.len() - self.pos;
        // Each option takes at least a header; a short tail still yields one error.
        (0, Some(remaining.div_ceil(field::option::HEADER_LEN)))
    }
}

impl FusedIterator for OptionIter<'_> {}

/// Iterate over the options in OPT RDATA.
pub fn options(rdata: &[u8]) -> OptionIter<'_> {
    OptionIter::new(rdata)
}
