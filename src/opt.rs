//! OPT RDATA entry points
//!
//! [`find_option`] returns the first option with a given code and
//! [`extract_options`] collects every option into an [`OptionMap`]. Both run
//! the same single-pass scanner from offset 0 and borrow their results from
//! the caller's buffer.
//!
//! The two entry points resolve repeated codes differently. `find_option`
//! stops at the first match, while `extract_options` overwrites on insert
//! and so keeps the last occurrence. Callers mixing the two on RDATA with
//! duplicate codes will observe different values.

use crate::error::Error;
use crate::field;
use crate::option::OptionCode;
use crate::scanner::{OptionIter, OptionView};
use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use byteorder::{ByteOrder, NetworkEndian};
use core::fmt;
use tracing::trace;

/// Result type alias using the crate's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Find the first option with `code` in OPT RDATA.
///
/// The scan stops at the first match, so a malformed option after the match
/// is not reported.
///
/// # Errors
/// * `Error::OptionNotFound` if the RDATA is well formed and has no such option
/// * `Error::TruncatedHeader` / `Error::TruncatedValue` if the RDATA is
///   malformed before a match is reached
///
/// # Example
/// ```
/// use edns_opt_wire::opt::find_option;
/// use edns_opt_wire::option::OptionCode;
///
/// let rdata = [0x00, 0x03, 0x00, 0x02, 0x6e, 0x73];
/// let nsid = find_option(&rdata[..], OptionCode::NSID).unwrap();
/// assert_eq!(nsid.content(), b"ns");
/// assert!(find_option(&rdata[..], OptionCode::ECS).unwrap_err().is_not_found());
/// ```
pub fn find_option(rdata: &[u8], code: impl Into<OptionCode>) -> Result<OptionView<'_>> {
    let code = code.into();
    for entry in OptionIter::new(rdata) {
        let entry = entry?;
        if entry.code == code {
            return Ok(entry.view);
        }
    }
    Err(Error::OptionNotFound(code.as_u16()))
}

/// Collect every option in OPT RDATA into a map keyed by option code.
///
/// When a code repeats, the occurrence furthest into the buffer is kept.
/// A structural error anywhere fails the whole call; no partial map is
/// returned.
///
/// # Example
/// ```
/// use edns_opt_wire::opt::extract_options;
/// use edns_opt_wire::option::OptionCode;
///
/// let rdata = [
///     0x00, 0x0a, 0x00, 0x01, 0x01,
///     0x00, 0x0a, 0x00, 0x01, 0x02,
/// ];
/// let map = extract_options(&rdata[..]).unwrap();
/// assert_eq!(map.len(), 1);
/// assert_eq!(map.get(OptionCode::COOKIE).unwrap().content(), &[0x02]);
/// ```
pub fn extract_options(rdata: &[u8]) -> Result<OptionMap<'_>> {
    let mut map = OptionMap::new();
    for entry in OptionIter::new(rdata) {
        let entry = entry?;
        if let Some(previous) = map.options.insert(entry.code, entry.view) {
            trace!(
                code = entry.code.as_u16(),
                previous_len = previous.len(),
                offset = entry.offset,
                "duplicate EDNS option replaced"
            );
        }
    }
    Ok(map)
}

/// Options extracted from OPT RDATA, one view per distinct code.
///
/// Iteration is in ascending code order, not buffer order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap<'a> {
    options: BTreeMap<OptionCode, OptionView<'a>>,
}

impl<'a> OptionMap<'a> {
    /// Create an empty map.
    pub fn new() -> Self {
        OptionMap {
            options: BTreeMap::new(),
        }
    }

    /// The view for `code`, if present.
    pub fn get(&self, code: impl Into<OptionCode>) -> Option<OptionView<'a>> {
        self.options.get(&code.into()).copied()
    }

    /// Whether an option with `code` was present.
    pub fn contains(&self, code: impl Into<OptionCode>) -> bool {
        self.options.contains_key(&code.into())
    }

    /// Number of distinct option codes.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the RDATA carried no options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Iterate over `(code, view)` pairs in ascending code order.
    pub fn iter(&self) -> Iter<'_, 'a> {
        Iter {
            inner: self.options.iter(),
        }
    }

    /// Iterate over the codes present, ascending.
    pub fn codes(&self) -> impl Iterator<Item = OptionCode> + '_ {
        self.options.keys().copied()
    }
}

/// Iterator over the entries of an [`OptionMap`].
#[derive(Debug, Clone)]
pub struct Iter<'m, 'a> {
    inner: btree_map::Iter<'m, OptionCode, OptionView<'a>>,
}

impl<'a> Iterator for Iter<'_, 'a> {
    type Item = (OptionCode, OptionView<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(code, view)| (*code, *view))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_, '_> {}

impl<'m, 'a> IntoIterator for &'m OptionMap<'a> {
    type Item = (OptionCode, OptionView<'a>);
    type IntoIter = Iter<'m, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for OptionMap<'a> {
    type Item = (OptionCode, OptionView<'a>);
    type IntoIter = btree_map::IntoIter<OptionCode, OptionView<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.into_iter()
    }
}

/// Zero-copy wrapper around an OPT record starting at its RDLENGTH field.
///
/// This is the position reached after the owner name, TYPE, CLASS and TTL of
/// the OPT pseudo-RR have been consumed. The buffer may run on past the
/// RDATA (into further records); only RDLENGTH bytes are scanned.
///
/// ```text
/// +---------------------------------+
/// | RDLENGTH (2 bytes)              |
/// +---------------------------------+
/// | RDATA (RDLENGTH bytes)          |
/// +---------------------------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptRecord<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> OptRecord<T> {
    /// Create an OptRecord without validation.
    pub const fn new_unchecked(buffer: T) -> Self {
        OptRecord { buffer }
    }

    /// Create an OptRecord, checking that RDLENGTH fits in the buffer.
    pub fn new_checked(buffer: T) -> Result<Self> {
        let record = Self::new_unchecked(buffer);
        record.check_len()?;
        Ok(record)
    }

    /// Validate the RDLENGTH field against the buffer.
    ///
    /// # Returns
    /// * `Err(Error::BufferTooShort)` if RDLENGTH itself is cut off
    /// * `Err(Error::RdataOverflow)` if RDLENGTH exceeds the bytes after it
    pub fn check_len(&self) -> Result<()> {
        let len = self.buffer.as_ref().len();
        if len < field::opt_record::RDLENGTH.end {
            return Err(Error::BufferTooShort);
        }
        let rdlength = self.rdlength();
        let remaining = len - field::opt_record::RDLENGTH.end;
        if usize::from(rdlength) > remaining {
            trace!(rdlength, remaining, "OPT rdlength exceeds buffer");
            return Err(Error::RdataOverflow {
                rdlength,
                remaining,
            });
        }
        Ok(())
    }

    /// The RDLENGTH field.
    pub fn rdlength(&self) -> u16 {
        NetworkEndian::read_u16(&self.buffer.as_ref()[field::opt_record::RDLENGTH])
    }

    /// The RDATA bytes.
    pub fn rdata(&self) -> &[u8] {
        &self.buffer.as_ref()[field::opt_record::RDATA(usize::from(self.rdlength()))]
    }

    /// Wire size of RDLENGTH plus RDATA.
    pub fn total_len(&self) -> usize {
        field::opt_record::RDATA(usize::from(self.rdlength())).end
    }

    /// Iterate over the options in the RDATA.
    pub fn options(&self) -> OptionIter<'_> {
        OptionIter::new(self.rdata())
    }

    /// See [`find_option`].
    pub fn find_option(&self, code: impl Into<OptionCode>) -> Result<OptionView<'_>> {
        find_option(self.rdata(), code)
    }

    /// See [`extract_options`].
    pub fn extract_options(&self) -> Result<OptionMap<'_>> {
        extract_options(self.rdata())
    }

    /// Consume the wrapper and return the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }
}

impl<T: AsRef<[u8]>> fmt::Display for OptRecord<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OPT record: rdlength={}", self.rdlength())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 127.0.0.1/32, scope 0
    const ECS_DATA: [u8; 8] = [0x00, 0x01, 0x20, 0x00, 0x7f, 0x00, 0x00, 0x01];
    // client "deadbeef", server "deadbeef"
    const COOKIE_DATA: &[u8; 16] = b"deadbeefdeadbeef";

    fn cookie_ecs_cookie() -> Vec<u8> {
        let mut rdata = vec![0x00, 0x0a, 0x00, 0x10];
        rdata.extend_from_slice(COOKIE_DATA);
        rdata.extend_from_slice(&[0x00, 0x08, 0x00, 0x08]);
        rdata.extend_from_slice(&ECS_DATA);
        rdata.extend_from_slice(&[0x00, 0x0a, 0x00, 0x10]);
        rdata.extend_from_slice(COOKIE_DATA);
        rdata
    }

    #[test]
    fn test_find_option_ecs() {
        let rdata = cookie_ecs_cookie();
        let ecs = find_option(&rdata, OptionCode::ECS).unwrap();
        assert_eq!(ecs.content(), &ECS_DATA);
    }

    #[test]
    fn test_extract_options_collapses_duplicates() {
        let rdata = cookie_ecs_cookie();
        let map = extract_options(&rdata).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(OptionCode::ECS).unwrap().content(), &ECS_DATA);
        let cookie = map.get(OptionCode::COOKIE).unwrap();
        assert_eq!(cookie.len(), 16);
        assert_eq!(cookie.content(), COOKIE_DATA);
    }

    #[test]
    fn test_duplicate_resolution_differs_by_entry_point() {
        let rdata = [
            0x00, 0x0a, 0x00, 0x01, 0x01, //
            0x00, 0x08, 0x00, 0x00, //
            0x00, 0x0a, 0x00, 0x02, 0x02, 0x03,
        ];
        let first = find_option(&rdata[..], OptionCode::COOKIE).unwrap();
        assert_eq!(first.content(), &[0x01]);

        let map = extract_options(&rdata[..]).unwrap();
        assert_eq!(map.get(OptionCode::COOKIE).unwrap().content(), &[0x02, 0x03]);

        // The retained view is the last occurrence, not a copy of it.
        let last = map.get(OptionCode::COOKIE).unwrap();
        assert!(core::ptr::eq(last.content().as_ptr(), &rdata[13]));
    }

    #[test]
    fn test_truncated_buffer_is_malformed() {
        let rdata = [0x00, 0x08, 0x00, 0x0a, 0x01, 0x02, 0x03, 0x04];
        let expected = Error::TruncatedValue {
            offset: 0,
            length: 10,
            remaining: 4,
        };
        assert_eq!(find_option(&rdata[..], OptionCode::ECS).unwrap_err(), expected);
        assert_eq!(extract_options(&rdata[..]).unwrap_err(), expected);
    }

    #[test]
    fn test_truncated_after_valid_options_fails_whole_map() {
        let mut rdata = cookie_ecs_cookie();
        rdata.extend_from_slice(&[0x00, 0x0c]);
        assert_eq!(
            extract_options(&rdata).unwrap_err(),
            Error::TruncatedHeader {
                offset: 52,
                remaining: 2
            }
        );
    }

    #[test]
    fn test_find_stops_at_first_match() {
        // The match precedes the malformed tail, so the tail is never read.
        let mut rdata = cookie_ecs_cookie();
        rdata.extend_from_slice(&[0x00, 0x0c, 0xff]);
        assert!(find_option(&rdata, OptionCode::ECS).is_ok());
        assert!(find_option(&rdata, OptionCode::PADDING).unwrap_err().is_malformed());
    }

    #[test]
    fn test_empty_rdata() {
        let map = extract_options(&[]).unwrap();
        assert!(map.is_empty());
        assert_eq!(
            find_option(&[], OptionCode::COOKIE).unwrap_err(),
            Error::OptionNotFound(10)
        );
        assert_eq!(find_option(&[], 0u16).unwrap_err(), Error::OptionNotFound(0));
    }

    #[test]
    fn test_zero_length_option_is_present() {
        let rdata = [0x00, 0x0c, 0x00, 0x00];
        let padding = find_option(&rdata[..], OptionCode::PADDING).unwrap();
        assert!(padding.is_empty());

        let map = extract_options(&rdata[..]).unwrap();
        assert!(map.contains(OptionCode::PADDING));
        assert!(map.get(12u16).unwrap().is_empty());
    }

    #[test]
    fn test_map_iterates_by_code() {
        let rdata = cookie_ecs_cookie();
        let map = extract_options(&rdata).unwrap();
        let codes: Vec<_> = map.codes().collect();
        assert_eq!(codes, [OptionCode::ECS, OptionCode::COOKIE]);

        let pairs: Vec<_> = map.iter().map(|(code, view)| (code, view.len())).collect();
        assert_eq!(pairs, [(OptionCode::ECS, 8), (OptionCode::COOKIE, 16)]);
        assert_eq!(map.iter().len(), 2);

        let owned: Vec<_> = map.into_iter().map(|(code, _)| code.as_u16()).collect();
        assert_eq!(owned, [8, 10]);
    }

    #[test]
    fn test_opt_record() {
        let rdata = cookie_ecs_cookie();
        let mut buffer = vec![0x00, rdata.len() as u8];
        buffer.extend_from_slice(&rdata);
        // Trailing bytes belong to the next record and are not scanned.
        buffer.extend_from_slice(&[0xff, 0xff, 0xff]);

        let record = OptRecord::new_checked(&buffer[..]).unwrap();
        assert_eq!(usize::from(record.rdlength()), rdata.len());
        assert_eq!(record.rdata(), &rdata[..]);
        assert_eq!(record.total_len(), rdata.len() + 2);
        assert_eq!(record.options().count(), 3);
        assert_eq!(record.find_option(OptionCode::ECS).unwrap().content(), &ECS_DATA);
        assert_eq!(record.extract_options().unwrap().len(), 2);
    }

    #[test]
    fn test_opt_record_check_len() {
        assert_eq!(
            OptRecord::new_checked(&[0x00][..]).unwrap_err(),
            Error::BufferTooShort
        );
        assert_eq!(
            OptRecord::new_checked(&[0x00, 0x05, 0x00, 0x0c][..]).unwrap_err(),
            Error::RdataOverflow {
                rdlength: 5,
                remaining: 2
            }
        );
        let record = OptRecord::new_checked(&[0x00, 0x00][..]).unwrap();
        assert!(record.extract_options().unwrap().is_empty());
    }

    #[test]
    fn test_opt_record_into_inner() {
        let buffer = vec![0x00, 0x04, 0x00, 0x0c, 0x00, 0x00];
        let record = OptRecord::new_checked(buffer.clone()).unwrap();
        assert_eq!(record.into_inner(), buffer);
    }

    #[test]
    fn test_opt_record_display() {
        let record = OptRecord::new_unchecked(&[0x00, 0x04, 0x00, 0x0c, 0x00, 0x00][..]);
        assert_eq!(format!("{}", record), "OPT record: rdlength=4");
    }
}
