//! Textual rendering of used-index listings.
//!
//! Listings are produced as `Vec<usize>` by the arrays themselves; this
//! module only renders them for display and log output. The rendered form is
//! comma-joined with no trailing separator, and empty when no slot is used.

use std::fmt::{self, Write};

/// Renders `indices` as `"0,3,4"`.
///
/// ```
/// use uarray::ds::listing::format_indices;
///
/// assert_eq!(format_indices(&[0, 3, 4]), "0,3,4");
/// assert_eq!(format_indices(&[]), "");
/// ```
pub fn format_indices(indices: &[usize]) -> String {
    let mut out = String::with_capacity(indices.len() * 2);
    // Writing into a String cannot fail.
    let _ = write_indices(&mut out, indices);
    out
}

/// Writes `indices` comma-joined into any [`fmt::Write`] sink.
pub(crate) fn write_indices<W: Write + ?Sized>(out: &mut W, indices: &[usize]) -> fmt::Result {
    let mut iter = indices.iter();
    if let Some(first) = iter.next() {
        write!(out, "{first}")?;
        for idx in iter {
            write!(out, ",{idx}")?;
        }
    }
    Ok(())
}

/// Borrowed `Display` adapter over an index listing.
///
/// Renders lazily, so `tracing` fields and `format!` skip the intermediate
/// `String`. Teardown events record the occupied slots with it.
#[derive(Debug, Clone, Copy)]
pub struct IndexListing<'a>(pub &'a [usize]);

impl fmt::Display for IndexListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_indices(f, self.0)
    }
}
