//! Filter predicate: strict greater-than over a field lookup.

use crate::ondemand::FieldLookup;

/// `true` iff the lookup produced a number strictly greater than
/// `threshold`. A miss never matches. Total over every lookup value: a NaN
/// hit simply compares false.
#[inline]
pub fn matches(lookup: FieldLookup, threshold: f64) -> bool {
    match lookup {
        FieldLookup::Number(v) => v > threshold,
        FieldLookup::Miss => false,
    }
}
