//! Candidate value selection within one filing.
//!
//! A presented statement can report the same period through more than one
//! reporting context, e.g. a quarter reported standalone and again as a
//! component of a year-to-date figure. This module resolves those candidate
//! columns to a single value per line item.

/// Resolves an ordered list of candidate values to a single value.
///
/// Policy, counting only the non-absent candidates:
///
/// - zero candidates resolve to `None`
/// - exactly one resolves to that value, unchanged
/// - exactly two resolve to the later-positioned one, which corresponds to
///   the more specific disclosure context in the source statement layout
/// - three or more resolve to `None`; the ambiguity is not disambiguated
///   further
///
/// Pure function; evaluated once per line item per filing.
#[must_use]
pub fn resolve(candidates: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = candidates.iter().copied().flatten().collect();
    match present.as_slice() {
        [single] => Some(*single),
        [_, later] => Some(*later),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_all_absent_resolve_to_none() {
        assert_eq!(resolve(&[]), None);
        assert_eq!(resolve(&[None, None, None]), None);
    }

    #[test]
    fn single_candidate_is_returned_from_any_position() {
        assert_eq!(resolve(&[Some(42.0)]), Some(42.0));
        assert_eq!(resolve(&[None, Some(42.0), None]), Some(42.0));
        assert_eq!(resolve(&[None, None, Some(-7.5)]), Some(-7.5));
    }

    #[test]
    fn two_candidates_prefer_the_later_position() {
        assert_eq!(resolve(&[Some(1.0), Some(2.0)]), Some(2.0));
        assert_eq!(resolve(&[Some(1.0), None, Some(3.0)]), Some(3.0));
        assert_eq!(resolve(&[None, Some(9.0), Some(0.0), None]), Some(0.0));
    }

    #[test]
    fn three_or_more_candidates_resolve_to_none() {
        assert_eq!(resolve(&[Some(1.0), Some(2.0), Some(3.0)]), None);
        assert_eq!(resolve(&[Some(1.0), Some(2.0), Some(3.0), Some(4.0)]), None);
    }
}
