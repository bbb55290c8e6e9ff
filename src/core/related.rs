//! Adapter for relationship payloads.
//!
//! A relationship expansion may come back as nothing, one row, or a list of
//! rows, depending on how the join was expressed. Callers that want "the"
//! related record go through [`first_related`], whose contract is: always
//! zero or one record, and when several are present the first one wins.

/// Collapses a relationship payload into zero or one related record.
///
/// Accepts anything iterable over optional records, so a single
/// `Option<T>`, a `Vec<T>` (via `map(Some)`) and a list of
/// `(parent, Option<T>)` join rows all go through the same rule. Empty slots
/// are skipped.
pub fn first_related<T, I>(payload: I) -> Option<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    payload.into_iter().flatten().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_record() {
        assert_eq!(first_related(Some(Some(5))), Some(5));
    }

    #[test]
    fn test_missing_record() {
        assert_eq!(first_related::<i32, _>(None), None);
        assert_eq!(first_related::<i32, _>(vec![None, None]), None);
    }

    #[test]
    fn test_list_takes_first_present() {
        assert_eq!(first_related(vec![None, Some("a"), Some("b")]), Some("a"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(first_related(Vec::<Option<u8>>::new()), None);
    }
}
