// Predicate algebra shared by every storage backend

/// Composable filter over one entity type.
///
/// `match_all` is the identity of `and`: folding any set of predicates,
/// in any order, selects the same entities.
pub trait Predicate: Sized {
    /// Predicate that accepts every entity
    fn match_all() -> Self;

    /// Logical AND
    fn and(self, other: Self) -> Self;

    /// AND of every present predicate; absent ones add no constraint
    fn all_of<I>(predicates: I) -> Self
    where
        I: IntoIterator<Item = Option<Self>>,
    {
        predicates
            .into_iter()
            .flatten()
            .fold(Self::match_all(), Self::and)
    }
}

/// AND two optional predicates. `None` means "no constraint".
pub fn combine<P: Predicate>(a: Option<P>, b: Option<P>) -> Option<P> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.and(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Trimmed value of a raw search parameter, or `None` when it is absent or
/// blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
