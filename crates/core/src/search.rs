//! Search term helpers shared by the store implementations.

/// Escape character used in the `LIKE` patterns built by [`like_pattern`].
pub const LIKE_ESCAPE: char = '\\';

/// Normalize a user search term. Blank terms mean "no filter".
pub fn normalize_term(term: Option<&str>) -> Option<&str> {
    term.map(str::trim).filter(|t| !t.is_empty())
}

/// Build a `%term%` substring pattern with `LIKE` wildcards in the term
/// escaped, so `50%` matches the literal text.
///
/// # Examples
///
/// ```
/// use filmdex_core::search::like_pattern;
/// assert_eq!(like_pattern("Matrix"), "%Matrix%");
/// assert_eq!(like_pattern("100%_real"), "%100\\%\\_real%");
/// ```
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring match on title or synopsis, mirroring
/// PostgreSQL `ILIKE '%term%'`.
pub fn matches_term(title: &str, synopsis: &str, term: &str) -> bool {
    let needle = term.to_lowercase();
    title.to_lowercase().contains(&needle) || synopsis.to_lowercase().contains(&needle)
}
