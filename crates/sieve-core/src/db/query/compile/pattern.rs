/// Characters escaped in CONTAIN patterns besides the escape character.
const LIKE_SPECIALS: [char; 5] = ['_', '[', ']', '-', '%'];

/// Build the CONTAIN pattern for a literal: lower-case it, escape every
/// LIKE-significant character, and wrap it in `%…%`.
pub(crate) fn contains_pattern(literal: &str, escape: char) -> String {
    let lowered = literal.to_lowercase();
    let mut pattern = String::with_capacity(lowered.len() + 2);

    pattern.push('%');
    for ch in lowered.chars() {
        if ch == escape || LIKE_SPECIALS.contains(&ch) {
            pattern.push(escape);
        }
        pattern.push(ch);
    }
    pattern.push('%');

    pattern
}

/// Build the CONTAIN_WITH_WILDCARD pattern: the literal as given, lower-cased.
pub(crate) fn wildcard_pattern(literal: &str) -> String {
    literal.to_lowercase()
}
