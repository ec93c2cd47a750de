//! Common helper functions

/// Escape `%`, `_` and `\` in user-supplied text before embedding it in a
/// LIKE/ILIKE pattern, so filter input matches literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
