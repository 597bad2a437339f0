/// Escapes `\`, `%` and `_` so user input matches literally inside a
/// `LIKE ... ESCAPE '\'` pattern
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
