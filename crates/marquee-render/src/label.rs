/// Splits a tile name at internal capitalization boundaries so the label
/// can be stacked line-by-line inside its rectangle.
///
/// A new line starts at every interior uppercase letter that is followed
/// by a non-uppercase character, mirroring the reference behavior of
/// splitting on `(?=[A-Z][^A-Z])`. Runs of uppercase (acronyms) stay on
/// one line until their last letter.
pub fn split_label(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut lines = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        let starts_line = i > 0
            && ch.is_ascii_uppercase()
            && chars.get(i + 1).is_some_and(|next| !next.is_ascii_uppercase());
        if starts_line && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    lines.push(current);
    lines
}
