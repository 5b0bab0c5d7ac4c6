//! Markup stripping for generated text

/// Characters removed from every piece of generated text
const STRIPPED: [char; 5] = ['#', '*', '\\', '\n', '\r'];

/// Remove heading markers, emphasis markers, backslashes and line breaks,
/// keeping every other character in order.
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|c| !STRIPPED.contains(c)).collect()
}

/// True when `text` contains none of the stripped characters
pub fn is_clean(text: &str) -> bool {
    !text.chars().any(|c| STRIPPED.contains(&c))
}
