//! Narrative text returned by commands.

/// Split a narrative into the lines worth showing.
///
/// Lines are separated by `\n`; empty segments are dropped and nothing else
/// is trimmed.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').filter(|line| !line.is_empty())
}
