//! Slug generation for URLs and anchors.

/// Turn arbitrary text into a URL slug.
///
/// Lowercases, maps whitespace runs and hyphens to single hyphens, drops
/// everything outside the ASCII word class, and trims hyphens at the ends.
/// Total: empty input yields an empty slug.
pub fn slugify(input: &str) -> String {
    let mut mapped = String::with_capacity(input.len());
    for c in input.to_lowercase().chars() {
        if c.is_whitespace() || c == '-' {
            mapped.push('-');
        } else if c.is_ascii_alphanumeric() || c == '_' {
            mapped.push(c);
        }
        // anything else is dropped
    }

    mapped
        .split('-')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
