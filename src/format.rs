//! Small reshaping helpers applied to operator data before it is served.

/// Title-cases a village name segment by segment.
///
/// Segments are separated by a space or a hyphen; separators are kept. The
/// first character of each segment is upper-cased, the rest lower-cased.
pub fn village_name(name: &str) -> String {
    let mut formatted = String::with_capacity(name.len());
    let mut next_upper = true;
    for c in name.chars() {
        if c == ' ' || c == '-' {
            formatted.push(c);
            next_upper = true;
        } else if next_upper {
            formatted.extend(c.to_uppercase());
            next_upper = false;
        } else {
            formatted.extend(c.to_lowercase());
        }
    }
    formatted
}

/// Entity number from an operator self-link such as
/// `https://api.delijn.be/DLKernOpenData/api/v1/haltes/3/307040`: the
/// second-to-last path segment.
pub fn entity_from_link(url: &str) -> Option<u32> {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    segments.next()?;
    segments.next()?.parse().ok()
}
