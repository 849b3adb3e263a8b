//! Region tags embedded in No-Intro/Redump style display names.
//!
//! ```text
//! Game Name (USA, Europe) (Rev 1) (En,Fr,De)
//! ```
//!
//! The region group is the first parenthesized group, scanning left to
//! right, whose contents are made only of ASCII letters, spaces, `.` and
//! `-`, optionally split into several tokens by commas. Groups holding
//! anything else (digits, `+`, `&`, ...) are skipped, so "(Rev 1)" is never
//! taken for a region while a later "(Japan)" still is. The check is purely
//! lexical: "(Beta)" qualifies just like "(USA)".

/// Extract region tokens from a display name.
///
/// # Examples
///
/// ```
/// use dat2lpl_core::classify_regions;
///
/// assert_eq!(classify_regions("Tetris (USA, Europe) (Rev 1)"), vec!["USA", "Europe"]);
/// assert_eq!(classify_regions("Tetris (Rev 1) (Japan)"), vec!["Japan"]);
/// assert!(classify_regions("Tetris").is_empty());
/// ```
pub fn classify_regions(name: &str) -> Vec<String> {
    let Some(group) = first_region_group(name) else {
        return Vec::new();
    };

    group
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Find the contents of the first qualifying parenthesized group.
fn first_region_group(name: &str) -> Option<&str> {
    for (open, _) in name.match_indices('(') {
        let start = open + 1;
        // A qualifying group can't contain ')' so it always ends at the
        // next one.
        let Some(len) = name[start..].find(')') else {
            return None;
        };
        let content = &name[start..start + len];
        if is_region_group(content) {
            return Some(content);
        }
    }
    None
}

/// Every comma-separated segment must be non-empty and drawn from the
/// allowed character class.
fn is_region_group(content: &str) -> bool {
    !content.is_empty()
        && content
            .split(',')
            .all(|segment| !segment.is_empty() && segment.chars().all(is_region_char))
}

fn is_region_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, ' ' | '.' | '-')
}

#[cfg(test)]
#[path = "tests/region_tests.rs"]
mod tests;
