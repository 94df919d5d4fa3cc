//! String helpers shared by the extractors.

/// Lower-case, whitespace to hyphen, drop anything that is not alphanumeric
/// or a hyphen. Hyphen runs collapse; an empty result becomes `section`.
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    for c in strip_glyphs(s).trim().chars() {
        if c.is_whitespace() || c == '-' {
            if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        } else {
            // Lower-casing can add combining marks (`İ` → `i\u{307}`).
            slug.extend(c.to_lowercase().filter(|l| l.is_alphanumeric()));
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

/// Emoji and pictographic symbols, plus the joiners/selectors that glue them.
pub fn is_glyph(c: char) -> bool {
    matches!(c as u32,
        0x1F000..=0x1FAFF   // emoji, pictographs, symbols
        | 0x2190..=0x21FF   // arrows
        | 0x2300..=0x23FF   // misc technical
        | 0x2460..=0x24FF   // enclosed alphanumerics
        | 0x25A0..=0x27BF   // shapes, misc symbols, dingbats
        | 0x2900..=0x297F
        | 0x2B00..=0x2BFF
        | 0x3030 | 0x303D | 0x3297 | 0x3299
        | 0x200D            // zero-width joiner
        | 0xFE0E | 0xFE0F   // variation selectors
        | 0x20E3            // keycap
        | 0xE0020..=0xE007F // tag sequences
    )
}

/// Split a leading pictographic glyph (with its modifiers) off `s`.
pub fn split_leading_glyph(s: &str) -> (Option<String>, &str) {
    let trimmed = s.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !is_glyph(*c))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    if end == 0 {
        return (None, s);
    }
    (Some(trimmed[..end].to_string()), trimmed[end..].trim_start())
}

/// Remove decorative glyphs anywhere in `s` and tidy the spacing left behind.
pub fn strip_glyphs(s: &str) -> String {
    let cleaned: String = s.chars().filter(|c| !is_glyph(*c)).collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Host of a URL without scheme, credentials, port or a leading `www.`.
/// Relative links yield an empty string.
pub fn host_of(url: &str) -> String {
    let Some((_, rest)) = url.split_once("//") else {
        return String::new();
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);
    host.trim_start_matches("www.").to_lowercase()
}

/// Host equals `domain` or is a subdomain of it.
pub fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

const SCRIPT_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// URL that runs script when followed. Browsers skip whitespace and control
/// characters inside the scheme, so this does too.
pub fn is_script_url(url: &str) -> bool {
    let scheme: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(16)
        .collect::<String>()
        .to_lowercase();
    SCRIPT_SCHEMES.iter().any(|s| scheme.starts_with(s))
}

/// Keep at most `max` characters; longer text gets cut to `max - 3` plus `...`.
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

/// Collapse internal whitespace (newlines included) to single spaces.
pub fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
