use crate::model::Testimonial;
use crate::parser::tables::{TESTIMONIALS_MAX, TESTIMONIAL_MAX_CHARS, TESTIMONIAL_MIN_CHARS};
use crate::parser::text::squash_whitespace;
use crate::parser::tree::{Document, Node};

const DASHES: &[char] = &['-', '–', '—', '―'];
const QUOTE_MARKS: &[char] = &['"', '“', '”', '\'', '‘', '’', '«', '»'];

/// Block quotes of a plausible length, split into quote and author.
pub fn extract(doc: &Document) -> Vec<Testimonial> {
    doc.walk()
        .filter(|n| matches!(n, Node::BlockQuote(_)))
        .map(|n| n.text().trim().to_string())
        .filter(|t| {
            let len = t.chars().count();
            (TESTIMONIAL_MIN_CHARS..TESTIMONIAL_MAX_CHARS).contains(&len)
        })
        .filter(|t| !is_admonition(t))
        .map(|t| split_attribution(&t))
        .filter(|t| !t.quote.is_empty())
        .take(TESTIMONIALS_MAX)
        .collect()
}

/// GitHub alert syntax: `> [!NOTE]`.
fn is_admonition(text: &str) -> bool {
    text.starts_with("[!")
}

fn split_attribution(text: &str) -> Testimonial {
    let (quote, author) = split_on_dash(text)
        .or_else(|| split_on_last_line(text))
        .unwrap_or((text, ""));

    let quote = squash_whitespace(quote)
        .trim_matches(|c: char| QUOTE_MARKS.contains(&c) || c.is_whitespace())
        .to_string();
    let author = squash_whitespace(author.trim_start_matches(|c: char| {
        DASHES.contains(&c) || c == '~' || c.is_whitespace()
    }));

    Testimonial {
        quote,
        author: (!author.is_empty()).then_some(author),
    }
}

/// "… — Jane Doe" or "… - Jane" (dash surrounded by spaces or starting a line).
fn split_on_dash(text: &str) -> Option<(&str, &str)> {
    let (idx, dash) = text
        .char_indices()
        .filter(|(i, c)| {
            DASHES.contains(c) && {
                let before = text[..*i].chars().next_back();
                let after = text[*i + c.len_utf8()..].chars().next();
                before.map_or(true, |b| b.is_whitespace())
                    && after.is_some_and(|a| a.is_whitespace() || DASHES.contains(&a))
            }
        })
        .last()?;
    let quote = text[..idx].trim_end();
    let author = &text[idx + dash.len_utf8()..];
    if quote.is_empty() || author.trim().trim_start_matches(DASHES).trim().is_empty() {
        return None;
    }
    Some((quote, author))
}

fn split_on_last_line(text: &str) -> Option<(&str, &str)> {
    let (quote, author) = text.rsplit_once('\n')?;
    let quote = quote.trim_end();
    if quote.is_empty() || author.trim().is_empty() {
        return None;
    }
    Some((quote, author))
}
