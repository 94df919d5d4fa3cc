use super::tree::Node;

/// Re-serialize a block sequence as markdown. Blocks are separated by one
/// blank line; the result is trimmed.
pub fn to_markdown(nodes: &[Node]) -> String {
    let blocks: Vec<String> = nodes
        .iter()
        .map(block)
        .filter(|b| !b.trim().is_empty())
        .collect();
    blocks.join("\n\n").trim().to_string()
}

fn block(node: &Node) -> String {
    match node {
        Node::Paragraph(children) => inline(children),
        Node::Heading { depth, children } => {
            format!("{} {}", "#".repeat(*depth as usize), inline(children))
        }
        Node::Code { lang, value } => fenced(lang.as_deref(), value),
        Node::List {
            ordered,
            start,
            items,
        } => list(*ordered, *start, items),
        Node::BlockQuote(children) => quote(&to_markdown(children)),
        Node::Table(rows) => table(rows),
        Node::ThematicBreak => "---".to_string(),
        Node::Html(html) => html.trim_end().to_string(),
        Node::ListItem(children) => item_body(children),
        Node::TableRow(_) | Node::TableCell(_) => table(std::slice::from_ref(node)),
        other => inline(std::slice::from_ref(other)),
    }
}

/// Inline markup with its original markers.
pub fn inline(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Strong(c) => {
                out.push_str("**");
                out.push_str(&inline(c));
                out.push_str("**");
            }
            Node::Emphasis(c) => {
                out.push('*');
                out.push_str(&inline(c));
                out.push('*');
            }
            Node::Strikethrough(c) => {
                out.push_str("~~");
                out.push_str(&inline(c));
                out.push_str("~~");
            }
            Node::InlineCode(code) => out.push_str(&code_span(code)),
            Node::Link { url, children } => {
                out.push_str(&format!("[{}]({})", inline(children), url));
            }
            Node::Image { url, alt } => out.push_str(&format!("![{}]({})", alt, url)),
            Node::SoftBreak => out.push('\n'),
            Node::HardBreak => out.push_str("  \n"),
            Node::Html(html) => out.push_str(html),
            Node::TaskMarker(done) => out.push_str(if *done { "[x] " } else { "[ ] " }),
            other => out.push_str(&block(other)),
        }
    }
    out
}

fn code_span(code: &str) -> String {
    if code.contains('`') {
        format!("`` {} ``", code)
    } else {
        format!("`{}`", code)
    }
}

fn fenced(lang: Option<&str>, value: &str) -> String {
    let mut fence = "```".to_string();
    while value.contains(fence.as_str()) {
        fence.push('`');
    }
    let body = if value.is_empty() || value.ends_with('\n') {
        value.to_string()
    } else {
        format!("{}\n", value)
    };
    format!("{}{}\n{}{}", fence, lang.unwrap_or(""), body, fence)
}

fn list(ordered: bool, start: u64, items: &[Node]) -> String {
    let loose = items
        .iter()
        .any(|item| item.children().iter().any(|c| matches!(c, Node::Paragraph(_))));
    let rendered: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if ordered {
                format!("{}. ", start + i as u64)
            } else {
                "- ".to_string()
            };
            indent_continuation(&marker, &item_body(item.children()))
        })
        .collect();
    rendered.join(if loose { "\n\n" } else { "\n" })
}

/// A list item mixes loose inline runs (tight lists) with nested blocks.
fn item_body(children: &[Node]) -> String {
    let loose = children.iter().any(|c| matches!(c, Node::Paragraph(_)));
    let mut parts: Vec<String> = Vec::new();
    let mut run: Vec<Node> = Vec::new();
    for child in children {
        if child.is_block() {
            if !run.is_empty() {
                parts.push(inline(&run));
                run.clear();
            }
            parts.push(block(child));
        } else {
            run.push(child.clone());
        }
    }
    if !run.is_empty() {
        parts.push(inline(&run));
    }
    parts.retain(|p| !p.trim().is_empty());
    parts.join(if loose { "\n\n" } else { "\n" })
}

fn indent_continuation(marker: &str, body: &str) -> String {
    let pad = " ".repeat(marker.chars().count());
    let mut out = String::new();
    for (i, line) in body.lines().enumerate() {
        if i == 0 {
            out.push_str(marker);
            out.push_str(line);
        } else {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&pad);
                out.push_str(line);
            }
        }
    }
    if out.is_empty() {
        out.push_str(marker.trim_end());
    }
    out
}

fn quote(body: &str) -> String {
    body.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn table(rows: &[Node]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .children()
            .iter()
            .map(|cell| inline(cell.children()).replace('|', "\\|"))
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
        if i == 0 {
            let delim = vec!["---"; cells.len().max(1)];
            lines.push(format!("| {} |", delim.join(" | ")));
        }
    }
    lines.join("\n")
}
