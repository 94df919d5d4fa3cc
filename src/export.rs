//! Static HTML export of a page model.

use crate::model::{Link, PageModel};
use crate::parser::text::is_script_url;
use crate::render::{RenderedSections, SectionBody};

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped href, with script-capable schemes replaced by `#`.
pub fn safe_href(href: &str) -> String {
    if is_script_url(href) {
        return "#".to_string();
    }
    escape_html(href.trim())
}

fn anchor(link: &Link, class: &str) -> String {
    format!(
        "<a class=\"{}\" href=\"{}\">{}</a>",
        class,
        safe_href(&link.href),
        escape_html(&link.label)
    )
}

/// Complete HTML5 document. Sections without rendered markup are shown as
/// escaped raw markdown.
pub fn to_html(page: &PageModel, rendered: &RenderedSections) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&page.title)));
    html.push_str(&format!(
        "<meta name=\"description\" content=\"{}\">\n",
        escape_html(&page.tagline)
    ));
    html.push_str("</head>\n<body>\n");

    push_hero(&mut html, page);

    if let Some(stats) = &page.stats {
        html.push_str("<section class=\"stats\">\n");
        for stat in stats {
            html.push_str(&format!(
                "<div class=\"stat\"><strong>{}</strong> <span>{}</span></div>\n",
                escape_html(&stat.value),
                escape_html(&stat.label)
            ));
        }
        html.push_str("</section>\n");
    }

    if !page.features.is_empty() {
        html.push_str("<section class=\"features\">\n<ul>\n");
        for feature in &page.features {
            html.push_str("<li>");
            if let Some(icon) = &feature.icon {
                html.push_str(&format!("<span class=\"icon\">{}</span> ", escape_html(icon)));
            }
            html.push_str(&format!("<strong>{}</strong>", escape_html(&feature.title)));
            if let Some(desc) = &feature.desc {
                html.push_str(&format!(" <p>{}</p>", escape_html(desc)));
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n</section>\n");
    }

    if let Some(tech) = &page.tech_stack {
        html.push_str("<section class=\"tech-stack\">\n<ul>\n");
        for term in tech {
            html.push_str(&format!("<li>{}</li>\n", escape_html(term)));
        }
        html.push_str("</ul>\n</section>\n");
    }

    for section in &page.sections {
        html.push_str(&format!(
            "<section id=\"{}\">\n<h2>{}</h2>\n",
            escape_html(&section.id),
            escape_html(&section.title)
        ));
        match rendered.body_for(section) {
            SectionBody::Markup(markup) => html.push_str(markup),
            SectionBody::Raw(raw) => {
                html.push_str(&format!("<pre class=\"raw\">{}</pre>\n", escape_html(raw)))
            }
        }
        html.push_str("</section>\n");
    }

    if let Some(testimonials) = &page.testimonials {
        html.push_str("<section class=\"testimonials\">\n");
        for t in testimonials {
            html.push_str(&format!("<blockquote><p>{}</p>", escape_html(&t.quote)));
            if let Some(author) = &t.author {
                html.push_str(&format!("<cite>{}</cite>", escape_html(author)));
            }
            html.push_str("</blockquote>\n");
        }
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_hero(html: &mut String, page: &PageModel) {
    html.push_str("<header class=\"hero\">\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&page.title)));
    html.push_str(&format!("<p class=\"tagline\">{}</p>\n", escape_html(&page.tagline)));

    html.push_str("<nav>\n");
    html.push_str(&anchor(&page.cta, "cta"));
    html.push('\n');
    for link in &page.secondary_links {
        html.push_str(&anchor(link, "secondary"));
        html.push('\n');
    }
    html.push_str("</nav>\n");

    if let Some(badges) = &page.badges {
        html.push_str("<ul class=\"badges\">\n");
        for badge in badges {
            let label = escape_html(&badge.label);
            match &badge.href {
                Some(href) => html.push_str(&format!(
                    "<li><a href=\"{}\">{}</a></li>\n",
                    safe_href(href),
                    label
                )),
                None => html.push_str(&format!("<li>{}</li>\n", label)),
            }
        }
        html.push_str("</ul>\n");
    }

    if let Some(image) = &page.hero_image {
        html.push_str(&format!(
            "<img class=\"hero-image\" src=\"{}\" alt=\"{}\">\n",
            safe_href(&image.url),
            escape_html(&image.alt)
        ));
    }
    html.push_str("</header>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Feature, HeroImage, Section};
    use crate::render::RenderedSection;

    fn page() -> PageModel {
        PageModel {
            title: "Foo".to_string(),
            tagline: "Fast foo.".to_string(),
            cta: Link::new("Get Started", "#installation"),
            secondary_links: vec![Link::new("Docs", "https://docs.foo.dev")],
            features: vec![Feature {
                title: "Quick".to_string(),
                desc: Some("Very.".to_string()),
                icon: None,
            }],
            sections: vec![
                Section {
                    id: "installation".to_string(),
                    title: "Install".to_string(),
                    content: "```bash\nnpm i foo\n```".to_string(),
                },
                Section {
                    id: "license".to_string(),
                    title: "License".to_string(),
                    content: "MIT <3".to_string(),
                },
            ],
            badges: None,
            hero_image: None,
            stats: None,
            tech_stack: None,
            testimonials: None,
        }
    }

    #[test]
    fn escapes_all_five() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn script_schemes_neutralized() {
        assert_eq!(safe_href("javascript:alert(1)"), "#");
        assert_eq!(safe_href("  JavaScript:alert(1)"), "#");
        assert_eq!(safe_href("java\tscript:alert(1)"), "#");
        assert_eq!(safe_href("data:text/html,x"), "#");
        assert_eq!(safe_href("https://x.dev/?a=1&b=2"), "https://x.dev/?a=1&amp;b=2");
        assert_eq!(safe_href("#usage"), "#usage");
    }

    #[test]
    fn hostile_title_and_cta() {
        let mut p = page();
        p.title = "<script>alert(1)</script>".to_string();
        p.cta = Link::new("Click", "javascript:alert(1)");
        let html = to_html(&p, &RenderedSections::default());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("<a class=\"cta\" href=\"#\">Click</a>"));
    }

    #[test]
    fn rendered_and_raw_sections() {
        let p = page();
        let mut rendered = RenderedSections::default();
        rendered.apply(RenderedSection {
            id: "installation".to_string(),
            result: Ok("<pre><code>npm i foo\n</code></pre>\n".to_string()),
        });
        let html = to_html(&p, &rendered);
        assert!(html.contains("<section id=\"installation\">\n<h2>Install</h2>\n<pre><code>npm i foo"));
        assert!(html.contains("<pre class=\"raw\">MIT &lt;3</pre>"));
    }

    #[test]
    fn optional_blocks_only_when_present() {
        let mut p = page();
        let html = to_html(&p, &RenderedSections::default());
        assert!(!html.contains("class=\"stats\""));
        assert!(!html.contains("hero-image"));

        p.hero_image = Some(HeroImage {
            url: "docs/shot.png".to_string(),
            alt: "Screenshot".to_string(),
        });
        let html = to_html(&p, &RenderedSections::default());
        assert!(html.contains("<img class=\"hero-image\" src=\"docs/shot.png\" alt=\"Screenshot\">"));
    }
}
