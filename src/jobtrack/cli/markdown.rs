use super::styles::Palette;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Renders markdown for the terminal: headings styled, bullets as `•`,
/// ordered items numbered, inline emphasis and code styled.
pub(super) fn render_markdown(input: &str, palette: &Palette) -> String {
    let parser = Parser::new_ext(input, Options::empty());

    let mut out = String::new();
    let mut line = String::new();
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut heading: Option<HeadingLevel> = None;
    let mut strong = false;
    let mut emphasis = false;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                flush(&mut out, &mut line);
                if !out.is_empty() && !out.ends_with("\n\n") {
                    out.push('\n');
                }
                heading = Some(level);
            }
            Event::End(TagEnd::Heading(_)) => {
                let text = std::mem::take(&mut line);
                out.push_str(&palette.heading.apply_to(text).to_string());
                out.push('\n');
                heading = None;
            }
            Event::Start(Tag::List(start)) => {
                flush(&mut out, &mut line);
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                flush(&mut out, &mut line);
                lists.pop();
            }
            Event::Start(Tag::Item) => {
                flush(&mut out, &mut line);
                let depth = lists.len().saturating_sub(1);
                line.push_str(&"  ".repeat(depth));
                match lists.last_mut() {
                    Some(Some(n)) => {
                        line.push_str(&format!("{}. ", n));
                        *n += 1;
                    }
                    _ => line.push_str("• "),
                }
            }
            Event::End(TagEnd::Item) => flush(&mut out, &mut line),
            Event::End(TagEnd::Paragraph) => {
                flush(&mut out, &mut line);
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Strong) => strong = true,
            Event::End(TagEnd::Strong) => strong = false,
            Event::Start(Tag::Emphasis) => emphasis = true,
            Event::End(TagEnd::Emphasis) => emphasis = false,
            Event::Text(text) => {
                if heading.is_none() && (strong || emphasis) {
                    line.push_str(&palette.emphasis.apply_to(&*text).to_string());
                } else {
                    line.push_str(&text);
                }
            }
            Event::Code(code) => line.push_str(&palette.code.apply_to(&*code).to_string()),
            Event::SoftBreak => line.push(' '),
            Event::HardBreak => flush(&mut out, &mut line),
            _ => {}
        }
    }
    flush(&mut out, &mut line);

    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

fn flush(out: &mut String, line: &mut String) {
    if !line.trim().is_empty() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    line.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::styles::LIGHT;
    use console::strip_ansi_codes;

    fn plain(input: &str) -> String {
        strip_ansi_codes(&render_markdown(input, &LIGHT)).to_string()
    }

    #[test]
    fn test_bullets() {
        assert_eq!(plain("- Rust\n- Kafka\n"), "• Rust\n• Kafka\n");
    }

    #[test]
    fn test_numbered_list_under_heading() {
        let out = plain("### Likely Interview Questions\n\n1. Why us?\n2. Tell me about a failure.\n");
        assert_eq!(
            out,
            "Likely Interview Questions\n1. Why us?\n2. Tell me about a failure.\n"
        );
    }

    #[test]
    fn test_paragraphs_keep_inline_text() {
        let out = plain("Use **STAR** answers and `cargo` examples.");
        assert_eq!(out, "Use STAR answers and cargo examples.\n");
    }
}
