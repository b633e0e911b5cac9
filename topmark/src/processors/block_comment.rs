//! Block-comment family: `/* ... */` (C/CSS-style, optional `line_prefix`
//! inside the block) and bare `<!-- ... -->` (Markdown, no `line_prefix`).
//!
//! The core find/parse/render/strip logic here is also reused by
//! [`super::xml`] — an XML prolog header is rendered as the same bare
//! `<!-- ... -->` block as Markdown's, it's only the *insertion anchor* that
//! differs (char-offset prolog/DOCTYPE skipping vs. a plain line index).

use topmark_domain::FileType;

use super::{remove_span, strip_eol, HeaderField, HeaderProcessor, END_MARKER, START_MARKER};

pub struct BlockCommentProcessor {
    pub start: &'static str,
    pub end: &'static str,
    pub line_prefix: Option<&'static str>,
}

/// Simple odd/even fenced-code-block counter (```` ``` ```` or `~~~`), used to
/// keep Markdown/XML candidate detection from firing on a directive-shaped
/// line that only appears inside an example code block.
pub(crate) fn inside_code_fence(lines: &[String], idx: usize) -> bool {
    let mut fence_count = 0usize;
    for line in &lines[..idx] {
        let t = strip_eol(line).trim_start();
        if t.starts_with("```") || t.starts_with("~~~") {
            fence_count += 1;
        }
    }
    fence_count % 2 == 1
}

pub(crate) fn line_has_directive_impl(line: &str, directive: &str, line_prefix: Option<&str>) -> bool {
    let l = strip_eol(line).trim();
    match line_prefix {
        Some(p) => {
            let p = p.trim();
            l.strip_prefix(p).map(|r| r.trim()) == Some(directive) || l == directive
        }
        None => l == directive,
    }
}

fn expand_backward(lines: &[String], start: usize, token: &str) -> usize {
    let mut k = start;
    while k > 0 {
        let prev = strip_eol(&lines[k - 1]).trim();
        if prev == token {
            return k - 1;
        }
        if prev.is_empty() {
            k -= 1;
            continue;
        }
        break;
    }
    start
}

fn expand_forward(lines: &[String], end: usize, token: &str) -> usize {
    let mut k = end;
    while k + 1 < lines.len() {
        let next = strip_eol(&lines[k + 1]).trim();
        if next == token {
            return k + 1;
        }
        if next.is_empty() {
            k += 1;
            continue;
        }
        break;
    }
    end
}

pub(crate) fn header_bounds_impl(
    lines: &[String],
    anchor: usize,
    before: usize,
    after: usize,
    start_tok: &str,
    end_tok: &str,
    line_prefix: Option<&str>,
    fence_guard: bool,
) -> Option<(usize, usize)> {
    let before = before as isize;
    let after = after as isize;
    let anchor = anchor as isize;
    for i in 0..lines.len() {
        let ii = i as isize;
        if ii < anchor - before || ii > anchor + after {
            continue;
        }
        if fence_guard && inside_code_fence(lines, i) {
            continue;
        }
        if !line_has_directive_impl(&lines[i], START_MARKER, line_prefix) {
            continue;
        }
        for j in (i + 1)..lines.len() {
            if line_has_directive_impl(&lines[j], END_MARKER, line_prefix) {
                let s = expand_backward(lines, i, start_tok);
                let e = expand_forward(lines, j, end_tok);
                return Some((s, e));
            }
        }
        return None;
    }
    None
}

pub(crate) fn content_of_line(line: &str, line_prefix: Option<&str>) -> String {
    let l = strip_eol(line).trim();
    match line_prefix {
        Some(p) => l.strip_prefix(p.trim()).map(|r| r.trim()).unwrap_or(l).to_string(),
        None => l.to_string(),
    }
}

pub(crate) fn parse_fields_impl(header_lines: &[String], line_prefix: Option<&str>) -> Vec<HeaderField> {
    let mut out = Vec::new();
    for raw in header_lines {
        let content = content_of_line(raw, line_prefix);
        if content.is_empty() {
            continue;
        }
        let Some((key, value)) = content.split_once(':') else { continue };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        out.push(HeaderField { key: key.to_string(), value: value.trim().to_string() });
    }
    out
}

fn content_line(line_prefix: Option<&str>, content: &str, newline: &str) -> String {
    let mut s = match line_prefix {
        Some(p) => format!("{p}{content}"),
        None => content.to_string(),
    };
    let trimmed_len = s.trim_end().len();
    s.truncate(trimmed_len);
    s.push_str(newline);
    s
}

pub(crate) fn render_header_impl(
    start_tok: &str,
    end_tok: &str,
    line_prefix: Option<&str>,
    fields: &[HeaderField],
    align: bool,
    newline: &str,
) -> Vec<String> {
    let width = if align { fields.iter().map(|f| f.key.chars().count()).max().unwrap_or(0) } else { 0 };
    let mut out = Vec::with_capacity(fields.len() + 4);
    out.push(format!("{start_tok}{newline}"));
    out.push(content_line(line_prefix, START_MARKER, newline));
    out.push(content_line(line_prefix, "", newline));
    for f in fields {
        let content = if align {
            format!("  {:<width$} : {}", f.key, f.value, width = width)
        } else {
            format!("  {} : {}", f.key, f.value)
        };
        out.push(content_line(line_prefix, &content, newline));
    }
    out.push(content_line(line_prefix, "", newline));
    out.push(content_line(line_prefix, END_MARKER, newline));
    out.push(format!("{end_tok}{newline}"));
    out
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn strip_header_impl(
    lines: &[String],
    span: Option<(usize, usize)>,
    ensure_blank_after: bool,
    start_tok: &str,
    end_tok: &str,
    line_prefix: Option<&str>,
    anchor: usize,
    before: usize,
    after: usize,
    fence_guard: bool,
) -> (Vec<String>, Option<(usize, usize)>) {
    let resolved = span
        .or_else(|| header_bounds_impl(lines, anchor, before, after, start_tok, end_tok, line_prefix, fence_guard))
        .or_else(|| super::permissive_bounds(lines, |l, d| line_has_directive_impl(l, d, line_prefix)));
    let Some(sp) = resolved else { return (lines.to_vec(), None) };
    let mut updated = remove_span(lines, sp);
    if ensure_blank_after && sp.0 < updated.len() && strip_eol(&updated[sp.0]).trim().is_empty() {
        updated.remove(sp.0);
    }
    (updated, Some(sp))
}

impl HeaderProcessor for BlockCommentProcessor {
    fn header_bounds(&self, file_type: &FileType, lines: &[String]) -> Option<(usize, usize)> {
        let anchor = self.header_insertion_index(file_type, lines);
        let p = &file_type.header_policy;
        header_bounds_impl(
            lines,
            anchor,
            p.scan_window_before,
            p.scan_window_after,
            self.start,
            self.end,
            self.line_prefix,
            self.line_prefix.is_none(),
        )
    }

    fn parse_fields(&self, header_lines: &[String]) -> Vec<HeaderField> {
        parse_fields_impl(header_lines, self.line_prefix)
    }

    fn line_content(&self, line: &str) -> String {
        content_of_line(line, self.line_prefix)
    }

    fn render_header(&self, _file_type: &FileType, fields: &[HeaderField], align: bool, newline: &str) -> Vec<String> {
        render_header_impl(self.start, self.end, self.line_prefix, fields, align, newline)
    }

    fn strip_header(
        &self,
        file_type: &FileType,
        lines: &[String],
        span: Option<(usize, usize)>,
    ) -> (Vec<String>, Option<(usize, usize)>) {
        let anchor = self.header_insertion_index(file_type, lines);
        let p = &file_type.header_policy;
        strip_header_impl(
            lines,
            span,
            p.ensure_blank_after_header,
            self.start,
            self.end,
            self.line_prefix,
            anchor,
            p.scan_window_before,
            p.scan_window_after,
            self.line_prefix.is_none(),
        )
    }

    fn line_has_directive(&self, line: &str, directive: &str) -> bool {
        line_has_directive_impl(line, directive, self.line_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topmark_domain::{CommentSyntax, FileType};

    fn css_type() -> FileType {
        FileType::builder("css")
            .extensions(&[".css"])
            .comment_syntax(CommentSyntax::Block { start: "/*", end: "*/", line_prefix: Some(" * ") })
            .build()
    }

    fn markdown_type() -> FileType {
        FileType::builder("markdown")
            .extensions(&[".md"])
            .comment_syntax(CommentSyntax::Block { start: "<!--", end: "-->", line_prefix: None })
            .build()
    }

    #[test]
    fn renders_c_style_block_with_star_prefix() {
        let proc = BlockCommentProcessor { start: "/*", end: "*/", line_prefix: Some(" * ") };
        let fields = vec![HeaderField { key: "file".into(), value: "x.css".into() }];
        let lines = proc.render_header(&css_type(), &fields, false, "\n");
        assert_eq!(lines[0], "/*\n");
        assert_eq!(lines[1], " * topmark:header:start\n");
        assert_eq!(lines[2], " *\n");
        assert_eq!(lines[3], " *   file : x.css\n");
        assert_eq!(lines[4], " *\n");
        assert_eq!(lines[5], " * topmark:header:end\n");
        assert_eq!(lines[6], "*/\n");
    }

    #[test]
    fn finds_and_strips_markdown_header() {
        let proc = BlockCommentProcessor { start: "<!--", end: "-->", line_prefix: None };
        let ft = markdown_type();
        let lines: Vec<String> = vec![
            "<!--\n".into(),
            "topmark:header:start\n".into(),
            "\n".into(),
            "file : doc.md\n".into(),
            "\n".into(),
            "topmark:header:end\n".into(),
            "-->\n".into(),
            "\n".into(),
            "# Title\n".into(),
        ];
        let bounds = proc.header_bounds(&ft, &lines);
        assert_eq!(bounds, Some((0, 6)));
        let (stripped, span) = proc.strip_header(&ft, &lines, None);
        assert_eq!(span, Some((0, 6)));
        assert_eq!(stripped, vec!["# Title\n".to_string()]);
    }

    #[test]
    fn ignores_directive_inside_fenced_code_block() {
        let proc = BlockCommentProcessor { start: "<!--", end: "-->", line_prefix: None };
        let ft = markdown_type();
        let lines: Vec<String> = vec![
            "# Example\n".into(),
            "```\n".into(),
            "topmark:header:start\n".into(),
            "topmark:header:end\n".into(),
            "```\n".into(),
        ];
        assert_eq!(proc.header_bounds(&ft, &lines), None);
    }
}
