//! XML/HTML/SVG prolog family.
//!
//! The header is rendered as a bare `<!-- ... -->` block, identical in shape
//! to Markdown's (see [`super::block_comment`]). What's different is
//! *where* it goes: after any `<?xml ... ?>` declaration and `<!DOCTYPE ...>`
//! (which may itself span multiple lines via an internal subset `[ ... ]`),
//! never inside them. This processor works in char offsets only long enough
//! to find that boundary, then reports it back as a line index plus a
//! `reflow_required` flag so the rest of the pipeline stays line-based.

use topmark_domain::FileType;

use super::block_comment::{
    content_of_line, header_bounds_impl, line_has_directive_impl, parse_fields_impl, render_header_impl,
    strip_header_impl,
};
use super::{strip_eol, HeaderField, HeaderProcessor, Insertion, NO_LINE_ANCHOR};

const START_TOKEN: &str = "<!--";
const END_TOKEN: &str = "-->";

pub struct XmlPrologProcessor;

impl XmlPrologProcessor {
    /// Returns the line index just past any prolog/DOCTYPE, and whether
    /// inserting there would reflow (split) an existing physical line —
    /// either because body content shares a line with the closing `?>`/`>`,
    /// or because the prolog/DOCTYPE itself is unterminated and shouldn't be
    /// touched at all.
    fn compute_anchor(&self, lines: &[String]) -> (usize, bool) {
        let mut idx = 0usize;
        while idx < lines.len() && strip_eol(&lines[idx]).trim().is_empty() {
            idx += 1;
        }
        if idx >= lines.len() {
            return (lines.len(), false);
        }

        let mut reflow = false;

        let first = strip_eol(&lines[idx]);
        if first.trim_start().starts_with("<?xml") {
            let trimmed = first.trim_start();
            match trimmed.find("?>") {
                Some(end) => {
                    if !trimmed[end + 2..].trim().is_empty() {
                        reflow = true;
                    }
                    idx += 1;
                }
                None => return (idx, true),
            }
        }

        if idx < lines.len() {
            let l = strip_eol(&lines[idx]).trim_start();
            if l.starts_with("<!DOCTYPE") {
                let mut depth = 0i32;
                let mut j = idx;
                let mut closed_at: Option<usize> = None;
                'scan: while j < lines.len() {
                    let text = strip_eol(&lines[j]);
                    let scan_from = if j == idx { text.find("<!DOCTYPE").unwrap_or(0) } else { 0 };
                    for ch in text[scan_from..].chars() {
                        match ch {
                            '[' => depth += 1,
                            ']' => depth -= 1,
                            '>' if depth <= 0 => {
                                closed_at = Some(j);
                                break 'scan;
                            }
                            _ => {}
                        }
                    }
                    j += 1;
                }
                match closed_at {
                    Some(close_line) => {
                        let text = strip_eol(&lines[close_line]);
                        if let Some(gt) = text.rfind('>') {
                            if !text[gt + 1..].trim().is_empty() {
                                reflow = true;
                            }
                        }
                        idx = close_line + 1;
                    }
                    None => return (idx, true),
                }
            }
        }

        (idx.min(lines.len()), reflow)
    }
}

impl HeaderProcessor for XmlPrologProcessor {
    fn header_insertion_index(&self, _file_type: &FileType, _file_lines: &[String]) -> usize {
        NO_LINE_ANCHOR
    }

    fn resolve_insertion(&self, _file_type: &FileType, lines: &[String]) -> Insertion {
        let (line, reflow_required) = self.compute_anchor(lines);
        let needs_leading_blank =
            line > 0 && line < lines.len() && !strip_eol(&lines[line - 1]).trim().is_empty();
        Insertion { line, needs_leading_blank, reflow_required }
    }

    fn header_bounds(&self, file_type: &FileType, lines: &[String]) -> Option<(usize, usize)> {
        let (anchor, _) = self.compute_anchor(lines);
        let p = &file_type.header_policy;
        header_bounds_impl(lines, anchor, p.scan_window_before, p.scan_window_after, START_TOKEN, END_TOKEN, None, true)
    }

    fn parse_fields(&self, header_lines: &[String]) -> Vec<HeaderField> {
        parse_fields_impl(header_lines, None)
    }

    fn line_content(&self, line: &str) -> String {
        content_of_line(line, None)
    }

    fn render_header(&self, _file_type: &FileType, fields: &[HeaderField], align: bool, newline: &str) -> Vec<String> {
        render_header_impl(START_TOKEN, END_TOKEN, None, fields, align, newline)
    }

    fn strip_header(
        &self,
        file_type: &FileType,
        lines: &[String],
        span: Option<(usize, usize)>,
    ) -> (Vec<String>, Option<(usize, usize)>) {
        let (anchor, _) = self.compute_anchor(lines);
        let p = &file_type.header_policy;
        strip_header_impl(
            lines,
            span,
            p.ensure_blank_after_header,
            START_TOKEN,
            END_TOKEN,
            None,
            anchor,
            p.scan_window_before,
            p.scan_window_after,
            true,
        )
    }

    fn line_has_directive(&self, line: &str, directive: &str) -> bool {
        line_has_directive_impl(line, directive, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topmark_domain::{CommentSyntax, FileType};

    fn xml_type() -> FileType {
        FileType::builder("xml").extensions(&[".xml"]).comment_syntax(CommentSyntax::XmlProlog).build()
    }

    #[test]
    fn anchors_after_prolog_and_doctype() {
        let proc = XmlPrologProcessor;
        let lines: Vec<String> = vec![
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n".into(),
            "<!DOCTYPE html>\n".into(),
            "<html></html>\n".into(),
        ];
        let insertion = proc.resolve_insertion(&xml_type(), &lines);
        assert_eq!(insertion.line, 2);
        assert!(!insertion.reflow_required);
    }

    #[test]
    fn flags_reflow_when_body_shares_prolog_line() {
        let proc = XmlPrologProcessor;
        let lines: Vec<String> = vec!["<?xml version=\"1.0\"?><html></html>\n".into()];
        let insertion = proc.resolve_insertion(&xml_type(), &lines);
        assert!(insertion.reflow_required);
    }

    #[test]
    fn multiline_doctype_internal_subset_is_skipped_whole() {
        let proc = XmlPrologProcessor;
        let lines: Vec<String> = vec![
            "<!DOCTYPE html [\n".into(),
            "  <!ENTITY foo \"bar\">\n".into(),
            "]>\n".into(),
            "<html></html>\n".into(),
        ];
        let insertion = proc.resolve_insertion(&xml_type(), &lines);
        assert_eq!(insertion.line, 3);
        assert!(!insertion.reflow_required);
    }

    #[test]
    fn finds_header_after_prolog() {
        let proc = XmlPrologProcessor;
        let ft = xml_type();
        let lines: Vec<String> = vec![
            "<?xml version=\"1.0\"?>\n".into(),
            "<!--\n".into(),
            "topmark:header:start\n".into(),
            "\n".into(),
            "file : x.xml\n".into(),
            "\n".into(),
            "topmark:header:end\n".into(),
            "-->\n".into(),
            "<root/>\n".into(),
        ];
        assert_eq!(proc.header_bounds(&ft, &lines), Some((1, 7)));
    }
}
