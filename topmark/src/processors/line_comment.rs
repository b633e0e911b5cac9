//! Line-comment family: `# `, `// `, `-- `, `; ` and similar per-line prefixes.
//!
//! Shebang and encoding-pragma placement is handled entirely by
//! [`HeaderProcessor::header_insertion_index`]'s default implementation,
//! driven by the file type's `header_policy` — this processor only supplies
//! the comment-specific bits: how a directive line looks, how fields render,
//! and how an existing header is found/stripped.

use topmark_domain::FileType;

use super::{permissive_bounds, remove_span, strip_eol, HeaderField, HeaderProcessor, END_MARKER, START_MARKER};

pub struct LineCommentProcessor {
    pub prefix: &'static str,
}

/// Renders `{prefix}{content}`, trimming trailing whitespace left by an
/// empty `content` (the intentional blank spacer lines around the payload).
fn render_line(prefix: &str, content: &str, newline: &str) -> String {
    let mut s = format!("{prefix}{content}");
    let trimmed_len = s.trim_end().len();
    s.truncate(trimmed_len);
    s.push_str(newline);
    s
}

impl HeaderProcessor for LineCommentProcessor {
    fn header_bounds(&self, file_type: &FileType, lines: &[String]) -> Option<(usize, usize)> {
        let anchor = self.header_insertion_index(file_type, lines);
        for i in 0..lines.len() {
            if !self.validate_header_location(file_type, i, anchor) {
                continue;
            }
            if !self.line_has_directive(&lines[i], START_MARKER) {
                continue;
            }
            for j in (i + 1)..lines.len() {
                if self.line_has_directive(&lines[j], END_MARKER) {
                    return Some((i, j));
                }
            }
            // Start marker with no closing end: not a candidate this processor accepts.
            return None;
        }
        None
    }

    fn parse_fields(&self, header_lines: &[String]) -> Vec<HeaderField> {
        let stripped_prefix = self.prefix.trim_end();
        let mut out = Vec::new();
        for raw in header_lines {
            let l = strip_eol(raw).trim_start();
            let content = l.strip_prefix(stripped_prefix).unwrap_or(l).trim();
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

    fn line_content(&self, line: &str) -> String {
        let l = strip_eol(line).trim_start();
        l.strip_prefix(self.prefix.trim_end()).unwrap_or(l).trim().to_string()
    }

    fn render_header(&self, _file_type: &FileType, fields: &[HeaderField], align: bool, newline: &str) -> Vec<String> {
        let width = if align { fields.iter().map(|f| f.key.chars().count()).max().unwrap_or(0) } else { 0 };
        let mut out = Vec::with_capacity(fields.len() + 4);
        out.push(render_line(self.prefix, START_MARKER, newline));
        out.push(render_line(self.prefix, "", newline));
        for f in fields {
            let content = if align {
                format!("  {:<width$} : {}", f.key, f.value, width = width)
            } else {
                format!("  {} : {}", f.key, f.value)
            };
            out.push(render_line(self.prefix, &content, newline));
        }
        out.push(render_line(self.prefix, "", newline));
        out.push(render_line(self.prefix, END_MARKER, newline));
        out
    }

    fn strip_header(
        &self,
        file_type: &FileType,
        lines: &[String],
        span: Option<(usize, usize)>,
    ) -> (Vec<String>, Option<(usize, usize)>) {
        let resolved = span
            .or_else(|| self.header_bounds(file_type, lines))
            .or_else(|| permissive_bounds(lines, |l, d| self.line_has_directive(l, d)));
        match resolved {
            Some(sp) => (remove_span(lines, sp), Some(sp)),
            None => (lines.to_vec(), None),
        }
    }

    fn line_has_directive(&self, line: &str, directive: &str) -> bool {
        let l = strip_eol(line).trim_start();
        let without_prefix = l.strip_prefix(self.prefix.trim_end()).unwrap_or(l);
        without_prefix.trim() == directive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topmark_domain::{CommentSyntax, FileType, FileTypeHeaderPolicy};

    fn python_type() -> FileType {
        FileType::builder("python")
            .extensions(&[".py"])
            .header_policy(FileTypeHeaderPolicy {
                supports_shebang: true,
                encoding_line_regex: Some(r"coding[:=]\s*([-\w.]+)"),
                pre_header_blank_after_block: 1,
                ensure_blank_after_header: true,
                ..FileTypeHeaderPolicy::default()
            })
            .comment_syntax(CommentSyntax::Line { prefix: "# " })
            .build()
    }

    #[test]
    fn renders_aligned_fields() {
        let proc = LineCommentProcessor { prefix: "# " };
        let fields = vec![
            HeaderField { key: "file".into(), value: "x.py".into() },
            HeaderField { key: "project".into(), value: "TopMark".into() },
            HeaderField { key: "license".into(), value: "MIT".into() },
        ];
        let lines = proc.render_header(&python_type(), &fields, true, "\n");
        assert_eq!(lines[0], "# topmark:header:start\n");
        assert_eq!(lines[1], "#\n");
        assert_eq!(lines[2], "#   file    : x.py\n");
        assert_eq!(lines[3], "#   project : TopMark\n");
        assert_eq!(lines[4], "#   license : MIT\n");
        assert_eq!(lines[5], "#\n");
        assert_eq!(lines[6], "# topmark:header:end\n");
    }

    #[test]
    fn detects_header_after_shebang_and_encoding() {
        let proc = LineCommentProcessor { prefix: "# " };
        let ft = python_type();
        let lines: Vec<String> = vec![
            "#!/usr/bin/env python3\n".into(),
            "# coding: utf-8\n".into(),
            "\n".into(),
            "# topmark:header:start\n".into(),
            "#\n".into(),
            "#   file : x.py\n".into(),
            "#\n".into(),
            "# topmark:header:end\n".into(),
            "\n".into(),
            "print(1)\n".into(),
        ];
        let bounds = proc.header_bounds(&ft, &lines);
        assert_eq!(bounds, Some((3, 7)));
        let fields = proc.parse_fields(&lines[4..7]);
        assert_eq!(fields, vec![HeaderField { key: "file".into(), value: "x.py".into() }]);
    }

    #[test]
    fn parse_fields_skips_malformed_lines_without_escalating() {
        let proc = LineCommentProcessor { prefix: "# " };
        let payload = vec!["#\n".to_string(), "# not-a-field-line\n".to_string(), "#   ok : yes\n".to_string()];
        let fields = proc.parse_fields(&payload);
        assert_eq!(fields, vec![HeaderField { key: "ok".into(), value: "yes".into() }]);
    }
}
