//! Header processor families.
//!
//! A [`HeaderProcessor`] knows how to place, find, parse, render, and strip a
//! topmark header for one comment-syntax family. The pipeline steps
//! (scanner, builder, renderer, stripper) drive a processor; they don't
//! implement format-specific logic themselves.

pub mod block_comment;
pub mod line_comment;
pub mod xml;

use topmark_domain::FileType;

pub const START_MARKER: &str = "topmark:header:start";
pub const END_MARKER: &str = "topmark:header:end";

/// Sentinel returned by [`HeaderProcessor::header_insertion_index`] when no
/// line-based anchor applies (the XML family inserts at a char offset instead).
pub const NO_LINE_ANCHOR: usize = usize::MAX;

/// A parsed header field, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub key: String,
    pub value: String,
}

/// Behavior shared by the line-comment, block-comment, and XML processor
/// families. Each method mirrors one step of the per-file pipeline.
pub trait HeaderProcessor: Send + Sync {
    /// Index in `file_lines` at which a new header would be inserted,
    /// honoring shebang/encoding-pragma placement from the file type's
    /// `header_policy`. Returns [`NO_LINE_ANCHOR`] for char-offset processors.
    fn header_insertion_index(&self, file_type: &FileType, file_lines: &[String]) -> usize {
        let policy = &file_type.header_policy;
        let mut index = 0usize;
        let mut shebang_present = false;

        if policy.supports_shebang && file_lines.first().is_some_and(|l| l.starts_with("#!")) {
            shebang_present = true;
            index = 1;

            if let Some(re_src) = policy.encoding_line_regex {
                if let Some(line) = file_lines.get(index) {
                    if let Ok(re) = regex::Regex::new(re_src) {
                        if re.is_match(line) {
                            index += 1;
                        }
                    }
                }
            }
        }

        if shebang_present && file_lines.get(index).is_some_and(|l| l.trim().is_empty()) {
            index += 1;
        }

        index
    }

    /// Whether a candidate header at `[start, end]` lies close enough to
    /// `anchor` to be considered the file's real header rather than an
    /// unrelated comment block elsewhere in the file.
    fn validate_header_location(&self, file_type: &FileType, start: usize, anchor: usize) -> bool {
        let policy = &file_type.header_policy;
        let before = policy.scan_window_before as isize;
        let after = policy.scan_window_after as isize;
        let start = start as isize;
        let anchor = anchor as isize;
        (anchor - before) <= start && start <= (anchor + after)
    }

    /// Locates the inclusive `(start, end)` line span of an existing header, if any.
    fn header_bounds(&self, file_type: &FileType, lines: &[String]) -> Option<(usize, usize)>;

    /// Parses `key: value` fields from the payload between the START/END markers.
    fn parse_fields(&self, header_lines: &[String]) -> Vec<HeaderField>;

    /// Strips this family's comment affixes from one payload line, returning
    /// the remaining content (empty for an intentional blank spacer line).
    /// Used by the Scanner to tell a genuinely empty header apart from one
    /// whose payload lines failed to parse as fields.
    fn line_content(&self, line: &str) -> String;

    /// Renders a complete header block (markers, fields, comment affixes) for insertion.
    fn render_header(&self, file_type: &FileType, fields: &[HeaderField], align: bool, newline: &str) -> Vec<String>;

    /// Removes the header at `span` (or locates one permissively if `span` is `None`).
    ///
    /// Returns the updated lines and the span actually removed.
    fn strip_header(
        &self,
        file_type: &FileType,
        lines: &[String],
        span: Option<(usize, usize)>,
    ) -> (Vec<String>, Option<(usize, usize)>);

    /// Whether a line matches `directive` once this processor's comment
    /// affixes are stripped (used to locate START/END markers).
    fn line_has_directive(&self, line: &str, directive: &str) -> bool;

    /// Where a brand-new header would land in a file that has none yet.
    ///
    /// The line/block families resolve this from [`Self::header_insertion_index`]
    /// plus the file type's `pre_header_blank_after_block`; char-offset
    /// families (XML) override this to also report whether insertion would
    /// reflow an existing physical line.
    ///
    /// `needs_leading_blank` only fires when the anchor sits after some
    /// preceding block (`line > 0`, e.g. past a shebang/encoding pragma) and
    /// that block isn't already separated from the anchor by a blank line —
    /// `header_insertion_index` consumes one existing blank as part of
    /// computing the anchor itself, so a blank immediately preceding the
    /// anchor means one was already consumed and shouldn't be duplicated.
    fn resolve_insertion(&self, file_type: &FileType, lines: &[String]) -> Insertion {
        let line = self.header_insertion_index(file_type, lines);
        let immediate_blank_before =
            line > 0 && lines.get(line - 1).is_some_and(|l| strip_eol(l).trim().is_empty());
        let needs_leading_blank =
            line > 0 && file_type.header_policy.pre_header_blank_after_block > 0 && !immediate_blank_before;
        Insertion { line, needs_leading_blank, reflow_required: false }
    }
}

/// Permissive fallback shared by every family: accept an exact directive
/// match *or* the marker appearing anywhere in the line (e.g. inside a
/// single-line `<!-- ... -->` wrapper). Used only once policy-aware
/// detection in [`HeaderProcessor::header_bounds`] has failed.
pub fn permissive_bounds(lines: &[String], line_has_directive: impl Fn(&str, &str) -> bool) -> Option<(usize, usize)> {
    let n = lines.len();
    let mut i = 0;
    while i < n {
        let start_match = line_has_directive(&lines[i], START_MARKER) || lines[i].contains(START_MARKER);
        if start_match {
            let mut j = i + 1;
            while j < n {
                let end_match = line_has_directive(&lines[j], END_MARKER) || lines[j].contains(END_MARKER);
                if end_match {
                    return Some((i, j));
                }
                j += 1;
            }
        }
        i += 1;
    }
    None
}

/// Removes `span` from `lines`, trimming exactly one leading blank line left
/// behind when the removed block was at the very top of the file.
pub fn remove_span(lines: &[String], span: (usize, usize)) -> Vec<String> {
    let (start, end) = span;
    let mut new_lines: Vec<String> = Vec::with_capacity(lines.len().saturating_sub(end - start + 1));
    new_lines.extend_from_slice(&lines[..start]);
    new_lines.extend_from_slice(&lines[end + 1..]);
    if start == 0 {
        if let Some(first) = new_lines.first() {
            if first.trim().is_empty() {
                new_lines.remove(0);
            }
        }
    }
    new_lines
}

/// Strips a line's trailing `\n`/`\r\n`/`\r` terminator, if any.
pub fn strip_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Where and how a new header would be inserted into a file that has none yet.
#[derive(Debug, Clone, Copy)]
pub struct Insertion {
    /// Line index the header's first line should occupy.
    pub line: usize,
    /// Whether a blank line must be ensured immediately before the header
    /// (e.g. after a shebang/encoding-pragma block).
    pub needs_leading_blank: bool,
    /// Whether placing the header here would split an existing physical
    /// line in two (XML prolog/DOCTYPE sharing a line with body content).
    /// Gated by `Policy::allow_reflow`.
    pub reflow_required: bool,
}

