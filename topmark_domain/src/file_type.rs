//! File type recognition: what a file *is*, and whether/how a header may be
//! placed in it. No I/O happens here beyond the path-string matching done in
//! [`FileType::matches`]; the file content a [`ContentMatcher`] inspects is
//! handed to it by the caller.

use std::path::Path;
use std::sync::Arc;

/// Controls *when* [`FileType::content_matcher`] may run, so name-ambiguous
/// formats (e.g. Markdown containing `//`) don't trigger a content probe that
/// was only meant for a different family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentGate {
    Never,
    IfExtension,
    IfFilename,
    IfPattern,
    IfAnyNameRule,
    /// Probe only when the type declares no name rules at all (pure content types).
    IfNone,
    Always,
}

/// A fast, side-effect-free content probe. Must not panic; a matcher that
/// cannot decide should return `false`, not propagate an error.
pub type ContentMatcher = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

/// Advisory verdict from a [`FileType`]'s `pre_insert_checker`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertCapability {
    Unevaluated,
    Ok,
    SkipUnsupportedContent,
    SkipPolicy,
    SkipReadonly,
    SkipIdempotenceRisk,
    SkipOther,
}

#[derive(Debug, Clone)]
pub struct InsertCheckResult {
    pub capability: InsertCapability,
    pub reason: Option<String>,
}

impl InsertCheckResult {
    pub fn ok() -> Self {
        Self { capability: InsertCapability::Ok, reason: None }
    }

    pub fn skip(capability: InsertCapability, reason: impl Into<String>) -> Self {
        Self { capability, reason: Some(reason.into()) }
    }
}

/// Minimal, read-only view a pre-insert checker needs — deliberately narrower
/// than the full `ProcessingContext` so checkers don't take on a dependency
/// they don't need.
pub struct PreInsertView<'a> {
    pub file_lines: Option<&'a [String]>,
    pub newline_style: &'a str,
}

pub type InsertChecker = Arc<dyn Fn(&PreInsertView) -> InsertCheckResult + Send + Sync>;

/// Comment syntax a header processor family needs to place and recognize a
/// header block. Pure data: the insertion/scan/strip algorithms that consume
/// it live with the concrete processor implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSyntax {
    /// Per-line comment prefix, e.g. `"# "` for Python, `"// "` for Rust.
    Line { prefix: &'static str },
    /// Delimited block comment, e.g. `/* ... */`. `line_prefix` is an optional
    /// per-line marker inside the block (e.g. `" * "` for Javadoc-style).
    Block { start: &'static str, end: &'static str, line_prefix: Option<&'static str> },
    /// XML/HTML-family char-offset insertion inside a `<!-- ... -->` comment.
    XmlProlog,
    /// File type is recognized but carries no comment syntax (see `skip_processing`).
    None,
}

/// Placement tuning for one [`FileType`].
///
/// Defaults mirror a plain language with no shebang and a two-line scan
/// window after the anchor (`scan_window_before = 0`, `scan_window_after = 2`).
#[derive(Debug, Clone, Copy)]
pub struct FileTypeHeaderPolicy {
    /// Whether a `#!` shebang on line 1 is recognized and preserved above the header.
    pub supports_shebang: bool,
    /// Regex (matched with `regex::Regex::new`) identifying a PEP 263-style
    /// encoding pragma line that must also stay above the header.
    pub encoding_line_regex: Option<&'static str>,
    /// Blank lines required before the header when preceded by a shebang/encoding block.
    pub pre_header_blank_after_block: usize,
    /// Whether a blank line should be ensured immediately after the header.
    pub ensure_blank_after_header: bool,
    /// Lines to look backward from the insertion anchor for an existing header.
    pub scan_window_before: usize,
    /// Lines to look forward from the insertion anchor for an existing header.
    pub scan_window_after: usize,
}

impl Default for FileTypeHeaderPolicy {
    fn default() -> Self {
        Self {
            supports_shebang: false,
            encoding_line_regex: None,
            pre_header_blank_after_block: 0,
            ensure_blank_after_header: true,
            scan_window_before: 0,
            scan_window_after: 2,
        }
    }
}

/// A file type recognized by topmark: how it's identified on disk, and
/// whether/how it's eligible for header processing.
///
/// `matches` tries, in order, extension, filename/tail, and pattern rules;
/// only if those are inconclusive (or `content_gate` demands it) does it
/// consult `content_matcher`.
#[derive(Clone)]
pub struct FileType {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub filenames: &'static [&'static str],
    pub patterns: &'static [&'static str],
    pub description: &'static str,
    /// Recognized but header processing intentionally skipped (e.g. plain JSON, LICENSE).
    pub skip_processing: bool,
    pub content_matcher: Option<ContentMatcher>,
    pub content_gate: ContentGate,
    pub header_policy: FileTypeHeaderPolicy,
    pub comment_syntax: CommentSyntax,
    pub pre_insert_checker: Option<InsertChecker>,
    compiled_patterns: Option<Arc<[regex::Regex]>>,
}

impl std::fmt::Debug for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileType")
            .field("name", &self.name)
            .field("extensions", &self.extensions)
            .field("filenames", &self.filenames)
            .field("patterns", &self.patterns)
            .field("skip_processing", &self.skip_processing)
            .field("content_gate", &self.content_gate)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchedBy {
    Extension,
    Pattern,
    Filename,
}

impl MatchedBy {
    fn base_rank(self) -> u8 {
        match self {
            MatchedBy::Extension => 1,
            MatchedBy::Pattern => 2,
            MatchedBy::Filename => 3,
        }
    }
}

impl FileType {
    pub fn builder(name: &'static str) -> FileTypeBuilder {
        FileTypeBuilder::new(name)
    }

    fn matched_by_name(&self, path: &Path) -> Option<MatchedBy> {
        if !self.extensions.is_empty() {
            if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                let dotted = format!(".{ext}");
                if self.extensions.contains(&dotted.as_str()) {
                    return Some(MatchedBy::Extension);
                }
            }
        }

        if !self.filenames.is_empty() {
            let basename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            let posix = path.to_string_lossy().replace('\\', "/");
            for fname in self.filenames {
                if fname.contains('/') {
                    if posix.ends_with(fname) {
                        return Some(MatchedBy::Filename);
                    }
                } else if basename == *fname {
                    return Some(MatchedBy::Filename);
                }
            }
        }

        if !self.patterns.is_empty() {
            if let Some(compiled) = &self.compiled_patterns {
                let basename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                for re in compiled.iter() {
                    if re
                        .find(basename)
                        .is_some_and(|m| m.start() == 0 && m.end() == basename.len())
                    {
                        return Some(MatchedBy::Pattern);
                    }
                }
            }
        }

        None
    }

    /// Whether `content_matcher` should run given the name rule observed,
    /// and, if it ran, what it returned.
    fn content_probe(&self, path: &Path, matched_by: Option<MatchedBy>) -> Option<bool> {
        let matcher = self.content_matcher.as_ref()?;
        let allow_by_gate = match self.content_gate {
            ContentGate::Never => false,
            ContentGate::IfExtension => matches!(matched_by, Some(MatchedBy::Extension)),
            ContentGate::IfFilename => matches!(matched_by, Some(MatchedBy::Filename)),
            ContentGate::IfPattern => matches!(matched_by, Some(MatchedBy::Pattern)),
            ContentGate::IfAnyNameRule => matched_by.is_some(),
            ContentGate::IfNone => {
                self.extensions.is_empty() && self.filenames.is_empty() && self.patterns.is_empty()
            }
            ContentGate::Always => true,
        };
        allow_by_gate.then(|| matcher(path))
    }

    /// Determines whether `path` belongs to this file type.
    ///
    /// Content probing only runs when a name rule is inconclusive and the
    /// `content_gate` allows it for the matched-by kind observed.
    pub fn matches(&self, path: &Path) -> bool {
        let matched_by = self.matched_by_name(path);
        match self.content_probe(path, matched_by) {
            Some(content_ok) => content_ok,
            None => matched_by.is_some(),
        }
    }

    /// Specificity score used by [`crate::registry::FileTypeRegistry::resolve`]
    /// to pick among several file types that both match the same path.
    ///
    /// `None` if `path` doesn't match this type at all. Otherwise
    /// `base_rank * 2 + content_bonus`, where `base_rank` favors an exact
    /// filename match over a pattern over a bare extension (0 when the type
    /// has no name rules at all and matched purely on content), and
    /// `content_bonus` is 1 when a content probe ran and confirmed the match.
    pub fn match_score(&self, path: &Path) -> Option<u8> {
        let matched_by = self.matched_by_name(path);
        let content_result = self.content_probe(path, matched_by);
        let matched = match content_result {
            Some(content_ok) => content_ok,
            None => matched_by.is_some(),
        };
        if !matched {
            return None;
        }

        let base = matched_by.map(MatchedBy::base_rank).unwrap_or(0);
        let bonus = u8::from(content_result == Some(true));
        Some(base * 2 + bonus)
    }
}

/// Builds a [`FileType`], pre-compiling its regex patterns once at
/// registration time rather than lazily on first match.
pub struct FileTypeBuilder {
    inner: FileType,
}

impl FileTypeBuilder {
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: FileType {
                name,
                extensions: &[],
                filenames: &[],
                patterns: &[],
                description: "",
                skip_processing: false,
                content_matcher: None,
                content_gate: ContentGate::Never,
                header_policy: FileTypeHeaderPolicy::default(),
                comment_syntax: CommentSyntax::None,
                pre_insert_checker: None,
                compiled_patterns: None,
            },
        }
    }

    pub fn extensions(mut self, v: &'static [&'static str]) -> Self {
        self.inner.extensions = v;
        self
    }

    pub fn filenames(mut self, v: &'static [&'static str]) -> Self {
        self.inner.filenames = v;
        self
    }

    pub fn patterns(mut self, v: &'static [&'static str]) -> Self {
        self.inner.patterns = v;
        self
    }

    pub fn description(mut self, v: &'static str) -> Self {
        self.inner.description = v;
        self
    }

    pub fn skip_processing(mut self, v: bool) -> Self {
        self.inner.skip_processing = v;
        self
    }

    pub fn content_matcher(mut self, gate: ContentGate, matcher: ContentMatcher) -> Self {
        self.inner.content_gate = gate;
        self.inner.content_matcher = Some(matcher);
        self
    }

    pub fn header_policy(mut self, v: FileTypeHeaderPolicy) -> Self {
        self.inner.header_policy = v;
        self
    }

    pub fn comment_syntax(mut self, v: CommentSyntax) -> Self {
        self.inner.comment_syntax = v;
        self
    }

    pub fn pre_insert_checker(mut self, v: InsertChecker) -> Self {
        self.inner.pre_insert_checker = Some(v);
        self
    }

    /// Compiles `patterns` and returns the finished [`FileType`].
    ///
    /// A malformed pattern is dropped rather than propagated: a file type
    /// with a broken regex should fall back to its other name rules, not
    /// take down registry construction.
    pub fn build(mut self) -> FileType {
        if !self.inner.patterns.is_empty() {
            let compiled: Vec<regex::Regex> =
                self.inner.patterns.iter().filter_map(|p| regex::Regex::new(p).ok()).collect();
            self.inner.compiled_patterns = Some(Arc::from(compiled));
        }
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn filename_ranks_above_pattern_above_extension() {
        let by_ext = FileType::builder("a").extensions(&[".cfg"]).build();
        let by_pattern = FileType::builder("b").patterns(&[r".*\.local\.cfg"]).build();
        let by_name = FileType::builder("c").filenames(&["app.local.cfg"]).build();

        let path = PathBuf::from("app.local.cfg");
        assert!(by_ext.match_score(&path).unwrap() < by_pattern.match_score(&path).unwrap());
        assert!(by_pattern.match_score(&path).unwrap() < by_name.match_score(&path).unwrap());
    }

    #[test]
    fn content_confirmation_adds_one() {
        let plain = FileType::builder("a").extensions(&[".json"]).build();
        let confirmed = FileType::builder("b")
            .extensions(&[".json"])
            .content_matcher(ContentGate::IfExtension, Arc::new(|_| true))
            .build();

        let path = PathBuf::from("x.json");
        assert_eq!(plain.match_score(&path), Some(MatchedBy::Extension.base_rank() * 2));
        assert_eq!(confirmed.match_score(&path), Some(MatchedBy::Extension.base_rank() * 2 + 1));
    }

    #[test]
    fn gated_content_mismatch_rejects_the_name_match() {
        let ft = FileType::builder("a")
            .extensions(&[".json"])
            .content_matcher(ContentGate::IfExtension, Arc::new(|_| false))
            .build();
        assert_eq!(ft.match_score(&PathBuf::from("x.json")), None);
        assert!(!ft.matches(&PathBuf::from("x.json")));
    }

    #[test]
    fn no_match_returns_none() {
        let ft = FileType::builder("a").extensions(&[".rs"]).build();
        assert_eq!(ft.match_score(&PathBuf::from("x.py")), None);
    }
}
