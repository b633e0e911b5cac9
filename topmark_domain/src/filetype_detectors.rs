//! Content-based file type detectors, consulted only when name rules are
//! inconclusive (see [`crate::file_type::ContentGate`]), plus the
//! pre-insert advisory checkers bound via [`crate::file_type::FileTypeBuilder::pre_insert_checker`].

use std::fs;
use std::path::Path;

use crate::file_type::{ContentMatcher, InsertCapability, InsertChecker, InsertCheckResult, PreInsertView};

/// Heuristic for "JSON with comments": true if the file contains `//` or
/// `/*` anywhere. Deliberately simple — a content matcher must stay fast and
/// side-effect free, not parse JSON to rule out a `//` inside a string.
fn looks_like_jsonc(path: &Path) -> bool {
    let Ok(text) = fs::read_to_string(path) else {
        return false;
    };
    text.contains("//") || text.contains("/*")
}

pub fn jsonc_matcher() -> ContentMatcher {
    std::sync::Arc::new(looks_like_jsonc)
}

/// Skips over an optional `<?xml ... ?>` declaration at the front of `text`,
/// returning the remainder (unchanged if no declaration is present).
fn skip_xml_decl(text: &str) -> &str {
    let t = text.trim_start();
    if let Some(rest) = t.strip_prefix("<?xml") {
        match rest.find("?>") {
            Some(end) => &rest[end + 2..],
            None => "",
        }
    } else {
        t
    }
}

/// Skips over an optional `<!DOCTYPE ...>` (including a multi-line internal
/// subset `[ ... ]`) at the front of `text`, returning the remainder.
fn skip_doctype(text: &str) -> &str {
    let t = text.trim_start();
    let Some(rest) = t.strip_prefix("<!DOCTYPE") else { return t };
    let mut depth = 0i32;
    for (i, ch) in rest.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth -= 1,
            '>' if depth <= 0 => return &rest[i + 1..],
            _ => {}
        }
    }
    ""
}

/// Boundary case from spec.md §8.3: an XML-family file consisting only of a
/// prolog/DOCTYPE with no root element has nothing sensible to anchor a
/// header after, independent of whether the prolog itself would also need a
/// reflow. Bound as `pre_insert_checker` on the XML-family builtins.
fn xml_has_root_element(view: &PreInsertView) -> InsertCheckResult {
    let Some(lines) = view.file_lines else {
        return InsertCheckResult::ok();
    };
    let joined: String = lines.iter().map(|l| l.as_str()).collect();
    let after_decl = skip_xml_decl(&joined);
    let after_doctype = skip_doctype(after_decl);
    if after_doctype.trim().is_empty() {
        InsertCheckResult::skip(
            InsertCapability::SkipUnsupportedContent,
            "file has a prolog/DOCTYPE but no root element to anchor a header after",
        )
    } else {
        InsertCheckResult::ok()
    }
}

pub fn xml_prolog_root_checker() -> InsertChecker {
    std::sync::Arc::new(xml_has_root_element)
}
