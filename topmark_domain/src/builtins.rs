//! Built-in file type catalog, grouped the way the upstream definitions are:
//! core/curly-brace languages, scripting, data/config formats, web assets,
//! ops/infra files, and docs.

use crate::file_type::{CommentSyntax, ContentGate, FileType, FileTypeHeaderPolicy};

fn policy(supports_shebang: bool, pre_header_blank_after_block: usize) -> FileTypeHeaderPolicy {
    FileTypeHeaderPolicy {
        supports_shebang,
        pre_header_blank_after_block,
        ensure_blank_after_header: true,
        ..FileTypeHeaderPolicy::default()
    }
}

const SLASH_SLASH: CommentSyntax = CommentSyntax::Line { prefix: "// " };
const HASH: CommentSyntax = CommentSyntax::Line { prefix: "# " };
const DOUBLE_DASH: CommentSyntax = CommentSyntax::Line { prefix: "-- " };
const SEMICOLON: CommentSyntax = CommentSyntax::Line { prefix: "; " };
const SLASH_STAR: CommentSyntax = CommentSyntax::Block { start: "/*", end: "*/", line_prefix: Some(" * ") };
const XML: CommentSyntax = CommentSyntax::XmlProlog;

/// Curly-brace and compiled languages: `//` / `/* */` comments, no shebang handling.
pub fn core_langs() -> Vec<FileType> {
    vec![
        FileType::builder("c")
            .extensions(&[".c", ".h"])
            .description("C sources and headers (*.c, *.h)")
            .header_policy(policy(false, 1))
            .comment_syntax(SLASH_SLASH)
            .build(),
        FileType::builder("cpp")
            .extensions(&[".cc", ".cxx", ".cpp", ".hh", ".hpp", ".hxx"])
            .description("C++ sources and headers")
            .header_policy(policy(false, 1))
            .comment_syntax(SLASH_SLASH)
            .build(),
        FileType::builder("cs")
            .extensions(&[".cs"])
            .description("C# sources (*.cs)")
            .header_policy(policy(false, 1))
            .comment_syntax(SLASH_SLASH)
            .build(),
        FileType::builder("go")
            .extensions(&[".go"])
            .description("Go sources (*.go)")
            .header_policy(policy(false, 1))
            .comment_syntax(SLASH_SLASH)
            .build(),
        FileType::builder("java")
            .extensions(&[".java"])
            .description("Java sources (*.java)")
            .header_policy(policy(false, 1))
            .comment_syntax(SLASH_SLASH)
            .build(),
        FileType::builder("kotlin")
            .extensions(&[".kt", ".kts"])
            .description("Kotlin sources (*.kt, *.kts)")
            .header_policy(policy(false, 1))
            .comment_syntax(SLASH_SLASH)
            .build(),
        FileType::builder("rust")
            .extensions(&[".rs"])
            .description("Rust sources (*.rs)")
            .header_policy(policy(false, 1))
            .comment_syntax(SLASH_SLASH)
            .build(),
        FileType::builder("solidity")
            .extensions(&[".sol"])
            .description("Solidity smart contracts (*.sol)")
            .header_policy(policy(false, 0))
            .comment_syntax(SLASH_SLASH)
            .build(),
        FileType::builder("swift")
            .extensions(&[".swift"])
            .description("Swift sources (*.swift)")
            .header_policy(policy(false, 1))
            .comment_syntax(SLASH_SLASH)
            .build(),
    ]
}

/// Interpreter-driven languages: commonly shebanged, may carry encoding pragmas.
pub fn scripting() -> Vec<FileType> {
    vec![
        FileType::builder("julia")
            .extensions(&[".jl"])
            .description("Julia source files (*.jl)")
            .header_policy(policy(true, 1))
            .comment_syntax(HASH)
            .build(),
        FileType::builder("makefile")
            .filenames(&["Makefile", "makefile"])
            .description("Make build scripts (Makefile)")
            .header_policy(policy(false, 0))
            .comment_syntax(HASH)
            .build(),
        FileType::builder("perl")
            .extensions(&[".pl", ".pm"])
            .description("Perl scripts/modules (*.pl, *.pm)")
            .header_policy(policy(true, 1))
            .comment_syntax(HASH)
            .build(),
        FileType::builder("python")
            .extensions(&[".py"])
            .description("Python source files (*.py)")
            .header_policy(FileTypeHeaderPolicy {
                supports_shebang: true,
                encoding_line_regex: Some(r"coding[:=]\s*([-\w.]+)"),
                pre_header_blank_after_block: 1,
                ensure_blank_after_header: true,
                ..FileTypeHeaderPolicy::default()
            })
            .comment_syntax(HASH)
            .build(),
        FileType::builder("python-stub")
            .extensions(&[".pyi"])
            .description("Python type stub files (*.pyi)")
            .header_policy(policy(false, 0))
            .comment_syntax(HASH)
            .build(),
        FileType::builder("r")
            .extensions(&[".R", ".r"])
            .description("R scripts (*.R, *.r)")
            .header_policy(policy(true, 1))
            .comment_syntax(HASH)
            .build(),
        FileType::builder("ruby")
            .extensions(&[".rb"])
            .description("Ruby source files (*.rb)")
            .header_policy(FileTypeHeaderPolicy {
                supports_shebang: true,
                encoding_line_regex: Some(r"(coding|encoding)[:=]\s*([-\w.]+)"),
                pre_header_blank_after_block: 1,
                ensure_blank_after_header: true,
                ..FileTypeHeaderPolicy::default()
            })
            .comment_syntax(HASH)
            .build(),
        FileType::builder("shell")
            .extensions(&[".sh", ".bash", ".zsh"])
            .description("POSIX/Bash/Zsh shell scripts")
            .header_policy(policy(true, 1))
            .comment_syntax(HASH)
            .build(),
    ]
}

/// Structured data and config formats. Plain JSON and the PEP 561 marker are
/// recognized but not processed: neither format tolerates a comment block.
pub fn data() -> Vec<FileType> {
    vec![
        FileType::builder("ini")
            .extensions(&[".ini", ".cfg"])
            .filenames(&[".editorconfig", ".pypirc", ".pypirc.example", "pip.conf"])
            .description("INI-style configuration files")
            .header_policy(policy(false, 1))
            .comment_syntax(SEMICOLON)
            .build(),
        FileType::builder("json")
            .extensions(&[".json"])
            .description("JSON (no comments; unheaderable)")
            .skip_processing(true)
            .build(),
        FileType::builder("jsonc")
            .extensions(&[".json"])
            .description("JSON with comments (JSONC/CJSON)")
            .content_matcher(ContentGate::IfExtension, super::filetype_detectors::jsonc_matcher())
            .header_policy(policy(false, 1))
            .comment_syntax(SLASH_SLASH)
            .build(),
        FileType::builder("python-requirements")
            .patterns(&[r"requirements.*\.(in|txt)$", r"constraints.*\.txt$"])
            .description("Python dependency/constraints files")
            .header_policy(policy(false, 1))
            .comment_syntax(HASH)
            .build(),
        FileType::builder("python-typed-marker")
            .filenames(&["py.typed"])
            .description("PEP 561 marker (single-token file)")
            .skip_processing(true)
            .build(),
        FileType::builder("toml")
            .extensions(&[".toml"])
            .description("Tom's Obvious Minimal Language (*.toml)")
            .header_policy(policy(false, 0))
            .comment_syntax(HASH)
            .build(),
        FileType::builder("vscode-jsonc")
            .filenames(&[".vscode/settings.json", ".vscode/extensions.json"])
            .description("VS Code JSON with comments (JSONC)")
            .header_policy(policy(false, 1))
            .comment_syntax(SLASH_SLASH)
            .build(),
        FileType::builder("yaml")
            .extensions(&[".yaml", ".yml"])
            .description("YAML files (*.yaml, *.yml)")
            .header_policy(policy(false, 0))
            .comment_syntax(HASH)
            .build(),
    ]
}

/// Web/frontend assets: markup via the XML char-offset processor family,
/// stylesheets and scripts via line/block comments.
pub fn web() -> Vec<FileType> {
    vec![
        FileType::builder("css")
            .extensions(&[".css"])
            .description("Cascading Style Sheets (CSS)")
            .header_policy(policy(false, 0))
            .comment_syntax(SLASH_STAR)
            .build(),
        FileType::builder("html")
            .extensions(&[".html"])
            .description("HyperText Markup Language (HTML)")
            .comment_syntax(XML)
            .pre_insert_checker(super::filetype_detectors::xml_prolog_root_checker())
            .build(),
        FileType::builder("javascript")
            .extensions(&[".js", ".mjs", ".cjs", ".jsx"])
            .description("JavaScript sources")
            .header_policy(policy(true, 1))
            .comment_syntax(SLASH_SLASH)
            .build(),
        FileType::builder("less")
            .extensions(&[".less"])
            .description("Less stylesheets (*.less)")
            .header_policy(policy(false, 0))
            .comment_syntax(SLASH_STAR)
            .build(),
        FileType::builder("scss")
            .extensions(&[".scss"])
            .description("Sass SCSS syntax (*.scss)")
            .header_policy(policy(false, 0))
            .comment_syntax(SLASH_STAR)
            .build(),
        FileType::builder("stylus")
            .extensions(&[".styl"])
            .description("Stylus stylesheets (*.styl)")
            .header_policy(policy(false, 0))
            .comment_syntax(SLASH_STAR)
            .build(),
        FileType::builder("svelte")
            .extensions(&[".svelte"])
            .description("Svelte component files")
            .comment_syntax(XML)
            .pre_insert_checker(super::filetype_detectors::xml_prolog_root_checker())
            .build(),
        FileType::builder("svg")
            .extensions(&[".svg"])
            .description("Scalable Vector Graphics (SVG)")
            .comment_syntax(XML)
            .pre_insert_checker(super::filetype_detectors::xml_prolog_root_checker())
            .build(),
        FileType::builder("typescript")
            .extensions(&[".ts", ".tsx", ".mts", ".cts"])
            .description("TypeScript sources")
            .header_policy(policy(true, 1))
            .comment_syntax(SLASH_SLASH)
            .build(),
        FileType::builder("vue")
            .extensions(&[".vue"])
            .description("Vue Single-File Components")
            .comment_syntax(XML)
            .pre_insert_checker(super::filetype_detectors::xml_prolog_root_checker())
            .build(),
        FileType::builder("xhtml")
            .extensions(&[".xhtml", ".xht"])
            .description("XHTML documents")
            .comment_syntax(XML)
            .pre_insert_checker(super::filetype_detectors::xml_prolog_root_checker())
            .build(),
        FileType::builder("xml")
            .extensions(&[".xml"])
            .filenames(&["pom.xml"])
            .description("Extensible Markup Language (XML)")
            .comment_syntax(XML)
            .pre_insert_checker(super::filetype_detectors::xml_prolog_root_checker())
            .build(),
        FileType::builder("xsl")
            .extensions(&[".xsl"])
            .description("XSL stylesheets")
            .comment_syntax(XML)
            .pre_insert_checker(super::filetype_detectors::xml_prolog_root_checker())
            .build(),
        FileType::builder("xslt")
            .extensions(&[".xslt"])
            .description("XSLT stylesheets")
            .comment_syntax(XML)
            .pre_insert_checker(super::filetype_detectors::xml_prolog_root_checker())
            .build(),
    ]
}

/// Operations and infrastructure artifacts.
pub fn ops() -> Vec<FileType> {
    vec![
        FileType::builder("dockerfile")
            .filenames(&["Dockerfile"])
            .patterns(&[r"Dockerfile(\..+)?"])
            .description("Dockerfiles")
            .header_policy(policy(false, 1))
            .comment_syntax(HASH)
            .build(),
        FileType::builder("env")
            .filenames(&[".env"])
            .patterns(&[r"\.env\..*"])
            .description("Environment variable definition files (.env, .env.*)")
            .header_policy(policy(true, 1))
            .comment_syntax(HASH)
            .build(),
        FileType::builder("git-meta")
            .filenames(&[".gitignore", ".gitattributes"])
            .description("Git metadata files (.gitignore, .gitattributes)")
            .header_policy(policy(false, 1))
            .comment_syntax(HASH)
            .build(),
        FileType::builder("sql")
            .extensions(&[".sql"])
            .description("SQL scripts (*.sql)")
            .header_policy(policy(false, 0))
            .comment_syntax(DOUBLE_DASH)
            .build(),
    ]
}

/// Documentation and text artifacts.
pub fn docs() -> Vec<FileType> {
    vec![
        FileType::builder("license_text")
            .filenames(&["LICENSE", "LICENSE.txt"])
            .description("License text (keep verbatim)")
            .skip_processing(true)
            .build(),
        FileType::builder("markdown")
            .extensions(&[".md", ".markdown"])
            .description("MarkDown source files (*.md)")
            .header_policy(policy(false, 0))
            .comment_syntax(CommentSyntax::Block { start: "<!--", end: "-->", line_prefix: None })
            .build(),
    ]
}

/// All built-in file types, in the same grouping order the catalog is presented in.
pub fn catalog() -> Vec<FileType> {
    let mut all = Vec::new();
    all.extend(core_langs());
    all.extend(scripting());
    all.extend(data());
    all.extend(web());
    all.extend(ops());
    all.extend(docs());
    all
}
