//! Markdown and HTML patterns shared by checks and fixes.
//!
//! Checks and fixes must agree on what counts as an image, a table row or a
//! bare URL, otherwise a fix could leave behind something its check still
//! reports. Everything they both need lives here.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// `![alt](target)`; group 1 is the alt text, group 2 the target.
pub(crate) static MARKDOWN_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap());

/// Any `<img ...>` tag.
pub(crate) static HTML_IMG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").unwrap());

/// An `alt` attribute inside a tag, with its value in group 2, 3 or 4.
pub(crate) static ALT_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\s)alt\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
});

/// ATX heading on a single line (terminator stripped).
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+(\S.*?)[ \t]*$").unwrap());

/// Markdown table separator row, e.g. `| --- | :-: |`.
static TABLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\|?\s*:?[-=]+:?\s*(\|\s*:?[-=]+:?\s*)*\|?\s*$").unwrap()
});

/// `<table>...</table>` block, possibly spanning lines.
pub(crate) static HTML_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<table\b[^>]*>.*?</table>").unwrap());

/// `[text](url ...)` or `![alt](url ...)`; group 1 is `!` for images,
/// group 2 the text and group 3 the target. Link text may hold images, as in
/// linked badges: `[![Binder](badge.svg)](https://mybinder.org/...)`.
pub(crate) static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[((?:[^\[\]]|!\[[^\]]*\]\([^)]*\))*)\]\(\s*([^)\s]*)[^)]*\)").unwrap()
});

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>()\[\]"'`]+"#).unwrap());

static HTML_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b[^>]*>.*?</a>").unwrap());

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<>]*>").unwrap());

static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]*`").unwrap());

static REFERENCE_DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}\[[^\]]+\]:\s*\S").unwrap());

/// `style="...color: ..."` inline CSS.
pub(crate) static STYLE_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)style\s*=\s*["'][^"']*color\s*:"#).unwrap());

/// `<font color=...>` tag.
pub(crate) static FONT_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<font\b[^>]*\bcolor\s*=").unwrap());

/// Characters stripped from the end of a detected URL.
const URL_TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Value of the `alt` attribute of a tag; `None` when the attribute is absent.
pub(crate) fn alt_attribute(tag: &str) -> Option<&str> {
    let caps = ALT_ATTRIBUTE.captures(tag)?;
    (2..=4).find_map(|i| caps.get(i)).map(|m| m.as_str()).or(Some(""))
}

/// Strip the line terminator from a line.
pub(crate) fn line_content(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Heading level and text of a line, if it is an ATX heading.
pub(crate) fn heading(line: &str) -> Option<(usize, &str)> {
    let caps = HEADING.captures(line_content(line))?;
    let level = caps.get(1)?.as_str().len();
    let text = caps.get(2)?.as_str();
    Some((level, text))
}

/// Check if a line is a markdown table row candidate.
pub(crate) fn is_table_row(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// Check if a line is a table separator row.
pub(crate) fn is_table_separator(line: &str) -> bool {
    TABLE_SEPARATOR.is_match(line_content(line))
}

/// Line ranges of markdown table blocks outside fenced code.
///
/// A block is a run of rows starting with `|`. A separator row written
/// without a leading pipe (`---|---`) directly after a row belongs to the
/// block too.
pub(crate) fn table_blocks<S: AsRef<str>>(lines: &[S], fenced: &[bool]) -> Vec<Range<usize>> {
    let mut blocks = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if fenced[i] || !is_table_row(lines[i].as_ref()) {
            i += 1;
            continue;
        }
        let start = i;
        i += 1;
        while i < lines.len() && !fenced[i] {
            let line = lines[i].as_ref();
            let pipeless_separator = line.contains('|') && is_table_separator(line);
            if !is_table_row(line) && !pipeless_separator {
                break;
            }
            i += 1;
        }
        blocks.push(start..i);
    }
    blocks
}

/// Number of columns of a table row.
pub(crate) fn table_columns(row: &str) -> usize {
    let trimmed = line_content(row).trim();
    let pipes = trimmed.matches('|').count();
    let bounded = trimmed.len() > 1 && trimmed.starts_with('|') && trimmed.ends_with('|');
    let columns = if bounded { pipes - 1 } else { pipes };
    columns.max(1)
}

/// Separator row for a table with the given number of columns.
pub(crate) fn table_separator(columns: usize) -> String {
    format!("| {} |\n", vec!["---"; columns].join(" | "))
}

/// Mark the lines that belong to fenced code blocks, fences included.
pub(crate) fn fenced_lines<S: AsRef<str>>(lines: &[S]) -> Vec<bool> {
    let mut mask = Vec::with_capacity(lines.len());
    let mut open: Option<(char, usize)> = None;

    for line in lines {
        let trimmed = line.as_ref().trim_start();
        let fence = ['`', '~'].into_iter().find_map(|c| {
            let run = trimmed.chars().take_while(|&x| x == c).count();
            (run >= 3).then_some((c, run))
        });

        match (open, fence) {
            (None, Some(f)) => {
                open = Some(f);
                mask.push(true);
            }
            (Some((c, len)), Some((fc, flen))) if c == fc && flen >= len => {
                open = None;
                mask.push(true);
            }
            (Some(_), _) => mask.push(true),
            (None, None) => mask.push(false),
        }
    }

    mask
}

/// Check if a line is a link reference definition, e.g. `[1]: https://...`.
pub(crate) fn is_reference_definition(line: &str) -> bool {
    REFERENCE_DEFINITION.is_match(line)
}

/// Byte ranges of bare URLs in a single line.
///
/// URLs inside link or image syntax, HTML tags, anchors and inline code are
/// not bare. Callers skip fenced lines and reference definitions.
pub(crate) fn bare_url_spans(line: &str) -> Vec<Range<usize>> {
    let mut excluded: Vec<Range<usize>> = Vec::new();
    for re in [&*MARKDOWN_LINK, &*HTML_ANCHOR, &*HTML_TAG, &*INLINE_CODE] {
        excluded.extend(re.find_iter(line).map(|m| m.range()));
    }

    URL.find_iter(line)
        .filter_map(|m| {
            let url = m.as_str().trim_end_matches(URL_TRAILING_PUNCTUATION);
            let range = m.start()..m.start() + url.len();
            let inside = excluded
                .iter()
                .any(|ex| ex.start <= range.start && range.end <= ex.end);
            (!inside && url.len() > "https://".len()).then_some(range)
        })
        .collect()
}

/// Host part of a URL without a leading `www.`.
pub(crate) fn url_host(url: &str) -> &str {
    let rest = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let host = &rest[..end];
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() {
        url
    } else {
        host
    }
}

/// Turn a file stem like `sales_report-2024` into `Sales Report 2024`.
pub(crate) fn humanize(stem: &str) -> Option<String> {
    let words: Vec<String> = stem
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
