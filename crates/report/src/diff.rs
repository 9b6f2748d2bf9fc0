use docline_archetype::{words, OpTag, SequenceMatcher};

/// One word of a word-level diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffToken<'a> {
    Keep(&'a str),
    Removed(&'a str),
    Added(&'a str),
}

/// Word-level diff turning `old` into `new`.
///
/// A replaced run is reported as all of its removals followed by all of its additions.
/// This deliberately differs from Python's `difflib.Differ`, which may put the shorter
/// run first and pairs up similar words inside a replacement.
pub fn word_diff<'a>(old: &'a str, new: &'a str) -> Vec<DiffToken<'a>> {
    let a = words(old);
    let b = words(new);
    let mut out = Vec::with_capacity(a.len().max(b.len()));

    for op in SequenceMatcher::new(&a, &b).opcodes() {
        match op.tag {
            OpTag::Equal => out.extend(a[op.a].iter().copied().map(DiffToken::Keep)),
            OpTag::Delete => out.extend(a[op.a].iter().copied().map(DiffToken::Removed)),
            OpTag::Insert => out.extend(b[op.b].iter().copied().map(DiffToken::Added)),
            OpTag::Replace => {
                out.extend(a[op.a].iter().copied().map(DiffToken::Removed));
                out.extend(b[op.b].iter().copied().map(DiffToken::Added));
            }
        }
    }
    out
}

/// Word diff as HTML: kept words plain, removals and additions wrapped in spans
pub fn html_diff(old: &str, new: &str) -> String {
    word_diff(old, new)
        .into_iter()
        .map(|token| match token {
            DiffToken::Keep(w) => escape_html(w),
            DiffToken::Removed(w) => format!(
                r#"<span class="diffminus modeldiffminus">{}</span>"#,
                escape_html(w)
            ),
            DiffToken::Added(w) => format!(
                r#"<span class="diffplus modeldiffplus">{}</span>"#,
                escape_html(w)
            ),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
