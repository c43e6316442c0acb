//! Filesystem-safe cleanup of titles and author lists.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("valid regex"));
static FORBIDDEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[:/\\{}]").expect("valid regex"));
static UNDERSCORE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__+").expect("valid regex"));
static EDGE_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^_|_$").expect("valid regex"));

/// Makes `name` safe to use inside a file name.
///
/// - With `strip_brackets`, drops every `[...]` group (translator/illustrator notes)
/// - Replaces `:`, `/`, `\`, `{` and `}` with `_`
/// - Collapses runs of `_`, then drops one leading and one trailing `_`
/// - Trims surrounding whitespace
pub fn sanitize(name: &str, strip_brackets: bool) -> String {
    let name: Cow<'_, str> = if strip_brackets {
        BRACKETED.replace_all(name, "")
    } else {
        Cow::Borrowed(name)
    };
    let name = FORBIDDEN.replace_all(&name, "_");
    let name = UNDERSCORE_RUN.replace_all(&name, "_");
    let name = EDGE_UNDERSCORE.replace_all(&name, "");
    name.trim().to_string()
}

/// Titlecase forms that differ from the plain uppercase mapping: the Latin
/// digraphs (which have their own titlecase letter), `ß` and the common
/// Latin ligatures.
fn titlecase_special(c: char) -> Option<&'static str> {
    let mapped = match c {
        '\u{01C4}'..='\u{01C6}' => "\u{01C5}",
        '\u{01C7}'..='\u{01C9}' => "\u{01C8}",
        '\u{01CA}'..='\u{01CC}' => "\u{01CB}",
        '\u{01F1}'..='\u{01F3}' => "\u{01F2}",
        'ß' => "Ss",
        'ﬀ' => "Ff",
        'ﬁ' => "Fi",
        'ﬂ' => "Fl",
        'ﬃ' => "Ffi",
        'ﬄ' => "Ffl",
        'ﬅ' | 'ﬆ' => "St",
        _ => return None,
    };
    Some(mapped)
}

/// Letters of general category Lt.
fn is_titlecase(c: char) -> bool {
    matches!(
        c,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || is_titlecase(c)
}

/// Title-cases the first cased letter of every word and lower-cases the rest.
/// Any character without case (space, digit, punctuation) starts a new word.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        if prev_cased {
            out.extend(c.to_lowercase());
        } else if let Some(title) = titlecase_special(c) {
            out.push_str(title);
        } else if is_titlecase(c) {
            out.push(c);
        } else {
            out.extend(c.to_uppercase());
        }
        prev_cased = is_cased(c);
    }
    out
}
