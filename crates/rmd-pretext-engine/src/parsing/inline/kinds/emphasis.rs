use std::sync::OnceLock;

use regex::Regex;

/// Emphasis, strong and term spans.
///
/// Patterns overlap textually (`***x***` also matches as `**…**` and
/// `*…*`), so they run longest delimiter first.
pub struct Emphasis;

static TERM_STARS: OnceLock<Regex> = OnceLock::new();
static TERM_MIXED: OnceLock<Regex> = OnceLock::new();
static STRONG_STARS: OnceLock<Regex> = OnceLock::new();
static STRONG_UNDERSCORES: OnceLock<Regex> = OnceLock::new();
static EM_STARS: OnceLock<Regex> = OnceLock::new();
static EM_UNDERSCORE: OnceLock<Regex> = OnceLock::new();

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("Invalid emphasis regex"))
}

impl Emphasis {
    pub const TERM_OPEN: &'static str = "<term>";
    pub const TERM_CLOSE: &'static str = "</term>";
    pub const EM_OPEN: &'static str = "<em>";
    pub const EM_CLOSE: &'static str = "</em>";

    /// Applies term, then strong, then emphasis.
    ///
    /// Every delimiter but `***`/`**_` must sit at a word boundary, so
    /// `3*4 and 5*6` or `my_var_name` stay literal.
    pub fn apply(text: &str) -> String {
        let term = format!("{}${{1}}{}", Self::TERM_OPEN, Self::TERM_CLOSE);

        let text = regex(&TERM_STARS, r"\*\*\*([^*]+)\*\*\*").replace_all(text, term.as_str());
        let text = regex(&TERM_MIXED, r"\*\*_([^_]+)_\*\*").replace_all(&text, term.as_str());
        [
            regex(&STRONG_STARS, r"\*\*([^*\s](?:[^*]*[^*\s])?)\*\*"),
            regex(&STRONG_UNDERSCORES, r"__([^_\s](?:[^_]*[^_\s])?)__"),
            regex(&EM_STARS, r"\*([^*\s](?:[^*]*[^*\s])?)\*"),
            regex(&EM_UNDERSCORE, r"_([^_\s](?:[^_]*[^_\s])?)_"),
        ]
        .into_iter()
        .fold(text.into_owned(), |text, re| {
            replace_word_bounded(re, &text, Self::EM_OPEN, Self::EM_CLOSE)
        })
    }
}

/// Like `replace_all`, but skips matches glued to a word or a leftover star
/// on either side so identifiers such as `my_var_name` survive.
fn replace_word_bounded(re: &Regex, text: &str, open: &str, close: &str) -> String {
    let is_word =
        |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '*');

    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    for caps in re.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let before = text[..whole.start()].chars().next_back();
        let after = text[whole.end()..].chars().next();
        if is_word(before) || is_word(after) {
            continue;
        }
        out.push_str(&text[copied..whole.start()]);
        out.push_str(open);
        out.push_str(inner.as_str());
        out.push_str(close);
        copied = whole.end();
    }
    out.push_str(&text[copied..]);
    out
}
