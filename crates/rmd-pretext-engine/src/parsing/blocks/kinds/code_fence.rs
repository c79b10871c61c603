#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    fn byte(self) -> u8 {
        match self {
            FenceKind::Backticks => b'`',
            FenceKind::Tildes => b'~',
        }
    }
}

/// The delimiter run that opened a fence. A close needs the same character
/// and at least as many of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    pub len: usize,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    /// Recognizes a fence line, returning its signature and the info string
    /// after the delimiter run.
    pub fn sig(line: &str) -> Option<(FenceSig, &str)> {
        let t = line.trim_start_matches(' ');
        let kind = if t.starts_with(Self::BACKTICKS) {
            FenceKind::Backticks
        } else if t.starts_with(Self::TILDES) {
            FenceKind::Tildes
        } else {
            return None;
        };
        let len = t.bytes().take_while(|b| *b == kind.byte()).count();
        let info = t[len..].trim();
        // ```foo`bar is inline code, not a fence
        if kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        Some((FenceSig { kind, len }, info))
    }

    pub fn closes(open: FenceSig, line: &str) -> bool {
        let t = line.trim();
        t.len() >= open.len && t.bytes().all(|b| b == open.kind.byte())
    }
}

/// What follows the opening delimiter run: ```` ```{r label, echo=FALSE} ````,
/// ```` ```python ```` or nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceInfo {
    /// `None` for a bare fence, which holds captured output.
    pub language: Option<String>,
    pub params: FenceParams,
}

impl FenceInfo {
    pub fn parse(info: &str) -> Self {
        let info = info.trim();
        let inner = info
            .strip_prefix('{')
            .map(|s| s.strip_suffix('}').unwrap_or(s))
            .unwrap_or(info)
            .trim();
        if inner.is_empty() {
            return Self::default();
        }

        let end = inner
            .find(|c: char| c.is_whitespace() || c == ',')
            .unwrap_or(inner.len());
        let language = inner[..end].trim_start_matches('.').to_ascii_lowercase();
        let rest = inner[end..].trim_start_matches([',', ' ', '\t']);

        Self {
            language: (!language.is_empty()).then_some(language),
            params: FenceParams::parse(rest),
        }
    }
}

/// Chunk options: a comma separated `key=value` list with an optional
/// leading unnamed label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceParams {
    pub label: Option<String>,
    pub entries: Vec<(String, String)>,
}

impl FenceParams {
    pub fn parse(s: &str) -> Self {
        let mut params = Self::default();
        for (i, part) in split_top_level(s).into_iter().enumerate() {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            match part.split_once('=') {
                Some((key, value)) => {
                    let key = key.trim();
                    let value = value.trim();
                    if key == "label" {
                        params.label = Some(unquote(value).to_string());
                    }
                    params.entries.push((key.to_string(), value.to_string()));
                }
                None if i == 0 => params.label = Some(part.to_string()),
                None => {}
            }
        }
        params
    }

    /// Raw value as written, quotes included.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn fig_cap(&self) -> Option<&str> {
        self.get("fig.cap").filter(|v| !unquote(v).is_empty())
    }

    /// Whether the source is shown. Only an explicit false hides it.
    pub fn echo(&self) -> bool {
        !matches!(self.get("echo"), Some("FALSE" | "F" | "false"))
    }
}

fn unquote(value: &str) -> &str {
    value.trim_matches(['"', '\''])
}

/// Splits on commas that are outside quotes and parentheses.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}
