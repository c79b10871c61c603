/// ATX headings, `#` to `####`, with an optional trailing attribute block
/// such as `{#intro-r}` or `{#why .unnumbered -}`.
pub struct Heading;

/// A recognized heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingLine {
    /// 0 for `#` through 3 for `####`.
    pub depth: usize,
    /// Raw title text, not yet inline formatted.
    pub title: String,
    pub id: Option<String>,
}

/// Why a `#` line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedHeading {
    TooDeep,
    EmptyTitle,
    BadAttributes,
}

impl Heading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 4;

    /// `None` when the line is not a heading at all (`#hashtag`, `text`),
    /// `Some(Err(_))` when it looks like one but cannot be used.
    pub fn parse(line: &str) -> Option<Result<HeadingLine, MalformedHeading>> {
        let t = line.trim_start();
        let level = t.bytes().take_while(|b| *b == Self::MARKER).count();
        if level == 0 {
            return None;
        }
        let rest = &t[level..];
        if !(rest.is_empty() || rest.starts_with([' ', '\t'])) {
            return None;
        }
        if level > Self::MAX_LEVEL {
            return Some(Err(MalformedHeading::TooDeep));
        }
        Some(Self::parse_body(rest.trim()).map(|(title, id)| HeadingLine {
            depth: level - 1,
            title,
            id,
        }))
    }

    fn parse_body(body: &str) -> Result<(String, Option<String>), MalformedHeading> {
        let open = body
            .rfind(" {")
            .map(|i| i + 1)
            .or_else(|| body.starts_with('{').then_some(0));
        let (title, id) = match open {
            Some(open) if body[open + 1..].starts_with(['#', '.', '-']) => {
                let attrs = body[open..]
                    .strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                    .ok_or(MalformedHeading::BadAttributes)?;
                (&body[..open], Self::parse_attributes(attrs)?)
            }
            _ if body.contains("{#") => return Err(MalformedHeading::BadAttributes),
            _ => (body, None),
        };

        let title = title.trim();
        if title.is_empty() {
            return Err(MalformedHeading::EmptyTitle);
        }
        Ok((title.to_string(), id))
    }

    /// Pandoc attributes: one `#id`, any `.class`, `-` for unnumbered.
    fn parse_attributes(attrs: &str) -> Result<Option<String>, MalformedHeading> {
        let mut id = None;
        for token in attrs.split_whitespace() {
            if let Some(raw) = token.strip_prefix('#') {
                if raw.is_empty() || id.is_some() {
                    return Err(MalformedHeading::BadAttributes);
                }
                id = Some(Self::normalize_id(raw));
            } else if !(token.starts_with('.') || token == "-") {
                return Err(MalformedHeading::BadAttributes);
            }
        }
        Ok(id)
    }

    pub fn normalize_id(raw: &str) -> String {
        raw.replace('_', "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(line: &str) -> HeadingLine {
        Heading::parse(line).unwrap().unwrap()
    }

    #[test]
    fn plain_heading_levels() {
        assert_eq!(heading("# Intro").depth, 0);
        assert_eq!(heading("## Data").depth, 1);
        assert_eq!(heading("#### Deep").depth, 3);
        assert_eq!(heading("### Vectors").title, "Vectors");
    }

    #[test]
    fn heading_with_id() {
        let h = heading("## Getting R {#getting_r}");
        assert_eq!(h.title, "Getting R");
        assert_eq!(h.id.as_deref(), Some("getting-r"));
    }

    #[test]
    fn heading_with_classes() {
        let h = heading("# Preface {#preface .unnumbered -}");
        assert_eq!(h.title, "Preface");
        assert_eq!(h.id.as_deref(), Some("preface"));

        let h = heading("## Extras {-}");
        assert_eq!(h.title, "Extras");
        assert_eq!(h.id, None);
    }

    #[test]
    fn braces_in_title_are_kept() {
        assert_eq!(heading("## Using {dplyr}").title, "Using {dplyr}");
    }

    #[test]
    fn not_headings() {
        assert_eq!(Heading::parse("#hashtag"), None);
        assert_eq!(Heading::parse("plain"), None);
    }

    #[test]
    fn malformed_headings() {
        assert_eq!(Heading::parse("##"), Some(Err(MalformedHeading::EmptyTitle)));
        assert_eq!(
            Heading::parse("##### Too deep"),
            Some(Err(MalformedHeading::TooDeep))
        );
        assert_eq!(
            Heading::parse("## Title {#}"),
            Some(Err(MalformedHeading::BadAttributes))
        );
        assert_eq!(
            Heading::parse("## Title {#open"),
            Some(Err(MalformedHeading::BadAttributes))
        );
        assert_eq!(
            Heading::parse("## {#only-id}"),
            Some(Err(MalformedHeading::EmptyTitle))
        );
    }
}
