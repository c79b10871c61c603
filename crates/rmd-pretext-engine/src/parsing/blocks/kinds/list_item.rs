/// List item markers: `-`, `*`, `+` bullets and `N.` / `N)` numbers.
pub struct ListItem;

impl ListItem {
    pub const BULLETS: [u8; 3] = [b'-', b'*', b'+'];
    pub const ORDERED_DELIMS: [u8; 2] = [b'.', b')'];
    const MAX_NUMBER_DIGITS: usize = 9;

    /// Returns `(ordered, text)` for a list item line.
    ///
    /// The marker must be followed by whitespace and some text, so `---`,
    /// `*emphasis*` and `3.14` stay paragraphs.
    pub fn parse(line: &str) -> Option<(bool, &str)> {
        let t = line.trim_start();
        let b = t.as_bytes();

        let (ordered, marker_len) = match b.first()? {
            c if Self::BULLETS.contains(c) => (false, 1),
            c if c.is_ascii_digit() => {
                let digits = b.iter().take_while(|c| c.is_ascii_digit()).count();
                if digits > Self::MAX_NUMBER_DIGITS
                    || !b.get(digits).is_some_and(|c| Self::ORDERED_DELIMS.contains(c))
                {
                    return None;
                }
                (true, digits + 1)
            }
            _ => return None,
        };

        if !b.get(marker_len).is_some_and(|c| *c == b' ' || *c == b'\t') {
            return None;
        }
        let text = t[marker_len..].trim();
        (!text.is_empty()).then_some((ordered, text))
    }
}
