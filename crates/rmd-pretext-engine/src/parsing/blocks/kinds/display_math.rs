/// Display math as a block: a `$$` fence on its own line, a line that is
/// nothing but one `$$…$$` span, or `$$` followed by the first line of a
/// block that closes further down.
pub struct DisplayMath;

impl DisplayMath {
    pub const FENCE: &'static str = "$$";

    pub fn is_fence(line: &str) -> bool {
        line.trim() == Self::FENCE
    }

    /// The LaTeX of a single-line `$$…$$` block.
    pub fn single_line(line: &str) -> Option<&str> {
        let inner = line
            .trim()
            .strip_prefix(Self::FENCE)?
            .strip_suffix(Self::FENCE)?;
        if inner.trim().is_empty() || inner.contains(Self::FENCE) {
            return None;
        }
        Some(inner.trim())
    }

    /// The first LaTeX line of a block opened as `$$\begin{..}`. A line that
    /// closes its own `$$` is left to the inline pass.
    pub fn opening(line: &str) -> Option<&str> {
        let rest = line.trim().strip_prefix(Self::FENCE)?;
        if rest.contains(Self::FENCE) || rest.trim().is_empty() {
            return None;
        }
        Some(rest.trim())
    }
}
