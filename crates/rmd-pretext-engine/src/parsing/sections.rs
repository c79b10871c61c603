//! # Section Stack
//!
//! Headings carry no close markers; nesting comes from depth alone. A
//! heading at depth `d` first closes every open section at depth `d` or
//! deeper (deepest first), then opens itself as a child of whatever is
//! left. Skipped levels (`##` straight to `####`) are allowed.
//!
//! The stack only emits [`SectionEvent`]s; [`super::sink::TreeSink`] turns
//! them into the document tree.

use crate::models::SectionKind;

/// Open/close markers, always emitted in balanced pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionEvent {
    Open {
        kind: SectionKind,
        id: Option<String>,
        title: String,
    },
    Close {
        kind: SectionKind,
    },
}

/// Result of opening a heading.
#[derive(Debug, Default)]
pub struct Transition {
    pub events: Vec<SectionEvent>,
    /// The new section skipped a level below an open parent.
    pub gap: bool,
}

/// Currently open sections, strictly increasing in depth bottom to top.
#[derive(Debug, Default)]
pub struct SectionStack {
    frames: Vec<SectionKind>,
}

impl SectionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, kind: SectionKind, id: Option<String>, title: String) -> Transition {
        let mut events = self.close_to(kind.depth());
        let gap = self
            .top()
            .is_some_and(|parent| parent.depth() + 1 != kind.depth());

        self.frames.push(kind);
        events.push(SectionEvent::Open { kind, id, title });
        Transition { events, gap }
    }

    /// Closes everything, deepest first. Called at end of input.
    pub fn close_all(&mut self) -> Vec<SectionEvent> {
        self.close_to(0)
    }

    pub fn top(&self) -> Option<SectionKind> {
        self.frames.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Pops every frame at `depth` or deeper.
    fn close_to(&mut self, depth: usize) -> Vec<SectionEvent> {
        let mut events = vec![];
        while let Some(kind) = self.top()
            && kind.depth() >= depth
        {
            self.frames.pop();
            events.push(SectionEvent::Close { kind });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SectionKind::*;

    fn open(stack: &mut SectionStack, kind: SectionKind) -> Transition {
        stack.open(kind, None, format!("{kind:?}"))
    }

    fn kinds(events: &[SectionEvent]) -> Vec<String> {
        events
            .iter()
            .map(|e| match e {
                SectionEvent::Open { kind, .. } => format!("+{}", kind.tag()),
                SectionEvent::Close { kind } => format!("-{}", kind.tag()),
            })
            .collect()
    }

    #[test]
    fn sibling_closes_previous() {
        let mut stack = SectionStack::new();
        open(&mut stack, Section);
        open(&mut stack, Subsection);
        let t = open(&mut stack, Section);

        assert_eq!(kinds(&t.events), ["-subsection", "-section", "+section"]);
        assert!(!t.gap);
        assert_eq!(stack.top(), Some(Section));
    }

    #[test]
    fn skipped_level_is_a_gap_but_still_nests() {
        let mut stack = SectionStack::new();
        open(&mut stack, Section);
        let t = open(&mut stack, Subsubsection);

        assert!(t.gap);
        assert_eq!(kinds(&t.events), ["+subsubsection"]);

        let t = open(&mut stack, Subsection);
        assert_eq!(kinds(&t.events), ["-subsubsection", "+subsection"]);
        assert!(!t.gap);
    }

    #[test]
    fn first_heading_at_any_depth_is_not_a_gap() {
        let mut stack = SectionStack::new();
        assert!(!open(&mut stack, Subsection).gap);
    }

    #[test]
    fn close_all_is_deepest_first_and_balanced() {
        let mut stack = SectionStack::new();
        let mut events = vec![];
        for kind in [Chapter, Section, Subsection, Section, Subsubsection] {
            events.extend(open(&mut stack, kind).events);
        }
        events.extend(stack.close_all());

        let opens = events
            .iter()
            .filter(|e| matches!(e, SectionEvent::Open { .. }))
            .count();
        let closes = events.len() - opens;
        assert_eq!(opens, closes);
        assert!(stack.is_empty());
        assert_eq!(
            kinds(&events[events.len() - 3..]),
            ["-subsubsection", "-section", "-chapter"]
        );
    }
}
