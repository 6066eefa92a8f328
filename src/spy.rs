//! Section spy: highlights the nav link for the section under a fixed
//! reference line at 45% of the viewport height.
//!
//! Sections are resolved once at startup; their viewport-space position is
//! recomputed from the live scroll offset on every evaluation rather than
//! cached. Scroll-driven evaluations are coalesced to at most one per
//! rendered frame; resize-driven evaluations run immediately.

/// Fraction of viewport height where the reference line sits.
pub const REFERENCE_LINE: f32 = 0.45;

/// A page section in document space, resolved from a nav link target.
#[derive(Clone, Debug)]
pub struct Section {
    pub id: String,
    /// Top edge in document space (scroll offset 0).
    pub top: f32,
    pub height: f32,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// Index of the section the reference line currently falls in.
///
/// Walks sections in document order keeping the last one whose top edge is
/// at or above the line. The straddle check is subsumed by the second branch
/// but is kept verbatim from the page this reproduces; the observable rule is
/// "most recently scrolled-into section wins". Falls back to the first
/// section when none qualify, and to `None` when there are no sections.
pub fn active_section(sections: &[Section], scroll_y: f32, viewport_height: f32) -> Option<usize> {
    if sections.is_empty() {
        return None;
    }

    let line = viewport_height * REFERENCE_LINE;
    let mut current = 0;

    for (i, section) in sections.iter().enumerate() {
        let top = section.top - scroll_y;
        let bottom = top + section.height;
        if top <= line && bottom >= line {
            current = i;
        } else if top <= line {
            current = i;
        }
    }

    Some(current)
}

/// Tracks the active section and coalesces scroll-driven updates to one per
/// rendered frame.
pub struct SectionSpy {
    sections: Vec<Section>,
    active: Option<usize>,
    update_queued: bool,
}

impl SectionSpy {
    pub fn new(sections: Vec<Section>) -> Self {
        let active = if sections.is_empty() { None } else { Some(0) };
        Self {
            sections,
            active,
            update_queued: false,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The currently highlighted section, if any sections exist.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Recompute the active section now. Used at startup and on resize.
    pub fn update(&mut self, scroll_y: f32, viewport_height: f32) {
        self.active = active_section(&self.sections, scroll_y, viewport_height);
    }

    /// Request an update on the next rendered frame. Repeated requests
    /// between frames collapse into one evaluation.
    pub fn schedule(&mut self) {
        self.update_queued = true;
    }

    /// Run the queued update, if any. Called once per frame; returns whether
    /// an evaluation actually ran.
    pub fn run_queued(&mut self, scroll_y: f32, viewport_height: f32) -> bool {
        if !self.update_queued {
            return false;
        }
        self.update_queued = false;
        self.update(scroll_y, viewport_height);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_sections() -> Vec<Section> {
        vec![
            Section::new("home", 0.0, 800.0),
            Section::new("projects", 800.0, 800.0),
            Section::new("about", 1600.0, 800.0),
        ]
    }

    #[test]
    fn line_inside_second_section_activates_it() {
        // Line at 0.45 * 1000 = 450. Scroll 800 puts section 2's top at 0.
        let active = active_section(&three_sections(), 800.0, 1000.0);
        assert_eq!(active, Some(1));
    }

    #[test]
    fn at_top_first_section_wins() {
        assert_eq!(active_section(&three_sections(), 0.0, 1000.0), Some(0));
    }

    #[test]
    fn last_qualifying_section_wins() {
        // Scroll far enough that every top has passed the line.
        assert_eq!(active_section(&three_sections(), 2400.0, 1000.0), Some(2));
    }

    #[test]
    fn no_qualifier_defaults_to_first() {
        // All tops below the line: a section starting far down, barely
        // scrolled. top = 500 - 100 = 400 <= 450 would qualify, so push it
        // further down.
        let sections = vec![Section::new("far", 5000.0, 800.0)];
        assert_eq!(active_section(&sections, 0.0, 1000.0), Some(0));
    }

    #[test]
    fn empty_sections_yield_none() {
        assert_eq!(active_section(&[], 100.0, 1000.0), None);
        let mut spy = SectionSpy::new(Vec::new());
        spy.update(100.0, 1000.0);
        assert_eq!(spy.active(), None);
    }

    #[test]
    fn top_exactly_on_line_qualifies() {
        let sections = vec![
            Section::new("a", 0.0, 400.0),
            Section::new("b", 450.0, 400.0),
        ];
        // b's top sits exactly on the 450 line.
        assert_eq!(active_section(&sections, 0.0, 1000.0), Some(1));
    }

    #[test]
    fn scheduled_updates_coalesce_to_one_per_frame() {
        let mut spy = SectionSpy::new(three_sections());
        spy.schedule();
        spy.schedule();
        spy.schedule();
        assert!(spy.run_queued(800.0, 1000.0));
        assert_eq!(spy.active(), Some(1));
        // Flag was cleared by the first run.
        assert!(!spy.run_queued(0.0, 1000.0));
        assert_eq!(spy.active(), Some(1));
    }

    #[test]
    fn resize_update_is_immediate() {
        let mut spy = SectionSpy::new(three_sections());
        // A shorter viewport moves the line; update applies without scheduling.
        spy.update(1600.0, 400.0);
        assert_eq!(spy.active(), Some(2));
    }
}
