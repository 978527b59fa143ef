//! Hover target tracking and click hit-testing.

use iced::{Point, Rectangle};

use ghstats_common::SeriesId;

/// Tracks the series nearest the pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverTracker {
    target: Option<SeriesId>,
}

impl HoverTracker {
    /// Update from a nearest-element query.
    ///
    /// Exactly one match sets the target; zero or several clear it.
    pub fn hover(&mut self, matched: &[SeriesId]) {
        self.target = match matched {
            [only] => Some(only.clone()),
            _ => None,
        };
    }

    /// Resolve a click at `position` (chart-relative).
    ///
    /// Returns the hover target only when the position lies strictly inside
    /// the plotting area.
    pub fn click(&self, position: Point, plot_area: Rectangle) -> Option<SeriesId> {
        let target = self.target.as_ref()?;
        if strictly_inside(position, plot_area) {
            Some(target.clone())
        } else {
            None
        }
    }

    pub fn target(&self) -> Option<&SeriesId> {
        self.target.as_ref()
    }

    pub fn reset(&mut self) {
        self.target = None;
    }
}

fn strictly_inside(position: Point, area: Rectangle) -> bool {
    let left = area.x;
    let right = area.x + area.width;
    let top = area.y;
    let bottom = area.y + area.height;

    position.x > left && position.x < right && position.y > top && position.y < bottom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot_area() -> Rectangle {
        Rectangle {
            x: 50.0,
            y: 20.0,
            width: 400.0,
            height: 300.0,
        }
    }

    #[test]
    fn test_hover_exactly_one_sets_target() {
        let mut hover = HoverTracker::default();
        hover.hover(&[SeriesId::from("repoA")]);
        assert_eq!(hover.target(), Some(&SeriesId::from("repoA")));
    }

    #[test]
    fn test_hover_zero_or_many_clears_target() {
        let mut hover = HoverTracker::default();
        hover.hover(&[SeriesId::from("repoA")]);
        hover.hover(&[]);
        assert_eq!(hover.target(), None);

        hover.hover(&[SeriesId::from("repoA")]);
        hover.hover(&[SeriesId::from("repoA"), SeriesId::from("repoB")]);
        assert_eq!(hover.target(), None);
    }

    #[test]
    fn test_click_without_target() {
        let hover = HoverTracker::default();
        assert_eq!(hover.click(Point::new(100.0, 100.0), plot_area()), None);
    }

    #[test]
    fn test_click_outside_plot_area() {
        let mut hover = HoverTracker::default();
        hover.hover(&[SeriesId::from("repoA")]);

        // Legend side, and exactly on the left/top edges.
        assert_eq!(hover.click(Point::new(500.0, 100.0), plot_area()), None);
        assert_eq!(hover.click(Point::new(50.0, 100.0), plot_area()), None);
        assert_eq!(hover.click(Point::new(100.0, 20.0), plot_area()), None);
        assert_eq!(hover.click(Point::new(100.0, 320.0), plot_area()), None);
    }

    #[test]
    fn test_click_inside_plot_area() {
        let mut hover = HoverTracker::default();
        hover.hover(&[SeriesId::from("repoA")]);

        assert_eq!(
            hover.click(Point::new(100.0, 100.0), plot_area()),
            Some(SeriesId::from("repoA"))
        );
    }
}
