// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +----------------+----------------+----------------+
// | Player 1 (40%)  | Player 2 (40%)  | Position (20%) |
// +----------------+-+--------------+----------------+
// | Report (60%)      | Metric Shares (40%)           |
// +-------------------+-------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: dataset summary and current selection.
    pub status_bar: Rect,
    pub player1: Rect,
    pub player2: Rect,
    pub position: Rect,
    /// Left of the middle section: the markdown report.
    pub report: Rect,
    /// Right of the middle section: per-metric share gauges.
    pub shares: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | selectors(3) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // selectors
            Constraint::Min(6),    // report + shares
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let selectors = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
        ])
        .split(vertical[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(vertical[2]);

    AppLayout {
        status_bar: vertical[0],
        player1: selectors[0],
        player2: selectors[1],
        position: selectors[2],
        report: middle[0],
        shares: middle[1],
        help_bar: vertical[3],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        let rects = [
            ("status_bar", layout.status_bar),
            ("player1", layout.player1),
            ("player2", layout.player2),
            ("position", layout.position),
            ("report", layout.report),
            ("shares", layout.shares),
            ("help_bar", layout.help_bar),
        ];
        for (name, rect) in &rects {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{} has zero area: {:?}",
                name,
                rect
            );
        }
    }

    #[test]
    fn layout_fixed_rows() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.player1.height, 3);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.report.height, 40 - 1 - 3 - 1);
    }

    #[test]
    fn layout_selectors_share_a_row() {
        let layout = build_layout(test_area());
        assert_eq!(layout.player1.y, layout.player2.y);
        assert_eq!(layout.player2.y, layout.position.y);
        assert!(layout.player1.x < layout.player2.x);
        assert!(layout.player2.x < layout.position.x);
        assert_eq!(layout.player1.width, layout.player2.width);
    }

    #[test]
    fn layout_report_wider_than_shares() {
        let layout = build_layout(test_area());
        assert!(
            layout.report.width > layout.shares.width,
            "Report ({}) should be wider than shares ({})",
            layout.report.width,
            layout.shares.width
        );
        assert_eq!(layout.report.y, layout.shares.y);
    }

    #[test]
    fn layout_fits_within_area() {
        let area = test_area();
        let layout = build_layout(area);
        for rect in [layout.status_bar, layout.report, layout.shares, layout.help_bar] {
            assert!(rect.right() <= area.right());
            assert!(rect.bottom() <= area.bottom());
        }
        assert_eq!(layout.help_bar.bottom(), area.bottom());
    }
}
