//! The collection points screen.
//!
//! Destination of a confirmed selection. The screen itself is a thin shell:
//! it receives the `{ uf, city }` payload and displays it; Esc returns to
//! the picker with its state intact.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Theme;
use crate::core::{Hint, Screen, UpdateResult};

/// Navigation payload handed from the picker to this screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsParams {
    pub uf: String,
    pub city: String,
}

pub struct PointsScreen {
    params: PointsParams,
    go_back: bool,
}

impl PointsScreen {
    #[must_use]
    pub const fn new(params: PointsParams) -> Self {
        Self {
            params,
            go_back: false,
        }
    }
}

impl Screen for PointsScreen {
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => {
                self.go_back = true;
                true
            }
            _ => false,
        }
    }

    fn update(&mut self) -> UpdateResult {
        if self.go_back {
            self.go_back = false;
            UpdateResult::Close
        } else {
            UpdateResult::Idle
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.overlay))
            .title(" Collection points ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [_, body, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(2),
        ])
        .areas(inner);

        let lines = vec![
            Line::styled(
                format!("{}, {}", self.params.city, self.params.uf),
                Style::default().fg(theme.green),
            ),
            Line::styled(
                "Collection points for this city will be listed here.",
                Style::default().fg(theme.subtext),
            ),
        ];
        frame.render_widget(Paragraph::new(lines).centered(), body);
    }

    fn breadcrumbs(&self) -> Vec<String> {
        vec![
            "Points".to_string(),
            format!("{}, {}", self.params.city, self.params.uf),
        ]
    }

    fn hints(&self) -> Vec<Hint> {
        vec![Hint {
            key: "Esc",
            action: "back",
        }]
    }
}
