use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::core::Hint;

/// One-line bar at the bottom of the screen: breadcrumbs on the left,
/// keybinding hints on the right. An error replaces the hints until the
/// next successful action.
pub struct StatusBar {
    error: Option<String>,
}

impl StatusBar {
    #[must_use]
    pub const fn new() -> Self {
        Self { error: None }
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        breadcrumbs: &[String],
        hints: &[Hint],
    ) {
        let mut left = vec![Span::styled(
            " coleta ",
            Style::default().fg(theme.base).bg(theme.accent),
        )];
        for crumb in breadcrumbs {
            left.push(Span::styled(" › ", Style::default().fg(theme.overlay)));
            left.push(Span::styled(
                crumb.clone(),
                Style::default().fg(theme.text),
            ));
        }

        let right = match &self.error {
            Some(error) => vec![Span::styled(
                format!("{error} "),
                Style::default().fg(theme.red),
            )],
            None => {
                let mut spans = Vec::new();
                for hint in hints {
                    spans.push(Span::styled(
                        format!(" {} ", hint.key),
                        Style::default().fg(theme.accent),
                    ));
                    spans.push(Span::styled(
                        format!("{} ", hint.action),
                        Style::default().fg(theme.subtext),
                    ));
                }
                spans
            }
        };

        let right_width = right.iter().map(Span::width).sum::<usize>() as u16;
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(right_width)])
                .areas(area);

        let bar_style = Style::default().bg(theme.surface);
        frame.render_widget(Paragraph::new(Line::from(left)).style(bar_style), left_area);
        frame.render_widget(
            Paragraph::new(Line::from(right)).style(bar_style),
            right_area,
        );
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
