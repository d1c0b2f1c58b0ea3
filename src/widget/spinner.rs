use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use throbber_widgets_tui::WhichUse::Spin;
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, ThrobberState};

use crate::Theme;

pub struct Spinner {
    throbber_state: ThrobberState,
    label: String,
}

impl Spinner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            throbber_state: ThrobberState::default(),
            label: String::new(),
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn on_tick(&mut self) {
        self.throbber_state.calc_next();
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut throbber = Throbber::default()
            .throbber_set(BRAILLE_SIX)
            .use_type(Spin)
            .throbber_style(Style::default().fg(theme.accent))
            .style(Style::default().fg(theme.subtext));

        // The throbber itself uses 1-character width
        let mut width = 1u16;

        if !self.label.is_empty() {
            throbber = throbber.label(self.label.clone());
            width += self.label.chars().count() as u16 + 1;
        }

        let area = area.centered(Constraint::Length(width), Constraint::Length(1));

        frame.render_stateful_widget(throbber, area, &mut self.throbber_state);
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}
