//! Selectable option list with a placeholder row and fuzzy filtering.
//!
//! Row 0 is always the placeholder ("no selection"); picking it yields
//! [`Choice::Unselected`]. The remaining rows are the option list, filtered
//! but never reordered: server order is part of the option-list contract.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::Theme;
use crate::home::selection::{Choice, SelectOption};
use crate::search::Matcher;

const PAGE_STEP: usize = 5;

pub enum ListEvent {
    /// Key not handled, propagate
    Ignored,
    /// Key handled, nothing picked
    Consumed,
    /// A row was activated
    Picked(Choice),
}

pub struct SelectList {
    placeholder: &'static str,
    options: Vec<SelectOption>,
    /// Indices into `options` that survive the filter, in order.
    visible: Vec<usize>,
    filter: String,
    filtering: bool,
    matcher: Matcher,
    state: ListState,
}

impl SelectList {
    #[must_use]
    pub fn new(placeholder: &'static str) -> Self {
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            placeholder,
            options: Vec::new(),
            visible: Vec::new(),
            filter: String::new(),
            filtering: false,
            matcher: Matcher::new(),
            state,
        }
    }

    /// Replace the options wholesale. Resets the filter and clamps the
    /// cursor.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.filter.clear();
        self.filtering = false;
        self.rebuild();
    }

    #[must_use]
    pub const fn is_filtering(&self) -> bool {
        self.filtering
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ListEvent {
        if self.filtering {
            return self.handle_filter_key(key);
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Home | KeyCode::Char('g') => self.jump_to(0),
            KeyCode::End | KeyCode::Char('G') => self.jump_to(self.row_count() - 1),
            KeyCode::PageDown => self.move_cursor(PAGE_STEP as isize),
            KeyCode::PageUp => self.move_cursor(-(PAGE_STEP as isize)),
            KeyCode::Char('/') if !self.options.is_empty() => {
                self.filtering = true;
                ListEvent::Consumed
            }
            KeyCode::Enter => self.pick(),
            _ => ListEvent::Ignored,
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> ListEvent {
        match key.code {
            KeyCode::Esc => {
                self.filter.clear();
                self.filtering = false;
                self.rebuild();
                ListEvent::Consumed
            }
            KeyCode::Enter => {
                self.filtering = false;
                ListEvent::Consumed
            }
            KeyCode::Backspace => {
                self.filter.pop();
                self.rebuild();
                ListEvent::Consumed
            }
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Char(c) => {
                self.filter.push(c);
                self.rebuild();
                ListEvent::Consumed
            }
            _ => ListEvent::Ignored,
        }
    }

    /// Total rows including the placeholder.
    fn row_count(&self) -> usize {
        self.visible.len() + 1
    }

    fn move_cursor(&mut self, delta: isize) -> ListEvent {
        let current = self.state.selected().unwrap_or(0) as isize;
        let last = (self.row_count() - 1) as isize;
        let next = (current + delta).clamp(0, last);
        self.state.select(Some(next as usize));
        ListEvent::Consumed
    }

    fn jump_to(&mut self, row: usize) -> ListEvent {
        self.state.select(Some(row));
        ListEvent::Consumed
    }

    fn pick(&mut self) -> ListEvent {
        match self.state.selected() {
            Some(0) => ListEvent::Picked(Choice::Unselected),
            Some(row) => match self.visible.get(row - 1) {
                Some(&index) => {
                    ListEvent::Picked(Choice::Value(self.options[index].value.clone()))
                }
                None => ListEvent::Consumed,
            },
            None => ListEvent::Consumed,
        }
    }

    fn rebuild(&mut self) {
        self.visible = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| {
                self.filter.is_empty() || self.matcher.matches(&option.label, &self.filter)
            })
            .map(|(index, _)| index)
            .collect();

        let last = self.row_count() - 1;
        match self.state.selected() {
            Some(row) if row > last => self.state.select(Some(last)),
            Some(_) => {}
            None => self.state.select(Some(0)),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        title: &str,
        focused: bool,
    ) {
        let border_style = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.overlay)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(border_style)
            .title(format!(" {title} "));

        if self.filtering || !self.filter.is_empty() {
            block = block.title_bottom(Line::from(format!(" /{} ", self.filter)));
        }

        let mut items = Vec::with_capacity(self.row_count());
        items.push(ListItem::new(self.placeholder).style(
            Style::default()
                .fg(theme.subtext)
                .add_modifier(Modifier::ITALIC),
        ));
        items.extend(
            self.visible
                .iter()
                .map(|&index| ListItem::new(self.options[index].label.clone())),
        );

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with(labels: &[&str]) -> SelectList {
        let mut list = SelectList::new("Select a city");
        list.set_options(
            labels
                .iter()
                .map(|l| SelectOption::new(*l, *l))
                .collect(),
        );
        list
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_enter_on_placeholder_picks_unselected() {
        let mut list = list_with(&["São Paulo", "Campinas"]);
        match list.handle_key(key(KeyCode::Enter)) {
            ListEvent::Picked(choice) => assert_eq!(choice, Choice::Unselected),
            _ => panic!("expected a pick"),
        }
    }

    #[test]
    fn test_enter_on_option_picks_its_value() {
        let mut list = list_with(&["São Paulo", "Campinas"]);
        list.handle_key(key(KeyCode::Down));
        list.handle_key(key(KeyCode::Down));
        match list.handle_key(key(KeyCode::Enter)) {
            ListEvent::Picked(choice) => {
                assert_eq!(choice, Choice::Value("Campinas".to_string()));
            }
            _ => panic!("expected a pick"),
        }
    }

    #[test]
    fn test_cursor_clamps_at_both_ends() {
        let mut list = list_with(&["São Paulo"]);
        list.handle_key(key(KeyCode::Up));
        assert_eq!(list.state.selected(), Some(0));

        list.handle_key(key(KeyCode::End));
        list.handle_key(key(KeyCode::Down));
        assert_eq!(list.state.selected(), Some(1));
    }

    #[test]
    fn test_filter_narrows_but_keeps_order() {
        let mut list = list_with(&["Campinas", "Santos", "Campo Grande"]);
        list.handle_key(key(KeyCode::Char('/')));
        assert!(list.is_filtering());
        list.handle_key(key(KeyCode::Char('c')));
        list.handle_key(key(KeyCode::Char('a')));
        list.handle_key(key(KeyCode::Char('m')));

        let labels: Vec<&str> = list
            .visible
            .iter()
            .map(|&i| list.options[i].label.as_str())
            .collect();
        assert_eq!(labels, vec!["Campinas", "Campo Grande"]);
    }

    #[test]
    fn test_escape_clears_the_filter() {
        let mut list = list_with(&["Campinas", "Santos"]);
        list.handle_key(key(KeyCode::Char('/')));
        list.handle_key(key(KeyCode::Char('x')));
        assert_eq!(list.visible.len(), 0);

        list.handle_key(key(KeyCode::Esc));
        assert!(!list.is_filtering());
        assert_eq!(list.visible.len(), 2);
    }

    #[test]
    fn test_replacing_options_resets_filter_and_clamps_cursor() {
        let mut list = list_with(&["Campinas", "Santos", "Sorocaba"]);
        list.handle_key(key(KeyCode::End));
        assert_eq!(list.state.selected(), Some(3));

        list.set_options(vec![SelectOption::new("Niterói", "Niterói")]);
        assert_eq!(list.state.selected(), Some(1));

        list.set_options(vec![]);
        assert_eq!(list.state.selected(), Some(0));
    }
}
