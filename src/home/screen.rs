use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::Theme;
use crate::core::{Command, Hint, Screen, UpdateResult};
use crate::directory::Directory;
use crate::home::command::{CopySelectionCmd, FetchCitiesCmd, FetchRegionsCmd};
use crate::home::message::HomeMsg;
use crate::home::selection::{self, Choice, SelectionState};
use crate::widget::{ListEvent, SelectList, Spinner};

/// Selection to apply once the corresponding option list arrives.
#[derive(Debug, Default)]
pub struct Preselect {
    pub region: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Regions,
    Cities,
    Confirm,
}

/// The cascading state/city picker.
///
/// All mutation funnels through [`Screen::update`]. Every region pick bumps
/// `generation` and tags the dependent city fetch with it; a fetch result
/// whose generation is no longer current is discarded on arrival, so a slow
/// response for a superseded region can never clobber the list of the
/// newer one.
pub struct HomeScreen {
    directory: Arc<dyn Directory>,
    state: SelectionState,
    generation: u64,
    loading_regions: bool,
    loading_cities: bool,
    focus: Focus,
    region_list: SelectList,
    city_list: SelectList,
    spinner: Spinner,
    preselect: Preselect,
    close_requested: bool,
    msg_tx: UnboundedSender<HomeMsg>,
    msg_rx: UnboundedReceiver<HomeMsg>,
}

impl HomeScreen {
    #[must_use]
    pub fn new(directory: Arc<dyn Directory>, preselect: Preselect) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            directory,
            state: SelectionState::new(),
            generation: 0,
            loading_regions: false,
            loading_cities: false,
            focus: Focus::Regions,
            region_list: SelectList::new("Select a state"),
            city_list: SelectList::new("Select a city"),
            spinner: Spinner::new(),
            preselect,
            close_requested: false,
            msg_tx,
            msg_rx,
        }
    }

    /// Queue a message to be processed by update().
    fn queue(&self, msg: HomeMsg) {
        let _ = self.msg_tx.send(msg);
    }

    /// Process a single message and return the result.
    fn process_message(&mut self, msg: HomeMsg) -> UpdateResult {
        match msg {
            HomeMsg::Initialize => self.fetch_regions(),

            HomeMsg::RegionsLoaded(regions) => {
                self.loading_regions = false;
                let options = selection::region_options(&regions);
                self.region_list.set_options(options.clone());
                self.state.set_region_options(options);
                self.apply_region_preselect();
                UpdateResult::Idle
            }

            HomeMsg::RegionsFailed(error) => {
                self.loading_regions = false;
                self.region_list.set_options(Vec::new());
                self.state.set_region_options(Vec::new());
                UpdateResult::Error(format!("Could not load states: {error}"))
            }

            HomeMsg::PickRegion(choice) => self.pick_region(choice),

            HomeMsg::CitiesLoaded { generation, cities } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "Discarding stale city list");
                    return UpdateResult::Idle;
                }
                self.loading_cities = false;
                let options = selection::city_options(&cities);
                self.city_list.set_options(options.clone());
                self.state.set_city_options(options);
                self.apply_city_preselect();
                UpdateResult::Idle
            }

            HomeMsg::CitiesFailed { generation, error } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "Discarding stale city failure");
                    return UpdateResult::Idle;
                }
                self.loading_cities = false;
                self.city_list.set_options(Vec::new());
                self.state.set_city_options(Vec::new());
                UpdateResult::Error(format!("Could not load cities: {error}"))
            }

            HomeMsg::PickCity(choice) => match self.state.set_city(choice) {
                Ok(()) => {
                    if self.state.city().is_selected() {
                        self.focus = Focus::Confirm;
                    }
                    UpdateResult::Idle
                }
                Err(e) => UpdateResult::Error(e.to_string()),
            },

            HomeMsg::CopySelection => match self.state.params() {
                Some(params) => {
                    CopySelectionCmd::new(format!("{}, {}", params.city, params.uf)).into()
                }
                None => UpdateResult::Idle,
            },

            HomeMsg::Confirm => self
                .state
                .params()
                .map_or(UpdateResult::Idle, UpdateResult::OpenPoints),
        }
    }

    fn fetch_regions(&mut self) -> UpdateResult {
        self.loading_regions = true;
        self.spinner.set_label("Loading states...");

        let mut commands: Vec<Box<dyn Command>> = vec![Box::new(FetchRegionsCmd::new(
            Arc::clone(&self.directory),
            self.msg_tx.clone(),
        ))];

        // A reload also refreshes the dependent city list.
        if let Some(code) = self.state.region().value() {
            self.generation += 1;
            self.loading_cities = true;
            commands.push(Box::new(FetchCitiesCmd::new(
                Arc::clone(&self.directory),
                code.to_string(),
                self.generation,
                self.msg_tx.clone(),
            )));
        }

        UpdateResult::Commands(commands)
    }

    fn pick_region(&mut self, choice: Choice) -> UpdateResult {
        // Atomic and synchronous: the city choice and options are gone
        // before the replacement fetch is even issued.
        self.state.set_region(choice.clone());
        self.city_list.set_options(Vec::new());
        self.generation += 1;

        match choice {
            Choice::Value(code) => {
                self.loading_cities = true;
                self.spinner.set_label(format!("Loading cities of {code}..."));
                self.focus = Focus::Cities;
                FetchCitiesCmd::new(
                    Arc::clone(&self.directory),
                    code,
                    self.generation,
                    self.msg_tx.clone(),
                )
                .into()
            }
            Choice::Unselected => {
                self.loading_cities = false;
                UpdateResult::Idle
            }
        }
    }

    fn apply_region_preselect(&mut self) {
        let Some(code) = self.preselect.region.take() else {
            return;
        };
        let matched = self
            .state
            .region_options()
            .iter()
            .find(|option| option.value.eq_ignore_ascii_case(&code));
        match matched {
            Some(option) => self.queue(HomeMsg::PickRegion(Choice::Value(option.value.clone()))),
            None => debug!("Unknown state {code:?} requested on the command line"),
        }
    }

    fn apply_city_preselect(&mut self) {
        let Some(name) = self.preselect.city.take() else {
            return;
        };
        let wanted = name.to_lowercase();
        let matched = self
            .state
            .city_options()
            .iter()
            .find(|option| option.value.to_lowercase() == wanted);
        match matched {
            Some(option) => self.queue(HomeMsg::PickCity(Choice::Value(option.value.clone()))),
            None => debug!("Unknown city {name:?} requested on the command line"),
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        self.focus = match (self.focus, forward) {
            (Focus::Regions, true) | (Focus::Confirm, false) => Focus::Cities,
            (Focus::Cities, true) | (Focus::Regions, false) => Focus::Confirm,
            (Focus::Confirm, true) | (Focus::Cities, false) => Focus::Regions,
        };
    }

    fn focused_list(&mut self) -> Option<&mut SelectList> {
        match self.focus {
            Focus::Regions => Some(&mut self.region_list),
            Focus::Cities => Some(&mut self.city_list),
            Focus::Confirm => None,
        }
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let enabled = self.state.is_complete();
        let focused = self.focus == Focus::Confirm;

        let border_style = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.overlay)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(border_style);

        let line = if enabled {
            Line::styled(
                format!(
                    "Find collection points in {}, {}",
                    self.state.city(),
                    self.state.region()
                ),
                Style::default().fg(theme.green).add_modifier(Modifier::BOLD),
            )
        } else {
            Line::styled(
                "Select a state and a city to continue",
                Style::default().fg(theme.subtext),
            )
        };

        frame.render_widget(Paragraph::new(line).centered().block(block), area);
    }
}

impl Screen for HomeScreen {
    fn init(&mut self) {
        self.queue(HomeMsg::Initialize);
    }

    fn handle_tick(&mut self) {
        if self.loading_regions || self.loading_cities {
            self.spinner.on_tick();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // A filtering list owns the keyboard until the filter is closed.
        if let Some(list) = self.focused_list()
            && list.is_filtering()
        {
            return !matches!(list.handle_key(key), ListEvent::Ignored);
        }

        match key.code {
            KeyCode::Tab => {
                self.cycle_focus(true);
                return true;
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                return true;
            }
            _ => {}
        }

        if let Some(list) = self.focused_list() {
            match list.handle_key(key) {
                ListEvent::Picked(choice) => {
                    match self.focus {
                        Focus::Regions => self.queue(HomeMsg::PickRegion(choice)),
                        Focus::Cities | Focus::Confirm => {
                            self.queue(HomeMsg::PickCity(choice));
                        }
                    }
                    return true;
                }
                ListEvent::Consumed => return true,
                ListEvent::Ignored => {}
            }
        } else if key.code == KeyCode::Enter {
            // The confirm control is disabled until the selection is
            // complete; Enter on a disabled control does nothing.
            if self.state.is_complete() {
                self.queue(HomeMsg::Confirm);
            }
            return true;
        }

        match key.code {
            KeyCode::Char('r') => {
                self.queue(HomeMsg::Initialize);
                true
            }
            KeyCode::Char('y') => {
                self.queue(HomeMsg::CopySelection);
                true
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.close_requested = true;
                true
            }
            _ => false,
        }
    }

    fn update(&mut self) -> UpdateResult {
        if self.close_requested {
            self.close_requested = false;
            return UpdateResult::Close;
        }

        // Drain all pending messages
        let mut commands: Vec<Box<dyn Command>> = Vec::new();

        while let Ok(msg) = self.msg_rx.try_recv() {
            match self.process_message(msg) {
                UpdateResult::Idle => {}
                UpdateResult::Commands(cmds) => commands.extend(cmds),
                UpdateResult::OpenPoints(params) => return UpdateResult::OpenPoints(params),
                UpdateResult::Close => return UpdateResult::Close,
                UpdateResult::Error(e) => return UpdateResult::Error(e),
            }
        }

        if commands.is_empty() {
            UpdateResult::Idle
        } else {
            UpdateResult::Commands(commands)
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [lists_area, confirm_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(area);
        let [regions_area, cities_area] =
            Layout::horizontal([Constraint::Length(16), Constraint::Fill(1)]).areas(lists_area);

        let region_title = match self.state.region().value() {
            Some(code) => format!("State: {code}"),
            None => "State".to_string(),
        };
        let city_title = match self.state.city().value() {
            Some(name) => format!("City: {name}"),
            None => "City".to_string(),
        };

        if self.loading_regions {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.overlay))
                .title(format!(" {region_title} "));
            frame.render_widget(&block, regions_area);
            self.spinner.render(frame, block.inner(regions_area), theme);
        } else {
            self.region_list.render(
                frame,
                regions_area,
                theme,
                &region_title,
                self.focus == Focus::Regions,
            );
        }

        if self.loading_cities {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.overlay))
                .title(format!(" {city_title} "));
            frame.render_widget(&block, cities_area);
            self.spinner.render(frame, block.inner(cities_area), theme);
        } else {
            self.city_list.render(
                frame,
                cities_area,
                theme,
                &city_title,
                self.focus == Focus::Cities,
            );
        }

        self.render_confirm(frame, confirm_area, theme);
    }

    fn breadcrumbs(&self) -> Vec<String> {
        let mut bc = vec!["Home".to_string()];
        if let Some(code) = self.state.region().value() {
            bc.push(code.to_string());
        }
        if let Some(name) = self.state.city().value() {
            bc.push(name.to_string());
        }
        bc
    }

    fn hints(&self) -> Vec<Hint> {
        let mut hints = vec![
            Hint {
                key: "Tab",
                action: "focus",
            },
            Hint {
                key: "Enter",
                action: "pick",
            },
        ];
        if self.focus != Focus::Confirm {
            hints.push(Hint {
                key: "/",
                action: "filter",
            });
        }
        if self.state.is_complete() {
            hints.push(Hint {
                key: "y",
                action: "copy",
            });
        }
        hints.push(Hint {
            key: "r",
            action: "reload",
        });
        hints.push(Hint {
            key: "q",
            action: "quit",
        });
        hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::directory::{City, DirectoryError, Region};
    use crate::home::selection::SelectOption;

    /// Directory stub; screen tests inject fetch results as messages, so
    /// no command is ever executed against it.
    struct NullDirectory;

    #[async_trait]
    impl Directory for NullDirectory {
        async fn list_regions(&self) -> Result<Vec<Region>, DirectoryError> {
            Ok(Vec::new())
        }

        async fn list_cities(&self, _code: &str) -> Result<Vec<City>, DirectoryError> {
            Ok(Vec::new())
        }
    }

    fn screen() -> HomeScreen {
        HomeScreen::new(Arc::new(NullDirectory), Preselect::default())
    }

    fn screen_with(preselect: Preselect) -> HomeScreen {
        HomeScreen::new(Arc::new(NullDirectory), preselect)
    }

    fn regions(codes: &[&str]) -> Vec<Region> {
        codes
            .iter()
            .map(|c| Region {
                code: (*c).to_string(),
            })
            .collect()
    }

    fn cities(names: &[&str]) -> Vec<City> {
        names
            .iter()
            .map(|n| City {
                name: (*n).to_string(),
            })
            .collect()
    }

    fn labels(options: &[SelectOption]) -> Vec<&str> {
        options.iter().map(|o| o.label.as_str()).collect()
    }

    /// Queue one message and drain the funnel.
    fn step(screen: &mut HomeScreen, msg: HomeMsg) -> UpdateResult {
        screen.queue(msg);
        screen.update()
    }

    #[test]
    fn test_init_fetches_regions() {
        let mut s = screen();
        s.init();
        assert!(matches!(s.update(), UpdateResult::Commands(_)));

        let result = step(&mut s, HomeMsg::RegionsLoaded(regions(&["SP", "RJ"])));
        assert!(matches!(result, UpdateResult::Idle));
        assert_eq!(labels(s.state.region_options()), vec!["SP", "RJ"]);
    }

    #[test]
    fn test_scenario_a_full_happy_path() {
        let mut s = screen();
        step(&mut s, HomeMsg::RegionsLoaded(regions(&["SP", "RJ"])));

        let result = step(&mut s, HomeMsg::PickRegion(Choice::Value("SP".to_string())));
        assert!(matches!(result, UpdateResult::Commands(_)));
        assert!(s.loading_cities);

        step(
            &mut s,
            HomeMsg::CitiesLoaded {
                generation: 1,
                cities: cities(&["São Paulo", "Campinas"]),
            },
        );
        assert_eq!(
            labels(s.state.city_options()),
            vec!["São Paulo", "Campinas"]
        );

        step(&mut s, HomeMsg::PickCity(Choice::Value("Campinas".to_string())));
        assert!(s.state.is_complete());

        match step(&mut s, HomeMsg::Confirm) {
            UpdateResult::OpenPoints(params) => {
                assert_eq!(params.uf, "SP");
                assert_eq!(params.city, "Campinas");
            }
            _ => panic!("expected confirm to open the points screen"),
        }
    }

    #[test]
    fn test_scenario_b_stale_city_response_is_discarded() {
        let mut s = screen();
        step(&mut s, HomeMsg::RegionsLoaded(regions(&["SP", "RJ"])));

        // SP's fetch (generation 1) starts, then RJ's (generation 2)
        // before SP's response arrives.
        step(&mut s, HomeMsg::PickRegion(Choice::Value("SP".to_string())));
        step(&mut s, HomeMsg::PickRegion(Choice::Value("RJ".to_string())));

        // RJ's response lands first and is applied.
        step(
            &mut s,
            HomeMsg::CitiesLoaded {
                generation: 2,
                cities: cities(&["Rio de Janeiro"]),
            },
        );
        // SP's response straggles in afterwards and must be dropped.
        step(
            &mut s,
            HomeMsg::CitiesLoaded {
                generation: 1,
                cities: cities(&["São Paulo"]),
            },
        );

        assert_eq!(labels(s.state.city_options()), vec!["Rio de Janeiro"]);
        assert!(!s.loading_cities);
    }

    #[test]
    fn test_stale_city_failure_is_discarded_too() {
        let mut s = screen();
        step(&mut s, HomeMsg::RegionsLoaded(regions(&["SP", "RJ"])));
        step(&mut s, HomeMsg::PickRegion(Choice::Value("SP".to_string())));
        step(&mut s, HomeMsg::PickRegion(Choice::Value("RJ".to_string())));
        step(
            &mut s,
            HomeMsg::CitiesLoaded {
                generation: 2,
                cities: cities(&["Rio de Janeiro"]),
            },
        );

        let result = step(
            &mut s,
            HomeMsg::CitiesFailed {
                generation: 1,
                error: "timed out".to_string(),
            },
        );

        assert!(matches!(result, UpdateResult::Idle));
        assert_eq!(labels(s.state.city_options()), vec!["Rio de Janeiro"]);
    }

    #[test]
    fn test_picking_region_clears_city_side_before_fetch_resolves() {
        let mut s = screen();
        step(&mut s, HomeMsg::RegionsLoaded(regions(&["SP", "RJ"])));
        step(&mut s, HomeMsg::PickRegion(Choice::Value("SP".to_string())));
        step(
            &mut s,
            HomeMsg::CitiesLoaded {
                generation: 1,
                cities: cities(&["São Paulo", "Campinas"]),
            },
        );
        step(&mut s, HomeMsg::PickCity(Choice::Value("Campinas".to_string())));

        step(&mut s, HomeMsg::PickRegion(Choice::Value("RJ".to_string())));

        // Synchronously cleared; RJ's fetch has not resolved yet.
        assert_eq!(s.state.city(), &Choice::Unselected);
        assert!(s.state.city_options().is_empty());
        assert!(!s.state.is_complete());
    }

    #[test]
    fn test_unselecting_region_issues_no_fetch() {
        let mut s = screen();
        step(&mut s, HomeMsg::RegionsLoaded(regions(&["SP"])));
        step(&mut s, HomeMsg::PickRegion(Choice::Value("SP".to_string())));

        let result = step(&mut s, HomeMsg::PickRegion(Choice::Unselected));

        assert!(matches!(result, UpdateResult::Idle));
        assert!(!s.loading_cities);
        assert!(s.state.city_options().is_empty());
    }

    #[test]
    fn test_scenario_c_region_fetch_failure_degrades() {
        let mut s = screen();
        s.init();
        s.update();

        let result = step(&mut s, HomeMsg::RegionsFailed("504".to_string()));
        assert!(matches!(result, UpdateResult::Error(_)));
        assert!(s.state.region_options().is_empty());

        // Confirm stays blocked.
        assert!(matches!(step(&mut s, HomeMsg::Confirm), UpdateResult::Idle));
    }

    #[test]
    fn test_scenario_d_city_fetch_failure_degrades() {
        let mut s = screen();
        step(&mut s, HomeMsg::RegionsLoaded(regions(&["SP"])));
        step(&mut s, HomeMsg::PickRegion(Choice::Value("SP".to_string())));

        let result = step(
            &mut s,
            HomeMsg::CitiesFailed {
                generation: 1,
                error: "504".to_string(),
            },
        );

        assert!(matches!(result, UpdateResult::Error(_)));
        assert!(s.state.city_options().is_empty());
        assert!(!s.state.is_complete());
        assert!(matches!(step(&mut s, HomeMsg::Confirm), UpdateResult::Idle));
    }

    #[test]
    fn test_city_pick_without_region_reports_invalid_state() {
        let mut s = screen();
        let result = step(&mut s, HomeMsg::PickCity(Choice::Value("Campinas".to_string())));

        assert!(matches!(result, UpdateResult::Error(_)));
        assert_eq!(s.state.city(), &Choice::Unselected);
    }

    #[test]
    fn test_confirm_on_incomplete_selection_is_ignored() {
        let mut s = screen();
        step(&mut s, HomeMsg::RegionsLoaded(regions(&["SP"])));
        step(&mut s, HomeMsg::PickRegion(Choice::Value("SP".to_string())));

        assert!(matches!(step(&mut s, HomeMsg::Confirm), UpdateResult::Idle));
    }

    #[test]
    fn test_preselect_applies_when_lists_arrive() {
        let mut s = screen_with(Preselect {
            region: Some("sp".to_string()),
            city: Some("campinas".to_string()),
        });

        // The region preselect is queued and processed in the same drain,
        // producing the dependent city fetch.
        let result = step(&mut s, HomeMsg::RegionsLoaded(regions(&["SP", "RJ"])));
        assert!(matches!(result, UpdateResult::Commands(_)));
        assert_eq!(s.state.region(), &Choice::Value("SP".to_string()));

        step(
            &mut s,
            HomeMsg::CitiesLoaded {
                generation: 1,
                cities: cities(&["São Paulo", "Campinas"]),
            },
        );

        assert_eq!(s.state.city(), &Choice::Value("Campinas".to_string()));
        assert!(s.state.is_complete());
    }

    #[test]
    fn test_unknown_preselect_is_dropped() {
        let mut s = screen_with(Preselect {
            region: Some("XX".to_string()),
            city: None,
        });

        step(&mut s, HomeMsg::RegionsLoaded(regions(&["SP"])));

        assert_eq!(s.state.region(), &Choice::Unselected);
        assert!(s.preselect.region.is_none());
    }

    #[test]
    fn test_reload_refetches_cities_with_fresh_generation() {
        let mut s = screen();
        step(&mut s, HomeMsg::RegionsLoaded(regions(&["SP"])));
        step(&mut s, HomeMsg::PickRegion(Choice::Value("SP".to_string())));
        step(
            &mut s,
            HomeMsg::CitiesLoaded {
                generation: 1,
                cities: cities(&["Campinas"]),
            },
        );

        let result = step(&mut s, HomeMsg::Initialize);
        assert!(matches!(result, UpdateResult::Commands(ref cmds) if cmds.len() == 2));

        // The pre-reload generation is now stale.
        step(
            &mut s,
            HomeMsg::CitiesLoaded {
                generation: 1,
                cities: cities(&["Santos"]),
            },
        );
        assert_eq!(labels(s.state.city_options()), vec!["Campinas"]);

        step(
            &mut s,
            HomeMsg::CitiesLoaded {
                generation: 2,
                cities: cities(&["Campinas", "Santos"]),
            },
        );
        assert_eq!(labels(s.state.city_options()), vec!["Campinas", "Santos"]);
    }

    #[test]
    fn test_copy_without_complete_selection_is_a_noop() {
        let mut s = screen();
        assert!(matches!(
            step(&mut s, HomeMsg::CopySelection),
            UpdateResult::Idle
        ));
    }

    #[test]
    fn test_escape_closes_the_screen() {
        let mut s = screen();
        assert!(s.handle_key(KeyEvent::from(KeyCode::Esc)));
        assert!(matches!(s.update(), UpdateResult::Close));
    }
}
