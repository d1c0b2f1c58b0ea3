use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, error};

use crate::Theme;
use crate::core::{AppMessage, Command, Screen, UpdateResult};
use crate::directory::Directory;
use crate::home::{HomeScreen, Preselect};
use crate::points::PointsScreen;
use crate::tui::{Event, Tui};
use crate::widget::StatusBar;

/// The active route.
///
/// The home screen outlives a trip to the points screen: coming back
/// restores the picker exactly as it was left.
enum Route {
    Home,
    Points(PointsScreen),
}

pub struct App {
    home: HomeScreen,
    route: Route,
    status_bar: StatusBar,
    theme: Theme,
    should_quit: bool,
    should_suspend: bool,
    message_tx: UnboundedSender<AppMessage>,
    message_rx: UnboundedReceiver<AppMessage>,
}

impl App {
    #[must_use]
    pub fn new(directory: Arc<dyn Directory>, theme: Theme, preselect: Preselect) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            home: HomeScreen::new(directory, preselect),
            route: Route::Home,
            status_bar: StatusBar::new(),
            theme,
            should_quit: false,
            should_suspend: false,
            message_tx,
            message_rx,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(60.0, 4.0)?;
        tui.enter()?;

        self.home.init();
        self.drive_active_screen();

        loop {
            self.handle_event(&mut tui).await?;
            self.handle_messages(&mut tui)?;
            if self.should_suspend {
                tui.suspend()?;
                self.message_tx.send(AppMessage::Resume)?;
                self.message_tx.send(AppMessage::ClearScreen)?;
                tui.enter()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        Ok(())
    }

    fn active_screen(&mut self) -> &mut dyn Screen {
        match &mut self.route {
            Route::Home => &mut self.home,
            Route::Points(points) => points,
        }
    }

    async fn handle_event(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };

        match event {
            Event::Init => {}
            Event::Quit => self.message_tx.send(AppMessage::Quit)?,
            Event::Error(e) => self.message_tx.send(AppMessage::DisplayError(e))?,
            Event::Tick => self.message_tx.send(AppMessage::Tick)?,
            Event::Render => self.message_tx.send(AppMessage::Render)?,
            Event::Resize(width, height) => {
                self.message_tx.send(AppMessage::Resize(width, height))?;
            }
            Event::Key(key) => self.handle_key(key),
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('z') {
            let _ = self.message_tx.send(AppMessage::Suspend);
            return;
        }

        if self.active_screen().handle_key(key) {
            // Any handled input clears a lingering error from the bar.
            self.status_bar.clear_error();
            self.drive_active_screen();
        }
    }

    fn handle_messages(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        while let Ok(message) = self.message_rx.try_recv() {
            if !matches!(message, AppMessage::Tick | AppMessage::Render) {
                debug!("Handling message: {:?}", message);
            }

            match message {
                AppMessage::Tick => self.active_screen().handle_tick(),
                AppMessage::Render => self.render(tui)?,
                // draw() autoresizes the fullscreen viewport; a repaint is enough.
                AppMessage::Resize(_, _) => self.render(tui)?,
                AppMessage::Suspend => self.should_suspend = true,
                AppMessage::Resume => self.should_suspend = false,
                AppMessage::Quit => self.should_quit = true,
                AppMessage::ClearScreen => tui.clear()?,
                AppMessage::DisplayError(e) => {
                    error!("{e}");
                    self.status_bar.set_error(e);
                }
                AppMessage::CommandCompleted => self.drive_active_screen(),
                AppMessage::OpenPoints(params) => {
                    let mut points = PointsScreen::new(params);
                    points.init();
                    self.route = Route::Points(points);
                    self.drive_active_screen();
                }
                AppMessage::GoBack => match &self.route {
                    Route::Home => self.should_quit = true,
                    Route::Points(_) => self.route = Route::Home,
                },
            }
        }
        Ok(())
    }

    /// Drain the active screen's message queue and act on the result.
    fn drive_active_screen(&mut self) {
        match self.active_screen().update() {
            UpdateResult::Idle => {}
            UpdateResult::Commands(commands) => {
                for command in commands {
                    self.spawn_command(command);
                }
            }
            UpdateResult::OpenPoints(params) => {
                let _ = self.message_tx.send(AppMessage::OpenPoints(params));
            }
            UpdateResult::Close => {
                let _ = self.message_tx.send(AppMessage::GoBack);
            }
            UpdateResult::Error(e) => {
                let _ = self.message_tx.send(AppMessage::DisplayError(e));
            }
        }
    }

    fn spawn_command(&self, command: Box<dyn Command>) {
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let name = command.name();
            debug!("Running command: {name}");
            if let Err(e) = command.execute().await {
                let _ = tx.send(AppMessage::DisplayError(format!("{name} failed: {e}")));
            }
            let _ = tx.send(AppMessage::CommandCompleted);
        });
    }

    fn render(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        let theme = self.theme;
        let breadcrumbs = self.active_screen().breadcrumbs();
        let hints = self.active_screen().hints();

        tui.draw(|frame| {
            let [main_area, status_area] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
                    .areas(frame.area());

            match &mut self.route {
                Route::Home => self.home.render(frame, main_area, &theme),
                Route::Points(points) => points.render(frame, main_area, &theme),
            }

            self.status_bar
                .render(frame, status_area, &theme, &breadcrumbs, &hints);
        })?;
        Ok(())
    }
}
