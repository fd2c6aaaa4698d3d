//! Main application loop for the terminal dashboard.

use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::{Frame, Terminal};

use crate::channel::Channel;
use crate::config::Config;
use crate::error::Result;
use crate::feed::{DisplayFeed, PanelData};
use crate::monitor::input::{Action, InputHandler};
use crate::monitor::panels::{ReadingsTable, TrendChart, ValueBox};
use crate::monitor::theme::Theme;
use crate::scheduler::RefreshScheduler;

/// Longest the loop blocks on input before checking the scheduler again.
const MAX_POLL: Duration = Duration::from_millis(100);

const HELP_TEXT: &str = "\
 q / Esc     quit
 d / n       show day / night
 t / Tab     toggle channel
 r / F5      refresh now
 ?           close help";

/// The terminal dashboard.
#[derive(Debug)]
pub struct App {
    config: Config,
    scheduler: RefreshScheduler,
    input: InputHandler,
    channel: Channel,
    theme: Theme,
    show_help: bool,
    should_quit: bool,
}

impl App {
    /// Creates an application with an entropy-seeded scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: Config) -> Result<Self> {
        let scheduler = RefreshScheduler::from_config(&config)?;
        Self::with_scheduler(config, scheduler)
    }

    /// Creates an application around an existing scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured mode is not a channel.
    pub fn with_scheduler(config: Config, scheduler: RefreshScheduler) -> Result<Self> {
        let channel = config.mode()?;
        Ok(Self {
            config,
            scheduler,
            input: InputHandler::new(),
            channel,
            theme: Theme::for_channel(channel),
            show_help: false,
            should_quit: false,
        })
    }

    /// Runs the application main loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup or rendering fails.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;

        info!(
            "dashboard started on {} channel, refreshing every {:?}",
            self.channel,
            self.scheduler.interval()
        );
        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        stdout().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.scheduler.poll(Instant::now());

            terminal.draw(|frame| self.render(frame))?;

            let timeout = self.scheduler.next_due(Instant::now()).min(MAX_POLL);
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let action = self.input.handle_key(key);
                        self.handle_action(action);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Applies an input action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Help => self.show_help = !self.show_help,
            Action::Select(channel) => self.set_channel(channel),
            Action::ToggleChannel => self.set_channel(self.channel.toggle()),
            Action::Refresh => {
                self.scheduler.tick();
            }
            Action::None => {}
        }
    }

    fn set_channel(&mut self, channel: Channel) {
        self.channel = channel;
        self.theme = Theme::for_channel(channel);
    }

    /// Renders the dashboard for the selected channel.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let table_height = u16::try_from(self.config.global.deque_size + 3)
            .unwrap_or(u16::MAX)
            .min(area.height / 3)
            .max(4);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(table_height),
                Constraint::Min(6),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);

        let boxes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let feed = self
            .scheduler
            .feed()
            .with_unit(self.config.display.unit.as_str());
        let panel = feed.panel(self.channel);
        let latest_value = panel.as_ref().ok().map(|p| p.latest.value());
        self.render_values(frame, &feed, latest_value, boxes[0], boxes[1]);

        match panel {
            Ok(panel) => self.render_panel(frame, &panel, chunks[2], chunks[3]),
            Err(e) if e.is_recoverable() => {}
            Err(e) => {
                warn!("cannot render {} channel: {e}", self.channel);
                frame.render_widget(
                    Paragraph::new(e.to_string())
                        .block(Block::default().title(" Error ").borders(Borders::ALL)),
                    chunks[2],
                );
            }
        }

        if self.show_help {
            let popup = centered(area, 40, 9);
            frame.render_widget(Clear, popup);
            frame.render_widget(
                Paragraph::new(HELP_TEXT).block(
                    Block::default()
                        .title(" Help ")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(self.theme.accent())),
                ),
                popup,
            );
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let text = format!(
            "{} | {} channel | tick {} | every {}s | ? help",
            self.config.display.title,
            self.channel,
            self.scheduler.tick_count(),
            self.scheduler.interval().as_secs()
        );
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(self.theme.fg())
                        .bg(self.theme.bg())
                        .add_modifier(Modifier::BOLD),
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(self.theme.accent())),
                ),
            area,
        );
    }

    /// Value boxes read through the feed; an empty channel shows the
    /// waiting text.
    fn render_values(
        &self,
        frame: &mut Frame,
        feed: &DisplayFeed<'_>,
        latest_value: Option<f64>,
        value_area: Rect,
        time_area: Rect,
    ) {
        let profile = self.config.profile(self.channel);
        let value_style = match latest_value {
            Some(value) => Style::default()
                .fg(self.theme.temperature.sample_in(value, profile.min, profile.max))
                .add_modifier(Modifier::BOLD),
            None => Style::default().fg(self.theme.fg()),
        };

        frame.render_widget(
            ValueBox::new(
                "Current Temperature",
                feed.latest_text(self.channel).ok(),
                &self.theme,
            )
            .body_style(value_style),
            value_area,
        );
        frame.render_widget(
            ValueBox::new(
                "Current Date and Time",
                feed.latest_timestamp(self.channel).ok(),
                &self.theme,
            ),
            time_area,
        );
    }

    fn render_panel(&self, frame: &mut Frame, panel: &PanelData, table_area: Rect, chart_area: Rect) {
        let profile = self.config.profile(self.channel);
        frame.render_widget(
            ReadingsTable::new(&panel.table, panel.trend.as_ref(), &self.theme),
            table_area,
        );
        frame.render_widget(TrendChart::new(panel, profile, &self.theme), chart_area);
    }

    /// Channel currently displayed.
    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// The scheduler driving the dashboard.
    #[must_use]
    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    /// Whether help is visible.
    #[must_use]
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    /// Returns whether the app should quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::panels::WAITING_TEXT;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        let config = Config::default();
        let scheduler = RefreshScheduler::seeded(&config, 17).unwrap();
        App::with_scheduler(config, scheduler).unwrap()
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_app_starts_on_configured_channel() {
        let mut config = Config::default();
        config.global.mode = "night".to_string();
        let scheduler = RefreshScheduler::seeded(&config, 1).unwrap();
        let app = App::with_scheduler(config, scheduler).unwrap();

        assert_eq!(app.channel(), Channel::Night);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_app_handle_quit() {
        let mut app = app();
        app.handle_action(Action::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_app_handle_help() {
        let mut app = app();
        app.handle_action(Action::Help);
        assert!(app.show_help());
        app.handle_action(Action::Help);
        assert!(!app.show_help());
    }

    #[test]
    fn test_channel_switching() {
        let mut app = app();

        app.handle_action(Action::ToggleChannel);
        assert_eq!(app.channel(), Channel::Night);
        app.handle_action(Action::Select(Channel::Day));
        assert_eq!(app.channel(), Channel::Day);
    }

    #[test]
    fn test_refresh_ticks_scheduler() {
        let mut app = app();
        app.handle_action(Action::Refresh);
        assert_eq!(app.scheduler().tick_count(), 1);
    }

    #[test]
    fn test_render_waiting_before_first_tick() {
        let app = app();
        let screen = draw(&app);

        assert!(screen.contains(WAITING_TEXT));
        assert!(screen.contains("Current Temperature"));
    }

    #[test]
    fn test_render_latest_reading_after_tick() {
        let mut app = app();
        app.handle_action(Action::Refresh);
        app.handle_action(Action::Refresh);

        let feed = app.scheduler().feed();
        let latest = feed.latest_text(Channel::Day).unwrap();
        let stamp = feed.latest_timestamp(Channel::Day).unwrap();
        let screen = draw(&app);

        assert!(screen.contains(&latest), "screen should show {latest}");
        assert!(screen.contains(&stamp), "screen should show {stamp}");
        assert!(screen.contains("Most Recent Readings"));
        assert!(screen.contains("best_fit_line"));
        assert!(!screen.contains(WAITING_TEXT));
    }

    #[test]
    fn test_value_boxes_use_configured_unit() {
        let mut config = Config::default();
        config.display.unit = "C".to_string();
        let scheduler = RefreshScheduler::seeded(&config, 5).unwrap();
        let mut app = App::with_scheduler(config, scheduler).unwrap();
        app.handle_action(Action::Refresh);

        let expected = app
            .scheduler()
            .feed()
            .with_unit("C")
            .latest_text(Channel::Day)
            .unwrap();
        assert!(expected.ends_with(" C"));
        assert!(draw(&app).contains(&expected), "screen should show {expected}");
    }

    #[test]
    fn test_render_help_overlay() {
        let mut app = app();
        app.handle_action(Action::Help);

        assert!(draw(&app).contains("toggle channel"));
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let mut config = Config::default();
        let scheduler = RefreshScheduler::seeded(&config, 1).unwrap();
        config.global.mode = "dawn".to_string();

        assert!(App::with_scheduler(config, scheduler).is_err());
    }
}
