//! The event loop: terminal setup and teardown, draw, poll, tick.
//!
//! The loop draws a frame, polls for keys with the remainder of the
//! tick as the timeout, then on every tick drains the console's event
//! queue and prunes notifications. The drain cadence is the configured
//! `tick_ms` (50 ms by default); blocking process I/O never happens
//! here.

use std::io;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use arsenal_core::config::AppConfig;
use arsenal_core::exec::{RunSession, StartError};
use arsenal_core::history::{RunHistory, RunRecord};
use arsenal_core::tools::ToolRegistry;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;
use ratatui::Terminal;

use crate::app::{App, AppAction, AppState, Key, PendingAction};
use crate::console::ConsoleView;
use crate::form::{FormAction, FormState};
use crate::notification::{NotificationCenter, NotificationKind};
use crate::theme::Theme;
use crate::views;


/// Everything one frame needs, split out so `terminal.draw` can borrow
/// it alongside the mutable terminal borrow.
struct RenderState<'a> {
    app: &'a App,
    console: &'a ConsoleView,
    form: Option<&'a FormState>,
    registry: &'a ToolRegistry,
    theme: &'a Theme,
    notifications: &'a NotificationCenter,
}


/// The TUI runner: terminal, state machine, console, catalog.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    console: ConsoleView,
    form: Option<FormState>,
    registry: ToolRegistry,
    theme: Theme,
    notifications: NotificationCenter,
    history: RunHistory,
    tick_rate: Duration,
    last_tick: Instant,
}

impl Tui {
    /// Enter raw mode and the alternate screen.
    pub fn new(config: &AppConfig) -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let console = ConsoleView::new(
            RunSession::configured(config),
            config.default_save_path.clone().into(),
        );

        Ok(Tui {
            terminal,
            app: App::new(),
            console,
            form: None,
            registry: ToolRegistry::standard(),
            theme: Theme::by_name(&config.theme),
            notifications: NotificationCenter::new(50),
            history: RunHistory::new(100),
            tick_rate: config.tick(),
            last_tick: Instant::now(),
        })
    }

    /// Run until quit. The terminal is restored on return and on drop.
    pub fn run(&mut self) -> Result<(), io::Error> {
        self.app.navigate_to(AppState::Overview);

        loop {
            let state = RenderState {
                app: &self.app,
                console: &self.console,
                form: self.form.as_ref(),
                registry: &self.registry,
                theme: &self.theme,
                notifications: &self.notifications,
            };
            self.terminal.draw(|frame| render_frame(frame, &state))?;

            let timeout = self
                .tick_rate
                .checked_sub(self.last_tick.elapsed())
                .unwrap_or(Duration::ZERO);

            if event::poll(timeout)? {
                if let Event::Key(key_event) = event::read()? {
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key_event.code == KeyCode::Char('c')
                        && key_event.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break;
                    }
                    let key = crossterm_to_key(key_event.code, key_event.modifiers);
                    if self.handle_key(key) {
                        break;
                    }
                }
            }

            if self.last_tick.elapsed() >= self.tick_rate {
                self.tick();
                self.last_tick = Instant::now();
            }
        }

        // Do not leave a child running past the UI.
        if self.console.is_active() {
            self.console.stop();
        }
        self.shutdown()
    }

    // -------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------

    /// Route one key. Returns `true` to quit.
    fn handle_key(&mut self, key: Key) -> bool {
        // The form owns its keys while it has focus.
        if matches!(self.app.state, AppState::ToolForm { .. }) {
            let action = self.form.as_mut().and_then(|form| form.handle_key(key));
            match action {
                Some(FormAction::Submit { command, confirm }) => {
                    if confirm {
                        self.app.transition(AppState::Confirm {
                            prompt: format!("Run: {}", command),
                            action: PendingAction::RunCommand { command },
                        });
                    } else {
                        self.start_command(&command);
                    }
                }
                Some(FormAction::Cancel) => {
                    self.app.back();
                }
                None => {}
            }
            return false;
        }

        if let Some(action) = self.app.handle_key(key) {
            return self.handle_action(action);
        }
        false
    }

    /// Carry out an [`AppAction`]. Returns `true` to quit.
    fn handle_action(&mut self, action: AppAction) -> bool {
        match action {
            AppAction::Quit => return true,
            AppAction::RunCommand(command) => self.start_command(&command),
            AppAction::StopRun => {
                if self.console.stop() {
                    self.notifications.push(
                        NotificationKind::Warning,
                        "Termination requested",
                        now_ms(),
                        Some(4000),
                    );
                }
            }
            AppAction::ClearConsole => self.console.clear(),
            AppAction::SaveOutput => match self.console.save() {
                Ok(path) => {
                    let message = format!("Output saved to {}", path.display());
                    self.notifications.push(
                        NotificationKind::Info,
                        &message,
                        now_ms(),
                        Some(4000),
                    );
                }
                Err(e) => {
                    self.notifications.push(
                        NotificationKind::Error,
                        &format!("Save failed: {}", e),
                        now_ms(),
                        Some(6000),
                    );
                }
            },
            AppAction::Activate => self.activate_selection(),
            AppAction::SelectNext => {
                let max = self.selection_max();
                self.app.select_next(max);
            }
            AppAction::SelectPrev => self.app.select_prev(),
            AppAction::ScrollUp => self.console.scroll_up(1),
            AppAction::ScrollDown => self.console.scroll_down(1),
            AppAction::PageUp => self.console.scroll_up(10),
            AppAction::PageDown => self.console.scroll_down(10),
            AppAction::FollowTail => self.console.follow_tail(),
        }
        false
    }

    /// Start a command in the console and focus it.
    fn start_command(&mut self, command: &str) {
        match self.console.start(command, None, now_ms()) {
            Ok(()) => {
                if self.app.state != AppState::Console {
                    self.app.transition(AppState::Console);
                }
            }
            Err(StartError::AlreadyRunning) => {
                self.app
                    .set_status("A command is already running; stop it first", now_ms());
            }
        }
    }

    /// Enter on the selected overview/category item.
    fn activate_selection(&mut self) {
        match self.app.state.clone() {
            AppState::Overview | AppState::Startup => {
                let categories = self.registry.categories();
                if let Some(category) = categories.get(self.app.selected_index) {
                    self.app
                        .transition(AppState::CategoryView { category: *category });
                }
            }
            AppState::CategoryView { category } => {
                let tools = self.registry.by_category(category);
                if let Some(tool) = tools.get(self.app.selected_index) {
                    self.form = Some(FormState::new(*tool));
                    self.app.transition(AppState::ToolForm {
                        tool: tool.name().to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    fn selection_max(&self) -> usize {
        match &self.app.state {
            AppState::Overview | AppState::Startup => {
                self.registry.categories().len().saturating_sub(1)
            }
            AppState::CategoryView { category } => {
                self.registry.by_category(*category).len().saturating_sub(1)
            }
            _ => 0,
        }
    }

    // -------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------

    /// One drain cycle: apply pending events, record completions, prune.
    fn tick(&mut self) {
        let now = now_ms();
        let outcome = self.console.tick(now);

        if let Some(run) = &outcome.finished {
            self.history.push(RunRecord::from_outcome(run));
            if run.exit_code == 0 {
                self.notifications.push(
                    NotificationKind::Success,
                    &format!("Command finished ({} lines)", run.line_count),
                    now,
                    Some(5000),
                );
            } else {
                self.notifications.push(
                    NotificationKind::Error,
                    &format!("Command failed (exit code {})", run.exit_code),
                    now,
                    Some(6000),
                );
            }
        }
        if let Some(message) = &outcome.error {
            self.notifications.push(
                NotificationKind::Error,
                &format!("Error: {}", message),
                now,
                Some(6000),
            );
        }

        self.app.clear_expired_status(now);
        self.notifications.prune(now);
    }

    // -------------------------------------------------------------------
    // Shutdown
    // -------------------------------------------------------------------

    fn shutdown(&mut self) -> Result<(), io::Error> {
        terminal::disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}


// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Full-screen layout: title bar, navigation panel beside the console,
/// bottom bar, notification overlay.
fn render_frame(frame: &mut Frame, state: &RenderState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let title = Line::from(vec![
        Span::styled("Arsenal", state.theme.accent_style()),
        Span::styled("  security tool console", state.theme.dim_style()),
    ]);
    frame.render_widget(ratatui::widgets::Paragraph::new(title), rows[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    render_nav_panel(frame, panels[0], state);
    state.console.render(
        frame,
        panels[1],
        state.theme,
        state.app.state == AppState::Console,
    );

    views::render_bottom_bar(frame, rows[2], state.theme, state.app);
    render_notification(frame, panels[1], state);
}

/// Dispatch the navigation panel by view.
fn render_nav_panel(frame: &mut Frame, area: Rect, state: &RenderState) {
    match state.app.nav_state() {
        AppState::Confirm { prompt, .. } => {
            views::render_confirm(frame, area, state.theme, prompt);
        }
        AppState::HelpView => views::render_help(frame, area, state.theme),
        AppState::ToolForm { .. } => {
            if let Some(form) = state.form {
                form.render(frame, area, state.theme);
            }
        }
        AppState::CategoryView { category } => {
            let tools = state.registry.by_category(*category);
            views::render_category(
                frame,
                area,
                state.theme,
                *category,
                &tools,
                state.app.selected_index,
            );
        }
        _ => views::render_overview(
            frame,
            area,
            state.theme,
            state.registry,
            state.app.selected_index,
        ),
    }
}

/// Latest notification as a banner over the console panel.
fn render_notification(frame: &mut Frame, area: Rect, state: &RenderState) {
    let Some(entry) = state.notifications.latest() else {
        return;
    };
    let color = match entry.kind {
        NotificationKind::Error => state.theme.danger,
        NotificationKind::Warning => state.theme.warning,
        NotificationKind::Success => state.theme.success,
        NotificationKind::Info => state.theme.info,
    };
    let style = Style::default().fg(color.to_ratatui());
    let block = ratatui::widgets::Block::default()
        .borders(ratatui::widgets::Borders::ALL)
        .border_style(style);
    let banner = ratatui::widgets::Paragraph::new(entry.summary())
        .block(block)
        .style(style);
    let banner_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 3.min(area.height),
    };
    frame.render_widget(banner, banner_area);
}


// ---------------------------------------------------------------------------
// Key conversion
// ---------------------------------------------------------------------------

/// Convert a crossterm key event into the domain [`Key`] type.
pub fn crossterm_to_key(code: KeyCode, modifiers: KeyModifiers) -> Key {
    if modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(ch) = code {
            return Key::Ctrl(ch);
        }
    }
    match code {
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::F(n) => Key::F(n),
        _ => Key::Char('\0'),
    }
}

/// Milliseconds since the epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
