//! The TUI state machine.
//!
//! [`App`] owns view navigation, the quick-command input line, status
//! messages, and selection bookkeeping. It performs no I/O and never
//! touches the runner directly; key handling returns an [`AppAction`]
//! for the event loop to carry out.

use arsenal_core::tools::Category;

use crate::input::InputLine;


// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The view the user is looking at.
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// Initial state before the first frame.
    Startup,
    /// Category overview (the landing page).
    Overview,
    /// Tool list for one category.
    CategoryView { category: Category },
    /// Parameter form for one tool.
    ToolForm { tool: String },
    /// Console focus: keys drive the output panel.
    Console,
    HelpView,
    /// Confirmation gate before running a risky command.
    Confirm {
        prompt: String,
        action: PendingAction,
    },
    /// Free-text command entry (the quick bar).
    QuickCommand,
}

impl AppState {
    /// Short label for the status bar.
    pub fn label(&self) -> &str {
        match self {
            AppState::Startup => "startup",
            AppState::Overview => "overview",
            AppState::CategoryView { .. } => "category",
            AppState::ToolForm { .. } => "form",
            AppState::Console => "console",
            AppState::HelpView => "help",
            AppState::Confirm { .. } => "confirm",
            AppState::QuickCommand => "command",
        }
    }
}


// ---------------------------------------------------------------------------
// PendingAction / AppAction
// ---------------------------------------------------------------------------

/// An action parked behind a confirmation prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    RunCommand { command: String },
}

/// What the event loop should do in response to a key.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Start a command in the console.
    RunCommand(String),
    /// Signal the active invocation to terminate.
    StopRun,
    ClearConsole,
    SaveOutput,
    Quit,
    /// Enter on the selected list item.
    Activate,
    SelectNext,
    SelectPrev,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    /// Re-enable tail-follow in the console.
    FollowTail,
}


// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level UI state: current view, navigation stack, quick-command
/// input, transient status message, and list selection.
pub struct App {
    pub state: AppState,
    previous_states: Vec<AppState>,
    status_message: Option<(String, u64)>,
    status_ttl_ms: u64,
    pub input: InputLine,
    pub selected_index: usize,
}

impl App {
    pub fn new() -> Self {
        App {
            state: AppState::Startup,
            previous_states: Vec::new(),
            status_message: None,
            status_ttl_ms: 5000,
            input: InputLine::new(),
            selected_index: 0,
        }
    }

    // -------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------

    /// Switch views, pushing the current one onto the back stack.
    pub fn transition(&mut self, new_state: AppState) {
        let old = std::mem::replace(&mut self.state, new_state);
        self.previous_states.push(old);
        self.selected_index = 0;
    }

    /// Pop the back stack. Returns the state that was left, or `None`
    /// when the stack is empty.
    pub fn back(&mut self) -> Option<AppState> {
        let prev = self.previous_states.pop()?;
        let current = std::mem::replace(&mut self.state, prev);
        self.selected_index = 0;
        Some(current)
    }

    /// Jump to a state, clearing the back stack.
    pub fn navigate_to(&mut self, state: AppState) {
        self.previous_states.clear();
        self.state = state;
        self.selected_index = 0;
    }

    pub fn stack_depth(&self) -> usize {
        self.previous_states.len()
    }

    /// The view to render in the navigation panel. While the console or
    /// the quick bar has focus, the panel keeps showing the most recent
    /// navigation view.
    pub fn nav_state(&self) -> &AppState {
        static FALLBACK: AppState = AppState::Overview;
        let is_nav =
            |state: &AppState| !matches!(state, AppState::Console | AppState::QuickCommand);
        if is_nav(&self.state) {
            return &self.state;
        }
        self.previous_states
            .iter()
            .rev()
            .find(|state| is_nav(state))
            .unwrap_or(&FALLBACK)
    }

    // -------------------------------------------------------------------
    // Status message
    // -------------------------------------------------------------------

    pub fn set_status(&mut self, message: &str, now_ms: u64) {
        self.status_message = Some((message.to_string(), now_ms));
    }

    pub fn clear_expired_status(&mut self, now_ms: u64) {
        if let Some((_, created)) = &self.status_message {
            if now_ms.saturating_sub(*created) >= self.status_ttl_ms {
                self.status_message = None;
            }
        }
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(text, _)| text.as_str())
    }

    // -------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_next(&mut self, max_index: usize) {
        if self.selected_index < max_index {
            self.selected_index += 1;
        }
    }

    // -------------------------------------------------------------------
    // Key routing
    // -------------------------------------------------------------------

    /// Route a key according to the current view. `ToolForm` keys are
    /// handled by the form state in the event loop, not here.
    pub fn handle_key(&mut self, key: Key) -> Option<AppAction> {
        match &self.state {
            AppState::Confirm { .. } => self.handle_confirm_key(key),
            AppState::QuickCommand => self.handle_command_key(key),
            AppState::Console => self.handle_console_key(key),
            _ => self.handle_view_key(key),
        }
    }

    fn handle_confirm_key(&mut self, key: Key) -> Option<AppAction> {
        match key {
            Key::Char('y') | Key::Char('Y') | Key::Enter => {
                let action = match &self.state {
                    AppState::Confirm { action, .. } => action.clone(),
                    _ => return None,
                };
                self.back();
                match action {
                    PendingAction::RunCommand { command } => {
                        Some(AppAction::RunCommand(command))
                    }
                }
            }
            Key::Char('n') | Key::Char('N') | Key::Escape => {
                self.back();
                None
            }
            _ => None,
        }
    }

    fn handle_command_key(&mut self, key: Key) -> Option<AppAction> {
        match key {
            Key::Escape => {
                self.input.clear();
                self.back();
                None
            }
            Key::Enter => {
                let text = self.input.submit();
                self.back();
                if text.is_empty() {
                    None
                } else {
                    Some(AppAction::RunCommand(text))
                }
            }
            Key::Backspace => {
                self.input.delete_back();
                None
            }
            Key::Delete => {
                self.input.delete_forward();
                None
            }
            Key::Left => {
                self.input.move_left();
                None
            }
            Key::Right => {
                self.input.move_right();
                None
            }
            Key::Up => {
                self.input.history_up();
                None
            }
            Key::Down => {
                self.input.history_down();
                None
            }
            Key::Ctrl('a') | Key::Home => {
                self.input.move_home();
                None
            }
            Key::Ctrl('e') | Key::End => {
                self.input.move_end();
                None
            }
            Key::Ctrl('u') => {
                self.input.clear();
                None
            }
            Key::Char(ch) => {
                self.input.insert(ch);
                None
            }
            _ => None,
        }
    }

    fn handle_console_key(&mut self, key: Key) -> Option<AppAction> {
        match key {
            Key::Char('s') => Some(AppAction::StopRun),
            Key::Char('x') => Some(AppAction::ClearConsole),
            Key::Char('w') => Some(AppAction::SaveOutput),
            Key::Char('f') => Some(AppAction::FollowTail),
            Key::Up | Key::Char('k') => Some(AppAction::ScrollUp),
            Key::Down | Key::Char('j') => Some(AppAction::ScrollDown),
            Key::PageUp => Some(AppAction::PageUp),
            Key::PageDown => Some(AppAction::PageDown),
            _ => self.handle_view_key(key),
        }
    }

    fn handle_view_key(&mut self, key: Key) -> Option<AppAction> {
        match key {
            Key::Char('q') => Some(AppAction::Quit),
            Key::Char('?') => {
                self.transition(AppState::HelpView);
                None
            }
            Key::Char('/') | Key::Char(':') => {
                self.transition(AppState::QuickCommand);
                None
            }
            Key::Char('c') => {
                if self.state != AppState::Console {
                    self.transition(AppState::Console);
                }
                None
            }
            Key::Char('j') | Key::Down => Some(AppAction::SelectNext),
            Key::Char('k') | Key::Up => Some(AppAction::SelectPrev),
            Key::Enter => Some(AppAction::Activate),
            Key::Escape => {
                self.back();
                None
            }
            _ => None,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}


// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A simplified key event.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    BackTab,
    Escape,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Ctrl(char),
    F(u8),
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
