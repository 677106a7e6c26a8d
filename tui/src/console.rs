//! The console view: the embedded terminal-output panel.
//!
//! Owns the [`RunSession`] and the scroll state. The event loop calls
//! `tick` on the drain cadence; run/stop/clear/save arrive from the key
//! handlers. The view follows the tail of the log until the user
//! scrolls, and `f` re-enables following.

use std::io;
use std::path::{Path, PathBuf};

use arsenal_core::exec::{DrainOutcome, RunSession, RunStatus, StartError, StyledLine};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::theme::Theme;


pub struct ConsoleView {
    session: RunSession,
    save_path: PathBuf,
    scroll: usize,
    follow: bool,
}

impl ConsoleView {
    pub fn new(session: RunSession, save_path: PathBuf) -> Self {
        ConsoleView {
            session,
            save_path,
            scroll: 0,
            follow: true,
        }
    }

    // -------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------

    /// Drain pending events into the log. Called every tick.
    pub fn tick(&mut self, now_ms: u64) -> DrainOutcome {
        self.session.drain(now_ms)
    }

    /// Start a command; the log follows the tail again.
    pub fn start(
        &mut self,
        command: &str,
        working_dir: Option<&Path>,
        now_ms: u64,
    ) -> Result<(), StartError> {
        self.session.start(command, working_dir, now_ms)?;
        self.follow = true;
        Ok(())
    }

    pub fn stop(&mut self) -> bool {
        self.session.stop()
    }

    pub fn clear(&mut self) {
        self.session.clear();
        self.scroll = 0;
    }

    /// Save the log to the configured path; returns it for display.
    pub fn save(&self) -> io::Result<&Path> {
        self.session.save(&self.save_path)?;
        Ok(&self.save_path)
    }

    pub fn session_mut(&mut self) -> &mut RunSession {
        &mut self.session
    }

    pub fn status(&self) -> RunStatus {
        self.session.status()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn lines(&self) -> &[StyledLine] {
        self.session.lines()
    }

    // -------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------

    pub fn scroll_up(&mut self, amount: usize) {
        self.follow = false;
        self.scroll = self.scroll.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.follow = false;
        self.scroll = (self.scroll + amount).min(self.max_scroll());
    }

    pub fn follow_tail(&mut self) {
        self.follow = true;
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    fn max_scroll(&self) -> usize {
        self.session.lines().len().saturating_sub(1)
    }

    /// The scroll offset a viewport of `height` rows should render at.
    fn effective_scroll(&self, height: usize) -> usize {
        let lines = self.session.lines().len();
        if self.follow {
            lines.saturating_sub(height)
        } else {
            self.scroll.min(lines.saturating_sub(1))
        }
    }

    // -------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------

    /// Render the panel: bordered log with a one-line status bar.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let border = if focused {
            theme.accent_style()
        } else {
            theme.border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Terminal Output ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let offset = self.effective_scroll(chunks[0].height as usize);
        let text: Vec<Line> = self
            .session
            .lines()
            .iter()
            .skip(offset)
            .take(chunks[0].height as usize)
            .map(|line| {
                Line::styled(
                    line.text.trim_end_matches('\n').to_string(),
                    theme.style_for(line.style),
                )
            })
            .collect();
        frame.render_widget(Paragraph::new(text), chunks[0]);

        let (status_color, status_text) = match self.status() {
            RunStatus::Idle => (theme.status_idle, "\u{25cf} Idle"),
            RunStatus::Running => (theme.status_running, "\u{25cf} Running"),
        };
        let controls = if self.status().is_running() {
            "s stop   x clear   w save   f follow"
        } else {
            "x clear   w save   / command"
        };
        let status_line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(status_color.to_ratatui())),
            Span::styled(format!("   {}", controls), theme.dim_style()),
        ]);
        frame.render_widget(Paragraph::new(status_line), chunks[1]);
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use arsenal_core::exec::LineStyle;
    use std::time::{Duration, Instant};

    fn console() -> ConsoleView {
        ConsoleView::new(
            RunSession::new(),
            std::env::temp_dir().join("arsenal-console-test.txt"),
        )
    }

    fn tick_to_idle(console: &mut ConsoleView) -> DrainOutcome {
        let start = Instant::now();
        let mut now_ms = 1000;
        loop {
            let outcome = console.tick(now_ms);
            if outcome.finished.is_some() || outcome.error.is_some() {
                return outcome;
            }
            if start.elapsed() > Duration::from_secs(5) {
                panic!("run did not finish in time");
            }
            std::thread::sleep(Duration::from_millis(20));
            now_ms += 20;
        }
    }

    #[test]
    fn start_runs_and_follows() {
        let mut console = console();
        console.scroll_up(1); // stop following
        assert!(!console.is_following());

        console.start("echo hello", None, 1000).unwrap();
        assert!(console.is_following());

        let outcome = tick_to_idle(&mut console);
        assert_eq!(outcome.finished.unwrap().exit_code, 0);
        assert!(console
            .lines()
            .iter()
            .any(|line| line.text == "hello\n" && line.style == LineStyle::Output));
    }

    #[test]
    fn second_start_rejected_while_active() {
        let mut console = console();
        console.start("sleep 2", None, 1000).unwrap();
        assert_eq!(
            console.start("echo nope", None, 1100),
            Err(StartError::AlreadyRunning)
        );
        console.stop();
        tick_to_idle(&mut console);
    }

    #[test]
    fn clear_resets_scroll() {
        let mut console = console();
        console.scroll_down(5);
        console.clear();
        assert!(console.lines().is_empty());
        assert_eq!(console.effective_scroll(1), 0);
    }

    #[test]
    fn save_writes_log_and_returns_path() {
        let mut console = console();
        console.start("printf 'out\\n'", None, 1000).unwrap();
        tick_to_idle(&mut console);

        let path = console.save().unwrap().to_path_buf();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, console.session_mut().log_text());
        assert!(contents.contains("out\n"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn manual_scroll_disables_follow() {
        let mut console = console();
        assert!(console.is_following());
        console.scroll_down(1);
        assert!(!console.is_following());
        console.follow_tail();
        assert!(console.is_following());
    }

    #[test]
    fn effective_scroll_follows_tail() {
        let mut console = console();
        console
            .start("printf '1\\n2\\n3\\n4\\n5\\n'", None, 1000)
            .unwrap();
        tick_to_idle(&mut console);

        let total = console.lines().len();
        assert_eq!(console.effective_scroll(3), total - 3);
        assert_eq!(console.effective_scroll(100), 0);
    }

    #[test]
    fn scroll_clamps_to_log_bounds() {
        let mut console = console();
        console.start("printf 'a\\nb\\n'", None, 1000).unwrap();
        tick_to_idle(&mut console);

        console.scroll_down(100);
        let max = console.lines().len() - 1;
        assert_eq!(console.effective_scroll(1), max);
        console.scroll_up(100);
        assert_eq!(console.effective_scroll(1), 0);
    }

    #[test]
    fn stop_without_run_is_noop() {
        let mut console = console();
        assert!(!console.stop());
    }
}
