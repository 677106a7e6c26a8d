//! Parameter form state for a selected tool.
//!
//! Built from the tool's [`ParamSpec`]s: one field per parameter, with
//! focus movement, in-place editing, flag toggling, select cycling, a
//! live command preview, and reset-to-defaults. Submitting validates
//! and builds the final command string through the tool itself.

use arsenal_core::tools::{command_for, ParamKind, ParamSpec, ParamValues, ToolSpec};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::Key;
use crate::theme::Theme;


// ---------------------------------------------------------------------------
// FieldState
// ---------------------------------------------------------------------------

/// One form field. Text-like kinds edit `text`; flags use `flag`;
/// selects use `select_idx` into the spec's choices.
pub struct FieldState {
    pub spec: ParamSpec,
    pub text: String,
    pub flag: bool,
    pub select_idx: usize,
}

impl FieldState {
    fn from_spec(spec: ParamSpec) -> Self {
        let default = spec.default.clone().unwrap_or_default();
        let (text, flag, select_idx) = match &spec.kind {
            ParamKind::Flag => (String::new(), default == "true", 0),
            ParamKind::Select { choices } => {
                let idx = choices.iter().position(|c| *c == default).unwrap_or(0);
                (String::new(), false, idx)
            }
            _ => (default, false, 0),
        };
        FieldState {
            spec,
            text,
            flag,
            select_idx,
        }
    }

    /// The value as shown in the form.
    pub fn display_value(&self) -> String {
        match &self.spec.kind {
            ParamKind::Flag => {
                if self.flag {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            ParamKind::Select { choices } => choices
                .get(self.select_idx)
                .cloned()
                .unwrap_or_default(),
            _ if self.spec.sensitive && !self.text.is_empty() => "*".repeat(self.text.len()),
            _ => self.text.clone(),
        }
    }
}


// ---------------------------------------------------------------------------
// FormState
// ---------------------------------------------------------------------------

/// What a form key press resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// A valid command was built. `confirm` is set for risky tools.
    Submit { command: String, confirm: bool },
    Cancel,
}

/// Form state for one tool.
pub struct FormState {
    tool: &'static dyn ToolSpec,
    fields: Vec<FieldState>,
    focused: usize,
    error: Option<String>,
}

impl FormState {
    pub fn new(tool: &'static dyn ToolSpec) -> Self {
        let fields = tool
            .params()
            .into_iter()
            .map(FieldState::from_spec)
            .collect();
        FormState {
            tool,
            fields,
            focused: 0,
            error: None,
        }
    }

    pub fn tool_name(&self) -> &str {
        self.tool.name()
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Collect the current field values.
    pub fn values(&self) -> ParamValues {
        let mut values = ParamValues::new();
        for field in &self.fields {
            match &field.spec.kind {
                ParamKind::Flag => values.set_flag(&field.spec.name, field.flag),
                ParamKind::Select { choices } => {
                    if let Some(choice) = choices.get(field.select_idx) {
                        values.set_text(&field.spec.name, choice);
                    }
                }
                ParamKind::MultiSelect { .. } => {
                    let items: Vec<String> = field
                        .text
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect();
                    if !items.is_empty() {
                        values.set_list(&field.spec.name, items);
                    }
                }
                _ => {
                    if !field.text.is_empty() {
                        values.set_text(&field.spec.name, &field.text);
                    }
                }
            }
        }
        values
    }

    /// The command the current values would run.
    pub fn preview(&self) -> Result<String, String> {
        command_for(self.tool, &self.values())
    }

    /// Reset every field to its spec default.
    pub fn reset(&mut self) {
        self.fields = self
            .tool
            .params()
            .into_iter()
            .map(FieldState::from_spec)
            .collect();
        self.error = None;
    }

    pub fn handle_key(&mut self, key: Key) -> Option<FormAction> {
        match key {
            Key::Escape => return Some(FormAction::Cancel),
            Key::Enter => match self.preview() {
                Ok(command) => {
                    return Some(FormAction::Submit {
                        command,
                        confirm: self.tool.risk_level().needs_confirmation(),
                    });
                }
                Err(message) => {
                    self.error = Some(message);
                }
            },
            Key::Down | Key::Tab => {
                if self.focused + 1 < self.fields.len() {
                    self.focused += 1;
                } else if key == Key::Tab {
                    self.focused = 0;
                }
            }
            Key::Up | Key::BackTab => {
                if self.focused > 0 {
                    self.focused -= 1;
                } else if key == Key::BackTab && !self.fields.is_empty() {
                    self.focused = self.fields.len() - 1;
                }
            }
            Key::Ctrl('r') => self.reset(),
            Key::Ctrl('u') => {
                if let Some(field) = self.fields.get_mut(self.focused) {
                    field.text.clear();
                }
                self.error = None;
            }
            Key::Backspace => {
                if let Some(field) = self.fields.get_mut(self.focused) {
                    field.text.pop();
                }
                self.error = None;
            }
            Key::Left | Key::Right | Key::Char(' ') => {
                self.adjust_focused(key);
                self.error = None;
            }
            Key::Char(ch) => {
                if let Some(field) = self.fields.get_mut(self.focused) {
                    if !matches!(
                        field.spec.kind,
                        ParamKind::Flag | ParamKind::Select { .. }
                    ) {
                        field.text.push(ch);
                        self.error = None;
                    }
                }
            }
            _ => {}
        }
        None
    }

    /// Space toggles flags; left/right (and space) cycle selects.
    fn adjust_focused(&mut self, key: Key) {
        let Some(field) = self.fields.get_mut(self.focused) else {
            return;
        };
        match &field.spec.kind {
            ParamKind::Flag => {
                if key == Key::Char(' ') {
                    field.flag = !field.flag;
                }
            }
            ParamKind::Select { choices } if !choices.is_empty() => match key {
                Key::Left => {
                    field.select_idx = field
                        .select_idx
                        .checked_sub(1)
                        .unwrap_or(choices.len() - 1);
                }
                Key::Right | Key::Char(' ') => {
                    field.select_idx = (field.select_idx + 1) % choices.len();
                }
                _ => {}
            },
            _ => {
                if key == Key::Char(' ') {
                    field.text.push(' ');
                }
            }
        }
    }

    // -------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(format!(" {} ", self.tool.name()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = vec![
            Line::styled(self.tool.description().to_string(), theme.dim_style()),
            Line::raw(""),
        ];
        for (index, field) in self.fields.iter().enumerate() {
            let marker = if index == self.focused { "> " } else { "  " };
            let required = if field.spec.required { " *" } else { "" };
            let value = field.display_value();
            let shown = if value.is_empty() {
                field
                    .spec
                    .placeholder
                    .clone()
                    .map(|hint| format!("({})", hint))
                    .unwrap_or_default()
            } else {
                value
            };
            let label_style = if index == self.focused {
                theme.accent_style()
            } else {
                theme.text_style()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{}{}{}: ", marker, field.spec.label, required), label_style),
                Span::styled(shown, theme.text_style()),
            ]));
        }

        lines.push(Line::raw(""));
        match self.preview() {
            Ok(command) => lines.push(Line::from(vec![
                Span::styled("$ ", theme.dim_style()),
                Span::styled(command, Style::default().fg(theme.success.to_ratatui())),
            ])),
            Err(_) => lines.push(Line::styled(
                "(fill in the required fields for a preview)",
                theme.dim_style(),
            )),
        }
        if let Some(error) = &self.error {
            lines.push(Line::styled(
                error.clone(),
                Style::default().fg(theme.danger.to_ratatui()),
            ));
        }
        lines.push(Line::styled(
            "Enter run   Space toggle   Tab next   Ctrl-r reset   Esc back",
            theme.dim_style(),
        ));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use arsenal_core::tools::ToolRegistry;

    fn form_for(name: &str) -> FormState {
        let registry = ToolRegistry::standard();
        FormState::new(registry.find(name).unwrap())
    }

    fn type_text(form: &mut FormState, text: &str) {
        for ch in text.chars() {
            form.handle_key(Key::Char(ch));
        }
    }

    #[test]
    fn new_form_picks_up_defaults() {
        let form = form_for("masscan");
        // target (empty), ports default, rate default.
        assert_eq!(form.fields()[0].text, "");
        assert_eq!(form.fields()[1].text, "80,443");
        assert_eq!(form.fields()[2].text, "1000");
    }

    #[test]
    fn select_default_index_matches_spec() {
        let form = form_for("nmap");
        // scan_type defaults to "Quick Scan", the first choice.
        assert_eq!(form.fields()[1].select_idx, 0);
        // timing defaults to "T3 (Normal)", the fourth choice.
        assert_eq!(form.fields()[3].select_idx, 3);
    }

    #[test]
    fn typing_edits_focused_text_field() {
        let mut form = form_for("nmap");
        type_text(&mut form, "10.0.0.1");
        assert_eq!(form.fields()[0].text, "10.0.0.1");
        form.handle_key(Key::Backspace);
        assert_eq!(form.fields()[0].text, "10.0.0.");
    }

    #[test]
    fn tab_wraps_focus() {
        let mut form = form_for("wifite");
        let count = form.fields().len();
        for _ in 0..count {
            form.handle_key(Key::Tab);
        }
        assert_eq!(form.focused(), 0);
        form.handle_key(Key::BackTab);
        assert_eq!(form.focused(), count - 1);
    }

    #[test]
    fn space_toggles_flag() {
        let mut form = form_for("wifite");
        // Field 1 is the wpa flag, default on.
        form.handle_key(Key::Tab);
        assert!(form.fields()[1].flag);
        form.handle_key(Key::Char(' '));
        assert!(!form.fields()[1].flag);
        form.handle_key(Key::Char(' '));
        assert!(form.fields()[1].flag);
    }

    #[test]
    fn arrows_cycle_select() {
        let mut form = form_for("nmap");
        form.handle_key(Key::Tab); // focus scan_type
        form.handle_key(Key::Right);
        assert_eq!(form.fields()[1].select_idx, 1);
        form.handle_key(Key::Left);
        form.handle_key(Key::Left);
        // Wraps to the last choice.
        let choice_count = match &form.fields()[1].spec.kind {
            ParamKind::Select { choices } => choices.len(),
            _ => unreachable!(),
        };
        assert_eq!(form.fields()[1].select_idx, choice_count - 1);
    }

    #[test]
    fn typing_does_not_touch_flags_or_selects() {
        let mut form = form_for("wifite");
        form.handle_key(Key::Tab); // wpa flag
        form.handle_key(Key::Char('z'));
        assert!(form.fields()[1].text.is_empty());
    }

    #[test]
    fn submit_without_required_sets_error() {
        let mut form = form_for("nmap");
        let action = form.handle_key(Key::Enter);
        assert!(action.is_none());
        assert!(form.error().unwrap().contains("Target Host/IP"));
    }

    #[test]
    fn error_clears_on_edit() {
        let mut form = form_for("nmap");
        form.handle_key(Key::Enter);
        assert!(form.error().is_some());
        form.handle_key(Key::Char('x'));
        assert!(form.error().is_none());
    }

    #[test]
    fn submit_builds_command() {
        let mut form = form_for("nmap");
        type_text(&mut form, "10.0.0.1");
        let action = form.handle_key(Key::Enter);
        match action {
            Some(FormAction::Submit { command, confirm }) => {
                assert_eq!(command, "nmap -F -T3 10.0.0.1");
                assert!(!confirm);
            }
            other => panic!("expected submit, got {:?}", other),
        }
    }

    #[test]
    fn risky_tool_submit_requires_confirmation() {
        let mut form = form_for("sqlmap");
        type_text(&mut form, "http://t.example/?id=1");
        let action = form.handle_key(Key::Enter);
        match action {
            Some(FormAction::Submit { confirm, .. }) => assert!(confirm),
            other => panic!("expected submit, got {:?}", other),
        }
    }

    #[test]
    fn escape_cancels() {
        let mut form = form_for("binwalk");
        assert_eq!(form.handle_key(Key::Escape), Some(FormAction::Cancel));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut form = form_for("masscan");
        type_text(&mut form, "10.0.0.0/8");
        form.handle_key(Key::Tab);
        form.handle_key(Key::Ctrl('u'));
        form.handle_key(Key::Ctrl('r'));
        assert_eq!(form.fields()[0].text, "");
        assert_eq!(form.fields()[1].text, "80,443");
    }

    #[test]
    fn multiselect_splits_commas() {
        let mut form = form_for("theHarvester");
        type_text(&mut form, "example.com");
        form.handle_key(Key::Tab);
        form.handle_key(Key::Tab); // sources field
        type_text(&mut form, "bing, google");
        let values = form.values();
        assert_eq!(
            values.list("source").unwrap(),
            &["bing".to_string(), "google".to_string()]
        );
    }

    #[test]
    fn preview_tracks_current_values() {
        let mut form = form_for("masscan");
        assert!(form.preview().is_err());
        type_text(&mut form, "10.0.0.0/8");
        let preview = form.preview().unwrap();
        assert!(preview.ends_with("masscan 10.0.0.0/8 -p80,443 --rate 1000"));
    }

    #[test]
    fn sensitive_fields_are_masked_in_display() {
        let field = FieldState {
            spec: ParamSpec::text("key", "Key").sensitive(),
            text: "secret".into(),
            flag: false,
            select_idx: 0,
        };
        assert_eq!(field.display_value(), "******");
    }
}
