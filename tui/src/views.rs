//! Renderers for the navigation views: overview, category, help,
//! confirm dialog, and the top/bottom chrome.

use arsenal_core::tools::{Category, ToolRegistry, ToolSpec};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::theme::Theme;


/// The category overview: one card per category with its tools.
pub fn render_overview(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    registry: &ToolRegistry,
    selected: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Arsenal ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = vec![
        Line::styled(
            "Select a category to start. Only test systems you are authorized to test.",
            theme.dim_style(),
        ),
        Line::raw(""),
    ];
    for (index, category) in registry.categories().into_iter().enumerate() {
        let marker = if index == selected { "> " } else { "  " };
        let title_style = if index == selected {
            theme.accent_style().add_modifier(Modifier::BOLD)
        } else {
            theme.text_style()
        };
        lines.push(Line::styled(
            format!("{}{}", marker, category.label()),
            title_style,
        ));
        lines.push(Line::styled(
            format!("    {}", category.blurb()),
            theme.dim_style(),
        ));
        let names: Vec<&str> = registry
            .by_category(category)
            .iter()
            .map(|tool| tool.name())
            .collect();
        lines.push(Line::styled(
            format!("    Tools: {}", names.join(", ")),
            theme.dim_style(),
        ));
        lines.push(Line::raw(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}


/// The tool list for one category.
pub fn render_category(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    category: Category,
    tools: &[&'static dyn ToolSpec],
    selected: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(format!(" {} ", category.label()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = vec![
        Line::styled(category.blurb().to_string(), theme.dim_style()),
        Line::raw(""),
    ];
    for (index, tool) in tools.iter().enumerate() {
        let marker = if index == selected { "> " } else { "  " };
        let name_style = if index == selected {
            theme.accent_style().add_modifier(Modifier::BOLD)
        } else {
            theme.text_style()
        };
        let mut tags = vec![tool.risk_level().label().to_string()];
        if tool.requires_root() {
            tags.push("root".to_string());
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{}{}", marker, tool.name()), name_style),
            Span::styled(format!("  [{}]", tags.join(", ")), theme.dim_style()),
        ]));
        lines.push(Line::styled(
            format!("    {}", tool.description()),
            theme.dim_style(),
        ));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Enter open form   Esc back",
        theme.dim_style(),
    ));

    frame.render_widget(Paragraph::new(lines), inner);
}


/// The key reference screen.
pub fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = concat!(
        "Arsenal help\n",
        "\n",
        "  j/k, arrows  Select\n",
        "  Enter        Open category / tool form / run\n",
        "  c            Focus the console\n",
        "  /  :         Quick command bar\n",
        "  ?            This help\n",
        "  Esc          Back\n",
        "  q, Ctrl-C    Quit\n",
        "\n",
        "Console\n",
        "  s            Stop the running command\n",
        "  x            Clear the log\n",
        "  w            Save the log to the configured path\n",
        "  f            Follow the tail again\n",
        "  arrows/PgUp  Scroll\n",
        "\n",
        "High and critical risk tools ask for confirmation before they\n",
        "run. Commands execute with your privileges; tools that need\n",
        "root are prefixed with sudo.\n",
    );
    let paragraph = Paragraph::new(text)
        .style(theme.text_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}


/// The confirmation dialog for risky commands.
pub fn render_confirm(frame: &mut Frame, area: Rect, theme: &Theme, prompt: &str) {
    let text = format!(
        "\n  {}\n\n  Continue only with proper authorization.\n\n  [y] Yes   [n] No\n",
        prompt,
    );
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(theme.warning.to_ratatui()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.warning.to_ratatui()))
                .title(" Confirm "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}


/// The bottom bar: quick-command input or state hint.
pub fn render_bottom_bar(frame: &mut Frame, area: Rect, theme: &Theme, app: &App) {
    let in_command = app.state.label() == "command";
    let text = if in_command {
        format!("> {}", app.input.text())
    } else if let Some(message) = app.status_message() {
        format!(" {}", message)
    } else {
        format!(" {} | / command  ? help  q quit", app.state.label())
    };
    let style = if in_command {
        theme.accent_style()
    } else {
        theme.dim_style()
    };
    frame.render_widget(Paragraph::new(text).style(style), area);

    if in_command {
        frame.set_cursor_position((area.x + 2 + app.input.cursor_pos() as u16, area.y));
    }
}
