use crate::application::{App, AppMode, Focus};
use crate::presentation::view::TaskPane;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

pub fn render_ui<S>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[1]);

    render_lists(f, app, panes[0]);
    match &app.view.detail {
        Some(pane) => render_task_pane(f, app, pane, panes[1]),
        None => render_empty_task_pane(f, panes[1]),
    }

    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header<S>(f: &mut Frame, app: &App<S>, area: Rect) {
    let selected = app
        .view
        .detail
        .as_ref()
        .map(|pane| pane.title.as_str())
        .unwrap_or("none");
    let header = Paragraph::new(format!(
        "tlist - Terminal To-Do | Lists: {} | Selected: {}",
        app.view.lists.len(),
        selected
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_lists<S>(f: &mut Frame, app: &App<S>, area: Rect) {
    let focused = app.focus == Focus::Lists && app.mode == AppMode::Normal;

    let items: Vec<ListItem> = app
        .view
        .lists
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let mut style = if row.active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if focused && index == app.list_cursor {
                style = style.bg(Color::Blue).fg(Color::White);
            }
            let marker = if row.active { "> " } else { "  " };
            ListItem::new(format!("{marker}{}", row.name)).style(style)
        })
        .collect();

    let list = List::new(items).block(pane_block("Lists", focused));
    f.render_widget(list, area);
}

fn render_task_pane<S>(f: &mut Frame, app: &App<S>, pane: &TaskPane, area: Rect) {
    let focused = app.focus == Focus::Tasks && app.mode == AppMode::Normal;
    let block = pane_block(&pane.title, focused);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let count = Paragraph::new(pane.remaining.as_str()).style(Style::default().fg(Color::Gray));
    f.render_widget(count, rows[0]);

    let items: Vec<ListItem> = pane
        .tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let checkbox = if task.complete { "[x]" } else { "[ ]" };
            let mut style = if task.complete {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            if focused && index == app.task_cursor {
                style = style.bg(Color::Blue).fg(Color::White);
            }
            ListItem::new(format!("{checkbox} {}", task.name)).style(style)
        })
        .collect();

    f.render_widget(List::new(items), rows[1]);
}

fn render_empty_task_pane(f: &mut Frame, area: Rect) {
    let placeholder = Paragraph::new("No list selected")
        .block(Block::default().borders(Borders::ALL).title("Tasks"))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(placeholder, area);
}

fn pane_block(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title.to_string())
}

fn render_status_bar<S>(f: &mut Frame, app: &App<S>, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "n: new list | a: new task | Enter: select/toggle | c: clear completed | D: delete list | ?: help | q: quit".to_string()
            }
        }
        AppMode::NewList => format!("New list: {} (Enter to add, Esc to cancel)", app.input),
        AppMode::NewTask => format!("New task: {} (Enter to add, Esc to cancel)", app.input),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::NewList => Style::default().fg(Color::Yellow),
            AppMode::NewTask => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("tlist Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"TLIST KEY REFERENCE

=== LISTS ===
n               Create a new list (type a name, Enter to add)
Enter           Show the highlighted list in the task pane
D               Delete the list shown in the task pane
                Nothing is selected afterwards

=== TASKS ===
a               Add a task to the selected list
Enter/Space     Toggle the highlighted task
c               Clear completed tasks from the selected list

=== NAVIGATION ===
Tab / ← →       Switch between the lists and task panes
↑↓ or j/k       Move the highlight
F1 or ?         Show this help
q               Quit

=== NAME ENTRY ===
← → Home End    Move the cursor
Backspace/Del   Delete characters
Enter           Submit (blank names are ignored)
Esc             Cancel

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

Every change is saved immediately."#;
