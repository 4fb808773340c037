use colored::*;

use crate::models::{status::HistoryStatus, todo::Todo};

/// Get the terminal width, defaulting to 80 if unavailable
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Get the appropriate status glyph for a todo
pub fn get_status_glyph(todo: &Todo) -> ColoredString {
    if todo.completed {
        "✓".green()
    } else {
        "○".normal()
    }
}

/// Render a single todo line with number, glyph, title, and right-aligned date
pub fn render_todo_line(todo: &Todo) {
    let terminal_width = get_terminal_width();

    let id_str = format!("{:>3}", todo.number);
    let glyph = get_status_glyph(todo);
    let title = &todo.title;

    let left_section = format!("  {}  {}  {}", id_str, glyph, title);

    let styled_left = if todo.completed {
        left_section.dimmed()
    } else {
        left_section.bold()
    };

    let right_section = format_date(todo.created_at);
    let left_visible_len = format!("  {}  {}  {}", id_str, " ", title).len();
    let right_visible_len = right_section.chars().count();
    let total_content = left_visible_len + right_visible_len;

    if total_content + 4 < terminal_width {
        let padding = terminal_width - total_content - 2;
        println!("{}{}{}", styled_left, " ".repeat(padding), right_section.dimmed());
    } else {
        // Not enough space for right alignment, just print normally
        println!("{}", styled_left);
    }
}

/// Render the full detail view of a todo
pub fn render_todo_detail(todo: &Todo) {
    println!(
        "\n  {}  {}  {}",
        format!("#{}", todo.number).dimmed(),
        get_status_glyph(todo),
        todo.title.bold()
    );
    if !todo.task.is_empty() {
        println!("\n  {}", todo.task);
    }
    println!("\n  {} {}", "Created:".dimmed(), format_date(todo.created_at).dimmed());
    println!();
}

/// Render a view header with title and count
pub fn render_view_header(title: &str, count: usize) {
    let todo_word = if count == 1 { "todo" } else { "todos" };
    println!("\n  {} ({} {})\n", title.cyan().bold(), count, todo_word);
}

/// Render the undo/redo hint shown after each editor step
pub fn render_history_hint(status: &HistoryStatus) {
    let undo = if status.is_undo_available {
        "undo".normal()
    } else {
        "undo".dimmed()
    };
    let redo = if status.is_redo_available {
        "redo".normal()
    } else {
        "redo".dimmed()
    };
    println!("  {} {} {} {}", "history:".dimmed(), undo, "·".dimmed(), redo);
}

/// Format a date for display (e.g., "Feb 15", "Today", "Yesterday")
pub fn format_date(timestamp: jiff::Timestamp) -> String {
    let zoned = jiff::Zoned::new(timestamp, jiff::tz::TimeZone::system());
    let date = zoned.date();
    let today = jiff::Zoned::now().date();

    if date == today {
        "Today".to_string()
    } else if date == today.yesterday().expect("yesterday should be valid") {
        "Yesterday".to_string()
    } else {
        // Format as "Feb 15"
        date.strftime("%b %d").to_string()
    }
}
