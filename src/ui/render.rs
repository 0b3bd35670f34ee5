//! Screen drawing.
//!
//! The whole screen is redrawn after every event. Layout, top to bottom:
//! status indicators, stack rows (oldest first), the buffer, the keypad with
//! the first shortcut bound to each button, and the last copy/paste message.

use super::app::App;
use crate::items::{ButtonItem, ButtonVariant, buffer_item, keypad, stack_items};
use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use std::io::{self, Write};

const MAX_WIDTH: usize = 48;
const CELL_WIDTH: usize = 12;
/// Rows used by everything except the stack.
const FIXED_ROWS: usize = 4 + 10 + 2;

fn right_align(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", " ".repeat(width - len), text)
    }
}

/// Indicator, stack and buffer lines.
///
/// The stack gets `stack_rows` lines, but the top entry is always shown since
/// it is the next binary operand. When entries are hidden and there is room,
/// the first stack line counts them.
pub fn screen_lines(app: &App, width: usize, stack_rows: usize) -> Vec<String> {
    let calc = app.calculator();
    let mut lines = Vec::new();

    let mut header = format!(
        "{}  {}  {}",
        calc.angle_mode().label(),
        if calc.alt_enabled() { "2nd" } else { "   " },
        if calc.will_clear_all() { "C" } else { "CE" },
    );
    if app.paste_pending() {
        header.push_str("  pasting…");
    }
    lines.push(header);
    lines.push("─".repeat(width));

    let items = stack_items(calc);
    let rows = stack_rows.max(1);
    let visible = if items.len() > rows && rows > 1 {
        rows - 1
    } else {
        items.len().min(rows)
    };
    let hidden = items.len() - visible;
    if hidden > 0 && rows > 1 {
        lines.push(format!("⋮ {} more", hidden));
    }
    for item in &items[hidden..] {
        lines.push(right_align(&item.display_with_marker(), width));
    }

    lines.push(right_align(&buffer_item(calc).display_with_marker(), width));
    lines.push("─".repeat(width));
    lines
}

fn button_cell(app: &App, button: &ButtonItem) -> String {
    let hint = app
        .keymap()
        .shortcuts_for(button.action)
        .first()
        .map(|s| s.to_string())
        .unwrap_or_default();
    let label_width = CELL_WIDTH.saturating_sub(hint.chars().count() + 1);
    format!("{:<label_width$} {}", button.label, hint)
}

fn queue_button(out: &mut impl Write, app: &App, button: &ButtonItem) -> io::Result<()> {
    match button.variant {
        ButtonVariant::Normal => {}
        ButtonVariant::Dark => queue!(out, SetAttribute(Attribute::Bold))?,
        ButtonVariant::Light => queue!(out, SetForegroundColor(Color::Cyan))?,
        ButtonVariant::Active => queue!(out, SetAttribute(Attribute::Reverse))?,
    }
    queue!(
        out,
        Print(button_cell(app, button)),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Print(" ")
    )
}

pub fn draw(out: &mut impl Write, app: &App) -> io::Result<()> {
    let (columns, rows) = terminal::size()?;
    let width = usize::from(columns).min(MAX_WIDTH);
    let stack_rows = usize::from(rows).saturating_sub(FIXED_ROWS);

    queue!(out, Clear(ClearType::All))?;

    let mut row: u16 = 0;
    for line in screen_lines(app, width, stack_rows) {
        queue!(out, MoveTo(0, row), Print(line))?;
        row += 1;
    }

    let pad = keypad(app.calculator());
    for buttons in pad.extra.iter().chain(pad.main.iter()) {
        queue!(out, MoveTo(0, row))?;
        for button in buttons {
            queue_button(out, app, button)?;
        }
        row += 1;
    }

    if let Some(status) = app.status() {
        queue!(out, MoveTo(0, row + 1), Print(status))?;
    }

    out.flush()
}
