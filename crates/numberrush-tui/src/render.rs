//! Crossterm drawing for every screen.

use crate::app::{App, Screen, LEVEL_COUNT, MENU_ITEMS};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use numberrush_core::{Mode, Position, GRID_SIZE};
use std::io;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, _term_height) = terminal::size()?;

    execute!(
        stdout,
        Hide,
        SetBackgroundColor(app.theme.bg),
        Clear(ClearType::All)
    )?;

    match app.screen {
        Screen::Menu => render_menu(stdout, app)?,
        Screen::Playing => render_game(stdout, app, term_width)?,
        Screen::Levels => render_levels(stdout, app)?,
        Screen::Settings => render_settings(stdout, app)?,
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_menu(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    execute!(
        stdout,
        MoveTo(4, 2),
        SetForegroundColor(theme.accent),
        Print("N U M B E R R U S H")
    )?;
    for (i, item) in MENU_ITEMS.iter().enumerate() {
        let selected = i == app.menu_selection;
        let (fg, marker) = if selected {
            (theme.accent, "> ")
        } else {
            (theme.text, "  ")
        };
        execute!(
            stdout,
            MoveTo(6, 5 + i as u16 * 2),
            SetForegroundColor(fg),
            Print(format!("{}{}", marker, item))
        )?;
    }
    execute!(
        stdout,
        MoveTo(4, 14),
        SetForegroundColor(theme.cell_border),
        Print("arrows move | enter select | q quit")
    )?;
    Ok(())
}

fn render_game(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let config = app.session.config();

    // Header: level, target, mode
    execute!(
        stdout,
        MoveTo(2, 1),
        SetForegroundColor(theme.accent),
        Print("NumberRush"),
        SetForegroundColor(theme.text),
        Print(format!(
            "   Level {}   Target: {}   Mode: {}",
            config.level,
            config.target_sum,
            app.session.mode().label()
        ))
    )?;

    render_grid(stdout, app, 2, 3)?;

    let below = 3 + GRID_SIZE as u16 * 2 + 2;
    render_expression(stdout, app, 2, below)?;

    if let Some(ref message) = app.message {
        let x = 2.min(term_width.saturating_sub(1));
        execute!(
            stdout,
            MoveTo(x, below + 2),
            SetForegroundColor(theme.accent),
            Print(message)
        )?;
    }

    execute!(
        stdout,
        MoveTo(2, below + 4),
        SetForegroundColor(theme.cell_border),
        Print("enter pick | + - * / operator | r reset | n next | m mode | q menu")
    )?;
    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let values = app.session.grid().values();
    let chain = app.session.selection().cells();
    let border: String = format!("+{}", "---+".repeat(GRID_SIZE));

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.cell_border),
        Print(&border)
    )?;

    for row in 0..GRID_SIZE {
        let cell_y = y + 1 + row as u16 * 2;
        execute!(
            stdout,
            MoveTo(x, cell_y),
            SetForegroundColor(theme.cell_border),
            Print("|")
        )?;
        for col in 0..GRID_SIZE {
            let pos = Position::new(row, col);
            let in_chain = chain.contains(&pos);
            let bg = if pos == app.cursor {
                theme.accent
            } else if in_chain || app.session.edit_pick() == Some(pos) {
                theme.selected
            } else {
                theme.cell_bg
            };
            let fg = if pos == app.cursor {
                theme.bg
            } else {
                theme.number
            };
            execute!(
                stdout,
                SetBackgroundColor(bg),
                SetForegroundColor(fg),
                Print(format!(" {} ", values[row][col])),
                SetBackgroundColor(theme.bg),
                SetForegroundColor(theme.cell_border),
                Print("|")
            )?;
        }
        execute!(
            stdout,
            MoveTo(x, cell_y + 1),
            SetForegroundColor(theme.cell_border),
            Print(&border)
        )?;
    }
    Ok(())
}

/// The chain so far, e.g. `2 + 3 * _ = 5`.
fn render_expression(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let selection = app.session.selection();
    let grid = app.session.grid();

    if app.session.mode() == Mode::Edit {
        execute!(
            stdout,
            MoveTo(x, y),
            SetForegroundColor(theme.text),
            Print("Edit mode: pick two neighboring cells to swap them")
        )?;
        return Ok(());
    }

    let mut expr = String::new();
    for (i, pos) in selection.cells().iter().enumerate() {
        if i > 0 {
            let gap = match selection.operators()[i - 1] {
                Some(op) => op.symbol(),
                None => '_',
            };
            expr.push_str(&format!(" {} ", gap));
        }
        expr.push_str(&grid.value(*pos).to_string());
    }
    if expr.is_empty() {
        expr.push_str("(no cells selected)");
    }
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.text),
        Print(format!(
            "Chain: {}   Current: {}",
            expr,
            selection.running_result()
        ))
    )?;
    Ok(())
}

fn render_levels(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    execute!(
        stdout,
        MoveTo(4, 2),
        SetForegroundColor(theme.accent),
        Print("Select Level")
    )?;

    // 4 rows of 5 buttons
    for level in 1..=LEVEL_COUNT {
        let idx = level - 1;
        let x = 4 + (idx % 5) as u16 * 6;
        let y = 4 + (idx / 5) as u16 * 2;
        let locked = level > app.session.max_unlocked_level();
        let selected = level == app.level_selection;
        let bg = if selected { theme.selected } else { theme.cell_bg };
        let fg = if locked { theme.cell_border } else { theme.number };
        let label = if locked {
            " XX ".to_string()
        } else {
            format!(" {:2} ", level)
        };
        execute!(
            stdout,
            MoveTo(x, y),
            SetBackgroundColor(bg),
            SetForegroundColor(fg),
            Print(label),
            SetBackgroundColor(theme.bg)
        )?;
    }

    if let Some(ref message) = app.message {
        execute!(
            stdout,
            MoveTo(4, 13),
            SetForegroundColor(theme.accent),
            Print(message)
        )?;
    }
    execute!(
        stdout,
        MoveTo(4, 15),
        SetForegroundColor(theme.cell_border),
        Print("arrows move | enter play | q back")
    )?;
    Ok(())
}

fn render_settings(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    execute!(
        stdout,
        MoveTo(4, 2),
        SetForegroundColor(theme.accent),
        Print("Game Settings")
    )?;

    for (i, (label, hex)) in app.settings.fields().iter().enumerate() {
        let selected = i == app.settings_selection;
        let fg = if selected { theme.accent } else { theme.text };
        let marker = if selected { "> " } else { "  " };
        let swatch = crate::theme::parse_hex(hex).unwrap_or(theme.cell_bg);
        execute!(
            stdout,
            MoveTo(4, 4 + i as u16),
            SetForegroundColor(fg),
            Print(format!("{}{:<16} {}", marker, label, hex)),
            SetBackgroundColor(swatch),
            Print("   "),
            SetBackgroundColor(theme.bg)
        )?;
    }

    if let Some(ref message) = app.message {
        execute!(
            stdout,
            MoveTo(4, 13),
            SetForegroundColor(theme.accent),
            Print(message)
        )?;
    }
    execute!(
        stdout,
        MoveTo(4, 15),
        SetForegroundColor(theme.cell_border),
        Print("arrows pick | left/right color | s save | d defaults | q back")
    )?;
    Ok(())
}
