//! Terminal session and cell drawing for the interactive app.

use std::io::{self, Write};

use crossterm::{cursor, execute, queue, style, terminal};

use crate::types::{Cell, Rgb, Style};

/// Raw mode plus the alternate screen for as long as the value lives.
pub struct TerminalSession {
    stdout: io::Stdout,
}

impl TerminalSession {
    pub fn enter() -> anyhow::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;
        Ok(TerminalSession { stdout })
    }

    pub fn out(&mut self) -> &mut io::Stdout {
        &mut self.stdout
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Queue a cell grid with its top-left corner at (`x`, `y`), clipped to
/// `width` x `height`.
pub fn draw_grid(
    out: &mut impl Write,
    (x, y): (u16, u16),
    (width, height): (u16, u16),
    cells: &[Vec<Cell>],
) -> anyhow::Result<()> {
    for (row_idx, row) in cells.iter().take(height as usize).enumerate() {
        queue!(out, cursor::MoveTo(x, y + row_idx as u16))?;
        for cell in row.iter().take(width as usize) {
            print_cell(out, cell)?;
        }
    }
    Ok(())
}

fn print_cell(out: &mut impl Write, cell: &Cell) -> anyhow::Result<()> {
    let cs = to_content_style(&cell.style);
    queue!(out, style::PrintStyledContent(style::StyledContent::new(cs, cell.ch)))?;
    Ok(())
}

/// Queue one dim line of text at row `y`, replacing whatever was there.
pub fn draw_status(out: &mut impl Write, y: u16, text: &str) -> anyhow::Result<()> {
    let mut cs = style::ContentStyle::default();
    cs.attributes.set(style::Attribute::Dim);
    queue!(
        out,
        cursor::MoveTo(0, y),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::PrintStyledContent(style::StyledContent::new(cs, text)),
    )?;
    Ok(())
}

fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    cs.foreground_color = s.fg.map(truecolor);
    cs.background_color = s.bg.map(truecolor);
    cs
}

fn truecolor(Rgb(r, g, b): Rgb) -> style::Color {
    style::Color::Rgb { r, g, b }
}
