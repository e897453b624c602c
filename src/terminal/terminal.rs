use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{poll, read};
use crossterm::style::{
    Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode, size};
use crossterm::{execute, queue};
use unicode_width::UnicodeWidthStr;

use crate::terminal::backend::{CursorPos, TerminalEvent, TerminalSize, decode_event};
use crate::ui::span::SpanLine;
use crate::ui::style::Color;

/// Inline raw-mode terminal: draws a block of span lines starting at the
/// row where the editor was launched, redrawing in place on each frame.
pub struct Terminal {
    out: Stdout,
    origin_row: u16,
    drawn_rows: u16,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            out: io::stdout(),
            origin_row: crossterm::cursor::position().map(|(_, row)| row).unwrap_or(0),
            drawn_rows: 0,
        })
    }

    pub fn enter_raw_mode(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(self.out, Hide)
    }

    pub fn exit_raw_mode(&mut self) -> io::Result<()> {
        execute!(self.out, Show)?;
        disable_raw_mode()
    }

    pub fn size(&self) -> TerminalSize {
        let (width, height) = size().unwrap_or((80, 24));
        TerminalSize { width, height }
    }

    pub fn poll(&self, timeout: Duration) -> io::Result<bool> {
        poll(timeout)
    }

    pub fn read_event(&mut self) -> io::Result<Option<TerminalEvent>> {
        Ok(decode_event(read()?))
    }

    pub fn draw(&mut self, lines: &[SpanLine], cursor: Option<CursorPos>) -> io::Result<()> {
        let size = self.size();
        let rows = (lines.len() as u16).min(size.height.saturating_sub(1));
        // Keep the frame on screen when it grows past the bottom.
        if self.origin_row + rows >= size.height {
            self.origin_row = size.height.saturating_sub(rows + 1);
        }

        for (idx, line) in lines.iter().enumerate().take(rows as usize) {
            let row = self.origin_row + idx as u16;
            queue!(self.out, MoveTo(0, row), Clear(ClearType::CurrentLine))?;
            let mut col = 0u16;
            for span in line {
                if let Some(color) = span.style.color {
                    queue!(self.out, SetForegroundColor(map_color(color)))?;
                }
                if let Some(color) = span.style.background {
                    queue!(self.out, SetBackgroundColor(map_color(color)))?;
                }
                if span.style.bold {
                    queue!(self.out, SetAttribute(Attribute::Bold))?;
                }
                queue!(self.out, Print(&span.text), ResetColor)?;
                if span.style.bold {
                    queue!(self.out, SetAttribute(Attribute::Reset))?;
                }
                col = col.saturating_add(span.text.width() as u16);
                if col >= size.width {
                    break;
                }
            }
        }

        // Clear rows left over from a taller previous frame.
        for idx in rows..self.drawn_rows {
            let row = self.origin_row + idx;
            queue!(self.out, MoveTo(0, row), Clear(ClearType::CurrentLine))?;
        }
        self.drawn_rows = rows;

        if let Some(pos) = cursor {
            queue!(
                self.out,
                MoveTo(pos.col, self.origin_row + pos.row),
                Show
            )?;
        } else {
            queue!(self.out, Hide)?;
        }
        self.out.flush()
    }

    pub fn move_below_frame(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            MoveTo(0, self.origin_row + self.drawn_rows),
            Print("\r\n")
        )
    }
}

fn map_color(color: Color) -> crossterm::style::Color {
    match color {
        Color::Reset => crossterm::style::Color::Reset,
        Color::Black => crossterm::style::Color::Black,
        Color::DarkGrey => crossterm::style::Color::DarkGrey,
        Color::Red => crossterm::style::Color::Red,
        Color::Green => crossterm::style::Color::Green,
        Color::Yellow => crossterm::style::Color::Yellow,
        Color::Blue => crossterm::style::Color::Blue,
        Color::Magenta => crossterm::style::Color::Magenta,
        Color::Cyan => crossterm::style::Color::Cyan,
        Color::White => crossterm::style::Color::White,
    }
}
