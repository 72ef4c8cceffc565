use crossterm::tty::IsTty;
use std::io;

/// Used when stdout is a terminal that will not report its size.
pub const FALLBACK_WIDTH: usize = 80;

pub fn stdout_is_tty() -> bool {
    io::stdout().is_tty()
}

pub fn stdin_is_tty() -> bool {
    io::stdin().is_tty()
}

/// Prompts need a terminal on both ends and must not be switched off.
pub fn can_prompt(prompt_disabled: bool) -> bool {
    !prompt_disabled && stdin_is_tty() && stdout_is_tty()
}

/// Column count of the attached terminal.
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => cols as usize,
        _ => FALLBACK_WIDTH,
    }
}
