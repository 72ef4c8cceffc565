pub mod delete;
pub mod item_list;

pub use delete::{run_delete, DeleteOpts};
pub use item_list::{run_item_list, ItemListOpts};

use crate::services::ProjectError;

/// Machine-readable output formats accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
}

/// What a command needs to know about the terminal it runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streams {
    pub is_tty: bool,
    pub can_prompt: bool,
    pub width: usize,
}

/// Parse a positional project number.
///
/// The API's `Int` is 32-bit signed, so anything outside `0..=i32::MAX` is
/// rejected here rather than by the server.
pub fn parse_project_number(arg: &str) -> Result<u32, ProjectError> {
    arg.parse::<i32>()
        .ok()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ProjectError::InvalidInput(format!("invalid number: {arg}")))
}

/// `0` stands for "no number given".
pub fn requested_number(number: Option<u32>) -> Option<u32> {
    number.filter(|&n| n != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_numbers_fit_a_signed_32_bit_int() {
        assert_eq!(parse_project_number("1").unwrap(), 1);
        assert_eq!(parse_project_number("2147483647").unwrap(), 2147483647);
        assert_eq!(parse_project_number("0").unwrap(), 0);
    }

    #[test]
    fn out_of_range_and_malformed_numbers_are_invalid_input() {
        for arg in ["2147483648", "3000000000", "-1", "abc", "1x", ""] {
            let err = parse_project_number(arg).unwrap_err();
            assert!(matches!(err, ProjectError::InvalidInput(_)), "{arg}");
            assert_eq!(err.to_string(), format!("invalid number: {arg}"));
        }
    }

    #[test]
    fn zero_means_no_number() {
        assert_eq!(requested_number(Some(0)), None);
        assert_eq!(requested_number(None), None);
        assert_eq!(requested_number(Some(7)), Some(7));
    }
}
