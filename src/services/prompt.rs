use std::io;

/// Asks the user to pick one of several options.
pub trait Prompter {
    /// Returns the index of the chosen option.
    fn select(&self, message: &str, options: &[String]) -> io::Result<usize>;
}

impl<T: Prompter + ?Sized> Prompter for &T {
    fn select(&self, message: &str, options: &[String]) -> io::Result<usize> {
        (**self).select(message, options)
    }
}

impl<T: Prompter + ?Sized> Prompter for Box<T> {
    fn select(&self, message: &str, options: &[String]) -> io::Result<usize> {
        (**self).select(message, options)
    }
}

/// Used where prompting was ruled out up front; any call is a bug upstream.
pub struct NoPrompt;

impl Prompter for NoPrompt {
    fn select(&self, message: &str, _options: &[String]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("cannot prompt for \"{message}\" when not running interactively"),
        ))
    }
}
