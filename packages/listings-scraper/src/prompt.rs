//! Single-shot operator prompt for the number of pages to scrape.
//!
//! The answer is read once. Anything that is not a positive base-10 integer
//! aborts the run; there is no re-prompt loop.

use console::Term;
use dialoguer::{theme::Theme, Input};
use std::fmt;
use std::io::{self, BufRead, BufReader, IsTerminal, Stdin, Stdout, Write};
use tracing::debug;

use crate::error::{Result, ScrapeError};

/// Text shown to the operator before reading the answer.
pub const PROMPT: &str = "How many pages do you want to scrape? ";

/// Source of an operator-supplied page count.
pub trait PageCountPrompter: Send {
    /// Ask once and return a count > 0, or `InvalidInput`.
    fn prompt_page_count(&mut self) -> Result<u32>;
}

/// Validate an operator answer as a positive base-10 integer.
pub fn parse_page_count(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ScrapeError::invalid_input(trimmed, "not a number"))?;

    if value <= 0 {
        return Err(ScrapeError::invalid_input(
            trimmed,
            "page count must be greater than zero",
        ));
    }

    u32::try_from(value).map_err(|_| ScrapeError::invalid_input(trimmed, "page count too large"))
}

/// Writes [`PROMPT`] verbatim and reads one line from any reader.
///
/// Used for piped stdin, where an interactive widget would not render.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Consume the prompter and hand back whatever was written to the operator.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl LinePrompter<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> PageCountPrompter for LinePrompter<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn prompt_page_count(&mut self) -> Result<u32> {
        self.writer
            .write_all(PROMPT.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(ScrapeError::Prompt)?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(ScrapeError::Prompt)?;

        if read == 0 {
            return Err(ScrapeError::invalid_input("", "no input received"));
        }

        debug!(answer = %line.trim(), "Operator answered page count prompt");
        parse_page_count(&line)
    }
}

/// Renders the prompt text as given, without decoration.
struct PlainTheme;

impl Theme for PlainTheme {
    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        _default: Option<&str>,
    ) -> fmt::Result {
        write!(f, "{prompt}")
    }
}

/// Interactive prompt for a real terminal, written to stdout.
#[derive(Default)]
pub struct TerminalPrompter;

impl PageCountPrompter for TerminalPrompter {
    fn prompt_page_count(&mut self) -> Result<u32> {
        let answer: String = Input::with_theme(&PlainTheme)
            .with_prompt(PROMPT)
            .allow_empty(true)
            .report(false)
            .interact_text_on(&Term::stdout())
            .map_err(|e| ScrapeError::Prompt(io::Error::new(io::ErrorKind::Other, e)))?;

        parse_page_count(&answer)
    }
}

/// Pick the terminal widget when attended, the plain line reader otherwise.
pub fn stdio_prompter() -> Box<dyn PageCountPrompter> {
    if console::user_attended() && io::stdin().is_terminal() {
        Box::new(TerminalPrompter)
    } else {
        Box::new(LinePrompter::stdio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(input: &str) -> (Result<u32>, String) {
        let mut prompter = LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let result = prompter.prompt_page_count();
        let written = String::from_utf8(prompter.into_writer()).unwrap();
        (result, written)
    }

    #[test]
    fn test_valid_answer() {
        let (result, written) = answer("5\n");
        assert_eq!(result.unwrap(), 5);
        assert_eq!(written, "How many pages do you want to scrape? ");
    }

    #[test]
    fn test_rejects_non_numeric_and_non_positive() {
        for input in ["abc\n", "0\n", "-3\n", "2.5\n", "\n"] {
            let (result, _) = answer(input);
            assert!(
                result.as_ref().is_err_and(|e| e.is_invalid_input()),
                "expected InvalidInput for {input:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn test_end_of_input_is_invalid() {
        let (result, _) = answer("");
        assert!(result.unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_reads_only_one_line() {
        let (result, _) = answer("3\n7\n");
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn test_terminal_theme_renders_prompt_verbatim() {
        let mut rendered = String::new();
        PlainTheme
            .format_input_prompt(&mut rendered, PROMPT, None)
            .unwrap();
        assert_eq!(rendered, "How many pages do you want to scrape? ");
    }

    #[test]
    fn test_parse_page_count() {
        assert_eq!(parse_page_count(" 12 ").unwrap(), 12);
        assert!(parse_page_count("4294967296").unwrap_err().is_invalid_input());
        assert!(parse_page_count("5abc").unwrap_err().is_invalid_input());
    }
}
