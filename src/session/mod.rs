//! Run driver for scripts and the interactive prompt
//!
//! A [`Session`] owns the [`Diagnostics`] sink across inputs. Each input goes
//! through one lex/parse cycle; the sink is cleared before the cycle and
//! inspected right after it to decide whether the tree is printed.
//!
//! Output goes to caller-supplied writers so the same code serves the binary
//! (stdout/stderr) and the tests (in-memory buffers).

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::parser::ast::Expr;
use crate::parser::lexer::tokenize;
use crate::parser::parse::Parser;
use crossterm::style::Stylize;
use std::fmt;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Exit status for input that produced diagnostics
pub const EXIT_DATA_ERROR: i32 = 65;
/// Exit status for a script that could not be read
pub const EXIT_NO_INPUT: i32 = 66;
/// Exit status when reading prompt input fails
pub const EXIT_IO_ERROR: i32 = 74;

const PROMPT: &str = "> ";

/// Session-level failures (as opposed to diagnostics in the source)
#[derive(Debug)]
pub enum SessionError {
    /// The script could not be read
    ReadScript { path: PathBuf, source: io::Error },
    /// Reading a prompt line failed
    ReadInput(io::Error),
    /// Writing output failed
    Output(io::Error),
}

impl SessionError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            SessionError::ReadScript { .. } => EXIT_NO_INPUT,
            SessionError::ReadInput(_) => EXIT_IO_ERROR,
            SessionError::Output(_) => 1,
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::ReadScript { path, source } => {
                write!(f, "Failed to read source file '{}': {}", path.display(), source)
            }
            SessionError::ReadInput(err) => write!(f, "Failed to read input: {}", err),
            SessionError::Output(err) => write!(f, "Failed to write output: {}", err),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::ReadScript { source, .. } => Some(source),
            SessionError::ReadInput(err) | SessionError::Output(err) => Some(err),
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> Self {
        SessionError::Output(err)
    }
}

/// Result of one lex/parse cycle
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A tree with no diagnostics recorded
    Parsed(Expr),
    /// At least one diagnostic was recorded; any tree is discarded
    Failed,
}

/// Options for a [`Session`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Print every token before the tree
    pub show_tokens: bool,
    /// Highlight `Error` in diagnostics with terminal colors
    pub styled: bool,
}

/// Drives lex → parse → print for scripts and prompt lines
#[derive(Debug, Default)]
pub struct Session {
    diagnostics: Diagnostics,
    options: SessionOptions,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            diagnostics: Diagnostics::new(),
            options,
        }
    }

    /// Diagnostics recorded by the most recent cycle
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Run one cycle over `source`, printing the tree to `out` and any
    /// diagnostics to `err`.
    pub fn run<O: Write, E: Write>(
        &mut self,
        source: &str,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<Outcome> {
        self.diagnostics.clear();

        let tokens = tokenize(source, &mut self.diagnostics);
        if self.options.show_tokens {
            for token in &tokens {
                writeln!(out, "{}", token)?;
            }
        }

        let result = Parser::new(tokens, &mut self.diagnostics).parse();

        if self.diagnostics.had_error() {
            for diagnostic in &self.diagnostics {
                self.write_diagnostic(err, diagnostic)?;
            }
            return Ok(Outcome::Failed);
        }

        match result {
            Ok(expr) => {
                writeln!(out, "{}", expr)?;
                Ok(Outcome::Parsed(expr))
            }
            // Every parse error is reported to the sink before it is returned
            Err(_) => Ok(Outcome::Failed),
        }
    }

    /// Run the script at `path` and return the process exit status.
    pub fn run_file<O: Write, E: Write>(
        &mut self,
        path: &Path,
        out: &mut O,
        err: &mut E,
    ) -> Result<i32, SessionError> {
        let source = fs::read_to_string(path).map_err(|source| SessionError::ReadScript {
            path: path.to_path_buf(),
            source,
        })?;

        match self.run(&source, out, err)? {
            Outcome::Parsed(_) => Ok(0),
            Outcome::Failed => Ok(EXIT_DATA_ERROR),
        }
    }

    /// Read lines from `input` until end of input, running each one.
    ///
    /// A bad line is reported and discarded; the session carries on with a
    /// cleared sink. Bytes that are not UTF-8 become `U+FFFD` and are reported
    /// by the lexer like any other unexpected character.
    pub fn run_prompt<I: BufRead, O: Write, E: Write>(
        &mut self,
        mut input: I,
        out: &mut O,
        err: &mut E,
    ) -> Result<(), SessionError> {
        let mut buffer = Vec::new();
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            buffer.clear();
            let read = input
                .read_until(b'\n', &mut buffer)
                .map_err(SessionError::ReadInput)?;
            if read == 0 {
                writeln!(out)?;
                break;
            }

            let line = String::from_utf8_lossy(&buffer);
            self.run(&line, out, err)?;
            err.flush()?;
        }
        self.diagnostics.clear();
        Ok(())
    }

    fn write_diagnostic<E: Write>(&self, err: &mut E, diagnostic: &Diagnostic) -> io::Result<()> {
        if self.options.styled {
            writeln!(
                err,
                "[line {}] {}{}: {}",
                diagnostic.line,
                "Error".red().bold(),
                diagnostic.context,
                diagnostic.message
            )
        } else {
            writeln!(err, "{}", diagnostic)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};
    use tempfile::tempdir;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "terminal went away"))
        }
    }

    fn run_source(session: &mut Session, source: &str) -> (Outcome, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = session.run(source, &mut out, &mut err).unwrap();
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_run_prints_tree() {
        let mut session = Session::default();
        let (outcome, out, err) = run_source(&mut session, "(1 + 2) * 3");

        assert!(matches!(outcome, Outcome::Parsed(_)));
        assert_eq!(out, "(* (group (+ 1 2)) 3)\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_lex_error_discards_tree() {
        let mut session = Session::default();
        let (outcome, out, err) = run_source(&mut session, "1 + 2 @");

        assert_eq!(outcome, Outcome::Failed);
        assert!(out.is_empty());
        assert_eq!(err, "[line 1] Error: Unexpected character: @\n");
    }

    #[test]
    fn test_parse_error_reported() {
        let mut session = Session::default();
        let (outcome, _, err) = run_source(&mut session, "(1 + 2");

        assert_eq!(outcome, Outcome::Failed);
        assert!(err.contains("Expect ')'"));
    }

    #[test]
    fn test_sink_cleared_between_runs() {
        let mut session = Session::default();
        run_source(&mut session, "1 +");
        assert!(session.diagnostics().had_error());

        let (outcome, out, err) = run_source(&mut session, "1 + 1");
        assert!(matches!(outcome, Outcome::Parsed(_)));
        assert_eq!(out, "(+ 1 1)\n");
        assert!(err.is_empty());
        assert!(!session.diagnostics().had_error());
    }

    #[test]
    fn test_show_tokens() {
        let mut session = Session::new(SessionOptions {
            show_tokens: true,
            styled: false,
        });
        let (_, out, _) = run_source(&mut session, "-2");

        insta::assert_snapshot!(out.trim_end(), @r"
        Minus - nil
        Number 2 2
        Eof  nil
        (- 2)
        ");
    }

    #[test]
    fn test_styled_diagnostic_keeps_text() {
        let mut session = Session::new(SessionOptions {
            show_tokens: false,
            styled: true,
        });
        let (_, _, err) = run_source(&mut session, "1 +");

        assert!(err.starts_with("[line 1] "));
        assert!(err.contains("Error"));
        assert!(err.ends_with(" at end: Expect expression.\n"));
    }

    #[test]
    fn test_prompt_continues_after_bad_line() {
        let mut session = Session::default();
        let input = Cursor::new("1 +\n2 * 3\n");
        let mut out = Vec::new();
        let mut err = Vec::new();

        session.run_prompt(input, &mut out, &mut err).unwrap();

        let out = String::from_utf8(out).unwrap();
        let err = String::from_utf8(err).unwrap();
        assert_eq!(out, "> > (* 2 3)\n> \n");
        assert_eq!(err, "[line 2] Error at end: Expect expression.\n");
    }

    #[test]
    fn test_prompt_survives_invalid_utf8() {
        let mut session = Session::default();
        let input = Cursor::new(&b"1 + \xff\n2 * 3\n"[..]);
        let mut out = Vec::new();
        let mut err = Vec::new();

        session.run_prompt(input, &mut out, &mut err).unwrap();

        let out = String::from_utf8(out).unwrap();
        let err = String::from_utf8(err).unwrap();
        assert_eq!(out, "> > (* 2 3)\n> \n");
        assert_eq!(
            err,
            "[line 1] Error: Unexpected character: \u{FFFD}\n\
             [line 2] Error at end: Expect expression.\n"
        );
    }

    #[test]
    fn test_prompt_read_failure() {
        let mut session = Session::default();
        let mut out = Vec::new();
        let mut err = Vec::new();

        let failure = session
            .run_prompt(BufReader::new(FailingReader), &mut out, &mut err)
            .unwrap_err();

        assert!(matches!(failure, SessionError::ReadInput(_)));
        assert_eq!(failure.exit_code(), EXIT_IO_ERROR);
        assert_eq!(failure.to_string(), "Failed to read input: terminal went away");
    }

    #[test]
    fn test_run_file_exit_codes() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.lox");
        let bad = dir.path().join("bad.lox");
        fs::write(&good, "1 < 2 == true").unwrap();
        fs::write(&bad, "\"open").unwrap();

        let mut session = Session::default();
        let mut out = Vec::new();
        let mut err = Vec::new();

        assert_eq!(session.run_file(&good, &mut out, &mut err).unwrap(), 0);
        assert_eq!(
            session.run_file(&bad, &mut out, &mut err).unwrap(),
            EXIT_DATA_ERROR
        );

        let missing = dir.path().join("missing.lox");
        let failure = session.run_file(&missing, &mut out, &mut err).unwrap_err();
        assert_eq!(failure.exit_code(), EXIT_NO_INPUT);
    }
}
