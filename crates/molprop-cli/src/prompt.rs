use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// A line-oriented question/answer session over any reader and writer.
///
/// The interactive commands run on stdin/stdout; tests drive the same loops
/// with in-memory buffers.
pub struct Prompt<R, W> {
    reader: R,
    writer: W,
}

/// One answer read from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Answer(String),
    /// The user typed `q` (either case).
    Quit,
    /// Input ended without a quit command.
    Closed,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Prints `question` without a newline and reads one trimmed line.
    pub fn ask(&mut self, question: &str) -> io::Result<Reply> {
        write!(self.writer, "{}", question)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            writeln!(self.writer)?;
            return Ok(Reply::Closed);
        }
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
            return Ok(Reply::Quit);
        }
        Ok(Reply::Answer(answer.to_string()))
    }

    /// Asks a yes/no question; only `y` or `yes` count as yes.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(match self.ask(question)? {
            Reply::Answer(answer) => {
                answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
            }
            Reply::Quit | Reply::Closed => false,
        })
    }

    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.writer, "{}", message)
    }

    pub fn blank_line(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
