//! The console facade: gated channels, timers, separators, step tracing.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Instant;

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use termcolor::{
    BufferedStandardStream, ColorChoice, ColorSpec, WriteColor,
};
use unicode_width::UnicodeWidthStr;

use snapshot::Evaluation;
use trace::{render_evaluation, step_line, LineArt, Theme};

use crate::level::Level;

/// The console owns the sink the interpreter logs through, and all the
/// mutable state tracing needs: the severity threshold, the step counter,
/// and the timer table.
///
/// With no threshold configured every operation is a no-op, and that's the
/// starting state: silent until somebody asks for output.
pub struct Console {
    /// Output stream.
    out: Box<dyn WriteColor>,

    /// The active severity threshold. `None` means fully silent.
    level: Option<Level>,

    theme: Theme,
    art: LineArt,

    /// The max width of rules and dumps.
    width: usize,

    /// Counts traced steps.
    step: u32,

    /// Start marks for named timers.
    timers: HashMap<String, Instant>,
}

impl Console {
    /// The default output width used when the terminal won't say.
    pub const DEFAULT_WIDTH: usize = 80;

    /// The narrowest width rules are drawn at; any smaller terminal is
    /// treated as this wide to keep dumps readable.
    pub const MIN_WIDTH: usize = 40;

    /// A console that never writes anything, until [`enable`][Console::enable]
    /// is called on it.
    pub fn silent() -> Console {
        Console {
            out: Box::new(BufferedStandardStream::stderr(ColorChoice::Auto)),
            level: None,
            theme: Theme::COLORED,
            art: LineArt::UNICODE,
            width: detected_width(),
            step: 0,
            timers: HashMap::new(),
        }
    }

    /// A console writing to stderr, live for every channel at or below
    /// `level`.
    pub fn stderr(level: Level) -> Console {
        let mut console = Console::silent();
        console.enable(level);
        console
    }

    /// A console writing plain text to the given sink. For tests and
    /// embedding; starts silent.
    pub fn with_sink(sink: Box<dyn WriteColor>, width: usize) -> Console {
        Console {
            out: sink,
            level: None,
            theme: Theme::PLAIN,
            art: LineArt::ASCII,
            width,
            step: 0,
            timers: HashMap::new(),
        }
    }

    /// Use ASCII line art instead of Unicode.
    pub fn ascii(mut self) -> Console {
        self.art = LineArt::ASCII;
        self
    }

    /// Make every channel at or below `level` live, and silence the rest.
    pub fn enable(&mut self, level: Level) {
        self.level = Some(level);
    }

    /// Back to the initial, fully silent state.
    pub fn disable(&mut self) {
        self.level = None;
    }

    /// The active severity threshold, if one is configured.
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    fn live(&self, level: Level) -> bool {
        matches!(self.level, Some(threshold) if level <= threshold)
    }
}

// The leveled channels. Each writes a colored `name: ` tag, the message
// verbatim, and a newline, then flushes; one write per call. Sink failures
// are swallowed; a tracer never takes down the process it's observing.
impl Console {
    pub fn error(&mut self, message: &str) {
        self.message(Level::Error, message);
    }

    pub fn warn(&mut self, message: &str) {
        self.message(Level::Warn, message);
    }

    pub fn success(&mut self, message: &str) {
        self.message(Level::Success, message);
    }

    pub fn info(&mut self, message: &str) {
        self.message(Level::Info, message);
    }

    pub fn debug(&mut self, message: &str) {
        self.message(Level::Debug, message);
    }

    fn message(&mut self, level: Level, message: &str) {
        if !self.live(level) {
            return;
        }
        let _ = self.write_message(level, message);
    }

    fn write_message(
        &mut self,
        level: Level,
        message: &str,
    ) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec.set_fg(Some(level.color()));

        self.out.set_color(&spec)?;
        write!(self.out, "{}: ", level.name())?;
        self.out.reset()?;

        writeln!(self.out, "{}", message)?;
        self.out.flush()
    }
}

// Section separators and screen clearing.
impl Console {
    /// A full-width rule, or `title` boxed between two rules.
    pub fn separator(&mut self, title: Option<&str>) {
        if self.level.is_none() {
            return;
        }
        let _ = self.write_separator(title);
    }

    fn write_separator(&mut self, title: Option<&str>) -> io::Result<()> {
        self.write_rule()?;

        if let Some(title) = title {
            let pad = self
                .width
                .saturating_sub(UnicodeWidthStr::width(title))
                / 2;

            let mut spec = ColorSpec::new();
            spec.set_bold(true);

            for _ in 0..pad {
                write!(self.out, " ")?;
            }
            self.out.set_color(&spec)?;
            write!(self.out, "{}", title)?;
            self.out.reset()?;
            writeln!(self.out)?;

            self.write_rule()?;
        }

        self.out.flush()
    }

    fn write_rule(&mut self) -> io::Result<()> {
        for _ in 0..self.width {
            write!(self.out, "{}", self.art.horizontal)?;
        }
        writeln!(self.out)
    }

    /// Clear the sink's visible history.
    pub fn clear(&mut self) {
        if self.level.is_none() {
            return;
        }
        let _ = execute!(self.out, Clear(ClearType::All), MoveTo(0, 0));
    }
}

// Named timers.
impl Console {
    /// Log that `label` started and record its start mark. The mark is
    /// recorded after logging so the log write doesn't count against it.
    pub fn start(&mut self, label: &str) {
        self.info(&format!("{} started", label));
        self.timers.insert(label.into(), Instant::now());
    }

    /// Log how long `label` took and forget its mark. Calling this without a
    /// matching [`start`][Console::start] is a caller error; it warns and
    /// reports zero elapsed rather than crashing.
    pub fn done(&mut self, label: &str) {
        let elapsed = match self.timers.remove(label) {
            Some(mark) => mark.elapsed().as_secs_f64() * 1000.0,
            None => {
                self.warn(&format!("no timer named {:?}", label));
                0.0
            }
        };

        self.info(&format!("{} took {:.4} ms", label, elapsed));
    }
}

// Step tracing and state dumps, both debug-tier.
impl Console {
    /// Trace one interpreter step: one line with the step number, the
    /// nesting indentation, the just-retired instruction, and the current
    /// frame's operand stack.
    pub fn step(&mut self, evaluation: &Evaluation) {
        if !self.live(Level::Debug) {
            return;
        }

        let line = step_line(evaluation, self.step, self.theme, self.art);
        self.step += 1;

        let _ = writeln!(self.out, "{}", line).and_then(|_| self.out.flush());
    }

    /// Dump the full frame stack.
    pub fn dump(&mut self, evaluation: &Evaluation) {
        if !self.live(Level::Debug) {
            return;
        }

        let block =
            render_evaluation(evaluation, self.theme, self.art, self.width);
        let _ = write!(self.out, "{}", block).and_then(|_| self.out.flush());
    }

    /// Zero the step counter.
    pub fn reset_step(&mut self) {
        self.step = 0;
    }
}

fn detected_width() -> usize {
    match term_size::dimensions_stderr() {
        Some((w, _)) => w.max(Console::MIN_WIDTH),
        None => Console::DEFAULT_WIDTH,
    }
}
