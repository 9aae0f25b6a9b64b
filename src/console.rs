//! Line-oriented console over a [`CanonicalValueSet`].
//!
//! ```text
//! > [1,5] (5.5,6.5) [7,10] [11.0,15.0)
//! 9: 1, 2, 3, 4, 5, (5.5, 6.5), 7, 8, 9, 10, [11.0, 15.0)
//!
//! > ?[1, 15]
//! false
//! ```
//!
//! A line is a command (`exit`, `clear`, `dump`) or a list of tokens that
//! are added, removed (`~` prefix) or queried (`?` prefix).
use std::io::{BufRead, Write};
use anyhow::Context;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::element::Element;
use crate::error::SetError;
use crate::ranges::{ExclusiveInterval, Point, Real};
use crate::set::CanonicalValueSet;

// ————————————————————————————————————————————————————————————————————————————
// TOKENS
// ————————————————————————————————————————————————————————————————————————————

/// Groups: 1 open bracket, 2 start, 3 end, 4 close bracket, 5 exclusion
/// list, 6 number, 7 word. Anchored at the start of the remaining input;
/// a token must be followed by whitespace or the end of the line.
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    const NUM: &str = r"[+-]?(?:\d*\.)?\d+";
    let range = format!(r"([(\[])({NUM}), ?({NUM})([)\]])(?:-\{{({NUM}(?:, ?{NUM})*)\}})?");
    Regex::new(&format!(r"^(?:{range}|({NUM})|(\w+))(?:\s+|$)")).expect("token pattern compiles")
});

/// Parses every token on the line, in order. Text that is not a token is
/// reported as `Cannot parse input` up to the next whitespace, or up to the
/// closing bracket when it opens with one.
fn tokenize(line: &str) -> Vec<Result<Element, String>> {
    let mut parsed = Vec::new();
    let mut rest = line.trim_start();
    while !rest.is_empty() {
        match TOKEN.captures(rest) {
            Some(caps) => {
                parsed.push(parse_token(&caps));
                let end = caps.get(0).map_or(rest.len(), |m| m.end());
                rest = &rest[end..];
            }
            None => {
                let end = malformed_len(rest);
                parsed.push(Err(format!("Cannot parse input: \"{}\"", &rest[..end])));
                rest = rest[end..].trim_start();
            }
        }
    }
    parsed
}

fn malformed_len(rest: &str) -> usize {
    let closing = if rest.starts_with(['[', '(']) {
        rest.find([']', ')']).map(|at| at + 1)
    } else {
        None
    };
    closing
        .or_else(|| rest.find(char::is_whitespace))
        .unwrap_or(rest.len())
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> Option<&'t str> {
    caps.get(index).map(|m| m.as_str())
}

/// Bracketed range token, bounds still unparsed.
struct RangeToken<'t> {
    open_start: bool,
    start: &'t str,
    end: &'t str,
    open_end: bool,
    exclusions: Vec<&'t str>,
}

impl<'t> RangeToken<'t> {
    fn from_captures(caps: &Captures<'t>) -> Option<Self> {
        Some(RangeToken {
            open_start: group(caps, 1)? == "(",
            start: group(caps, 2)?,
            end: group(caps, 3)?,
            open_end: group(caps, 4)? == ")",
            exclusions: group(caps, 5)
                .map(|list| list.split(',').map(str::trim).collect())
                .unwrap_or_default(),
        })
    }

    /// `None` when some number does not parse in `T`'s domain.
    fn build<T: Point>(&self, parse: impl Fn(&str) -> Option<T>) -> Option<Result<ExclusiveInterval<T>, SetError>> {
        let start = parse(self.start)?;
        let end = parse(self.end)?;
        let exclusions = self.exclusions.iter().map(|x| parse(x)).collect::<Option<Vec<T>>>()?;
        let interval = ExclusiveInterval::closed(start, end);
        let mut bounds = Vec::with_capacity(2);
        if self.open_start {
            bounds.push(start);
        }
        if self.open_end {
            bounds.push(end);
        }
        Some(interval.excluding(bounds.into_iter().chain(exclusions)))
    }

    /// Integer range when every number is an integer, else a real interval.
    fn to_element(&self) -> Option<Result<Element, SetError>> {
        let ints = self.build::<i64>(|s| s.parse().ok());
        match ints {
            Some(result) => Some(result.map(Element::from)),
            None => {
                let reals = self.build::<Real>(|s| s.parse::<f64>().ok().map(Real::from))?;
                Some(reals.map(Element::from))
            }
        }
    }
}

fn parse_token(caps: &Captures<'_>) -> Result<Element, String> {
    let token = caps.get(0).map_or("", |m| m.as_str().trim());
    if let Some(num) = group(caps, 6) {
        return num
            .parse::<i64>()
            .map(Element::from)
            .or_else(|_| num.parse::<f64>().map(Element::from))
            .map_err(|_| format!("Invalid/too large number: {num}"));
    }
    if let Some(word) = group(caps, 7) {
        return Ok(match word {
            "true" => Element::Boolean(true),
            "false" => Element::Boolean(false),
            word => Element::from(word),
        });
    }
    match RangeToken::from_captures(caps).and_then(|range| range.to_element()) {
        Some(Ok(element)) => Ok(element),
        Some(Err(error)) => Err(error.to_string()),
        None => Err(format!("Cannot parse input: \"{token}\"")),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONSOLE
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Add,
    Remove,
    Query,
}

pub struct Console<W: Write> {
    set: CanonicalValueSet,
    out: W,
    echo: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { set: CanonicalValueSet::new(), out, echo: false }
    }

    /// Writes each consumed line after the prompt, so the output reads as
    /// a transcript when input is not a terminal.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn set(&self) -> &CanonicalValueSet { &self.set }

    pub fn into_inner(self) -> W { self.out }

    /// Reads lines until `exit` or end of input.
    pub fn run(&mut self, input: impl BufRead) -> anyhow::Result<()> {
        let mut lines = input.lines();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;
            let Some(line) = lines.next().transpose().context("failed to read console input")? else {
                writeln!(self.out)?;
                return Ok(());
            };
            if self.echo {
                writeln!(self.out, "{line}")?;
            }
            if self.execute(&line)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Runs one line. Bad tokens and rejected operations are reported to
    /// the output; only write failures are returned as errors.
    pub fn execute(&mut self, line: &str) -> anyhow::Result<Flow> {
        let line = line.trim();
        match line {
            "exit" => return Ok(Flow::Exit),
            "clear" => {
                self.set.clear();
                return Ok(Flow::Continue);
            }
            "dump" => {
                let json = serde_json::to_string_pretty(&self.set.snapshot())?;
                writeln!(self.out, "{json}")?;
                return Ok(Flow::Continue);
            }
            _ => {}
        }
        let (mode, body) = if let Some(rest) = line.strip_prefix('?') {
            (Mode::Query, rest)
        } else if let Some(rest) = line.strip_prefix('~') {
            (Mode::Remove, rest)
        } else {
            (Mode::Add, line)
        };
        tracing::debug!(?mode, body, "console line");

        for parsed in tokenize(body) {
            let element = match parsed {
                Ok(element) => element,
                Err(message) => {
                    writeln!(self.out, "{message}")?;
                    continue;
                }
            };
            let outcome = match mode {
                Mode::Query => self.set.contains(element).map(Some),
                Mode::Remove => self.set.remove(element).map(|_| None),
                Mode::Add => self.set.add(element).map(|_| None),
            };
            match outcome {
                Ok(Some(found)) => writeln!(self.out, "{found}")?,
                Ok(None) => {}
                Err(error) => writeln!(self.out, "{error}")?,
            }
        }
        if mode != Mode::Query {
            writeln!(self.out, "{}: {}\n", self.set.size(), self.set)?;
        }
        Ok(Flow::Continue)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
