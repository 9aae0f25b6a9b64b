//! Minimal CLI: interactive console, or replay console scripts.
use std::io::{BufReader, Write};
use std::path::PathBuf;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand, Args};

use canon_set::console::Console;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// add, remove and query values in a canonical mixed-domain set
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// logging level to use: one of "error", "warn", "info", "debug", "trace"
    #[arg(long, default_value = "warn", global = true)]
    log_level: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// read console lines from stdin
    Console(ConsoleSettings),
    /// feed script files through a fresh console each
    Run(RunSettings),
}

#[derive(Args, Debug, Clone)]
struct ConsoleSettings {
    /// write each input line after the prompt
    #[arg(long, default_value_t = false)]
    echo: bool,
}

#[derive(Args, Debug, Clone)]
struct RunSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// output transcript file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// write each input line after the prompt
    #[arg(long, default_value_t = false)]
    echo: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Installs a stderr subscriber so traces never mix with console output.
    pub fn init_logging(&self) -> anyhow::Result<()> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        Ok(())
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Console(settings) => {
                let stdin = std::io::stdin();
                let mut console = Console::new(std::io::stdout()).with_echo(settings.echo);
                console.run(stdin.lock())
            }
            Command::Run(settings) => settings.run(),
        }
    }
}

impl RunSettings {
    fn run(&self) -> anyhow::Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let mut transcript = Vec::<u8>::new();
        for source_path in source_paths {
            tracing::info!(path = %source_path.display(), "running script");
            let file = std::fs::File::open(&source_path)
                .with_context(|| format!("failed to read script file ({})", source_path.display()))?;
            let mut console = Console::new(&mut transcript).with_echo(self.echo);
            console.run(BufReader::new(file))?;
        }
        match self.out.as_ref() {
            Some(out) => {
                if let Some(parent) = out.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(out, &transcript)
                    .with_context(|| format!("failed to write transcript ({})", out.display()))?;
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&transcript)?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();
        if !has_glob_chars(pattern) {
            out.push(PathBuf::from(pattern));
            continue;
        }
        let before = out.len();
        for entry in glob::glob(pattern)? {
            out.push(entry?);
        }
        if out.len() == before {
            bail!("glob pattern matched no files: {pattern}");
        }
    }

    Ok(out)
}
