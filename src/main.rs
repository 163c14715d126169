// tapewalk: tree-walking tape-language interpreter with a time-travel debugger

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use tapewalk::config::{Config, EofBehavior, DEFAULT_HISTORY_LIMIT_MIB};
use tapewalk::memory::DEFAULT_TAPE_LEN;
use tapewalk::runner::{self, Execution};
use tapewalk::ui::App;

#[derive(clap::Parser)]
#[command(
    name = "tapewalk",
    version,
    about = "Parse, render and run tape-language programs"
)]
struct Cli {
    /// Source files, processed in order
    files: Vec<PathBuf>,

    /// Skip characters outside the alphabet instead of rejecting them
    #[arg(long)]
    allow_comments: bool,

    /// What Input stores when standard input is exhausted
    #[arg(long, value_enum, default_value_t = EofBehavior::Unchanged)]
    eof: EofBehavior,

    /// Number of tape cells
    #[arg(long, default_value_t = DEFAULT_TAPE_LEN, value_parser = parse_tape_len)]
    tape_len: usize,

    /// Do not print the rendered tree before running
    #[arg(long)]
    no_tree: bool,

    /// Record execution history and step through it after each file runs
    #[arg(long)]
    debug: bool,

    /// Snapshot memory budget for --debug, in MiB
    #[arg(long, value_name = "MIB", default_value_t = DEFAULT_HISTORY_LIMIT_MIB)]
    history_limit: usize,

    /// Print progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            allow_comments: self.allow_comments,
            eof: self.eof,
            tape_len: self.tape_len,
            print_tree: !self.no_tree,
            debug: self.debug,
            history_limit: self.history_limit.saturating_mul(1024 * 1024),
            verbose: self.verbose,
        }
    }
}

fn parse_tape_len(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("the tape needs at least one cell".to_string()),
        Ok(len) => Ok(len),
        Err(e) => Err(e.to_string()),
    }
}

/// Usage text printed when no source files are given
fn no_input_files(program_name: &str) -> String {
    format!(
        "{0}: No input files.\n\nUsage: {0} [OPTIONS] <file>...\nTry '{0} --help' for more information.\n",
        program_name
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.files.is_empty() {
        let program_name = std::env::args()
            .next()
            .unwrap_or_else(|| "tapewalk".to_string());
        eprint!("{}", no_input_files(&program_name));
        return ExitCode::FAILURE;
    }

    let config = cli.config();
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();

    let failures = runner::run_files(&cli.files, &config, stdin, stdout, |path, execution| {
        if config.debug {
            if let Err(err) = debug_session(path, execution) {
                eprintln!("Error: {:?}", err);
            }
        }
    });

    if config.verbose {
        eprintln!(
            "Processed {} file(s), {} failed.",
            cli.files.len(),
            failures.len()
        );
    }

    if failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Open the debugger over the history recorded for one file.
fn debug_session(path: &Path, execution: Execution) -> io::Result<()> {
    let Some(history) = execution.history else {
        return Ok(());
    };
    if history.is_empty() {
        eprintln!("{}: nothing recorded to debug", path.display());
        return Ok(());
    }

    let error = execution.outcome.err().map(|e| e.to_string());
    if error.is_some() {
        eprintln!("Entering debugger with partial execution history...");
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(history, execution.source, path.display().to_string(), error);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_files_message() {
        let message = no_input_files("tapewalk");
        assert!(message.starts_with("tapewalk: No input files.\n"));
        assert!(message.contains("Usage: tapewalk [OPTIONS] <file>..."));
    }

    #[test]
    fn test_cli_config() {
        let cli = Cli::parse_from(["tapewalk", "--no-tree", "--eof", "zero", "a.bf", "b.bf"]);
        assert_eq!(cli.files.len(), 2);
        let config = cli.config();
        assert!(!config.print_tree);
        assert_eq!(config.eof, EofBehavior::Zero);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT_MIB * 1024 * 1024);
    }

    #[test]
    fn test_zero_tape_len_is_rejected() {
        assert!(Cli::try_parse_from(["tapewalk", "--tape-len", "0", "a.bf"]).is_err());
    }
}
