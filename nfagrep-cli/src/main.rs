use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::{LevelFilter, debug, info};
use nfagrep_core::Pattern;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "nfagrep")]
#[command(about = "nfagrep - print lines containing a match for a pattern")]
#[command(version)]
struct Cli {
    /// The pattern: literals, `|`, `*`, parentheses, and `-` for the empty string
    pattern: String,
    /// Files to search; none or `-` reads standard input
    files: Vec<PathBuf>,
    /// Prefix each matching line with its line number
    #[arg(short = 'n', long)]
    line_number: bool,
    /// Print only the number of matching lines
    #[arg(short, long)]
    count: bool,
    /// When to color the output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
    /// Print the parse tree and automaton sizes to stderr
    #[arg(long)]
    debug: bool,
    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Output switches for one search
#[derive(Debug, Clone, Default)]
struct SearchOptions {
    line_number: bool,
    count: bool,
    with_filename: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    apply_color(cli.color);

    let pattern = match Pattern::new(&cli.pattern) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(2);
        }
    };

    if cli.debug {
        report(&pattern);
    }

    let sources = if cli.files.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        cli.files.clone()
    };
    let options = SearchOptions {
        line_number: cli.line_number,
        count: cli.count,
        with_filename: sources.len() > 1,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = search_all(&pattern, &sources, &options, &mut out);
    process::exit(code);
}

/// Search every source in turn and work out the exit status
///
/// A closed output pipe ends the search quietly; whatever matched before it
/// still counts.
fn search_all<W: Write>(
    pattern: &Pattern,
    sources: &[PathBuf],
    options: &SearchOptions,
    out: &mut W,
) -> i32 {
    let mut matched = false;
    let mut failed = false;

    for path in sources {
        let mut found = 0;
        let result = search_path(pattern, path, options, out, &mut found);
        info!("{}: {} matching line(s)", path.display(), found);
        matched |= found > 0;

        match result {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!("output closed, stopping");
                return exit_code(matched, failed);
            }
            Err(e) => {
                eprintln!("{} {}: {}", "Error:".red().bold(), path.display(), e);
                failed = true;
            }
        }
    }

    if let Err(e) = out.flush() {
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("{} {}", "Error:".red().bold(), e);
            failed = true;
        }
    }

    exit_code(matched, failed)
}

fn exit_code(matched: bool, failed: bool) -> i32 {
    if failed {
        2
    } else if matched {
        0
    } else {
        1
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn apply_color(choice: ColorChoice) {
    match choice {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => colored::control::set_override(io::stdout().is_terminal()),
    }
}

fn report(pattern: &Pattern) {
    let (bare, search) = pattern.stats();
    eprintln!("{}", "Pattern:".bold());
    eprintln!("  {}", pattern.as_str().cyan());
    eprintln!("{}", "Parse tree:".bold());
    for line in pattern.ast().tree().lines() {
        eprintln!("  {}", line);
    }
    eprintln!("{}", "Automaton:".bold());
    eprintln!(
        "  pattern: {} states, {} transitions, {} finals",
        bare.states, bare.transitions, bare.finals
    );
    eprintln!(
        "  search:  {} states, {} transitions, {} finals",
        search.states, search.transitions, search.finals
    );
}

fn search_path<W: Write>(
    pattern: &Pattern,
    path: &Path,
    options: &SearchOptions,
    out: &mut W,
    found: &mut usize,
) -> io::Result<()> {
    let name = path.display().to_string();
    if path == Path::new("-") {
        debug!("searching standard input");
        search_reader(pattern, io::stdin().lock(), "(standard input)", options, out, found)
    } else {
        debug!("searching {}", name);
        let file = File::open(path)?;
        search_reader(pattern, BufReader::new(file), &name, options, out, found)
    }
}

/// Print the matching lines of `reader`, counting them in `found`
///
/// Lines are split on `\n` with a trailing `\r` removed. Bytes that are not
/// valid UTF-8 become U+FFFD, which no pattern can step over. A line is
/// counted before it is written, so `found` is accurate even when writing
/// fails.
fn search_reader<R: BufRead, W: Write>(
    pattern: &Pattern,
    reader: R,
    name: &str,
    options: &SearchOptions,
    out: &mut W,
    found: &mut usize,
) -> io::Result<()> {
    for (index, bytes) in reader.split(b'\n').enumerate() {
        let mut bytes = bytes?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        let line = String::from_utf8_lossy(&bytes);

        if !pattern.is_match(&line) {
            continue;
        }
        *found += 1;
        if options.count {
            continue;
        }

        if options.with_filename {
            write!(out, "{}{}", name.magenta(), ":".cyan())?;
        }
        if options.line_number {
            write!(out, "{}{}", (index + 1).to_string().green(), ":".cyan())?;
        }
        writeln!(out, "{}", line)?;
    }

    if options.count {
        if options.with_filename {
            write!(out, "{}{}", name.magenta(), ":".cyan())?;
        }
        writeln!(out, "{}", found)?;
    }

    Ok(())
}
