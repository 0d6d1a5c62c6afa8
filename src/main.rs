use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::{debug, warn};

use walk_counter::grid::STANDARD_MOVES;
use walk_counter::parallel::DEFAULT_PARALLEL_DEPTH;
use walk_counter::progress::{group_thousands, MonitorOptions, ProgressMonitor};
use walk_counter::{Hooks, Mode, PathCounter, Rule, RuleSet, SearchConfig, SearchError};

const EXIT_INVALID_INPUT: u8 = 2;
const EXIT_CANCELLED: u8 = 130;

#[derive(Parser, Debug)]
#[command(name = "walk_counter")]
#[command(about = "Count self-avoiding walks from (0,0) to (7,0) on an 8x8 grid that follow a move pattern")]
struct Cli {
    /// 63 symbols from U, D, L, R, * (read from stdin when omitted)
    pattern: Option<String>,

    /// Worker threads (default: available parallelism)
    #[arg(long)]
    threads: Option<usize>,

    /// Walk depth below which subtrees become parallel tasks
    #[arg(long, default_value_t = DEFAULT_PARALLEL_DEPTH)]
    parallel_depth: usize,

    #[arg(long, value_enum, default_value_t = ModeArg::Auto)]
    mode: ModeArg,

    /// Enable leftmost-column symmetry pruning (undercounts unless the pattern allows it)
    #[arg(long)]
    symmetry: bool,

    #[arg(long)]
    no_isolation: bool,

    #[arg(long)]
    no_flood_fill: bool,

    #[arg(long)]
    no_fixed_budget: bool,

    /// Cancel the search after this many seconds
    #[arg(long)]
    time_limit: Option<u64>,

    /// Skip the live status line
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Auto,
    Sequential,
    Parallel,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Auto => Mode::Auto,
            ModeArg::Sequential => Mode::Sequential,
            ModeArg::Parallel => Mode::Parallel,
        }
    }
}

impl Cli {
    fn config(&self) -> SearchConfig {
        let mut rules = RuleSet::default();
        if self.no_isolation {
            rules = rules.without(Rule::Isolation);
        }
        if self.no_flood_fill {
            rules = rules.without(Rule::Connectivity);
        }
        if self.no_fixed_budget {
            rules = rules.without(Rule::FixedMoveBudget);
        }
        if self.symmetry {
            rules = rules.with(Rule::Symmetry);
        }

        let mut config = SearchConfig::default()
            .with_mode(self.mode.into())
            .with_parallel_depth(self.parallel_depth)
            .with_rules(rules);
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        config
    }
}

fn read_pattern() -> io::Result<String> {
    println!("Input:");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    debug!("{:?}", cli);

    let counter = match PathCounter::new(cli.config()) {
        Ok(counter) => counter,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let pattern = match cli.pattern.clone().map_or_else(read_pattern, Ok) {
        Ok(pattern) => pattern,
        Err(err) => {
            eprintln!("Failed to read pattern: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = counter.validate(&pattern) {
        eprintln!(
            "Invalid input. Path must be {STANDARD_MOVES} characters long and contain only U, D, L, R, or * ({err})"
        );
        return ExitCode::from(EXIT_INVALID_INPUT);
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let paths = Arc::new(AtomicU64::new(0));

    let handler_flag = Arc::clone(&cancel);
    if let Err(err) = ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::Relaxed);
    }) {
        warn!("Ctrl+C handler not installed: {err}");
    }

    println!("\nUsing {} processor cores", counter.threads());
    println!("Starting path exploration...\n");

    let monitor = ProgressMonitor::spawn(
        Arc::clone(&paths),
        MonitorOptions {
            display: !cli.quiet,
            time_limit: cli.time_limit.map(Duration::from_secs),
            cancel: Some(Arc::clone(&cancel)),
        },
    );
    let monitor = match monitor {
        Ok(monitor) => Some(monitor),
        Err(err) => {
            warn!("progress monitor unavailable: {err}");
            None
        }
    };

    let hooks = Hooks {
        cancel: Some(&cancel),
        progress: Some(&paths),
    };
    let result = counter.count_with(&pattern, hooks);
    if let Some(monitor) = monitor {
        monitor.finish();
    }

    match result {
        Ok(report) => {
            let millis = report.elapsed.as_millis();
            println!("\n\nFinal Results:");
            println!("Total paths: {}", group_thousands(report.paths));
            println!("Time (ms): {millis}");
            println!("Average paths per second: {:.2}", report.paths_per_second());
            ExitCode::SUCCESS
        }
        Err(SearchError::Cancelled) => {
            eprintln!("\nSearch cancelled; partial results discarded.");
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(err) => {
            eprintln!("\n{err}");
            ExitCode::FAILURE
        }
    }
}
