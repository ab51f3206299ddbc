use clap::{Parser, Subcommand};
use problem_archive::config::{self, ArchiveConfig};
use problem_archive::lookup::{self, LeetCodeClient, ProblemInfo};
use problem_archive::scaffold::{self, NewProblem};
use problem_archive::{migrate, output, report, scan, sync};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "problem-archive")]
#[command(about = "Scaffolding, metadata sync and statistics for a practice-problem archive")]
#[command(long_about = "\
Scaffolding, metadata sync and statistics for a practice-problem archive

Every problem lives in its own directory. The YAML frontmatter at the top of
its README.md is the source of truth; info cards, indexes and the stats table
in the root README are generated from it.

Collection structure:

  archive/
  ├── archive.toml                     # Config (optional)
  ├── README.md                        # Root document (stats + recent blocks)
  ├── docs/                            # Generated indexes
  └── problems/
      └── 00020-valid-parentheses/
          ├── README.md                # Frontmatter + notes
          └── solution-python.py       # One stub per language

Supported languages: python, cpp, javascript, java

Run 'problem-archive gen-config' to generate a documented archive.toml.")]
#[command(version)]
struct Cli {
    /// Collection root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct CreateArgs {
    /// Problem number
    id: u32,

    /// Problem title (looked up when omitted)
    #[arg(long)]
    title: Option<String>,

    /// easy, medium or hard (looked up when omitted)
    #[arg(long)]
    difficulty: Option<String>,

    /// Comma-separated languages; defaults to `default_languages` from the config
    #[arg(long, value_delimiter = ',')]
    languages: Vec<String>,

    /// Comma-separated topic tags
    #[arg(long, value_delimiter = ',')]
    topics: Vec<String>,

    /// Never query the remote problem source
    #[arg(long)]
    offline: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new problem directory with document and solution stubs
    Create(CreateArgs),
    /// Refresh the info card (and notes) of one problem, or of all of them
    Sync {
        /// Problem directory; every problem is synced when omitted
        dir: Option<PathBuf>,
    },
    /// Scan the collection, print statistics and regenerate the reports
    Stats,
    /// Move solutions out of per-language subfolders
    Migrate,
    /// Print a stock archive.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(())
        }
        command => run(command, &cli.root),
    }
}

fn run(command: Command, root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_config(root)?;
    let problems = config.problems_path(root);

    match command {
        Command::Create(args) => {
            let request = resolve_request(&args, &config)?;
            let created = scaffold::create_problem(&problems, &request, &config)?;
            output::print_created(&created);
        }
        Command::Sync { dir: Some(dir) } => {
            let dir = sync::resolve_problem_dir(&dir, &problems)?;
            let folder = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| dir.display().to_string());
            let outcome = sync::sync_directory(&dir, &config)?;
            println!("{}", output::format_sync_outcome(&folder, &outcome));
        }
        Command::Sync { dir: None } => {
            let summary = sync::sync_all(&problems, &config)?;
            output::print_sync_summary(&summary);
        }
        Command::Stats => {
            let view = scan::scan(&problems, &config.document_name)?;
            let written = report::write_reports(root, &config, &view)?;
            output::print_stats(&view, &written, root);
        }
        Command::Migrate => {
            let summary = migrate::migrate_all(&problems)?;
            output::print_migration(&summary);
        }
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

/// Fill in title, difficulty and topics from the arguments, the remote
/// source, or an interactive prompt, in that order.
fn resolve_request(
    args: &CreateArgs,
    config: &ArchiveConfig,
) -> Result<NewProblem, Box<dyn std::error::Error>> {
    let needs_lookup = args.title.is_none() || args.difficulty.is_none() || args.topics.is_empty();
    let info = if needs_lookup && !args.offline && config.lookup.enabled {
        remote_info(args.id, config)
    } else {
        None
    };

    let mut title = args
        .title
        .clone()
        .or_else(|| info.as_ref().map(|i| i.title.clone()));
    let mut difficulty = args
        .difficulty
        .clone()
        .or_else(|| info.as_ref().map(|i| i.difficulty.as_str().to_string()));
    let topics = if !args.topics.is_empty() {
        Some(args.topics.clone())
    } else {
        info.map(|i| i.topics).filter(|t| !t.is_empty())
    };

    if title.is_none() || difficulty.is_none() {
        if !io::stdin().is_terminal() {
            return Err(format!(
                "no title/difficulty for problem #{id}; run `problem-archive create {id} --title <TITLE> --difficulty <easy|medium|hard>`",
                id = args.id
            )
            .into());
        }
        let stdin = io::stdin();
        let mut input = stdin.lock();
        if title.is_none() {
            title = Some(prompt(&mut input, "Title")?);
        }
        if difficulty.is_none() {
            difficulty = Some(prompt(&mut input, "Difficulty (easy/medium/hard)")?);
        }
    }

    let languages = if args.languages.is_empty() {
        config.default_languages.clone()
    } else {
        args.languages.clone()
    };

    Ok(NewProblem {
        id: args.id,
        title: title.unwrap_or_default(),
        difficulty: difficulty.unwrap_or_default(),
        languages,
        topics,
        date: chrono::Local::now().date_naive(),
    })
}

fn remote_info(id: u32, config: &ArchiveConfig) -> Option<ProblemInfo> {
    match LeetCodeClient::new(&config.lookup) {
        Ok(client) => lookup::lookup_or_warn(&client, id),
        Err(e) => {
            log::warn!("problem lookup unavailable: {e}");
            None
        }
    }
}

fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
