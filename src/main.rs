use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;

use biosec_check::assessment::{questionnaire_warnings, AssessmentEngine, QuestionSet, RiskResult};
use biosec_check::buffered_eprintln;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take the risk assessment interactively (default if no subcommand)
    Assess {
        /// Use line-based prompts instead of the full-screen interface
        #[arg(long)]
        plain: bool,
    },
    /// Score answers given as option scores, one per question in order
    Score {
        /// Option scores, e.g. `1 2 3 2`
        #[arg(required = true)]
        scores: Vec<u32>,

        /// Allow fewer scores than questions (reports a partial result)
        #[arg(long)]
        partial: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the questions, option scores and tier thresholds
    Questions,
    /// Write the default config file
    Init {
        /// Overwrite an existing config without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum OutputFormat {
    Text,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "biosec-check")]
#[command(about = "Farm biosecurity risk assessment", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/biosec-check/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Assess { plain: false });
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = command {
        let path = match config_path.map_or_else(biosec_check::config::get_config_path, Ok) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        if let Err(e) = biosec_check::config::run_init(&path, force, &mut stdin.lock(), &mut stdout) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_IO);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match biosec_check::config::load_config(config_path.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        match &config_path {
            Some(p) => eprintln!("Using config {}", p.display()),
            None => eprintln!("Using default config location"),
        }
    }

    // Validate questionnaire at startup
    let questions = match QuestionSet::from_config(&config.questionnaire_or_default()) {
        Ok(q) => q,
        Err(errors) => {
            eprintln!("Questionnaire config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        let thresholds = questions.thresholds();
        eprintln!(
            "Loaded {} questions (max score {}, thresholds low<={} medium<={})",
            questions.len(),
            questions.max_possible_score(),
            thresholds.low_max,
            thresholds.medium_max
        );
    }

    let use_tui = matches!(command, Commands::Assess { plain: false })
        && std::io::stdin().is_terminal()
        && std::io::stdout().is_terminal();

    // Hold warnings until the TUI has released the terminal
    if use_tui {
        biosec_check::stderr_buffer::activate();
    }
    for warning in questionnaire_warnings(&questions) {
        buffered_eprintln!("Warning: {}", warning);
    }

    let engine = AssessmentEngine::new(questions);
    let use_colors = !cli.no_color && biosec_check::output::should_use_colors();

    match command {
        Commands::Assess { .. } => {
            let outcome = if use_tui {
                let theme = biosec_check::tui::resolve_theme(config.theme);
                let app = biosec_check::tui::App::new(engine, theme);
                biosec_check::tui::run_tui(app).await
            } else {
                let stdin = std::io::stdin();
                let mut stdout = std::io::stdout();
                biosec_check::prompt::run_wizard(&engine, &mut stdin.lock(), &mut stdout)
            };

            match outcome {
                Ok(Some(result)) => {
                    if !use_tui {
                        println!();
                    }
                    print_result(&result, cli.verbose, use_colors);
                }
                Ok(None) => {
                    if cli.verbose {
                        eprintln!("Assessment not completed");
                    }
                }
                Err(e) => {
                    eprintln!("Assessment failed: {:#}", e);
                    std::process::exit(EXIT_IO);
                }
            }
        }
        Commands::Score {
            scores,
            partial,
            format,
        } => {
            let count = engine.questions().len();
            if scores.len() > count || (!partial && scores.len() != count) {
                eprintln!(
                    "Expected {} scores (one per question), got {}.{}",
                    count,
                    scores.len(),
                    if scores.len() < count { " Use --partial to score an unfinished assessment." } else { "" }
                );
                std::process::exit(EXIT_INPUT);
            }

            let session = match engine.replay(&scores) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Invalid answers: {}", e);
                    eprintln!("Run `biosec-check questions` to see the valid scores.");
                    std::process::exit(EXIT_INPUT);
                }
            };
            let result = engine.result(&session);

            match format {
                OutputFormat::Text => print_result(&result, cli.verbose, use_colors),
                OutputFormat::Tsv => println!("{}", biosec_check::output::format_tsv(&result)),
                OutputFormat::Json => match biosec_check::output::format_json(&result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize result: {}", e);
                        std::process::exit(EXIT_IO);
                    }
                },
            }
        }
        Commands::Questions => {
            println!(
                "{}",
                biosec_check::output::format_question_list(engine.questions(), use_colors)
            );
        }
        // Handled before config load
        Commands::Init { .. } => {}
    }

    if cli.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}

fn print_result(result: &RiskResult, verbose: bool, use_colors: bool) {
    println!("{}", biosec_check::output::format_result(result, use_colors));
    if verbose {
        println!();
        println!("{}", biosec_check::output::format_breakdown(result, use_colors));
    }
}
