use anyhow::Result;
use clap::{Parser, Subcommand};

use docket::config::Settings;
use docket::models::{CaseType, Priority};
use docket::stage::Stage;

mod cmd;

#[derive(Parser)]
#[command(name = "docket")]
#[command(version, about = "Legal practice case lifecycle console")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the five-column case board
    Board,
    /// Create and work with cases
    Case {
        #[command(subcommand)]
        command: CaseCommands,
    },
    /// Submit a research query or list past research
    Research {
        /// The research query
        query: Option<String>,

        /// Attach the research to a case (id or case number)
        #[arg(long)]
        case: Option<String>,

        /// List past research instead of submitting a query
        #[arg(long)]
        history: bool,
    },
    /// List the firm's documents
    Documents,
    /// Run the case record store server
    Serve {
        /// Port to serve on
        #[arg(short, long, default_value = "8420")]
        port: u16,

        /// Open CORS and bind all interfaces (for a browser front end)
        #[arg(long)]
        dev: bool,
    },
}

#[derive(Subcommand)]
pub enum CaseCommands {
    /// Create a case (always enters the board at intake)
    Create {
        case_number: String,
        case_title: String,

        #[arg(long)]
        client: String,

        #[arg(long)]
        attorney: String,

        #[arg(long)]
        court: String,

        #[arg(long)]
        description: String,

        #[arg(long, default_value = "civil")]
        case_type: CaseType,

        #[arg(long, default_value = "medium")]
        priority: Priority,

        #[arg(long)]
        opposing_counsel: Option<String>,

        #[arg(long)]
        judge: Option<String>,
    },
    /// Move a case to another stage (same-stage moves are no-ops)
    Move {
        /// Case id or case number
        case: String,
        /// Target stage: intake, ongoing, hearing, judgment, closed
        stage: Stage,
    },
    /// Append a note to a case
    Note {
        case: String,
        content: String,
    },
    /// Append a task to a case
    Task {
        case: String,
        title: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, default_value = "medium")]
        priority: Priority,
    },
    /// Set a reminder on a case (due in 24 hours)
    Remind {
        case: String,
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "docket=debug" } else { "docket=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let settings = Settings::load();

    match cli.command {
        Commands::Board => cmd::cmd_board(&settings).await?,
        Commands::Case { command } => match command {
            CaseCommands::Create {
                case_number,
                case_title,
                client,
                attorney,
                court,
                description,
                case_type,
                priority,
                opposing_counsel,
                judge,
            } => {
                cmd::cmd_case_create(
                    &settings,
                    case_number,
                    case_title,
                    client,
                    attorney,
                    court,
                    description,
                    case_type,
                    priority,
                    opposing_counsel,
                    judge,
                )
                .await?
            }
            CaseCommands::Move { case, stage } => {
                cmd::cmd_case_move(&settings, case, stage).await?
            }
            CaseCommands::Note { case, content } => {
                cmd::cmd_case_note(&settings, case, content).await?
            }
            CaseCommands::Task {
                case,
                title,
                description,
                priority,
            } => cmd::cmd_case_task(&settings, case, title, description, priority).await?,
            CaseCommands::Remind { case, message } => {
                cmd::cmd_case_remind(&settings, case, message).await?
            }
        },
        Commands::Research {
            query,
            case,
            history,
        } => cmd::cmd_research(&settings, query, case, history).await?,
        Commands::Documents => cmd::cmd_documents(&settings).await?,
        Commands::Serve { port, dev } => cmd::cmd_serve(&settings, port, dev).await?,
    }

    Ok(())
}
