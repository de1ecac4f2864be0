use std::path::PathBuf;

use clap::{Parser, Subcommand};
use induct::commands::export::Kind as ExportKind;
use induct::error::Result;
use induct::model::Status;
use induct::output::Format;
use induct::store::blobs::find_data_root;

#[derive(Parser)]
#[command(
    name = "induct",
    version,
    about = "Checklist-based onboarding progress tracker"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    format: Format,
    /// Shorthand for --format minimal
    #[arg(long, global = true, hide = true)]
    minimal: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new .induct/ data directory here
    Init,
    /// Convert CSV files into the task/user catalog
    Import {
        /// Task list: title,category,target_window[,note]
        #[arg(long)]
        tasks: Option<PathBuf>,
        /// User list: name,role
        #[arg(long)]
        users: Option<PathBuf>,
    },
    /// List the catalog users
    Users,
    /// Select the active user (id, unique id prefix, or name)
    Login { user: String },
    /// Clear the active user
    Logout,
    /// Show the checklist rows visible to the active user
    List {
        /// Substring match on task titles or assignment notes
        #[arg(long, short)]
        search: Option<String>,
        /// Exact category, or "all"
        #[arg(long)]
        category: Option<String>,
        /// Exact target window, or "all"
        #[arg(long)]
        window: Option<String>,
        /// Only tasks some trainee has completed
        #[arg(long)]
        completed: bool,
        /// Act as this user instead of the stored login
        #[arg(long = "as")]
        as_user: Option<String>,
    },
    /// Role-scoped progress summary
    Summary {
        /// Act as this user instead of the stored login
        #[arg(long = "as")]
        as_user: Option<String>,
    },
    /// Update one assignment's status and/or notes
    Set {
        /// Task id or unique prefix
        task: String,
        /// Trainee (required for instructor/admin edits)
        #[arg(long)]
        trainee: Option<String>,
        /// New status
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// New notes text (blank clears)
        #[arg(long)]
        notes: Option<String>,
        /// Act as this user instead of the stored login
        #[arg(long = "as")]
        as_user: Option<String>,
    },
    /// Write the visible rows to a file
    Export {
        #[arg(value_enum)]
        kind: ExportKind,
        /// Output path (defaults to a date-stamped name)
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, short)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        window: Option<String>,
        #[arg(long)]
        completed: bool,
        /// Act as this user instead of the stored login
        #[arg(long = "as")]
        as_user: Option<String>,
    },
}

fn run(cli: Cli, format: Format) -> Result<()> {
    if let Commands::Init = cli.command {
        let cwd = std::env::current_dir()?;
        return induct::commands::init::run(&cwd);
    }

    let root = find_data_root()?;
    match cli.command {
        Commands::Init => unreachable!("handled above"),
        Commands::Import { tasks, users } => {
            induct::commands::import::run(&root, tasks.as_deref(), users.as_deref(), format)
        }
        Commands::Users => induct::commands::users::run(&root, format),
        Commands::Login { user } => induct::commands::login::run(&root, &user),
        Commands::Logout => induct::commands::logout::run(&root),
        Commands::List {
            search,
            category,
            window,
            completed,
            as_user,
        } => induct::commands::list::run(&root, search, category, window, completed, as_user, format),
        Commands::Summary { as_user } => induct::commands::summary::run(&root, as_user, format),
        Commands::Set {
            task,
            trainee,
            status,
            notes,
            as_user,
        } => induct::commands::set::run(
            &root,
            &task,
            trainee.as_deref(),
            status,
            notes,
            as_user,
            format,
        ),
        Commands::Export {
            kind,
            out,
            search,
            category,
            window,
            completed,
            as_user,
        } => induct::commands::export::run(
            &root, kind, out, search, category, window, completed, as_user, format,
        ),
    }
}

fn main() {
    let cli = Cli::parse();
    let format = if cli.minimal {
        Format::Minimal
    } else {
        cli.format
    };
    if let Err(e) = run(cli, format) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}
