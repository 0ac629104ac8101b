mod commands;
mod output;

use bidscan_core::config::Config;
use bidscan_core::email::{DEFAULT_MAX_RESULTS, DEFAULT_QUERY};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bidscan",
    version,
    about = "Ingest construction bid invitations and mine their specifications"
)]
struct Cli {
    /// Directory holding records, stored documents and credentials
    #[arg(
        long,
        global = true,
        env = "BIDSCAN_DATA_DIR",
        default_value = bidscan_core::config::DEFAULT_DATA_DIR
    )]
    data_dir: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full text of a PDF
    Extract {
        /// Path to PDF file
        pdf_file: PathBuf,

        /// Keep the physical page layout
        #[arg(long)]
        layout: bool,

        /// Print only the number of pages
        #[arg(long, conflicts_with = "layout")]
        pages: bool,
    },
    /// Print every word of a PDF with its page and bounding box (JSON)
    Words {
        /// Path to PDF file
        pdf_file: PathBuf,
    },
    /// Locate a named section in a PDF and mine quantities and materials from it
    Section {
        /// Path to PDF file
        pdf_file: PathBuf,

        /// Section heading, e.g. "DIVISION 03"
        #[arg(short, long)]
        name: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Mine quantities and materials from a plain text file
    Mine {
        /// Path to text file
        text_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show stored metadata, a text sample and the page count of a document
    Metadata {
        document_id: u64,
    },
    /// Store a file as a document of an existing project
    Upload {
        project_id: u64,

        /// Path to the file to upload
        file: PathBuf,

        /// Document type; guessed from the filename when omitted
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        document_type: Option<String>,
    },
    /// Summarize a project and its documents
    Summary {
        project_id: u64,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Create projects from bid invitation emails
    Ingest {
        /// Directory with exported messages
        #[arg(long, value_name = "DIR")]
        mailbox: PathBuf,

        /// Mailbox account whose stored credentials are used
        #[arg(long)]
        account: String,

        /// Mailbox search query
        #[arg(long, default_value = DEFAULT_QUERY)]
        query: String,

        /// Maximum number of messages to consider
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: usize,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show headers, body and attachments of one message
    Email {
        message_id: String,

        /// Directory with exported messages
        #[arg(long, value_name = "DIR")]
        mailbox: PathBuf,

        /// Mailbox account whose stored credentials are used
        #[arg(long)]
        account: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage mailbox credentials
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Store a token file for an account
    Import {
        /// Account email address
        account: String,

        /// JSON file with token, refresh_token, token_uri, client_id, client_secret, scopes
        token_file: PathBuf,
    },
    /// List accounts with stored credentials
    Check,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::new(cli.data_dir);

    let result = match cli.command {
        Commands::Extract {
            pdf_file,
            layout,
            pages,
        } => {
            if pages {
                commands::extract::pages(&pdf_file)
            } else {
                commands::extract::text(&pdf_file, layout)
            }
        }
        Commands::Words { pdf_file } => commands::extract::words(&pdf_file),
        Commands::Section {
            pdf_file,
            name,
            output,
        } => commands::section::run(&pdf_file, &name, &output),
        Commands::Mine { text_file, output } => commands::section::mine(&text_file, &output),
        Commands::Metadata { document_id } => commands::documents::metadata(&config, document_id),
        Commands::Upload {
            project_id,
            file,
            document_type,
        } => commands::documents::upload(&config, project_id, &file, document_type.as_deref()),
        Commands::Summary { project_id, output } => {
            commands::documents::summary(&config, project_id, &output)
        }
        Commands::Ingest {
            mailbox,
            account,
            query,
            max_results,
            output,
        } => commands::ingest::run(&config, &mailbox, &account, &query, max_results, &output),
        Commands::Email {
            message_id,
            mailbox,
            account,
            output,
        } => commands::ingest::email(&config, &mailbox, &account, &message_id, &output),
        Commands::Auth { action } => match action {
            AuthAction::Import {
                account,
                token_file,
            } => commands::auth::import(&config, &account, &token_file),
            AuthAction::Check => commands::auth::check(&config),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
