use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use lx_ledger::cli::{
    handle_add, handle_ai, handle_backup_command, handle_categories, handle_clear, handle_delete,
    handle_export, handle_history, handle_import, handle_list, handle_summary, AddArgs, AiArgs,
    BackupCommands, DeleteArgs, ExportArgs, ListArgs,
};
use lx_ledger::config::{paths::DATA_DIR_ENV, LedgerPaths, Settings};
use lx_ledger::storage::open_ledger;

#[derive(Parser)]
#[command(
    name = "lx",
    author = "Li Xuan",
    version,
    about = "Personal bookkeeping ledger",
    long_about = "lx keeps a ledger of dated income and expense entries with a \
                  running balance, records every change in an activity log, and \
                  exports spreadsheet reports. Entries can be typed in directly \
                  or described in plain words and turned into entries by an \
                  OpenAI-compatible chat API."
)]
struct Cli {
    /// Base directory for data, backups and exports
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the ledger
    #[command(alias = "ls")]
    List(ListArgs),

    /// Add one entry
    Add(AddArgs),

    /// Describe entries in plain words and add them
    Ai(AiArgs),

    /// Delete an entry
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Show the activity log, newest first
    History {
        /// Number of records to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show totals, balances and breakdowns
    Summary,

    /// List categories in use
    Categories,

    /// Export a report
    Export(ExportArgs),

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Replace the ledger with a backup or exported document
    Import {
        /// Path to the document
        file: PathBuf,
        /// Skip the safety stop
        #[arg(short, long)]
        force: bool,
    },

    /// Reset entries to the initial sample data
    Clear {
        /// Skip the safety stop
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    lx_ledger::init_tracing();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("lx - Personal bookkeeping ledger");
        println!();
        println!("Run 'lx --help' for usage information.");
        println!("Run 'lx list' to see the ledger.");
        return Ok(());
    };

    if let Commands::Config = command {
        println!("lx Configuration");
        println!("================");
        println!("Base directory:   {}", paths.base_dir().display());
        println!("Data directory:   {}", paths.data_dir().display());
        println!("Backup directory: {}", paths.backup_dir().display());
        println!("Export directory: {}", paths.export_dir().display());
        println!("Settings file:    {}", paths.settings_file().display());
        println!();
        println!("Settings:");
        println!("  AI endpoint:      {}", settings.ai.base_url);
        println!("  AI model:         {}", settings.ai.model);
        println!("  API key variable: {}", settings.ai.api_key_env);
        println!("  Report title:     {}", settings.export.title);
        println!("  Report format:    {}", settings.export.default_format.extension());
        println!("  Backup retention: {}", settings.backup_retention);
        return Ok(());
    }

    let mut ledger = open_ledger(&paths)?;

    match command {
        Commands::List(args) => handle_list(&ledger, &args)?,
        Commands::Add(args) => handle_add(&mut ledger, args)?,
        Commands::Ai(args) => handle_ai(&mut ledger, &settings.ai, &args)?,
        Commands::Delete(args) => handle_delete(&mut ledger, &args)?,
        Commands::History { limit } => handle_history(&ledger, limit)?,
        Commands::Summary => handle_summary(&ledger)?,
        Commands::Categories => handle_categories(&ledger)?,
        Commands::Export(args) => handle_export(&mut ledger, &paths, &settings, &args)?,
        Commands::Backup(cmd) => handle_backup_command(&mut ledger, &paths, &settings, cmd)?,
        Commands::Import { file, force } => handle_import(&mut ledger, &file, force)?,
        Commands::Clear { force } => handle_clear(&mut ledger, force)?,
        Commands::Config => {}
    }

    if let Some(e) = ledger.take_persist_error() {
        return Err(anyhow::Error::new(e).context("changes were applied but could not be saved"));
    }

    Ok(())
}
