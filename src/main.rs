use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_cli::cli::{
    handle_add_command, handle_budget_command, handle_config_command, handle_delete_command,
    handle_edit_command, handle_export_command, handle_history_command, handle_init_command,
    handle_list_command, handle_login_command, handle_logout_command, handle_register_command,
    handle_scan_command, handle_show_command, handle_stats_command, handle_trend_command,
    handle_whoami_command, AddArgs, BudgetCommands, ConfigArgs, EditArgs, ExportArgs, ListArgs,
    ScanArgs,
};
use expense_cli::config::{paths::ExpensePaths, settings::Settings};
use expense_cli::display::format_categories;
use expense_cli::models::TimeFrame;
use expense_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Terminal expense tracker",
    long_about = "Record expenses from the command line, prefill them from receipt \
                  photos, keep an eye on your monthly budget and export everything \
                  to CSV."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with an email and password
    Login {
        email: String,
        #[arg(short, long, env = "EXPENSE_CLI_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create a profile and log in
    Register {
        email: String,
        #[arg(short, long, env = "EXPENSE_CLI_PASSWORD", hide_env_values = true)]
        password: String,
        /// Display name
        #[arg(short, long)]
        name: String,
    },

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Record an expense
    Add(AddArgs),

    /// List expenses
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one expense
    Show {
        /// Expense ID or ID prefix
        id: String,
    },

    /// Change an expense
    Edit(EditArgs),

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID or ID prefix
        id: String,
    },

    /// Scan a receipt photo, optionally saving it as an expense
    Scan(ScanArgs),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Spending insights
    Stats {
        #[arg(short, long, value_enum, default_value_t = TimeFrame::Month)]
        period: TimeFrame,
    },

    /// Monthly spending trend
    Trend {
        /// Number of months to show (defaults to the configured value)
        #[arg(short, long)]
        months: Option<usize>,
    },

    /// Export expenses to CSV
    Export(ExportArgs),

    /// List expense categories
    Categories,

    /// Show or change configuration
    Config(ConfigArgs),

    /// Initialize the data directory and settings file
    Init,

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },
}

fn main() -> Result<()> {
    expense_cli::init_tracing();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Login { email, password }) => {
            handle_login_command(&storage, &email, &password)?;
        }
        Some(Commands::Register {
            email,
            password,
            name,
        }) => {
            handle_register_command(&storage, &email, &password, &name)?;
        }
        Some(Commands::Logout) => handle_logout_command(&storage)?,
        Some(Commands::Whoami) => handle_whoami_command(&storage)?,
        Some(Commands::Add(args)) => handle_add_command(&storage, &settings, args)?,
        Some(Commands::List(args)) => handle_list_command(&storage, &settings, args)?,
        Some(Commands::Show { id }) => handle_show_command(&storage, &settings, &id)?,
        Some(Commands::Edit(args)) => handle_edit_command(&storage, &settings, args)?,
        Some(Commands::Delete { id }) => handle_delete_command(&storage, &settings, &id)?,
        Some(Commands::Scan(args)) => handle_scan_command(&storage, &settings, args)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Stats { period }) => handle_stats_command(&storage, &settings, period)?,
        Some(Commands::Trend { months }) => handle_trend_command(&storage, &settings, months)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, &settings, args)?,
        Some(Commands::Categories) => print!("{}", format_categories()),
        Some(Commands::Config(args)) => handle_config_command(&paths, &mut settings, args)?,
        Some(Commands::Init) => handle_init_command(&paths, &settings)?,
        Some(Commands::History { count }) => handle_history_command(&storage, count)?,
        None => {
            println!("expense - Terminal expense tracker");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense login <email>' to get started.");
        }
    }

    Ok(())
}
