use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use budget_tracker::audit::AuditLogger;
use budget_tracker::cli::{
    handle_budget_command, handle_chart_command, handle_expense_command, handle_export_command,
    handle_goal_command, handle_import_command, handle_item_command, handle_month_command,
    handle_report_command, handle_template_command, ChartArgs, GoalArgs,
};
use budget_tracker::config::{paths::TrackerPaths, settings::Settings};
use budget_tracker::logging::init_tracing;
use budget_tracker::models::current_year;
use budget_tracker::services::BudgetStore;
use budget_tracker::storage::FileStore;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Personal monthly budget tracker",
    long_about = "Track a household budget month by month: split each month's income \
                  across budget categories and record what every expense item cost."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month's expense sheet
    #[command(subcommand)]
    Month(budget_tracker::cli::MonthCommands),

    /// Income and category allocation commands
    #[command(subcommand)]
    Budget(budget_tracker::cli::BudgetCommands),

    /// Expense item catalog commands
    #[command(subcommand)]
    Item(budget_tracker::cli::ItemCommands),

    /// Record expense values
    #[command(subcommand)]
    Expense(budget_tracker::cli::ExpenseCommands),

    /// Generate reports
    #[command(subcommand)]
    Report(budget_tracker::cli::ReportCommands),

    /// Show where the money went as labelled shares
    Chart(ChartArgs),

    /// Work out how much to save each month for a goal
    Goal(GoalArgs),

    /// Export a year as a workbook directory
    Export {
        /// Output directory
        dir: PathBuf,
        /// Year to export (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Replace all data with the content of a workbook directory
    Import {
        /// Workbook directory
        dir: PathBuf,
        /// Only show what would be imported
        #[arg(long)]
        dry_run: bool,
    },

    /// Write an example workbook to fill in and import
    Template {
        /// Output directory
        dir: PathBuf,
        /// Year used in the example rows (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Delete all budget data and preferences
    Reset {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Initialize a year with the default budget
    Init {
        /// Year to create (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(data_dir = %paths.data_dir().display(), "Resolved paths");

    // Initialize storage
    let mut store = BudgetStore::load(FileStore::new(paths.data_dir()));
    if settings.audit_enabled {
        store = store.with_audit(AuditLogger::new(paths.audit_log()));
    }

    match cli.command {
        Some(Commands::Month(cmd)) => {
            handle_month_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Item(cmd)) => {
            handle_item_command(&mut store, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&store, &settings, cmd)?;
        }
        Some(Commands::Chart(args)) => {
            handle_chart_command(&store, &settings, args)?;
        }
        Some(Commands::Goal(args)) => {
            handle_goal_command(&store, &settings, args)?;
        }
        Some(Commands::Export { dir, year }) => {
            let year = year.unwrap_or_else(current_year);
            handle_export_command(&store, &settings, &dir, year)?;
        }
        Some(Commands::Import { dir, dry_run }) => {
            handle_import_command(&mut store, &dir, dry_run)?;
        }
        Some(Commands::Template { dir, year }) => {
            handle_template_command(&dir, year.unwrap_or_else(current_year))?;
        }
        Some(Commands::History { limit }) => {
            let logger = AuditLogger::new(paths.audit_log());
            let entries = if logger.exists() {
                logger.read_recent(limit)?
            } else {
                Vec::new()
            };

            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Reset { yes }) => {
            if !yes {
                println!("This deletes every year and all view preferences.");
                println!("Run 'budget reset --yes' to confirm.");
                return Ok(());
            }

            if store.reset_all() {
                println!("All budget data has been deleted.");
            } else {
                anyhow::bail!("Some data could not be deleted; see the log for details");
            }
        }
        Some(Commands::Init { year }) => {
            let year = year.unwrap_or_else(current_year);
            println!("Initializing budget tracker at: {}", paths.base_dir().display());
            settings.save(&paths)?;

            if store.initialize_year(year) {
                println!("Created {} with the default budget:", year);
            } else {
                println!("{} already exists.", year);
            }
            println!();
            println!("Default categories for every month:");
            println!("  - Gasto Fixo (60%): Água, Luz, Telefone");
            println!("  - Lazer (30%): Cinema, Bar");
            println!("  - Emergencia (10%): Emergencia");
            println!();
            println!("Run 'budget budget set-income \"Meu Salário=3000\" --all-months' to set your income.");
        }
        Some(Commands::Config) => {
            println!("Budget Tracker Configuration");
            println!("============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency.symbol);
            println!("  Audit enabled:       {}", settings.audit_enabled);
            println!("  Uncategorized label: {}", settings.uncategorized_label);
            println!();
            println!("Years: {:?}", store.ledger().years());
        }
        None => {
            println!("budget - Personal monthly budget tracker");
            println!();
            println!("Run 'budget --help' for usage information.");
            println!("Run 'budget month show' to see the current month.");
        }
    }

    Ok(())
}
