use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::cli::{
    handle_category_command, handle_config_command, handle_expense_command, handle_export,
    handle_history, handle_import, handle_report_command, handle_shopping_command,
    handle_subcategory_command,
};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::services::Tracker;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense and shopping-list tracker",
    long_about = "Track expenses by category and subcategory, keep shopping lists, \
                  see where the money went per month or year, and back everything \
                  up to a portable JSON file."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management commands
    #[command(subcommand, alias = "cat")]
    Category(expense_tracker::cli::CategoryCommands),

    /// Subcategory management commands
    #[command(subcommand, alias = "sub")]
    Subcategory(expense_tracker::cli::SubcategoryCommands),

    /// Expense commands
    #[command(subcommand, alias = "exp")]
    Expense(expense_tracker::cli::ExpenseCommands),

    /// Shopping list commands
    #[command(subcommand)]
    Shopping(expense_tracker::cli::ShoppingCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(expense_tracker::cli::ReportCommands),

    /// Expense history, newest first
    History(expense_tracker::cli::HistoryArgs),

    /// Export data to a file
    Export(expense_tracker::cli::ExportArgs),

    /// Replace all data from an exported JSON file
    Import(expense_tracker::cli::ImportArgs),

    /// Show or change configuration
    #[command(subcommand)]
    Config(expense_tracker::cli::ConfigCommands),

    /// Create the data directory and write the default categories
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let mut tracker = Tracker::open_at(&paths, &settings);

    match cli.command {
        Some(Commands::Category(cmd)) => handle_category_command(&mut tracker, &settings, cmd)?,
        Some(Commands::Subcategory(cmd)) => handle_subcategory_command(&mut tracker, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&mut tracker, &settings, cmd)?,
        Some(Commands::Shopping(cmd)) => handle_shopping_command(&mut tracker, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&tracker, &settings, cmd)?,
        Some(Commands::History(args)) => handle_history(&tracker, &settings, args)?,
        Some(Commands::Export(args)) => handle_export(&tracker, &settings, args)?,
        Some(Commands::Import(args)) => handle_import(&mut tracker, args)?,
        Some(Commands::Config(cmd)) => handle_config_command(&paths, &mut settings, cmd)?,
        Some(Commands::Init) => {
            println!("Initializing expense tracker at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            tracker.flush()?;
            println!("Initialization complete!");
            println!();
            println!("Categories:");
            for category in tracker.expenses.categories() {
                let subs: Vec<&str> = category
                    .subcategories
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect();
                println!("  - {} ({})", category.name, subs.join(", "));
            }
            println!();
            println!("Run 'expense expense add <AMOUNT> --subcategory <NAME>' to record an expense.");
        }
        None => {
            println!("Expense tracker - categories, expenses and shopping lists");
            println!();
            println!("Run 'expense --help' for usage information.");
        }
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "expense_tracker=debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
