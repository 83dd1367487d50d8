use anyhow::Result;
use clap::{Parser, Subcommand};

use sankey::cli::{
    handle_categories, handle_category, handle_dashboard, handle_export, ExportArgs, ViewArgs,
};
use sankey::config::{paths::SankeyPaths, settings::Settings};
use sankey::services::LoadCache;

#[derive(Parser)]
#[command(
    name = "sankey",
    version,
    about = "Income and spending flow dashboard for transaction exports",
    long_about = "cashflow-sankey reads a CSV export of your transactions, filters it \
                  to a date range and shows where your income went: total income, \
                  spending per category, savings and savings rate, with a drill-down \
                  into the merchants behind each category."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cash flow dashboard
    #[command(alias = "dash")]
    Dashboard {
        #[command(flatten)]
        args: ViewArgs,

        /// Drill into this expense category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show merchants and recent transactions for one category
    Category {
        #[command(flatten)]
        args: ViewArgs,

        /// Category name
        category: String,
    },

    /// List the expense categories in the selected period
    Categories {
        #[command(flatten)]
        args: ViewArgs,
    },

    /// Export the computed view
    Export(ExportArgs),

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SankeyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut cache = LoadCache::with_loader(settings.loader());

    match cli.command {
        Some(Commands::Dashboard { args, category }) => {
            handle_dashboard(&mut cache, &settings, &args, category.as_deref())?;
        }
        Some(Commands::Category { args, category }) => {
            handle_category(&mut cache, &settings, &args, &category)?;
        }
        Some(Commands::Categories { args }) => {
            handle_categories(&mut cache, &settings, &args)?;
        }
        Some(Commands::Export(args)) => {
            handle_export(&mut cache, &settings, &args)?;
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            println!("cashflow-sankey Configuration");
            println!("=============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "Initialized:      {}",
                if paths.is_initialized() { "yes" } else { "no" }
            );
            println!();
            println!("Settings:");
            println!("  Default range:     {}", settings.default_range);
            println!("  Excluded rows:     {}", settings.excluded_policy);
            println!("  Top merchants:     {}", settings.top_merchants);
            println!("  Recent limit:      {}", settings.recent_limit);
            println!("  Top categories:    {}", settings.top_categories);
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
        }
        None => {
            println!("cashflow-sankey - Where did the money go?");
            println!();
            println!("Run 'sankey --help' for usage information.");
            println!("Run 'sankey dashboard <FILE>' to view a transaction export.");
        }
    }

    Ok(())
}
