use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use finquery_core::polygon::{self, RouteDecision};
use finquery_core::{ConfigLoader, SessionStore, ToolFactory};
use log::LevelFilter;
use serde_json::json;

#[derive(Parser, Debug)]
#[clap(name = "finquery", author, version = "0.1.0", about = "Financial query toolkit")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(
        long,
        short,
        default_value = "finquery.yaml",
        help = "Path to the toolkit configuration file"
    )]
    config: String,

    #[clap(long, short, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a question through one of the tools and print its output
    Ask {
        #[clap(long, short, value_enum, default_value = "market")]
        tool: ToolChoice,

        question: String,
    },
    /// Show which market-data operation a question would route to, without
    /// calling any remote service
    Route { question: String },
    /// List the registered tools and their descriptions
    Tools,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ToolChoice {
    Retriever,
    Search,
    Market,
}

impl ToolChoice {
    fn tool_name(self) -> &'static str {
        match self {
            ToolChoice::Retriever => "retriever",
            ToolChoice::Search => "tavily_search",
            ToolChoice::Market => "polygon_market_data",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();

    let config = ConfigLoader::load_or_default(&cli.config).await?;
    let session = SessionStore::new();

    match cli.command {
        Commands::Ask { tool, question } => {
            let registry = ToolFactory::create_default_registry(&config, &session);
            let tool = registry
                .get_tool(tool.tool_name())
                .ok_or_else(|| anyhow::anyhow!("tool not registered"))?;

            let output = tool.execute(json!({ "question": question })).await?;
            println!("{}", output);
        }
        Commands::Route { question } => {
            let decision = polygon::route_query(&question, &polygon::CapabilitySet::full());
            match decision {
                RouteDecision::NoTicker => {
                    println!("no ticker found; the query would not reach any operation")
                }
                RouteDecision::News { ticker } => println!("news for {}", ticker),
                RouteDecision::Financials { ticker } => println!("financials for {}", ticker),
                RouteDecision::Aggregates(params) => println!(
                    "aggregates for {}: {} x{} from {} to {}",
                    params.ticker,
                    params.timespan,
                    params.timespan_multiplier,
                    params.from_date,
                    params.to_date
                ),
                RouteDecision::Unroutable { ticker } => {
                    println!("no operation available for {}", ticker)
                }
            }
        }
        Commands::Tools => {
            let registry = ToolFactory::create_default_registry(&config, &session);
            for metadata in registry.list_tools() {
                println!("{}\n  {}", metadata.name, metadata.description);
            }
        }
    }

    Ok(())
}
