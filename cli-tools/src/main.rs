//! artemis-console - browse the sessions of an ActiveMQ Artemis broker
//!
//! Talks to the broker's Jolokia agent and invokes `listSessions` with
//! server-side paging, sorting and filtering.

mod browse;
mod client;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use shared::protocol::{DEFAULT_BROKER_NAME, DEFAULT_JMX_DOMAIN};
use shared::{
    ApiClientConfig, FetchOutcome, Filter, FilterField, FilterOperation, NavigationContext,
    PageSize, PagingState, SessionsController, SessionsView, SortColumn, SortDirection, SortState,
    WorkspaceSelection,
};

use client::NativeJolokiaClient;
use render::OutputFormat;

#[derive(Parser)]
#[command(name = "artemis-console")]
#[command(about = "Browse ActiveMQ Artemis sessions over Jolokia", long_about = None)]
struct Cli {
    /// Jolokia endpoint of the broker console
    #[arg(
        short,
        long,
        env = "ARTEMIS_JOLOKIA_URL",
        default_value = "http://localhost:8161/console/jolokia"
    )]
    url: String,

    /// Console user
    #[arg(long, env = "ARTEMIS_USER")]
    user: Option<String>,

    /// Console password
    #[arg(long, env = "ARTEMIS_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// JMX domain the broker is registered under
    #[arg(long, env = "ARTEMIS_JMX_DOMAIN", default_value = DEFAULT_JMX_DOMAIN)]
    domain: String,

    /// Broker name
    #[arg(short, long, env = "ARTEMIS_BROKER", default_value = DEFAULT_BROKER_NAME)]
    broker: String,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Session listing
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(clap::Args)]
struct Query {
    /// Page to fetch (1-based)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Sessions per page (50, 100 or 200)
    #[arg(long, default_value_t = 100, value_parser = parse_page_size)]
    page_size: u32,

    /// Field to filter on (e.g. USER, CLIENT_ID, REMOTE_ADDRESS)
    #[arg(long, requires = "operation")]
    field: Option<FilterField>,

    /// Filter operation (EQUALS or CONTAINS)
    #[arg(long, requires = "value")]
    operation: Option<FilterOperation>,

    /// Value to match
    #[arg(long, requires = "field")]
    value: Option<String>,

    /// Column to sort by
    #[arg(long, default_value = "ID")]
    sort: SortColumn,

    /// Sort direction
    #[arg(long, default_value = "asc")]
    direction: SortDirection,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Fetch one page of sessions
    List(Query),
    /// Page through sessions interactively
    Browse,
    /// Show the filter fields and operations the broker understands
    Fields,
}

fn parse_page_size(s: &str) -> Result<u32, String> {
    let size: u32 = s.parse().map_err(|e| format!("{}", e))?;
    PageSize::try_from(size)
        .map(PageSize::get)
        .map_err(|e| e.to_string())
}

impl Query {
    fn filter(&self) -> Filter {
        match (self.field, self.operation) {
            (Some(field), Some(operation)) => {
                Filter::new(field, operation, self.value.clone().unwrap_or_default())
            }
            _ => Filter::default(),
        }
    }

    fn paging(&self) -> Result<PagingState> {
        Ok(PagingState {
            page_size: PageSize::try_from(self.page_size)?,
            current_page: self.page,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ApiClientConfig::new(&cli.url);
    if let Some(user) = &cli.user {
        config = config.with_credentials(user, cli.password.clone().unwrap_or_default());
    }
    let client = NativeJolokiaClient::new(config).context("Failed to set up Jolokia client")?;

    let selection = WorkspaceSelection::for_broker(&cli.domain, &cli.broker);
    let view = SessionsView::activate(selection, NavigationContext::default());
    let mut controller = SessionsController::new(client, view);

    match cli.command {
        Commands::Sessions { action } => match action {
            SessionAction::List(query) => {
                let paging = query.paging()?;
                controller.view_mut().restore(
                    query.filter(),
                    SortState::new(query.sort, query.direction),
                    paging,
                );
                let outcome = controller.fetch().await;
                let notifications = controller.view_mut().take_notifications();
                render::print_notifications(&notifications);
                match outcome {
                    Some(FetchOutcome::Applied { .. }) => {
                        render::print_page(controller.view(), cli.format)?;
                    }
                    Some(FetchOutcome::Failed(err)) => {
                        return Err(err)
                            .context(format!("Could not list sessions from {}", cli.url));
                    }
                    Some(FetchOutcome::Stale) | None => {
                        anyhow::bail!("No sessions request was made");
                    }
                }
            }
            SessionAction::Browse => {
                if let Some(nav) = browse::run(&mut controller, cli.format).await? {
                    let connection = nav.context.connection.unwrap_or_default();
                    println!(
                        "{} Connection {} selected for the connections view ({})",
                        "→".blue(),
                        connection.bold(),
                        nav.target.path()
                    );
                }
            }
            SessionAction::Fields => {
                println!("{}", "Filter fields:".bold());
                for field in FilterField::ALL {
                    println!("  {:<16} {}", field.as_str(), field.label());
                }
                println!("{}", "Operations:".bold());
                for op in FilterOperation::ALL {
                    println!("  {:<16} {}", op.as_str(), op.label());
                }
                println!("{}", "Sort columns:".bold());
                for column in SortColumn::ALL {
                    println!("  {}", column.as_str());
                }
            }
        },
    }

    Ok(())
}
