//! Terminal rendering of the sessions grid

use colored::Colorize;
use shared::{Notification, SessionRow, SessionsView, COLUMNS};
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Table,
}

#[derive(Tabled)]
struct SessionLine {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Connection")]
    connection: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Consumer Count")]
    consumers: u64,
    #[tabled(rename = "Producer Count")]
    producers: u64,
    #[tabled(rename = "Creation Time")]
    created: String,
}

impl SessionLine {
    fn new(index: usize, row: &SessionRow) -> Self {
        Self {
            row: index + 1,
            id: row.id.clone(),
            connection: row.connection_id.clone(),
            user: if row.user.is_empty() {
                "-".to_string()
            } else {
                row.user.clone()
            },
            consumers: row.consumer_count,
            producers: row.producer_count,
            created: row.creation_time.clone(),
        }
    }
}

/// Print the current page in the requested format
pub fn print_page(view: &SessionsView, format: OutputFormat) -> anyhow::Result<()> {
    let rows = view.rows();
    match format {
        OutputFormat::Json => {
            let page = serde_json::json!({
                "data": rows,
                "count": view.total(),
                "page": view.paging().current_page,
                "pageSize": view.paging().page_size.get(),
            });
            println!("{}", serde_json::to_string_pretty(&page)?);
            return Ok(());
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("No sessions found");
            } else {
                let lines: Vec<SessionLine> = rows
                    .iter()
                    .enumerate()
                    .map(|(i, r)| SessionLine::new(i, r))
                    .collect();
                println!("{}", Table::new(lines));
            }
        }
        OutputFormat::Pretty => {
            if rows.is_empty() {
                println!("No sessions found");
            } else {
                for (i, row) in rows.iter().enumerate() {
                    println!("\n  {} {}", format!("{:>3}", i + 1).dimmed(), row.id.bold());
                    for column in COLUMNS.iter().skip(1) {
                        let cell = row.cell(column);
                        let cell = if column.action.is_some() {
                            cell.cyan().underline().to_string()
                        } else {
                            cell
                        };
                        println!("      {}: {}", column.display_name, cell);
                    }
                }
            }
        }
    }
    print_footer(view);
    Ok(())
}

fn print_footer(view: &SessionsView) {
    let paging = view.paging();
    let filter = view.filter();
    println!();
    println!(
        "{} {} of {}  ({} sessions, {} per page, sorted by {} {})",
        "Page".bold(),
        paging.current_page,
        view.page_count(),
        view.total(),
        paging.page_size,
        view.sort().column,
        view.sort().direction,
    );
    if !filter.is_empty() {
        println!(
            "{} {} {} {:?}",
            "Filter:".bold(),
            filter.field.map(|f| f.label()).unwrap_or("-"),
            filter.operation.map(|o| o.label()).unwrap_or("-"),
            filter.value
        );
    }
}

pub fn print_notifications(notifications: &[Notification]) {
    for note in notifications {
        eprintln!("{} {}", "✗".red(), note.message.red());
    }
}
