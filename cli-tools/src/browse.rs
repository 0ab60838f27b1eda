//! Interactive pager over the sessions grid.
//!
//! Reads one command per line from stdin and maps it onto the view's
//! operations, re-rendering after every fetch.

use anyhow::{bail, Result};
use colored::Colorize;
use shared::{
    FetchOutcome, FilterField, FilterOperation, ManagementBridge, Navigation, PageSize, RowAction,
    SessionsController, SortColumn, SortDirection, SortState,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::{self, OutputFormat};

/// A parsed pager command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Next,
    Prev,
    Page(String),
    Size(PageSize),
    Sort(SortState),
    Filter {
        field: FilterField,
        operation: FilterOperation,
        value: String,
    },
    Reset,
    Refresh,
    /// Row link click; rows are numbered from 1 on screen
    Open(RowAction, usize),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            bail!("empty command");
        };
        let rest: Vec<&str> = parts.collect();

        let command = match word.to_ascii_lowercase().as_str() {
            "n" | "next" => Command::Next,
            "p" | "prev" => Command::Prev,
            "page" | "g" => match rest.as_slice() {
                [page] => Command::Page(page.to_string()),
                _ => bail!("usage: page <number>"),
            },
            "size" => match rest.as_slice() {
                [size] => Command::Size(PageSize::try_from(size.parse::<u32>()?)?),
                _ => bail!("usage: size <50|100|200>"),
            },
            "sort" => match rest.as_slice() {
                [column] => Command::Sort(SortState::new(
                    column.parse::<SortColumn>()?,
                    SortDirection::Asc,
                )),
                [column, direction] => Command::Sort(SortState::new(
                    column.parse::<SortColumn>()?,
                    direction.parse::<SortDirection>()?,
                )),
                _ => bail!("usage: sort <column> [asc|desc]"),
            },
            "filter" | "f" => match rest.as_slice() {
                [field, operation, value @ ..] if !value.is_empty() => Command::Filter {
                    field: field.parse()?,
                    operation: operation.parse()?,
                    value: value.join(" "),
                },
                _ => bail!("usage: filter <field> <equals|contains> <value>"),
            },
            "reset" => Command::Reset,
            "r" | "refresh" => Command::Refresh,
            "connection" | "consumers" | "producers" => {
                let action = match word.to_ascii_lowercase().as_str() {
                    "connection" => RowAction::Connection,
                    "consumers" => RowAction::Consumers,
                    _ => RowAction::Producers,
                };
                match rest.as_slice() {
                    [row] => {
                        let row: usize = row.parse()?;
                        if row == 0 {
                            bail!("rows are numbered from 1");
                        }
                        Command::Open(action, row)
                    }
                    _ => bail!("usage: {} <row>", word),
                }
            }
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => bail!("unknown command {:?} (try `help`)", other),
        };
        Ok(command)
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  next | prev | page <n>          move between pages");
    println!("  size <50|100|200>               change page size");
    println!("  sort <column> [asc|desc]        sort by ID, CONNECTION_ID, USER, CONSUMER_COUNT, PRODUCER_COUNT, CREATION_TIME");
    println!("  filter <field> <op> <value>     filter server-side");
    println!("  reset                           clear the filter");
    println!("  refresh                         reload and return to page 1");
    println!("  connection|consumers|producers <row>   follow a row link");
    println!("  quit");
    println!();
    println!(
        "{} {}",
        "Fields:".bold(),
        FilterField::ALL
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

/// Run the pager until the user quits or follows a connection link
pub async fn run<B: ManagementBridge>(
    controller: &mut SessionsController<B>,
    format: OutputFormat,
) -> Result<Option<Navigation>> {
    let outcome = controller.initialize().await;
    show(controller, outcome, format)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("{} ", "sessions>".blue());
        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{} {}", "✗".red(), e);
                continue;
            }
        };

        let outcome = match command {
            Command::Quit => return Ok(None),
            Command::Help => {
                print_help();
                continue;
            }
            Command::Next => {
                let page = controller.view().paging().current_page;
                if page >= controller.view().page_count() {
                    eprintln!("Already on the last page");
                    continue;
                }
                controller.change_page(page + 1).await
            }
            Command::Prev => {
                let page = controller.view().paging().current_page;
                controller.change_page(page.saturating_sub(1)).await
            }
            Command::Page(input) => controller.change_page_input(&input).await,
            Command::Size(size) => controller.select_page_size(size).await,
            Command::Sort(sort) => controller.set_sort(sort).await,
            Command::Filter {
                field,
                operation,
                value,
            } => controller.apply_filter(field, operation, value).await,
            Command::Reset => controller.reset_filter().await,
            Command::Refresh => controller.refresh().await,
            Command::Open(action, row) => match controller.on_row_action(action, row - 1) {
                Ok(nav) => return Ok(Some(nav)),
                Err(e) => {
                    eprintln!("{} {}", "✗".red(), e);
                    continue;
                }
            },
        };
        show(controller, outcome, format)?;
    }
}

fn show<B: ManagementBridge>(
    controller: &mut SessionsController<B>,
    outcome: Option<FetchOutcome>,
    format: OutputFormat,
) -> Result<()> {
    let notifications = controller.view_mut().take_notifications();
    render::print_notifications(&notifications);
    if matches!(outcome, Some(FetchOutcome::Applied { .. })) {
        render::print_page(controller.view(), format)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_paging_commands() {
        assert_eq!(Command::parse("n").unwrap(), Command::Next);
        assert_eq!(Command::parse("page 4").unwrap(), Command::Page("4".to_string()));
        assert_eq!(Command::parse("size 200").unwrap(), Command::Size(PageSize::TwoHundred));
        assert!(Command::parse("size 75").is_err());
        assert!(Command::parse("page").is_err());
    }

    #[test]
    fn parses_sort_and_filter() {
        assert_eq!(
            Command::parse("sort user desc").unwrap(),
            Command::Sort(SortState::new(SortColumn::User, SortDirection::Desc))
        );
        assert_eq!(
            Command::parse("sort creation_time").unwrap(),
            Command::Sort(SortState::new(SortColumn::CreationTime, SortDirection::Asc))
        );
        assert_eq!(
            Command::parse("filter remote_address contains 10.0.0 :61616").unwrap(),
            Command::Filter {
                field: FilterField::RemoteAddress,
                operation: FilterOperation::Contains,
                value: "10.0.0 :61616".to_string(),
            }
        );
        assert!(Command::parse("filter user contains").is_err());
        assert!(Command::parse("filter address equals x").is_err());
    }

    #[test]
    fn parses_row_links() {
        assert_eq!(
            Command::parse("connection 2").unwrap(),
            Command::Open(RowAction::Connection, 2)
        );
        assert_eq!(
            Command::parse("producers 1").unwrap(),
            Command::Open(RowAction::Producers, 1)
        );
        assert!(Command::parse("consumers 0").is_err());
        assert!(Command::parse("bogus").is_err());
    }
}
