//! State machine behind the sessions grid.
//!
//! The view never performs I/O. Interactions that need data return a
//! [`FetchRequest`]; the caller runs it through a
//! [`ManagementBridge`](crate::ManagementBridge) and hands the result back to
//! [`SessionsView::complete`]. Every request carries a generation number and
//! only the newest one is applied, so a slow reply can never overwrite a
//! newer page.

use crate::api::ManagementError;
use crate::filter::{
    Filter, FilterDescriptor, FilterField, FilterOperation, SortColumn, SortDirection, SortState,
};
use crate::jolokia::ExecRequest;
use crate::navigation::{NavTarget, Navigation, NavigationContext, WorkspaceSelection};
use crate::paging::{parse_page, PageSize, PagingState};
use crate::protocol::{LIST_SESSIONS_OPERATION, SESSIONS_RESOURCE};
use crate::{SessionPage, SessionRow};

/// Row-level actions exposed as links in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Connection,
    Consumers,
    Producers,
}

/// A grid column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Attribute name in the broker payload
    pub field: &'static str,
    pub display_name: &'static str,
    pub sort: SortColumn,
    /// Set when the cell is rendered as a link
    pub action: Option<RowAction>,
}

pub const COLUMNS: [Column; 6] = [
    Column {
        field: "id",
        display_name: "ID",
        sort: SortColumn::Id,
        action: None,
    },
    Column {
        field: "connectionID",
        display_name: "Connection",
        sort: SortColumn::ConnectionId,
        action: Some(RowAction::Connection),
    },
    Column {
        field: "user",
        display_name: "User",
        sort: SortColumn::User,
        action: None,
    },
    Column {
        field: "consumerCount",
        display_name: "Consumer Count",
        sort: SortColumn::ConsumerCount,
        action: Some(RowAction::Consumers),
    },
    Column {
        field: "producerCount",
        display_name: "Producer Count",
        sort: SortColumn::ProducerCount,
        action: Some(RowAction::Producers),
    },
    Column {
        field: "creationTime",
        display_name: "Creation Time",
        sort: SortColumn::CreationTime,
        action: None,
    },
];

impl SessionRow {
    /// Display text for a column
    pub fn cell(&self, column: &Column) -> String {
        match column.sort {
            SortColumn::Id => self.id.clone(),
            SortColumn::ConnectionId => self.connection_id.clone(),
            SortColumn::User => self.user.clone(),
            SortColumn::ConsumerCount => self.consumer_count.to_string(),
            SortColumn::ProducerCount => self.producer_count.to_string(),
            SortColumn::CreationTime => self.creation_time.clone(),
        }
    }
}

/// Errors from row actions
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewError {
    #[error("Not implemented: navigating to {0} from a session")]
    Unsupported(&'static str),

    #[error("No row at index {0}")]
    NoSuchRow(usize),

    #[error(transparent)]
    Management(#[from] ManagementError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Error,
}

/// A user-visible message raised by the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    /// The resource the message is about
    pub resource: &'static str,
    pub message: String,
}

impl Notification {
    fn retrieval_failed(resource: &'static str) -> Self {
        Self {
            level: NotificationLevel::Error,
            resource,
            message: format!("Could not retrieve {} list from Artemis.", resource),
        }
    }
}

/// Identifies one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    /// Issued by a manual refresh
    pub manual: bool,
}

/// A fetch the caller must run against the bridge
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub exec: ExecRequest,
}

/// What happened when a reply was handed back
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Rows replaced. A manual refresh that moved the grid back to page 1
    /// asks for that page with `follow_up`.
    Applied { follow_up: Option<FetchRequest> },
    /// Reply dropped; a newer fetch was issued after it
    Stale,
    /// Notification raised; rows untouched
    Failed(ManagementError),
}

pub struct SessionsView {
    selection: WorkspaceSelection,
    navigation: NavigationContext,
    filter: Filter,
    sort: SortState,
    paging: PagingState,
    rows: Vec<SessionRow>,
    total: u64,
    generation: u64,
    in_flight: bool,
    refresh_requested: bool,
    notifications: Vec<Notification>,
}

impl SessionsView {
    /// Activate the view for the selected broker.
    ///
    /// A pending connection or session handed over by another view is
    /// logged; the session slot is then cleared so a later activation does
    /// not pick it up again.
    pub fn activate(selection: WorkspaceSelection, mut navigation: NavigationContext) -> Self {
        if let Some(connection) = &navigation.connection {
            tracing::info!("navigating to connection = {}", connection);
        } else if let Some(session) = &navigation.session {
            tracing::info!("navigating to session = {}", session);
        }
        navigation.session = None;

        Self {
            selection,
            navigation,
            filter: Filter::default(),
            sort: SortState::default(),
            paging: PagingState::default(),
            rows: Vec::new(),
            total: 0,
            generation: 0,
            in_flight: false,
            refresh_requested: false,
            notifications: Vec::new(),
        }
    }

    /// Reset to defaults and request the first page
    pub fn initialize(&mut self) -> Option<FetchRequest> {
        self.filter = Filter::default();
        self.sort = SortState::default();
        self.paging = PagingState::default();
        self.refresh()
    }

    /// Restore a saved grid state without fetching
    pub fn restore(&mut self, filter: Filter, sort: SortState, paging: PagingState) {
        self.filter = filter;
        self.sort = sort;
        self.paging = PagingState {
            current_page: paging.current_page.max(1),
            ..paging
        };
    }

    pub fn apply_filter(
        &mut self,
        field: FilterField,
        operation: FilterOperation,
        value: impl Into<String>,
    ) -> Option<FetchRequest> {
        self.filter = Filter::new(field, operation, value);
        self.paging.current_page = 1;
        self.fetch()
    }

    pub fn reset_filter(&mut self) -> Option<FetchRequest> {
        self.filter.clear();
        self.fetch()
    }

    /// Move to `page`. Zero and the current page are ignored.
    pub fn change_page(&mut self, page: u32) -> Option<FetchRequest> {
        self.change_paging(PagingState {
            page_size: self.paging.page_size,
            current_page: page,
        })
    }

    /// Move to a page typed into the grid footer
    pub fn change_page_input(&mut self, input: &str) -> Option<FetchRequest> {
        let page = parse_page(input)?;
        self.change_page(page)
    }

    /// Change the page size. On its own this does not refetch; the new size
    /// applies to the next request.
    pub fn change_page_size(&mut self, size: PageSize) -> Option<FetchRequest> {
        self.change_paging(PagingState {
            page_size: size,
            current_page: self.paging.current_page,
        })
    }

    /// Page-size selector: apply the size and show the first page
    pub fn select_page_size(&mut self, size: PageSize) -> Option<FetchRequest> {
        self.paging.page_size = size;
        if self.paging.current_page == 1 {
            self.fetch()
        } else {
            self.change_page(1)
        }
    }

    /// Replace the paging state; refetches only when the page number moved
    pub fn change_paging(&mut self, paging: PagingState) -> Option<FetchRequest> {
        let page_changed = paging.current_page != self.paging.current_page;
        if paging.current_page == 0 {
            self.paging.page_size = paging.page_size;
            return None;
        }
        self.paging = paging;
        if page_changed {
            self.fetch()
        } else {
            None
        }
    }

    /// Apply the grid's sort lists; refetches only on change
    pub fn change_sort(
        &mut self,
        fields: &[SortColumn],
        directions: &[SortDirection],
    ) -> Option<FetchRequest> {
        let sort = SortState::from_grid(fields, directions)?;
        self.set_sort(sort)
    }

    pub fn set_sort(&mut self, sort: SortState) -> Option<FetchRequest> {
        if sort == self.sort {
            return None;
        }
        self.sort = sort;
        self.fetch()
    }

    /// Manual refresh: once it succeeds the grid returns to page 1
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        self.refresh_requested = true;
        self.fetch()
    }

    /// Build the `listSessions` request for the current state.
    ///
    /// Returns `None` (after raising a notification) when no request can be
    /// built, e.g. when no broker is selected.
    pub fn fetch(&mut self) -> Option<FetchRequest> {
        let manual = std::mem::take(&mut self.refresh_requested);
        let exec = match self.build_exec() {
            Ok(exec) => exec,
            Err(err) => {
                self.fail(&err);
                return None;
            }
        };

        self.generation += 1;
        self.in_flight = true;
        Some(FetchRequest {
            ticket: FetchTicket {
                generation: self.generation,
                manual,
            },
            exec,
        })
    }

    fn build_exec(&self) -> Result<ExecRequest, ManagementError> {
        let mbean = self.selection.broker_mbean()?;
        let filter = FilterDescriptor::new(&self.filter, &self.sort).to_json()?;
        tracing::debug!("Filter string: {}", filter);
        Ok(ExecRequest::new(
            mbean,
            LIST_SESSIONS_OPERATION,
            vec![
                serde_json::Value::String(filter),
                self.paging.current_page.into(),
                self.paging.page_size.get().into(),
            ],
        ))
    }

    /// Hand back the bridge's reply for `ticket`
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<serde_json::Value, ManagementError>,
    ) -> FetchOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                "dropping reply for fetch #{} (latest is #{})",
                ticket.generation,
                self.generation
            );
            return FetchOutcome::Stale;
        }
        self.in_flight = false;

        let page = match result.and_then(SessionPage::from_value) {
            Ok(page) => page,
            Err(err) => {
                self.fail(&err);
                return FetchOutcome::Failed(err);
            }
        };

        self.rows = page.data;
        self.total = page.count;

        let mut follow_up = None;
        if ticket.manual && self.paging.current_page != 1 {
            follow_up = self.change_page(1);
        }
        FetchOutcome::Applied { follow_up }
    }

    fn fail(&mut self, err: &ManagementError) {
        tracing::warn!("Failed to list {}: {}", SESSIONS_RESOURCE, err);
        self.notifications
            .push(Notification::retrieval_failed(SESSIONS_RESOURCE));
    }

    /// Hand the row's connection to the connections view
    pub fn on_connection_link_clicked(&mut self, row: usize) -> Result<Navigation, ViewError> {
        let connection = self
            .rows
            .get(row)
            .map(|r| r.connection_id.clone())
            .ok_or(ViewError::NoSuchRow(row))?;
        self.navigation.connection = Some(connection);
        Ok(Navigation {
            target: NavTarget::Connections,
            context: self.navigation.clone(),
        })
    }

    pub fn on_consumers_clicked(&self, row: usize) -> Result<Navigation, ViewError> {
        self.row(row)?;
        Err(ViewError::Unsupported("consumers"))
    }

    pub fn on_producers_clicked(&self, row: usize) -> Result<Navigation, ViewError> {
        self.row(row)?;
        Err(ViewError::Unsupported("producers"))
    }

    /// Dispatch a link click on `row`
    pub fn on_row_action(&mut self, action: RowAction, row: usize) -> Result<Navigation, ViewError> {
        match action {
            RowAction::Connection => self.on_connection_link_clicked(row),
            RowAction::Consumers => self.on_consumers_clicked(row),
            RowAction::Producers => self.on_producers_clicked(row),
        }
    }

    fn row(&self, row: usize) -> Result<&SessionRow, ViewError> {
        self.rows.get(row).ok_or(ViewError::NoSuchRow(row))
    }

    pub fn rows(&self) -> &[SessionRow] {
        &self.rows
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn paging(&self) -> PagingState {
        self.paging
    }

    pub fn page_count(&self) -> u32 {
        self.paging.page_count(self.total)
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }

    pub fn navigation(&self) -> &NavigationContext {
        &self.navigation
    }

    /// Tear down, returning the context for the next view
    pub fn into_navigation(self) -> NavigationContext {
        self.navigation
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
