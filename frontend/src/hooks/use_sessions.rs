//! Hook wiring a [`SessionsView`] to the browser's Jolokia bridge.

use std::cell::RefCell;
use std::rc::Rc;

use shared::{
    ApiClientConfig, FetchOutcome, FetchRequest, Filter, ManagementBridge, NavigationContext,
    PageSize, SessionsView, SortState, WorkspaceSelection,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::bridge::BrowserJolokiaClient;
use crate::utils;

/// User interactions with the grid
#[derive(Debug, Clone, PartialEq)]
pub enum GridAction {
    Initialize,
    Refresh,
    /// Ignored unless both field and operation are set
    ApplyFilter(Filter),
    ResetFilter,
    ChangePage(u32),
    ChangePageInput(String),
    SelectPageSize(PageSize),
    Sort(SortState),
    DismissNotifications,
}

/// Return value from the use_sessions_view hook.
pub struct UseSessionsView {
    /// The view; borrow it to render
    pub view: Rc<RefCell<SessionsView>>,
    /// Apply a grid interaction, fetching when the view asks for it
    pub dispatch: Callback<GridAction>,
}

/// Run a fetch and any follow-up it produces.
///
/// Fetches are not serialized; the view drops replies that were
/// superseded while in flight.
fn spawn_fetch(
    view: Rc<RefCell<SessionsView>>,
    bridge: Rc<BrowserJolokiaClient>,
    request: Option<FetchRequest>,
    redraw: UseForceUpdateHandle,
) {
    // Redraw right away: the request may have failed to build (and raised a
    // notification) or just put the grid into its loading state.
    redraw.force_update();
    let Some(request) = request else {
        return;
    };

    spawn_local(async move {
        let mut next = Some(request);
        while let Some(FetchRequest { ticket, exec }) = next.take() {
            let result = bridge.exec(&exec).await;
            if let Err(e) = &result {
                log::error!("Failed to fetch sessions: {}", e);
            }
            let outcome = view.borrow_mut().complete(ticket, result);
            if let FetchOutcome::Applied { follow_up } = outcome {
                next = follow_up;
            }
            redraw.force_update();
        }
    });
}

/// Hook owning the sessions grid state for one page activation.
///
/// `selection` and `navigation` are only read on the first render.
#[hook]
pub fn use_sessions_view(
    selection: WorkspaceSelection,
    navigation: NavigationContext,
) -> UseSessionsView {
    let view = use_mut_ref(move || SessionsView::activate(selection, navigation));
    let bridge = use_memo((), |_| {
        BrowserJolokiaClient::new(ApiClientConfig::new(utils::jolokia_url()))
    });
    let redraw = use_force_update();

    let dispatch = {
        let view = view.clone();
        Callback::from(move |action: GridAction| {
            let request = {
                let mut v = view.borrow_mut();
                match action {
                    GridAction::Initialize => v.initialize(),
                    GridAction::Refresh => v.refresh(),
                    GridAction::ApplyFilter(filter) => match (filter.field, filter.operation) {
                        (Some(field), Some(operation)) => {
                            v.apply_filter(field, operation, filter.value)
                        }
                        _ => None,
                    },
                    GridAction::ResetFilter => v.reset_filter(),
                    GridAction::ChangePage(page) => v.change_page(page),
                    GridAction::ChangePageInput(input) => v.change_page_input(&input),
                    GridAction::SelectPageSize(size) => v.select_page_size(size),
                    GridAction::Sort(sort) => v.set_sort(sort),
                    GridAction::DismissNotifications => {
                        v.take_notifications();
                        None
                    }
                }
            };
            spawn_fetch(view.clone(), bridge.clone(), request, redraw.clone());
        })
    };

    UseSessionsView { view, dispatch }
}
