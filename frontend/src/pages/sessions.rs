//! Sessions page
//!
//! Paginated grid of broker sessions. Paging, sorting and filtering all
//! happen on the broker; the page only renders the current slice.

use crate::hooks::{use_local_storage, use_sessions_view, GridAction};
use crate::Route;
use shared::protocol::{
    BROKER_NAME_STORAGE_KEY, DEFAULT_BROKER_NAME, DEFAULT_JMX_DOMAIN, JMX_DOMAIN_STORAGE_KEY,
    NAVIGATION_STORAGE_KEY,
};
use shared::{
    Filter, FilterField, FilterOperation, NavigationContext, PageSize, RowAction, SessionRow,
    SortColumn, SortDirection, SortState, ViewError, WorkspaceSelection, COLUMNS,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

// ============================================================================
// Filter Bar
// ============================================================================

#[derive(Properties, PartialEq)]
struct FilterBarProps {
    current: Filter,
    on_apply: Callback<Filter>,
    on_reset: Callback<()>,
    on_refresh: Callback<()>,
}

#[function_component(FilterBar)]
fn filter_bar(props: &FilterBarProps) -> Html {
    let draft = use_state(|| props.current.clone());

    let on_field = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.field = select.value().parse().ok();
            draft.set(next);
        })
    };

    let on_operation = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.operation = select.value().parse().ok();
            draft.set(next);
        })
    };

    let on_value = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.value = input.value();
            draft.set(next);
        })
    };

    let on_apply = {
        let draft = draft.clone();
        let callback = props.on_apply.clone();
        Callback::from(move |_: MouseEvent| callback.emit((*draft).clone()))
    };

    let on_reset = {
        let draft = draft.clone();
        let callback = props.on_reset.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(Filter::default());
            callback.emit(());
        })
    };

    let on_refresh = {
        let callback = props.on_refresh.clone();
        Callback::from(move |_: MouseEvent| callback.emit(()))
    };

    let can_apply = draft.field.is_some() && draft.operation.is_some();

    html! {
        <div class="sessions-filter">
            <select onchange={on_field}>
                <option value="" selected={draft.field.is_none()}>{ "Filter..." }</option>
                {
                    FilterField::ALL.iter().map(|field| html! {
                        <option value={field.as_str()} selected={draft.field == Some(*field)}>
                            { field.label() }
                        </option>
                    }).collect::<Html>()
                }
            </select>
            <select onchange={on_operation}>
                <option value="" selected={draft.operation.is_none()}>{ "Operation..." }</option>
                {
                    FilterOperation::ALL.iter().map(|op| html! {
                        <option value={op.as_str()} selected={draft.operation == Some(*op)}>
                            { op.label() }
                        </option>
                    }).collect::<Html>()
                }
            </select>
            <input
                type="text"
                placeholder="Value"
                value={draft.value.clone()}
                oninput={on_value}
            />
            <button onclick={on_apply} disabled={!can_apply}>{ "Search" }</button>
            <button onclick={on_reset}>{ "Reset" }</button>
            <button onclick={on_refresh} title="Reload and return to page 1">{ "Refresh" }</button>
        </div>
    }
}

// ============================================================================
// Session Row Component
// ============================================================================

#[derive(Properties, PartialEq)]
struct SessionRowProps {
    index: usize,
    session: SessionRow,
    on_action: Callback<(RowAction, usize)>,
}

#[function_component(SessionRowView)]
fn session_row(props: &SessionRowProps) -> Html {
    html! {
        <tr>
            {
                COLUMNS.iter().map(|column| {
                    let text = props.session.cell(column);
                    match column.action {
                        Some(action) => {
                            let callback = props.on_action.clone();
                            let index = props.index;
                            let onclick = Callback::from(move |e: MouseEvent| {
                                e.prevent_default();
                                callback.emit((action, index));
                            });
                            html! { <td><a href="#" {onclick}>{ text }</a></td> }
                        }
                        None => html! { <td>{ text }</td> },
                    }
                }).collect::<Html>()
            }
        </tr>
    }
}

// ============================================================================
// Broker Picker
// ============================================================================

#[derive(Properties, PartialEq)]
struct BrokerPickerProps {
    domain: String,
    broker: String,
    on_change: Callback<(String, String)>,
}

#[function_component(BrokerPicker)]
fn broker_picker(props: &BrokerPickerProps) -> Html {
    let domain_ref = use_node_ref();
    let broker_ref = use_node_ref();

    let onsubmit = {
        let domain_ref = domain_ref.clone();
        let broker_ref = broker_ref.clone();
        let callback = props.on_change.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let domain = domain_ref.cast::<HtmlInputElement>().map(|i| i.value());
            let broker = broker_ref.cast::<HtmlInputElement>().map(|i| i.value());
            if let (Some(domain), Some(broker)) = (domain, broker) {
                callback.emit((domain.trim().to_string(), broker.trim().to_string()));
            }
        })
    };

    html! {
        <form class="broker-picker" {onsubmit}>
            <label>{ "Domain" }
                <input ref={domain_ref} type="text" value={props.domain.clone()} />
            </label>
            <label>{ "Broker" }
                <input ref={broker_ref} type="text" value={props.broker.clone()} />
            </label>
            <button type="submit">{ "Use broker" }</button>
        </form>
    }
}

// ============================================================================
// Sessions Grid
// ============================================================================

#[derive(Properties, PartialEq)]
struct SessionsGridProps {
    selection: WorkspaceSelection,
}

#[function_component(SessionsGrid)]
fn sessions_grid(props: &SessionsGridProps) -> Html {
    let navigation = use_local_storage(NAVIGATION_STORAGE_KEY, NavigationContext::default);
    let sessions = use_sessions_view(props.selection.clone(), navigation.value.clone());
    let action_error = use_state(|| None::<String>);
    let navigator = use_navigator();

    // Activation: hand the cleared context back and load the first page
    {
        let view = sessions.view.clone();
        let dispatch = sessions.dispatch.clone();
        let save_navigation = navigation.set.clone();
        use_effect_with((), move |_| {
            let cleared = view.borrow().navigation().clone();
            save_navigation.emit(cleared);
            dispatch.emit(GridAction::Initialize);
            || ()
        });
    }

    let on_apply = {
        let dispatch = sessions.dispatch.clone();
        Callback::from(move |filter: Filter| dispatch.emit(GridAction::ApplyFilter(filter)))
    };
    let on_reset = {
        let dispatch = sessions.dispatch.clone();
        Callback::from(move |_: ()| dispatch.emit(GridAction::ResetFilter))
    };
    let on_refresh = {
        let dispatch = sessions.dispatch.clone();
        Callback::from(move |_: ()| dispatch.emit(GridAction::Refresh))
    };

    let on_row_action = {
        let view = sessions.view.clone();
        let save_navigation = navigation.set.clone();
        let action_error = action_error.clone();
        Callback::from(move |(action, index): (RowAction, usize)| {
            let result = view.borrow_mut().on_row_action(action, index);
            match result {
                Ok(nav) => {
                    log::info!("selected connection {:?}", nav.context.connection);
                    save_navigation.emit(nav.context);
                    if let Some(navigator) = &navigator {
                        navigator.push(&Route::from(nav.target));
                    }
                }
                Err(e @ ViewError::Unsupported(_)) => action_error.set(Some(e.to_string())),
                Err(e) => log::warn!("row action failed: {}", e),
            }
        })
    };

    let on_dismiss = {
        let dispatch = sessions.dispatch.clone();
        let action_error = action_error.clone();
        Callback::from(move |_: MouseEvent| {
            action_error.set(None);
            dispatch.emit(GridAction::DismissNotifications);
        })
    };

    // Snapshot the view so no borrow outlives the render
    let (rows, total, filter, paging, sort, page_count, fetching, mut messages) = {
        let view = sessions.view.borrow();
        (
            view.rows().to_vec(),
            view.total(),
            view.filter().clone(),
            view.paging(),
            view.sort(),
            view.page_count(),
            view.is_fetching(),
            view.notifications()
                .iter()
                .map(|n| n.message.clone())
                .collect::<Vec<_>>(),
        )
    };
    if let Some(err) = &*action_error {
        messages.push(err.clone());
    }

    let on_sort = |column: SortColumn| {
        let dispatch = sessions.dispatch.clone();
        Callback::from(move |_: MouseEvent| {
            let direction = if sort.column == column {
                sort.direction.reversed()
            } else {
                SortDirection::Asc
            };
            dispatch.emit(GridAction::Sort(SortState::new(column, direction)));
        })
    };

    let on_page_size = {
        let dispatch = sessions.dispatch.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(Ok(size)) = select.value().parse::<u32>().map(PageSize::try_from) {
                dispatch.emit(GridAction::SelectPageSize(size));
            }
        })
    };

    let go_to_page = |page: u32| {
        let dispatch = sessions.dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.emit(GridAction::ChangePage(page)))
    };

    let on_page_input = {
        let dispatch = sessions.dispatch.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                let input: HtmlInputElement = e.target_unchecked_into();
                dispatch.emit(GridAction::ChangePageInput(input.value()));
            }
        })
    };

    html! {
        <>
            {
                if messages.is_empty() {
                    html! {}
                } else {
                    html! {
                        <div class="sessions-error">
                            { messages.iter().map(|m| html! { <p>{ m }</p> }).collect::<Html>() }
                            <button class="dismiss" onclick={on_dismiss}>{ "Dismiss" }</button>
                        </div>
                    }
                }
            }

            <FilterBar current={filter} {on_apply} {on_reset} {on_refresh} />

            <table class={classes!("sessions-table", fetching.then_some("loading"))}>
                <thead>
                    <tr>
                        {
                            COLUMNS.iter().map(|column| {
                                let marker = match (sort.column == column.sort, sort.direction) {
                                    (true, SortDirection::Asc) => " ▲",
                                    (true, SortDirection::Desc) => " ▼",
                                    (false, _) => "",
                                };
                                html! {
                                    <th onclick={on_sort(column.sort)}>
                                        { column.display_name }{ marker }
                                    </th>
                                }
                            }).collect::<Html>()
                        }
                    </tr>
                </thead>
                <tbody>
                    {
                        rows.into_iter().enumerate().map(|(index, session)| {
                            let key = session.id.clone();
                            html! {
                                <SessionRowView
                                    key={key}
                                    {index}
                                    {session}
                                    on_action={on_row_action.clone()}
                                />
                            }
                        }).collect::<Html>()
                    }
                </tbody>
            </table>

            <footer class="sessions-footer">
                <span>{ format!("Total: {}", total) }</span>
                <select onchange={on_page_size}>
                    {
                        PageSize::ALL.iter().map(|size| html! {
                            <option value={size.to_string()} selected={paging.page_size == *size}>
                                { size.to_string() }
                            </option>
                        }).collect::<Html>()
                    }
                </select>
                <button
                    onclick={go_to_page(paging.current_page.saturating_sub(1))}
                    disabled={paging.current_page <= 1}
                >
                    { "<" }
                </button>
                <input
                    class="page-input"
                    type="text"
                    value={paging.current_page.to_string()}
                    onkeyup={on_page_input}
                />
                <span>{ format!("of {}", page_count) }</span>
                <button
                    onclick={go_to_page(paging.current_page + 1)}
                    disabled={paging.current_page >= page_count}
                >
                    { ">" }
                </button>
            </footer>
        </>
    }
}

// ============================================================================
// Main Sessions Page Component
// ============================================================================

#[function_component(SessionsPage)]
pub fn sessions_page() -> Html {
    let domain = use_local_storage(JMX_DOMAIN_STORAGE_KEY, || DEFAULT_JMX_DOMAIN.to_string());
    let broker = use_local_storage(BROKER_NAME_STORAGE_KEY, || DEFAULT_BROKER_NAME.to_string());

    let on_broker_change = {
        let set_domain = domain.set.clone();
        let set_broker = broker.set.clone();
        Callback::from(move |(domain, broker): (String, String)| {
            set_domain.emit(domain);
            set_broker.emit(broker);
        })
    };

    let selection = WorkspaceSelection::for_broker(domain.value.clone(), broker.value.clone());
    // A new broker remounts the grid with fresh state
    let grid_key = format!("{}/{}", domain.value, broker.value);

    html! {
        <div class="sessions-container">
            <header class="sessions-header">
                <h1>{ "Sessions" }</h1>
                <BrokerPicker
                    domain={domain.value.clone()}
                    broker={broker.value.clone()}
                    on_change={on_broker_change}
                />
            </header>
            <SessionsGrid key={grid_key} {selection} />
        </div>
    }
}
