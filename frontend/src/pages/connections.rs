//! Connections landing page
//!
//! Receives the connection picked from the sessions grid. The full
//! connections view lives elsewhere in the console; this page only shows
//! the handoff and offers the way back.

use crate::hooks::use_local_storage;
use crate::Route;
use shared::protocol::NAVIGATION_STORAGE_KEY;
use shared::NavigationContext;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(ConnectionsPage)]
pub fn connections_page() -> Html {
    let navigation = use_local_storage(NAVIGATION_STORAGE_KEY, NavigationContext::default);
    let navigator = use_navigator();

    let on_back = Callback::from(move |_: MouseEvent| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Sessions);
        }
    });

    html! {
        <div class="connections-container">
            <h1>{ "Connections" }</h1>
            {
                match &navigation.value.connection {
                    Some(id) => html! {
                        <p class="connections-selected">
                            { "Filtering on connection " }<code>{ id }</code>
                        </p>
                    },
                    None => html! { <p>{ "No connection selected." }</p> },
                }
            }
            <button onclick={on_back}>{ "Back to sessions" }</button>
        </div>
    }
}
