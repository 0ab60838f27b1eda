mod bridge;
mod hooks;
mod pages;
pub mod utils;

use pages::{connections::ConnectionsPage, sessions::SessionsPage};
use shared::NavTarget;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/artemis/sessions")]
    Sessions,
    #[at("/artemis/connections")]
    Connections,
}

impl From<NavTarget> for Route {
    fn from(target: NavTarget) -> Self {
        match target {
            NavTarget::Connections => Route::Connections,
        }
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home | Route::Sessions => html! { <SessionsPage /> },
        Route::Connections => html! { <ConnectionsPage /> },
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
