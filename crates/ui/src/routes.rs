use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable, use_navigator};
use tracing::debug;

use crate::views::{HomeView, QuestionView, ResultView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/question", QuestionView)] Question {},
        #[route("/result", ResultView)] Outcome {},
    #[end_layout]
    #[route("/:..segments", NotFound)] NotFound { segments: Vec<String> },
}

#[component]
fn Layout() -> Element {
    rsx! {
        main { class: "app",
            Outlet::<Route> {}
        }
    }
}

/// Unknown paths go back to the landing page.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let navigator = use_navigator();
    use_effect(move || {
        debug!(path = %segments.join("/"), "unknown route, redirecting home");
        let _ = navigator.replace(Route::Home {});
    });
    rsx! {}
}
