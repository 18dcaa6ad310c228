use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::ImageHandle;
use tracing::debug;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ResultVm, load_image_data_url};

#[component]
pub fn ResultView() -> Element {
    let ctx = use_context::<AppContext>();
    let results = ctx.results();

    let resource = use_resource(move || {
        let results = results.clone();
        async move {
            let outcome = results.outcome().await.map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(outcome.as_ref().map(ResultVm::from))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        section { class: "result-page",
            div { class: "result-shell",
                match state {
                    ViewState::Idle => rsx! {
                        p { "Idle" }
                    },
                    ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "result-desc", "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    },
                    ViewState::Ready(None) => rsx! {
                        h1 { class: "result-title", "RESULT" }
                        p { class: "result-desc", "No answers yet." }
                        Link { class: "result-cta", to: Route::Question {}, "Start the questions" }
                    },
                    ViewState::Ready(Some(vm)) => rsx! {
                        ResultProfile { vm }
                    },
                }
            }
        }
    }
}

#[component]
fn ResultProfile(vm: ResultVm) -> Element {
    let ctx = use_context::<AppContext>();
    let apply = ctx.links().apply().to_string();
    let homepage = ctx.links().homepage().to_string();
    let open_apply = {
        let ctx = ctx.clone();
        move |_: MouseEvent| ctx.open_link(&apply)
    };
    let open_homepage = move |_: MouseEvent| ctx.open_link(&homepage);

    rsx! {
        div { class: "result-header",
            p { class: "result-eyebrow", "Your result is\u{2026}" }
            h1 { class: "result-title", "{vm.title}" }
            p { class: "result-score", "{vm.score_label()} answers matched" }
        }

        div { class: "result-profile",
            ProfileImage { handle: vm.image.clone(), alt: vm.image_alt() }
            div { class: "result-summary",
                if let Some(quote) = vm.quote.as_ref() {
                    p { class: "result-quote", "{quote}" }
                }
                for (index, line) in vm.lines.iter().enumerate() {
                    p { key: "{index}", class: "result-desc", "{line}" }
                }
            }
        }

        div { class: "result-footer",
            div { class: "result-footer__content",
                p { class: "result-similar", "You are a type similar to {vm.title}!" }
                p { class: "result-cta-title", "How about applying to PRIMITIVE?" }

                div { class: "result-actions",
                    button {
                        class: "result-cta",
                        r#type: "button",
                        onclick: open_apply,
                        "Apply to PRIMITIVE"
                    }
                    button {
                        class: "result-link",
                        r#type: "button",
                        onclick: open_homepage,
                        "Curious about PRIMITIVE?"
                    }
                }

                Link { class: "result-retake", to: Route::Question {}, "Take the test again" }
            }
        }
    }
}

/// Photo of the matched member, read once per mount. Missing or unreadable
/// images show the placeholder block.
#[component]
fn ProfileImage(handle: Option<ImageHandle>, alt: String) -> Element {
    let ctx = use_context::<AppContext>();
    let loader = ctx.image_loader();
    let src = use_signal(|| None::<String>);

    let mounted = use_hook(|| Arc::new(AtomicBool::new(true)));
    {
        let mounted = Arc::clone(&mounted);
        use_drop(move || mounted.store(false, Ordering::Release));
    }

    let has_handle = handle.is_some();
    use_future(move || {
        let loader = Arc::clone(&loader);
        let handle = handle.clone();
        let mounted = Arc::clone(&mounted);
        let mut src = src;
        async move {
            let Some(handle) = handle else {
                return;
            };
            let url = load_image_data_url(loader.as_ref(), &handle).await;
            if mounted.load(Ordering::Acquire) {
                src.set(url);
            } else {
                debug!(path = %handle.path().display(), "result view gone, image discarded");
            }
        }
    });

    let current = src.read().clone();
    let aria_hidden = if has_handle { "false" } else { "true" };

    rsx! {
        div { class: "result-image", aria_hidden: aria_hidden,
            if let Some(url) = current {
                img { src: "{url}", alt: "{alt}" }
            } else {
                div { class: "result-image__placeholder" }
            }
        }
    }
}
