use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let homepage = ctx.links().homepage().to_string();
    let apply = ctx.links().apply().to_string();
    let open_homepage = {
        let ctx = ctx.clone();
        move |_: MouseEvent| ctx.open_link(&homepage)
    };
    let open_apply = move |_: MouseEvent| ctx.open_link(&apply);

    rsx! {
        section { class: "hero",
            div { class: "hero__bg", aria_hidden: "true",
                span { class: "orb orb--left" }
                span { class: "orb orb--right" }
                span { class: "ring ring--left" }
            }

            div { class: "hero__content",
                div { class: "hero__text-group",
                    p { class: "hero__eyebrow", "What if I joined" }
                    h1 { class: "hero__title", "PRIMITIVE" }
                    p { class: "hero__subtitle", "?" }
                }

                p { class: "hero__desc",
                    "Take the test to find out which PRIMITIVE role suits you best!"
                }

                div { class: "hero__actions",
                    Link { class: "cta", id: "home-start", to: Route::Question {}, "START" }
                    div { class: "hero__links",
                        button {
                            class: "link-button",
                            r#type: "button",
                            onclick: open_homepage,
                            "What kind of club is PRIMITIVE?"
                        }
                        span { class: "divider", "|" }
                        button {
                            class: "link-button",
                            r#type: "button",
                            onclick: open_apply,
                            "Apply to PRIMITIVE"
                        }
                    }
                }
            }
        }
    }
}
