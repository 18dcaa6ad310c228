use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuestionCardVm, QuestionOutcome, QuizVm, start_quiz};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuestionView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_flow = ctx.quiz_flow();

    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<QuizVm>);
    let pending = use_signal(|| false);

    let quiz_flow_for_resource = quiz_flow.clone();
    let resource = use_resource(move || {
        let quiz_flow = quiz_flow_for_resource.clone();
        let mut error = error;
        let mut vm = vm;

        async move {
            let started = start_quiz(&quiz_flow).await?;
            vm.set(Some(started));
            error.set(None);
            Ok::<_, ViewError>(())
        }
    });

    let state = view_state_from_resource(&resource);

    let on_answer = {
        let quiz_flow = quiz_flow.clone();
        use_callback(move |choice: usize| {
            // One write per interaction; clicks during a write are dropped.
            if pending() {
                return;
            }
            let quiz_flow = quiz_flow.clone();
            let mut error = error;
            let mut vm = vm;
            let mut pending = pending;

            let current = vm.read().clone();
            let Some(mut local_vm) = current else {
                error.set(Some(ViewError::Unknown));
                return;
            };
            pending.set(true);

            spawn(async move {
                let result = local_vm.answer(&quiz_flow, choice).await;
                if result.is_ok() {
                    vm.set(Some(local_vm));
                }
                pending.set(false);

                match result {
                    Ok(QuestionOutcome::Continue) => error.set(None),
                    Ok(QuestionOutcome::Finished) => {
                        error.set(None);
                        let _ = navigator.push(Route::Outcome {});
                    }
                    Err(err) => error.set(Some(err)),
                }
            });
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuestionTestHandles>() {
                handles.register(on_answer);
            }
        }
    }

    let retry = use_callback(move |()| {
        let mut resource = resource;
        resource.restart();
    });

    let card = vm
        .read()
        .as_ref()
        .and_then(|vm| vm.card(&quiz_flow));
    let disabled = pending();

    rsx! {
        section { class: "question-page",
            div { class: "question-shell",
                match state {
                    ViewState::Idle => rsx! {
                        p { "Idle" }
                    },
                    ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(ViewError::EmptyQuiz) => rsx! {
                        h1 { class: "question-title", "QUESTION" }
                        p { class: "question-desc", {ViewError::EmptyQuiz.message()} }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "question-desc", "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| retry.call(()),
                            "Retry"
                        }
                    },
                    ViewState::Ready(()) => rsx! {
                        if let Some(err) = *error.read() {
                            p { class: "question-error", role: "alert", "{err.message()}" }
                        }
                        if let Some(card) = card {
                            QuestionCard { card, disabled, on_answer }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn QuestionCard(card: QuestionCardVm, disabled: bool, on_answer: Callback<usize>) -> Element {
    rsx! {
        div {
            class: "question-progress",
            aria_hidden: "true",
            title: "{card.number} / {card.total}",
            span {
                class: "question-progress__bar",
                style: "width: {card.progress_percent}%",
            }
        }

        div { class: "question-card",
            span { class: "question-quote", aria_hidden: "true", "\u{201c}" }
            p { class: "question-text", "{card.prompt}" }
            span { class: "question-quote", aria_hidden: "true", "\u{201d}" }
        }

        div { class: "answer-list",
            for (index, label) in card.choices.iter().enumerate() {
                button {
                    key: "{card.id}-{index}",
                    class: "answer-button",
                    r#type: "button",
                    disabled: disabled,
                    onclick: move |_| on_answer.call(index),
                    "{label}"
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuestionTestHandles {
    answer: Rc<RefCell<Option<Callback<usize>>>>,
}

#[cfg(test)]
impl QuestionTestHandles {
    pub(crate) fn register(&self, answer: Callback<usize>) {
        *self.answer.borrow_mut() = Some(answer);
    }

    pub(crate) fn answer(&self) -> Callback<usize> {
        (*self.answer.borrow()).expect("question answer callback registered")
    }
}
