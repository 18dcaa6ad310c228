use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_history::{History, MemoryHistory};
use dioxus_router::{Routable, Router};
use quiz_core::catalog::{DescriptionRegistry, ImageRegistry, QuestionCatalog, ReferencePanel};
use quiz_core::links::{DEFAULT_APPLY_URL, DEFAULT_HOMEPAGE_URL, ExternalLinks};
use quiz_core::model::{Choice, Description, ImageHandle, Member, Question, QuestionId, StudentId};
use services::{
    AppServices, ImageLoadError, ImageLoader, QuizCatalogs, QuizFlowService, ResultService,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::routes::Route;
use crate::views::question::QuestionTestHandles;
use crate::views::{HomeView, QuestionView, ResultView};

/// Serves fixed bytes for any handle, or fails when `bytes` is `None`.
pub struct StaticImageLoader {
    pub bytes: Option<Vec<u8>>,
}

#[async_trait::async_trait]
impl ImageLoader for StaticImageLoader {
    async fn load(&self, handle: &ImageHandle) -> Result<Vec<u8>, ImageLoadError> {
        self.bytes
            .clone()
            .ok_or_else(|| ImageLoadError::Empty(handle.path().to_path_buf()))
    }
}

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn quiz_flow(&self) -> Arc<QuizFlowService> {
        self.services.quiz_flow()
    }

    fn results(&self) -> Arc<ResultService> {
        self.services.results()
    }

    fn image_loader(&self) -> Arc<dyn ImageLoader> {
        self.services.image_loader()
    }

    fn links(&self) -> ExternalLinks {
        ExternalLinks::new(DEFAULT_HOMEPAGE_URL, DEFAULT_APPLY_URL).unwrap()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Question,
    Result,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    question_handles: QuestionTestHandles,
    view_switch: ViewSwitch,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let view = use_context_provider(|| Signal::new(props.view));
    use_context_provider(|| props.question_handles.clone());
    use_hook(|| props.view_switch.register(view));
    rsx! { Router::<TestRoute> {} }
}

/// Lets a test swap the mounted view, unmounting the previous one.
#[derive(Clone, Default)]
pub struct ViewSwitch {
    view: Rc<RefCell<Option<Signal<ViewKind>>>>,
}

impl ViewSwitch {
    fn register(&self, view: Signal<ViewKind>) {
        *self.view.borrow_mut() = Some(view);
    }

    fn signal(&self) -> Signal<ViewKind> {
        (*self.view.borrow()).expect("view signal registered")
    }
}

#[derive(Props, Clone)]
struct AppRouterProps {
    app: Arc<TestApp>,
    path: String,
}

impl PartialEq for AppRouterProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn AppRouterHarness(props: AppRouterProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| {
        Rc::new(MemoryHistory::with_initial_path(props.path.clone())) as Rc<dyn History>
    });
    rsx! { Router::<Route> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<Signal<ViewKind>>();
    match view() {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Question => rsx! { QuestionView {} },
        ViewKind::Result => rsx! { ResultView {} },
    }
}

/// Static data and photo behaviour a harness is built from.
pub struct HarnessSetup {
    pub catalogs: QuizCatalogs,
    pub images: ImageRegistry,
    pub image_bytes: Option<Vec<u8>>,
    /// Replaces the static loader built from `image_bytes`.
    pub image_loader: Option<Arc<dyn ImageLoader>>,
}

impl Default for HarnessSetup {
    fn default() -> Self {
        Self {
            catalogs: sample_catalogs(),
            images: ImageRegistry::default(),
            image_bytes: None,
            image_loader: None,
        }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub question_handles: QuestionTestHandles,
    pub view_switch: ViewSwitch,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let pending resources and futures finish.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn answer(&mut self, choice: usize) {
        let answer = self.question_handles.answer();
        self.dom.in_runtime(|| answer.call(choice));
        drive_dom(&mut self.dom);
    }

    /// Fire several clicks within one turn of the event loop.
    pub fn answer_burst(&mut self, choices: &[usize]) {
        let answer = self.question_handles.answer();
        self.dom.in_runtime(|| {
            for &choice in choices {
                answer.call(choice);
            }
        });
        drive_dom(&mut self.dom);
    }

    pub fn switch_to(&mut self, view: ViewKind) {
        let mut signal = self.view_switch.signal();
        self.dom.in_runtime(|| signal.set(view));
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Three two-choice questions and two members, "A" matching `[1, 0, 1]`.
pub fn sample_catalogs() -> QuizCatalogs {
    let questions = (1..=3)
        .map(|id| {
            Question::new(
                QuestionId::new(id),
                format!("Question number {id}"),
                vec![Choice::new("Left"), Choice::new("Right")],
            )
            .unwrap()
        })
        .collect();
    QuizCatalogs {
        questions: QuestionCatalog::new(questions).unwrap(),
        members: ReferencePanel::new(vec![
            Member::new("B", StudentId::new("2002"), vec![1, 1, 2]).unwrap(),
            Member::new("*김 철수", StudentId::new("2001"), vec![2, 1, 2]).unwrap(),
        ]),
        descriptions: DescriptionRegistry::new(vec![Description::new(
            "Backend Lead [김철수]",
            "\"Ship small, ship often\"\n\nKeeps the build green.",
        )]),
    }
}

pub fn setup_view_harness(view: ViewKind, storage: Storage) -> ViewHarness {
    setup_view_harness_with(view, storage, HarnessSetup::default())
}

pub fn setup_view_harness_with(view: ViewKind, storage: Storage, setup: HarnessSetup) -> ViewHarness {
    let loader = setup.image_loader.unwrap_or_else(|| {
        Arc::new(StaticImageLoader {
            bytes: setup.image_bytes,
        })
    });
    let services = AppServices::from_storage(&storage, setup.catalogs, setup.images)
        .with_image_loader(loader);
    let question_handles = QuestionTestHandles::default();
    let view_switch = ViewSwitch::default();

    let app = Arc::new(TestApp { services });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            question_handles: question_handles.clone(),
            view_switch: view_switch.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        question_handles,
        view_switch,
    }
}

/// Mount the real router at `path`, as the desktop app does.
pub fn setup_router_harness(path: &str, storage: Storage) -> ViewHarness {
    let services = AppServices::from_storage(&storage, sample_catalogs(), ImageRegistry::default());
    let dom = VirtualDom::new_with_props(
        AppRouterHarness,
        AppRouterProps {
            app: Arc::new(TestApp { services }),
            path: path.to_string(),
        },
    );

    ViewHarness {
        dom,
        storage,
        question_handles: QuestionTestHandles::default(),
        view_switch: ViewSwitch::default(),
    }
}
