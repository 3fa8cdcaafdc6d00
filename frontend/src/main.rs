mod api;
mod components;
mod map_bridge;

use api::{resolve_api_base_url, GatewayClient};
use coastal_shared::session::Point;
use coastal_shared::{
    AnalysisResult, BoundingBox, Outcome, PredictorResult, ReportResult, SessionState,
};
use components::control_panel::render_control_panel;
use components::guardian::render_guardian;
use components::handlers::*;
use components::header::render_header;
use components::predictor_modal::PredictorModal;
use components::report_modal::ReportModal;
use components::utils::viewport;
use gloo_events::EventListener;
use map_bridge::{MapHandle, MAP_CONTAINER_ID};
use wasm_bindgen::JsCast;
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // Map and target
    BoundsChanged(BoundingBox),
    SelectSite(String),
    SetFutureYear(i64),

    // Gateway operations
    Analyze,
    AnalysisDone(Outcome<AnalysisResult>),
    GenerateReport,
    ReportDone(Outcome<ReportResult>),
    RunPredictor,
    PredictorDone(Outcome<PredictorResult>),

    // UI states
    ToggleChart,
    ToggleOverlay,
    CloseReport,
    ClosePredictor,

    // Guardian widget
    ToggleGuardian,
    DeepScan,
    GuardianDragStart(Point),
    PointerMoved(Point),
    PointerReleased,
    Resized,
}

// Main component
pub struct Model {
    session: SessionState,
    gateway: GatewayClient,
    map: Option<MapHandle>,
    _listeners: Vec<EventListener>,
}

fn pointer_of(event: &Event) -> Option<Point> {
    event.dyn_ref::<MouseEvent>().map(|e| Point {
        x: e.client_x() as f64,
        y: e.client_y() as f64,
    })
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let base_url = resolve_api_base_url();
        log::info!("Gateway base URL: {}", base_url);

        let mut listeners = Vec::new();
        if let Some(window) = web_sys::window() {
            let link = ctx.link().clone();
            listeners.push(EventListener::new(&window, "mousemove", move |event| {
                if let Some(pointer) = pointer_of(event) {
                    link.send_message(Msg::PointerMoved(pointer));
                }
            }));
            let link = ctx.link().clone();
            listeners.push(EventListener::new(&window, "mouseup", move |_| {
                link.send_message(Msg::PointerReleased);
            }));
            let link = ctx.link().clone();
            listeners.push(EventListener::new(&window, "resize", move |_| {
                link.send_message(Msg::Resized);
            }));
        } else {
            log::error!("No global window; guardian drag disabled");
        }

        Self {
            session: SessionState::new(viewport()),
            gateway: GatewayClient::new(base_url),
            map: None,
            _listeners: listeners,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.map = Some(map_bridge::mount(ctx.link()));
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let rerender = match msg {
            // Map and target
            Msg::BoundsChanged(bbox) => handle_bounds_changed(self, bbox),
            Msg::SelectSite(name) => handle_select_site(self, &name),
            Msg::SetFutureYear(years) => {
                self.session.set_future_year(years);
                true
            }

            // Gateway operations
            Msg::Analyze => handle_analyze(self, ctx),
            Msg::AnalysisDone(outcome) => handle_analysis_done(self, outcome),
            Msg::GenerateReport => handle_generate_report(self, ctx),
            Msg::ReportDone(outcome) => handle_report_done(self, outcome),
            Msg::RunPredictor => handle_run_predictor(self, ctx),
            Msg::PredictorDone(outcome) => handle_predictor_done(self, outcome),

            // UI states
            Msg::ToggleChart => {
                self.session.toggle_chart();
                true
            }
            Msg::ToggleOverlay => {
                self.session.toggle_overlay();
                true
            }
            Msg::CloseReport => {
                self.session.close_report();
                true
            }
            Msg::ClosePredictor => {
                self.session.close_predictor();
                true
            }

            // Guardian widget
            Msg::ToggleGuardian => {
                self.session.toggle_guardian();
                true
            }
            Msg::DeepScan => handle_deep_scan(self),
            Msg::GuardianDragStart(pointer) => handle_guardian_drag_start(self, pointer),
            Msg::PointerMoved(pointer) => handle_pointer_moved(self, pointer),
            Msg::PointerReleased => handle_pointer_released(self),
            Msg::Resized => handle_resized(self),
        };

        flush_notice(self);
        rerender
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let session = &self.session;

        html! {
            <div class="app-shell">
                <div class="gradient-backdrop"></div>
                <div class="neon-noise"></div>

                { self.render_modals(ctx) }

                <div class="app-layout">
                    { render_header(session.guardian().visible, link) }
                    <main class="main-content">
                        { render_control_panel(session, link) }
                        <section class="map-shell">
                            <div class="map-card">
                                <div id={MAP_CONTAINER_ID} class="map"></div>
                                {
                                    if session.transect_sweep_active() {
                                        html! { <div class="transect-sweep"><div class="sweep"></div></div> }
                                    } else {
                                        html! {}
                                    }
                                }
                            </div>
                        </section>
                    </main>
                </div>

                { render_guardian(session, link) }
            </div>
        }
    }
}

// Rendering methods
impl Model {
    fn render_modals(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let location = self
            .session
            .target()
            .map(|site| AttrValue::from(site.name));

        html! {
            <>
                {
                    if let Some(report) = self.session.visible_report() {
                        html! {
                            <ReportModal
                                report={report.clone()}
                                location={location}
                                on_close={link.callback(|_| Msg::CloseReport)}
                            />
                        }
                    } else {
                        html! {}
                    }
                }
                {
                    if let Some(result) = self.session.visible_predictor() {
                        html! {
                            <PredictorModal
                                result={result.clone()}
                                on_close={link.callback(|_| Msg::ClosePredictor)}
                            />
                        }
                    } else {
                        html! {}
                    }
                }
            </>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
