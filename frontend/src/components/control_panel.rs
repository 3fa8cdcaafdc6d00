use coastal_shared::sites::COASTAL_SITES;
use coastal_shared::types::FutureYear;
use coastal_shared::SessionState;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use super::telemetry_chart::render_telemetry_chart;
use crate::{Model, Msg};

pub fn render_control_panel(session: &SessionState, link: &Scope<Model>) -> Html {
    let loading = session.is_loading();

    let on_site_change = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SelectSite(select.value())
    });

    let on_year_input = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetFutureYear(input.value().parse().unwrap_or(0))
    });

    let selected = session.target().map(|site| site.name).unwrap_or_default();

    html! {
        <aside class="glass-panel control-panel">
            <label class="panel-label" for="site-select">{"Target Zone"}</label>
            <select id="site-select" class="site-select" onchange={on_site_change}>
                <option value="" disabled=true selected={selected.is_empty()}>{"Select a coastline"}</option>
                { for COASTAL_SITES.iter().map(|site| html! {
                    <option value={site.name} selected={site.name == selected}>{ site.name }</option>
                })}
            </select>

            <div class="year-slider">
                <div class="year-slider-header">
                    <span>{"Prediction Horizon"}</span>
                    <span class="year-value">{ format!("{} yrs", session.future_year()) }</span>
                </div>
                <input
                    type="range"
                    min="0"
                    max={FutureYear::MAX.to_string()}
                    step={FutureYear::STEP.to_string()}
                    value={session.future_year().get().to_string()}
                    oninput={on_year_input}
                />
            </div>

            <button
                class="glass-button analyze"
                disabled={loading}
                onclick={link.callback(|_| Msg::Analyze)}
            >
                { if loading { "Processing..." } else { "Run Twin Simulation" } }
            </button>

            <button
                class="glass-button report"
                disabled={loading}
                onclick={link.callback(|_| Msg::GenerateReport)}
            >
                {"Generate Strategic Report"}
            </button>

            <button
                class="ai-button"
                disabled={loading}
                onclick={link.callback(|_| Msg::RunPredictor)}
            >
                <span class="ai-button-icon">{"AI"}</span>
                <span>{"Run AI Predictor"}</span>
                <span class="ai-button-arrow"></span>
            </button>

            <button
                class={classes!("glass-button", "graph-toggle", session.chart_visible().then_some("active"))}
                onclick={link.callback(|_| Msg::ToggleChart)}
            >
                { if session.chart_visible() { "Hide Graph Output" } else { "Show Real Time Graph" } }
            </button>

            <label class="overlay-toggle">
                <input
                    type="checkbox"
                    checked={session.overlay_enabled()}
                    onchange={link.callback(|_| Msg::ToggleOverlay)}
                />
                {" Transect sweep"}
            </label>

            { render_live_chart(session) }
        </aside>
    }
}

fn render_live_chart(session: &SessionState) -> Html {
    let (Some(chart), Some(result)) = (session.visible_chart(), session.analysis()) else {
        return html! {};
    };

    html! {
        <div class="telemetry-panel">
            <div class="telemetry-header">
                <span>{ format!("Veg: {}%", result.metrics.vegetation_coverage) }</span>
                <span>{ format!("Risk: {}", result.metrics.erosion_risk_index) }</span>
            </div>
            { render_telemetry_chart(&chart) }
        </div>
    }
}
