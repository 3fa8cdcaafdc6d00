use coastal_shared::session::Point;
use coastal_shared::SessionState;
use yew::html::Scope;
use yew::prelude::*;

use crate::{Model, Msg};

pub fn render_guardian(session: &SessionState, link: &Scope<Model>) -> Html {
    let guardian = session.guardian();
    if !guardian.visible {
        return html! {};
    }

    let health = session.health_score();
    let on_drag_start = link.callback(|e: MouseEvent| {
        e.prevent_default();
        Msg::GuardianDragStart(Point {
            x: e.client_x() as f64,
            y: e.client_y() as f64,
        })
    });
    let on_scan = link.callback(|e: MouseEvent| {
        e.stop_propagation();
        Msg::DeepScan
    });

    html! {
        <div
            class={classes!("guardian", guardian.is_dragging().then_some("dragging"))}
            style={format!("left: {}px; top: {}px;", guardian.position.x, guardian.position.y)}
            onmousedown={on_drag_start}
        >
            <div class="guardian-head">
                <div>
                    <div class="guardian-kicker">{"SPECTRAL NODE"}</div>
                    <strong>{"Guardian Watch"}</strong>
                </div>
                <span class="guardian-pulse"></span>
            </div>
            <div class="guardian-meter">
                <div class="guardian-meter-label">{"Bio-Shield Integrity"}</div>
                <div class="meter">
                    <div class="meter-fill" style={format!("width: {}%", health)}></div>
                </div>
                <div class="guardian-meter-foot">
                    <span>{ format!("{}%", health) }</span>
                    <span>{"Stability"}</span>
                </div>
            </div>
            <div class="guardian-log">
                { guardian.log.clone().unwrap_or_else(|| "Awaiting deep scan command.".to_string()) }
            </div>
            <button
                class="guardian-scan"
                onmousedown={Callback::from(|e: MouseEvent| e.stop_propagation())}
                onclick={on_scan}
            >
                {"Deploy Deep Scan"}
            </button>
        </div>
    }
}
