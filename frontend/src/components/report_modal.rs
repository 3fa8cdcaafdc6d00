use coastal_shared::{ReportResult, ReportStatus};
use yew::prelude::*;

use super::utils::print_page;

#[derive(Properties, PartialEq)]
pub struct ReportModalProps {
    pub report: ReportResult,
    pub location: Option<AttrValue>,
    pub on_close: Callback<()>,
}

fn status_class(status: &ReportStatus) -> &'static str {
    match status {
        ReportStatus::Critical => "status-critical",
        ReportStatus::Warning => "status-warning",
        _ => "status-normal",
    }
}

#[function_component(ReportModal)]
pub fn report_modal(props: &ReportModalProps) -> Html {
    let close = props.on_close.reform(|_: MouseEvent| ());
    let location = props
        .location
        .clone()
        .unwrap_or_else(|| AttrValue::from("Unknown Region"));

    html! {
        <div class="modal-backdrop">
            <div class="modal report-modal">
                <button class="modal-close" onclick={close.clone()}>{"✖"}</button>
                <h2 class="modal-title">{"STRATEGIC COASTAL REPORT"}</h2>
                <h4>{ format!("Target Zone: {}", location) }</h4>
                <div class="recommendation">
                    <strong>{"AI STRATEGY:"}</strong><br/>
                    <span>{ props.report.ai_recommendation.clone() }</span>
                </div>
                <table class="report-table">
                    <thead>
                        <tr>
                            <th>{"Timeline"}</th>
                            <th>{"Vegetation (%)"}</th>
                            <th>{"Erosion Index"}</th>
                            <th>{"Recovery Potential"}</th>
                            <th>{"Status"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for props.report.timeline_data.iter().map(|row| html! {
                            <tr>
                                <td class="timeline-year">{ row.year.clone() }</td>
                                <td class={if row.vegetation < 50.0 { "veg-low" } else { "veg-ok" }}>
                                    { format!("{}%", row.vegetation) }
                                </td>
                                <td>{ row.erosion_risk.to_string() }</td>
                                <td class="restoration">{ row.restoration_potential.to_string() }</td>
                                <td class={status_class(&row.status)}>{ row.status.to_string() }</td>
                            </tr>
                        })}
                    </tbody>
                </table>
                <div class="modal-actions">
                    <button class="secondary" onclick={Callback::from(|_: MouseEvent| print_page())}>{"Print PDF"}</button>
                    <button class="primary" onclick={close}>{"Close Report"}</button>
                </div>
            </div>
        </div>
    }
}
