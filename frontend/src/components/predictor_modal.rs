use coastal_shared::PredictorResult;
use yew::prelude::*;

use super::utils::print_page;

#[derive(Properties, PartialEq)]
pub struct PredictorModalProps {
    pub result: PredictorResult,
    pub on_close: Callback<()>,
}

const BAR_WIDTH: f64 = 28.0;
const BAR_GAP: f64 = 12.0;
const CHART_HEIGHT: f64 = 220.0;

fn render_bar_chart(values: &[f64]) -> Html {
    let max = values.iter().cloned().fold(1.0_f64, f64::max);
    let width = values.len() as f64 * (BAR_WIDTH + BAR_GAP) + BAR_GAP;

    html! {
        <svg class="predictor-chart" viewBox={format!("0 0 {} {}", width, CHART_HEIGHT + 20.0)}>
            { for values.iter().enumerate().map(|(idx, value)| {
                let height = (value.max(0.0) / max) * CHART_HEIGHT;
                let x = BAR_GAP + idx as f64 * (BAR_WIDTH + BAR_GAP);
                html! {
                    <g>
                        <rect
                            class="bar"
                            x={x.to_string()}
                            y={(CHART_HEIGHT - height).to_string()}
                            width={BAR_WIDTH.to_string()}
                            height={height.to_string()}
                        />
                        <text class="axis-label" x={(x + BAR_WIDTH / 2.0).to_string()} y={(CHART_HEIGHT + 14.0).to_string()}>
                            { format!("P{}", idx + 1) }
                        </text>
                    </g>
                }
            })}
        </svg>
    }
}

#[function_component(PredictorModal)]
pub fn predictor_modal(props: &PredictorModalProps) -> Html {
    let close = props.on_close.reform(|_: MouseEvent| ());
    let result = &props.result;

    html! {
        <div class="modal-backdrop">
            <div class="modal predictor-modal">
                <button class="modal-close" onclick={close.clone()}>{"✖"}</button>
                <h2 class="modal-title">{"AI PREDICTOR RESULTS"}</h2>

                <section>
                    <h4>{"Graph Plot:"}</h4>
                    { render_bar_chart(&result.graph_data) }
                </section>

                <section>
                    <h4>{"Numerical Values:"}</h4>
                    <table class="report-table">
                        <thead>
                            <tr>
                                <th>{"Point"}</th>
                                <th>{"Lat"}</th>
                                <th>{"Lon"}</th>
                                <th>{"Data Value"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for result.rows().map(|(idx, point, value)| html! {
                                <tr>
                                    <td>{ (idx + 1).to_string() }</td>
                                    <td>{ format!("{:.4}", point.lat) }</td>
                                    <td>{ format!("{:.4}", point.lon) }</td>
                                    <td>{ value.map(|v| v.to_string()).unwrap_or_else(|| "-".into()) }</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                </section>

                <section>
                    <h4>{"Classification:"}</h4>
                    <p>{ result.summary.classification.clone() }</p>
                </section>

                <section>
                    <h4>{"GIS Picture:"}</h4>
                    <img class="gis-image" src={result.gis_image_src()} alt="GIS" />
                </section>

                <div class="modal-actions">
                    <button class="secondary" onclick={Callback::from(|_: MouseEvent| print_page())}>{"Print"}</button>
                    <button class="primary" onclick={close}>{"Close"}</button>
                </div>
            </div>
        </div>
    }
}
