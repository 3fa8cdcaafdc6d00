use coastal_shared::telemetry::{ChartSeries, BUCKETS};
use yew::prelude::*;

const WIDTH: f64 = 300.0;
const HEIGHT: f64 = 160.0;
const PAD: f64 = 20.0;

fn x_at(idx: usize) -> f64 {
    PAD + idx as f64 * (WIDTH - 2.0 * PAD) / (BUCKETS - 1) as f64
}

// Values are percentages; anything outside 0..=100 is pinned to the frame.
fn y_at(value: f64) -> f64 {
    let clamped = value.clamp(0.0, 100.0);
    HEIGHT - PAD - clamped / 100.0 * (HEIGHT - 2.0 * PAD)
}

pub fn render_telemetry_chart(chart: &ChartSeries) -> Html {
    html! {
        <svg class="telemetry-chart" viewBox={format!("0 0 {} {}", WIDTH, HEIGHT)}>
            { for (0..=4).map(|step| {
                let y = y_at(step as f64 * 25.0);
                html! { <line class="grid" x1={PAD.to_string()} x2={(WIDTH - PAD).to_string()} y1={y.to_string()} y2={y.to_string()} /> }
            })}
            { for chart.series.iter().map(|series| {
                let points = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(idx, v)| format!("{:.1},{:.1}", x_at(idx), y_at(*v)))
                    .collect::<Vec<_>>()
                    .join(" ");
                html! {
                    <polyline
                        class="series"
                        fill="none"
                        stroke={series.kind.color()}
                        points={points}
                    >
                        <title>{ series.kind.to_string() }</title>
                    </polyline>
                }
            })}
            { for chart.labels.iter().enumerate().map(|(idx, label)| html! {
                <text class="axis-label" x={x_at(idx).to_string()} y={(HEIGHT - 4.0).to_string()}>{ label.clone() }</text>
            })}
        </svg>
    }
}
