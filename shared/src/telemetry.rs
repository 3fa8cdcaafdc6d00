//! Telemetry chart series derived from the future-year slider and the last
//! analysis result.

use crate::types::{AnalysisResult, FutureYear};
use serde::Serialize;
use strum_macros::{Display, EnumIter};

pub const BUCKETS: usize = 6;

const VEGETATION_BASE: [f64; BUCKETS] = [80.0, 75.0, 70.0, 65.0, 60.0, 55.0];
const EROSION_BASE: [f64; BUCKETS] = [20.0, 25.0, 30.0, 40.0, 55.0, 60.0];
const SHORELINE_BASE: [f64; BUCKETS] = [5.0, 10.0, 15.0, 25.0, 35.0, 45.0];

const VEGETATION_FLOOR: f64 = 20.0;
const EROSION_CEILING: f64 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumIter)]
pub enum SeriesKind {
    #[strum(serialize = "Vegetation Edge")]
    VegetationEdge,
    #[strum(serialize = "Coastal Erosion")]
    CoastalErosion,
    #[strum(serialize = "Water Shorelines")]
    WaterShoreline,
}

impl SeriesKind {
    pub fn color(self) -> &'static str {
        match self {
            SeriesKind::VegetationEdge => "#00ffcc",
            SeriesKind::CoastalErosion => "#ff0055",
            SeriesKind::WaterShoreline => "#00d2ff",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub kind: SeriesKind,
    pub values: [f64; BUCKETS],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: [String; BUCKETS],
    pub series: [Series; 3],
}

impl ChartSeries {
    pub fn get(&self, kind: SeriesKind) -> &Series {
        &self.series[kind as usize]
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Pure function of the slider and the live result; recomputed every render.
pub fn chart_series(future_year: FutureYear, analysis: Option<&AnalysisResult>) -> ChartSeries {
    let years = future_year.get();
    let influence = years as f64 / FutureYear::STEP as f64;

    let last_label = if years > 0 {
        format!("Year +{}", years)
    } else {
        "Year +50".to_string()
    };
    let labels = [
        "Year 0".to_string(),
        "Year 10".to_string(),
        "Year 20".to_string(),
        "Year 30".to_string(),
        "Year 40".to_string(),
        last_label,
    ];

    let mut vegetation = [0.0; BUCKETS];
    let mut erosion = [0.0; BUCKETS];
    let mut shoreline = [0.0; BUCKETS];
    for idx in 0..BUCKETS {
        let i = idx as f64;
        vegetation[idx] = round2(VEGETATION_BASE[idx] - influence * i).max(VEGETATION_FLOOR);
        erosion[idx] = round2(EROSION_BASE[idx] + influence * (i + 1.0)).min(EROSION_CEILING);
        shoreline[idx] = round2(SHORELINE_BASE[idx] + influence * i / 2.0);
    }

    if let Some(result) = analysis {
        vegetation[BUCKETS - 1] = result.metrics.vegetation_coverage;
        erosion[BUCKETS - 1] = result.metrics.erosion_risk_index;
    }

    ChartSeries {
        labels,
        series: [
            Series {
                kind: SeriesKind::VegetationEdge,
                values: vegetation,
            },
            Series {
                kind: SeriesKind::CoastalErosion,
                values: erosion,
            },
            Series {
                kind: SeriesKind::WaterShoreline,
                values: shoreline,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn zero_offset_returns_base_curves() {
        let chart = chart_series(FutureYear::new(0), None);

        assert_eq!(chart.labels[5], "Year +50");
        assert_eq!(chart.get(SeriesKind::VegetationEdge).values, VEGETATION_BASE);
        assert_eq!(
            chart.get(SeriesKind::CoastalErosion).values,
            EROSION_BASE
        );
        assert_eq!(chart.get(SeriesKind::WaterShoreline).values, SHORELINE_BASE);
    }

    #[test]
    fn offset_scales_every_series() {
        let chart = chart_series(FutureYear::new(20), None);

        assert_eq!(chart.labels[5], "Year +20");
        assert_eq!(
            chart.get(SeriesKind::VegetationEdge).values,
            [80.0, 71.0, 62.0, 53.0, 44.0, 35.0]
        );
        assert_eq!(
            chart.get(SeriesKind::CoastalErosion).values,
            [24.0, 33.0, 42.0, 56.0, 75.0, 84.0]
        );
        assert_eq!(
            chart.get(SeriesKind::WaterShoreline).values,
            [5.0, 12.0, 19.0, 31.0, 43.0, 55.0]
        );
    }

    #[test]
    fn vegetation_floor_and_erosion_ceiling_hold_at_max_offset() {
        let chart = chart_series(FutureYear::new(50), None);

        assert_eq!(chart.get(SeriesKind::VegetationEdge).values[5], 20.0);
        assert_eq!(chart.get(SeriesKind::CoastalErosion).values[5], 95.0);
        assert!(chart
            .get(SeriesKind::VegetationEdge)
            .values
            .iter()
            .all(|v| *v >= 20.0));
    }

    #[test]
    fn live_metrics_override_the_final_bucket() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "metrics": { "vegetation_coverage": 55.5, "erosion_risk_index": 40 },
            "mask_image": "x"
        }))
        .unwrap();
        let chart = chart_series(FutureYear::new(20), Some(&result));

        assert_eq!(chart.get(SeriesKind::VegetationEdge).values[5], 55.5);
        assert_eq!(chart.get(SeriesKind::CoastalErosion).values[5], 40.0);
        assert_eq!(chart.get(SeriesKind::WaterShoreline).values[5], 55.0);
        assert_eq!(chart.get(SeriesKind::VegetationEdge).values[4], 44.0);
    }

    #[test]
    fn series_are_indexed_in_declaration_order() {
        let chart = chart_series(FutureYear::default(), None);
        for kind in SeriesKind::iter() {
            assert_eq!(chart.get(kind).kind, kind);
        }
        assert_eq!(SeriesKind::WaterShoreline.to_string(), "Water Shorelines");
    }
}
