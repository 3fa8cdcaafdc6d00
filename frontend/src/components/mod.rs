pub mod control_panel;
pub mod guardian;
pub mod handlers;
pub mod header;
pub mod predictor_modal;
pub mod report_modal;
pub mod telemetry_chart;
pub mod utils;
