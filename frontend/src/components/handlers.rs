use coastal_shared::session::Point;
use coastal_shared::sites::find_site;
use coastal_shared::{AnalysisResult, BoundingBox, Outcome, PredictorResult, ReportResult};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::super::{Model, Msg};
use super::utils::viewport;
use crate::map_bridge;

pub fn handle_bounds_changed(model: &mut Model, bbox: BoundingBox) -> bool {
    model.session.set_bounds(bbox);
    sync_mask_overlay(model);
    false
}

pub fn handle_select_site(model: &mut Model, name: &str) -> bool {
    let Some(site) = find_site(name) else {
        log::warn!("Unknown coastal site: {}", name);
        return false;
    };
    let target = model.session.select_location(*site);
    map_bridge::fly_to(&target);
    sync_mask_overlay(model);
    true
}

pub fn handle_analyze(model: &mut Model, ctx: &Context<Model>) -> bool {
    // No viewport yet: nothing to analyse, and nothing to tell the user.
    let Some(request) = model.session.request_analysis() else {
        return false;
    };

    let gateway = model.gateway.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let outcome = gateway.submit_analysis(&request).await;
        if let Err(e) = &outcome {
            gloo_console::error!(format!("Coastal analysis failed: {}", e));
        }
        link.send_message(Msg::AnalysisDone(outcome));
    });
    true
}

pub fn handle_analysis_done(model: &mut Model, outcome: Outcome<AnalysisResult>) -> bool {
    model.session.complete_analysis(outcome);
    sync_mask_overlay(model);
    true
}

pub fn handle_generate_report(model: &mut Model, ctx: &Context<Model>) -> bool {
    let body = model.session.request_report();
    let gateway = model.gateway.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let outcome = gateway.generate_report(&body).await;
        if let Err(e) = &outcome {
            gloo_console::error!(format!("Report generation failed: {}", e));
        }
        link.send_message(Msg::ReportDone(outcome));
    });
    true
}

pub fn handle_report_done(model: &mut Model, outcome: Outcome<ReportResult>) -> bool {
    model.session.complete_report(outcome);
    true
}

pub fn handle_run_predictor(model: &mut Model, ctx: &Context<Model>) -> bool {
    let body = model.session.request_predictor();
    let gateway = model.gateway.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let outcome = gateway.run_predictor(&body).await;
        if let Err(e) = &outcome {
            gloo_console::error!(format!("AI predictor failed: {}", e));
        }
        link.send_message(Msg::PredictorDone(outcome));
    });
    true
}

pub fn handle_predictor_done(model: &mut Model, outcome: Outcome<PredictorResult>) -> bool {
    model.session.complete_predictor(outcome);
    true
}

pub fn handle_guardian_drag_start(model: &mut Model, pointer: Point) -> bool {
    model.session.guardian_mut().start_drag(pointer);
    true
}

pub fn handle_pointer_moved(model: &mut Model, pointer: Point) -> bool {
    model.session.guardian_mut().drag_to(pointer, viewport())
}

pub fn handle_pointer_released(model: &mut Model) -> bool {
    model.session.guardian_mut().end_drag()
}

pub fn handle_resized(model: &mut Model) -> bool {
    model.session.guardian_mut().fit_viewport(viewport());
    true
}

pub fn handle_deep_scan(model: &mut Model) -> bool {
    model.session.deep_scan(js_sys::Math::random());
    true
}

/// Mirrors the analysis mask onto the Leaflet map.
pub fn sync_mask_overlay(model: &Model) {
    if model.map.is_none() {
        return;
    }
    match model.session.mask_overlay() {
        Some((url, bbox)) => map_bridge::show_mask(url, bbox),
        None => map_bridge::clear_mask(),
    }
}

/// Shows any pending notice as a blocking alert.
pub fn flush_notice(model: &mut Model) {
    if let Some(notice) = model.session.take_notice() {
        super::utils::alert(&notice);
    }
}
