use coastal_shared::session::Viewport;

const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 750.0,
};

pub fn viewport() -> Viewport {
    let Some(window) = web_sys::window() else {
        return FALLBACK_VIEWPORT;
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64());
    let height = window.inner_height().ok().and_then(|v| v.as_f64());
    match (width, height) {
        (Some(width), Some(height)) => Viewport { width, height },
        _ => FALLBACK_VIEWPORT,
    }
}

/// Blocking user notification.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if window.alert_with_message(message).is_err() {
            log::warn!("alert unavailable: {}", message);
        }
    }
}

pub fn print_page() {
    if let Some(window) = web_sys::window() {
        let _ = window.print();
    }
}
