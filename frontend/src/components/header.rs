use yew::html::Scope;
use yew::prelude::*;

use crate::{Model, Msg};

pub fn render_header(guardian_visible: bool, link: &Scope<Model>) -> Html {
    html! {
        <header class="app-header">
            <div class="glass-panel header-panel">
                <div>
                    <h2 class="brand">{"COASPIRE "}<span class="brand-accent">{"NEXUS"}</span></h2>
                    <small class="subtitle">{"Hyper-vision Coastal Digital Twin"}</small>
                </div>
                <button class="guardian-toggle" onclick={link.callback(|_| Msg::ToggleGuardian)}>
                    { if guardian_visible { "Hide Guardian" } else { "Summon Guardian" } }
                </button>
            </div>
        </header>
    }
}
