use dioxus::prelude::*;

use frame_editor::pages::Workbench;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Workbench {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

// Inline JavaScript - primitive registry, camera and picking for the viewport
static VIEWPORT_SCRIPT: &str = include_str!("viewport.js");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Script { src: "https://cdnjs.cloudflare.com/ajax/libs/three.js/r128/three.min.js" }
        script { {VIEWPORT_SCRIPT} }

        Router::<Route> {}
    }
}
