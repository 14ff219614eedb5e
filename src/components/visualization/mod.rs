pub mod threejs_canvas;

pub use threejs_canvas::ThreeJsCanvas;
