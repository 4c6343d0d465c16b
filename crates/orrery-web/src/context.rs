//! Canvas and WebGL context acquisition.

use log::{error, info};
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGlContextAttributes, WebGlRenderingContext as GL};

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("no element with id '{0}'")]
    CanvasNotFound(String),

    #[error("element '{0}' is not a canvas")]
    NotACanvas(String),

    #[error("WebGL is not available")]
    WebGlUnavailable,
}

/// A canvas plus its WebGL 1 context, with depth testing and back-face culling on.
pub struct GlContext {
    pub canvas: HtmlCanvasElement,
    pub gl: GL,
}

impl GlContext {
    /// Look up the canvas by id and create an opaque WebGL context on it.
    /// On failure the user is alerted once and the error is returned.
    pub fn acquire(canvas_id: &str) -> Result<Self, ContextError> {
        let result = Self::try_acquire(canvas_id);
        if let Err(e) = &result {
            error!("WebGL context: {}", e);
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message("Could not initialise WebGL, sorry :-(");
            }
        }
        result
    }

    fn try_acquire(canvas_id: &str) -> Result<Self, ContextError> {
        let window = web_sys::window().ok_or(ContextError::NoWindow)?;
        let document = window.document().ok_or(ContextError::NoDocument)?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| ContextError::CanvasNotFound(canvas_id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ContextError::NotACanvas(canvas_id.to_string()))?;

        let attributes = WebGlContextAttributes::new();
        attributes.set_alpha(false);
        let gl = canvas
            .get_context_with_context_options("webgl", &attributes)
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<GL>().ok())
            .ok_or(ContextError::WebGlUnavailable)?;

        gl.enable(GL::DEPTH_TEST);
        gl.enable(GL::CULL_FACE);

        info!(
            "WebGL context acquired on '{}' ({}x{})",
            canvas_id,
            canvas.width(),
            canvas.height()
        );
        Ok(Self { canvas, gl })
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }
}
