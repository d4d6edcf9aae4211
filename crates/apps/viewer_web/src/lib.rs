use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use runtime::{InputEvent, Viewport};

pub mod app;
pub mod textures;
mod wgpu;

use app::{AssetSource, GlobeApp, load_globe_assets};
use wgpu::{WgpuContext, init_wgpu_from_canvas_id, render_globe, resize_wgpu};

#[derive(Debug)]
pub struct ViewerState {
    pub app: Option<GlobeApp>,
    pub wgpu: Option<WgpuContext>,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

thread_local! {
    static STATE: RefCell<ViewerState> = RefCell::new(ViewerState {
        app: None,
        wgpu: None,
        canvas_width: 1280.0,
        canvas_height: 720.0,
    });
}

/// Fetches assets relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpAssets {
    base_url: String,
}

impl HttpAssets {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

impl AssetSource for HttpAssets {
    async fn fetch_text(&self, path: &str) -> Result<String, String> {
        let url = self.url_for(path);
        let resp = Request::get(&url).send().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("{url}: HTTP {}", resp.status()));
        }
        resp.text().await.map_err(|e| e.to_string())
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, String> {
        let url = self.url_for(path);
        let resp = Request::get(&url).send().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("{url}: HTTP {}", resp.status()));
        }
        resp.binary().await.map_err(|e| e.to_string())
    }
}

/// Join a base URL and a relative path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if base.is_empty() {
        path.to_string()
    } else {
        format!("{base}/{path}")
    }
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("window missing"))
}

fn window_size() -> Result<(f64, f64), JsValue> {
    let window = window()?;
    let width = window.inner_width()?.as_f64().unwrap_or(1280.0);
    let height = window.inner_height()?.as_f64().unwrap_or(720.0);
    Ok((width, height))
}

fn render_frame(timestamp_ms: f64) -> Result<(), JsValue> {
    STATE.with(|state_ref| {
        let mut state = state_ref.borrow_mut();
        let state = &mut *state;
        let (Some(app), Some(ctx)) = (state.app.as_mut(), state.wgpu.as_ref()) else {
            return Ok(());
        };
        app.tick(timestamp_ms);
        let (group, root) = app.uniforms();
        render_globe(ctx, &group, &root)
    })
}

fn request_animation_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref::<js_sys::Function>())
}

fn start_animation_loop() -> Result<(), JsValue> {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let handle = callback.clone();

    *handle.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
        if let Err(err) = render_frame(timestamp_ms) {
            warn(&format!("render error: {:?}", err));
        }
        if let Some(cb) = callback.borrow().as_ref() {
            if let Err(err) = request_animation_frame(cb) {
                warn(&format!("requestAnimationFrame failed: {:?}", err));
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(cb) = handle.borrow().as_ref() {
        request_animation_frame(cb)?;
    }
    Ok(())
}

fn push_input(event: InputEvent) {
    STATE.with(|state| {
        if let Some(app) = state.borrow_mut().app.as_mut() {
            app.push_input(event);
        }
    });
}

fn add_mouse_listener(
    target: &web_sys::EventTarget,
    kind: &str,
    to_event: fn(&web_sys::MouseEvent) -> InputEvent,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
        push_input(to_event(&event));
    }) as Box<dyn FnMut(web_sys::MouseEvent)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn install_listeners() -> Result<(), JsValue> {
    let window = window()?;
    let target: &web_sys::EventTarget = window.as_ref();

    add_mouse_listener(target, "mousedown", |e| InputEvent::PointerDown {
        x: e.client_x() as f64,
        y: e.client_y() as f64,
    })?;
    add_mouse_listener(target, "mousemove", |e| InputEvent::PointerMove {
        x: e.client_x() as f64,
        y: e.client_y() as f64,
    })?;
    add_mouse_listener(target, "mouseup", |_| InputEvent::PointerUp)?;
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Load the flight data under `data_base_url`, build the globe, and start
/// rendering into the canvas with id `canvas_id`.
#[wasm_bindgen]
pub fn init_globe(canvas_id: String, data_base_url: String) {
    spawn_local(async move {
        if let Err(err) = init_globe_inner(&canvas_id, &data_base_url).await {
            web_sys::console::error_1(&JsValue::from_str(&format!(
                "globe init error: {:?}",
                err
            )));
        }
    });
}

#[wasm_bindgen]
pub fn set_canvas_size(width: f64, height: f64) {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.canvas_width = width;
        s.canvas_height = height;
        if let Some(app) = s.app.as_mut() {
            app.set_viewport(Viewport::new(width, height));
        }
        if let Some(ctx) = s.wgpu.as_mut() {
            resize_wgpu(ctx, width as u32, height as u32);
        }
    });
}

async fn init_globe_inner(canvas_id: &str, data_base_url: &str) -> Result<(), JsValue> {
    let loaded = load_globe_assets(&HttpAssets::new(data_base_url))
        .await
        .map_err(|e| JsValue::from_str(&e))?;
    for warning in &loaded.warnings {
        warn(warning);
    }

    let (width, height) = window_size()?;
    let app = GlobeApp::from_loaded(&loaded, Viewport::new(width, height));
    let report = &app.scene().report;
    for skipped in &report.skipped {
        warn(&format!(
            "route {} ({} -> {}) skipped: {}",
            skipped.index, skipped.route.departure, skipped.route.arrival, skipped.reason
        ));
    }
    log(&format!(
        "routes drawn: {} of {}",
        report.routes_drawn,
        loaded.dataset.routes.len()
    ));

    let ctx = init_wgpu_from_canvas_id(
        canvas_id,
        width as u32,
        height as u32,
        &app.geometry(),
        &loaded.day,
        &loaded.displacement,
    )
    .await?;

    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.canvas_width = width;
        s.canvas_height = height;
        s.app = Some(app);
        s.wgpu = Some(ctx);
    });

    install_listeners()?;
    start_animation_loop()
}

#[cfg(test)]
mod tests {
    use super::{HttpAssets, join_url};

    #[test]
    fn join_url_inserts_single_slash() {
        assert_eq!(join_url("data", "airports.json"), "data/airports.json");
        assert_eq!(join_url("data/", "/airports.json"), "data/airports.json");
        assert_eq!(
            join_url("https://example.com/assets//", "textures/earth.jpg"),
            "https://example.com/assets/textures/earth.jpg"
        );
    }

    #[test]
    fn empty_base_keeps_relative_path() {
        assert_eq!(join_url("", "routes.json"), "routes.json");
        assert_eq!(HttpAssets::new("").url_for("/routes.json"), "routes.json");
    }
}
