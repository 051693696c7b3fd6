//! WASM entry point and DOM wiring.
//!
//! Expects a page with `<input id="upload" type="file" disabled>` and
//! `<canvas id="viewport">`. The input is enabled once the engine is mounted
//! and the animation loop is running.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Uint8Array;
use viewer::camera::Point;
use viewer::input::{Button, Modifiers, WheelDelta};
use viewer::{Action, Engine};
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Event, EventTarget, File, HtmlCanvasElement, HtmlInputElement, PointerEvent, WheelEvent, Window};

use crate::convert::{LoadError, load_into};
use crate::gate::ReadyGate;
use crate::upload::{UploadError, UploadTickets, classify};

static READY: ReadyGate = ReadyGate::new();

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("console logger not installed: {err}")));
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = element(&document, "viewport")?;
    let upload: HtmlInputElement = element(&document, "upload")?;
    upload.set_disabled(true);

    let query = window.location().search().unwrap_or_default();
    let config = crate::config::resolve(&query, canvas.get_attribute("data-config").as_deref());

    let engine = Rc::new(RefCell::new(Engine::new(canvas.clone(), config)?));
    sync_viewport(&mut engine.borrow_mut(), &window, &canvas);

    attach_resize(&window, &engine, &canvas)?;
    attach_pointer(&engine, &canvas)?;
    attach_upload(&engine, &upload)?;
    start_loop(&window, Rc::clone(&engine))?;

    READY.open().map_err(|err| JsValue::from_str(&err.to_string()))?;
    upload.set_disabled(false);
    log::info!("viewer ready");
    Ok(())
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has the wrong element type")))
}

fn listen<E>(target: &EventTarget, kind: &str, handler: impl FnMut(E) + 'static) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn sync_viewport(engine: &mut Engine, window: &Window, canvas: &HtmlCanvasElement) {
    let width = f64::from(canvas.client_width()).max(1.0);
    let height = f64::from(canvas.client_height()).max(1.0);
    let dpr = window.device_pixel_ratio().max(1.0);
    engine.set_viewport(width, height, dpr);
}

fn pointer_point(ev: &PointerEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

fn map_modifiers(ev: &PointerEvent) -> Modifiers {
    Modifiers { shift: ev.shift_key(), ctrl: ev.ctrl_key(), alt: ev.alt_key(), meta: ev.meta_key() }
}

fn apply_actions(canvas: &HtmlCanvasElement, actions: &[Action]) {
    for action in actions {
        match action {
            Action::None => {}
            Action::SetCursor(cursor) => {
                if let Err(err) = canvas.style().set_property("cursor", cursor) {
                    log::warn!("failed to set cursor: {err:?}");
                }
            }
        }
    }
}

// =============================================================
// Listeners
// =============================================================

fn attach_resize(window: &Window, engine: &Rc<RefCell<Engine>>, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let engine = Rc::clone(engine);
    let canvas = canvas.clone();
    let win = window.clone();
    listen(window, "resize", move |_: Event| {
        sync_viewport(&mut engine.borrow_mut(), &win, &canvas);
    })
}

fn attach_pointer(engine: &Rc<RefCell<Engine>>, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    {
        let engine = Rc::clone(engine);
        let target = canvas.clone();
        listen(canvas, "pointerdown", move |ev: PointerEvent| {
            ev.prevent_default();
            if let Err(err) = target.set_pointer_capture(ev.pointer_id()) {
                log::warn!("pointer capture failed: {err:?}");
            }
            let Some(button) = Button::from_dom(ev.button()) else {
                return;
            };
            let actions = engine.borrow_mut().on_pointer_down(pointer_point(&ev), button, map_modifiers(&ev));
            apply_actions(&target, &actions);
        })?;
    }
    {
        let engine = Rc::clone(engine);
        let target = canvas.clone();
        listen(canvas, "pointermove", move |ev: PointerEvent| {
            let actions = engine.borrow_mut().on_pointer_move(pointer_point(&ev));
            apply_actions(&target, &actions);
        })?;
    }
    for kind in ["pointerup", "pointercancel"] {
        let engine = Rc::clone(engine);
        let target = canvas.clone();
        listen(canvas, kind, move |_: PointerEvent| {
            let actions = engine.borrow_mut().on_pointer_up();
            apply_actions(&target, &actions);
        })?;
    }
    listen(canvas, "contextmenu", move |ev: Event| ev.prevent_default())?;
    {
        let engine = Rc::clone(engine);
        let target = canvas.clone();
        listen(canvas, "wheel", move |ev: WheelEvent| {
            ev.prevent_default();
            let actions = engine.borrow_mut().on_wheel(WheelDelta { dy: ev.delta_y() });
            apply_actions(&target, &actions);
        })?;
    }
    Ok(())
}

fn attach_upload(engine: &Rc<RefCell<Engine>>, upload: &HtmlInputElement) -> Result<(), JsValue> {
    let engine = Rc::clone(engine);
    let input = upload.clone();
    let tickets = Rc::new(UploadTickets::new());
    listen(upload, "change", move |_: Event| {
        let file = match selected_file(&input) {
            Ok(file) => file,
            Err(err) => {
                log::debug!("ignoring upload: {err}");
                return;
            }
        };
        let kind = match classify(&file.name()) {
            Ok(kind) => kind,
            Err(err) => {
                log::debug!("ignoring upload {}: {err}", file.name());
                input.set_value("");
                return;
            }
        };

        let ticket = tickets.issue();
        input.set_disabled(true);
        let engine = Rc::clone(&engine);
        let tickets = Rc::clone(&tickets);
        let input = input.clone();
        spawn_local(async move {
            let bytes = read_bytes(&file).await;
            if !tickets.is_current(ticket) {
                log::debug!("dropping stale upload {}", file.name());
                return;
            }
            match bytes.and_then(|bytes| load_into(&mut engine.borrow_mut().core, kind, &bytes)) {
                Ok(view) => log::info!("loaded {} at scale {:.4}", file.name(), view.scale),
                Err(err) => log::warn!("could not load {}: {err}", file.name()),
            }
            input.set_value("");
            input.set_disabled(false);
        });
    })
}

fn selected_file(input: &HtmlInputElement) -> Result<File, UploadError> {
    input.files().and_then(|files| files.get(0)).ok_or(UploadError::MissingFile)
}

async fn read_bytes(file: &File) -> Result<Vec<u8>, LoadError> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(|err| LoadError::Read(format!("{err:?}")))?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

// =============================================================
// Animation loop
// =============================================================

fn start_loop(window: &Window, engine: Rc<RefCell<Engine>>) -> Result<(), JsValue> {
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let win = window.clone();
    let cb = Closure::wrap(Box::new(move |_ts: f64| {
        if let Err(err) = engine.borrow_mut().frame() {
            log::warn!("frame failed: {err:?}");
        }
        if let Some(next) = holder_for_cb.borrow().as_ref() {
            if let Err(err) = win.request_animation_frame(next.as_ref().unchecked_ref()) {
                log::warn!("animation loop stopped: {err:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>);

    window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    *holder.borrow_mut() = Some(cb);
    Ok(())
}
