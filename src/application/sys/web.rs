use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::errors::*;
use crate::utils::time::Timestamp;

pub fn timestamp() -> Timestamp {
    let ms = web_sys::window()
        .and_then(|v| v.performance())
        .map(|v| v.now())
        .unwrap_or(0.0);

    Timestamp::from_millis(ms as u64)
}

static LOGGER: WebBrowserLogger = WebBrowserLogger;

pub(crate) fn init() {
    console_error_panic_hook::set_once();
    if ::log::set_logger(&LOGGER).is_ok() {
        ::log::set_max_level(::log::LevelFilter::Info);
    }
}

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Waits `interval`, then calls `advance` on the next animation frame, for as
/// long as `advance` returns true. Returns immediately; the callbacks keep
/// themselves alive until `advance` returns false or fails, and are dropped
/// together with `advance` afterwards.
pub(crate) fn run_forever<F>(interval: Duration, mut advance: F) -> Result<()>
where
    F: FnMut() -> Result<bool> + 'static,
{
    let timeout = interval.as_millis() as i32;
    let tick: Callback = Rc::new(RefCell::new(None));
    let frame: Callback = Rc::new(RefCell::new(None));

    {
        let frame = frame.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            match advance() {
                Ok(true) => {
                    if let Some(inner) = frame.borrow().as_ref() {
                        if let Err(err) = request_animation_frame(inner) {
                            error!("Failed to request animation frame: {}", err);
                        }
                    }

                    return;
                }
                Ok(false) => info!("Render loop stopped."),
                Err(err) => error!("Render loop aborted: {}", err),
            }

            // Dropping `frame` releases the last reference to this closure, which
            // is then freed along with `advance` once it returns.
            frame.borrow_mut().take();
        }) as Box<dyn FnMut()>));
    }

    {
        let tick = tick.clone();
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(inner) = tick.borrow().as_ref() {
                if let Err(err) = set_timeout(inner, timeout) {
                    error!("Failed to schedule frame: {}", err);
                }
            }
        }) as Box<dyn FnMut()>));
    }

    let started = match tick.borrow().as_ref() {
        Some(inner) => set_timeout(inner, timeout),
        None => Ok(()),
    };

    if started.is_err() {
        frame.borrow_mut().take();
    }

    started
}

fn set_timeout(callback: &Closure<dyn FnMut()>, timeout: i32) -> Result<()> {
    web_sys::window()
        .ok_or_else(|| Error::ContextUnavailable("no global `window` exists".into()))?
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout,
        )
        .map_err(|err| backend_err!("setTimeout: {:?}", err))?;
    Ok(())
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<()> {
    web_sys::window()
        .ok_or_else(|| Error::ContextUnavailable("no global `window` exists".into()))?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|err| backend_err!("requestAnimationFrame: {:?}", err))?;
    Ok(())
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

struct WebBrowserLogger;

impl ::log::Log for WebBrowserLogger {
    fn enabled(&self, metadata: &::log::Metadata) -> bool {
        metadata.level() <= ::log::Level::Info
    }

    fn log(&self, record: &::log::Record) {
        if self.enabled(record.metadata()) {
            let filename = record.file().unwrap_or("Unknown");

            log(&format!(
                "{}: {} ({}:{})",
                record.level(),
                record.args(),
                filename,
                record.line().unwrap_or(0)
            ));
        }
    }

    fn flush(&self) {}
}
