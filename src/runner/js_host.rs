//! Embedded JavaScript host for generated test units.
//!
//! A unit runs inside a fresh boa context whose only global is `driver`: a
//! capability object bridged to the browser session owned by the current
//! case. Generated code cannot reach the host filesystem, network, or
//! process, and the capability object has no method that ends the session.

use std::cell::RefCell;

use boa_engine::{
    native_function::NativeFunction, object::ObjectInitializer, property::Attribute, Context,
    JsError, JsResult, JsString, JsValue, Source,
};

use crate::browser::Driver;
use crate::error::PipelineError;

/// Default readiness timeout when generated code omits one.
const DEFAULT_WAIT_MS: u64 = 10_000;

thread_local! {
    // The session owned by the case currently executing on this thread.
    // Installed by the executor before evaluation and taken back after, so
    // fn-pointer natives can reach it without captures.
    static ACTIVE_DRIVER: RefCell<Option<Box<dyn Driver>>> = RefCell::new(None);
}

/// Hand the session to the script host for the duration of one unit.
pub fn install_driver(driver: Box<dyn Driver>) {
    ACTIVE_DRIVER.with(|slot| *slot.borrow_mut() = Some(driver));
}

/// Reclaim the session after a unit has finished (or failed).
pub fn take_driver() -> Option<Box<dyn Driver>> {
    ACTIVE_DRIVER.with(|slot| slot.borrow_mut().take())
}

/// Best-effort screenshot through the installed session, outside of any
/// script evaluation. Returns whether a file was written.
pub fn screenshot_active(path: &str) -> bool {
    ACTIVE_DRIVER.with(|slot| {
        slot.borrow_mut()
            .as_mut()
            .map(|driver| driver.screenshot(path).is_ok())
            .unwrap_or(false)
    })
}

fn js_error(message: &str) -> JsError {
    JsError::from_opaque(JsValue::from(JsString::from(message)))
}

fn with_driver<T>(
    f: impl FnOnce(&mut dyn Driver) -> Result<T, PipelineError>,
) -> JsResult<T> {
    ACTIVE_DRIVER.with(|slot| {
        let mut slot = slot.borrow_mut();
        let driver = slot
            .as_mut()
            .ok_or_else(|| js_error("no active browser session"))?;
        f(driver.as_mut()).map_err(|e| js_error(&e.to_string()))
    })
}

fn string_arg(args: &[JsValue], index: usize, context: &mut Context) -> JsResult<String> {
    let value = args.get(index).cloned().unwrap_or(JsValue::undefined());
    Ok(value.to_string(context)?.to_std_string_escaped())
}

fn ms_arg(args: &[JsValue], index: usize, default: u64, context: &mut Context) -> JsResult<u64> {
    match args.get(index) {
        Some(value) if !value.is_undefined() => Ok(value.to_number(context)?.max(0.0) as u64),
        _ => Ok(default),
    }
}

// ============================================================================
// driver.* natives
// ============================================================================

fn drv_get(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let url = string_arg(args, 0, context)?;
    with_driver(|d| d.navigate(&url))?;
    Ok(JsValue::undefined())
}

fn drv_wait_for(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let selector = string_arg(args, 0, context)?;
    let timeout = ms_arg(args, 1, DEFAULT_WAIT_MS, context)?;
    with_driver(|d| d.wait_for(&selector, timeout))?;
    Ok(JsValue::undefined())
}

fn drv_click(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let selector = string_arg(args, 0, context)?;
    with_driver(|d| d.click(&selector))?;
    Ok(JsValue::undefined())
}

fn drv_fill(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let selector = string_arg(args, 0, context)?;
    let value = string_arg(args, 1, context)?;
    with_driver(|d| d.fill(&selector, &value))?;
    Ok(JsValue::undefined())
}

fn drv_text(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let selector = string_arg(args, 0, context)?;
    let text = with_driver(|d| d.query_text(&selector))?;
    Ok(match text {
        Some(text) => JsValue::from(JsString::from(text)),
        None => JsValue::null(),
    })
}

fn drv_is_visible(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let selector = string_arg(args, 0, context)?;
    let visible = with_driver(|d| d.query_visible(&selector))?;
    Ok(JsValue::from(visible))
}

fn drv_count(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let selector = string_arg(args, 0, context)?;
    let count = with_driver(|d| d.query_count(&selector))?;
    Ok(JsValue::from(count as i32))
}

fn drv_current_url(_this: &JsValue, _args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    let url = with_driver(|d| d.current_url())?;
    Ok(JsValue::from(JsString::from(url)))
}

fn drv_sleep(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let ms = ms_arg(args, 0, 0, context)?;
    with_driver(|d| d.sleep(ms))?;
    Ok(JsValue::undefined())
}

fn drv_screenshot(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let path = string_arg(args, 0, context)?;
    with_driver(|d| d.screenshot(&path))?;
    Ok(JsValue::undefined())
}

// ============================================================================
// Script host
// ============================================================================

/// One boa context with the `driver` capability object installed.
pub struct ScriptHost {
    context: Context,
}

impl ScriptHost {
    pub fn new() -> Result<Self, PipelineError> {
        let mut context = Context::default();

        let driver = ObjectInitializer::new(&mut context)
            .function(NativeFunction::from_fn_ptr(drv_get), JsString::from("get"), 1)
            .function(
                NativeFunction::from_fn_ptr(drv_wait_for),
                JsString::from("waitFor"),
                2,
            )
            .function(
                NativeFunction::from_fn_ptr(drv_click),
                JsString::from("click"),
                1,
            )
            .function(
                NativeFunction::from_fn_ptr(drv_fill),
                JsString::from("fill"),
                2,
            )
            .function(
                NativeFunction::from_fn_ptr(drv_text),
                JsString::from("text"),
                1,
            )
            .function(
                NativeFunction::from_fn_ptr(drv_is_visible),
                JsString::from("isVisible"),
                1,
            )
            .function(
                NativeFunction::from_fn_ptr(drv_count),
                JsString::from("count"),
                1,
            )
            .function(
                NativeFunction::from_fn_ptr(drv_current_url),
                JsString::from("currentUrl"),
                0,
            )
            .function(
                NativeFunction::from_fn_ptr(drv_sleep),
                JsString::from("sleep"),
                1,
            )
            .function(
                NativeFunction::from_fn_ptr(drv_screenshot),
                JsString::from("screenshot"),
                1,
            )
            .build();

        context
            .register_global_property(JsString::from("driver"), driver, Attribute::all())
            .map_err(|e| PipelineError::ScriptHost(format!("{e}")))?;

        Ok(Self { context })
    }

    /// Evaluate one unit's code. Any raised JS error comes back as its
    /// textual description.
    pub fn run(&mut self, code: &str) -> Result<(), String> {
        self.context
            .eval(Source::from_bytes(code))
            .map(|_| ())
            .map_err(|e| format!("{e}"))
    }
}
