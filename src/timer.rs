use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One-shot `setTimeout`. Dropping the handle clears the timeout, so replacing a
/// stored `Timeout` cancels the previous one.
pub struct Timeout {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn schedule(delay: Duration, callback: impl FnOnce() + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(f) = callback.take() {
                f();
            }
        }) as Box<dyn FnMut()>);
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                ms,
            )
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        log::debug!("[timer] scheduled #{} in {}ms", handle, ms);
        Ok(Self {
            handle,
            _callback: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        // harmless when the timeout already fired
        if let Some(window) = web::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}
