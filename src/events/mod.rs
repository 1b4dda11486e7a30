use fnv::FnvHashMap;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub mod pointer;
pub mod touch;

pub use pointer::{wire_pointer_evasion, wire_pointer_tracking};
pub use touch::{wire_touch_evasion, wire_touch_tracking};

/// Keyed interval registry. Every interval the app starts goes through here
/// so stage teardown can cancel it; dropping the registry clears the rest.
#[derive(Default)]
pub struct IntervalRegistry {
    handles: FnvHashMap<&'static str, (i32, Closure<dyn FnMut()>)>,
}

impl IntervalRegistry {
    pub fn set(&mut self, key: &'static str, interval_ms: i32, callback: impl FnMut() + 'static) {
        self.cancel(key);
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let Some(w) = web::window() else { return };
        match w.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms,
        ) {
            Ok(handle) => {
                self.handles.insert(key, (handle, closure));
            }
            Err(e) => log::warn!("[events] set_interval {key}: {e:?}"),
        }
    }

    pub fn cancel(&mut self, key: &'static str) {
        if let Some((handle, _closure)) = self.handles.remove(key) {
            if let Some(w) = web::window() {
                w.clear_interval_with_handle(handle);
            }
        }
    }

    pub fn clear_all(&mut self) {
        let keys: Vec<&'static str> = self.handles.keys().copied().collect();
        for key in keys {
            self.cancel(key);
        }
    }
}

impl Drop for IntervalRegistry {
    fn drop(&mut self) {
        self.clear_all();
    }
}
