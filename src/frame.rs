use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickFn = Closure<dyn FnMut(f64)>;

struct LoopInner {
    raf_id: Cell<Option<i32>>,
    running: Cell<bool>,
    tick: RefCell<Option<TickFn>>,
}

impl LoopInner {
    fn schedule(&self) {
        if self.raf_id.get().is_some() || !self.running.get() {
            return;
        }
        let Some(w) = web::window() else {
            return;
        };
        if let Some(cb) = self.tick.borrow().as_ref() {
            if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                self.raf_id.set(Some(id));
            }
        }
    }

    fn cancel(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }
}

/// requestAnimationFrame chain that can be paused, resumed and is cancelled
/// when dropped. The callback receives the frame timestamp in milliseconds.
pub struct AnimationLoop {
    inner: Rc<LoopInner>,
}

impl AnimationLoop {
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Self {
        let inner = Rc::new(LoopInner {
            raf_id: Cell::new(None),
            running: Cell::new(true),
            tick: RefCell::new(None),
        });
        let weak: Weak<LoopInner> = Rc::downgrade(&inner);
        *inner.tick.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.raf_id.set(None);
            if !inner.running.get() {
                return;
            }
            on_frame(ts);
            inner.schedule();
        }) as Box<dyn FnMut(f64)>));
        inner.schedule();
        Self { inner }
    }

    pub fn pause(&self) {
        if self.inner.running.replace(false) {
            self.inner.cancel();
            log::info!("[loop] paused");
        }
    }

    pub fn resume(&self) {
        if !self.inner.running.replace(true) {
            self.inner.schedule();
            log::info!("[loop] resumed");
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.inner.running.set(false);
        self.inner.cancel();
    }
}
