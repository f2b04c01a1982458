#![cfg(target_arch = "wasm32")]
use flow_core::{ImmersiveMode, LoopGate, PageHide, Scene, SceneConfig, SectionId};
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod frame;
mod header;
mod layers;
mod scroll;
mod surface;
mod waitlist;

use constants::*;
use dom::ListenerHandle;
use frame::AnimationLoop;
use layers::TextLayers;
use scroll::DomSignals;
use surface::Canvas2dSurface;

type Gate = Rc<Cell<LoopGate>>;

/// Apply `f` to the shared gate and write it back.
fn update_gate<R>(gate: &Gate, f: impl FnOnce(&mut LoopGate) -> R) -> R {
    let mut g = gate.get();
    let out = f(&mut g);
    gate.set(g);
    out
}

fn persisted(ev: &web::Event) -> bool {
    ev.dyn_ref::<web::PageTransitionEvent>()
        .is_some_and(|e| e.persisted())
}

/// Everything one mounted section keeps alive.
struct MountedSection {
    id: SectionId,
    immersive: Rc<RefCell<ImmersiveMode>>,
    document: web::Document,
    animation: Rc<RefCell<Option<AnimationLoop>>>,
    sync_loop: Rc<dyn Fn(LoopGate)>,
    _listeners: Vec<ListenerHandle>,
}

impl Drop for MountedSection {
    fn drop(&mut self) {
        self.animation.borrow_mut().take();
        let flipped = self.immersive.borrow_mut().unmount(self.id);
        if flipped {
            header::apply(&self.document, self.immersive.borrow().is_active());
        }
    }
}

/// Shared state for one section's callbacks.
struct SectionCtx {
    scene: RefCell<Scene>,
    surface: RefCell<Canvas2dSurface>,
    signals: DomSignals,
    layers: TextLayers,
    id: SectionId,
    immersive: Rc<RefCell<ImmersiveMode>>,
    document: web::Document,
}

impl SectionCtx {
    fn frame(&self, now_ms: f64) {
        let viewport = {
            let (w, h) = dom::viewport_size(&self.signals.window);
            Vec2::new(w, h)
        };
        self.surface.borrow_mut().sync_size(viewport);
        let out = {
            let mut scene = self.scene.borrow_mut();
            let mut surface = self.surface.borrow_mut();
            scene.frame(now_ms, &self.signals, &mut *surface)
        };
        self.layers.apply(&self.scene.borrow(), now_ms);
        let flipped = self.immersive.borrow_mut().report(self.id, out.progress);
        if flipped {
            header::apply(&self.document, self.immersive.borrow().is_active());
        }
    }
}

struct Page {
    sections: Vec<MountedSection>,
    gate: Gate,
    _waitlist: Option<waitlist::WaitlistForm>,
    _listeners: Vec<ListenerHandle>,
}

impl Page {
    fn sync_loops(&self) {
        let g = self.gate.get();
        for s in &self.sections {
            (s.sync_loop)(g);
        }
    }
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

fn with_page(f: impl FnOnce(&Page)) {
    PAGE.with(|p| {
        if let Some(page) = p.borrow().as_ref() {
            f(page);
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pitch-flow-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let media = dom::prefers_reduced_motion(&window);
    let mut initial = LoopGate::new(media.as_ref().is_some_and(|mq| mq.matches()));
    initial.set_hidden(document.hidden());
    let gate: Gate = Rc::new(Cell::new(initial));
    log::info!("[init] reduced motion = {}", initial.reduced_motion());

    let immersive = Rc::new(RefCell::new(ImmersiveMode::new()));
    let mut sections = Vec::new();
    for (i, (dom_id, config)) in [
        (PITCH_FLOW_SECTION_ID, SceneConfig::pitch_flow(PITCH_FLOW_SEED)),
        (ENTRAINMENT_SECTION_ID, SceneConfig::entrainment(ENTRAINMENT_SEED)),
    ]
    .into_iter()
    .enumerate()
    {
        match mount_section(
            &window,
            &document,
            dom_id,
            config,
            SectionId(i as u32),
            &immersive,
            &gate,
        ) {
            Ok(Some(s)) => sections.push(s),
            Ok(None) => log::info!("[init] #{} not on this page", dom_id),
            Err(e) => log::warn!("[init] #{} skipped: {:?}", dom_id, e),
        }
    }

    let mut listeners = Vec::new();
    {
        let gate = gate.clone();
        listeners.push(
            ListenerHandle::new(&window, "pagehide", move |ev: web::Event| {
                match update_gate(&gate, |g| g.page_hide(persisted(&ev))) {
                    PageHide::Cached => with_page(Page::sync_loops),
                    // Teardown drops this listener too; run it after the handler returns.
                    PageHide::Unloaded => spawn_local(async {
                        let page = PAGE.with(|p| p.borrow_mut().take());
                        drop(page);
                        log::info!("[init] page torn down");
                    }),
                }
            })
            .map_err(|e| anyhow::anyhow!("{:?}", e))?,
        );
    }
    {
        let gate = gate.clone();
        let doc = document.clone();
        listeners.push(
            ListenerHandle::new(&window, "pageshow", move |ev: web::Event| {
                let restored = update_gate(&gate, |g| {
                    g.set_hidden(doc.hidden());
                    g.page_show(persisted(&ev))
                });
                if restored {
                    with_page(Page::sync_loops);
                }
            })
            .map_err(|e| anyhow::anyhow!("{:?}", e))?,
        );
    }
    {
        let gate = gate.clone();
        let doc = document.clone();
        listeners.push(
            ListenerHandle::new(&document, "visibilitychange", move |_| {
                update_gate(&gate, |g| g.set_hidden(doc.hidden()));
                with_page(Page::sync_loops);
            })
            .map_err(|e| anyhow::anyhow!("{:?}", e))?,
        );
    }
    if let Some(mq) = &media {
        let gate = gate.clone();
        let mq_read = mq.clone();
        listeners.push(
            ListenerHandle::new(mq, "change", move |_| {
                let reduced = mq_read.matches();
                if update_gate(&gate, |g| g.set_reduced_motion(reduced)) {
                    log::info!("[init] reduced motion = {}", reduced);
                    with_page(Page::sync_loops);
                }
            })
            .map_err(|e| anyhow::anyhow!("{:?}", e))?,
        );
    }

    let page = Page {
        sections,
        gate,
        _waitlist: waitlist::wire(&document),
        _listeners: listeners,
    };
    PAGE.with(|p| *p.borrow_mut() = Some(page));
    Ok(())
}

fn mount_section(
    window: &web::Window,
    document: &web::Document,
    dom_id: &str,
    config: SceneConfig,
    id: SectionId,
    immersive: &Rc<RefCell<ImmersiveMode>>,
    gate: &Gate,
) -> anyhow::Result<Option<MountedSection>> {
    let Some(section_el) = document.get_element_by_id(dom_id) else {
        return Ok(None);
    };
    let section: web::HtmlElement = section_el
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let canvas: web::HtmlCanvasElement = section
        .query_selector(CANVAS_SELECTOR)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("missing canvas"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let surface = Canvas2dSurface::new(canvas)?;

    let (w, h) = dom::viewport_size(window);
    let scene = Scene::new(config, Vec2::new(w, h));
    immersive.borrow_mut().register(id);

    let ctx = Rc::new(SectionCtx {
        scene: RefCell::new(scene),
        surface: RefCell::new(surface),
        layers: TextLayers::collect(&section),
        signals: DomSignals {
            window: window.clone(),
            section,
            gate: gate.clone(),
        },
        id,
        immersive: immersive.clone(),
        document: document.clone(),
    });

    let animation: Rc<RefCell<Option<AnimationLoop>>> = Rc::new(RefCell::new(None));
    // Runs, pauses or statically redraws the section to match the gate.
    let sync_loop: Rc<dyn Fn(LoopGate)> = {
        let ctx = ctx.clone();
        let animation = animation.clone();
        Rc::new(move |g: LoopGate| {
            if g.should_run() {
                let mut slot = animation.borrow_mut();
                match slot.as_ref() {
                    Some(l) => l.resume(),
                    None => {
                        let ctx = ctx.clone();
                        *slot = Some(AnimationLoop::start(move |ts| ctx.frame(ts)));
                    }
                }
                return;
            }
            if let Some(l) = animation.borrow().as_ref() {
                l.pause();
            }
            if g.reduced_motion() && !g.is_unloaded() {
                ctx.frame(instant::now());
            }
        })
    };
    sync_loop(gate.get());

    // Reduced motion: redraw on scroll/resize only.
    let mut listeners = Vec::new();
    let on_event = {
        let ctx = ctx.clone();
        move |_: web::Event| {
            if ctx.signals.gate.get().reduced_motion() {
                ctx.frame(instant::now());
            }
        }
    };
    listeners.push(
        ListenerHandle::new(window, "scroll", on_event.clone())
            .map_err(|e| anyhow::anyhow!("{:?}", e))?,
    );
    listeners.push(
        ListenerHandle::new(window, "resize", on_event).map_err(|e| anyhow::anyhow!("{:?}", e))?,
    );

    log::info!("[init] mounted #{}", dom_id);
    Ok(Some(MountedSection {
        id,
        immersive: immersive.clone(),
        document: document.clone(),
        animation,
        sync_loop,
        _listeners: listeners,
    }))
}
