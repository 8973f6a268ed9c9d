use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::abortable;
use gloo_timers::future::TimeoutFuture;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::reveal::count_up::run_count_up;
use crate::reveal::scheduler::{RevealEffect, VisibilityScheduler};

const ID_ATTRIBUTE: &str = "data-reveal-id";

pub type RevealId = u32;

type Listener = Callback<(RevealId, RevealEffect)>;

struct HostState {
    scheduler: VisibilityScheduler<RevealId>,
    listeners: HashMap<RevealId, Listener>,
    next_id: RevealId,
}

impl HostState {
    /// Runs the scheduler for one report and hands back the listener to
    /// notify. The caller emits after the borrow is released, since
    /// listeners call back into the host.
    fn report(&mut self, id: RevealId, ratio: f64) -> Option<(Listener, RevealEffect)> {
        let effect = self.scheduler.observe(id, ratio)?;
        let listener = self.listeners.get(&id)?.clone();
        Some((listener, effect))
    }
}

/// Page-wide visibility tracking, shared with elements through a Yew context.
///
/// One `IntersectionObserver` feeds every registered element into the
/// scheduler. Without observer support every element plays its effect as
/// soon as it registers.
#[derive(Clone)]
pub struct RevealHost {
    state: Rc<RefCell<HostState>>,
    observer: Option<IntersectionObserver>,
    _on_intersect: Rc<Closure<dyn FnMut(Array, IntersectionObserver)>>,
}

impl PartialEq for RevealHost {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl RevealHost {
    pub fn new(threshold: f64) -> Self {
        let scheduler = VisibilityScheduler::new(threshold);
        let threshold = scheduler.threshold();
        let state = Rc::new(RefCell::new(HostState {
            scheduler,
            listeners: HashMap::new(),
            next_id: 0,
        }));

        let host_state = Rc::clone(&state);
        let on_intersect = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let target = entry.target();
                let Some(id) = target
                    .get_attribute(ID_ATTRIBUTE)
                    .and_then(|raw| raw.parse::<RevealId>().ok())
                else {
                    continue;
                };

                // A non-intersecting entry can still carry a stale ratio.
                let ratio = if entry.is_intersecting() { entry.intersection_ratio() } else { 0.0 };
                let fired = host_state.borrow_mut().report(id, ratio);
                if let Some((listener, effect)) = fired {
                    // Nothing left to watch once the effect has played.
                    observer.unobserve(&target);
                    listener.emit((id, effect));
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer = match IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init) {
            Ok(observer) => Some(observer),
            Err(e) => {
                warn!("IntersectionObserver unavailable, revealing everything at once: {:?}", e);
                None
            }
        };

        RevealHost {
            state,
            observer,
            _on_intersect: Rc::new(on_intersect),
        }
    }

    pub fn register(&self, element: &Element, effect: RevealEffect, listener: Listener) -> RevealId {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id = state.next_id.wrapping_add(1);
            state.scheduler.register(id, effect);
            state.listeners.insert(id, listener);
            id
        };

        if let Err(e) = element.set_attribute(ID_ATTRIBUTE, &id.to_string()) {
            warn!("Could not tag reveal element {}: {:?}", id, e);
        }

        match &self.observer {
            Some(observer) => observer.observe(element),
            None => {
                let fired = self.state.borrow_mut().report(id, 1.0);
                if let Some((listener, effect)) = fired {
                    listener.emit((id, effect));
                }
            }
        }
        debug!("Registered reveal element {}", id);
        id
    }

    pub fn unregister(&self, id: RevealId, element: &Element) {
        if let Some(observer) = &self.observer {
            observer.unobserve(element);
        }
        let mut state = self.state.borrow_mut();
        state.scheduler.unregister(id);
        state.listeners.remove(&id);
    }

    /// Starts a count-up for `id`, tied to the element's registration.
    pub fn spawn_count_up(&self, id: RevealId, effect: RevealEffect, on_value: Callback<u64>) {
        let RevealEffect::CountUp(count) = effect else {
            return;
        };
        let (task, handle) = abortable(run_count_up(count, TimeoutFuture::new, move |value| {
            on_value.emit(value)
        }));
        self.state.borrow_mut().scheduler.attach_task(id, handle);
        spawn_local(async move {
            if task.await.is_err() {
                debug!("Count-up for reveal element {} cancelled", id);
            }
        });
    }

    pub fn disconnect(&self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}

/// Observable state of one reveal element.
pub struct RevealHandle {
    pub node: NodeRef,
    pub visible: bool,
    pub value: u64,
}

/// Registers the element behind the returned `NodeRef` with the page's
/// `RevealHost` for as long as the component is mounted.
#[hook]
pub fn use_reveal(effect: RevealEffect) -> RevealHandle {
    let host = use_context::<RevealHost>();
    let node = use_node_ref();
    let visible = use_state(|| false);
    let value = use_state(|| 0u64);

    {
        let node = node.clone();
        let visible = visible.clone();
        let value = value.clone();
        use_effect_with_deps(
            move |_| {
                let element = node.cast::<Element>();
                let registration = match (host, element) {
                    (Some(host), Some(element)) => {
                        let listener = {
                            let host = host.clone();
                            Callback::from(move |(id, effect): (RevealId, RevealEffect)| {
                                visible.set(true);
                                let value = value.clone();
                                host.spawn_count_up(id, effect, Callback::from(move |v| value.set(v)));
                            })
                        };
                        let id = host.register(&element, effect, listener);
                        Some((host, id, element))
                    }
                    _ => {
                        // No host on this page: show the final state.
                        visible.set(true);
                        if let RevealEffect::CountUp(count) = effect {
                            value.set(count.target);
                        }
                        None
                    }
                };

                move || {
                    if let Some((host, id, element)) = registration {
                        host.unregister(id, &element);
                    }
                }
            },
            (),
        );
    }

    RevealHandle {
        node,
        visible: *visible,
        value: *value,
    }
}
