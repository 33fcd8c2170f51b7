#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use ssr_ids::{CounterSlot, IdGenerator, IdScope, InstanceId, RenderHost, RenderMarker, ScopeBoundary};

/// One pass over a fixed tree shape: a top-level boundary wrapping three
/// labeled fields, then two nested boundaries (async-loaded sections, say)
/// with fields of their own. Fresh per-instance slots every pass, the way a
/// real host re-creates instances on the client.
pub fn render_fixed_tree(host: &dyn RenderHost, generator: &mut IdGenerator) -> Vec<String> {
    let root = IdScope::root();
    let app = ScopeBoundary::new();
    let scope = app.enter(generator, host, &root);

    let mut ids = Vec::new();
    for _ in 0..3 {
        let slot = CounterSlot::new();
        ids.push(generator.safe_id(host, &scope, &slot, None));
    }

    let first_section = ScopeBoundary::new();
    let first_scope = first_section.enter(generator, host, &scope);
    for _ in 0..2 {
        let slot = CounterSlot::new();
        ids.push(generator.safe_id(host, &first_scope, &slot, None));
    }

    let second_section = ScopeBoundary::new();
    let second_scope = second_section.enter(generator, host, &scope);
    let slot = CounterSlot::new();
    ids.push(generator.safe_id(host, &second_scope, &slot, None));

    ids
}

/// Browser-side host: scriptable instance identity (to simulate development
/// diagnostics) and a paint queue drained explicitly by the test.
pub struct ClientHost {
    instance: Cell<Option<(InstanceId, RenderMarker)>>,
    paint_queue: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl ClientHost {
    pub fn new() -> Self {
        init_logging();
        Self {
            instance: Cell::new(None),
            paint_queue: RefCell::new(Vec::new()),
        }
    }

    /// Marks `instance` as the one currently rendering, with the given
    /// render marker. Diagnostics bump the marker between invocations.
    pub fn begin_instance(&self, instance: u64, marker: u64) {
        self.instance
            .set(Some((InstanceId(instance), RenderMarker(marker))));
    }

    pub fn clear_instance(&self) {
        self.instance.set(None);
    }

    /// Commits a paint: runs every queued post-paint callback, returning how
    /// many ran.
    pub fn commit_paint(&self) -> usize {
        let callbacks: Vec<_> = self.paint_queue.borrow_mut().drain(..).collect();
        let count = callbacks.len();
        for callback in callbacks {
            callback();
        }
        count
    }

    pub fn pending_paint_callbacks(&self) -> usize {
        self.paint_queue.borrow().len()
    }
}

impl RenderHost for ClientHost {
    fn current_instance(&self) -> Option<(InstanceId, RenderMarker)> {
        self.instance.get()
    }

    fn after_paint(&self, callback: Box<dyn FnOnce()>) {
        self.paint_queue.borrow_mut().push(callback);
    }

    fn is_browser(&self) -> bool {
        true
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
