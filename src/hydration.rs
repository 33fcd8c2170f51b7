use std::cell::Cell;
use std::rc::Rc;

use crate::host::RenderHost;
use crate::scope::IdScope;

/// Per-instance flag answering "is this render happening before hydration?".
///
/// Constructed at the instance's first render and kept for its lifetime. The
/// initial value is whether a scope boundary wraps the instance, since only
/// server-rendered trees carry boundaries down to the client. On a browser
/// host that starts out `true`, a one-time post-paint flip to `false` is
/// scheduled at construction; browser-specific rendering can be held back
/// until the flag clears without causing a hydration mismatch. A flag that
/// starts `false` never transitions, and a non-browser host never schedules
/// the flip at all.
pub struct HydrationFlag {
    state: Rc<Cell<bool>>,
}

impl HydrationFlag {
    pub fn new(host: &dyn RenderHost, scope: &IdScope) -> Self {
        let in_ssr_scope = !scope.is_default();
        let state = Rc::new(Cell::new(in_ssr_scope));

        if in_ssr_scope && host.is_browser() {
            let state = Rc::clone(&state);
            host.after_paint(Box::new(move || state.set(false)));
        }

        Self { state }
    }

    pub fn is_ssr(&self) -> bool {
        self.state.get()
    }
}
