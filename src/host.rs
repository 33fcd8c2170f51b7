/// Stable handle identifying one logical component instance for its whole
/// lifetime, including across diagnostic re-invocations of its render logic.
///
/// Assigned by the host at instance creation. Starting hosts at 1 avoids
/// confusion with a zero default, but any scheme works as long as handles are
/// unique among live instances.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InstanceId(pub u64);

/// Opaque snapshot of the host's internal per-instance render state.
///
/// The only requirement is that two distinct executions of the same instance's
/// render logic observe different markers. A generation counter bumped on
/// every render works fine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderMarker(pub u64);

/// Capabilities the host UI framework provides to this library.
///
/// Everything here is consumed as an opaque capability; the framework itself
/// is never a dependency. The whole model is single-threaded: a host is only
/// ever called from its own render thread, so implementations are free to use
/// interior mutability without locking.
pub trait RenderHost {
    /// Identity and render marker of the instance whose render logic is
    /// currently running.
    ///
    /// Returns `None` when the host does not expose instance identity (the
    /// usual production configuration). Duplicate-render compensation is then
    /// skipped entirely, which is safe because such hosts never double-invoke.
    fn current_instance(&self) -> Option<(InstanceId, RenderMarker)>;

    /// Schedules `callback` to run exactly once, after the next paint has
    /// been committed. Never runs before the first paint.
    fn after_paint(&self, callback: Box<dyn FnOnce()>);

    /// Whether a browser-like environment is present.
    fn is_browser(&self) -> bool;
}

/// Host for server render passes.
///
/// A server exposes no instance identity (there are no diagnostic re-renders
/// to compensate for), is not a browser, and never paints.
#[derive(Default)]
pub struct ServerHost;

impl ServerHost {
    pub fn new() -> Self {
        Self
    }
}

impl RenderHost for ServerHost {
    fn current_instance(&self) -> Option<(InstanceId, RenderMarker)> {
        None
    }

    fn after_paint(&self, _callback: Box<dyn FnOnce()>) {
        // No paint ever happens on the server; the callback is dropped.
        // This library only schedules callbacks on browser hosts anyway.
    }

    fn is_browser(&self) -> bool {
        false
    }
}
