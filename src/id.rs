use crate::counter::{CounterSlot, IdGenerator};
use crate::host::RenderHost;
use crate::scope::IdScope;

/// Literal every generated id starts with, ahead of the scope prefix.
const ID_PREFIX: &str = "react-aria";

// Warns on every affected render, not just the first: each unscoped server
// render is its own mismatch waiting to happen. Returns whether it warned.
pub(crate) fn warn_missing_boundary(host: &dyn RenderHost, scope: &IdScope) -> bool {
    if scope.is_default() && !host.is_browser() {
        log::warn!(
            "Server rendering without a scope boundary: wrap the tree in a \
             ScopeBoundary so generated ids match between client and server"
        );
        return true;
    }
    false
}

impl IdGenerator {
    /// Returns the id to put on an attribute: the explicit id verbatim when
    /// the caller supplied one, otherwise a generated `react-aria{prefix}-{n}`.
    ///
    /// The explicit path consumes no counter slot, so components accepting an
    /// optional user id don't shift the ids of their siblings. Rendering
    /// outside a browser with no scope boundary above gets an advisory
    /// warning: the server and a later client pass can't agree on ids unless
    /// a boundary pins the prefix.
    pub fn safe_id(
        &mut self,
        host: &dyn RenderHost,
        scope: &IdScope,
        slot: &CounterSlot,
        explicit: Option<&str>,
    ) -> String {
        if let Some(id) = explicit {
            return id.to_owned();
        }

        warn_missing_boundary(host, scope);

        let value = self.counter_value(host, scope, slot);
        format!("{ID_PREFIX}{}-{}", scope.prefix(), value)
    }
}
