use std::cell::Cell;
use std::collections::HashMap;

use crate::host::{InstanceId, RenderHost};
use crate::scope::IdScope;

/// Per-instance counter seed, owned by the host for the instance's lifetime.
///
/// Empty until the first enabled allocation, then holds the assigned value for
/// every later read. A host that diagnostically re-invokes an instance's
/// render logic presents a fresh slot on the second invocation (that reset is
/// the very thing duplicate-render compensation exists to repair).
pub struct CounterSlot {
    value: Cell<Option<u64>>,
}

impl CounterSlot {
    pub fn new() -> Self {
        Self {
            value: Cell::new(None),
        }
    }

    pub fn get(&self) -> Option<u64> {
        self.value.get()
    }
}

impl Default for CounterSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Copy, Clone)]
struct FirstRender {
    /// Scope counter value captured before this instance's first increment.
    counter: u64,
    marker: crate::host::RenderMarker,
}

/// Allocates counter slots, compensating for the host's diagnostic
/// double-invocation so one logical instance consumes exactly one slot.
///
/// One generator serves one renderer. The cache is keyed by the host's stable
/// per-instance handle and entries are removed explicitly, either when the
/// duplicate is detected and repaired or at instance teardown via
/// [`release_instance`](Self::release_instance); no weak retention is
/// involved.
pub struct IdGenerator {
    first_renders: HashMap<InstanceId, FirstRender>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            first_renders: HashMap::new(),
        }
    }

    /// Returns the stable counter value for this call, unless disabled.
    ///
    /// A slot that was already assigned is returned unchanged with no state
    /// mutation. `disabled` (used when the caller supplies its own explicit
    /// id) returns `None` without consuming a slot. Otherwise the nearest
    /// scope's counter advances once and the result is remembered in `slot`.
    pub fn counter(
        &mut self,
        host: &dyn RenderHost,
        scope: &IdScope,
        slot: &CounterSlot,
        disabled: bool,
    ) -> Option<u64> {
        if let Some(value) = slot.get() {
            return Some(value);
        }
        if disabled {
            return None;
        }
        Some(self.allocate(host, scope, slot))
    }

    /// Enabled-path allocation: the remembered slot value, or a fresh one.
    pub(crate) fn counter_value(
        &mut self,
        host: &dyn RenderHost,
        scope: &IdScope,
        slot: &CounterSlot,
    ) -> u64 {
        if let Some(value) = slot.get() {
            return value;
        }
        self.allocate(host, scope, slot)
    }

    /// Drops any first-render record for `instance`. Hosts call this at
    /// instance teardown so the cache never outlives the instances it tracks.
    pub fn release_instance(&mut self, instance: InstanceId) {
        self.first_renders.remove(&instance);
    }

    #[cfg(test)]
    fn tracked_instances(&self) -> usize {
        self.first_renders.len()
    }

    fn allocate(&mut self, host: &dyn RenderHost, scope: &IdScope, slot: &CounterSlot) -> u64 {
        // Hosts that diagnostically double-invoke render logic reset the slot
        // between the two invocations, so without compensation the scope
        // counter would advance twice and client ids would drift from the
        // server's. The host's stable instance handle lets us recognize the
        // second invocation: its render marker differs from the one recorded
        // on the first, at which point we rewind the counter to the recorded
        // value and drop the record so this fires at most once per instance.
        // Relies on the two invocations being back-to-back, with no other
        // instance allocating in between. Hosts that expose no instance
        // identity never double-invoke, so skipping compensation is safe.
        if let Some((instance, marker)) = host.current_instance() {
            match self.first_renders.get(&instance).copied() {
                None => {
                    self.first_renders.insert(
                        instance,
                        FirstRender {
                            counter: scope.current(),
                            marker,
                        },
                    );
                }
                Some(first) if first.marker != marker => {
                    scope.rewind(first.counter);
                    self.first_renders.remove(&instance);
                }
                Some(_) => {}
            }
        }

        let value = scope.advance();
        slot.value.set(Some(value));
        value
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
