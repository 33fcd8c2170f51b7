use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::counter::{CounterSlot, IdGenerator};
use crate::host::RenderHost;

/// Id-generation state for one subtree: an immutable prefix plus the counter
/// handing out slots to instances in that subtree.
///
/// Cloning is cheap and shares the counter cell, which is what lets a scope be
/// threaded down to every descendant of the boundary that created it. Not
/// `Send`; scopes live on their render thread.
pub struct IdScope {
    inner: Rc<ScopeInner>,
}

struct ScopeInner {
    prefix: String,
    current: Cell<u64>,
}

// Decimal string of a random integer in [0, 10^10).
fn random_prefix() -> String {
    let bits = uuid::Uuid::new_v4().as_u128() as u64;
    (bits % 10_000_000_000).to_string()
}

thread_local! {
    // The fallback scope observed when no boundary wraps the tree. Each
    // render thread is an independent copy of the library, with its own
    // random prefix: threads share neither counters nor prefixes, so
    // unscoped trees on different threads cannot collide.
    static DEFAULT_SCOPE: IdScope = IdScope {
        inner: Rc::new(ScopeInner {
            prefix: random_prefix(),
            current: Cell::new(0),
        }),
    };
}

impl IdScope {
    /// The root default scope: what a component observes when no scope
    /// boundary exists above it. Server and client must agree on boundary
    /// placement, so unscoped server renders get a warning (see `safe_id`).
    pub fn root() -> Self {
        DEFAULT_SCOPE.with(Self::clone)
    }

    /// Whether this scope is the root default. Detected by identity, never by
    /// comparing prefixes: the default's random prefix could in principle
    /// collide with a derived one.
    pub fn is_default(&self) -> bool {
        DEFAULT_SCOPE.with(|default| Rc::ptr_eq(&default.inner, &self.inner))
    }

    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    /// Current counter value, i.e. the last slot handed out (0 if none yet).
    pub fn current(&self) -> u64 {
        self.inner.current.get()
    }

    fn child(prefix: String) -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                prefix,
                current: Cell::new(0),
            }),
        }
    }

    fn same(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    pub(crate) fn advance(&self) -> u64 {
        let value = self.inner.current.get() + 1;
        self.inner.current.set(value);
        value
    }

    pub(crate) fn rewind(&self, to: u64) {
        self.inner.current.set(to);
    }
}

impl Clone for IdScope {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for IdScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdScope")
            .field("prefix", &self.inner.prefix)
            .field("current", &self.inner.current.get())
            .finish()
    }
}

/// Retained state for one scope boundary node: created when the boundary
/// mounts, dropped when it unmounts.
///
/// `enter` is called on every render of the boundary and returns the scope to
/// thread into the wrapped subtree. The derivation is memoized on the identity
/// of (parent scope, counter value), so a re-render with unchanged inputs
/// hands descendants the exact same scope and nothing below recomputes.
pub struct ScopeBoundary {
    slot: CounterSlot,
    memo: RefCell<Option<BoundaryMemo>>,
}

struct BoundaryMemo {
    parent: IdScope,
    counter: Option<u64>,
    derived: IdScope,
}

impl ScopeBoundary {
    pub fn new() -> Self {
        Self {
            slot: CounterSlot::new(),
            memo: RefCell::new(None),
        }
    }

    /// Derives the scope for this boundary's subtree from `parent`.
    ///
    /// A first-level boundary (parent is the root default) takes no counter
    /// slot and produces the empty prefix, keeping top-level ids short.
    /// Nested boundaries append their own counter value to the parent prefix,
    /// which is what keeps sibling subtrees collision-free.
    pub fn enter(
        &self,
        generator: &mut IdGenerator,
        host: &dyn RenderHost,
        parent: &IdScope,
    ) -> IdScope {
        let counter = generator.counter(host, parent, &self.slot, parent.is_default());

        let mut memo = self.memo.borrow_mut();
        if let Some(cached) = memo.as_ref() {
            if IdScope::same(&cached.parent, parent) && cached.counter == counter {
                return cached.derived.clone();
            }
        }

        // counter is None exactly when the parent is the root default.
        let prefix = match counter {
            Some(value) => format!("{}-{}", parent.prefix(), value),
            None => String::new(),
        };
        let derived = IdScope::child(prefix);
        *memo = Some(BoundaryMemo {
            parent: parent.clone(),
            counter,
            derived: derived.clone(),
        });
        derived
    }
}

impl Default for ScopeBoundary {
    fn default() -> Self {
        Self::new()
    }
}
