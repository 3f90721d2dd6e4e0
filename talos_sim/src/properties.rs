// talos_sim/src/properties.rs

//! Typed property bus.
//!
//! The model owns its state as plain struct fields; what other components
//! rely on is the *notification* contract: every write of an externally
//! visible property announces itself, so consumers observe the new value no
//! later than their next scheduling. The bus also counts live output
//! consumers, which gates whether commands are applied at all.

use std::cell::Cell;
use std::rc::Rc;

/// Identifier of an externally visible property of the position model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyId {
    /// Output velocity handed to the physics integrator.
    Velocity,
    /// The current motion command.
    Command,
    /// The drive kinematics mode.
    DriveMode,
    /// Believed pose, origin, drift error and localization mode.
    PositionData,
    /// Collision stall flag.
    Stall,
    /// Body bounding size, for rendering only.
    Geometry,
}

/// Handle returned by [`PropertyBus::subscribe`]. The model counts the
/// robot as "in use" while at least one of these is alive; dropping the
/// handle releases the claim.
pub struct Subscription {
    consumers: Rc<Cell<usize>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.consumers.set(self.consumers.get() - 1);
    }
}

/// Identifier of a registered change observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(u64);

type ObserverFn = Box<dyn FnMut(PropertyId)>;

/// Per-model change-notification hub. Single-threaded by design: the host
/// scheduler serializes all access to a model between ticks.
#[derive(Default)]
pub struct PropertyBus {
    consumers: Rc<Cell<usize>>,
    observers: Vec<(ObserverId, ObserverFn)>,
    next_observer: u64,
}

impl PropertyBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register as a consumer of the model's output.
    pub fn subscribe(&self) -> Subscription {
        self.consumers.set(self.consumers.get() + 1);
        Subscription {
            consumers: Rc::clone(&self.consumers),
        }
    }

    /// Number of live output consumers.
    pub fn subscriber_count(&self) -> usize {
        self.consumers.get()
    }

    /// Register a callback invoked on every property change.
    pub fn observe(&mut self, f: impl FnMut(PropertyId) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(f)));
        id
    }

    pub fn remove_observer(&mut self, id: ObserverId) {
        self.observers.retain(|(oid, _)| *oid != id);
    }

    /// Announce that `id` was written. Called by the model after every
    /// mutation of an externally visible property.
    pub fn notify(&mut self, id: PropertyId) {
        for (_, f) in self.observers.iter_mut() {
            f(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscriptions_are_counted_and_released() {
        let bus = PropertyBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        let a = bus.subscribe();
        let b = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);
        drop(a);
        assert_eq!(bus.subscriber_count(), 1);
        drop(b);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn observers_see_every_notification() {
        let mut bus = PropertyBus::new();
        let seen = Rc::new(Cell::new(0usize));
        let seen_by_observer = Rc::clone(&seen);
        let id = bus.observe(move |prop| {
            if prop == PropertyId::Velocity {
                seen_by_observer.set(seen_by_observer.get() + 1);
            }
        });

        bus.notify(PropertyId::Velocity);
        bus.notify(PropertyId::Stall);
        bus.notify(PropertyId::Velocity);
        assert_eq!(seen.get(), 2);

        bus.remove_observer(id);
        bus.notify(PropertyId::Velocity);
        assert_eq!(seen.get(), 2);
    }
}
