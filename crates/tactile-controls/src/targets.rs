//! Target/action registrations
//!
//! A control keeps a list of `(target, action, events)` registrations without
//! owning the targets: each entry holds a [`Weak`] handle that is upgraded right
//! before the action runs. Entries whose target is gone are skipped and then
//! purged. One failing action never stops delivery to the ones after it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::events::{ControlEvent, ControlEvents};

/// Failure reported by a single action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action returned an error
    #[error("action failed: {0}")]
    Failed(String),
    /// The action panicked; the payload message is kept when it is a string
    #[error("action panicked: {0}")]
    Panicked(String),
}

impl ActionError {
    pub fn failed(message: impl Into<String>) -> Self {
        ActionError::Failed(message.into())
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        ActionError::Panicked(message)
    }
}

/// What every action returns
pub type ActionResult = Result<(), ActionError>;

/// Identity of a registered target: the address of its shared allocation
///
/// Stable for as long as any registration holds a weak handle to it, because
/// the allocation is not freed while weak handles exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(usize);

impl TargetId {
    pub fn of<T: ?Sized>(target: &Rc<T>) -> Self {
        TargetId(Rc::as_ptr(target) as *const () as usize)
    }
}

enum Delivery {
    Delivered(ActionResult),
    TargetGone,
}

type Invoke<C> = Box<dyn Fn(&C, ControlEvent) -> Delivery>;

struct Registration<C> {
    target: TargetId,
    events: ControlEvents,
    alive: Weak<dyn Any>,
    invoke: Invoke<C>,
}

/// Outcome of delivering one event to the registration list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub event: ControlEvent,
    /// Actions that ran (successfully or not)
    pub delivered: usize,
    /// Matching registrations whose target no longer exists
    pub skipped: usize,
    /// Actions that returned an error or panicked
    pub failures: Vec<(TargetId, ActionError)>,
}

impl DispatchReport {
    fn new(event: ControlEvent) -> Self {
        Self {
            event,
            delivered: 0,
            skipped: 0,
            failures: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered list of weak target/action registrations
///
/// `C` is the type passed to actions as the event source (the control).
pub struct TargetList<C> {
    registrations: Vec<Registration<C>>,
}

impl<C> TargetList<C> {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Register `action` on `target` for every event in `events`
    ///
    /// A target may be registered any number of times. An empty mask is ignored.
    /// Registrations of targets that have since been dropped are purged first.
    pub fn add<T, F>(&mut self, target: &Rc<T>, action: F, events: ControlEvents)
    where
        T: 'static,
        F: Fn(&T, &C, ControlEvent) -> ActionResult + 'static,
    {
        self.purge_dead();
        if events.is_empty() {
            return;
        }

        let weak = Rc::downgrade(target);
        let alive: Weak<dyn Any> = weak.clone();
        let invoke: Invoke<C> = Box::new(move |source, event| match weak.upgrade() {
            Some(target) => Delivery::Delivered(action(&target, source, event)),
            None => Delivery::TargetGone,
        });

        self.registrations.push(Registration {
            target: TargetId::of(target),
            events,
            alive,
            invoke,
        });
    }

    /// Drop every registration of `target`, whatever its mask
    ///
    /// Returns how many registrations were removed; unknown targets remove none.
    pub fn remove<T: ?Sized>(&mut self, target: &Rc<T>) -> usize {
        self.remove_id(TargetId::of(target))
    }

    pub fn remove_id(&mut self, id: TargetId) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.target != id);
        before - self.registrations.len()
    }

    /// Deliver `event` to matching registrations in registration order
    pub fn dispatch(&self, source: &C, event: ControlEvent) -> DispatchReport {
        let mut reports = self.dispatch_each(source, &[event]);
        reports.pop().unwrap_or_else(|| DispatchReport::new(event))
    }

    /// Deliver several events in a single pass over the registrations
    ///
    /// Registrations are visited in registration order; each one receives the
    /// events of `events` its mask contains, in the order given. Returns one
    /// report per event, in the same order.
    pub fn dispatch_each(&self, source: &C, events: &[ControlEvent]) -> Vec<DispatchReport> {
        let mut reports: Vec<DispatchReport> =
            events.iter().map(|&event| DispatchReport::new(event)).collect();

        for registration in &self.registrations {
            for (&event, report) in events.iter().zip(reports.iter_mut()) {
                if registration.events.has(event) {
                    deliver(registration, source, event, report);
                }
            }
        }

        reports
    }

    /// Whether any registration's target has been dropped
    pub fn has_dead(&self) -> bool {
        self.registrations
            .iter()
            .any(|r| r.alive.strong_count() == 0)
    }

    /// Forget registrations whose target has been dropped
    pub fn purge_dead(&mut self) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.alive.strong_count() > 0);
        before - self.registrations.len()
    }

    /// Number of live registrations
    pub fn len(&self) -> usize {
        self.registrations
            .iter()
            .filter(|r| r.alive.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Union of the masks registered for `target`
    pub fn events_for<T: ?Sized>(&self, target: &Rc<T>) -> ControlEvents {
        let id = TargetId::of(target);
        self.registrations
            .iter()
            .filter(|r| r.target == id)
            .fold(ControlEvents::NONE, |acc, r| acc | r.events)
    }

    /// Union of every live registration's mask
    pub fn all_events(&self) -> ControlEvents {
        self.registrations
            .iter()
            .filter(|r| r.alive.strong_count() > 0)
            .fold(ControlEvents::NONE, |acc, r| acc | r.events)
    }
}

fn deliver<C>(
    registration: &Registration<C>,
    source: &C,
    event: ControlEvent,
    report: &mut DispatchReport,
) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| (registration.invoke)(source, event)));

    match outcome {
        Ok(Delivery::Delivered(Ok(()))) => report.delivered += 1,
        Ok(Delivery::Delivered(Err(err))) => {
            report.delivered += 1;
            log::warn!("{event} action on {:?} failed: {err}", registration.target);
            report.failures.push((registration.target, err));
        }
        Ok(Delivery::TargetGone) => report.skipped += 1,
        Err(payload) => {
            let err = ActionError::from_panic(payload);
            report.delivered += 1;
            log::warn!("{event} action on {:?} panicked: {err}", registration.target);
            report.failures.push((registration.target, err));
        }
    }
}

impl<C> Default for TargetList<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<ControlEvent>>,
    }

    fn record(recorder: &Recorder, _source: &(), event: ControlEvent) -> ActionResult {
        recorder.calls.borrow_mut().push(event);
        Ok(())
    }

    #[test]
    fn test_dispatch_respects_masks() {
        let mut list = TargetList::<()>::new();
        let recorder = Rc::new(Recorder::default());
        list.add(&recorder, record, ControlEvents::TOUCH_DOWN | ControlEvents::DRAG);

        list.dispatch(&(), ControlEvent::TouchDown);
        list.dispatch(&(), ControlEvent::TouchUpInside);
        list.dispatch(&(), ControlEvent::Drag);

        assert_eq!(
            *recorder.calls.borrow(),
            vec![ControlEvent::TouchDown, ControlEvent::Drag]
        );
    }

    #[test]
    fn test_dispatch_runs_in_registration_order() {
        let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let mut list = TargetList::<()>::new();
        for label in ["a", "b", "c"] {
            list.add(
                &order,
                move |order: &RefCell<Vec<&'static str>>, _: &(), _| {
                    order.borrow_mut().push(label);
                    Ok(())
                },
                ControlEvents::ALL_EVENTS,
            );
        }

        list.dispatch(&(), ControlEvent::ValueChanged);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_drops_every_mask() {
        let mut list = TargetList::<()>::new();
        let recorder = Rc::new(Recorder::default());
        let other = Rc::new(Recorder::default());
        list.add(&recorder, record, ControlEvents::TOUCH_DOWN);
        list.add(&recorder, record, ControlEvents::VALUE_CHANGED);
        list.add(&other, record, ControlEvents::TOUCH_DOWN);

        assert_eq!(list.remove(&recorder), 2);
        assert_eq!(list.events_for(&recorder), ControlEvents::NONE);

        list.dispatch(&(), ControlEvent::TouchDown);
        list.dispatch(&(), ControlEvent::ValueChanged);
        assert!(recorder.calls.borrow().is_empty());
        assert_eq!(other.calls.borrow().len(), 1);
    }

    #[test]
    fn test_remove_unknown_target_is_noop() {
        let mut list = TargetList::<()>::new();
        let stranger = Rc::new(0u8);
        assert_eq!(list.remove(&stranger), 0);
    }

    #[test]
    fn test_dropped_target_is_skipped_then_purged() {
        let mut list = TargetList::<()>::new();
        let recorder = Rc::new(Recorder::default());
        list.add(&recorder, record, ControlEvents::TOUCH_DOWN);
        drop(recorder);

        let report = list.dispatch(&(), ControlEvent::TouchDown);
        assert_eq!(report.delivered, 0);
        assert_eq!(report.skipped, 1);
        assert!(list.is_empty());

        assert_eq!(list.purge_dead(), 1);
        assert_eq!(list.purge_dead(), 0);
    }

    #[test]
    fn test_failures_are_isolated() {
        let mut list = TargetList::<()>::new();
        let counter = Rc::new(Cell::new(0));

        list.add(
            &counter,
            |_: &Cell<i32>, _: &(), _| Err(ActionError::failed("nope")),
            ControlEvents::VALUE_CHANGED,
        );
        list.add(
            &counter,
            |_: &Cell<i32>, _: &(), _| panic!("boom"),
            ControlEvents::VALUE_CHANGED,
        );
        list.add(
            &counter,
            |c: &Cell<i32>, _: &(), _| {
                c.set(c.get() + 1);
                Ok(())
            },
            ControlEvents::VALUE_CHANGED,
        );

        let report = list.dispatch(&(), ControlEvent::ValueChanged);
        assert_eq!(counter.get(), 1);
        assert_eq!(report.delivered, 3);
        assert_eq!(
            report.failures.iter().map(|(_, e)| e.clone()).collect::<Vec<_>>(),
            vec![
                ActionError::Failed("nope".into()),
                ActionError::Panicked("boom".into()),
            ]
        );
    }

    #[test]
    fn test_dispatch_each_walks_registrations_once() {
        let order: Rc<RefCell<Vec<(&'static str, ControlEvent)>>> =
            Rc::new(RefCell::new(Vec::new()));
        let mut list = TargetList::<()>::new();
        let masks = [
            ("changes", ControlEvents::VALUE_CHANGED),
            ("taps", ControlEvents::PRIMARY_ACTION),
            ("both", ControlEvents::PRIMARY_ACTION | ControlEvents::VALUE_CHANGED),
        ];
        for (label, events) in masks {
            list.add(
                &order,
                move |order: &RefCell<Vec<(&'static str, ControlEvent)>>, _: &(), event| {
                    order.borrow_mut().push((label, event));
                    Ok(())
                },
                events,
            );
        }

        let reports = list.dispatch_each(
            &(),
            &[ControlEvent::TouchUpInside, ControlEvent::ValueChanged],
        );

        assert_eq!(
            *order.borrow(),
            vec![
                ("changes", ControlEvent::ValueChanged),
                ("taps", ControlEvent::TouchUpInside),
                ("both", ControlEvent::TouchUpInside),
                ("both", ControlEvent::ValueChanged),
            ]
        );
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].event, ControlEvent::TouchUpInside);
        assert_eq!(reports[0].delivered, 2);
        assert_eq!(reports[1].delivered, 2);
    }

    #[test]
    fn test_add_purges_dropped_targets() {
        let mut list = TargetList::<()>::new();
        for _ in 0..3 {
            let gone = Rc::new(Recorder::default());
            list.add(&gone, record, ControlEvents::TOUCH_CANCEL);
        }
        assert!(list.has_dead());

        let keeper = Rc::new(Recorder::default());
        list.add(&keeper, record, ControlEvents::TOUCH_DOWN);
        assert!(!list.has_dead());
        assert_eq!(list.purge_dead(), 0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_empty_mask_is_ignored() {
        let mut list = TargetList::<()>::new();
        let recorder = Rc::new(Recorder::default());
        list.add(&recorder, record, ControlEvents::NONE);
        assert!(list.is_empty());
    }
}
