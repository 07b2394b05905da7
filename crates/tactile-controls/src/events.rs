//! Control events and event masks
//!
//! [`ControlEvent`] names one thing that happened to a control. Observers
//! subscribe with a [`ControlEvents`] mask, a set of events combined with `|`.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// A single event raised by a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// A touch began inside the tolerant bounds
    TouchDown,
    /// A tracked touch moved (anywhere)
    Drag,
    /// A tracked touch moved from outside to inside
    DragEnter,
    /// A tracked touch moved while staying inside
    DragInside,
    /// A tracked touch moved from inside to outside
    DragExit,
    /// A tracked touch moved while staying outside
    DragOutside,
    /// A tracked touch lifted inside; the activation event
    TouchUpInside,
    /// A tracked touch lifted outside
    TouchUpOutside,
    /// The host cancelled a tracked touch
    TouchCancel,
    /// The control's value was confirmed
    ValueChanged,
}

impl ControlEvent {
    /// Every event, in bit order
    pub const ALL: [ControlEvent; 10] = [
        ControlEvent::TouchDown,
        ControlEvent::Drag,
        ControlEvent::DragEnter,
        ControlEvent::DragInside,
        ControlEvent::DragExit,
        ControlEvent::DragOutside,
        ControlEvent::TouchUpInside,
        ControlEvent::TouchUpOutside,
        ControlEvent::TouchCancel,
        ControlEvent::ValueChanged,
    ];

    /// The single-bit mask for this event
    pub const fn mask(self) -> ControlEvents {
        ControlEvents(1 << self as u32)
    }

    pub const fn name(self) -> &'static str {
        match self {
            ControlEvent::TouchDown => "touch_down",
            ControlEvent::Drag => "drag",
            ControlEvent::DragEnter => "drag_enter",
            ControlEvent::DragInside => "drag_inside",
            ControlEvent::DragExit => "drag_exit",
            ControlEvent::DragOutside => "drag_outside",
            ControlEvent::TouchUpInside => "touch_up_inside",
            ControlEvent::TouchUpOutside => "touch_up_outside",
            ControlEvent::TouchCancel => "touch_cancel",
            ControlEvent::ValueChanged => "value_changed",
        }
    }
}

impl fmt::Display for ControlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of [`ControlEvent`]s
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ControlEvents(u32);

impl ControlEvents {
    pub const NONE: Self = Self(0);
    pub const TOUCH_DOWN: Self = ControlEvent::TouchDown.mask();
    pub const DRAG: Self = ControlEvent::Drag.mask();
    pub const DRAG_ENTER: Self = ControlEvent::DragEnter.mask();
    pub const DRAG_INSIDE: Self = ControlEvent::DragInside.mask();
    pub const DRAG_EXIT: Self = ControlEvent::DragExit.mask();
    pub const DRAG_OUTSIDE: Self = ControlEvent::DragOutside.mask();
    pub const TOUCH_UP_INSIDE: Self = ControlEvent::TouchUpInside.mask();
    pub const TOUCH_UP_OUTSIDE: Self = ControlEvent::TouchUpOutside.mask();
    pub const TOUCH_CANCEL: Self = ControlEvent::TouchCancel.mask();
    pub const VALUE_CHANGED: Self = ControlEvent::ValueChanged.mask();

    /// Confirmed activation
    pub const PRIMARY_ACTION: Self = Self::TOUCH_UP_INSIDE;

    pub const ALL_DRAG_EVENTS: Self = Self(
        Self::DRAG.0
            | Self::DRAG_ENTER.0
            | Self::DRAG_INSIDE.0
            | Self::DRAG_EXIT.0
            | Self::DRAG_OUTSIDE.0,
    );

    pub const ALL_TOUCH_EVENTS: Self = Self(
        Self::TOUCH_DOWN.0
            | Self::ALL_DRAG_EVENTS.0
            | Self::TOUCH_UP_INSIDE.0
            | Self::TOUCH_UP_OUTSIDE.0
            | Self::TOUCH_CANCEL.0,
    );

    pub const ALL_EVENTS: Self = Self(Self::ALL_TOUCH_EVENTS.0 | Self::VALUE_CHANGED.0);

    /// Raw bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build from raw bits, dropping unknown ones
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL_EVENTS.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every event in `other` is in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether `self` and `other` share at least one event
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn has(self, event: ControlEvent) -> bool {
        self.contains(event.mask())
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// The individual events in this set, in bit order
    pub fn iter(self) -> impl Iterator<Item = ControlEvent> {
        ControlEvent::ALL.into_iter().filter(move |e| self.has(*e))
    }
}

impl From<ControlEvent> for ControlEvents {
    fn from(event: ControlEvent) -> Self {
        event.mask()
    }
}

impl BitOr for ControlEvents {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ControlEvents {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ControlEvents {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for ControlEvents {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & Self::ALL_EVENTS.0)
    }
}

impl fmt::Debug for ControlEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("ControlEvents(NONE)");
        }
        f.write_str("ControlEvents(")?;
        for (i, event) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(event.name())?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_are_distinct_bits() {
        let mut seen = ControlEvents::NONE;
        for event in ControlEvent::ALL {
            assert!(!seen.intersects(event.mask()), "{event} reuses a bit");
            seen |= event.mask();
        }
        assert_eq!(seen, ControlEvents::ALL_EVENTS);
    }

    #[test]
    fn test_aggregates() {
        assert!(ControlEvents::ALL_TOUCH_EVENTS.contains(ControlEvents::ALL_DRAG_EVENTS));
        assert!(!ControlEvents::ALL_TOUCH_EVENTS.has(ControlEvent::ValueChanged));
        assert_eq!(ControlEvents::PRIMARY_ACTION, ControlEvents::TOUCH_UP_INSIDE);

        let drags: Vec<ControlEvent> = ControlEvents::ALL_DRAG_EVENTS.iter().collect();
        assert_eq!(
            drags,
            vec![
                ControlEvent::Drag,
                ControlEvent::DragEnter,
                ControlEvent::DragInside,
                ControlEvent::DragExit,
                ControlEvent::DragOutside,
            ]
        );
    }

    #[test]
    fn test_insert_remove_not() {
        let mut mask = ControlEvents::TOUCH_DOWN | ControlEvents::DRAG_EXIT;
        mask.remove(ControlEvents::TOUCH_DOWN);
        assert_eq!(mask, ControlEvents::DRAG_EXIT);
        mask.insert(ControlEvents::VALUE_CHANGED);
        assert_eq!(mask.iter().count(), 2);

        let inverse = !mask;
        assert!(!inverse.intersects(mask));
        assert_eq!(inverse | mask, ControlEvents::ALL_EVENTS);
    }

    #[test]
    fn test_from_bits_truncate_drops_unknown_bits() {
        let mask = ControlEvents::from_bits_truncate(u32::MAX);
        assert_eq!(mask, ControlEvents::ALL_EVENTS);
    }

    #[test]
    fn test_debug_lists_names() {
        let mask = ControlEvents::TOUCH_DOWN | ControlEvents::VALUE_CHANGED;
        assert_eq!(
            format!("{mask:?}"),
            "ControlEvents(touch_down | value_changed)"
        );
    }
}
