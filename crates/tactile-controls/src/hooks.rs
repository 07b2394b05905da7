//! Extension points for custom controls
//!
//! Custom controls add behaviour by implementing [`ControlHooks`] and attaching
//! it with `Control::with_hooks`. The control always performs its own state
//! transition first and only then calls the matching hook, so an extension can
//! never skip or reorder the base behaviour.

use crate::events::ControlEvent;
use crate::Control;

/// Per-event callbacks run after the control's base transition
///
/// Every method defaults to doing nothing. Hooks see the control after the
/// transition (for example `is_highlighted()` is already `true` inside
/// `touch_down`).
#[allow(unused_variables)]
pub trait ControlHooks {
    fn touch_down(&mut self, control: &Control) {}

    fn drag(&mut self, control: &Control) {}

    fn drag_enter(&mut self, control: &Control) {}

    fn drag_inside(&mut self, control: &Control) {}

    fn drag_exit(&mut self, control: &Control) {}

    fn drag_outside(&mut self, control: &Control) {}

    fn touch_up_inside(&mut self, control: &Control) {}

    fn touch_up_outside(&mut self, control: &Control) {}

    fn touch_cancel(&mut self, control: &Control) {}
}

/// Route `event` to the matching hook method
pub(crate) fn run_hook(hooks: &mut dyn ControlHooks, event: ControlEvent, control: &Control) {
    match event {
        ControlEvent::TouchDown => hooks.touch_down(control),
        ControlEvent::Drag => hooks.drag(control),
        ControlEvent::DragEnter => hooks.drag_enter(control),
        ControlEvent::DragInside => hooks.drag_inside(control),
        ControlEvent::DragExit => hooks.drag_exit(control),
        ControlEvent::DragOutside => hooks.drag_outside(control),
        ControlEvent::TouchUpInside => hooks.touch_up_inside(control),
        ControlEvent::TouchUpOutside => hooks.touch_up_outside(control),
        ControlEvent::TouchCancel => hooks.touch_cancel(control),
        // Value changes are reported to the delegate and observers, not hooks
        ControlEvent::ValueChanged => {}
    }
}
