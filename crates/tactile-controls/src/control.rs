//! Touch-driven control
//!
//! [`Control`] is the base for buttons and similar elements in a 2D scene. It
//! turns raw touch samples into the momentary-button lifecycle (touch down,
//! drags across its edge, touch up inside or outside), keeps its displayed
//! presentation in step with its state, and notifies its delegate and
//! registered targets.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use tactile::{hit_test, Color, Point, Size, Touch, TouchId, TouchPhase};

use crate::appearance::Appearance;
use crate::delegate::{self, ControlDelegate, DelegateSlot};
use crate::events::{ControlEvent, ControlEvents};
use crate::hooks::{self, ControlHooks};
use crate::presentation::{ControlStyle, Presentation, RenderNode};
use crate::state::ControlState;
use crate::targets::{ActionResult, DispatchReport, TargetList};

/// The touch currently being followed
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tracking {
    id: TouchId,
    inside: bool,
}

/// A touch-driven control with per-state presentation and target/action dispatch
///
/// # Example
///
/// ```ignore
/// let mut play = Control::new(Size::new(120.0, 44.0))
///     .with_style(ControlStyle::default().with_label("Play").with_bounds_tolerance(12.0));
/// play.add_target(&menu, |menu: &Menu, _, _| menu.start(), ControlEvents::PRIMARY_ACTION);
///
/// for touch in input.samples() {
///     play.handle_touch(*touch);
/// }
/// play.update(dt);
/// ```
pub struct Control {
    tag: u32,
    enabled: bool,
    selected: bool,
    highlighted: bool,
    position: Point,
    size: Size,
    style: ControlStyle,
    tracking: Option<Tracking>,
    last_touch_location: Option<Point>,
    targets: TargetList<Control>,
    delegate: DelegateSlot,
    hooks: Option<Box<dyn ControlHooks>>,
    node: Option<Box<dyn RenderNode>>,
    appearance: Option<Appearance>,
    shown_state: ControlState,
    applied: Option<Presentation>,
}

impl Control {
    /// Create an enabled, unselected, unhighlighted control of the given size
    pub fn new(size: impl Into<Size>) -> Self {
        Self {
            tag: 0,
            enabled: true,
            selected: false,
            highlighted: false,
            position: Point::zero(),
            size: size.into().sanitized(),
            style: ControlStyle::default(),
            tracking: None,
            last_touch_location: None,
            targets: TargetList::new(),
            delegate: DelegateSlot::default(),
            hooks: None,
            node: None,
            appearance: None,
            shown_state: ControlState::Normal,
            applied: None,
        }
    }

    /// Replace the visual configuration
    pub fn with_style(mut self, style: ControlStyle) -> Self {
        self.style = style;
        self.refresh();
        self
    }

    pub fn with_tag(mut self, tag: u32) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_position(mut self, position: impl Into<Point>) -> Self {
        self.set_position(position);
        self
    }

    /// Attach extension hooks, run after every base transition
    pub fn with_hooks(mut self, hooks: impl ControlHooks + 'static) -> Self {
        self.hooks = Some(Box::new(hooks));
        self
    }

    /// Attach the node that shows this control
    pub fn with_node(mut self, node: impl RenderNode + 'static) -> Self {
        self.attach_node(Box::new(node));
        self
    }

    // ---------------------------------------------------------------------
    // Properties
    // ---------------------------------------------------------------------

    pub fn tag(&self) -> u32 {
        self.tag
    }

    pub fn set_tag(&mut self, tag: u32) {
        self.tag = tag;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the control
    ///
    /// Disabling ends any touch in progress: later samples of that touch are
    /// ignored even if the control is re-enabled before it lifts.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            if self.tracking.take().is_some() {
                log::debug!("control {}: disabled mid-touch, dropping it", self.tag);
            }
            self.highlighted = false;
        }
        self.refresh();
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.refresh();
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
        self.refresh();
    }

    /// The state whose presentation is displayed
    pub fn state(&self) -> ControlState {
        ControlState::resolve(self.enabled, self.selected, self.highlighted)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: impl Into<Point>) {
        self.position = position.into();
        self.sync_geometry();
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: impl Into<Size>) {
        self.size = size.into().sanitized();
        self.sync_geometry();
    }

    pub fn bounds_tolerance(&self) -> f32 {
        self.style.bounds_tolerance
    }

    /// Slack added to every edge of the hit-test region; negative values shrink it
    pub fn set_bounds_tolerance(&mut self, tolerance: f32) {
        if tolerance.is_finite() {
            self.style.bounds_tolerance = tolerance;
        }
    }

    pub fn style(&self) -> &ControlStyle {
        &self.style
    }

    /// Whether `point` (parent space) falls inside the tolerant bounds
    pub fn contains_point(&self, point: Point) -> bool {
        hit_test(self.position, self.size, self.style.bounds_tolerance, point).inside
    }

    /// Whether a touch is currently being followed
    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Location of the most recent touch sample this control accepted
    pub fn last_touch_location(&self) -> Option<Point> {
        self.last_touch_location
    }

    // ---------------------------------------------------------------------
    // Presentation
    // ---------------------------------------------------------------------

    /// Presentation of the current state
    pub fn presentation(&self) -> &Presentation {
        self.style.presentations.get(self.state())
    }

    /// Presentation configured for `state`
    pub fn presentation_for(&self, state: ControlState) -> &Presentation {
        self.style.presentations.get(state)
    }

    pub fn set_presentation(&mut self, state: ControlState, presentation: Presentation) {
        self.style.presentations.set(state, presentation);
        self.refresh();
    }

    pub fn fill_color(&self) -> Color {
        self.presentation().fill_color
    }

    pub fn font_size(&self) -> f32 {
        self.presentation().font_size
    }

    pub fn label_text(&self) -> &str {
        &self.presentation().label_text
    }

    pub fn font_color(&self) -> Color {
        self.presentation().font_color
    }

    pub fn set_fill_color(&mut self, state: ControlState, color: Color) {
        self.style.presentations[state].fill_color = color;
        self.refresh();
    }

    pub fn set_font_size(&mut self, state: ControlState, font_size: f32) {
        self.style.presentations[state].font_size = font_size;
        self.refresh();
    }

    pub fn set_label_text(&mut self, state: ControlState, text: impl Into<String>) {
        self.style.presentations[state].label_text = text.into();
        self.refresh();
    }

    pub fn set_font_color(&mut self, state: ControlState, color: Color) {
        self.style.presentations[state].font_color = color;
        self.refresh();
    }

    /// What the node should be showing right now
    ///
    /// Equal to [`Control::presentation`] except while an appearance fade is
    /// running, which overrides the fill color only.
    pub fn displayed_presentation(&self) -> Presentation {
        let mut shown = self.presentation().clone();
        if let Some(appearance) = &self.appearance {
            shown.fill_color = appearance.fill(shown.fill_color);
        }
        shown
    }

    /// Attach the node that shows this control and push the current look to it
    pub fn attach_node(&mut self, mut node: Box<dyn RenderNode>) {
        node.set_geometry(self.position, self.size);
        let shown = self.displayed_presentation();
        node.apply_presentation(&shown);
        self.applied = Some(shown);
        self.node = Some(node);
    }

    pub fn node(&self) -> Option<&dyn RenderNode> {
        self.node.as_deref()
    }

    /// Detach and return the node, if any
    pub fn detach_node(&mut self) -> Option<Box<dyn RenderNode>> {
        self.applied = None;
        self.node.take()
    }

    // ---------------------------------------------------------------------
    // Appearance
    // ---------------------------------------------------------------------

    /// Show `color` now, then fade to the state's fill once `delay` seconds pass
    ///
    /// Runs on [`Control::update`] and never blocks or delays touch handling.
    /// A second call replaces the pending one.
    pub fn appear_with_color(&mut self, color: Color, delay: f32) {
        self.appearance = Some(Appearance::new(
            color,
            delay,
            self.style.appear_transition,
        ));
        self.refresh();
    }

    /// Drop a pending or running appearance fade
    pub fn cancel_appearance(&mut self) {
        if self.appearance.take().is_some() {
            self.refresh();
        }
    }

    pub fn is_appearing(&self) -> bool {
        self.appearance.is_some()
    }

    /// Advance time-based presentation by `dt` seconds; call once per frame
    pub fn update(&mut self, dt: f32) {
        let Some(appearance) = self.appearance.as_mut() else {
            return;
        };
        if appearance.advance(dt) {
            self.appearance = None;
        }
        self.refresh();
    }

    // ---------------------------------------------------------------------
    // Targets and delegate
    // ---------------------------------------------------------------------

    /// Call `action` on `target` for every event in `events`
    ///
    /// The control keeps only a weak handle: dropping `target` silently ends
    /// its registrations.
    pub fn add_target<T, F>(&mut self, target: &Rc<T>, action: F, events: ControlEvents)
    where
        T: 'static,
        F: Fn(&T, &Control, ControlEvent) -> ActionResult + 'static,
    {
        self.targets.add(target, action, events);
    }

    /// Remove every registration of `target`; unknown targets are ignored
    pub fn remove_target<T: ?Sized>(&mut self, target: &Rc<T>) {
        let removed = self.targets.remove(target);
        if removed > 0 {
            log::trace!("control {}: removed {removed} registration(s)", self.tag);
        }
    }

    /// Number of live target registrations
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Union of the events `target` is registered for
    pub fn events_for_target<T: ?Sized>(&self, target: &Rc<T>) -> ControlEvents {
        self.targets.events_for(target)
    }

    /// Union of the events any live target is registered for
    pub fn all_target_events(&self) -> ControlEvents {
        self.targets.all_events()
    }

    /// Set the delegate (held weakly)
    pub fn set_delegate<D: ControlDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        self.delegate.set(delegate);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate.clear();
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate.is_set()
    }

    /// Deliver `event` to registered targets without any state change
    ///
    /// Targets dropped since registering are purged afterwards, whatever
    /// events they were registered for.
    pub fn send_actions(&mut self, event: ControlEvent) -> DispatchReport {
        let report = self.targets.dispatch(self, event);
        self.purge_dead_targets();
        report
    }

    fn purge_dead_targets(&mut self) {
        if self.targets.has_dead() {
            let purged = self.targets.purge_dead();
            log::trace!("control {}: purged {purged} dead registration(s)", self.tag);
        }
    }

    // ---------------------------------------------------------------------
    // Touch input
    // ---------------------------------------------------------------------

    /// Feed one touch sample (parent space); returns whether the control used it
    pub fn handle_touch(&mut self, touch: Touch) -> bool {
        match touch.phase {
            TouchPhase::Began => self.touch_began(touch),
            TouchPhase::Moved => self.touch_moved(touch),
            TouchPhase::Ended => self.touch_ended(touch),
            TouchPhase::Cancelled => self.touch_cancelled(touch),
        }
    }

    fn touch_began(&mut self, touch: Touch) -> bool {
        if !self.enabled || self.tracking.is_some() || !self.contains_point(touch.location) {
            return false;
        }
        self.tracking = Some(Tracking {
            id: touch.id,
            inside: true,
        });
        self.last_touch_location = Some(touch.location);
        self.touch_down();
        true
    }

    fn touch_moved(&mut self, touch: Touch) -> bool {
        let Some(tracking) = self.tracked(touch.id) else {
            return false;
        };
        self.last_touch_location = Some(touch.location);
        let inside = self.contains_point(touch.location);
        if let Some(t) = self.tracking.as_mut() {
            t.inside = inside;
        }

        self.drag();
        match (tracking.inside, inside) {
            (false, true) => self.drag_enter(),
            (true, true) => self.drag_inside(),
            (true, false) => self.drag_exit(),
            (false, false) => self.drag_outside(),
        }
        true
    }

    fn touch_ended(&mut self, touch: Touch) -> bool {
        if self.tracked(touch.id).is_none() {
            return false;
        }
        self.last_touch_location = Some(touch.location);
        if self.contains_point(touch.location) {
            self.touch_up_inside();
        } else {
            self.touch_up_outside();
        }
        true
    }

    fn touch_cancelled(&mut self, touch: Touch) -> bool {
        if self.tracked(touch.id).is_none() {
            return false;
        }
        self.touch_cancel();
        true
    }

    fn tracked(&self, id: TouchId) -> Option<Tracking> {
        self.tracking.filter(|t| t.id == id)
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    //
    // Each method runs the base transition, then the hook, then notifies
    // targets. They can be called directly to drive the control without touch
    // input; all of them do nothing while the control is disabled.
    // ---------------------------------------------------------------------

    /// A touch went down inside: highlight
    pub fn touch_down(&mut self) {
        self.fire(ControlEvent::TouchDown);
    }

    /// A tracked touch moved
    pub fn drag(&mut self) {
        self.fire(ControlEvent::Drag);
    }

    /// A tracked touch crossed into the tolerant bounds: highlight again
    pub fn drag_enter(&mut self) {
        self.fire(ControlEvent::DragEnter);
    }

    /// A tracked touch moved within the tolerant bounds
    pub fn drag_inside(&mut self) {
        self.fire(ControlEvent::DragInside);
    }

    /// A tracked touch left the tolerant bounds: drop the highlight
    pub fn drag_exit(&mut self) {
        self.fire(ControlEvent::DragExit);
    }

    /// A tracked touch moved outside the tolerant bounds
    pub fn drag_outside(&mut self) {
        self.fire(ControlEvent::DragOutside);
    }

    /// Activation: the touch lifted inside
    ///
    /// Notifies the delegate once, then walks the targets in registration
    /// order, giving each the `TOUCH_UP_INSIDE` and `VALUE_CHANGED` events its
    /// mask asks for. Failures are logged.
    pub fn touch_up_inside(&mut self) {
        if !self.transition(ControlEvent::TouchUpInside) {
            return;
        }
        log::debug!("control {}: value changed", self.tag);

        if let Some(listener) = self.delegate.upgrade() {
            if let Err(err) = delegate::notify(listener.as_ref(), self) {
                log::warn!("control {}: delegate {err}", self.tag);
            }
        }
        self.targets.dispatch_each(
            self,
            &[ControlEvent::TouchUpInside, ControlEvent::ValueChanged],
        );
        self.purge_dead_targets();
    }

    /// The touch lifted outside: no activation
    pub fn touch_up_outside(&mut self) {
        self.fire(ControlEvent::TouchUpOutside);
    }

    /// The host cancelled the touch: no activation
    pub fn touch_cancel(&mut self) {
        self.fire(ControlEvent::TouchCancel);
    }

    fn base_transition(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::TouchDown | ControlEvent::DragEnter => self.highlighted = true,
            ControlEvent::DragExit => self.highlighted = false,
            ControlEvent::TouchUpInside
            | ControlEvent::TouchUpOutside
            | ControlEvent::TouchCancel => {
                self.highlighted = false;
                self.tracking = None;
            }
            ControlEvent::Drag
            | ControlEvent::DragInside
            | ControlEvent::DragOutside
            | ControlEvent::ValueChanged => {}
        }
    }

    /// Base transition, hook, targets
    fn fire(&mut self, event: ControlEvent) {
        if self.transition(event) {
            self.send_actions(event);
        }
    }

    /// Base transition then hook; `false` when the control is disabled
    fn transition(&mut self, event: ControlEvent) -> bool {
        if !self.enabled {
            return false;
        }
        log::trace!("control {}: {event}", self.tag);

        self.base_transition(event);
        self.refresh();

        if let Some(mut hooks) = self.hooks.take() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                hooks::run_hook(hooks.as_mut(), event, self)
            }));
            // Put the hooks back before a panic leaves the control
            self.hooks = Some(hooks);
            if let Err(payload) = outcome {
                panic::resume_unwind(payload);
            }
        }
        true
    }

    // ---------------------------------------------------------------------
    // Node sync
    // ---------------------------------------------------------------------

    /// Push the displayed presentation to the node if it changed
    fn refresh(&mut self) {
        let state = self.state();
        if state != self.shown_state {
            log::debug!(
                "control {}: {:?} -> {:?}",
                self.tag,
                self.shown_state,
                state
            );
            self.shown_state = state;
        }

        if self.node.is_none() {
            return;
        }
        let shown = self.displayed_presentation();
        if self.applied.as_ref() == Some(&shown) {
            return;
        }
        if let Some(node) = self.node.as_mut() {
            node.apply_presentation(&shown);
        }
        self.applied = Some(shown);
    }

    fn sync_geometry(&mut self) {
        if let Some(node) = self.node.as_mut() {
            node.set_geometry(self.position, self.size);
        }
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("tag", &self.tag)
            .field("state", &self.state())
            .field("enabled", &self.enabled)
            .field("selected", &self.selected)
            .field("highlighted", &self.highlighted)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("bounds_tolerance", &self.style.bounds_tolerance)
            .field("tracking", &self.tracking.is_some())
            .field("targets", &self.targets.len())
            .finish_non_exhaustive()
    }
}
