//! Replays a scripted sequence of touches against a small menu of controls.
//!
//! Run with `RUST_LOG=debug` (or `trace`) to watch state changes and event
//! dispatch as the script plays.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tactile::{css, mocha, Color, Point, Size, SpriteNode, TouchId, TouchState};
use tactile_controls::{
    ActionError, Control, ControlDelegate, ControlEvent, ControlEvents, ControlHooks,
    ControlState, ControlStyle, Presentation,
};

const FRAME: f32 = 1.0 / 60.0;

/// Counts activations and refuses to quit twice
#[derive(Default)]
struct Menu {
    plays: Cell<u32>,
    quit_requested: Cell<bool>,
}

impl Menu {
    fn play(&self) -> Result<(), ActionError> {
        self.plays.set(self.plays.get() + 1);
        println!("  menu: play #{}", self.plays.get());
        Ok(())
    }

    fn quit(&self) -> Result<(), ActionError> {
        if self.quit_requested.replace(true) {
            return Err(ActionError::failed("quit already requested"));
        }
        println!("  menu: quitting");
        Ok(())
    }
}

impl ControlDelegate for Menu {
    fn control_value_changed(&self, control: &Control) {
        println!("  delegate: control {} changed", control.tag());
    }
}

/// Prints every event the control reports
struct Tracer;

fn trace_event(_tracer: &Tracer, control: &Control, event: ControlEvent) -> Result<(), ActionError> {
    println!("  control {} -> {event} ({:?})", control.tag(), control.state());
    Ok(())
}

/// Pulses a counter whenever the finger slides back onto the button
struct Wobble {
    count: Rc<Cell<u32>>,
}

impl ControlHooks for Wobble {
    fn drag_enter(&mut self, _control: &Control) {
        self.count.set(self.count.get() + 1);
    }
}

enum Step {
    Down(u64, [f32; 2]),
    Move(u64, [f32; 2]),
    Up(u64, [f32; 2]),
    Cancel(u64),
    Wait(f32),
    DisablePlay,
}

fn button_style(label: &str, tint: Color) -> ControlStyle {
    ControlStyle::default()
        .with_label(label)
        .with_bounds_tolerance(12.0)
        .with_presentation(
            ControlState::Highlighted,
            Presentation::default()
                .with_fill_color(tint)
                .with_label_text(label)
                .with_font_color(mocha::CRUST),
        )
}

fn main() {
    env_logger::init();

    let menu = Rc::new(Menu::default());
    let tracer = Rc::new(Tracer);
    let wobbles = Rc::new(Cell::new(0));

    let play_node = Rc::new(RefCell::new(SpriteNode::new(Size::new(160.0, 48.0))));
    let mut play = Control::new(Size::new(160.0, 48.0))
        .with_tag(1)
        .with_position(Point::new(0.0, 40.0))
        .with_style(button_style("Play", mocha::LAVENDER))
        .with_hooks(Wobble {
            count: wobbles.clone(),
        })
        .with_node(play_node.clone());
    play.add_target(&menu, |menu: &Menu, _, _| menu.play(), ControlEvents::PRIMARY_ACTION);
    play.add_target(&tracer, trace_event, ControlEvents::ALL_EVENTS);
    play.set_delegate(&menu);

    let mut quit = Control::new(Size::new(160.0, 48.0))
        .with_tag(2)
        .with_position(Point::new(0.0, -40.0))
        .with_style(button_style("Quit", mocha::PEACH));
    quit.add_target(&menu, |menu: &Menu, _, _| menu.quit(), ControlEvents::PRIMARY_ACTION);
    quit.add_target(&tracer, trace_event, ControlEvents::TOUCH_DOWN | ControlEvents::PRIMARY_ACTION);

    play.appear_with_color(css::WHITE, 0.1);

    let script = [
        // Tap just outside the sprite but within the tolerance
        Step::Down(1, [86.0, 40.0]),
        Step::Up(1, [86.0, 40.0]),
        Step::Wait(0.2),
        // Slide off and back on before lifting
        Step::Down(2, [0.0, 40.0]),
        Step::Move(2, [0.0, 120.0]),
        Step::Move(2, [0.0, 130.0]),
        Step::Move(2, [10.0, 45.0]),
        Step::Up(2, [10.0, 45.0]),
        // Drag away and give up
        Step::Down(3, [0.0, -40.0]),
        Step::Move(3, [300.0, -40.0]),
        Step::Up(3, [300.0, -40.0]),
        // The system steals the touch
        Step::Down(4, [0.0, 40.0]),
        Step::Cancel(4),
        // Quit twice: the second action reports an error
        Step::Down(5, [0.0, -40.0]),
        Step::Up(5, [0.0, -40.0]),
        Step::Down(6, [0.0, -40.0]),
        Step::Up(6, [0.0, -40.0]),
        // Disable play while a finger is on it
        Step::Down(7, [0.0, 40.0]),
        Step::DisablePlay,
        Step::Up(7, [0.0, 40.0]),
    ];

    let mut input = TouchState::new();
    for step in script {
        input.begin_frame();
        let mut dt = FRAME;
        match step {
            Step::Down(id, at) => input.touch_began(TouchId(id), at.into()),
            Step::Move(id, at) => input.touch_moved(TouchId(id), at.into()),
            Step::Up(id, at) => input.touch_ended(TouchId(id), at.into()),
            Step::Cancel(id) => input.touch_cancelled(TouchId(id)),
            Step::Wait(seconds) => dt = seconds,
            Step::DisablePlay => {
                println!("  disabling control {}", play.tag());
                play.set_enabled(false);
            }
        }

        for touch in input.samples() {
            println!("{:?} {:?} at {:?}", touch.id, touch.phase, touch.location);
            // First control to claim the sample wins
            let _ = play.handle_touch(*touch) || quit.handle_touch(*touch);
        }

        play.update(dt);
        quit.update(dt);
    }

    let node = play_node.borrow();
    println!();
    println!("plays: {}", menu.plays.get());
    println!("wobbles: {}", wobbles.get());
    println!(
        "play node shows {:?} in {:?}",
        node.label().text,
        node.color()
    );
    println!("{play:?}");
    println!("{quit:?}");
}
