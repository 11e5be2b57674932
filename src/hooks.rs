use gloo_timers::callback::{Interval, Timeout};
use level_eta::config::COUNTDOWN_TICK_MS;
use level_eta::{Countdown, SystemClock, Tick};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Holds the text of a form field and its input callback.
#[derive(Clone, PartialEq)]
pub struct FieldInput {
    /// The current text content of the input field.
    pub text: String,
    /// Callback for the input's `oninput` event. Updates the text state.
    pub on_input: Callback<InputEvent>,
}

/// Custom hook to manage the text state of a form field.
#[hook]
pub fn use_field(initial_value: &'static str) -> FieldInput {
    let text_state_handle: UseStateHandle<String> = use_state(|| initial_value.to_string());

    let on_input = {
        let text_setter = text_state_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    FieldInput {
        text: (*text_state_handle).clone(),
        on_input,
    }
}

/// Drive a [`Countdown`] with a one-second interval.
///
/// `run` identifies the calculation; each change drops the previous interval
/// before a new one starts. The interval is also dropped once the countdown
/// completes.
#[hook]
pub fn use_countdown(run: u32, finish_at_ms: Option<f64>) -> Tick {
    let tick = use_state(|| Tick::Idle);

    {
        let tick = tick.clone();
        use_effect_with((run, finish_at_ms), move |&(_, finish_at_ms)| {
            let slot: Rc<RefCell<Option<Interval>>> = Rc::default();

            match finish_at_ms {
                None => tick.set(Tick::Idle),
                Some(finish_at_ms) => {
                    let countdown = Rc::new(RefCell::new(Countdown::new()));
                    countdown.borrow_mut().start(finish_at_ms);

                    let refresh = {
                        let slot = slot.clone();
                        move || {
                            let next = countdown.borrow_mut().tick(&SystemClock);
                            if next == Tick::Completed {
                                // the interval cannot drop itself from inside its own callback
                                let slot = slot.clone();
                                let _ = Timeout::new(0, move || {
                                    slot.borrow_mut().take();
                                })
                                .forget();
                            }
                            tick.set(next);
                        }
                    };

                    refresh();
                    *slot.borrow_mut() = Some(Interval::new(COUNTDOWN_TICK_MS, refresh));
                }
            }

            move || {
                slot.borrow_mut().take();
            }
        });
    }

    *tick
}
