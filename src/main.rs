//! Main module for the Level ETA application using Yew.
//! Wires UI components, state hooks, and side-effect logic.

use level_eta::{
    calculate,
    config::{DEFAULT_ACCEL_COUNT, EXP_TABLE_URL},
    stats::{fetch_visit_counts, VisitCounts},
    utils::{fields, format_exp, FormText},
    CalcError,
    CalculationResult,
    ExperienceTable,
    Outcome,
    Projection,
    SystemClock,
};
use log::{error, info, warn};
use std::rc::Rc;
use yew::prelude::*;

mod components;
mod hooks;

use components::{NumberField, ResultPanel, StatsPanel, TableInfo};
use hooks::{use_countdown, use_field};

/// Last successful calculation and the completion time fixed for it.
#[derive(Clone, PartialEq)]
struct Shown {
    result: Rc<CalculationResult>,
    projection: Projection,
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring state, effects, and UI elements.
#[function_component(Main)]
fn main_component() -> Html {
    let table = use_state(|| None::<Rc<ExperienceTable>>);
    let load_error = use_state(|| None::<String>);
    let visit_counts = use_state(|| None::<VisitCounts>);

    let current_level = use_field("");
    let current_exp = use_field("");
    let target_level = use_field("");
    let exp_per_hour = use_field("");
    let daily_accel = use_field(DEFAULT_ACCEL_COUNT);
    let stone_accel = use_field(DEFAULT_ACCEL_COUNT);

    let shown = use_state(|| None::<Shown>);
    let error_message = use_state(|| None::<String>);
    // Bumped on every successful calculation to restart the countdown
    let run = use_state(|| 0u32);

    let tick = use_countdown(*run, (*shown).as_ref().map(|s| s.projection.finish_at_ms));

    // Load the experience table on mount; the button stays disabled until it succeeds
    {
        let table = table.clone();
        let load_error = load_error.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match ExperienceTable::load(EXP_TABLE_URL).await {
                    Ok(loaded) => table.set(Some(Rc::new(loaded))),
                    Err(e) => {
                        error!("Initialization failed: {}", e);
                        load_error.set(Some(e.to_string()));
                    }
                }
            });
        });
    }

    // Visit counters, independent of the table load
    {
        let visit_counts = visit_counts.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                visit_counts.set(Some(fetch_visit_counts().await));
            });
        });
    }

    let onsubmit = {
        let table = table.clone();
        let shown = shown.clone();
        let error_message = error_message.clone();
        let run = run.clone();
        let form = FormText {
            current_level: current_level.text.clone(),
            current_exp: current_exp.text.clone(),
            target_level: target_level.text.clone(),
            exp_per_hour: exp_per_hour.text.clone(),
            daily_accel: daily_accel.text.clone(),
            stone_accel: stone_accel.text.clone(),
        };
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(table) = (*table).clone() else {
                error_message.set(Some("Experience data is not loaded yet".to_string()));
                return;
            };

            let outcome = form
                .parse()
                .map_err(CalcError::from)
                .and_then(|inputs| calculate(&table, &inputs));

            match outcome {
                Ok(Outcome::Estimate(result)) => {
                    let projection = Projection::starting_now(&SystemClock, result.seconds);
                    info!(
                        "Estimate: {} exp remaining, {:.0} s",
                        format_exp(result.remaining_exp),
                        result.seconds
                    );
                    shown.set(Some(Shown {
                        result: Rc::new(result),
                        projection,
                    }));
                    run.set(run.wrapping_add(1));
                    error_message.set(None);
                }
                Ok(Outcome::AlreadyReached { surplus }) => {
                    info!("Target already reached ({} exp to spare)", format_exp(surplus));
                    error_message.set(Some("Target level already reached".to_string()));
                }
                Err(err) => {
                    warn!("Calculation rejected: {}", err);
                    error_message.set(Some(err.to_string()));
                }
            }
        })
    };

    html! {
        <div class="container">
            <h1>{ "Level ETA Calculator" }</h1>

            <TableInfo table={(*table).clone()} load_error={(*load_error).clone()} />

            <form id="expForm" {onsubmit}>
                <div class="form-row">
                    <NumberField id="currentLevel" label={fields::CURRENT_LEVEL}
                        value={current_level.text.clone()} oninput={current_level.on_input.clone()} />
                    <NumberField id="currentExp" label={fields::CURRENT_EXP}
                        value={current_exp.text.clone()} oninput={current_exp.on_input.clone()}
                        placeholder="e.g. 1,200,000 or 1.2m" />
                </div>
                <div class="form-row">
                    <NumberField id="targetLevel" label={fields::TARGET_LEVEL}
                        value={target_level.text.clone()} oninput={target_level.on_input.clone()} />
                    <NumberField id="expPerHour" label={fields::EXP_PER_HOUR}
                        value={exp_per_hour.text.clone()} oninput={exp_per_hour.on_input.clone()}
                        placeholder="e.g. 500k" />
                </div>
                <div class="form-row">
                    <NumberField id="dailyAccel" label={format!("{} (0-10)", fields::DAILY_ACCEL)}
                        value={daily_accel.text.clone()} oninput={daily_accel.on_input.clone()} />
                    <NumberField id="stoneAccel" label={format!("{} (0-50)", fields::STONE_ACCEL)}
                        value={stone_accel.text.clone()} oninput={stone_accel.on_input.clone()} />
                </div>
                <button id="calcBtn" type="submit" class="btn-primary" disabled={table.is_none()}>
                    { "Calculate" }
                </button>
            </form>

            if let Some(err) = &*error_message {
                <div class="current-error">{ err }</div>
            }

            <div class="results-area">
                if let Some(shown) = &*shown {
                    <ResultPanel
                        result={shown.result.clone()}
                        projection={shown.projection}
                        tick={tick}
                    />
                } else {
                    <div class="no-results-message">
                        <p>{ "Enter your levels and hourly rate, then press Calculate." }</p>
                    </div>
                }
            </div>

            <StatsPanel counts={(*visit_counts).clone()} />
        </div>
    }
}

/// App wrapper.
#[function_component]
pub fn App() -> Html {
    html! { <Main /> }
}

/// Entry point: installs logging and renders the App.
fn main() {
    console_error_panic_hook::set_once();
    level_eta::logging::init();
    yew::Renderer::<App>::new().render();
}
