//! Pure Yew view components for the Level ETA UI.
//!
//! These components render from props only; state lives in `Main`.

use level_eta::config::FALLBACK_LOCALE;
use level_eta::countdown::Hms;
use level_eta::stats::VisitCounts;
use level_eta::utils::format_exp;
use level_eta::{CalculationResult, ExperienceTable, Projection, Tick};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use yew::prelude::*;

/// Format an epoch timestamp with the browser's locale.
fn format_timestamp(ms: f64) -> String {
    let locale = gloo_utils::window()
        .navigator()
        .language()
        .unwrap_or_else(|| FALLBACK_LOCALE.to_string());
    js_sys::Date::new(&JsValue::from_f64(ms))
        .to_locale_string(&locale, &JsValue::UNDEFINED)
        .into()
}

/// Labelled text input for one form field.
#[derive(Properties, PartialEq)]
pub struct NumberFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: String,
    #[prop_or_default]
    pub placeholder: AttrValue,
    pub oninput: Callback<InputEvent>,
}

#[function_component(NumberField)]
pub fn number_field(props: &NumberFieldProps) -> Html {
    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{ props.label.clone() }</label>
            <input
                type="text"
                inputmode="decimal"
                id={props.id.clone()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                oninput={props.oninput.clone()}
            />
        </div>
    }
}

/// Shows which levels the loaded table covers.
#[derive(Properties, PartialEq)]
pub struct TableInfoProps {
    pub table: Option<Rc<ExperienceTable>>,
    pub load_error: Option<String>,
}

#[function_component(TableInfo)]
pub fn table_info(props: &TableInfoProps) -> Html {
    if let Some(err) = &props.load_error {
        return html! { <div class="current-error">{ err }</div> };
    }
    match &props.table {
        Some(table) => match (table.min_level(), table.max_level()) {
            (Some(min), Some(max)) => html! {
                <div class="table-info">
                    { format!("Experience data loaded for levels {}-{} ({} entries)", min, max, table.len()) }
                </div>
            },
            _ => html! {},
        },
        None => html! { <div class="table-info">{ "Loading experience data..." }</div> },
    }
}

/// Results of the last successful calculation plus the live countdown.
#[derive(Properties, PartialEq)]
pub struct ResultPanelProps {
    pub result: Rc<CalculationResult>,
    pub projection: Projection,
    pub tick: Tick,
}

#[function_component(ResultPanel)]
pub fn result_panel(props: &ResultPanelProps) -> Html {
    let result = &props.result;

    html! {
        <div class="results">
            <p>{ format!("Remaining experience: {}", format_exp(result.remaining_exp)) }</p>
            if let Some(summary) = &result.accel_summary {
                <p class="accel-info">{ summary }</p>
            }
            <p>{ format!("Estimated time: {}", Hms::from_seconds_ceil(result.seconds)) }</p>
            <p>{ format!("Current time: {}", format_timestamp(props.projection.started_at_ms)) }</p>
            <p>{ format!("Completion time: {}", format_timestamp(props.projection.finish_at_ms)) }</p>
            <p class="countdown">{ props.tick.label() }</p>
        </div>
    }
}

/// Total and today's visit counters.
#[derive(Properties, PartialEq)]
pub struct StatsPanelProps {
    pub counts: Option<VisitCounts>,
}

#[function_component(StatsPanel)]
pub fn stats_panel(props: &StatsPanelProps) -> Html {
    let (total, today) = match &props.counts {
        Some(counts) => (counts.total_label(), counts.today_label()),
        None => ("...".to_string(), "...".to_string()),
    };

    html! {
        <div class="stats">
            <span>{ "Total visits: " }<span id="counter">{ total }</span></span>
            <span>{ " | Today: " }<span id="todayCounter">{ today }</span></span>
        </div>
    }
}
