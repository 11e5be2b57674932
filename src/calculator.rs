//! Time-to-target estimation over an [`ExperienceTable`].

use crate::config::{
    ACCEL_HOURS_PER_ITEM, MAX_DAILY_ACCEL, MAX_STONE_ACCEL, MIN_ACCEL_COUNT, SECONDS_PER_HOUR,
};
use crate::utils::{fields, format_exp};
use crate::{CalcError, ExperienceTable, ValidationError};
use log::debug;

/// User inputs for a single estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationInputs {
    /// 0 means unset.
    pub current_level: u32,
    pub current_exp: f64,
    /// 0 means unset.
    pub target_level: u32,
    /// 0 means unset.
    pub exp_per_hour: f64,
    pub daily_accel: i32,
    pub stone_accel: i32,
}

/// How acceleration items reduced the requirement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acceleration {
    pub daily_count: i32,
    pub stone_count: i32,
    /// Experience removed per item (two hours at the hourly rate).
    pub unit: f64,
    pub total_reduction: f64,
}

impl Acceleration {
    pub fn summary(&self, immediate: bool) -> String {
        if immediate {
            format!(
                "Acceleration: instant completion (daily x{}, stones x{}, {} exp removed)",
                self.daily_count,
                self.stone_count,
                format_exp(self.total_reduction)
            )
        } else {
            format!(
                "Acceleration: {} exp removed (daily x{}, stones x{})",
                format_exp(self.total_reduction),
                self.daily_count,
                self.stone_count
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    /// Experience still needed before acceleration.
    pub remaining_exp: f64,
    /// Experience still needed after acceleration.
    pub reduced_exp: f64,
    pub seconds: f64,
    pub immediate: bool,
    pub acceleration: Option<Acceleration>,
    pub accel_summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Current experience already covers the whole range.
    AlreadyReached { surplus: f64 },
    Estimate(CalculationResult),
}

pub fn validate(inputs: &CalculationInputs) -> Result<(), ValidationError> {
    if inputs.current_level == 0 {
        return Err(ValidationError::MissingField(fields::CURRENT_LEVEL));
    }
    if inputs.target_level == 0 {
        return Err(ValidationError::MissingField(fields::TARGET_LEVEL));
    }
    if inputs.exp_per_hour == 0.0 || inputs.exp_per_hour.is_nan() {
        return Err(ValidationError::MissingField(fields::EXP_PER_HOUR));
    }
    if !inputs.current_exp.is_finite() || inputs.current_exp < 0.0 {
        return Err(ValidationError::NegativeExperience);
    }
    if inputs.target_level <= inputs.current_level {
        return Err(ValidationError::TargetNotAboveCurrent {
            current: inputs.current_level,
            target: inputs.target_level,
        });
    }
    check_count(fields::DAILY_ACCEL, inputs.daily_accel, MAX_DAILY_ACCEL)?;
    check_count(fields::STONE_ACCEL, inputs.stone_accel, MAX_STONE_ACCEL)?;
    Ok(())
}

fn check_count(field: &'static str, value: i32, max: i32) -> Result<(), ValidationError> {
    if (MIN_ACCEL_COUNT..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min: MIN_ACCEL_COUNT,
            max,
        })
    }
}

/// Experience needed to go from (`current_level`, `current_exp`) to `target_level`.
///
/// Returns `Ok(None)` when `current_exp` already covers the range. Fails on
/// the first level in `current_level..target_level` missing from the table.
pub fn compute_required_experience(
    table: &ExperienceTable,
    current_level: u32,
    target_level: u32,
    current_exp: f64,
) -> Result<Option<f64>, CalcError> {
    let mut need = 0.0;
    for level in current_level..target_level {
        match table.get(level) {
            Some(exp) => need += exp,
            None => return Err(CalcError::MissingLevelData { level }),
        }
    }

    let need = need - current_exp;
    if need <= 0.0 {
        return Ok(None);
    }
    Ok(Some(need))
}

/// Apply acceleration items to `required_exp` and derive the duration.
///
/// Each item, daily or stone, removes two hours worth of experience at
/// `exp_per_hour`. The reduced requirement never goes below zero.
pub fn apply_acceleration(
    required_exp: f64,
    exp_per_hour: f64,
    daily_count: i32,
    stone_count: i32,
) -> CalculationResult {
    let used_items = daily_count > 0 || stone_count > 0;
    let unit = exp_per_hour * ACCEL_HOURS_PER_ITEM;
    let total_reduction = if used_items {
        (f64::from(daily_count) + f64::from(stone_count)) * unit
    } else {
        0.0
    };

    let left = required_exp - total_reduction;
    // NaN must survive to the finiteness check
    let reduced_exp = if left.is_nan() { left } else { left.max(0.0) };

    let immediate = reduced_exp == 0.0;
    let seconds = if immediate {
        0.0
    } else {
        reduced_exp / (exp_per_hour / SECONDS_PER_HOUR)
    };

    let acceleration = used_items.then_some(Acceleration {
        daily_count,
        stone_count,
        unit,
        total_reduction,
    });
    let accel_summary = acceleration.map(|a| a.summary(immediate));

    CalculationResult {
        remaining_exp: required_exp,
        reduced_exp,
        seconds,
        immediate,
        acceleration,
        accel_summary,
    }
}

/// Validate, sum the level range, apply acceleration and check the duration.
pub fn calculate(table: &ExperienceTable, inputs: &CalculationInputs) -> Result<Outcome, CalcError> {
    validate(inputs)?;

    let required = match compute_required_experience(
        table,
        inputs.current_level,
        inputs.target_level,
        inputs.current_exp,
    )? {
        Some(exp) => exp,
        None => {
            let total: f64 = (inputs.current_level..inputs.target_level)
                .filter_map(|lv| table.get(lv))
                .sum();
            return Ok(Outcome::AlreadyReached {
                surplus: inputs.current_exp - total,
            });
        }
    };

    let result = apply_acceleration(
        required,
        inputs.exp_per_hour,
        inputs.daily_accel,
        inputs.stone_accel,
    );

    if !result.seconds.is_finite() || result.seconds < 0.0 {
        return Err(CalcError::Calculation {
            seconds: result.seconds,
        });
    }

    debug!(
        "Level {} -> {}: {} exp left, {} after acceleration, {:.0} s",
        inputs.current_level,
        inputs.target_level,
        result.remaining_exp,
        result.reduced_exp,
        result.seconds
    );

    Ok(Outcome::Estimate(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_table() -> ExperienceTable {
        vec![(1, 100.0), (2, 150.0), (3, 200.0)].into_iter().collect()
    }

    fn inputs(current_level: u32, current_exp: f64, target_level: u32, rate: f64) -> CalculationInputs {
        CalculationInputs {
            current_level,
            current_exp,
            target_level,
            exp_per_hour: rate,
            daily_accel: 0,
            stone_accel: 0,
        }
    }

    fn estimate(outcome: Outcome) -> CalculationResult {
        match outcome {
            Outcome::Estimate(result) => result,
            other => panic!("expected an estimate, got {:?}", other),
        }
    }

    #[test]
    fn plain_estimate() {
        let result = estimate(calculate(&sample_table(), &inputs(1, 30.0, 3, 500.0)).unwrap());
        assert_eq!(result.remaining_exp, 220.0);
        assert_eq!(result.reduced_exp, 220.0);
        assert!((result.seconds - 1584.0).abs() < 1e-6);
        assert!(!result.immediate);
        assert_eq!(result.acceleration, None);
        assert_eq!(result.accel_summary, None);
    }

    #[test]
    fn one_daily_item_finishes_immediately() {
        let mut req = inputs(1, 30.0, 3, 500.0);
        req.daily_accel = 1;
        let result = estimate(calculate(&sample_table(), &req).unwrap());
        assert_eq!(result.seconds, 0.0);
        assert_eq!(result.reduced_exp, 0.0);
        assert!(result.immediate);

        let accel = result.acceleration.unwrap();
        assert_eq!(accel.unit, 1000.0);
        assert_eq!(accel.total_reduction, 1000.0);
        let summary = result.accel_summary.unwrap();
        assert!(summary.contains("instant completion"));
        assert!(summary.contains("1,000"));
    }

    #[test]
    fn partial_acceleration_shortens_duration() {
        let table: ExperienceTable = vec![(1, 1000.0), (2, 1000.0)].into_iter().collect();
        let mut req = inputs(1, 0.0, 3, 100.0);
        req.daily_accel = 1;
        req.stone_accel = 1;
        let result = estimate(calculate(&table, &req).unwrap());
        assert_eq!(result.remaining_exp, 2000.0);
        assert_eq!(result.reduced_exp, 1600.0);
        assert!((result.seconds - 57_600.0).abs() < 1e-6);
        assert!(!result.immediate);
        assert_eq!(
            result.accel_summary.as_deref(),
            Some("Acceleration: 400 exp removed (daily x1, stones x1)")
        );
    }

    #[test]
    fn acceleration_saturates_at_zero() {
        let more = apply_acceleration(95_000.0, 1_000.0, MAX_DAILY_ACCEL, MAX_STONE_ACCEL);
        assert_eq!(more.reduced_exp, 0.0);
        assert_eq!(more.seconds, 0.0);
        assert!(more.immediate);
    }

    #[test]
    fn item_counts_do_not_overflow() {
        let result = apply_acceleration(1_000.0, 100.0, i32::MAX, i32::MAX);
        assert_eq!(result.reduced_exp, 0.0);
        assert_eq!(result.seconds, 0.0);
    }

    #[test]
    fn huge_rate_without_items_stays_finite() {
        let rate = crate::utils::parse_amount("1e308", fields::EXP_PER_HOUR).unwrap();
        let result = estimate(calculate(&sample_table(), &inputs(1, 30.0, 3, rate)).unwrap());
        assert_eq!(result.reduced_exp, 220.0);
        assert!(result.seconds.is_finite() && result.seconds > 0.0);
        assert_eq!(result.acceleration, None);
    }

    proptest! {
        #[test]
        fn estimate_is_monotonic_in_every_input(
            required in 1.0f64..1e9,
            rate in 1.0f64..1e7,
            daily in 0..MAX_DAILY_ACCEL,
            stone in 0..MAX_STONE_ACCEL,
            extra_rate in 0.0f64..1e6,
            extra_required in 0.0f64..1e9,
        ) {
            let base = apply_acceleration(required, rate, daily, stone);
            let more_daily = apply_acceleration(required, rate, daily + 1, stone);
            let more_stone = apply_acceleration(required, rate, daily, stone + 1);
            let more_both = apply_acceleration(required, rate, daily + 1, stone + 1);
            let faster = apply_acceleration(required, rate + extra_rate, daily, stone);
            let longer = apply_acceleration(required + extra_required, rate, daily, stone);

            prop_assert!(base.reduced_exp >= 0.0);
            prop_assert!(base.reduced_exp <= required);
            prop_assert!(more_daily.seconds <= base.seconds);
            prop_assert!(more_stone.seconds <= base.seconds);
            prop_assert!(more_both.seconds <= more_daily.seconds);
            prop_assert!(more_both.seconds <= more_stone.seconds);
            prop_assert!(faster.seconds <= base.seconds);
            prop_assert!(longer.seconds >= base.seconds);
        }
    }

    #[test]
    fn sums_exactly_the_requested_range() {
        let table: ExperienceTable = (1..=10).map(|lv| (lv, f64::from(lv) * 10.0)).collect();
        let need = compute_required_experience(&table, 3, 7, 5.0).unwrap();
        assert_eq!(need, Some(30.0 + 40.0 + 50.0 + 60.0 - 5.0));
    }

    #[test]
    fn already_reached_reports_no_duration() {
        let outcome = calculate(&sample_table(), &inputs(1, 250.0, 3, 500.0)).unwrap();
        assert_eq!(outcome, Outcome::AlreadyReached { surplus: 0.0 });

        let outcome = calculate(&sample_table(), &inputs(1, 400.0, 3, 500.0)).unwrap();
        assert_eq!(outcome, Outcome::AlreadyReached { surplus: 150.0 });
    }

    #[test]
    fn missing_level_is_a_hard_stop() {
        let table: ExperienceTable = vec![(1, 100.0)].into_iter().collect();
        let err = calculate(&table, &inputs(1, 0.0, 3, 500.0)).unwrap_err();
        assert_eq!(err, CalcError::MissingLevelData { level: 2 });
    }

    #[test]
    fn target_equal_to_current_is_rejected_before_lookup() {
        // an empty table would otherwise fail with missing level data
        let err = calculate(&ExperienceTable::default(), &inputs(4, 0.0, 4, 500.0)).unwrap_err();
        assert_eq!(
            err,
            CalcError::Validation(ValidationError::TargetNotAboveCurrent {
                current: 4,
                target: 4
            })
        );
    }

    #[test]
    fn rejects_unset_and_out_of_range_inputs() {
        let table = sample_table();
        let cases = [
            (inputs(0, 0.0, 3, 500.0), ValidationError::MissingField(fields::CURRENT_LEVEL)),
            (inputs(1, 0.0, 0, 500.0), ValidationError::MissingField(fields::TARGET_LEVEL)),
            (inputs(1, 0.0, 3, 0.0), ValidationError::MissingField(fields::EXP_PER_HOUR)),
            (inputs(1, -1.0, 3, 500.0), ValidationError::NegativeExperience),
            (inputs(1, f64::INFINITY, 3, 500.0), ValidationError::NegativeExperience),
            (inputs(1, f64::NAN, 3, 500.0), ValidationError::NegativeExperience),
        ];
        for (req, expected) in cases {
            assert_eq!(calculate(&table, &req), Err(CalcError::Validation(expected)));
        }

        let mut req = inputs(1, 0.0, 3, 500.0);
        req.daily_accel = 11;
        assert!(matches!(
            calculate(&table, &req),
            Err(CalcError::Validation(ValidationError::OutOfRange { value: 11, max: 10, .. }))
        ));

        req.daily_accel = 0;
        req.stone_accel = 51;
        assert!(matches!(
            calculate(&table, &req),
            Err(CalcError::Validation(ValidationError::OutOfRange { value: 51, max: 50, .. }))
        ));

        req.stone_accel = -1;
        assert!(matches!(
            calculate(&table, &req),
            Err(CalcError::Validation(ValidationError::OutOfRange { value: -1, .. }))
        ));
    }

    #[test]
    fn non_finite_duration_is_a_calculation_error() {
        let table: ExperienceTable = vec![(1, f64::MAX), (2, f64::MAX)].into_iter().collect();
        let err = calculate(&table, &inputs(1, 0.0, 3, 500.0)).unwrap_err();
        assert!(matches!(err, CalcError::Calculation { .. }));
    }

    #[test]
    fn negative_rate_is_a_calculation_error() {
        let err = calculate(&sample_table(), &inputs(1, 0.0, 3, -500.0)).unwrap_err();
        assert!(matches!(err, CalcError::Calculation { seconds } if seconds < 0.0));
    }
}
