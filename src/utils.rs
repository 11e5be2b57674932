use crate::calculator::CalculationInputs;
use crate::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Display names of the form fields, used in validation messages.
pub mod fields {
    pub const CURRENT_LEVEL: &str = "Current level";
    pub const CURRENT_EXP: &str = "Current experience";
    pub const TARGET_LEVEL: &str = "Target level";
    pub const EXP_PER_HOUR: &str = "Experience per hour";
    pub const DAILY_ACCEL: &str = "Daily accelerations";
    pub const STONE_ACCEL: &str = "Acceleration stones";
}

// Compiled regexes for amount parsing
static AMOUNT_GROUPED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(?:[,_]\d{3})+(?:\.\d+)?$").unwrap());
static AMOUNT_SUFFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?|\.\d+)\s*([kKmMbB])$").unwrap());

/// Raw text of every form field, as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormText {
    pub current_level: String,
    pub current_exp: String,
    pub target_level: String,
    pub exp_per_hour: String,
    pub daily_accel: String,
    pub stone_accel: String,
}

impl FormText {
    /// Parse every field. Empty fields become 0, which validation treats
    /// as unset where that matters.
    pub fn parse(&self) -> Result<CalculationInputs, ValidationError> {
        Ok(CalculationInputs {
            current_level: parse_level(&self.current_level, fields::CURRENT_LEVEL)?,
            current_exp: parse_amount(&self.current_exp, fields::CURRENT_EXP)?,
            target_level: parse_level(&self.target_level, fields::TARGET_LEVEL)?,
            exp_per_hour: parse_amount(&self.exp_per_hour, fields::EXP_PER_HOUR)?,
            daily_accel: parse_count(&self.daily_accel, fields::DAILY_ACCEL)?,
            stone_accel: parse_count(&self.stone_accel, fields::STONE_ACCEL)?,
        })
    }
}

fn malformed(input: &str, field: &'static str) -> ValidationError {
    ValidationError::Malformed {
        field,
        input: input.to_string(),
    }
}

pub fn parse_level(input: &str, field: &'static str) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<u32>().map_err(|_| malformed(input, field))
}

pub fn parse_count(input: &str, field: &'static str) -> Result<i32, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<i32>().map_err(|_| malformed(input, field))
}

/// Parse an experience amount.
///
/// Supported formats:
/// - Plain number: "1500000", "1500.5", "-20"
/// - Grouped digits: "1,500,000" or "1_500_000"
/// - Suffixed: "1.5m", "300k", "2b"
///
/// # Examples
/// ```
/// use level_eta::utils::parse_amount;
/// assert_eq!(parse_amount("1,500,000", "Rate"), Ok(1_500_000.0));
/// assert_eq!(parse_amount("1.5m", "Rate"), Ok(1_500_000.0));
/// assert_eq!(parse_amount("300k", "Rate"), Ok(300_000.0));
/// assert_eq!(parse_amount("", "Rate"), Ok(0.0));
/// ```
pub fn parse_amount(input: &str, field: &'static str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let value = if let Ok(v) = trimmed.parse::<f64>() {
        v
    } else if AMOUNT_GROUPED_REGEX.is_match(trimmed) {
        let digits: String = trimmed.chars().filter(|c| *c != ',' && *c != '_').collect();
        digits.parse::<f64>().map_err(|_| malformed(input, field))?
    } else if let Some(captures) = AMOUNT_SUFFIX_REGEX.captures(trimmed) {
        let base: f64 = captures[1].parse().map_err(|_| malformed(input, field))?;
        let scale = match captures[2].to_ascii_lowercase().as_str() {
            "k" => 1e3,
            "m" => 1e6,
            _ => 1e9,
        };
        base * scale
    } else {
        return Err(malformed(input, field));
    };

    // f64 parsing also accepts "inf" and "NaN"
    if !value.is_finite() {
        return Err(malformed(input, field));
    }
    Ok(value)
}

/// Format an experience amount with thousands separators.
///
/// Keeps up to two decimals, dropping trailing zeros.
pub fn format_exp(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (digits, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = digits.bytes().all(|b| b == b'0') && frac.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}
