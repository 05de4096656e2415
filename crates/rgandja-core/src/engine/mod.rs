//! RGD-Alpha metrics engine.
//!
//! A single-shot, stateless transform from [`AnalysisInput`] to
//! [`AnalysisResult`]. The steps below are evaluated in order; the floor on
//! IEN and the 2-decimal rounding are the only normalisation applied.
//! Inputs are not range-checked here.

pub mod report;
pub mod tier;

use crate::model::{AnalysisInput, AnalysisResult, Status};

pub use tier::Tier;

/// IEN never drops below this value. There is no upper clamp.
pub const IEN_FLOOR: f64 = 5.0;

/// Logistic midpoint and steepness for the success curve.
const LOGISTIC_CENTER: f64 = 50.0;
const LOGISTIC_STEEPNESS: f64 = 0.15;

const ENERGY_DIVISOR: f64 = 10_000.0;
const HUMAN_FRICTION_WEIGHT: f64 = 2.5;

/// Success probability below this is critical.
pub const CRITICAL_BELOW: f64 = 40.0;
/// Success probability below this (and not critical) is stable.
pub const STABLE_BELOW: f64 = 75.0;

/// Intermediate friction terms, exposed for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Friction {
    pub energetic: f64,
    pub human: f64,
}

impl Friction {
    pub fn of(input: &AnalysisInput) -> Self {
        let energetic = (input.standby_watts * input.floor_area_sqm) / ENERGY_DIVISOR;
        let absence_ratio = input.weekly_absence_hours / effective_headcount(input.employee_count);
        Self {
            energetic,
            human: absence_ratio * HUMAN_FRICTION_WEIGHT,
        }
    }

    pub fn total(self) -> f64 {
        self.energetic + self.human
    }
}

/// Evaluate the RGD-Alpha formula set.
pub fn compute(input: &AnalysisInput) -> AnalysisResult {
    let ien = neural_efficiency_index(input);
    let success_probability = success_probability(ien);
    let tier = Tier::parse(&input.algorithm_tier);
    let estimated_savings = round2(
        input.annual_budget * Tier::coefficient(tier) * (1.0 - success_probability / 100.0),
    );
    let status = classify(success_probability);

    let mut result = AnalysisResult {
        neural_efficiency_index: ien,
        success_probability,
        estimated_savings,
        status,
        report_text: String::new(),
        is_premium_locked: is_premium_locked(&input.algorithm_tier),
    };
    result.report_text = report::render(input, &result);
    result
}

pub fn neural_efficiency_index(input: &AnalysisInput) -> f64 {
    (100.0 - Friction::of(input).total()).max(IEN_FLOOR)
}

/// Logistic transform of IEN, rounded to 2 decimals.
pub fn success_probability(ien: f64) -> f64 {
    round2(100.0 / (1.0 + (-LOGISTIC_STEEPNESS * (ien - LOGISTIC_CENTER)).exp()))
}

pub fn classify(success_probability: f64) -> Status {
    if success_probability < CRITICAL_BELOW {
        Status::Critical
    } else if success_probability < STABLE_BELOW {
        Status::Stable
    } else {
        Status::Optimal
    }
}

/// Only the junior tier is free; every other value, known or not, is locked.
pub fn is_premium_locked(algorithm_tier: &str) -> bool {
    !algorithm_tier.eq_ignore_ascii_case(Tier::Junior.as_str())
}

fn effective_headcount(employee_count: i64) -> f64 {
    employee_count.max(1) as f64
}

/// Round to 2 decimals on the exact binary value, ties to even.
///
/// `7386.775` is stored as `7386.77499…` and rounds down; `0.125` is an
/// exact tie and rounds to `0.12`.
pub fn round2(v: f64) -> f64 {
    if !v.is_finite() {
        return v;
    }
    // a finite f64 has at most 1074 fractional decimal digits
    let exact = format!("{:.1074}", v.abs());
    let (whole, frac) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let frac = frac.as_bytes();
    let digit = |i: usize| frac.get(i).map_or(0, |b| b - b'0');

    let mut kept: Vec<u8> = whole.bytes().collect();
    kept.extend([b'0' + digit(0), b'0' + digit(1)]);
    let round_up = match digit(2) {
        d if d > 5 => true,
        5 => frac.iter().skip(3).any(|&b| b != b'0') || digit(1) % 2 == 1,
        _ => false,
    };
    if round_up {
        increment_decimal(&mut kept);
    }

    let digits: String = kept.iter().map(|&b| char::from(b)).collect();
    let (int_part, cents) = digits.split_at(digits.len() - 2);
    format!("{int_part}.{cents}")
        .parse::<f64>()
        .map_or(v, |r| r.copysign(v))
}

fn increment_decimal(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
