//! Recurring-Deposit Maturity Calculator
//!
//! Month-by-month simulation with quarterly compounding: each month the
//! fixed contribution lands in the balance, every third month interest is
//! capitalized at one quarter of the annual rate, and a tenure that is not
//! an exact multiple of three gets a final simple-interest adjustment for
//! the leftover months. Intermediate values stay unrounded; the final
//! figures are rounded to two decimals.

use crate::models::{DepositSimulationInput, DepositSimulationResult};

const MONTHS_PER_QUARTER: u32 = 3;
const MONTHS_PER_YEAR: f64 = 12.0;

/// Simulate a recurring deposit. Degenerate inputs (zero tenure,
/// non-positive contribution) return a zero-valued result, not an error.
pub fn simulate_deposit(input: &DepositSimulationInput) -> DepositSimulationResult {
    if input.tenure_months == 0 || input.monthly_amount <= 0.0 {
        return DepositSimulationResult {
            maturity_amount: 0.0,
            total_interest: 0.0,
        };
    }

    let annual_rate = input.annual_rate_percent.max(0.0) / 100.0;

    let mut balance = 0.0_f64;
    for month in 1..=input.tenure_months {
        balance += input.monthly_amount;
        if month % MONTHS_PER_QUARTER == 0 {
            balance += balance * annual_rate / 4.0;
        }
    }

    // Partial quarter at the end: simple interest at the full annual rate
    // for the leftover months.
    let leftover_months = input.tenure_months % MONTHS_PER_QUARTER;
    if leftover_months != 0 {
        balance += balance * annual_rate * (leftover_months as f64 / MONTHS_PER_YEAR);
    }

    let contributed = input.monthly_amount * input.tenure_months as f64;
    let maturity_amount = round_currency(balance);
    let total_interest = round_currency(maturity_amount - contributed);

    DepositSimulationResult {
        maturity_amount,
        total_interest,
    }
}

fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//
// ================= Tests =================
//
