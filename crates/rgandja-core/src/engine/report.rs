//! Human-readable rendering of an analysis.

use std::fmt::Write;

use crate::model::{AnalysisInput, AnalysisResult};

const RECOMMENDED_ACTIONS: [&str; 2] = [
    "Ridurre i carichi energetici in standby nelle fasce non operative.",
    "Monitorare le assenze settimanali per reparto e redistribuire i carichi.",
];

/// Fixed template; only the numeric substitutions vary.
pub fn render(input: &AnalysisInput, result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "> RGandja Neural Engine | Protocollo RGD-Alpha");
    let _ = writeln!(out, "> Algoritmo selezionato: {}", input.algorithm_tier.to_uppercase());
    let _ = writeln!(
        out,
        "> Resilienza: {}",
        if input.is_resilient { "attiva" } else { "non attiva" }
    );
    out.push('\n');
    let _ = writeln!(
        out,
        "Indice di Efficienza Neurale (IEN): {:.2}",
        result.neural_efficiency_index
    );
    let _ = writeln!(out, "Probabilità di successo: {:.2}%", result.success_probability);
    let _ = writeln!(out, "Risparmio stimato: €{}", format_currency(result.estimated_savings));
    let _ = writeln!(out, "Stato: {}", result.status);
    out.push('\n');
    out.push_str("Azioni consigliate:");
    for action in RECOMMENDED_ACTIONS {
        out.push_str("\n→ ");
        out.push_str(action);
    }
    out
}

/// Shown in place of an amount that is NaN or infinite.
pub const UNAVAILABLE: &str = "n/d";

/// Two decimals with `,` thousands separators, e.g. `1,234,567.80`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return UNAVAILABLE.to_string();
    }
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(char::from(*d));
    }

    // -0.00 prints without a sign
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}
