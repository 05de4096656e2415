//! Algorithm tiers and their savings coefficients.

/// Coefficient applied when the requested tier is not recognised.
pub const DEFAULT_COEFFICIENT: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Junior,
    Pmi,
    Enterprise,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Junior, Tier::Pmi, Tier::Enterprise];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Junior => "junior",
            Tier::Pmi => "pmi",
            Tier::Enterprise => "enterprise",
        }
    }

    /// Case-insensitive match against the fixed key set.
    pub fn parse(raw: &str) -> Option<Tier> {
        Self::ALL
            .into_iter()
            .find(|t| raw.eq_ignore_ascii_case(t.as_str()))
    }

    /// Savings coefficient, falling back to [`DEFAULT_COEFFICIENT`].
    pub fn coefficient(tier: Option<Tier>) -> f64 {
        match tier {
            Some(Tier::Junior) => 0.08,
            Some(Tier::Pmi) => 0.14,
            Some(Tier::Enterprise) => 0.22,
            None => DEFAULT_COEFFICIENT,
        }
    }
}
