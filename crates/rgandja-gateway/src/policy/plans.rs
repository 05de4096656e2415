use serde::{Deserialize, Serialize};

use rgandja_core::error::{Result, RgandjaError};

/// Commercial license plans. Wire names are the project's labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicensePlan {
    #[serde(rename = "Bronzo")]
    Bronze,
    #[serde(rename = "Argento")]
    Silver,
    #[serde(rename = "Oro")]
    Gold,
}

/// Monthly analysis allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyAnalyses {
    Limited(u32),
    Unlimited,
}

impl Serialize for MonthlyAnalyses {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            MonthlyAnalyses::Limited(n) => s.serialize_u32(*n),
            MonthlyAnalyses::Unlimited => s.serialize_str("Illimitate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub analisi_mensili: MonthlyAnalyses,
    pub pdf: bool,
    pub supporto: &'static str,
}

impl LicensePlan {
    pub const ALL: [LicensePlan; 3] = [LicensePlan::Bronze, LicensePlan::Silver, LicensePlan::Gold];

    pub fn as_str(self) -> &'static str {
        match self {
            LicensePlan::Bronze => "Bronzo",
            LicensePlan::Silver => "Argento",
            LicensePlan::Gold => "Oro",
        }
    }

    /// Exact label match.
    pub fn parse(raw: &str) -> Result<LicensePlan> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == raw)
            .ok_or_else(|| RgandjaError::BadRequest(format!("piano non valido: {raw}")))
    }

    pub fn limits(self) -> PlanLimits {
        match self {
            LicensePlan::Bronze => PlanLimits {
                analisi_mensili: MonthlyAnalyses::Limited(10),
                pdf: false,
                supporto: "Email",
            },
            LicensePlan::Silver => PlanLimits {
                analisi_mensili: MonthlyAnalyses::Limited(50),
                pdf: true,
                supporto: "Prioritario",
            },
            LicensePlan::Gold => PlanLimits {
                analisi_mensili: MonthlyAnalyses::Unlimited,
                pdf: true,
                supporto: "Premium 24/7",
            },
        }
    }

    pub fn is_premium(self) -> bool {
        matches!(self, LicensePlan::Silver | LicensePlan::Gold)
    }

    /// Premium PDF export gate.
    pub fn require_pdf(self) -> Result<()> {
        if self.limits().pdf {
            Ok(())
        } else {
            Err(RgandjaError::NotAllowed(format!(
                "il piano {} non include l'export PDF",
                self.as_str()
            )))
        }
    }
}

impl std::fmt::Display for LicensePlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
