//! Human-readable breakdown of an estimate
//!
//! Renders the figures of an [`EstimationResult`] as labelled lines for a
//! summary panel or a plain-text report.

use crate::models::EstimationResult;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const METHOD_NOTE: &str = "Method: Mifflin-St Jeor for BMR, scaled by activity multiplier and a body-type nudge \
     (ecto +5%, meso 0%, endo -5%), then adjusted by the daily energy needed to reach the weight goal \
     in the chosen timeframe.";

pub const DISCLAIMER: &str = "These are estimates only and not medical advice.";

/// One labelled figure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub label: String,
    pub value: String,
}

impl BreakdownLine {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

impl fmt::Display for BreakdownLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Summary lines plus an optional floor warning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub lines: Vec<BreakdownLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub method: String,
    pub disclaimer: String,
}

impl EstimationResult {
    pub fn breakdown(&self) -> Breakdown {
        let m = &self.macro_breakdown;
        let lines = vec![
            BreakdownLine::new("Suggested intake", format!("{:.0} kcal/day", self.goal_adjusted_kcal)),
            BreakdownLine::new("Estimated TDEE", format!("{:.0} kcal/day", self.tdee_kcal)),
            BreakdownLine::new("BMR", format!("{:.0} kcal", self.bmr_kcal)),
            BreakdownLine::new("Activity ×", format!("{}", self.activity_multiplier)),
            BreakdownLine::new("Body type adj", format!("{:+.1}%", self.body_type_pct * 100.0)),
            BreakdownLine::new(
                "Goal adj",
                format!(
                    "{:+.1}% ({:+.0} kcal/day, {})",
                    self.goal_pct * 100.0,
                    self.daily_goal_delta_kcal,
                    self.goal_kind
                ),
            ),
            BreakdownLine::new("Protein", format!("{:.1} g ({:.0} kcal)", m.protein_g, m.protein_kcal)),
            BreakdownLine::new("Fat", format!("{:.1} g ({:.0} kcal)", m.fat_g, m.fat_kcal)),
            BreakdownLine::new("Carbohydrate", format!("{:.1} g ({:.0} kcal)", m.carb_g, m.carb_kcal)),
        ];

        let warning = self.floor_applied.then(|| {
            format!(
                "Target raised to the {:.0} kcal/day safety minimum; consider a longer timeframe or a smaller goal.",
                self.floor_kcal
            )
        });

        Breakdown {
            lines,
            warning,
            method: METHOD_NOTE.to_string(),
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}

impl Breakdown {
    /// Lines rendered as "label: value" strings
    pub fn to_strings(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        if let Some(warning) = &self.warning {
            writeln!(f, "Warning: {}", warning)?;
        }
        writeln!(f, "{}", self.method)?;
        write!(f, "{}", self.disclaimer)
    }
}
