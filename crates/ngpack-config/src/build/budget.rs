use serde::{Deserialize, Serialize};

/// What a size budget applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BudgetType {
    All,
    AllScript,
    Any,
    AnyScript,
    AnyComponentStyle,
    Bundle,
    Initial,
}

/// A size budget, passed through untouched to the budget-enforcement step.
///
/// Sizes are strings such as `"2mb"`, `"500kb"` or `"5%"` (relative to `baseline`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(rename = "type")]
    pub kind: BudgetType,

    /// Bundle name, for `bundle` budgets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_warning: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_warning: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Budget {
    pub fn new(kind: BudgetType) -> Self {
        Self {
            kind,
            name: None,
            baseline: None,
            maximum_warning: None,
            maximum_error: None,
            minimum_warning: None,
            minimum_error: None,
            warning: None,
            error: None,
        }
    }

    /// True when the budget sets at least one threshold.
    pub fn has_threshold(&self) -> bool {
        [
            &self.maximum_warning,
            &self.maximum_error,
            &self.minimum_warning,
            &self.minimum_error,
            &self.warning,
            &self.error,
        ]
        .iter()
        .any(|value| value.is_some())
    }
}
