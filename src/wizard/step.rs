//! Wizard step state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The steps of the profile wizard, in order.
///
/// The flow is linear: BasicInfo -> Address -> Summary. Moving forward
/// requires the current step to validate; moving back never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    BasicInfo,
    Address,
    Summary,
}

impl WizardStep {
    /// Total number of steps, for "Step N of M" headers.
    pub const TOTAL_STEPS: usize = 3;

    /// The step after this one, or `None` at the summary.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::BasicInfo => Some(Self::Address),
            Self::Address => Some(Self::Summary),
            Self::Summary => None,
        }
    }

    /// The step before this one, or `None` at the first step.
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::BasicInfo => None,
            Self::Address => Some(Self::BasicInfo),
            Self::Summary => Some(Self::Address),
        }
    }

    /// Whether a back navigation is available from this step.
    pub fn can_go_back(&self) -> bool {
        self.previous().is_some()
    }

    /// Human-readable step title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Information",
            Self::Address => "Address Information",
            Self::Summary => "Review Your Profile",
        }
    }

    /// 1-indexed position of this step.
    pub fn step_number(&self) -> usize {
        match self {
            Self::BasicInfo => 1,
            Self::Address => 2,
            Self::Summary => 3,
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::BasicInfo
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BasicInfo => "basic_info",
            Self::Address => "address",
            Self::Summary => "summary",
        };
        write!(f, "{name}")
    }
}
