//! Stage workflow model.
//!
//! Defines the closed, ordered set of lifecycle stages a case moves through
//! and the transition rule between them. Order is display-significant (board
//! columns run left to right in declaration order) but does not constrain
//! movement: any stage is reachable from any other, including reopening a
//! closed case. A same-stage transition is legal but is a no-op that must be
//! short-circuited before it reaches the store.

use std::str::FromStr;

use console::Color;
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a case. Closed enumeration; every switch over it is
/// exhaustive so a new stage fails to compile rather than falling through
/// to a default column or style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Intake,
    Ongoing,
    Hearing,
    Judgment,
    Closed,
}

impl Stage {
    /// All stages in board-column order.
    pub const ALL: [Stage; 5] = [
        Self::Intake,
        Self::Ongoing,
        Self::Hearing,
        Self::Judgment,
        Self::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Ongoing => "ongoing",
            Self::Hearing => "hearing",
            Self::Judgment => "judgment",
            Self::Closed => "closed",
        }
    }

    /// Column heading shown on the board.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Intake => "Intake",
            Self::Ongoing => "Ongoing",
            Self::Hearing => "Hearing",
            Self::Judgment => "Judgment",
            Self::Closed => "Closed",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::Intake => "New cases & client onboarding",
            Self::Ongoing => "Active cases & pre-trial",
            Self::Hearing => "Court proceedings & dates",
            Self::Judgment => "Awaiting orders & decisions",
            Self::Closed => "Completed cases",
        }
    }

    /// Accent color for the column header in the terminal board.
    pub fn accent(&self) -> Color {
        match self {
            Self::Intake => Color::Blue,
            Self::Ongoing => Color::Yellow,
            Self::Hearing => Color::Magenta,
            Self::Judgment => Color::Red,
            Self::Closed => Color::Green,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intake" => Ok(Self::Intake),
            "ongoing" => Ok(Self::Ongoing),
            "hearing" => Ok(Self::Hearing),
            "judgment" => Ok(Self::Judgment),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("Invalid stage: {}", s)),
        }
    }
}

/// The transition rule. Any stage may move to any other — the domain treats
/// "closed" as terminal by convention only, and reopening is permitted.
/// Returns `None` for a same-stage transition, which callers must treat as
/// a no-op and never turn into a store write.
///
/// If ordering or guard rules (e.g. forbidding closed → intake) are ever
/// introduced, this function is the single seam where they belong.
pub fn transition(current: Stage, target: Stage) -> Option<Stage> {
    if current == target { None } else { Some(target) }
}
