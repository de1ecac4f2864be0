use colored::Color;
use serde::Serialize;

use crate::model::{Assignment, Role, Status, Task, User};

/// Qualitative banding of the progress percentage. The thresholds are part of
/// the contract: 100, >=75, >=50, >=25, below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Complete,
    NearlyThere,
    Halfway,
    GoodStart,
    JustStarting,
}

impl Tier {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            100.. => Self::Complete,
            75..=99 => Self::NearlyThere,
            50..=74 => Self::Halfway,
            25..=49 => Self::GoodStart,
            _ => Self::JustStarting,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Complete => "All tasks complete!",
            Self::NearlyThere => "Almost there!",
            Self::Halfway => "Halfway there!",
            Self::GoodStart => "Good start!",
            Self::JustStarting => "Just getting started",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Complete => Color::Green,
            Self::NearlyThere => Color::Blue,
            Self::Halfway => Color::Yellow,
            Self::GoodStart => Color::Magenta,
            Self::JustStarting => Color::Red,
        }
    }
}

/// Role-scoped progress aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub percentage: u32,
    pub completed: usize,
    pub total: usize,
    pub label: String,
    pub tier: Tier,
}

/// Compute the progress summary for the viewing user.
///
/// A trainee sees their own completions over the task catalog. Any other
/// viewer (instructor, admin, or nobody logged in) sees completions across
/// all trainees over `trainees x tasks` slots. Pure function of its inputs.
pub fn summarize(
    assignments: &[Assignment],
    tasks: &[Task],
    current_user: Option<&User>,
    users: &[User],
) -> Summary {
    let trainee = current_user.filter(|u| u.role == Role::Trainee);

    let (completed, total, label) = match trainee {
        Some(user) => {
            let completed = assignments
                .iter()
                .filter(|a| a.trainee_id == user.id && a.status == Status::Done)
                .count();
            let total = tasks.len();
            let label = format!("Progress: {completed}/{total} tasks completed");
            (completed, total, label)
        }
        None => {
            let completed = assignments
                .iter()
                .filter(|a| a.status == Status::Done)
                .count();
            let trainee_count = users.iter().filter(|u| u.role == Role::Trainee).count();
            let total = trainee_count * tasks.len();
            let label = format!("Overall: {completed}/{total} tasks completed");
            (completed, total, label)
        }
    };

    let percentage = if total > 0 {
        (100.0 * completed as f64 / total as f64).round() as u32
    } else {
        0
    };

    Summary {
        percentage,
        completed,
        total,
        label,
        tier: Tier::from_percentage(percentage),
    }
}
