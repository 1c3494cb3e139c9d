//! Exercise identifiers and progression levels.

use std::fmt;
use std::str::FromStr;

use repform_core::Error;
use serde::{Deserialize, Serialize};

/// Exercises the engine can track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    Squat,
    BicepCurl,
    PushUp,
    ShoulderPress,
    Lunge,
}

impl Exercise {
    pub const ALL: [Exercise; 5] = [
        Exercise::Squat,
        Exercise::BicepCurl,
        Exercise::PushUp,
        Exercise::ShoulderPress,
        Exercise::Lunge,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Exercise::Squat => "Squats",
            Exercise::BicepCurl => "Bicep Curls",
            Exercise::PushUp => "Push-Ups",
            Exercise::ShoulderPress => "Shoulder Press",
            Exercise::Lunge => "Lunges",
        }
    }

    /// Rep counts at which a session reaches (intermediate, advanced)
    fn level_cutoffs(&self) -> (u32, u32) {
        match self {
            Exercise::Squat => (20, 40),
            Exercise::BicepCurl => (10, 15),
            Exercise::PushUp => (15, 30),
            Exercise::ShoulderPress => (8, 15),
            Exercise::Lunge => (15, 30),
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Exercise {
    type Err = Error;

    /// Accepts display names and slugs, ignoring case, spaces, hyphens and underscores
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "squat" | "squats" => Ok(Exercise::Squat),
            "bicepcurl" | "bicepcurls" | "curl" | "curls" => Ok(Exercise::BicepCurl),
            "pushup" | "pushups" => Ok(Exercise::PushUp),
            "shoulderpress" | "press" => Ok(Exercise::ShoulderPress),
            "lunge" | "lunges" => Ok(Exercise::Lunge),
            _ => Err(Error::UnknownExercise(s.to_string())),
        }
    }
}

/// Progression level reached in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn for_session(exercise: Exercise, reps: u32) -> Self {
        let (intermediate, advanced) = exercise.level_cutoffs();
        if reps >= advanced {
            Level::Advanced
        } else if reps >= intermediate {
            Level::Intermediate
        } else {
            Level::Beginner
        }
    }
}
