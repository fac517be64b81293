//! Display-ID assignment for cadets.
//!
//! Two schemes exist. `Derived` is a pure function of gender and regimental
//! number (`SD/<reg>` or `SW/<reg>`). `Sequence` issues `SD<n>` / `SW<n>`
//! from a persisted per-category counter that only ever grows.

use crate::errors::AppResult;
use crate::models::gender::Gender;
use crate::store::CounterStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdCategory {
    Sd,
    Sw,
}

impl IdCategory {
    pub const ALL: [IdCategory; 2] = [IdCategory::Sd, IdCategory::Sw];

    pub fn prefix(&self) -> &'static str {
        match self {
            IdCategory::Sd => "SD",
            IdCategory::Sw => "SW",
        }
    }

    /// Key under which the category's counter is persisted.
    pub fn counter_key(&self) -> &'static str {
        match self {
            IdCategory::Sd => "sdCounter",
            IdCategory::Sw => "swCounter",
        }
    }

    pub fn from_gender(gender: Gender) -> Self {
        match gender {
            Gender::Male => IdCategory::Sd,
            Gender::Female => IdCategory::Sw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    #[default]
    Derived,
    Sequence,
}

/// `SD/<reg>` for male cadets, `SW/<reg>` for female cadets.
pub fn assign_id(gender: Gender, regimental_number: &str) -> String {
    format!(
        "{}/{}",
        IdCategory::from_gender(gender).prefix(),
        regimental_number.trim()
    )
}

/// Category for the sequence scheme: an explicit `SD`/`SW` marker inside the
/// regimental number wins over gender.
pub fn determine_category(gender: Gender, regimental_number: &str) -> IdCategory {
    let upper = regimental_number.to_uppercase();
    if upper.contains("SD") {
        IdCategory::Sd
    } else if upper.contains("SW") {
        IdCategory::Sw
    } else {
        IdCategory::from_gender(gender)
    }
}

/// Issue the next `SD<n>` / `SW<n>` identifier. The counter is incremented
/// and persisted before the ID is returned, so a value is never handed out
/// twice even if the cadet write that follows fails.
pub fn assign_sequential_id<C: CounterStore + ?Sized>(
    counters: &mut C,
    gender: Gender,
    regimental_number: &str,
) -> AppResult<String> {
    let category = determine_category(gender, regimental_number);
    let n = counters.next_counter(category)?;
    Ok(format!("{}{}", category.prefix(), n))
}

/// Display ID for a new cadet under the configured scheme.
pub fn issue_id<C: CounterStore + ?Sized>(
    scheme: IdScheme,
    counters: &mut C,
    gender: Gender,
    regimental_number: &str,
) -> AppResult<String> {
    match scheme {
        IdScheme::Derived => Ok(assign_id(gender, regimental_number)),
        IdScheme::Sequence => assign_sequential_id(counters, gender, regimental_number),
    }
}
