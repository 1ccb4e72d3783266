use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::recipe::PlannedRecipe;

/// Weekday position inside a Sunday-to-Saturday week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekSlot {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekSlot {
    pub const ALL: [WeekSlot; 7] = [
        WeekSlot::Sunday,
        WeekSlot::Monday,
        WeekSlot::Tuesday,
        WeekSlot::Wednesday,
        WeekSlot::Thursday,
        WeekSlot::Friday,
        WeekSlot::Saturday,
    ];

    /// 0 = Sunday … 6 = Saturday.
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Slot the given calendar date falls on.
    pub fn of(date: NaiveDate) -> Self {
        Self::ALL[date.weekday().num_days_from_sunday() as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            WeekSlot::Sunday => "Domingo",
            WeekSlot::Monday => "Segunda-feira",
            WeekSlot::Tuesday => "Terça-feira",
            WeekSlot::Wednesday => "Quarta-feira",
            WeekSlot::Thursday => "Quinta-feira",
            WeekSlot::Friday => "Sexta-feira",
            WeekSlot::Saturday => "Sábado",
        }
    }
}

impl std::fmt::Display for WeekSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for WeekSlot {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(index) = s.parse::<u32>() {
            return Self::from_index(index)
                .ok_or_else(|| anyhow::anyhow!("Slot index out of range: {index}"));
        }
        Self::ALL
            .into_iter()
            .find(|slot| slot.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Unknown week slot: {s}"))
    }
}

/// One slot of a bucketed week.
#[derive(Debug, Clone, Serialize)]
pub struct DayPlan {
    pub slot: WeekSlot,
    /// `None` only at the very ends of the calendar range.
    pub date: Option<NaiveDate>,
    pub recipes: Vec<PlannedRecipe>,
}

/// All seven slots of the week containing `today`, Sunday first.
#[derive(Debug, Clone, Serialize)]
pub struct WeekPlan {
    pub today: NaiveDate,
    pub days: Vec<DayPlan>,
}

impl WeekPlan {
    pub fn day(&self, slot: WeekSlot) -> &DayPlan {
        &self.days[slot.index() as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|d| d.recipes.is_empty())
    }
}
