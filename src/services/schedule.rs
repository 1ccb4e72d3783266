use chrono::{Datelike, Days, Local, NaiveDate};

use crate::models::{
    recipe::PlannedRecipe,
    week::{DayPlan, WeekPlan, WeekSlot},
};

/// Wire format of plan dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| anyhow::anyhow!("Invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

/// Source of "today" as a local calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// The system's local calendar.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Calendar date of `slot` in the Sunday-to-Saturday week containing `today`.
/// `None` when that date falls outside the representable calendar range.
pub fn slot_date(today: NaiveDate, slot: WeekSlot) -> Option<NaiveDate> {
    let since_sunday = u64::from(today.weekday().num_days_from_sunday());
    today
        .checked_sub_days(Days::new(since_sunday))?
        .checked_add_days(Days::new(u64::from(slot.index())))
}

/// The seven dates of the current week, Sunday first.
pub fn week_dates(today: NaiveDate) -> Option<[NaiveDate; 7]> {
    let mut dates = [today; 7];
    for slot in WeekSlot::ALL {
        dates[slot.index() as usize] = slot_date(today, slot)?;
    }
    Some(dates)
}

/// First (Sunday) and last (Saturday) day of the current week.
pub fn week_bounds(today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        slot_date(today, WeekSlot::Sunday)?,
        slot_date(today, WeekSlot::Saturday)?,
    ))
}

/// Records planned on the date `slot` maps to this week, in supplied order.
pub fn bucket_for_slot(
    today: NaiveDate,
    slot: WeekSlot,
    records: &[PlannedRecipe],
) -> Vec<PlannedRecipe> {
    let Some(date) = slot_date(today, slot) else {
        return Vec::new();
    };
    let wanted = format_date(date);
    records
        .iter()
        .filter(|r| r.data == wanted)
        .cloned()
        .collect()
}

pub fn bucket_week(today: NaiveDate, records: &[PlannedRecipe]) -> WeekPlan {
    let days = WeekSlot::ALL
        .into_iter()
        .map(|slot| DayPlan {
            slot,
            date: slot_date(today, slot),
            recipes: bucket_for_slot(today, slot, records),
        })
        .collect();
    WeekPlan { today, days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recipe::Utensils;
    use chrono::Duration;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn planned(id: i64, data: &str) -> PlannedRecipe {
        PlannedRecipe {
            id,
            titulo: format!("Receita {id}"),
            data: data.into(),
            imagem: String::new(),
            tempo: "00:30:00".into(),
            porcoes: 2,
            dificuldade: "Fácil".into(),
            ingredientes: vec![],
            utensilios: Utensils::default(),
            modo_preparo: String::new(),
        }
    }

    #[test]
    fn wednesday_week_spans_sunday_to_saturday() {
        let today = ymd(2024, 6, 12);
        assert_eq!(slot_date(today, WeekSlot::Sunday), Some(ymd(2024, 6, 9)));
        assert_eq!(slot_date(today, WeekSlot::Saturday), Some(ymd(2024, 6, 15)));
        assert_eq!(week_bounds(today), Some((ymd(2024, 6, 9), ymd(2024, 6, 15))));
    }

    #[test]
    fn week_dates_are_consecutive_and_contain_today() {
        // Covers month, year and leap-day boundaries.
        let samples = [
            ymd(2024, 6, 12),
            ymd(2024, 6, 9),
            ymd(2024, 6, 15),
            ymd(2024, 3, 1),
            ymd(2024, 12, 31),
            ymd(2025, 1, 1),
        ];
        for today in samples {
            let dates = week_dates(today).unwrap();
            assert_eq!(WeekSlot::of(dates[0]), WeekSlot::Sunday);
            for pair in dates.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::days(1));
            }
            assert!(dates.contains(&today), "{today} not in its own week");
        }
    }

    #[test]
    fn sunday_record_lands_only_in_sunday_bucket() {
        let today = ymd(2024, 6, 12);
        let records = vec![planned(1, "2024-06-09")];

        for slot in WeekSlot::ALL {
            let bucket = bucket_for_slot(today, slot, &records);
            if slot == WeekSlot::Sunday {
                assert_eq!(bucket, records);
            } else {
                assert!(bucket.is_empty(), "unexpected record in {slot}");
            }
        }

        let next_week = ymd(2024, 6, 19);
        for slot in WeekSlot::ALL {
            assert!(bucket_for_slot(next_week, slot, &records).is_empty());
        }
    }

    #[test]
    fn each_in_week_record_is_bucketed_once() {
        let today = ymd(2024, 6, 12);
        let records = vec![
            planned(1, "2024-06-09"),
            planned(2, "2024-06-12"),
            planned(3, "2024-06-12"),
            planned(4, "2024-06-15"),
            planned(5, "2024-06-16"),
            planned(6, "2024-06-08"),
            planned(7, "not-a-date"),
            planned(8, ""),
        ];

        let week = bucket_week(today, &records);
        let mut seen: Vec<i64> = week
            .days
            .iter()
            .flat_map(|d| d.recipes.iter().map(|r| r.id))
            .collect();
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3, 4]);

        let wednesday = week.day(WeekSlot::Wednesday);
        assert_eq!(wednesday.date, Some(today));
        let ids: Vec<i64> = wednesday.recipes.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn empty_records_yield_empty_week() {
        let week = bucket_week(ymd(2024, 6, 12), &[]);
        assert_eq!(week.days.len(), 7);
        assert!(week.is_empty());
    }

    #[test]
    fn dates_format_with_zero_padding() {
        assert_eq!(format_date(ymd(2024, 1, 5)), "2024-01-05");
        assert_eq!(parse_date("2024-01-05").unwrap(), ymd(2024, 1, 5));
        assert!(parse_date("05/01/2024").is_err());
    }

    #[test]
    fn calendar_edges_yield_empty_buckets() {
        let records = vec![planned(1, &format_date(NaiveDate::MAX))];

        for today in [NaiveDate::MAX, NaiveDate::MIN] {
            let week = bucket_week(today, &records);
            assert_eq!(week.days.len(), 7);
            let partial = week.days.iter().any(|d| d.date.is_none());
            for day in week.days.iter().filter(|d| d.date.is_none()) {
                assert!(day.recipes.is_empty());
            }
            assert_eq!(week_dates(today).is_none(), partial);
        }

        // Days that do exist in the edge week still bucket normally.
        let max_slot = WeekSlot::of(NaiveDate::MAX);
        assert_eq!(slot_date(NaiveDate::MAX, max_slot), Some(NaiveDate::MAX));
        assert_eq!(bucket_for_slot(NaiveDate::MAX, max_slot, &records), records);
    }
}
