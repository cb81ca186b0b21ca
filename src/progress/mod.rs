//! Chart aggregation over an already-filtered, date-ascending list of workouts.

pub mod dashboard;

use ahash::AHashMap;
use chrono::{Datelike, Days, Months, NaiveDate};
use ironlog_schema::{
    ExerciseProgressPoint, FrequencyPoint, ProgressReport, TypeCount, VolumePoint, WorkoutSet,
    WorkoutType, WorkoutWithSets,
};

pub use dashboard::summarize;

/// Trailing window used when `period` is absent or zero.
pub const DEFAULT_PERIOD_MONTHS: u32 = 3;

const LABEL_FORMAT: &str = "%d.%m";

/// First day of a trailing window of `months` whole months ending at `today`.
///
/// `0` means [`DEFAULT_PERIOD_MONTHS`]. Month-end days clamp (31 May - 3 months = 28/29 Feb).
pub fn period_start(today: NaiveDate, months: u32) -> NaiveDate {
    let months = if months == 0 {
        DEFAULT_PERIOD_MONTHS
    } else {
        months
    };
    today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

pub(crate) fn set_volume(set: &WorkoutSet) -> f64 {
    set.reps.unwrap_or(0) as f64 * set.weight.unwrap_or(0.0)
}

/// Buckets keyed by day, kept in first-seen order.
struct Buckets<T> {
    order: Vec<(NaiveDate, T)>,
    index: AHashMap<NaiveDate, usize>,
}

impl<T: Default> Buckets<T> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            index: AHashMap::new(),
        }
    }

    fn entry(&mut self, key: NaiveDate) -> &mut T {
        let slot = *self.index.entry(key).or_insert_with(|| {
            self.order.push((key, T::default()));
            self.order.len() - 1
        });
        &mut self.order[slot].1
    }

    fn into_labelled(self) -> impl Iterator<Item = (String, T)> {
        self.order
            .into_iter()
            .map(|(day, value)| (day.format(LABEL_FORMAT).to_string(), value))
    }
}

#[derive(Default)]
struct WeekBucket {
    volume: f64,
    count: u32,
}

#[derive(Default)]
struct DayProgress {
    max_weight: f64,
    max_reps: i64,
    volume: f64,
}

/// Builds the progress report. Per-exercise progression is filled only when `exercise_id` is set.
pub fn aggregate(workouts: &[WorkoutWithSets], exercise_id: Option<&str>) -> ProgressReport {
    let mut weeks: Buckets<WeekBucket> = Buckets::new();
    let mut by_type = [0u32; WorkoutType::ALL.len()];
    let mut days: Buckets<DayProgress> = Buckets::new();

    for entry in workouts {
        let workout = &entry.workout;

        let bucket = weeks.entry(week_start(workout.date));
        bucket.volume += entry.sets.iter().map(|s| set_volume(&s.set)).sum::<f64>();
        bucket.count += 1;

        by_type[workout.workout_type.index()] += 1;

        let Some(target) = exercise_id else {
            continue;
        };
        for set in entry
            .sets
            .iter()
            .map(|s| &s.set)
            .filter(|s| s.exercise_id == target)
        {
            let day = days.entry(workout.date);
            day.max_weight = day.max_weight.max(set.weight.unwrap_or(0.0));
            day.max_reps = day.max_reps.max(set.reps.unwrap_or(0));
            day.volume += set_volume(set);
        }
    }

    let mut volume_data = Vec::with_capacity(weeks.order.len());
    let mut frequency_data = Vec::with_capacity(weeks.order.len());
    for (label, bucket) in weeks.into_labelled() {
        volume_data.push(VolumePoint {
            date: label.clone(),
            volume: bucket.volume,
        });
        frequency_data.push(FrequencyPoint {
            label,
            count: bucket.count,
        });
    }

    let type_data = WorkoutType::ALL
        .into_iter()
        .filter(|t| by_type[t.index()] > 0)
        .map(|t| TypeCount {
            workout_type: t,
            count: by_type[t.index()],
        })
        .collect();

    let exercise_progress = days
        .into_labelled()
        .map(|(date, day)| ExerciseProgressPoint {
            date,
            max_weight: day.max_weight,
            max_reps: day.max_reps,
            volume: day.volume,
        })
        .collect();

    ProgressReport {
        volume_data,
        frequency_data,
        type_data,
        exercise_progress,
        total_workouts: workouts.len(),
    }
}
