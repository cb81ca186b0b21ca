//! Upserts vendor workout records into the local store by external id.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use ironlog_schema::{ShealthExercise, SyncReport, WorkoutType};
use tracing::{debug, warn};

use super::activity_type::map_activity_type;
use crate::error::IronlogError;

/// A vendor record that passed validation, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalWorkout {
    pub external_id: String,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub workout_type: WorkoutType,
    pub calories: Option<f64>,
    pub avg_heart_rate: Option<f64>,
}

impl ExternalWorkout {
    /// Returns `None` for records with a blank id, unparsable timestamps or `end < start`.
    pub fn parse(record: &ShealthExercise) -> Option<Self> {
        let external_id = record.id.trim();
        if external_id.is_empty() {
            return None;
        }
        let start_time = DateTime::parse_from_rfc3339(record.start_time.trim())
            .ok()?
            .with_timezone(&Utc);
        let end_time = DateTime::parse_from_rfc3339(record.end_time.trim())
            .ok()?
            .with_timezone(&Utc);
        if end_time < start_time {
            return None;
        }

        Some(Self {
            external_id: external_id.to_string(),
            date: start_time.date_naive(),
            start_time,
            end_time,
            workout_type: map_activity_type(&record.exercise_type),
            calories: record.calorie,
            avg_heart_rate: record.heart_rate.and_then(|hr| hr.average),
        })
    }
}

/// Persistence seam of the reconciler.
#[async_trait]
pub trait WorkoutStore: Send {
    /// Local workout id holding `external_id`, if any.
    async fn find_by_external_id(&mut self, external_id: &str)
    -> Result<Option<i64>, IronlogError>;

    async fn insert_external(&mut self, workout: &ExternalWorkout) -> Result<i64, IronlogError>;

    /// Overwrites the synced fields of an existing workout. Sets and notes are left alone.
    async fn update_external(
        &mut self,
        id: i64,
        workout: &ExternalWorkout,
    ) -> Result<(), IronlogError>;

    async fn touch_last_sync(&mut self, at: DateTime<Utc>) -> Result<(), IronlogError>;
}

/// Applies one batch of vendor records. `total` is the batch length, malformed records are
/// counted as `skipped`, and the token's `last_sync_at` is stamped with `now` at the end.
pub async fn reconcile<S>(
    store: &mut S,
    records: &[ShealthExercise],
    now: DateTime<Utc>,
) -> Result<SyncReport, IronlogError>
where
    S: WorkoutStore + ?Sized,
{
    let mut report = SyncReport {
        total: u32::try_from(records.len()).unwrap_or(u32::MAX),
        ..SyncReport::default()
    };

    for record in records {
        let Some(workout) = ExternalWorkout::parse(record) else {
            warn!(external_id = %record.id, "skipping malformed vendor record");
            report.skipped += 1;
            continue;
        };

        match store.find_by_external_id(&workout.external_id).await? {
            Some(id) => {
                store.update_external(id, &workout).await?;
                debug!(id, external_id = %workout.external_id, "updated synced workout");
                report.updated += 1;
            }
            None => {
                let id = store.insert_external(&workout).await?;
                debug!(id, external_id = %workout.external_id, "imported synced workout");
                report.imported += 1;
            }
        }
    }

    store.touch_last_sync(now).await?;
    Ok(report)
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use chrono::TimeZone;
    use ironlog_schema::ShealthHeartRate;

    fn record(id: &str, kind: &str, start: &str, end: &str) -> ShealthExercise {
        ShealthExercise {
            id: id.to_string(),
            exercise_type: kind.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            duration: Some(1800.0),
            calorie: Some(250.0),
            distance: None,
            heart_rate: Some(ShealthHeartRate {
                average: Some(131.0),
                max: Some(160.0),
                min: None,
            }),
        }
    }

    fn batch() -> Vec<ShealthExercise> {
        vec![
            record("a", "RUNNING", "2026-03-02T07:00:00Z", "2026-03-02T07:30:00Z"),
            record("b", "Yoga", "2026-03-03T07:00:00Z", "2026-03-03T08:00:00Z"),
            record("c", "WEIGHT_TRAINING", "2026-03-04T18:00:00+02:00", "2026-03-04T19:00:00+02:00"),
        ]
    }

    #[tokio::test]
    async fn first_run_imports_second_run_updates() {
        let now = Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap();
        let mut store = MemoryStore::default();
        store
            .insert_external(&ExternalWorkout::parse(&batch()[0]).unwrap())
            .await
            .unwrap();

        let report = reconcile(&mut store, &batch(), now).await.unwrap();
        assert_eq!(
            report,
            SyncReport {
                imported: 2,
                updated: 1,
                skipped: 0,
                total: 3
            }
        );
        assert_eq!(store.last_sync_at, Some(now));

        let again = reconcile(&mut store, &batch(), now).await.unwrap();
        assert_eq!(again.imported, 0);
        assert_eq!(again.updated, 3);
        assert_eq!(store.rows.len(), 3);
    }

    #[tokio::test]
    async fn malformed_records_are_skipped_not_fatal() {
        let now = Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap();
        let mut records = batch();
        records.push(record("", "RUNNING", "2026-03-02T07:00:00Z", "2026-03-02T07:30:00Z"));
        records.push(record("d", "RUNNING", "yesterday", "2026-03-02T07:30:00Z"));
        records.push(record("e", "RUNNING", "2026-03-02T08:00:00Z", "2026-03-02T07:30:00Z"));

        let mut store = MemoryStore::default();
        let report = reconcile(&mut store, &records, now).await.unwrap();
        assert_eq!(report.imported, 3);
        assert_eq!(report.skipped, 3);
        assert_eq!(report.total, 6);
    }

    #[test]
    fn parsed_record_takes_utc_date_type_and_heart_rate() {
        let parsed = ExternalWorkout::parse(&batch()[2]).unwrap();
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
        assert_eq!(
            parsed.start_time,
            Utc.with_ymd_and_hms(2026, 3, 4, 16, 0, 0).unwrap()
        );
        assert_eq!(parsed.workout_type, WorkoutType::Strength);
        assert_eq!(parsed.avg_heart_rate, Some(131.0));
        assert_eq!(parsed.calories, Some(250.0));
    }
}
