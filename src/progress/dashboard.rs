use ironlog_schema::{TypeCount, WorkoutStats, WorkoutType, WorkoutWithSets};

/// Headline numbers for the dashboard. `calorie_volume` sums per-set calories and is not
/// the reps x weight volume of the progress charts.
pub fn summarize(workouts: &[WorkoutWithSets]) -> WorkoutStats {
    let mut by_type = [0u32; WorkoutType::ALL.len()];
    let mut calorie_volume = 0.0;
    let mut total_duration_secs = 0;

    for entry in workouts {
        let workout = &entry.workout;
        by_type[workout.workout_type.index()] += 1;
        calorie_volume += entry
            .sets
            .iter()
            .map(|s| s.set.calories.unwrap_or(0.0))
            .sum::<f64>();
        if let Some(end) = workout.end_time {
            total_duration_secs += (end - workout.start_time).num_seconds().max(0);
        }
    }

    WorkoutStats {
        total_workouts: workouts.len(),
        calorie_volume,
        total_duration_secs,
        workouts_by_type: WorkoutType::ALL
            .into_iter()
            .map(|t| TypeCount {
                workout_type: t,
                count: by_type[t.index()],
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::fixtures::{set, workout};

    #[test]
    fn calorie_volume_ignores_reps_and_weight() {
        let workouts = vec![
            workout(
                (2026, 3, 3),
                WorkoutType::Strength,
                Some(60),
                vec![
                    set("squat", Some(10), Some(100.0), Some(40.0)),
                    set("squat", Some(10), Some(100.0), None),
                ],
            ),
            workout(
                (2026, 3, 4),
                WorkoutType::Cardio,
                None,
                vec![set("run", None, None, Some(310.5))],
            ),
        ];

        let stats = summarize(&workouts);
        assert_eq!(stats.total_workouts, 2);
        assert_eq!(stats.calorie_volume, 350.5);
        assert_eq!(stats.total_duration_secs, 3600);

        let counts: Vec<_> = stats.workouts_by_type.iter().map(|t| t.count).collect();
        assert_eq!(counts, vec![1, 1, 0, 0]);
    }

    #[test]
    fn empty_window_still_lists_every_type() {
        let stats = summarize(&[]);
        assert_eq!(stats.total_workouts, 0);
        assert_eq!(stats.workouts_by_type.len(), 4);
    }
}
