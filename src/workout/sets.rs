//! Per-exercise set numbering inside one workout.
//!
//! Within a workout the sets of one exercise are numbered `1..=n` with no gaps.
//! Numbers are derived server-side; a client-supplied `setNumber` only orders its group.

use ahash::AHashMap;
use ironlog_schema::{SetInput, WorkoutSet};

/// Returns the set number for each input, aligned with `sets`.
///
/// Groups by exercise; inside a group the client hint orders sets (missing hints go last)
/// and ties keep submission order.
pub fn assign_set_numbers(sets: &[SetInput]) -> Vec<i64> {
    let mut groups: AHashMap<&str, Vec<usize>> = AHashMap::new();
    for (idx, set) in sets.iter().enumerate() {
        groups.entry(set.exercise_id.as_str()).or_default().push(idx);
    }

    let mut numbers = vec![0; sets.len()];
    for mut members in groups.into_values() {
        members.sort_by_key(|&idx| sets[idx].set_number.unwrap_or(i64::MAX));
        for (position, idx) in members.into_iter().enumerate() {
            numbers[idx] = position as i64 + 1;
        }
    }
    numbers
}

/// Next number for a set appended to `exercise_id` in a workout that already holds `existing`.
pub fn next_set_number(existing: &[WorkoutSet], exercise_id: &str) -> i64 {
    existing
        .iter()
        .filter(|s| s.exercise_id == exercise_id)
        .count() as i64
        + 1
}

/// Removes the set with `set_id` and shifts later sets of the same exercise down by one.
///
/// Returns the removed set and the `(id, new_number)` pairs that changed,
/// or `None` when `set_id` is not in `sets`.
pub fn remove_and_renumber(
    sets: &mut Vec<WorkoutSet>,
    set_id: i64,
) -> Option<(WorkoutSet, Vec<(i64, i64)>)> {
    let pos = sets.iter().position(|s| s.id == set_id)?;
    let removed = sets.remove(pos);

    let mut changed = Vec::new();
    for set in sets
        .iter_mut()
        .filter(|s| s.exercise_id == removed.exercise_id && s.set_number > removed.set_number)
    {
        set.set_number -= 1;
        changed.push((set.id, set.set_number));
    }
    Some((removed, changed))
}
