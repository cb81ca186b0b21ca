//! Exercise identity and library filtering.

pub mod catalog;

use crate::error::IronlogError;
use ironlog_schema::{Exercise, ExerciseInput, ExerciseQuery};
use rand::Rng;
use rand::distr::Alphanumeric;

pub use catalog::{BUILTIN_EXERCISES, BuiltinExercise};

/// Stable id for an exercise name: lowercase, whitespace runs become `-`, `ё` folds to `е`,
/// and anything outside `[a-z а-я 0-9 -]` is dropped. May return an empty string.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for ch in name.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        let ch = if ch == 'ё' { 'е' } else { ch };
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ('а'..='я').contains(&ch)
        {
            slug.push(ch);
        }
    }

    slug
}

/// [`slugify`] with a random fallback for names that reduce to nothing (emoji, other scripts).
pub fn exercise_id_for(name: &str) -> String {
    let slug = slugify(name);
    if !slug.is_empty() {
        return slug;
    }

    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("ex-{}-{suffix}", name.chars().count())
}

/// Trims the name and description, drops blank or repeated tags, and rejects a blank name.
pub fn normalize_input(input: ExerciseInput) -> Result<ExerciseInput, IronlogError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(IronlogError::Validation(
            "exercise name must not be blank".to_string(),
        ));
    }

    let mut muscle_groups: Vec<String> = Vec::with_capacity(input.muscle_groups.len());
    for tag in input.muscle_groups {
        let tag = tag.trim();
        if !tag.is_empty() && !muscle_groups.iter().any(|g| g == tag) {
            muscle_groups.push(tag.to_string());
        }
    }

    Ok(ExerciseInput {
        name,
        description: input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        muscle_groups,
        primary_muscle_group: input.primary_muscle_group,
    })
}

/// Case-insensitive match of `needle` against name, description and muscle-group tags.
/// A blank needle matches everything.
pub fn matches_search(exercise: &Exercise, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    exercise.name.to_lowercase().contains(&needle)
        || exercise
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
        || exercise
            .muscle_groups
            .iter()
            .any(|g| g.to_lowercase().contains(&needle))
}

/// Applies every list filter of `GET /api/exercises` to one exercise.
pub fn matches_query(exercise: &Exercise, query: &ExerciseQuery) -> bool {
    if query
        .primary_muscle_group
        .is_some_and(|primary| exercise.primary_muscle_group != primary)
    {
        return false;
    }
    if query
        .muscle_group
        .as_deref()
        .is_some_and(|tag| !exercise.muscle_groups.iter().any(|g| g == tag))
    {
        return false;
    }
    if query
        .is_custom
        .is_some_and(|is_custom| exercise.is_custom != is_custom)
    {
        return false;
    }
    query
        .search
        .as_deref()
        .is_none_or(|needle| matches_search(exercise, needle))
}
