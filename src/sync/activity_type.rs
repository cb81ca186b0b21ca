use ironlog_schema::WorkoutType;

/// Maps a vendor activity name onto a workout type.
///
/// Matching is case-insensitive and treats whitespace runs as `_`, so `"Weight training"` and
/// `"WEIGHT_TRAINING"` agree. Input is not trimmed: `" yoga "` reads as `_YOGA_`. Anything
/// unknown becomes [`WorkoutType::Mixed`].
pub fn map_activity_type(vendor_type: &str) -> WorkoutType {
    let mut normalized = String::with_capacity(vendor_type.len());
    let mut in_space = false;
    for c in vendor_type.chars() {
        if c.is_whitespace() {
            if !in_space {
                normalized.push('_');
            }
            in_space = true;
        } else {
            normalized.extend(c.to_uppercase());
            in_space = false;
        }
    }

    match normalized.as_str() {
        "RUNNING" | "WALKING" | "CYCLING" | "SWIMMING" | "HIKING" | "ELLIPTICAL" | "ROWING"
        | "STAIR_CLIMBING" | "JUMP_ROPE" | "AEROBICS" | "DANCING" => WorkoutType::Cardio,
        "WEIGHT_TRAINING" | "STRENGTH_TRAINING" | "CIRCUIT_TRAINING" | "CALISTHENICS" => {
            WorkoutType::Strength
        }
        "YOGA" | "PILATES" | "STRETCHING" | "FLEXIBILITY" => WorkoutType::Stretching,
        _ => WorkoutType::Mixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_map_by_family() {
        assert_eq!(map_activity_type("RUNNING"), WorkoutType::Cardio);
        assert_eq!(map_activity_type("jump rope"), WorkoutType::Cardio);
        assert_eq!(map_activity_type("Weight  Training"), WorkoutType::Strength);
        assert_eq!(map_activity_type("calisthenics"), WorkoutType::Strength);
        assert_eq!(map_activity_type("Yoga"), WorkoutType::Stretching);
    }

    #[test]
    fn surrounding_whitespace_is_not_trimmed() {
        assert_eq!(map_activity_type(" yoga "), WorkoutType::Mixed);
        assert_eq!(map_activity_type("running\n"), WorkoutType::Mixed);
        assert_eq!(map_activity_type("stair \t climbing"), WorkoutType::Cardio);
    }

    #[test]
    fn unknown_types_fall_back_to_mixed() {
        assert_eq!(map_activity_type("UNDERWATER_HOCKEY"), WorkoutType::Mixed);
        assert_eq!(map_activity_type(""), WorkoutType::Mixed);
        assert_eq!(map_activity_type("stair-climbing"), WorkoutType::Mixed);
    }
}
