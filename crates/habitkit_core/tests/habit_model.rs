use habitkit_core::{Habit, HabitValidationError, Periodicity};

#[test]
fn new_habit_sets_defaults() {
    let habit = Habit::new("Read", Periodicity::Daily);

    assert_eq!(habit.id, 0);
    assert!(!habit.is_persisted());
    assert_eq!(habit.name, "Read");
    assert_eq!(habit.periodicity, Periodicity::Daily);
    assert!(habit.ongoing);
    assert_eq!(habit.streak, 0);
    assert_eq!(habit.created_at, 0);
    assert_eq!(habit.updated_at, 0);
}

#[test]
fn validate_rejects_whitespace_only_name() {
    let habit = Habit::new("   ", Periodicity::Weekly);

    let err = habit.validate().unwrap_err();
    assert_eq!(err, HabitValidationError::EmptyName);
}

#[test]
fn validate_accepts_non_empty_name() {
    let habit = Habit::new("Meditate", Periodicity::Monthly);

    assert!(habit.validate().is_ok());
}

#[test]
fn periodicity_db_spellings_roundtrip() {
    for periodicity in [Periodicity::Daily, Periodicity::Weekly, Periodicity::Monthly] {
        assert_eq!(
            Periodicity::parse(periodicity.as_db_str()),
            Some(periodicity)
        );
    }
}

#[test]
fn periodicity_parse_is_exact_match() {
    assert_eq!(Periodicity::parse("weekly"), Some(Periodicity::Weekly));
    assert_eq!(Periodicity::parse("Weekly"), None);
    assert_eq!(Periodicity::parse(" weekly"), None);
    assert_eq!(Periodicity::parse("yearly"), None);
}

#[test]
fn habit_serialization_uses_expected_wire_fields() {
    let mut habit = Habit::new("Run", Periodicity::Weekly);
    habit.id = 7;
    habit.streak = 3;
    habit.created_at = 1_700_000_000_000;
    habit.updated_at = 1_700_000_360_000;

    let json = serde_json::to_value(&habit).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "Run");
    assert_eq!(json["periodicity"], "weekly");
    assert_eq!(json["ongoing"], true);
    assert_eq!(json["streak"], 3);
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);
    assert_eq!(json["updated_at"], 1_700_000_360_000_i64);

    let decoded: Habit = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, habit);
}
