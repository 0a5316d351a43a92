use std::collections::BTreeSet;

use ai_core::{Blackboard, MemoryLookup, MemoryModuleType, MemoryStatus};

const JOB_SITE: MemoryModuleType<(i32, i32)> = MemoryModuleType::new("job_site");
const VISIBLE: MemoryModuleType<Vec<u64>> = MemoryModuleType::new("visible");
const SEEN: MemoryModuleType<BTreeSet<u64>> = MemoryModuleType::new("seen");
const NAME: MemoryModuleType<String> = MemoryModuleType::new("name");
const UNDECLARED: MemoryModuleType<u32> = MemoryModuleType::new("undeclared");

fn blackboard() -> Blackboard {
    Blackboard::with_slots([JOB_SITE.slot(), VISIBLE.slot(), SEEN.slot(), NAME.slot()])
}

#[test]
fn set_get_erase_roundtrip() {
    let mut bb = blackboard();
    assert!(!bb.has_value(JOB_SITE));
    assert_eq!(bb.get(JOB_SITE), None);

    bb.set(JOB_SITE, (3, 4));
    bb.set(NAME, "smith".to_string());

    assert_eq!(bb.get(JOB_SITE).copied(), Some((3, 4)));
    assert_eq!(bb.get(NAME).map(|s| s.as_str()), Some("smith"));
    assert!(bb.has_value_equal(JOB_SITE, &(3, 4)));
    assert!(!bb.has_value_equal(JOB_SITE, &(0, 0)));

    bb.erase(JOB_SITE);
    assert_eq!(bb.get(JOB_SITE), None);
    assert!(bb.has_value(NAME));

    bb.clear();
    assert!(!bb.has_value(NAME));
    assert!(bb.is_registered(NAME));
}

#[test]
fn get_mut_updates_in_place() {
    let mut bb = blackboard();
    bb.set(VISIBLE, vec![1]);
    if let Some(list) = bb.get_mut(VISIBLE) {
        list.push(2);
    }
    assert_eq!(bb.get(VISIBLE), Some(&vec![1, 2]));
}

#[test]
fn storing_an_empty_collection_erases_the_slot() {
    let mut bb = blackboard();
    bb.set(VISIBLE, vec![7]);
    assert!(bb.has_value(VISIBLE));

    bb.set(VISIBLE, Vec::new());
    assert!(!bb.has_value(VISIBLE));

    bb.set_with_expiry(SEEN, BTreeSet::new(), 10);
    assert!(!bb.has_value(SEEN));
}

#[test]
fn set_optional_none_forgets() {
    let mut bb = blackboard();
    bb.set_optional(JOB_SITE, Some((1, 1)));
    assert!(bb.has_value(JOB_SITE));
    bb.set_optional(JOB_SITE, None);
    assert!(!bb.has_value(JOB_SITE));
}

#[test]
fn timed_memory_survives_its_ttl_and_expires_on_the_next_pass() {
    let mut bb = blackboard();
    bb.set_with_expiry(JOB_SITE, (0, 0), 3);
    assert_eq!(bb.time_until_expiry(JOB_SITE), Some(3));

    for remaining in [2, 1, 0] {
        assert!(bb.tick_expiry().is_empty());
        assert!(bb.has_value(JOB_SITE));
        assert_eq!(bb.time_until_expiry(JOB_SITE), Some(remaining));
    }

    let expired = bb.tick_expiry();
    assert_eq!(expired, vec![JOB_SITE.slot()]);
    assert!(!bb.has_value(JOB_SITE));
}

#[test]
fn two_tick_memory_is_readable_on_the_second_pass() {
    let mut bb = blackboard();
    bb.set_with_expiry(JOB_SITE, (1, 2), 2);

    bb.tick_expiry();
    assert!(bb.has_value(JOB_SITE));
    bb.tick_expiry();
    assert!(bb.has_value(JOB_SITE));
    bb.tick_expiry();
    assert!(!bb.has_value(JOB_SITE));
}

#[test]
fn zero_ttl_memory_is_dropped_by_the_next_pass() {
    let mut bb = blackboard();
    bb.set_with_expiry(JOB_SITE, (1, 2), 0);
    assert!(bb.has_value(JOB_SITE));

    assert_eq!(bb.tick_expiry(), vec![JOB_SITE.slot()]);
    assert!(!bb.has_value(JOB_SITE));
}

#[test]
fn collection_emptied_in_place_is_erased_by_the_next_pass() {
    let mut bb = blackboard();
    bb.set(VISIBLE, vec![4, 5]);
    if let Some(list) = bb.get_mut(VISIBLE) {
        list.clear();
    }
    assert!(bb.has_value(VISIBLE));

    assert_eq!(bb.tick_expiry(), vec![VISIBLE.slot()]);
    assert!(!bb.has_value(VISIBLE));
}

#[test]
fn permanent_memory_never_expires() {
    let mut bb = blackboard();
    bb.set(JOB_SITE, (0, 0));
    for _ in 0..100 {
        bb.tick_expiry();
    }
    assert!(bb.has_value(JOB_SITE));
    assert_eq!(bb.time_until_expiry(JOB_SITE), None);
}

#[test]
fn status_checks_distinguish_absent_from_undeclared() {
    let mut bb = blackboard();
    assert!(bb.check_status(JOB_SITE, MemoryStatus::Registered));
    assert!(bb.check_status(JOB_SITE, MemoryStatus::ValueAbsent));
    assert!(!bb.check_status(JOB_SITE, MemoryStatus::ValuePresent));

    bb.set(JOB_SITE, (2, 2));
    assert!(bb.check_status(JOB_SITE, MemoryStatus::ValuePresent));
    assert!(!bb.check_status(JOB_SITE, MemoryStatus::ValueAbsent));

    for status in [
        MemoryStatus::Registered,
        MemoryStatus::ValuePresent,
        MemoryStatus::ValueAbsent,
    ] {
        assert!(!bb.check_status(UNDECLARED, status));
    }
    assert!(!bb.has_value(UNDECLARED));
}

#[test]
fn lookup_reports_unregistered_instead_of_panicking() {
    let mut bb = blackboard();
    assert_eq!(bb.lookup(UNDECLARED), MemoryLookup::Unregistered);
    assert_eq!(bb.lookup(JOB_SITE), MemoryLookup::Absent);
    bb.set(JOB_SITE, (5, 6));
    assert_eq!(bb.lookup(JOB_SITE), MemoryLookup::Present(&(5, 6)));
    assert_eq!(bb.lookup(JOB_SITE).value(), Some(&(5, 6)));
}

#[test]
fn copy_present_from_only_fills_declared_slots() {
    let mut source = blackboard();
    source.set(JOB_SITE, (9, 9));
    source.set_with_expiry(NAME, "temp".to_string(), 4);

    let mut target = Blackboard::with_slots([NAME.slot()]);
    target.copy_present_from(&source);

    assert!(!target.is_registered(JOB_SITE));
    assert_eq!(target.get(NAME).map(|s| s.as_str()), Some("temp"));
    assert_eq!(target.time_until_expiry(NAME), Some(4));
}

#[test]
#[should_panic(expected = "memory slot `undeclared` is not registered")]
fn reading_an_undeclared_slot_panics() {
    let bb = blackboard();
    let _ = bb.get(UNDECLARED);
}

#[test]
#[should_panic(expected = "memory slot `undeclared` is not registered")]
fn writing_an_undeclared_slot_panics() {
    let mut bb = blackboard();
    bb.set(UNDECLARED, 1);
}

#[test]
#[should_panic(expected = "memory slot `job_site` type mismatch")]
fn reading_with_the_wrong_type_panics() {
    const WRONG: MemoryModuleType<u32> = MemoryModuleType::new("job_site");
    let mut bb = blackboard();
    bb.set(JOB_SITE, (1, 2));
    let _ = bb.get(WRONG);
}
