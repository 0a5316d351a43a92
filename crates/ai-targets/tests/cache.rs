mod common;

use ai_targets::{LivingTargetCache, TargetWorldView, Vec3};
use common::OpenWorld;

fn world() -> OpenWorld {
    let mut world = OpenWorld::default();
    for id in 1..=4 {
        world.spawn(id, Vec3::new(id as f64, 0.0, 0.0));
    }
    world.hidden.insert(2);
    world
}

fn cache() -> LivingTargetCache<OpenWorld> {
    LivingTargetCache::new([3, 2, 1, 4], |world: &OpenWorld, target| world.can_see(0, target))
}

#[test]
fn listed_but_invalid_agents_are_not_contained() {
    let world = world();
    let cache = cache();

    assert!(cache.contains(&world, 3));
    assert!(!cache.contains(&world, 2));
    assert!(!cache.contains(&world, 9));
    assert_eq!(cache.candidates(), &[3, 2, 1, 4]);
}

#[test]
fn queries_keep_sensor_order_and_skip_invalid_agents() {
    let world = world();
    let cache = cache();

    assert_eq!(cache.iter(&world).collect::<Vec<_>>(), vec![3, 1, 4]);
    assert_eq!(cache.find_first(&world, |a| a < 3), Some(1));
    assert_eq!(cache.find_first(&world, |a| a == 2), None);
    assert_eq!(cache.find_all(&world, |a| a != 3), vec![1, 4]);
    assert!(cache.any_match(&world, |a| a % 2 == 0));
    assert!(!cache.any_match(&world, |a| a > 10));
}

#[test]
fn test_runs_at_most_once_per_candidate() {
    let world = world();
    let cache = cache();

    for _ in 0..5 {
        let _ = cache.iter(&world).count();
        let _ = cache.contains(&world, 2);
    }
    assert_eq!(world.sight_checks.get(), 4);
    assert_eq!(cache.evaluated(), 4);

    // Clones share the memo of the snapshot they came from.
    let copy = cache.clone();
    assert!(copy.contains(&world, 4));
    assert_eq!(world.sight_checks.get(), 4);
}

#[test]
fn find_first_only_tests_candidates_the_predicate_accepts() {
    let world = world();
    let cache = cache();

    assert_eq!(cache.find_first(&world, |a| a == 4), Some(4));
    assert_eq!(world.sight_checks.get(), 1);
}

#[test]
fn empty_cache_contains_nothing() {
    let world = world();
    let cache = LivingTargetCache::<OpenWorld>::empty();
    assert!(!cache.contains(&world, 1));
    assert_eq!(cache.iter(&world).count(), 0);
}
