//! Integration test: arena recycling as seen through session values.

use lanecarry::prelude::*;
use lanecarry::types::Epoch;

/// 4 KiB arena: 512 limbs, watermark at 256 limbs.
fn small_session() -> Session {
    Session::init(ArenaConfig::new(4096)).unwrap()
}

fn is_stale(result: Result<String, LimbError>) -> bool {
    matches!(
        result,
        Err(LimbError::Arena(ArenaError::StaleHandle { .. }))
    )
}

#[test]
fn release_past_watermark_retires_every_value() {
    let mut s = small_session();
    let a = s.from_limbs(&[7; 100]).unwrap();
    let b = s.from_limbs(&[9; 100]).unwrap();
    let c = s.allocate(100).unwrap();
    assert!(s.arena().used_bytes() > s.arena().watermark_bytes());

    assert_eq!(s.release(c), Ok(Release::Recycled { epoch: Epoch(1) }));
    assert!(is_stale(s.format_hex(&a)));
    assert!(is_stale(s.format_hex(&b)));
    assert_eq!(s.arena().used_bytes(), 0);
    assert!(s.arena().raw().unwrap().iter().all(|&l| l == 0));

    // Stale values can still be handed back.
    assert_eq!(s.release(a), Ok(Release::AlreadyStale));
    assert_eq!(s.release(b), Ok(Release::AlreadyStale));
    assert_eq!(s.arena().recycle_count(), 1);
}

#[test]
fn release_below_watermark_is_deferred() {
    let mut s = small_session();
    let keep = s.from_limbs(&[3, 2, 1]).unwrap();
    let gone = s.allocate(16).unwrap();
    let used = s.arena().used_bytes();

    assert_eq!(s.release(gone), Ok(Release::Deferred));
    assert_eq!(s.arena().used_bytes(), used);
    assert_eq!(s.format_hex(&keep).unwrap(), "100000000000000020000000000000003");
}

#[test]
fn growth_that_recycles_keeps_the_grown_value() {
    let mut s = small_session();
    let other = s.allocate(200).unwrap();
    let mut grown = s.from_limbs(&[0xabc; 60]).unwrap();
    assert!(s.arena().used_bytes() > s.arena().watermark_bytes());

    s.resize(&mut grown, 100).unwrap();
    assert_eq!(s.arena().recycle_count(), 1);
    assert!(is_stale(s.format_hex(&other)));

    let limbs = s.to_limbs(&grown).unwrap();
    assert_eq!(limbs.len(), 100);
    assert!(limbs[..60].iter().all(|&l| l == 0xabc));
    assert!(limbs[60..].iter().all(|&l| l == 0));
}

#[test]
fn shrinking_never_recycles() {
    let mut s = small_session();
    let other = s.from_limbs(&[1; 200]).unwrap();
    let mut narrowed = s.from_limbs(&[2; 100]).unwrap();
    assert!(s.arena().used_bytes() > s.arena().watermark_bytes());

    s.resize(&mut narrowed, 10).unwrap();
    assert_eq!(s.arena().recycle_count(), 0);
    assert_eq!(s.to_limbs(&narrowed).unwrap(), vec![2; 10]);
    assert_eq!(s.to_limbs(&other).unwrap(), vec![1; 200]);
}

#[test]
fn exhausted_capacity_is_an_error() {
    let mut s = small_session();
    let _big = s.allocate(500).unwrap();
    let result = s.allocate(16);
    assert!(matches!(
        result,
        Err(LimbError::Arena(ArenaError::CapacityExceeded {
            capacity: 4096,
            ..
        }))
    ));
}

#[test]
fn churn_keeps_results_correct_across_recycles() {
    let mut s = small_session();
    for i in 1..=50u64 {
        let x = s.from_limbs(&[i; 64]).unwrap();
        let y = s.from_limbs(&[u64::MAX; 64]).unwrap();
        let mut r = s.allocate(64).unwrap();
        s.add(&mut r, &x, &y).unwrap();

        // i + (2^4096 - 1) over limbs that all hold i.
        let limbs = s.to_limbs(&r).unwrap();
        assert!(r.carry);
        assert_eq!(limbs[0], i - 1);
        assert!(limbs[1..].iter().all(|&l| l == i));

        for v in [x, y, r] {
            s.release(v).unwrap();
        }
    }
    assert!(s.arena().recycle_count() > 0);
    assert_eq!(s.arena().epoch(), Epoch(s.arena().recycle_count() as u32));
}

#[test]
fn teardown_then_reinit_invalidates_old_values() {
    let mut s = small_session();
    let v = s.parse_hex("abc").unwrap();
    s.teardown().unwrap();
    assert!(!s.is_active());
    assert_eq!(
        s.format_hex(&v),
        Err(LimbError::Arena(ArenaError::Uninitialised))
    );
    assert!(matches!(s.allocate(1), Err(LimbError::Arena(ArenaError::Uninitialised))));

    s.reinit().unwrap();
    assert!(is_stale(s.format_hex(&v)));
    let fresh = s.parse_hex("abc").unwrap();
    assert_eq!(s.format_hex(&fresh).unwrap(), "abc");
}
