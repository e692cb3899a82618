use super::*;
use std::net::Ipv4Addr;

fn ip(n: u32) -> IpAddr {
    IpAddr::V4(Ipv4Addr::from(0x0a00_0000 + n))
}

fn limiter(per_client_limit: usize, global_limit: usize, max_tracked_clients: usize) -> RateLimiter {
    RateLimiter::new(RateLimitConfig {
        per_client_limit,
        global_limit: Some(global_limit),
        window: Duration::from_secs(60),
        max_tracked_clients,
    })
}

#[test]
fn per_client_allows_up_to_limit() {
    let rl = limiter(3, 100, 100);
    let client = ip(1);
    let now = Instant::now();

    for i in 0..3 {
        assert!(rl.check_and_record_at(client, now).is_ok(), "request {i} should succeed");
    }
    assert!(matches!(
        rl.check_and_record_at(client, now),
        Err(RateLimitError::PerClientExceeded { limit: 3, window_secs: 60 })
    ));
}

#[test]
fn global_allows_up_to_limit() {
    let rl = limiter(100, 5, 100);
    let now = Instant::now();

    // Distinct clients so the per-client limit is never reached first.
    for i in 0..5 {
        assert!(rl.check_and_record_at(ip(i), now).is_ok(), "request {i} should succeed");
    }
    assert!(matches!(
        rl.check_and_record_at(ip(99), now),
        Err(RateLimitError::GlobalExceeded { limit: 5, .. })
    ));
}

#[test]
fn window_expiry_allows_new_requests() {
    let rl = limiter(2, 100, 100);
    let client = ip(1);
    let start = Instant::now();

    rl.check_and_record_at(client, start).unwrap();
    rl.check_and_record_at(client, start).unwrap();
    assert!(rl.check_and_record_at(client, start).is_err());

    let after_window = start + Duration::from_secs(60) + Duration::from_millis(1);
    assert!(rl.check_and_record_at(client, after_window).is_ok());
}

#[test]
fn rejected_requests_are_not_recorded() {
    let rl = limiter(1, 100, 100);
    let client = ip(1);
    let start = Instant::now();

    rl.check_and_record_at(client, start).unwrap();
    for _ in 0..5 {
        assert!(rl.check_and_record_at(client, start + Duration::from_secs(30)).is_err());
    }
    // Only the first request counts, so it frees up one window after `start`.
    assert!(rl.check_and_record_at(client, start + Duration::from_secs(61)).is_ok());
}

#[test]
fn distinct_clients_do_not_interfere() {
    let rl = limiter(2, 100, 100);
    let now = Instant::now();

    rl.check_and_record_at(ip(1), now).unwrap();
    rl.check_and_record_at(ip(1), now).unwrap();
    assert!(rl.check_and_record_at(ip(1), now).is_err());

    assert!(rl.check_and_record_at(ip(2), now).is_ok());
}

#[test]
fn idle_clients_are_evicted_past_cap() {
    let rl = limiter(10, 1000, 4);
    let start = Instant::now();

    for i in 0..4 {
        rl.check_and_record_at(ip(i), start).unwrap();
    }
    assert_eq!(rl.tracked_clients(), 4);

    // One window later every earlier client is idle; the fifth client pushes
    // the map over the cap and triggers a sweep.
    let later = start + Duration::from_secs(61);
    rl.check_and_record_at(ip(100), later).unwrap();
    assert_eq!(rl.tracked_clients(), 1);
}

#[test]
fn active_clients_survive_sweep() {
    let rl = limiter(10, 1000, 2);
    let start = Instant::now();

    rl.check_and_record_at(ip(1), start).unwrap();
    rl.check_and_record_at(ip(2), start).unwrap();
    rl.check_and_record_at(ip(3), start + Duration::from_secs(1)).unwrap();

    assert_eq!(rl.tracked_clients(), 3);
}

#[test]
fn quota_counts_down_per_client() {
    let rl = limiter(3, 100, 100);
    let now = Instant::now();

    assert_eq!(rl.check_and_record_at(ip(1), now).unwrap(), Quota { limit: 3, remaining: 2 });
    assert_eq!(rl.check_and_record_at(ip(1), now).unwrap(), Quota { limit: 3, remaining: 1 });
    assert_eq!(rl.check_and_record_at(ip(2), now).unwrap().remaining, 2);
    assert_eq!(rl.check_and_record_at(ip(1), now).unwrap().remaining, 0);
    assert!(rl.check_and_record_at(ip(1), now).is_err());
}

#[test]
fn no_global_limit_admits_many_clients() {
    let rl = RateLimiter::new(RateLimitConfig { per_client_limit: 1, ..RateLimitConfig::general() });
    let now = Instant::now();

    for i in 0..500 {
        assert!(rl.check_and_record_at(ip(i), now).is_ok());
    }
    assert!(rl.inner.lock().unwrap().global_requests.is_empty());
}

#[test]
fn general_defaults_are_100_per_15_minutes() {
    let cfg = RateLimitConfig::general();
    assert_eq!(cfg.per_client_limit, 100);
    assert_eq!(cfg.window, Duration::from_secs(900));
    assert_eq!(cfg.global_limit, None);
}
