use chrono::{DateTime, TimeZone, Utc};
use connlog_history::{WindowCase, classify};
use domain::WindowSpec;
use std::time::Duration;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("timestamp")
}

const NOW: i64 = 1_000_000;
const SINCE: i64 = 10_000;
const UNTIL: i64 = 20_000;
const RANGE: u64 = 600;

fn spec(range: bool, since: bool, until: bool) -> WindowSpec {
    WindowSpec::new(
        if range { Duration::from_secs(RANGE) } else { Duration::ZERO },
        since.then(|| at(SINCE)),
        until.then(|| at(UNTIL)),
    )
}

#[test]
fn all_flag_combinations_map_to_one_case() {
    let range = RANGE as i64;
    let cases = [
        ((true, true, true), 1, (Some(SINCE), Some(UNTIL)), true, true),
        ((false, true, true), 1, (Some(SINCE), Some(UNTIL)), true, true),
        ((true, false, true), 2, (Some(UNTIL - range), Some(UNTIL)), true, true),
        ((true, true, false), 3, (Some(SINCE), Some(SINCE + range)), true, true),
        ((true, false, false), 4, (Some(NOW - range), Some(NOW)), true, false),
        ((false, false, true), 5, (None, Some(UNTIL)), false, true),
        ((false, true, false), 6, (Some(SINCE), None), true, false),
        ((false, false, false), 7, (None, Some(NOW)), false, false),
    ];
    for ((range, since, until), ordinal, (lower, upper), before, after) in cases {
        let case = classify(&spec(range, since, until), at(NOW)).expect("classify");
        let label = format!("range={range} since={since} until={until}");
        assert_eq!(case.ordinal(), ordinal, "{label}");
        assert_eq!(case.bounds(), (lower.map(at), upper.map(at)), "{label}");
        assert_eq!(case.needs_edge_before(), before, "{label}");
        assert_eq!(case.needs_edge_after(), after, "{label}");
    }
}

#[test]
fn since_and_until_win_over_range() {
    let case = classify(&spec(true, true, true), at(NOW)).expect("classify");
    assert_eq!(
        case,
        WindowCase::SinceUntil {
            since: at(SINCE),
            until: at(UNTIL)
        }
    );
}

#[test]
fn unrepresentable_range_is_rejected() {
    let spec = WindowSpec::new(Duration::from_secs(u64::MAX), None, None);
    assert!(classify(&spec, at(NOW)).is_err());
}

#[test]
fn zero_instant_timestamps_count_as_unset() {
    let zero = DateTime::parse_from_rfc3339("0001-01-01T00:00:00Z")
        .expect("zero")
        .with_timezone(&Utc);
    let spec = WindowSpec {
        range: Duration::from_secs(RANGE),
        since: Some(zero),
        until: Some(zero),
    };
    let case = classify(&spec, at(NOW)).expect("classify");
    assert_eq!(case.ordinal(), 4);
    assert_eq!(case.bounds(), (Some(at(NOW - RANGE as i64)), Some(at(NOW))));

    let parsed = WindowSpec::parse(None, Some("0001-01-01T00:00:00Z"), None).expect("parse");
    assert_eq!(classify(&parsed, at(NOW)).expect("classify").ordinal(), 7);
}
