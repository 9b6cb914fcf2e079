use super::*;

#[test]
fn defaults_are_valid() {
    let opts = PlayerOpts::default();
    assert_eq!(opts.pool_capacity, 150);
    assert_eq!(opts.idle_sleep(), Duration::from_millis(1));
    opts.validate().unwrap();
}

#[test]
fn json_fields_are_optional() {
    let opts = PlayerOpts::from_json(r#"{ "pool_capacity": 32, "refresh_hz": null }"#).unwrap();
    assert_eq!(opts.pool_capacity, 32);
    assert_eq!(opts.refresh_hz, None);
    assert_eq!(opts.screen, ScreenMetrics::default());

    let opts =
        PlayerOpts::from_json(r#"{ "screen": { "width": 800, "height": 600 } }"#).unwrap();
    assert_eq!(opts.screen.width, 800);

    assert!(PlayerOpts::from_json("{ not json").is_err());
}

#[test]
fn overrides_ignore_garbage() {
    let opts = PlayerOpts::default().with_overrides_from(|key| match key {
        ENV_POOL_CAPACITY => Some("64".to_string()),
        ENV_IDLE_SLEEP_MS => Some("soon".to_string()),
        _ => None,
    });
    assert_eq!(opts.pool_capacity, 64);
    assert_eq!(opts.idle_sleep_ms, 1);

    let opts = PlayerOpts::default().with_overrides_from(|_| Some("0".to_string()));
    assert_eq!(opts.pool_capacity, 150);
}

#[test]
fn validate_rejects_degenerate_values() {
    let bad = [
        PlayerOpts {
            pool_capacity: 0,
            ..PlayerOpts::default()
        },
        PlayerOpts {
            idle_sleep_ms: 0,
            ..PlayerOpts::default()
        },
        PlayerOpts {
            refresh_hz: Some(0),
            ..PlayerOpts::default()
        },
        PlayerOpts {
            screen: ScreenMetrics {
                width: 0,
                height: 1,
            },
            ..PlayerOpts::default()
        },
    ];
    for opts in bad {
        assert!(opts.validate().is_err(), "{opts:?} should be rejected");
    }
}
