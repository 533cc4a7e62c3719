//! Integration tests for ReplayGain settings and scaling

use chord_core::{ConfigBlock, ConfigParam};
use chord_replaygain::{
    parse_preamp, ReplayGainConfig, ReplayGainError, ReplayGainInfo, ReplayGainMode,
    ReplayGainTuple, MAX_SCALE,
};
use proptest::prelude::*;

fn startup_block() -> ConfigBlock {
    ConfigBlock::new(12)
        .with_param("mode", ConfigParam::new("album", 13))
        .with_param("preamp", ConfigParam::new("3", 14))
        .with_param("missing_preamp", ConfigParam::new("-6", 15))
        .with_param("limit", ConfigParam::new("yes", 16))
}

#[test]
fn startup_settings_flow_into_scaling() {
    let config = ReplayGainConfig::from_block(&startup_block()).unwrap();
    assert_eq!(config.mode, ReplayGainMode::Album);

    let untagged = ReplayGainInfo::default();
    assert!(!untagged.is_defined());
    assert!((untagged.scale(&config) - 0.501_187).abs() < 1e-5);

    let tagged = ReplayGainInfo {
        track: ReplayGainTuple::new(-9.0, 0.8),
        album: ReplayGainTuple::new(-7.0, 0.95),
    };
    let expected = 10f32.powf(-7.0 / 20.0) * config.preamp;
    assert!((tagged.scale(&config) - expected).abs() < 1e-5);
}

#[test]
fn startup_fails_fast_on_first_bad_line() {
    let block = startup_block()
        .with_param("preamp", ConfigParam::new("eleven", 20))
        .with_param("limit", ConfigParam::new("sometimes", 21));

    let err = ReplayGainConfig::from_block(&block).unwrap_err();
    assert!(matches!(err, ReplayGainError::Param { line: 20, .. }));
}

#[test]
fn settings_are_plain_values() {
    let config = ReplayGainConfig::from_block(&startup_block()).unwrap();
    let copy = config;
    assert_eq!(copy, config);
}

proptest! {
    /// Property: with limiting on, the scaled peak never exceeds full scale
    #[test]
    fn limited_scale_never_clips(
        gain in -60.0f32..30.0,
        peak in 0.01f32..2.0,
        preamp_db in -15.0f32..15.0,
    ) {
        let config = ReplayGainConfig {
            mode: ReplayGainMode::Track,
            preamp: parse_preamp(&preamp_db.to_string()).unwrap(),
            missing_preamp: 1.0,
            limit: true,
        };
        let scale = ReplayGainTuple::new(gain, peak).calculate_scale(&config);
        prop_assert!(scale * peak <= 1.0 + 1e-4);
        prop_assert!(scale <= MAX_SCALE);
        prop_assert!(scale.is_finite());
    }

    /// Property: every value inside the range parses, every value outside fails
    #[test]
    fn preamp_range_is_enforced(db in -30.0f64..30.0) {
        let result = parse_preamp(&db.to_string());
        prop_assert_eq!(result.is_ok(), (-15.0..=15.0).contains(&db));
    }
}
