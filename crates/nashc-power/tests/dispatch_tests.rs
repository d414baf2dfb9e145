//! Integration tests for the power mode/boost dispatcher

use nashc_hal::HalError;
use nashc_power::mock::{MockVendor, VendorCall};
use nashc_power::{Boost, Mode, Power, PowerConfig};
use std::fs;
use tempfile::TempDir;

fn power_with_node(vendor: MockVendor, dir: &TempDir) -> Power<MockVendor> {
    let config = PowerConfig {
        vendor_lib: "libpowerhal.so".into(),
        double_tap_node: dir.path().join("double_tap_enable"),
    };
    Power::with_config(vendor, &config)
}

#[test]
fn test_double_tap_writes_node() {
    let dir = TempDir::new().unwrap();
    let vendor = MockVendor::new();
    let power = power_with_node(vendor.clone(), &dir);

    power.set_mode(Mode::DoubleTapToWake, true).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("double_tap_enable")).unwrap(),
        "1\n"
    );

    power.set_mode(Mode::DoubleTapToWake, false).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("double_tap_enable")).unwrap(),
        "0\n"
    );

    // Touchpanel writes never reach the vendor library.
    assert!(vendor.calls().is_empty());
}

#[test]
fn test_double_tap_write_failure_is_swallowed() {
    let dir = TempDir::new().unwrap();
    let vendor = MockVendor::new();
    let config = PowerConfig {
        vendor_lib: "libpowerhal.so".into(),
        double_tap_node: dir.path().join("missing").join("double_tap_enable"),
    };
    let power = Power::with_config(vendor, &config);

    // The node cannot be opened, but the caller still sees success.
    assert!(power.set_mode(Mode::DoubleTapToWake, true).is_ok());
}

#[test]
fn test_launch_holds_single_handle() {
    let dir = TempDir::new().unwrap();
    let vendor = MockVendor::new();
    let power = power_with_node(vendor.clone(), &dir);

    power.set_mode(Mode::Launch, true).unwrap();
    power.set_mode(Mode::Launch, false).unwrap();
    power.set_mode(Mode::Launch, true).unwrap();

    // on, off, on: each new acquire is preceded by the release of the
    // previous handle, so at most one lock is ever outstanding.
    let calls = vendor.calls();
    assert_eq!(calls.len(), 3);

    let first_handle = match calls[0] {
        VendorCall::LockHint {
            hint, duration_ms, ..
        } => {
            assert_eq!(hint, 11);
            assert_eq!(duration_ms, 30_000);
            1
        }
        ref other => panic!("expected LockHint, got {other:?}"),
    };
    assert_eq!(
        calls[1],
        VendorCall::LockRel {
            handle: first_handle
        }
    );
    assert!(matches!(calls[2], VendorCall::LockHint { hint: 11, .. }));
}

#[test]
fn test_launch_reenable_releases_before_acquiring() {
    let dir = TempDir::new().unwrap();
    let vendor = MockVendor::new();
    let power = power_with_node(vendor.clone(), &dir);

    power.set_mode(Mode::Launch, true).unwrap();
    power.set_mode(Mode::Launch, true).unwrap();

    let calls = vendor.calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(calls[0], VendorCall::LockHint { .. }));
    assert_eq!(calls[1], VendorCall::LockRel { handle: 1 });
    assert!(matches!(calls[2], VendorCall::LockHint { .. }));
}

#[test]
fn test_low_power_gates_launch_and_boosts() {
    let dir = TempDir::new().unwrap();
    let vendor = MockVendor::new();
    let power = power_with_node(vendor.clone(), &dir);

    power.set_mode(Mode::LowPower, true).unwrap();

    power.set_mode(Mode::Launch, true).unwrap();
    power.set_boost(Boost::Interaction, 100).unwrap();
    power.set_boost(Boost::CameraShot, 500).unwrap();
    assert!(vendor.calls().is_empty());

    // Leaving low power restores normal dispatch.
    power.set_mode(Mode::LowPower, false).unwrap();
    power.set_boost(Boost::Interaction, 100).unwrap();
    assert_eq!(vendor.lock_hint_count(), 1);
}

#[test]
fn test_interaction_boost_duration_clamp() {
    let dir = TempDir::new().unwrap();
    let vendor = MockVendor::new();
    let power = power_with_node(vendor.clone(), &dir);

    power.set_boost(Boost::Interaction, 0).unwrap();
    power.set_boost(Boost::Interaction, -5).unwrap();
    power.set_boost(Boost::Interaction, 5).unwrap();

    let durations: Vec<i32> = vendor
        .calls()
        .iter()
        .map(|c| match c {
            VendorCall::LockHint { duration_ms, .. } => *duration_ms,
            other => panic!("expected LockHint, got {other:?}"),
        })
        .collect();

    assert_eq!(durations, vec![80, 80, 5]);
}

#[test]
fn test_non_interaction_boost_duration_passes_through() {
    let dir = TempDir::new().unwrap();
    let vendor = MockVendor::new();
    let power = power_with_node(vendor.clone(), &dir);

    // Only INTERACTION gets the indefinite-duration guard.
    power.set_boost(Boost::CameraShot, 0).unwrap();

    assert!(matches!(
        vendor.calls()[0],
        VendorCall::LockHint {
            hint: 5,
            duration_ms: 0,
            ..
        }
    ));
}

#[test]
fn test_interactive_toggles_scn_hints() {
    let dir = TempDir::new().unwrap();
    let vendor = MockVendor::new();
    let power = power_with_node(vendor.clone(), &dir);

    power.set_mode(Mode::Interactive, false).unwrap();
    power.set_mode(Mode::Interactive, true).unwrap();

    assert_eq!(
        vendor.calls(),
        vec![VendorCall::ScnDisableAll, VendorCall::ScnRestoreAll]
    );
}

#[test]
fn test_unhandled_modes_are_inert() {
    let dir = TempDir::new().unwrap();
    let vendor = MockVendor::new();
    let power = power_with_node(vendor.clone(), &dir);

    for mode in [
        Mode::SustainedPerformance,
        Mode::FixedPerformance,
        Mode::Vr,
        Mode::ExpensiveRendering,
        Mode::DeviceIdle,
        Mode::DisplayInactive,
        Mode::AudioStreamingLowLatency,
        Mode::CameraStreamingSecure,
        Mode::CameraStreamingLow,
        Mode::CameraStreamingMid,
        Mode::CameraStreamingHigh,
    ] {
        assert!(power.set_mode(mode, true).is_ok());
        assert!(power.set_mode(mode, false).is_ok());
    }

    assert!(vendor.calls().is_empty());
}

#[test]
fn test_supported_is_not_actionable() {
    let dir = TempDir::new().unwrap();
    let vendor = MockVendor::new();
    let power = power_with_node(vendor.clone(), &dir);

    // VR sits inside the range, so it reports supported, yet setting it
    // has no effect.
    assert!(power.is_mode_supported(Mode::Vr as i32));
    power.set_mode(Mode::Vr, true).unwrap();
    assert!(vendor.calls().is_empty());

    assert!(!power.is_mode_supported(99));
    assert!(!power.is_boost_supported(-3));
    assert!(power.is_boost_supported(Boost::MlAcc as i32));
}

#[test]
fn test_hint_sessions_rejected() {
    let dir = TempDir::new().unwrap();
    let power = power_with_node(MockVendor::new(), &dir);

    assert!(matches!(
        power.create_hint_session(1, 1000, &[1, 2], 1_000_000),
        Err(HalError::Unsupported(_))
    ));
    assert!(matches!(
        power.hint_session_preferred_rate(),
        Err(HalError::Unsupported(_))
    ));
}
