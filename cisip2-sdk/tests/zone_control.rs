//! End-to-end zone control against a scripted client
//!
//! Brings up a full `ReceiverSystem` over `MockFeatureClient` and exercises
//! the per-zone read models and command surfaces, including the vocabulary
//! edges: many-to-one source display, preferred command tokens, the
//! synthetic follow-main source, and unknown-name no-ops.

use std::sync::Arc;

use proptest::prelude::*;

use cisip_client::MockFeatureClient;
use cisip2_sdk::{
    FeatureClient, FeatureValue, Notification, Power, ReceiverSystem, SystemConfig,
    VolumeDisplayMode, Zone, ZoneStateStore, DEFAULT_PORT,
};

fn primed_mock() -> Arc<MockFeatureClient> {
    Arc::new(MockFeatureClient::with_features([
        ("main.power", FeatureValue::from("on")),
        ("main.input", FeatureValue::from("dvd")),
        ("main.volumestep", FeatureValue::from(30i64)),
        ("main.mute", FeatureValue::from("off")),
        ("audio.soundfield", FeatureValue::from("2ch")),
        ("zone2.power", FeatureValue::from("on")),
        ("zone2.input", FeatureValue::from("tv")),
        ("zone2.volumestep", FeatureValue::from(20i64)),
        ("zone2.mute", FeatureValue::from("off")),
        ("zone3.power", FeatureValue::from("off")),
        ("network.macaddress", FeatureValue::from("AA:BB:CC:DD:EE:FF")),
        ("system.modeltype", FeatureValue::from("Z21")),
        ("system.version", FeatureValue::from("1.402")),
    ]))
}

async fn connect(mock: &Arc<MockFeatureClient>) -> ReceiverSystem {
    ReceiverSystem::connect(
        Arc::clone(mock) as Arc<dyn FeatureClient>,
        "10.0.0.40",
        DEFAULT_PORT,
        SystemConfig::default(),
    )
    .await
    .expect("system should connect")
}

#[tokio::test]
async fn test_initial_state_projection() {
    let mock = primed_mock();
    let system = connect(&mock).await;

    let main = system.controller(Zone::Main).unwrap();
    assert_eq!(main.power(), Some(Power::On));
    assert_eq!(main.source().as_deref(), Some("BD/DVD"));
    assert_eq!(main.volume_level(), Some(0.30));
    assert_eq!(main.is_volume_muted(), Some(false));
    assert_eq!(main.sound_mode().as_deref(), Some("2ch Stereo"));

    let zone3 = system.controller(Zone::Zone3).unwrap();
    assert_eq!(zone3.power(), Some(Power::Off));
    assert_eq!(zone3.source(), None);
    assert_eq!(zone3.volume_level(), None);

    assert!(mock.has_callback());
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_device_identity_resolution() {
    let mock = primed_mock();
    let system = connect(&mock).await;

    let identity = system.identity();
    assert_eq!(identity.mac_address.as_deref(), Some("AA:BB:CC:DD:EE:FF"));
    assert_eq!(identity.hardware_model, "STR-ZA2100ES");
    assert_eq!(identity.software_version.as_deref(), Some("1.402"));
    assert_eq!(identity.device_name(), "Sony Receiver aabbccddeeff");

    let zone2 = system.controller(Zone::Zone2).unwrap();
    assert_eq!(zone2.unique_id(), "cisip2_aabbccddeeff_zone2");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_source_display_is_many_to_one() {
    let mock = primed_mock();
    let system = connect(&mock).await;
    let main = system.controller(Zone::Main).unwrap();

    // Primed with "dvd".
    assert_eq!(main.source().as_deref(), Some("BD/DVD"));

    // The alias token displays identically.
    mock.notify(Notification::new("main.input", "bd"));
    assert_eq!(main.source().as_deref(), Some("BD/DVD"));

    // Unmapped tokens pass through raw.
    mock.notify(Notification::new("main.input", "phono"));
    assert_eq!(main.source().as_deref(), Some("phono"));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_source_token_displays_as_follow_main() {
    let mock = primed_mock();
    let system = connect(&mock).await;
    let zone2 = system.controller(Zone::Zone2).unwrap();

    // A secondary zone tracking the main zone reports the "source" token.
    mock.notify(Notification::new("zone2.input", "source"));
    assert_eq!(zone2.source().as_deref(), Some("MAIN SOURCE"));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_select_source_sends_preferred_token() {
    let mock = primed_mock();
    let system = connect(&mock).await;
    let main = system.controller(Zone::Main).unwrap();

    main.select_source("BD/DVD").await.unwrap();

    assert_eq!(
        mock.last_set(),
        Some(("main.input".to_string(), FeatureValue::from("bd")))
    );
    // Never the alias.
    assert!(!mock
        .set_calls()
        .iter()
        .any(|(_, v)| v == &FeatureValue::from("dvd")));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_source_sends_nothing() {
    let mock = primed_mock();
    let system = connect(&mock).await;
    let main = system.controller(Zone::Main).unwrap();

    main.select_source("LASERDISC").await.unwrap();
    assert!(mock.set_calls().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_secondary_zone_follows_main_source() {
    let mock = primed_mock();
    mock.prime_feature("main.input", "tv");
    let system = connect(&mock).await;
    let zone2 = system.controller(Zone::Zone2).unwrap();

    zone2.select_source("MAIN SOURCE").await.unwrap();

    assert_eq!(
        mock.last_set(),
        Some(("zone2.input".to_string(), FeatureValue::from("tv")))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_follow_main_is_not_accepted_on_main_zone() {
    let mock = primed_mock();
    let system = connect(&mock).await;
    let main = system.controller(Zone::Main).unwrap();

    main.select_source("MAIN SOURCE").await.unwrap();
    assert!(mock.set_calls().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_source_lists_per_zone() {
    let mock = primed_mock();
    let system = connect(&mock).await;

    let main_list = system.controller(Zone::Main).unwrap().source_list();
    assert!(!main_list.contains(&"MAIN SOURCE"));
    assert!(main_list.contains(&"BD/DVD"));

    let zone2_list = system.controller(Zone::Zone2).unwrap().source_list();
    assert_eq!(zone2_list.first(), Some(&"MAIN SOURCE"));
    assert_eq!(zone2_list.len(), main_list.len() + 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_mute_notification_routes_to_owning_zone_only() {
    let mock = primed_mock();
    let system = connect(&mock).await;
    let main = system.controller(Zone::Main).unwrap();
    let zone2 = system.controller(Zone::Zone2).unwrap();

    mock.notify(Notification::new("main.mute", "on"));
    assert_eq!(main.is_volume_muted(), Some(true));
    assert_eq!(zone2.is_volume_muted(), Some(false));

    // The same event for zone2 must not touch main.
    mock.notify(Notification::new("zone2.mute", "off"));
    assert_eq!(main.is_volume_muted(), Some(true));
    assert_eq!(zone2.is_volume_muted(), Some(false));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_power_commands() {
    let mock = primed_mock();
    let system = connect(&mock).await;

    system
        .controller(Zone::Zone3)
        .unwrap()
        .turn_on()
        .await
        .unwrap();
    assert_eq!(
        mock.last_set(),
        Some(("zone3.power".to_string(), FeatureValue::from("on")))
    );

    system
        .controller(Zone::Main)
        .unwrap()
        .turn_off()
        .await
        .unwrap();
    assert_eq!(
        mock.last_set(),
        Some(("main.power".to_string(), FeatureValue::from("off")))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_mute_command() {
    let mock = primed_mock();
    let system = connect(&mock).await;
    let main = system.controller(Zone::Main).unwrap();

    main.set_mute(true).await.unwrap();
    assert_eq!(
        mock.last_set(),
        Some(("main.mute".to_string(), FeatureValue::from("on")))
    );

    main.set_mute(false).await.unwrap();
    assert_eq!(
        mock.last_set(),
        Some(("main.mute".to_string(), FeatureValue::from("off")))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_set_volume_emits_exact_step_for_every_level() {
    let mock = primed_mock();
    let system = connect(&mock).await;
    let main = system.controller(Zone::Main).unwrap();

    for step in 0..=100i64 {
        main.set_volume_level(step as f32 / 100.0).await.unwrap();
        assert_eq!(
            mock.last_set(),
            Some(("main.volumestep".to_string(), FeatureValue::from(step))),
            "step {step} did not round-trip"
        );
    }

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_decibel_volume_mode() {
    let mock = primed_mock();
    let config = SystemConfig {
        volume_mode: VolumeDisplayMode::Decibel,
        ..SystemConfig::default()
    };
    let system = ReceiverSystem::connect(
        Arc::clone(&mock) as Arc<dyn FeatureClient>,
        "10.0.0.40",
        DEFAULT_PORT,
        config,
    )
    .await
    .unwrap();

    let main = system.controller(Zone::Main).unwrap();
    main.set_volume_level(1.0).await.unwrap();
    assert_eq!(
        mock.last_set(),
        Some(("main.volumedb".to_string(), FeatureValue::from(23.0)))
    );

    main.set_volume_level(0.0).await.unwrap();
    assert_eq!(
        mock.last_set(),
        Some(("main.volumedb".to_string(), FeatureValue::from(-92.0)))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_relative_volume_pulses() {
    let mock = primed_mock();
    let system = connect(&mock).await;
    let zone2 = system.controller(Zone::Zone2).unwrap();

    zone2.volume_up().await.unwrap();
    assert_eq!(
        mock.last_set(),
        Some(("zone2.volume+".to_string(), FeatureValue::from("pulse")))
    );

    zone2.volume_down().await.unwrap();
    assert_eq!(
        mock.last_set(),
        Some(("zone2.volume-".to_string(), FeatureValue::from("pulse")))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_select_sound_mode() {
    let mock = primed_mock();
    let system = connect(&mock).await;
    let main = system.controller(Zone::Main).unwrap();

    main.select_sound_mode("Dolby Surround").await.unwrap();
    assert_eq!(
        mock.last_set(),
        Some(("audio.soundfield".to_string(), FeatureValue::from("dolby")))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_sound_mode_is_a_noop() {
    let mock = primed_mock();
    let system = connect(&mock).await;
    let main = system.controller(Zone::Main).unwrap();

    main.select_sound_mode("Quantum Surround").await.unwrap();

    assert!(mock.set_calls().is_empty());
    assert_eq!(main.sound_mode().as_deref(), Some("2ch Stereo"));

    system.shutdown().await.unwrap();
}

proptest! {
    /// Any volume-step notification projects to exactly step/100.
    #[test]
    fn prop_volume_step_notification_round_trips(step in 0i64..=100) {
        let store = ZoneStateStore::new(Zone::Main);
        store.apply_notification(&Notification::new("main.volumestep", step));
        prop_assert_eq!(store.volume_level(), Some(step as f32 / 100.0));
    }

    /// Foreign-zone notifications never mutate another zone's store.
    #[test]
    fn prop_foreign_zone_events_are_inert(
        step in 0i64..=100,
        feature in prop::sample::select(vec![
            "zone2.power", "zone2.mute", "zone2.volumestep",
            "zone3.input", "audio.soundfield",
        ])
    ) {
        let store = ZoneStateStore::new(Zone::Main);
        store.apply_notification(&Notification::new("main.volumestep", 50i64));
        let before = store.snapshot();

        store.apply_notification(&Notification::new(feature, step));
        prop_assert_eq!(store.snapshot(), before);
    }
}
