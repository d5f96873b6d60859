//! Drive the SDK against a scripted receiver
//!
//! No hardware required: the mock client plays the part of a powered-on
//! STR-ZA2100ES. Run with:
//!
//! ```text
//! cargo run --example scripted_receiver --features test-support
//! ```

use std::sync::Arc;

use cisip_client::MockFeatureClient;
use cisip2_sdk::{
    init_logging, FeatureClient, FeatureValue, LoggingMode, Notification, ReceiverSystem,
    SystemConfig, Zone, DEFAULT_PORT,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingMode::Development)?;

    let mock = Arc::new(MockFeatureClient::with_features([
        ("main.power", FeatureValue::from("on")),
        ("main.input", FeatureValue::from("dvd")),
        ("main.volumestep", FeatureValue::from(32i64)),
        ("main.mute", FeatureValue::from("off")),
        ("audio.soundfield", FeatureValue::from("dolby")),
        ("zone2.power", FeatureValue::from("off")),
        ("zone3.power", FeatureValue::from("off")),
        ("network.macaddress", FeatureValue::from("AA:BB:CC:DD:EE:FF")),
        ("system.modeltype", FeatureValue::from("Z21")),
        ("system.version", FeatureValue::from("1.402")),
    ]));

    let system = ReceiverSystem::connect(
        Arc::clone(&mock) as Arc<dyn FeatureClient>,
        "10.0.0.40",
        DEFAULT_PORT,
        SystemConfig::default(),
    )
    .await?;

    println!(
        "{} ({})",
        system.identity().device_name(),
        system.identity().hardware_model
    );
    for controller in system.controllers() {
        println!(
            "  {}: power={:?} source={:?} volume={:?}",
            controller.zone(),
            controller.power(),
            controller.source(),
            controller.volume_level(),
        );
    }

    // Issue a few commands and show what went on the wire.
    let main = system.controller(Zone::Main)?;
    main.select_source("TV").await?;
    main.set_volume_level(0.40).await?;
    main.select_sound_mode("2ch Stereo").await?;
    for (key, value) in mock.set_calls() {
        println!("  sent {key} = {value}");
    }

    // The device pushes a change; the projection follows.
    mock.notify(Notification::new("main.volumestep", 45i64));
    println!("  volume after notification: {:?}", main.volume_level());

    system.shutdown().await?;
    Ok(())
}
