// Synthetic heading publisher for field-centric testing without an IMU node
//
// Publishes a yaw that starts at --yaw and advances at --yaw-rate deg/s,
// wrapped to [-pi, pi] like a real IMU report.

use clap::Parser;
use std::f64::consts::PI;
use std::time::{Duration, Instant};
use tracing::info;

use mecanum_zenoh_runtime::config::TOPIC_HEADING;
use mecanum_zenoh_runtime::messages::HeadingReport;

#[derive(Parser, Debug)]
#[command(about = "Publish a synthetic heading for the mecanum runtime")]
struct Args {
    /// Zenoh topic to publish heading reports on
    #[arg(long, default_value = TOPIC_HEADING)]
    topic: String,

    /// Publish rate in Hz
    #[arg(long, default_value_t = 50)]
    rate: u64,

    /// Initial yaw in degrees
    #[arg(long, default_value_t = 0.0)]
    yaw: f64,

    /// Yaw rate in degrees per second (0 = hold a fixed heading)
    #[arg(long, default_value_t = 0.0)]
    yaw_rate: f64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;
    let publisher = session.declare_publisher(args.topic.clone()).await?;

    info!(
        "Publishing on {} at {}Hz, yaw {} deg, rate {} deg/s",
        args.topic, args.rate, args.yaw, args.yaw_rate
    );

    let started = Instant::now();
    let mut tick = tokio::time::interval(Duration::from_millis(1000 / args.rate.max(1)));

    loop {
        tick.tick().await;

        let yaw_deg = args.yaw + args.yaw_rate * started.elapsed().as_secs_f64();
        let report = HeadingReport {
            yaw_rad: wrap_to_pi(yaw_deg.to_radians()),
        };
        publisher.put(serde_json::to_string(&report)?).await?;
    }
}

fn wrap_to_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(2.0 * PI);
    if wrapped > PI { wrapped - 2.0 * PI } else { wrapped }
}
