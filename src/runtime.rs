// 50 Hz control loop with a gamepad-stream watchdog
//
// If the teleop node crashes and stops publishing snapshots, the watchdog
// substitutes a neutral snapshot so the drivebase coasts to zero power
// instead of replaying the last command forever.

use std::time::Instant;
use tokio::time::interval;
use tracing::{info, warn};

use crate::config::{
    LOOP_HZ, PAD_TIMEOUT, TOPIC_HEADING, TOPIC_HEALTH, TOPIC_PAD, TOPIC_RT_IMU_INIT,
    TOPIC_RT_WHEEL_DIR, TOPIC_RT_WHEELS,
};
use crate::drive::{DriveUpdate, MecanumDrive};
use crate::error::RuntimeError;
use crate::gamepad::GamepadTracker;
use crate::messages::{
    GamepadState, HeadingReport, ImuInitCommand, RuntimeHealth, WheelCommand,
    WheelDirectionCommand,
};

pub struct Runtime {
    pad: GamepadTracker,
    drive: MecanumDrive,
    latest_snapshot: GamepadState,
    snapshot_received_at: Option<Instant>,
    latest_heading: f64,
    health: RuntimeHealth,
}

impl Runtime {
    pub fn new(drive: MecanumDrive) -> Self {
        Self {
            pad: GamepadTracker::new(),
            drive,
            latest_snapshot: GamepadState::default(),
            snapshot_received_at: None,
            latest_heading: 0.0,
            health: RuntimeHealth::PadStale, // Start stale until first snapshot
        }
    }

    /// Record an incoming gamepad snapshot
    fn on_snapshot(&mut self, snapshot: GamepadState) {
        self.latest_snapshot = snapshot;
        self.snapshot_received_at = Some(Instant::now());
    }

    /// Record an incoming heading report
    fn on_heading(&mut self, report: HeadingReport) {
        self.latest_heading = report.yaw_rad;
    }

    /// Advance one control cycle: apply the watchdog, feed the edge tracker,
    /// and run the drive mode machine.
    fn tick(&mut self) -> DriveUpdate {
        let stale = match self.snapshot_received_at {
            Some(at) => at.elapsed() > PAD_TIMEOUT,
            None => true,
        };

        let raw = if stale {
            if self.health != RuntimeHealth::PadStale {
                warn!("gamepad stream stale, substituting neutral input");
            }
            self.health = RuntimeHealth::PadStale;
            GamepadState::default()
        } else {
            self.health = RuntimeHealth::Ok;
            self.latest_snapshot
        };

        self.pad.update(raw);
        self.drive.update(&self.pad, self.latest_heading)
    }

    pub fn health(&self) -> RuntimeHealth {
        self.health
    }
}

pub async fn run() -> Result<(), RuntimeError> {
    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;

    info!("Setting up publishers and subscribers...");
    let sub_pad = session.declare_subscriber(TOPIC_PAD).await?;
    let sub_heading = session.declare_subscriber(TOPIC_HEADING).await?;
    let pub_wheels = session.declare_publisher(TOPIC_RT_WHEELS).await?;
    let pub_imu_init = session.declare_publisher(TOPIC_RT_IMU_INIT).await?;
    let pub_wheel_dir = session.declare_publisher(TOPIC_RT_WHEEL_DIR).await?;
    let pub_health = session.declare_publisher(TOPIC_HEALTH).await?;

    let mut runtime = Runtime::new(MecanumDrive::default());
    let mut tick = interval(std::time::Duration::from_millis(1000 / LOOP_HZ));

    info!(
        "Runtime started: {}Hz loop, {}ms pad watchdog timeout",
        LOOP_HZ,
        PAD_TIMEOUT.as_millis()
    );
    info!("Subscribed to: {}, {}", TOPIC_PAD, TOPIC_HEADING);
    info!("Publishing to: {}, {}", TOPIC_RT_WHEELS, TOPIC_HEALTH);

    loop {
        tick.tick().await;

        // 1. Drain pending gamepad snapshots (non-blocking), keep latest
        while let Ok(Some(sample)) = sub_pad.try_recv() {
            let payload = sample.payload().to_bytes();
            match serde_json::from_slice::<GamepadState>(&payload) {
                Ok(snapshot) => runtime.on_snapshot(snapshot),
                Err(e) => warn!("Failed to parse gamepad snapshot: {}", e),
            }
        }

        // 2. Drain pending heading reports, keep latest
        while let Ok(Some(sample)) = sub_heading.try_recv() {
            let payload = sample.payload().to_bytes();
            match serde_json::from_slice::<HeadingReport>(&payload) {
                Ok(report) => runtime.on_heading(report),
                Err(e) => warn!("Failed to parse heading report: {}", e),
            }
        }

        // 3. Advance the drive pipeline one cycle
        let update = runtime.tick();

        // 4. Publish wheel powers
        let wheels = WheelCommand {
            front_left: update.powers.front_left,
            front_right: update.powers.front_right,
            rear_left: update.powers.rear_left,
            rear_right: update.powers.rear_right,
        };
        let wheels_json = serde_json::to_string(&wheels)?;
        pub_wheels.put(wheels_json).await?;

        // 5. Forward any debug-mode side requests
        if let Some(orientation) = update.imu_init {
            let init_json = serde_json::to_string(&ImuInitCommand { orientation })?;
            pub_imu_init.put(init_json).await?;
        }
        if let Some((wheel, direction)) = update.direction_change {
            let dir_json = serde_json::to_string(&WheelDirectionCommand { wheel, direction })?;
            pub_wheel_dir.put(dir_json).await?;
        }

        // 6. Publish health
        let health_json = serde_json::to_string(&runtime.health())?;
        pub_health.put(health_json).await?;
    }
}
