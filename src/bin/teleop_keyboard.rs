// Keyboard teleop: synthesizes gamepad snapshots from the terminal
//
// WASD = left stick, J/L = right stick X (rotation), U/O = triggers,
// I/K/Z/C = face buttons (Y/A/X/B), arrow keys = D-pad, Q/E = bumpers,
// Esc = quit. Keys act while held (crossterm key repeat refreshes them).

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::info;

use mecanum_zenoh_runtime::config::TOPIC_PAD;
use mecanum_zenoh_runtime::messages::GamepadState;

// A key counts as down until this long after its last press/repeat event
const KEY_ACTIVE_MS: u64 = 150;

#[derive(Parser, Debug)]
#[command(about = "Publish synthesized gamepad snapshots for the mecanum runtime")]
struct Args {
    /// Zenoh topic to publish snapshots on
    #[arg(long, default_value = TOPIC_PAD)]
    topic: String,

    /// Publish rate in Hz
    #[arg(long, default_value_t = 50)]
    rate: u64,

    /// Stick deflection applied while a movement key is down
    #[arg(long, default_value_t = 1.0)]
    stick_scale: f64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;
    let publisher = session.declare_publisher(args.topic.clone()).await?;

    info!(
        "Publishing on {} at {}Hz. WASD=move, J/L=rotate, Q/E=bumpers, arrows=dpad, Esc=quit",
        args.topic, args.rate
    );

    enable_raw_mode()?;
    let result = run_teleop(&publisher, &args).await;
    disable_raw_mode()?;

    result
}

async fn run_teleop(
    publisher: &zenoh::pubsub::Publisher<'_>,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let poll_timeout = Duration::from_millis(1000 / args.rate.max(1));
    let mut last_seen: HashMap<KeyCode, Instant> = HashMap::new();

    loop {
        if event::poll(poll_timeout)? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                let pressed = kind == KeyEventKind::Press || kind == KeyEventKind::Repeat;
                if pressed {
                    if code == KeyCode::Esc {
                        break;
                    }
                    last_seen.insert(code, Instant::now());
                }
            }
        }

        let active = |code: KeyCode| -> bool {
            last_seen
                .get(&code)
                .is_some_and(|at| at.elapsed() < Duration::from_millis(KEY_ACTIVE_MS))
        };
        let axis = |neg: KeyCode, pos: KeyCode| -> f64 {
            let mut value = 0.0;
            if active(neg) {
                value -= args.stick_scale;
            }
            if active(pos) {
                value += args.stick_scale;
            }
            value
        };

        let snapshot = GamepadState {
            a: active(KeyCode::Char('k')),
            b: active(KeyCode::Char('c')),
            x: active(KeyCode::Char('z')),
            y: active(KeyCode::Char('i')),
            dpad_up: active(KeyCode::Up),
            dpad_down: active(KeyCode::Down),
            dpad_left: active(KeyCode::Left),
            dpad_right: active(KeyCode::Right),
            left_bumper: active(KeyCode::Char('q')),
            right_bumper: active(KeyCode::Char('e')),
            left_trigger: if active(KeyCode::Char('u')) { 1.0 } else { 0.0 },
            right_trigger: if active(KeyCode::Char('o')) { 1.0 } else { 0.0 },
            left_stick_x: axis(KeyCode::Char('a'), KeyCode::Char('d')),
            // Pad convention: pushing the stick forward is negative Y
            left_stick_y: axis(KeyCode::Char('w'), KeyCode::Char('s')),
            right_stick_x: axis(KeyCode::Char('j'), KeyCode::Char('l')),
            ..GamepadState::default()
        };

        publisher.put(serde_json::to_string(&snapshot)?).await?;
    }

    Ok(())
}
