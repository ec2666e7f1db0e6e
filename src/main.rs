//! Perimeter Defense entry point
//!
//! Headless native runner: plays one session with the autopilot, then
//! records the result on the leaderboard.
//!
//! Usage: `perimeter-defense [name] [seed] [seconds] [--realtime]`

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use perimeter_defense::audio::AudioManager;
use perimeter_defense::platform::{FrameClock, PointerEvent};
use perimeter_defense::renderer::build_draw_list;
use perimeter_defense::sim::{Autopilot, SessionPhase};
use perimeter_defense::{Leaderboard, Session, Settings};

const SETTINGS_PATH: &str = "settings.json";
const DEFAULT_SECONDS: f64 = 60.0;

struct Args {
    name: Option<String>,
    seed: Option<u64>,
    seconds: f64,
    realtime: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        name: None,
        seed: None,
        seconds: DEFAULT_SECONDS,
        realtime: false,
    };
    let mut positional = 0;
    for arg in std::env::args().skip(1) {
        if arg == "--realtime" {
            args.realtime = true;
            continue;
        }
        match positional {
            0 => args.name = Some(arg),
            1 => match arg.parse() {
                Ok(seed) => args.seed = Some(seed),
                Err(_) => log::warn!("Ignoring invalid seed {:?}", arg),
            },
            2 => match arg.parse::<f64>() {
                Ok(secs) if secs > 0.0 => args.seconds = secs,
                _ => log::warn!("Ignoring invalid duration {:?}", arg),
            },
            _ => log::warn!("Ignoring extra argument {:?}", arg),
        }
        positional += 1;
    }
    args
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Perimeter Defense (native) starting...");

    let args = parse_args();
    let mut settings = Settings::load(Path::new(SETTINGS_PATH));
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    let name = args.name.or_else(|| settings.player_name.clone());

    let config = settings.session_config(clock_seed());
    log::info!("Seed: {}", config.seed);

    let mut session = Session::new(config);
    let audio = Rc::new(RefCell::new(AudioManager::from_settings(&settings)));
    session.subscribe(Box::new(audio.clone()));
    if let Some(name) = &name {
        session.set_player_name(name.as_str());
    }

    session.start();

    let frame_ms = settings.frame_interval_ms();
    let limit_ms = args.seconds * 1000.0;
    let mut pilot = Autopilot::default();
    let mut clock = FrameClock::new();
    let mut shots = 0u32;

    while session.phase() == SessionPhase::Running && session.now_ms() < limit_ms {
        let elapsed = if args.realtime {
            std::thread::sleep(Duration::from_secs_f64(frame_ms / 1000.0));
            clock.tick()
        } else {
            frame_ms
        };

        let ticks_before = session.state().time_ticks;
        session.advance(elapsed);

        if session.state().time_ticks != ticks_before {
            if let Some(target) = pilot.update(session.state()) {
                let pointer = PointerEvent {
                    x: target.x,
                    y: target.y,
                };
                if session.fire(pointer.target()) {
                    shots += 1;
                }
            }

            let frame = build_draw_list(session.state(), session.viewport());
            log::trace!("Frame {}: {} draw commands", ticks_before + 1, frame.len());
        }

        for request in audio.borrow_mut().drain() {
            log::trace!("Audio: {} @ {:.2}", request.clip, request.volume);
        }
    }

    if session.phase() == SessionPhase::Running {
        log::info!("Time limit reached");
        session.stop();
    }

    let state = session.state();
    println!(
        "Score: {} ({} points) after {} ticks, {} shots fired",
        state.score,
        state.points(),
        state.time_ticks,
        shots
    );

    let Some(name) = session.player_name() else {
        println!("No player name given; leaderboard unchanged");
        return;
    };

    let mut board = match Leaderboard::load_or_recover(&settings.leaderboard_path) {
        Ok(board) => board,
        Err(e) => {
            log::warn!("Leaderboard left untouched, score not recorded: {}", e);
            return;
        }
    };

    if let Some(rank) = board.add(name, state.points()) {
        println!("{} is ranked #{}", name, rank);
    }
    if let Err(e) = board.save(&settings.leaderboard_path) {
        log::warn!("Could not save leaderboard: {}", e);
    }

    println!("\nLeaderboard:");
    for line in board.lines() {
        println!("{}", line);
    }
    if let Some(leader) = board.leader() {
        log::info!("Leader: {} with {} points", leader.name, leader.points);
    }
}
