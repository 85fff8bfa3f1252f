use anyhow::Context;
use clap::Parser;
use crossbeam_channel::{unbounded, RecvTimeoutError};
use std::io::BufRead;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use tour_core::{
    MarkerSelection, Selection, TourConfig, TourSession, DEFAULT_FOV_RADIANS,
};

mod commands;
mod terminal;

use commands::{hotspot_number, parse_command, Command, HELP};
use terminal::TerminalViewer;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "tour-native", about = "Walk through a panorama tour in the terminal")]
struct Args {
    /// Tour JSON file; the bundled apartment when omitted
    tour: Option<PathBuf>,
    /// Validate the tour, print a summary and exit
    #[arg(long)]
    check: bool,
    /// Override the delay before markers follow a room change
    #[arg(long)]
    delay_ms: Option<u64>,
}

fn load_tour(args: &Args) -> anyhow::Result<TourConfig> {
    let mut config = match &args.tour {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            TourConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => TourConfig::apartment()?,
    };
    if let Some(ms) = args.delay_ms {
        config.marker_swap_delay_ms = ms;
    }
    Ok(config)
}

fn check(config: &TourConfig) -> anyhow::Result<()> {
    let graph = config.build_graph().context("tour is invalid")?;
    println!(
        "{}: {} rooms, start `{}`, markers follow after {}ms",
        config.title.as_deref().unwrap_or("tour"),
        graph.len(),
        graph.start(),
        config.marker_swap_delay_ms
    );
    for room in graph.rooms() {
        let hotspots = room.markers.iter().filter(|m| m.is_navigation()).count();
        println!(
            "  {:<20} {:<20} {} hotspots, {} decorative",
            room.id.as_str(),
            room.image,
            hotspots,
            room.markers.len() - hotspots
        );
    }
    let orphans = graph.unreachable_from_start();
    if !orphans.is_empty() {
        let names: Vec<&str> = orphans.iter().map(|r| r.as_str()).collect();
        println!("  unreachable from start: {}", names.join(", "));
    }
    Ok(())
}

/// Marker the user meant: an id among shown markers, or a hotspot number.
fn resolve(viewer: &TerminalViewer, word: &str) -> Option<MarkerSelection> {
    if let Some(m) = viewer.shown_markers().iter().find(|m| m.id == word) {
        return Some(m.selection());
    }
    let n = hotspot_number(word)?;
    viewer.hotspots().nth(n).map(|m| m.selection())
}

/// Returns false when the user asked to quit.
fn run_command(session: &mut TourSession<TerminalViewer>, line: &str) -> bool {
    let command = match parse_command(line) {
        Ok(Some(c)) => c,
        Ok(None) => return true,
        Err(e) => {
            println!("{}", e);
            return true;
        }
    };
    match command {
        Command::Go(word) => match resolve(session.viewer(), &word) {
            Some(selection) => match session.on_marker_selected(&selection) {
                Ok(Selection::Decorative) => println!("`{}` is decorative", selection.marker_id),
                Ok(Selection::Navigated(_)) => {}
                Err(e) => log::error!("[nav] {}", e),
            },
            None => println!("no marker `{}` here (try `look` or `help`)", word),
        },
        Command::Look(turn) => {
            if let Some(look) = turn {
                session.viewer_mut().turn_to(look);
            }
            session.viewer().print_view(DEFAULT_FOV_RADIANS);
        }
        Command::Rooms => {
            let current = session.controller().current_room().clone();
            for room in session.controller().graph().rooms() {
                let mark = if room.id == current { "*" } else { " " };
                println!(" {} {:<20} {}", mark, room.id.as_str(), room.image);
            }
        }
        Command::Where => {
            let room = session.controller().current();
            let pending = session
                .controller()
                .pending()
                .map(|p| format!(" (markers in {:?})", p.remaining))
                .unwrap_or_default();
            println!("in `{}` showing {}{}", room.id, room.image, pending);
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => return false,
    }
    true
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = load_tour(&args)?;
    if args.check {
        return check(&config);
    }

    let controller = config.build_controller()?;
    if let Some(title) = &config.title {
        println!("{}", title);
    }
    let mut session = TourSession::mount(controller, TerminalViewer::default());
    println!("{}", HELP);

    // stdin is read on its own thread so the deferred marker swap keeps time
    let (tx, rx) = unbounded::<String>();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut input_open = true;
    let mut last = Instant::now();
    loop {
        if input_open {
            match rx.recv_timeout(FRAME_INTERVAL) {
                Ok(line) => {
                    if !run_command(&mut session, &line) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => input_open = false,
            }
        } else if session.controller().pending().is_none() {
            // input closed and nothing left to apply
            break;
        } else {
            thread::sleep(FRAME_INTERVAL);
        }
        let now = Instant::now();
        session.tick(now - last);
        last = now;
    }

    let viewer = session.unmount();
    log::info!("left the tour at {}", viewer.image().unwrap_or("-"));
    Ok(())
}
