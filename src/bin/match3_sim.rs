//! Headless match-3 simulator.
//!
//! Builds a board from the environment and flags, then repeatedly plays the
//! first swap that would match and prints one JSON summary line per move to
//! stdout. Diagnostics go to stderr with a `[Sim]` prefix.

use anyhow::{anyhow, Result};
use serde::Serialize;

use tui_match3::cli::{RunConfig, Tool};
use tui_match3::core::GameState;
use tui_match3::engine::{find_swaps, first_swap, play_move};
use tui_match3::log::EventLog;

/// Tick budget for resolving one move or one restart
const RESOLVE_TICKS: u32 = 100_000;

#[derive(Debug, Serialize)]
struct MoveSummary {
    step: u32,
    a: [i32; 2],
    b: [i32; 2],
    reverted: bool,
    passes: u32,
    cleared: u32,
    ticks: u32,
    cleared_total: u64,
    moves_left: usize,
    fill_exhausted: bool,
}

#[derive(Debug, Serialize)]
struct RestartSummary {
    step: u32,
    restarted: bool,
    moves_left: usize,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = RunConfig::from_env().parse_args(&args, Tool::Sim)?;
    let mut state = GameState::new(config.to_board_config())?;
    // Nothing is drawn; keep the presenter queue empty.
    state.set_presenting(false);
    let mut log = EventLog::open(config.log_path.as_deref(), "Sim", true);

    eprintln!(
        "[Sim] {}x{} board, {} colors, seed {}, {} swaps",
        config.width, config.height, config.colors, config.seed, config.swaps
    );
    log.record_diagnostics(&state.take_diagnostics());

    for step in 0..config.swaps {
        let Some(mv) = first_swap(state.grid(), state.finder()) else {
            eprintln!("[Sim] no moves left at step {}; restarting", step);
            if !state.restart() {
                return Err(anyhow!("match3-sim: board busy at step {}", step));
            }
            if !state.run_until_idle(RESOLVE_TICKS) {
                return Err(anyhow!("match3-sim: restart did not settle"));
            }
            log.record_events(&state.take_events());
            log.record_diagnostics(&state.take_diagnostics());
            let summary = RestartSummary {
                step,
                restarted: true,
                moves_left: find_swaps(state.grid(), state.finder()).len(),
            };
            println!("{}", serde_json::to_string(&summary)?);
            continue;
        };

        let report = play_move(&mut state, mv, RESOLVE_TICKS)
            .map_err(|e| anyhow!("match3-sim: step {}: {}", step, e))?;
        log.record_events(&report.events);
        log.record_diagnostics(&report.diagnostics);

        let summary = MoveSummary {
            step,
            a: [mv.a.x, mv.a.y],
            b: [mv.b.x, mv.b.y],
            reverted: report.reverted,
            passes: report.passes,
            cleared: report.cleared,
            ticks: report.ticks,
            cleared_total: state.cleared_total(),
            moves_left: find_swaps(state.grid(), state.finder()).len(),
            fill_exhausted: state.fill_exhausted(),
        };
        println!("{}", serde_json::to_string(&summary)?);
    }

    eprintln!("[Sim] done, {} pieces cleared", state.cleared_total());
    Ok(())
}
