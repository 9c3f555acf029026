//! Terminal match-3 runner (default binary).
//!
//! This is the interactive entrypoint. Input comes from crossterm key events;
//! a keyboard cursor stands in for the pointer, and the board is drawn through
//! the framebuffer renderer (no widget toolkit).

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_match3::cli::{RunConfig, Tool};
use tui_match3::core::{BoardEvent, BoardSnapshot, GameState, SwapOutcome};
use tui_match3::engine::{best_swap, find_swaps};
use tui_match3::input::{handle_key_event, should_quit, GestureEvent, GestureInput};
use tui_match3::log::EventLog;
use tui_match3::term::{BoardView, FrameBuffer, Overlay, SpriteLayer, TerminalRenderer, Viewport};
use tui_match3::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = RunConfig::from_env().parse_args(&args, Tool::Play)?;
    let state = GameState::new(config.to_board_config())?;
    let log = EventLog::open(config.log_path.as_deref(), "Board", false);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, state, log);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut state: GameState, mut log: EventLog) -> Result<()> {
    let view = BoardView::default();
    let mut input = GestureInput::new(state.grid().width(), state.grid().height());
    let mut sprites = SpriteLayer::new();
    let mut overlay = Overlay::default();
    let mut snap = BoardSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut moves_stale = true;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        state.present(&mut sprites);
        state.snapshot_into(&mut snap);
        if moves_stale && state.is_idle() {
            overlay.moves = Some(find_swaps(state.grid(), state.finder()).len());
            moves_stale = false;
        }
        overlay.cursor = Some(input.cursor());
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, &sprites, &overlay, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(GameAction::Hint) => {
                            overlay.hint = best_swap(state.grid(), state.finder()).map(|m| (m.a, m.b));
                        }
                        Some(GameAction::Restart) => {
                            // Ignored while a swap or cascade is resolving.
                            if state.restart() {
                                input.reset();
                                overlay.hint = None;
                                overlay.moves = None;
                                moves_stale = true;
                            }
                        }
                        Some(action) => {
                            for gesture in input.handle_action(action) {
                                apply_gesture(&mut state, &mut input, gesture);
                            }
                        }
                        None => {}
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            state.tick(TICK_MS);

            let events = state.take_events();
            if events
                .iter()
                .any(|e| matches!(e, BoardEvent::SwapStarted { .. } | BoardEvent::Restarted))
            {
                overlay.hint = None;
                overlay.moves = None;
                moves_stale = true;
            }
            log.record_events(&events);
            log.record_diagnostics(&state.take_diagnostics());
        }
    }
}

fn apply_gesture(state: &mut GameState, input: &mut GestureInput, gesture: GestureEvent) {
    match gesture {
        GestureEvent::PressStart(tile) => {
            if !state.on_press_start(tile) {
                input.reset();
            }
        }
        GestureEvent::DragEnter(tile) => {
            state.on_drag_enter(tile);
        }
        GestureEvent::Release => {
            // Rejected swaps leave the board untouched; nothing to undo.
            if let Some(SwapOutcome::Rejected(_)) = state.on_release() {
                input.reset();
            }
        }
        GestureEvent::Cancel => state.cancel_swap_session(),
    }
}
