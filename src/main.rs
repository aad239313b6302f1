//! The RNG entry point
//!
//! Sets up the terminal, feeds keyboard events to the app and runs the frame
//! loop. Logs go to stderr, so redirect it (`2>the-rng.log`) when raising
//! `RUST_LOG`.

use std::io::{BufWriter, Write, stdout};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};
use rand::Rng;

use the_rng::consts::MAX_FPS;
use the_rng::platform::{FrameClock, HeldKeys, Key};
use the_rng::renderer::{FrameStats, TerminalRenderer};
use the_rng::ui::{App, Screen, Storage};

/// Translate a terminal key event into a game key
fn map_key(event: &KeyEvent) -> Option<Key> {
    let key = match event.code {
        // Number row and keypad digits both steer the numpad scheme
        KeyCode::Char(c) if c.is_ascii_digit() => Key::Keypad(c as u8 - b'0'),
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(key)
}

fn is_interrupt(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL)
}

/// Frame loop: drain input, advance the app, draw
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    app: &mut App,
    releases_reported: bool,
) -> anyhow::Result<()> {
    let (cols, rows) = terminal::size().context("reading terminal size")?;
    let mut renderer = TerminalRenderer::new(cols, rows);
    let mut keys = HeldKeys::for_terminal(releases_reported);
    let mut clock = FrameClock::start(MAX_FPS);
    let mut last_screen = app.screen;

    while !app.should_quit() {
        keys.next_frame();

        while let Ok(event) = rx.try_recv() {
            match event {
                Event::Key(key_event) => {
                    if is_interrupt(&key_event) {
                        app.request_quit();
                        continue;
                    }
                    let Some(key) = map_key(&key_event) else {
                        continue;
                    };
                    match key_event.kind {
                        KeyEventKind::Press => {
                            keys.press(key);
                            app.handle_key(key);
                        }
                        KeyEventKind::Repeat => keys.press(key),
                        KeyEventKind::Release => keys.release(key),
                    }
                }
                Event::Resize(cols, rows) => renderer.resize(cols, rows),
                _ => {}
            }
        }

        // Keys held over from a menu must not steer the new run
        if app.screen != last_screen {
            if app.screen == Screen::Running {
                keys.clear();
            }
            last_screen = app.screen;
        }

        let elapsed_ms = clock.tick();
        app.frame(&keys.tick_input(), elapsed_ms);

        let stats = FrameStats {
            fps: clock.fps(),
            frame_ms: clock.frame_ms(),
            max_fps: clock.max_fps(),
        };
        renderer.render(out, app, stats).context("drawing frame")?;
    }

    Ok(())
}

/// Enter the game screen, start the input thread and play until quit.
///
/// `keyboard_enhanced` is set as soon as the enhancement flags are pushed,
/// so the caller can pop them even when a later step fails.
fn session<W: Write>(
    out: &mut W,
    app: &mut App,
    keyboard_enhanced: &mut bool,
) -> anyhow::Result<()> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Query before the input thread starts consuming terminal replies
    let releases_reported = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if releases_reported {
        out.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
        *keyboard_enhanced = true;
    }
    log::info!("Key releases reported: {}", releases_reported);

    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    run(out, &rx, app, releases_reported)
}

/// Undo every terminal mode `session` may have entered, best effort
fn restore<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("The RNG starting...");

    let seed: u64 = rand::rng().random();
    log::info!("Session seed: {}", seed);
    let mut app = App::new(Storage::default(), seed);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;

    let mut keyboard_enhanced = false;
    let result = session(&mut out, &mut app, &mut keyboard_enhanced);

    restore(&mut out, keyboard_enhanced);

    app.shutdown();
    log::info!("The RNG exiting");
    result
}
