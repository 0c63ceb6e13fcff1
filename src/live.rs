//! Scoped live and progress rendering sessions.
//!
//! Both session kinds acquire the terminal as an exclusively-owned resource,
//! invoke a caller-supplied async body exactly once, and release the
//! rendering scope on every exit path (normal return, error, or panic) via a
//! drop guard. A second session cannot start while one is open. Redraws run
//! on a background ticker thread at a fixed cadence; frames always reflect
//! the latest task mutations at the time of the tick.

use crate::console::{Console, Widget};
use crate::error::SessionError;
use crate::markup;
use crate::settings;
use crate::textutil;
use crate::theme::{Theme, ThemeToken};
use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// One open session at a time, process wide.
static SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);

// ---------------------------------------------------------------------------
// Frame plumbing shared by both session kinds
// ---------------------------------------------------------------------------

struct FrameState {
    lines: Vec<String>,
    drawn_rows: usize,
}

struct SessionShared {
    frame: Mutex<FrameState>,
    color: bool,
    theme: Theme,
    width: usize,
    /// Drawing is skipped entirely when stderr is not a terminal.
    tty: bool,
    stop: AtomicBool,
}

impl SessionShared {
    fn new(console: &Console) -> Arc<Self> {
        Arc::new(Self {
            frame: Mutex::new(FrameState {
                lines: Vec::new(),
                drawn_rows: 0,
            }),
            color: console.color_enabled(),
            theme: console.theme().clone(),
            width: console.width(),
            tty: io::stderr().is_terminal(),
            stop: AtomicBool::new(false),
        })
    }

    /// Replace the frame content and repaint in place.
    fn set_lines(&self, lines: Vec<String>) {
        let Ok(mut frame) = self.frame.lock() else {
            return;
        };
        frame.lines = lines;
        let _ = self.repaint(&mut frame);
    }

    /// Repaint whatever the frame currently holds.
    fn redraw(&self) {
        let Ok(mut frame) = self.frame.lock() else {
            return;
        };
        let _ = self.repaint(&mut frame);
    }

    fn repaint(&self, frame: &mut FrameState) -> io::Result<()> {
        if !self.tty {
            return Ok(());
        }
        let console = Console::with_theme(self.color, self.theme.clone());
        let mut stderr = io::stderr();
        if frame.drawn_rows > 0 {
            stderr.queue(MoveUp(frame.drawn_rows as u16))?;
        }
        stderr.queue(MoveToColumn(0))?;
        stderr.queue(Clear(ClearType::FromCursorDown))?;
        for line in &frame.lines {
            stderr.queue(Print(console.styled_text(line)))?;
            stderr.queue(Print("\r\n"))?;
        }
        stderr.flush()?;
        frame.drawn_rows = frame.lines.len();
        Ok(())
    }

    /// Remove the painted frame from the terminal.
    fn clear(&self) {
        let Ok(mut frame) = self.frame.lock() else {
            return;
        };
        if !self.tty || frame.drawn_rows == 0 {
            return;
        }
        let mut stderr = io::stderr();
        let _ = stderr
            .queue(MoveUp(frame.drawn_rows as u16))
            .and_then(|s| s.queue(MoveToColumn(0)))
            .and_then(|s| s.queue(Clear(ClearType::FromCursorDown)))
            .map(|_| ());
        let _ = stderr.flush();
        frame.drawn_rows = 0;
    }
}

/// Releases the scope on every exit path: stops the ticker, finalizes the
/// frame, and frees the session slot. Runs on unwind too.
struct SessionScope {
    shared: Arc<SessionShared>,
    ticker: Option<thread::JoinHandle<()>>,
    clear_on_exit: bool,
}

impl Drop for SessionScope {
    fn drop(&mut self) {
        self.shared.stop.store(true, Ordering::Relaxed);
        if let Some(ticker) = self.ticker.take() {
            let _ = ticker.join();
        }
        if self.clear_on_exit {
            self.shared.clear();
        } else {
            self.shared.redraw();
        }
        SESSION_ACTIVE.store(false, Ordering::Release);
        tracing::debug!("live session scope released");
    }
}

fn acquire_session() -> Result<(), SessionError> {
    if SESSION_ACTIVE
        .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
        .is_err()
    {
        return Err(SessionError::Busy);
    }
    tracing::debug!("live session scope acquired");
    Ok(())
}

// ---------------------------------------------------------------------------
// Live display
// ---------------------------------------------------------------------------

/// Handle for updating the in-place frame from a live session body.
#[derive(Clone)]
pub struct LiveContext {
    shared: Arc<SessionShared>,
}

impl LiveContext {
    /// Replace the frame with a new widget description and repaint.
    pub fn update(&self, widget: &impl Widget) {
        let lines = widget.markup_lines(self.shared.width, &self.shared.theme);
        self.shared.set_lines(lines);
    }
}

/// Run `body` inside a scoped in-place rendering session seeded with
/// `initial` content.
///
/// The scope is fully initialized before the body runs and torn down only
/// after it finishes; the body's value (or error) passes through untouched.
/// The last frame stays visible after the session ends.
pub async fn run_live<W, F, Fut, T>(
    console: &Console,
    initial: &W,
    body: F,
) -> Result<T, SessionError>
where
    W: Widget,
    F: FnOnce(LiveContext) -> Fut,
    Fut: Future<Output = T>,
{
    acquire_session()?;
    let shared = SessionShared::new(console);
    let scope = SessionScope {
        shared: Arc::clone(&shared),
        ticker: Some(spawn_ticker(Arc::clone(&shared))),
        clear_on_exit: false,
    };

    let context = LiveContext {
        shared: Arc::clone(&shared),
    };
    context.update(initial);

    let value = body(context).await;
    drop(scope);
    Ok(value)
}

/// Redraw the latest frame at a fixed cadence until the scope stops it.
fn spawn_ticker(shared: Arc<SessionShared>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !shared.stop.load(Ordering::Relaxed) {
            shared.redraw();
            thread::sleep(Duration::from_millis(settings::PROGRESS_TICK_MS));
        }
    })
}

/// Run `body` behind a one-line spinner labeled `label`.
///
/// A thin variant of [`run_progress`] for work with no measurable units. The
/// spinner line is removed when the body finishes.
pub async fn run_status<F, Fut, T>(
    console: &Console,
    label: &str,
    body: F,
) -> Result<T, SessionError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    acquire_session()?;
    let shared = SessionShared::new(console);
    let ticker = {
        let shared = Arc::clone(&shared);
        let theme = console.theme().clone();
        let label = markup::escape(label);
        thread::spawn(move || {
            let started = Instant::now();
            let mut index = 0usize;
            while !shared.stop.load(Ordering::Relaxed) {
                let frame = settings::PROGRESS_FRAMES[index % settings::PROGRESS_FRAMES.len()];
                let elapsed = started.elapsed().as_millis() as f64 / 1000.0;
                shared.set_lines(vec![format!(
                    "[[{}]] {label} {}",
                    theme.paint(ThemeToken::ProgressFrame, &frame.to_string()),
                    theme.paint(ThemeToken::Muted, &format!("({elapsed:.1}s)")),
                )]);
                index += 1;
                thread::sleep(Duration::from_millis(settings::PROGRESS_TICK_MS));
            }
        })
    };
    let scope = SessionScope {
        shared: Arc::clone(&shared),
        ticker: Some(ticker),
        clear_on_exit: true,
    };

    let value = body().await;
    drop(scope);
    Ok(value)
}

// ---------------------------------------------------------------------------
// Progress display
// ---------------------------------------------------------------------------

struct TaskState {
    description: String,
    completed: f64,
    total: f64,
}

impl TaskState {
    fn fraction(&self) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        (self.completed / self.total).clamp(0.0, 1.0)
    }

    fn finished(&self) -> bool {
        self.total > 0.0 && self.completed >= self.total
    }
}

/// Mutable handle to one registered progress task. Owned by the session; the
/// body advances it while the ticker renders it.
#[derive(Clone)]
pub struct ProgressTask {
    state: Arc<Mutex<TaskState>>,
}

impl ProgressTask {
    /// Add `delta` units of completed work.
    pub fn advance(&self, delta: f64) {
        if let Ok(mut state) = self.state.lock() {
            state.completed = (state.completed + delta).max(0.0);
        }
    }

    pub fn set_completed(&self, completed: f64) {
        if let Ok(mut state) = self.state.lock() {
            state.completed = completed.max(0.0);
        }
    }

    pub fn set_total(&self, total: f64) {
        if let Ok(mut state) = self.state.lock() {
            state.total = total.max(0.0);
        }
    }

    /// Mark the task complete regardless of progress so far.
    pub fn finish(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.completed = state.total;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state.lock().map(|s| s.finished()).unwrap_or(false)
    }

    /// Completed percentage in `0.0..=100.0`.
    pub fn percent(&self) -> f64 {
        self.state.lock().map(|s| s.fraction() * 100.0).unwrap_or(0.0)
    }
}

/// Handle for registering tasks from a progress session body.
#[derive(Clone)]
pub struct ProgressContext {
    shared: Arc<SessionShared>,
    tasks: Arc<Mutex<Vec<Arc<Mutex<TaskState>>>>>,
    started: Instant,
}

impl ProgressContext {
    /// Register a task bar. The description is escaped here, once.
    pub fn add_task(&self, description: impl Into<String>, total: f64) -> ProgressTask {
        let state = Arc::new(Mutex::new(TaskState {
            description: markup::escape(&description.into()),
            completed: 0.0,
            total: total.max(0.0),
        }));
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.push(Arc::clone(&state));
        }
        ProgressTask { state }
    }

    fn compose_frame(&self, frame_index: usize) -> Vec<String> {
        let Ok(tasks) = self.tasks.lock() else {
            return Vec::new();
        };
        let theme = &self.shared.theme;
        let spinner =
            settings::PROGRESS_FRAMES[frame_index % settings::PROGRESS_FRAMES.len()];
        let elapsed = self.started.elapsed().as_millis() as f64 / 1000.0;

        tasks
            .iter()
            .filter_map(|task| task.lock().ok().map(|state| render_task_line(
                &state, theme, spinner, elapsed,
            )))
            .collect()
    }
}

fn render_task_line(state: &TaskState, theme: &Theme, spinner: char, elapsed: f64) -> String {
    let fraction = state.fraction();
    let filled = (fraction * settings::PROGRESS_BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(settings::PROGRESS_BAR_WIDTH);
    let done: String = std::iter::repeat(settings::BAR_FILL).take(filled).collect();
    let rest: String = std::iter::repeat(settings::BAR_EMPTY)
        .take(settings::PROGRESS_BAR_WIDTH - filled)
        .collect();
    let glyph = if state.finished() {
        theme.paint(ThemeToken::Ok, "+")
    } else {
        theme.paint(ThemeToken::ProgressFrame, &spinner.to_string())
    };
    format!(
        "[[{glyph}]] {}{} {} {} {}",
        theme.paint(ThemeToken::ProgressDone, &done),
        theme.paint(ThemeToken::ProgressRest, &rest),
        textutil::pad_left(&format!("{:.0}%", fraction * 100.0), 4),
        state.description,
        theme.paint(ThemeToken::Muted, &format!("({elapsed:.1}s)")),
    )
}

/// Run `body` under a progress UI that redraws registered task bars at a
/// fixed cadence while the session is open.
///
/// With `auto_clear` the rendered UI is removed once the body returns;
/// otherwise the last frame remains visible. The scope is released on every
/// exit path and the body's value or error passes through untouched.
pub async fn run_progress<F, Fut, T>(
    console: &Console,
    auto_clear: bool,
    body: F,
) -> Result<T, SessionError>
where
    F: FnOnce(ProgressContext) -> Fut,
    Fut: Future<Output = T>,
{
    acquire_session()?;
    let shared = SessionShared::new(console);
    let context = ProgressContext {
        shared: Arc::clone(&shared),
        tasks: Arc::new(Mutex::new(Vec::new())),
        started: Instant::now(),
    };

    let ticker = {
        let shared = Arc::clone(&shared);
        let context = context.clone();
        thread::spawn(move || {
            let mut frame_index = 0usize;
            while !shared.stop.load(Ordering::Relaxed) {
                shared.set_lines(context.compose_frame(frame_index));
                frame_index += 1;
                thread::sleep(Duration::from_millis(settings::PROGRESS_TICK_MS));
            }
            // Final frame reflects the tasks' terminal state.
            shared.set_lines(context.compose_frame(frame_index));
        })
    };
    let scope = SessionScope {
        shared: Arc::clone(&shared),
        ticker: Some(ticker),
        clear_on_exit: auto_clear,
    };

    let value = body(context).await;
    drop(scope);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Text;

    // Session tests share the process-wide session slot, so they run inside
    // one test body to avoid cross-test flakiness.
    #[tokio::test]
    async fn session_scope_is_exclusive_and_always_released() {
        let console = Console::new(false);

        // A session body failing must still release the scope and hand the
        // error back to the caller.
        let result: Result<Result<(), &str>, SessionError> =
            run_live(&console, &Text::new("frame"), |_ctx| async { Err("boom") }).await;
        let inner = result.expect("session itself succeeds");
        assert_eq!(inner, Err("boom"));
        assert!(!SESSION_ACTIVE.load(Ordering::Relaxed));

        // A nested session inside an open one reports Busy.
        let nested: Result<(), SessionError> = run_live(&console, &Text::new("outer"), |_ctx| async {
            let err = run_progress(&console, true, |_ctx| async {})
                .await
                .expect_err("nested session must be refused");
            assert!(matches!(err, SessionError::Busy));
        })
        .await;
        nested.expect("outer session succeeds");
        assert!(!SESSION_ACTIVE.load(Ordering::Relaxed));

        // After release, a fresh session starts fine and returns its value.
        let value = run_progress(&console, true, |ctx| async move {
            let task = ctx.add_task("work", 2.0);
            task.advance(2.0);
            assert!(task.is_finished());
            42
        })
        .await
        .expect("session runs");
        assert_eq!(value, 42);
        assert!(!SESSION_ACTIVE.load(Ordering::Relaxed));
    }

    #[test]
    fn task_arithmetic_clamps_and_finishes() {
        let state = Arc::new(Mutex::new(TaskState {
            description: "t".to_string(),
            completed: 0.0,
            total: 10.0,
        }));
        let task = ProgressTask { state };

        task.advance(4.0);
        assert!((task.percent() - 40.0).abs() < 1e-9);
        assert!(!task.is_finished());

        task.advance(100.0);
        assert!((task.percent() - 100.0).abs() < 1e-9);
        assert!(task.is_finished());

        task.set_completed(5.0);
        assert!(!task.is_finished());
        task.finish();
        assert!(task.is_finished());
    }

    #[test]
    fn zero_total_task_never_reports_progress() {
        let state = Arc::new(Mutex::new(TaskState {
            description: "t".to_string(),
            completed: 0.0,
            total: 0.0,
        }));
        let task = ProgressTask { state };
        task.advance(5.0);
        assert_eq!(task.percent(), 0.0);
        assert!(!task.is_finished());
    }

    #[test]
    fn task_line_shows_bar_percent_and_description() {
        let theme = Theme::default();
        let state = TaskState {
            description: markup::escape("copy [files]"),
            completed: 5.0,
            total: 10.0,
        };
        let line = render_task_line(&state, &theme, '|', 1.5);
        let plain = markup::plain(&line);
        assert!(plain.contains("50%"), "plain: {plain}");
        assert!(plain.contains("copy [files]"));
        assert!(plain.contains("(1.5s)"));
        let fills = plain.matches(settings::BAR_FILL).count();
        assert_eq!(fills, settings::PROGRESS_BAR_WIDTH / 2);
    }
}
