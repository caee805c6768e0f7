//! Main application state and TUI event loop for Expense Chart.
//!
//! [`App`] owns the record list, the last-rendered slice geometry and the
//! in-flight animator. It drains change batches from the feed channel between
//! frames, reduces them into the list, and reconciles the chart with
//! enter/update/exit transitions.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::mpsc;

use chart_core::geometry::{compute_slices, Slice};
use chart_core::models::{ChangeBatch, ExpenseRecord};
use chart_core::palette::ColorDomain;
use chart_core::reducer;
use chart_runtime::writer::StoreHandle;

use crate::chart_view::{self, ChartViewData};
use crate::themes::Theme;
use crate::transitions::{reconcile, settled_frame, Animator, RenderedSlice};

/// Root application state for the Expense Chart TUI.
pub struct App {
    /// Active color theme.
    pub theme: Theme,
    /// Slice transition duration.
    pub animation: Duration,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// The local record list, mirroring the feed.
    records: Vec<ExpenseRecord>,
    /// Target geometry of the last redraw; the angle map the next reconcile
    /// diffs against.
    last_slices: Vec<Slice>,
    /// In-flight transition, `None` once settled.
    animator: Option<Animator>,
    /// Id of the selected (hovered) record.
    selected: Option<String>,
    /// Write path back to the store for the delete affordance.
    store: StoreHandle,
}

impl App {
    /// Construct a new application with the given configuration.
    pub fn new(theme_name: &str, animation_ms: u64, store: StoreHandle) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            animation: Duration::from_millis(animation_ms),
            should_quit: false,
            records: Vec::new(),
            last_slices: Vec::new(),
            animator: None,
            selected: None,
            store,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────

    /// Run the chart TUI, receiving change batches from `rx`.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 50 ms timeout so
    /// transitions stay smooth) while batches arrive on the async channel via
    /// `try_recv`. The loop exits on `q`, `Q`, or `Ctrl+C`.
    pub async fn run(mut self, mut rx: mpsc::Receiver<ChangeBatch>) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(50);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;
            self.settle(Instant::now());

            // Handle keyboard events with a short timeout so we don't block.
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break Ok(());
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') => break Ok(()),
                        KeyCode::Left => self.select_prev(),
                        KeyCode::Right => self.select_next(),
                        KeyCode::Esc => self.clear_selection(),
                        KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
                        _ => {}
                    }
                }
            }

            // Drain any pending change batches (non-blocking).
            loop {
                match rx.try_recv() {
                    Ok(batch) => self.apply_batch(batch),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        self.should_quit = true;
                        break;
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── State updates ─────────────────────────────────────────────────────

    /// Reduce a change batch into the record list and start the redraw
    /// transition against the previous target geometry.
    pub fn apply_batch(&mut self, batch: ChangeBatch) {
        if batch.is_empty() {
            return;
        }

        reducer::apply_batch(&mut self.records, &batch);

        let slices = compute_slices(&self.records);
        let plan = reconcile(&self.last_slices, &slices);
        self.animator = Some(Animator::new(plan, self.animation));
        // Advance the angle map to the new targets now: a batch arriving
        // mid-animation restarts from these, last-writer-wins.
        self.last_slices = slices;

        // Drop the selection when its record left the list.
        if let Some(id) = &self.selected {
            if !self.records.iter().any(|r| &r.id == id) {
                self.selected = None;
            }
        }
    }

    /// Drop the animator once its transition has completed.
    pub fn settle(&mut self, now: Instant) {
        if self
            .animator
            .as_ref()
            .is_some_and(|a| a.is_complete(now))
        {
            self.animator = None;
        }
    }

    // ── Selection (the hover analog) ──────────────────────────────────────

    pub fn select_next(&mut self) {
        self.shift_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.shift_selection(-1);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Id of the selected record, if it is still in the list.
    pub fn selected_record_id(&self) -> Option<&str> {
        let id = self.selected.as_deref()?;
        self.records.iter().find(|r| r.id == id).map(|r| r.id.as_str())
    }

    fn shift_selection(&mut self, delta: isize) {
        if self.records.is_empty() {
            self.selected = None;
            return;
        }

        let len = self.records.len() as isize;
        let current = self
            .selected
            .as_deref()
            .and_then(|id| self.records.iter().position(|r| r.id == id));

        let next = match current {
            Some(i) => (i as isize + delta).rem_euclid(len) as usize,
            // First press lands on the nearest end.
            None if delta > 0 => 0,
            None => (len - 1) as usize,
        };
        self.selected = Some(self.records[next].id.clone());
    }

    // ── Delete affordance ─────────────────────────────────────────────────

    /// Issue a fire-and-forget delete for the selected record.
    ///
    /// The list is not mutated locally; the removal arrives through the
    /// change feed like any other remote mutation.
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_record_id() {
            self.store.delete(id);
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    /// The paintable slice set right now: the animator's current frame, or
    /// the settled target geometry when no transition is in flight.
    pub fn current_frame(&self, now: Instant) -> Vec<RenderedSlice> {
        match &self.animator {
            Some(animator) => animator.frame(now),
            None => settled_frame(&self.last_slices),
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let rendered = self.current_frame(Instant::now());

        if self.records.is_empty() && rendered.is_empty() {
            chart_view::render_no_data(frame, area, &self.theme);
            return;
        }

        // Recompute the color domain from the distinct names in list order.
        let domain = ColorDomain::from_names(self.records.iter().map(|r| r.name.as_str()));
        let data = ChartViewData {
            slices: &rendered,
            domain: &domain,
            selected_id: self.selected_record_id(),
            total_cost: reducer::total_cost(&self.records),
            record_count: self.records.len(),
        };
        chart_view::render_dashboard(frame, area, &data, &self.theme);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
