//! Enter/update/exit reconciliation and slice animation.
//!
//! Diffs the previously rendered slice set against freshly computed geometry
//! by record id and produces a [`RedrawPlan`] of angle tweens:
//!
//! - entering slices grow out of a zero-width arc at their end angle,
//! - updating slices interpolate from their previous target angles,
//! - exiting slices collapse toward their end angle and are dropped once the
//!   animation completes.
//!
//! The previous angles fed into [`reconcile`] are always the *targets* of the
//! last plan, never the mid-flight values: a batch that lands while an
//! animation is still running restarts from the latest list state and the
//! newest targets win.

use std::time::{Duration, Instant};

use chart_core::geometry::{Slice, SliceAngles};
use chart_core::models::ExpenseRecord;
use chart_core::palette::ColorDomain;

/// Default slice transition duration, in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 750;

/// Angular lead-in for entering slices: they start as a 0.1 rad arc ending at
/// the slice's end angle.
pub const ENTER_LEAD: f64 = 0.1;

/// Which reconciliation category a tween belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Enter,
    Update,
    Exit,
}

/// One animated slice: a record, its from/to angle pairs and its assigned
/// palette index.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceTween {
    pub record: ExpenseRecord,
    pub from: SliceAngles,
    pub to: SliceAngles,
    pub phase: Phase,
    /// Palette index the slice is painted with. Assigned when the plan is
    /// built: entering and updating slices take the new domain, exiting
    /// slices keep the index they had when last painted.
    pub color_index: usize,
}

impl SliceTween {
    /// Linearly interpolated angles at progress `t` in `[0, 1]`.
    pub fn angles_at(&self, t: f64) -> SliceAngles {
        SliceAngles::new(
            lerp(self.from.start, self.to.start, t),
            lerp(self.from.end, self.to.end, t),
        )
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// The full set of tweens for one redraw: entering and updating slices in
/// list order, followed by the exiting slices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedrawPlan {
    pub tweens: Vec<SliceTween>,
}

impl RedrawPlan {
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

/// Classify `next` against `previous` by record id and build the tween plan.
///
/// `previous` must be the target geometry of the last plan (the last-rendered
/// angle map); `next` is the geometry computed from the current record list.
pub fn reconcile(previous: &[Slice], next: &[Slice]) -> RedrawPlan {
    // Entering and updating slices are colored from the new domain; exiting
    // slices keep the index they held under the previous domain, so a slice
    // shrinks away in its category color even though its name has already
    // left the list.
    let next_domain = ColorDomain::from_names(next.iter().map(|s| s.record.name.as_str()));
    let prev_domain = ColorDomain::from_names(previous.iter().map(|s| s.record.name.as_str()));

    let mut tweens = Vec::with_capacity(next.len());

    for slice in next {
        let to = slice.angles;
        let color_index = next_domain.index_of(&slice.record.name).unwrap_or(0);
        match previous.iter().find(|p| p.record.id == slice.record.id) {
            Some(prev) => tweens.push(SliceTween {
                record: slice.record.clone(),
                from: prev.angles,
                to,
                phase: Phase::Update,
                color_index,
            }),
            None => tweens.push(SliceTween {
                record: slice.record.clone(),
                from: SliceAngles::new(to.end - ENTER_LEAD, to.end),
                to,
                phase: Phase::Enter,
                color_index,
            }),
        }
    }

    for prev in previous {
        if !next.iter().any(|s| s.record.id == prev.record.id) {
            tweens.push(SliceTween {
                record: prev.record.clone(),
                from: prev.angles,
                to: SliceAngles::new(prev.angles.end, prev.angles.end),
                phase: Phase::Exit,
                color_index: prev_domain.index_of(&prev.record.name).unwrap_or(0),
            });
        }
    }

    RedrawPlan { tweens }
}

/// A slice ready to paint: interpolated angles, phase and palette index.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSlice {
    pub record: ExpenseRecord,
    pub angles: SliceAngles,
    pub phase: Phase,
    pub color_index: usize,
}

/// Drives a [`RedrawPlan`] over wall-clock time.
#[derive(Debug)]
pub struct Animator {
    plan: RedrawPlan,
    started: Instant,
    duration: Duration,
}

impl Animator {
    pub fn new(plan: RedrawPlan, duration: Duration) -> Self {
        Self {
            plan,
            started: Instant::now(),
            duration,
        }
    }

    /// Animation progress at `now`, clamped to `[0, 1]`.
    ///
    /// A zero duration snaps straight to the target geometry.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Whether every tween has reached its target.
    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// The paintable slice set at `now`.
    ///
    /// Exiting slices are included while the animation runs and dropped once
    /// it completes.
    pub fn frame(&self, now: Instant) -> Vec<RenderedSlice> {
        let t = self.progress(now);
        self.plan
            .tweens
            .iter()
            .filter(|tw| t < 1.0 || tw.phase != Phase::Exit)
            .map(|tw| RenderedSlice {
                record: tw.record.clone(),
                angles: tw.angles_at(t),
                phase: tw.phase,
                color_index: tw.color_index,
            })
            .collect()
    }
}

/// A static frame for when no animation is in flight: every slice sits at its
/// target geometry.
pub fn settled_frame(slices: &[Slice]) -> Vec<RenderedSlice> {
    let domain = ColorDomain::from_names(slices.iter().map(|s| s.record.name.as_str()));
    slices
        .iter()
        .map(|s| RenderedSlice {
            record: s.record.clone(),
            angles: s.angles,
            phase: Phase::Update,
            color_index: domain.index_of(&s.record.name).unwrap_or(0),
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::geometry::{compute_slices, TAU};
    use chart_core::models::ExpenseRecord;

    fn rec(id: &str, name: &str, cost: f64) -> ExpenseRecord {
        ExpenseRecord::new(id, name, cost)
    }

    const EPS: f64 = 1e-9;

    // ── reconcile classification ──────────────────────────────────────────

    #[test]
    fn test_all_enter_from_empty() {
        let next = compute_slices(&[rec("a", "Food", 10.0), rec("b", "Rent", 30.0)]);
        let plan = reconcile(&[], &next);
        assert_eq!(plan.tweens.len(), 2);
        assert!(plan.tweens.iter().all(|t| t.phase == Phase::Enter));
    }

    #[test]
    fn test_enter_starts_as_zero_arc_at_end_angle() {
        let next = compute_slices(&[rec("a", "Food", 10.0)]);
        let plan = reconcile(&[], &next);
        let tween = &plan.tweens[0];
        // from: a 0.1 rad arc ending at the target end angle.
        assert!((tween.from.end - tween.to.end).abs() < EPS);
        assert!((tween.from.start - (tween.to.end - ENTER_LEAD)).abs() < EPS);
        // At t=1 the slice has its full geometry.
        let settled = tween.angles_at(1.0);
        assert!((settled.start - tween.to.start).abs() < EPS);
        assert!((settled.end - tween.to.end).abs() < EPS);
    }

    #[test]
    fn test_update_interpolates_between_angle_pairs() {
        let prev = compute_slices(&[rec("a", "Food", 10.0), rec("b", "Rent", 10.0)]);
        let next = compute_slices(&[rec("a", "Food", 10.0), rec("b", "Rent", 30.0)]);
        let plan = reconcile(&prev, &next);

        assert!(plan.tweens.iter().all(|t| t.phase == Phase::Update));
        let b = plan
            .tweens
            .iter()
            .find(|t| t.record.id == "b")
            .expect("b tween");
        // b grows from half the turn to three quarters.
        assert!((b.from.span() - TAU / 2.0).abs() < EPS);
        assert!((b.to.span() - 0.75 * TAU).abs() < EPS);
        // Midway the span is halfway between.
        let mid = b.angles_at(0.5);
        assert!((mid.span() - 0.625 * TAU).abs() < EPS);
    }

    #[test]
    fn test_exit_collapses_toward_end_angle() {
        let prev = compute_slices(&[rec("a", "Food", 10.0), rec("b", "Rent", 30.0)]);
        let next = compute_slices(&[rec("b", "Rent", 30.0)]);
        let plan = reconcile(&prev, &next);

        let exit = plan
            .tweens
            .iter()
            .find(|t| t.phase == Phase::Exit)
            .expect("exit tween for a");
        assert_eq!(exit.record.id, "a");
        // Target is a zero-width arc at the previous end angle.
        assert!((exit.to.start - exit.from.end).abs() < EPS);
        assert!((exit.to.end - exit.from.end).abs() < EPS);
        assert!(exit.angles_at(1.0).span().abs() < EPS);
        // Exits come after the surviving slices.
        assert_eq!(plan.tweens.last().unwrap().phase, Phase::Exit);
    }

    #[test]
    fn test_color_indices_follow_domain_order() {
        let next = compute_slices(&[rec("a", "Food", 10.0), rec("b", "Rent", 30.0)]);
        let plan = reconcile(&[], &next);
        assert_eq!(plan.tweens[0].color_index, 0);
        assert_eq!(plan.tweens[1].color_index, 1);
    }

    #[test]
    fn test_exit_keeps_assigned_color_index() {
        let prev = compute_slices(&[rec("a", "Food", 10.0), rec("b", "Rent", 30.0)]);
        let next = compute_slices(&[rec("b", "Rent", 30.0)]);
        let anim = Animator::new(reconcile(&prev, &next), Duration::from_millis(750));

        // "Food" is no longer in the domain built from the new slice set, yet
        // the exiting slice still paints with its old index while it shrinks.
        let mid = anim.frame(anim.started + Duration::from_millis(375));
        let exiting = mid
            .iter()
            .find(|s| s.record.id == "a")
            .expect("exiting slice mid-flight");
        assert_eq!(exiting.phase, Phase::Exit);
        assert!(exiting.angles.span() > 0.0);
        assert_eq!(exiting.color_index, 0);
    }

    #[test]
    fn test_idempotent_reconcile_has_no_enter_or_exit() {
        let slices = compute_slices(&[rec("a", "Food", 10.0), rec("b", "Rent", 30.0)]);
        let plan = reconcile(&slices, &slices);

        assert_eq!(plan.tweens.len(), 2);
        for tween in &plan.tweens {
            assert_eq!(tween.phase, Phase::Update);
            assert_eq!(tween.from, tween.to);
        }
    }

    // ── Animator ──────────────────────────────────────────────────────────

    #[test]
    fn test_animator_progress_clamps() {
        let plan = reconcile(&[], &compute_slices(&[rec("a", "Food", 10.0)]));
        let anim = Animator::new(plan, Duration::from_millis(750));

        assert!(anim.progress(anim.started) < EPS);
        let later = anim.started + Duration::from_secs(10);
        assert!((anim.progress(later) - 1.0).abs() < EPS);
        assert!(anim.is_complete(later));
    }

    #[test]
    fn test_animator_zero_duration_snaps() {
        let plan = reconcile(&[], &compute_slices(&[rec("a", "Food", 10.0)]));
        let anim = Animator::new(plan, Duration::ZERO);
        assert!(anim.is_complete(anim.started));
    }

    #[test]
    fn test_exiting_slice_rendered_mid_flight_then_dropped() {
        let prev = compute_slices(&[rec("a", "Food", 10.0), rec("b", "Rent", 30.0)]);
        let next = compute_slices(&[rec("b", "Rent", 30.0)]);
        let anim = Animator::new(reconcile(&prev, &next), Duration::from_millis(750));

        // Mid-animation the exiting slice is still painted, shrinking.
        let mid = anim.frame(anim.started + Duration::from_millis(375));
        let exiting = mid
            .iter()
            .find(|s| s.record.id == "a")
            .expect("exiting slice still visible mid-flight");
        assert!(exiting.angles.span() > 0.0);

        // After completion it is gone from the visual set.
        let done = anim.frame(anim.started + Duration::from_secs(2));
        assert!(done.iter().all(|s| s.record.id != "a"));
        assert_eq!(done.len(), 1);
    }

    #[test]
    fn test_frame_at_completion_matches_targets() {
        let next = compute_slices(&[rec("a", "Food", 10.0), rec("b", "Rent", 30.0)]);
        let anim = Animator::new(reconcile(&[], &next), Duration::from_millis(750));

        let done = anim.frame(anim.started + Duration::from_secs(2));
        assert_eq!(done.len(), next.len());
        for (rendered, target) in done.iter().zip(next.iter()) {
            assert!((rendered.angles.start - target.angles.start).abs() < EPS);
            assert!((rendered.angles.end - target.angles.end).abs() < EPS);
        }
    }

    #[test]
    fn test_settled_frame_is_target_geometry() {
        let slices = compute_slices(&[rec("a", "Food", 10.0)]);
        let frame = settled_frame(&slices);
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].angles, slices[0].angles);
        assert_eq!(frame[0].phase, Phase::Update);
    }
}
