//! The set of live leaves: placement, drift, hit-testing and replenishment.
//!
//! Leaves are kept in insertion order. That order doubles as draw order, so the
//! last matching leaf is the one on top and wins hit-tests.
//!
//! Solvability: whenever the field is non-empty, exactly one alive leaf carries
//! the expected number. `populate` places it first-class and `resolve_click`
//! respawns it after every successful match.
//!
//! After a match, leaves whose numbers have fallen out of `number_range` for the
//! new expected number are retired, so every alive number stays in the window.

use std::ops::RangeInclusive;

use glam::Vec2;
use leaf_engine::{EntityId, Rng};

use crate::leaf::{Drift, Leaf, LeafId};
use crate::sequence::SequenceState;

/// Above this many values a number range is sampled instead of enumerated.
const ENUMERATE_LIMIT: u64 = 1024;
const SAMPLE_ATTEMPTS: u32 = 64;

/// Layout and numbering parameters for a `LeafField`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldParams {
    /// Size the field is topped back up to after a leaf is consumed.
    pub target_count: usize,
    pub leaf_radius: f32,
    /// Minimum distance between leaf anchors at spawn time.
    pub min_separation: f32,
    pub spawn_min: Vec2,
    pub spawn_max: Vec2,
    pub drift_amplitude: f32,
    pub drift_speed: f32,
    /// Rejection-sampling budget per leaf.
    pub placement_attempts: u32,
    /// Distractor window below the expected number (floored at 1).
    pub numbers_below: u32,
    /// Distractor window above the expected number.
    pub numbers_above: u32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            target_count: 4,
            leaf_radius: 20.0,
            min_separation: 80.0,
            spawn_min: Vec2::new(50.0, 50.0),
            spawn_max: Vec2::new(550.0, 300.0),
            drift_amplitude: 6.0,
            drift_speed: 1.5,
            placement_attempts: 64,
            numbers_below: 4,
            numbers_above: 4,
        }
    }
}

/// Result of routing one click through the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickOutcome {
    /// The leaf under the pointer, if any. On a match this is the consumed leaf
    /// (with `alive == false`).
    pub hit: Option<Leaf>,
    pub matched: bool,
}

impl ClickOutcome {
    pub const MISS: ClickOutcome = ClickOutcome {
        hit: None,
        matched: false,
    };

    /// A leaf was hit but it was not the expected number.
    pub fn is_wrong_leaf(&self) -> bool {
        self.hit.is_some() && !self.matched
    }
}

#[derive(Debug, Clone)]
pub struct LeafField {
    params: FieldParams,
    leaves: Vec<Leaf>,
    /// Count requested by the last `populate`; replenishment tops up to this.
    target_count: usize,
    next_id: u32,
    /// Seconds of drift accumulated by `tick`.
    clock: f32,
    rng: Rng,
}

impl LeafField {
    pub fn new(params: FieldParams, seed: u64) -> Self {
        Self {
            target_count: params.target_count,
            params,
            leaves: Vec::with_capacity(16),
            next_id: 1,
            clock: 0.0,
            rng: Rng::new(seed),
        }
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = Rng::new(seed);
    }

    /// Distractor range for a given expected number, per the field parameters.
    pub fn number_range(&self, expected: u32) -> RangeInclusive<u32> {
        let lo = expected.saturating_sub(self.params.numbers_below).max(1);
        let hi = expected.saturating_add(self.params.numbers_above);
        lo..=hi
    }

    /// Replace the active set with `target_count` leaves: one carrying
    /// `expected`, the rest distinct numbers from `numbers` other than `expected`.
    ///
    /// If the range cannot supply enough distinct numbers the field is filled
    /// with as many as it can.
    pub fn populate(&mut self, target_count: usize, numbers: RangeInclusive<u32>, expected: u32) {
        self.leaves.clear();
        self.target_count = target_count;
        if target_count == 0 {
            return;
        }

        let mut chosen = vec![expected];
        while chosen.len() < target_count {
            match self.draw_unused(&numbers, |n| chosen.contains(&n)) {
                Some(n) => chosen.push(n),
                None => {
                    log::warn!(
                        "number range {}..={} only supplies {} of {} leaves",
                        numbers.start(),
                        numbers.end(),
                        chosen.len(),
                        target_count
                    );
                    break;
                }
            }
        }

        // Shuffle so the expected leaf isn't always first in draw order.
        for i in (1..chosen.len()).rev() {
            let j = self.rng.next_int(i as u32 + 1) as usize;
            chosen.swap(i, j);
        }

        for number in chosen {
            self.spawn(number);
        }

        log::debug!("populated {} leaves around {}", self.leaves.len(), expected);
        debug_assert!(self.is_solvable(expected), "populate lost the expected leaf");
    }

    /// Advance every leaf along its drift. Non-positive or non-finite `dt` is ignored.
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.clock += dt;
        let t = self.clock;
        for leaf in self.leaves.iter_mut().filter(|l| l.alive) {
            leaf.pos = leaf.drift.position_at(t);
        }
    }

    /// Topmost alive leaf containing the point. Overlaps resolve to the most
    /// recently created leaf.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<Leaf> {
        self.hit_index(Vec2::new(x, y)).map(|idx| self.leaves[idx])
    }

    /// Route a click: hit-test, ask `sequence` to advance on the leaf's number,
    /// and on success consume the leaf and replenish. Wrong clicks change nothing.
    pub fn resolve_click(&mut self, x: f32, y: f32, sequence: &mut SequenceState) -> ClickOutcome {
        let Some(idx) = self.hit_index(Vec2::new(x, y)) else {
            return ClickOutcome::MISS;
        };
        let leaf = self.leaves[idx];

        if !sequence.try_advance(leaf.number) {
            log::debug!(
                "clicked {} while looking for {}",
                leaf.number,
                sequence.expected_number()
            );
            return ClickOutcome {
                hit: Some(leaf),
                matched: false,
            };
        }

        let consumed = self.consume(idx);
        self.replenish(sequence.expected_number());

        ClickOutcome {
            hit: Some(consumed),
            matched: true,
        }
    }

    /// Remove every leaf.
    pub fn clear(&mut self) {
        self.leaves.clear();
    }

    /// Alive leaves in insertion (draw) order.
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn get(&self, id: LeafId) -> Option<&Leaf> {
        self.leaves.iter().find(|l| l.id == id)
    }

    pub fn find_number(&self, number: u32) -> Option<&Leaf> {
        self.leaves.iter().find(|l| l.alive && l.number == number)
    }

    pub fn count_number(&self, number: u32) -> usize {
        self.leaves
            .iter()
            .filter(|l| l.alive && l.number == number)
            .count()
    }

    /// Empty, or exactly one alive leaf carrying `expected`.
    pub fn is_solvable(&self, expected: u32) -> bool {
        self.is_empty() || self.count_number(expected) == 1
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Index of the topmost alive leaf containing `point`.
    fn hit_index(&self, point: Vec2) -> Option<usize> {
        self.leaves
            .iter()
            .rposition(|leaf| leaf.alive && leaf.contains(point))
    }

    /// Take the leaf at `idx` out of the active set, marking it dead.
    fn consume(&mut self, idx: usize) -> Leaf {
        // `remove`, not `swap_remove`: insertion order is draw order.
        let mut leaf = self.leaves.remove(idx);
        leaf.alive = false;
        leaf
    }

    /// Retire numbers that left the window, make sure `expected` is present,
    /// then top the field back up from the window.
    fn replenish(&mut self, expected: u32) {
        let range = self.number_range(expected);
        let before = self.leaves.len();
        self.leaves.retain(|l| range.contains(&l.number));
        if self.leaves.len() < before {
            log::debug!("retired {} leaves outside {:?}", before - self.leaves.len(), range);
        }

        if self.find_number(expected).is_none() {
            self.spawn(expected);
        }

        while self.leaves.len() < self.target_count {
            let leaves = &self.leaves;
            let drawn = draw_unused(&mut self.rng, &range, |n| {
                n == expected || leaves.iter().any(|l| l.number == n)
            });
            match drawn {
                Some(n) => {
                    self.spawn(n);
                }
                None => break,
            }
        }

        log::debug!("replenished to {} leaves, expecting {}", self.leaves.len(), expected);
        debug_assert!(self.is_solvable(expected), "replenish lost the expected leaf");
        debug_assert!(self.leaves.iter().all(|l| range.contains(&l.number)));
    }

    fn draw_unused(&mut self, range: &RangeInclusive<u32>, taken: impl Fn(u32) -> bool) -> Option<u32> {
        draw_unused(&mut self.rng, range, taken)
    }

    fn spawn(&mut self, number: u32) -> LeafId {
        let anchor = self.find_spot();
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let drift = Drift {
            anchor,
            phase: self.rng.range_f32(0.0, std::f32::consts::TAU),
            amplitude: self.params.drift_amplitude,
            speed: self.params.drift_speed * self.rng.range_f32(0.75, 1.25),
        };
        self.leaves.push(Leaf {
            id,
            number,
            pos: drift.position_at(self.clock),
            radius: self.params.leaf_radius,
            alive: true,
            drift,
        });
        id
    }

    /// Rejection-sample an anchor at least `min_separation` from every other
    /// anchor. Falls back to the roomiest candidate seen.
    fn find_spot(&mut self) -> Vec2 {
        let (min, max) = (self.params.spawn_min, self.params.spawn_max);
        let mut best = (min + max) * 0.5;
        let mut best_gap = f32::NEG_INFINITY;

        for _ in 0..self.params.placement_attempts.max(1) {
            let candidate = Vec2::new(
                self.rng.range_f32(min.x, max.x),
                self.rng.range_f32(min.y, max.y),
            );
            let gap = self
                .leaves
                .iter()
                .map(|l| l.drift.anchor.distance(candidate))
                .fold(f32::INFINITY, f32::min);
            if gap >= self.params.min_separation {
                return candidate;
            }
            if gap > best_gap {
                best = candidate;
                best_gap = gap;
            }
        }

        log::warn!(
            "no free spot after {} attempts, placing leaf {:.1} from its nearest neighbour",
            self.params.placement_attempts,
            best_gap
        );
        best
    }
}

/// Pick a number from `range` for which `taken` is false.
fn draw_unused(rng: &mut Rng, range: &RangeInclusive<u32>, taken: impl Fn(u32) -> bool) -> Option<u32> {
    let (lo, hi) = (*range.start(), *range.end());
    if lo > hi {
        return None;
    }

    let span = (hi - lo) as u64 + 1;
    if span <= ENUMERATE_LIMIT {
        let free: Vec<u32> = (lo..=hi).filter(|n| !taken(*n)).collect();
        return rng.choose(&free).copied();
    }

    (0..SAMPLE_ATTEMPTS)
        .map(|_| rng.range_u32(lo..=hi))
        .find(|n| !taken(*n))
}
