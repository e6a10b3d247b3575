/*!
# Execution Window Module

Trailing one-hour view of block and transaction execution, kept as a ring of
per-minute summaries.

## Core Components

### Accumulator
The open summary for the current minute. Producers add block and transaction
executions to it until the next rotation.

### Ring
Sixty closed per-minute summaries indexed by a `head` (oldest) and a `tail`
(next write) cursor, plus running totals over the occupied slots. The totals
are updated on every rotation so hour-wide statistics never scan the ring.

### Window Statistics
Rates and average execution periods derived from the running totals and from
a short lookback over the most recently closed minutes.

## Concurrency

A single `parking_lot::RwLock` guards the accumulator, the ring and the
totals. Recording and rotating take the write lock, queries the read lock, so
a query never observes a half-rotated ring.

## Rotation

The aggregator does not own a timer. The host calls
[`SlidingWindowAggregator::rotate`] once per minute, see
[`crate::metrics::rotation::RotationTicker`] for the tokio-driven variant.
*/

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

use super::MetricsUtils;

/// Number of per-minute slots held by the ring
pub const MINUTES_PER_HOUR: usize = 60;

/// Seconds covered by a single slot
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Execution summary for one minute.
///
/// The same shape serves as the open accumulator, as a closed ring slot and
/// as the running totals over the ring. Periods are in microseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecSummary {
    /// Blocks executed
    pub block_count: u64,
    /// Total block execution time (us)
    pub block_period_sum: u64,
    /// Transactions executed
    pub tx_count: u64,
    /// Total transaction execution time (us)
    pub tx_period_sum: u64,
}

impl ExecSummary {
    /// Summary with every field zeroed
    pub const fn zero() -> Self {
        Self {
            block_count: 0,
            block_period_sum: 0,
            tx_count: 0,
            tx_period_sum: 0,
        }
    }

    // Wrapping keeps add-then-sub exact, so running totals stay equal to the
    // sum of the occupied slots even after an overflow.
    fn add(&mut self, other: &ExecSummary) {
        self.block_count = self.block_count.wrapping_add(other.block_count);
        self.block_period_sum = self.block_period_sum.wrapping_add(other.block_period_sum);
        self.tx_count = self.tx_count.wrapping_add(other.tx_count);
        self.tx_period_sum = self.tx_period_sum.wrapping_add(other.tx_period_sum);
    }

    fn sub(&mut self, other: &ExecSummary) {
        self.block_count = self.block_count.wrapping_sub(other.block_count);
        self.block_period_sum = self.block_period_sum.wrapping_sub(other.block_period_sum);
        self.tx_count = self.tx_count.wrapping_sub(other.tx_count);
        self.tx_period_sum = self.tx_period_sum.wrapping_sub(other.tx_period_sum);
    }

    /// Average block execution period in microseconds, 0.0 without blocks
    pub fn avg_block_period(&self) -> f64 {
        MetricsUtils::safe_average(self.block_period_sum, self.block_count)
    }

    /// Average transaction execution period in microseconds, 0.0 without transactions
    pub fn avg_tx_period(&self) -> f64 {
        MetricsUtils::safe_average(self.tx_period_sum, self.tx_count)
    }
}

/// Point-in-time statistics derived from the window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WindowStats {
    /// Transactions per second over the most recently closed minute
    pub tps_recent_minute: f64,
    /// Transactions per second over every closed minute in the ring
    pub tps_recent_hour: f64,
    /// Average block period (us) over the recent lookback
    pub avg_block_period_recent_n: f64,
    /// Average block period (us) over the ring
    pub avg_block_period_recent_hour: f64,
    /// Average transaction period (us) over the recent lookback
    pub avg_tx_period_recent_n: f64,
    /// Average transaction period (us) over the ring
    pub avg_tx_period_recent_hour: f64,
}

/// Fixed ring of closed minutes with running totals
#[derive(Debug)]
struct RingStore {
    slots: [ExecSummary; MINUTES_PER_HOUR],
    head: usize,
    tail: usize,
    totals: ExecSummary,
    has_rotated: bool,
}

impl RingStore {
    fn new() -> Self {
        Self {
            slots: [ExecSummary::zero(); MINUTES_PER_HOUR],
            head: 0,
            tail: 0,
            totals: ExecSummary::zero(),
            has_rotated: false,
        }
    }

    fn next_pos(pos: usize) -> usize {
        (pos + 1) % MINUTES_PER_HOUR
    }

    fn prev_pos(pos: usize) -> usize {
        (pos + MINUTES_PER_HOUR - 1) % MINUTES_PER_HOUR
    }

    fn len(&self) -> usize {
        if !self.has_rotated {
            0
        } else if self.head == self.tail {
            MINUTES_PER_HOUR
        } else {
            (self.tail + MINUTES_PER_HOUR - self.head) % MINUTES_PER_HOUR
        }
    }

    fn is_full(&self) -> bool {
        self.has_rotated && self.head == self.tail
    }

    /// Close `summary` into the ring, evicting the oldest minute when full.
    /// Returns the evicted summary, if any.
    fn push(&mut self, summary: ExecSummary) -> Option<ExecSummary> {
        let evicted = if self.is_full() {
            let oldest = self.slots[self.head];
            self.totals.sub(&oldest);
            self.head = Self::next_pos(self.head);
            Some(oldest)
        } else {
            None
        };

        self.has_rotated = true;
        self.totals.add(&summary);
        self.slots[self.tail] = summary;
        self.tail = Self::next_pos(self.tail);
        evicted
    }

    fn last(&self) -> Option<ExecSummary> {
        self.has_rotated.then(|| self.slots[Self::prev_pos(self.tail)])
    }

    /// Sum of the `n` most recent minutes, clamped to what the ring holds
    fn recent(&self, n: usize) -> ExecSummary {
        let mut sum = ExecSummary::zero();
        let mut pos = self.tail;
        for _ in 0..n.min(self.len()) {
            pos = Self::prev_pos(pos);
            sum.add(&self.slots[pos]);
        }
        sum
    }

    fn iter_oldest_first(&self) -> impl Iterator<Item = &ExecSummary> + '_ {
        (0..self.len()).map(move |i| &self.slots[(self.head + i) % MINUTES_PER_HOUR])
    }
}

#[derive(Debug)]
struct WindowState {
    current: ExecSummary,
    ring: RingStore,
    rotations: u64,
}

/// Trailing-hour aggregator of block and transaction executions.
///
/// Owned by the host service (usually behind an `Arc`) and shared between
/// the execution pipeline, the minute timer and the metrics exporter.
#[derive(Debug)]
pub struct SlidingWindowAggregator {
    state: RwLock<WindowState>,
}

impl Default for SlidingWindowAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl SlidingWindowAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self {
            state: RwLock::new(WindowState {
                current: ExecSummary::zero(),
                ring: RingStore::new(),
                rotations: 0,
            }),
        }
    }

    /// Record one executed block
    pub fn record_block(&self, period: Duration) {
        let micros = MetricsUtils::duration_to_micros(period);
        let mut state = self.state.write();
        let current = &mut state.current;
        current.block_count = current.block_count.wrapping_add(1);
        current.block_period_sum = current.block_period_sum.wrapping_add(micros);
    }

    /// Record a batch of `count` executed transactions taking `period` in total
    pub fn record_transactions(&self, period: Duration, count: u64) {
        let micros = MetricsUtils::duration_to_micros(period);
        let mut state = self.state.write();
        let current = &mut state.current;
        current.tx_count = current.tx_count.wrapping_add(count);
        current.tx_period_sum = current.tx_period_sum.wrapping_add(micros);
    }

    /// Close the current minute into the ring and start a new one.
    ///
    /// Callers must invoke this at most once per minute; extra calls split a
    /// minute's activity over several slots.
    pub fn rotate(&self) {
        let mut state = self.state.write();
        let closed = std::mem::take(&mut state.current);
        let evicted = state.ring.push(closed);
        state.rotations += 1;

        if let Some(evicted) = evicted {
            debug!(
                tx_count = evicted.tx_count,
                block_count = evicted.block_count,
                "evicted oldest execution minute"
            );
        }
        trace!(
            rotation = state.rotations,
            occupancy = state.ring.len(),
            tx_count = closed.tx_count,
            block_count = closed.block_count,
            "closed execution minute"
        );
    }

    /// Derive window statistics using a lookback of `recent_minutes`.
    ///
    /// The lookback is clamped to the minutes actually held; averages over
    /// an empty range are reported as 0.0.
    pub fn window_stats(&self, recent_minutes: usize) -> WindowStats {
        let state = self.state.read();
        let ring = &state.ring;
        let occupancy = ring.len();
        if occupancy == 0 {
            return WindowStats::default();
        }

        let seconds = SECONDS_PER_MINUTE as f64;
        let last = ring.last().unwrap_or_default();
        let recent = ring.recent(recent_minutes);
        let totals = ring.totals;

        WindowStats {
            tps_recent_minute: last.tx_count as f64 / seconds,
            tps_recent_hour: totals.tx_count as f64 / seconds / occupancy as f64,
            avg_block_period_recent_n: recent.avg_block_period(),
            avg_block_period_recent_hour: totals.avg_block_period(),
            avg_tx_period_recent_n: recent.avg_tx_period(),
            avg_tx_period_recent_hour: totals.avg_tx_period(),
        }
    }

    /// Number of closed minutes currently held
    pub fn occupancy(&self) -> usize {
        self.state.read().ring.len()
    }

    /// Running totals over the closed minutes
    pub fn running_totals(&self) -> ExecSummary {
        self.state.read().ring.totals
    }

    /// Snapshot of the open minute
    pub fn current(&self) -> ExecSummary {
        self.state.read().current
    }

    /// Most recently closed minute
    pub fn last_closed(&self) -> Option<ExecSummary> {
        self.state.read().ring.last()
    }

    /// Closed minutes, oldest first
    pub fn closed_slots(&self) -> Vec<ExecSummary> {
        self.state.read().ring.iter_oldest_first().copied().collect()
    }

    /// Rotations performed since construction
    pub fn rotations(&self) -> u64 {
        self.state.read().rotations
    }
}
