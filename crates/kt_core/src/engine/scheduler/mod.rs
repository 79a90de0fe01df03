//! Tick scheduler: the sole driver of simulated time.
//!
//! A min-heap of events keyed by `(tick, kind priority, insertion order)`.
//! Draining is per-event, never per-tick: empty ticks cost nothing, and a
//! single drain call can cover an arbitrary span of simulated time. Every
//! subsystem (ball physics, player physics, player AI, referee) hangs off
//! this queue; nothing else advances the clock.

pub mod event;
pub mod headless;
pub mod realtime;

pub use event::{Event, EventHandle, EventKind, RefereeSignal};

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering as MemOrdering};

use crate::error::{Result, SimError};

/// One millisecond of simulated time.
pub type Tick = u32;

/// Largest schedulable tick. A full match (including stoppage time) fits in
/// under 5.5 million ticks, so the headroom is enormous.
pub const TICK_MAX: Tick = Tick::MAX;

/// A scheduler plus the dispatch logic that drains it.
///
/// The pacing wrappers (`realtime`, `headless`) drive implementations of
/// this trait without knowing anything about match semantics; the match
/// engine is the production implementation.
pub trait Drivable {
    fn current_tick(&self) -> Tick;

    /// Drain every event with `tick <= target`, then advance the clock to
    /// `target`.
    fn advance_to(&mut self, target: Tick) -> Result<()>;

    /// Drain until no live event remains.
    fn advance_to_end(&mut self) -> Result<()>;

    /// Tick of the earliest live event, if any.
    fn next_event_tick(&mut self) -> Option<Tick>;

    /// True when no live event remains and nothing further can fire.
    fn is_idle(&self) -> bool;
}

/// Identity of a scheduler instance. Events and handles are bound to the
/// scheduler that created them and may not migrate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerId(u32);

static NEXT_SCHEDULER_ID: AtomicU32 = AtomicU32::new(0);

/// Heap entry. Ordered by `(tick, ordinal, seq)` ascending; the `Reverse`
/// wrapper turns `BinaryHeap`'s max-heap into the min-heap we need.
#[derive(Debug, PartialEq, Eq)]
struct HeapEntry {
    tick: Tick,
    ordinal: u8,
    seq: u64,
    kind: EventKind,
}

impl HeapEntry {
    #[inline]
    fn key(&self) -> (Tick, u8, u64) {
        (self.tick, self.ordinal, self.seq)
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue over future events.
///
/// Invariants:
/// - every live event's tick is strictly greater than `current_tick` at the
///   moment of insertion,
/// - `current_tick` never decreases,
/// - while a drain callback executes, `current_tick` equals the fired
///   event's tick.
#[derive(Debug)]
pub struct Scheduler {
    id: SchedulerId,
    current_tick: Tick,
    next_seq: u64,
    heap: BinaryHeap<Reverse<HeapEntry>>,
    /// Sequences still scheduled. Entries removed via `reschedule`/`cancel`
    /// stay in the heap as stale nodes and are skipped on pop.
    live: HashSet<u64>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            id: SchedulerId(NEXT_SCHEDULER_ID.fetch_add(1, MemOrdering::Relaxed)),
            current_tick: 0,
            next_seq: 0,
            heap: BinaryHeap::new(),
            live: HashSet::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> SchedulerId {
        self.id
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Number of live (scheduled, not yet fired) events.
    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    // =========================================================================
    // Scheduling
    // =========================================================================

    /// Schedule `kind` to fire at `tick`. The tick must be strictly in the
    /// future; anything else is a fatal contract violation.
    pub fn schedule(&mut self, tick: Tick, kind: EventKind) -> Result<EventHandle> {
        if tick <= self.current_tick {
            return Err(SimError::TickInPast {
                requested: tick,
                current: self.current_tick,
                kind: kind.label(),
            });
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(seq);
        self.heap.push(Reverse(HeapEntry {
            tick,
            ordinal: kind.ordinal(),
            seq,
            kind,
        }));
        Ok(EventHandle {
            owner: self.id,
            seq,
            tick,
            kind,
        })
    }

    /// Schedule for the very next tick.
    pub fn schedule_on_next_tick(&mut self, kind: EventKind) -> Result<EventHandle> {
        self.schedule(self.current_tick.saturating_add(1), kind)
    }

    /// Schedule `offset` ticks from now. `offset` must be strictly positive;
    /// an offset of zero lands on the current tick and is rejected.
    pub fn schedule_on_offset(&mut self, offset: Tick, kind: EventKind) -> Result<EventHandle> {
        self.schedule(self.current_tick.saturating_add(offset), kind)
    }

    /// Atomically remove a scheduled event and re-enqueue it at
    /// `current_tick + offset`.
    pub fn reschedule(&mut self, handle: EventHandle, offset: Tick) -> Result<EventHandle> {
        self.remove(handle)?;
        self.schedule_on_offset(offset, handle.kind)
    }

    /// Remove a scheduled event so it never fires.
    pub fn cancel(&mut self, handle: EventHandle) -> Result<()> {
        self.remove(handle)
    }

    fn remove(&mut self, handle: EventHandle) -> Result<()> {
        if handle.owner != self.id {
            return Err(SimError::ForeignHandle {
                kind: handle.kind.label(),
            });
        }
        if !self.live.remove(&handle.seq) {
            return Err(SimError::HandleSpent {
                kind: handle.kind.label(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Draining
    // =========================================================================

    /// Fire every event with `tick <= target` in heap order, then advance
    /// `current_tick` to `target`.
    ///
    /// While `fire` executes, `current_tick` equals the fired event's tick,
    /// so schedule attempts into the past are rejected from inside callbacks
    /// too. An empty heap simply advances the clock; this never blocks.
    ///
    /// On error the drain stops immediately: `current_tick` stays at the
    /// failing event's tick and the remaining events stay queued, preserving
    /// the last coherent state for inspection.
    pub fn run_until<F>(&mut self, target: Tick, mut fire: F) -> Result<()>
    where
        F: FnMut(&mut Scheduler, Event) -> Result<()>,
    {
        if target <= self.current_tick {
            return Ok(());
        }
        while let Some(ev) = self.pop_due(target) {
            fire(self, ev)?;
        }
        self.current_tick = target;
        Ok(())
    }

    /// Drain until no live event remains. `current_tick` ends at the last
    /// fired tick (or is unchanged if the heap was already empty).
    pub fn run_until_end<F>(&mut self, mut fire: F) -> Result<()>
    where
        F: FnMut(&mut Scheduler, Event) -> Result<()>,
    {
        while let Some(tick) = self.peek_tick() {
            self.run_until(tick, &mut fire)?;
        }
        Ok(())
    }

    /// Tick of the earliest live event, if any.
    pub fn peek_tick(&mut self) -> Option<Tick> {
        loop {
            let head = self.heap.peek()?;
            if self.live.contains(&head.0.seq) {
                return Some(head.0.tick);
            }
            // Stale node left behind by reschedule/cancel.
            self.heap.pop();
        }
    }

    /// Pop the next live event with `tick <= target`, advancing
    /// `current_tick` to its tick.
    fn pop_due(&mut self, target: Tick) -> Option<Event> {
        loop {
            match self.heap.peek() {
                Some(Reverse(head)) if head.tick <= target => {}
                _ => return None,
            }
            if let Some(Reverse(entry)) = self.heap.pop() {
                if self.live.remove(&entry.seq) {
                    self.current_tick = entry.tick;
                    return Some(Event {
                        tick: entry.tick,
                        kind: entry.kind,
                        seq: entry.seq,
                    });
                }
                // Stale node: skip and keep looking.
            }
        }
    }
}
