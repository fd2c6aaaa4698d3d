//! Fixed-interval refresh driving sample generation.
//!
//! The scheduler owns every [`ChannelBuffer`] and is the only code that
//! appends to them. Hosts call [`RefreshScheduler::poll`] from their own loop;
//! a poll runs at most one tick, so missed intervals are never replayed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use log::debug;

use crate::buffer::{ChannelBuffer, ChannelSet};
use crate::channel::Channel;
use crate::config::Config;
use crate::error::Result;
use crate::feed::DisplayFeed;
use crate::generator::{SampleGenerator, SampleSource, TickSample};

/// Scheduler lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for the interval to elapse.
    Idle,
    /// Generating and appending readings for every channel.
    Ticking,
}

/// Periodic refresh loop over all channels.
#[derive(Debug)]
pub struct RefreshScheduler<S = SampleGenerator> {
    source: S,
    channels: ChannelSet,
    interval: Duration,
    state: SchedulerState,
    last_tick: Option<Instant>,
    tick_count: u64,
}

impl RefreshScheduler<SampleGenerator> {
    /// Scheduler with an entropy-seeded generator on the wall clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(SampleGenerator::from_config(config), config)
    }

    /// Scheduler whose values are reproducible for a given seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn seeded(config: &Config, seed: u64) -> Result<Self> {
        Self::new(SampleGenerator::seeded(config, seed), config)
    }
}

impl<S: SampleSource> RefreshScheduler<S> {
    /// Creates an idle scheduler with empty buffers.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(source: S, config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            channels: ChannelSet::new(config.global.deque_size)?,
            interval: config.update_interval(),
            state: SchedulerState::Idle,
            last_tick: None,
            tick_count: 0,
        })
    }

    /// Returns true if a tick should run at `now`.
    ///
    /// The first poll is always due.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_tick {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Time left until the next tick is due (zero if already due).
    #[must_use]
    pub fn next_due(&self, now: Instant) -> Duration {
        match self.last_tick {
            None => Duration::ZERO,
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }

    /// Runs one tick if the interval has elapsed. Returns whether it ticked.
    ///
    /// However late the poll, at most one tick runs and the next deadline is
    /// measured from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.tick_at(now);
        true
    }

    /// Runs one tick immediately, regardless of the interval.
    pub fn tick(&mut self) -> TickSample {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, completed: Instant) -> TickSample {
        self.state = SchedulerState::Ticking;

        let sample = self.source.sample_tick();
        for channel in Channel::ALL {
            self.channels.get_mut(channel).append(sample.get(channel));
        }

        self.tick_count += 1;
        self.last_tick = Some(completed);
        self.state = SchedulerState::Idle;

        debug!(
            "tick {}: day={:.1} night={:.1}",
            self.tick_count,
            sample.day.value(),
            sample.night.value()
        );
        sample
    }

    /// Read-only access to a channel's buffer.
    #[must_use]
    pub fn buffer(&self, channel: Channel) -> &ChannelBuffer {
        self.channels.get(channel)
    }

    /// Read-only access to all buffers.
    #[must_use]
    pub fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    /// Pull API over the current buffers.
    #[must_use]
    pub fn feed(&self) -> DisplayFeed<'_> {
        DisplayFeed::new(&self.channels)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Number of completed ticks.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Configured tick period.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// A scheduler behind one mutex, for hosts that read from other threads.
///
/// A whole tick runs under the lock, so a reader sees either all of a tick's
/// appends or none of them.
#[derive(Debug)]
pub struct SharedScheduler<S = SampleGenerator> {
    inner: Arc<Mutex<RefreshScheduler<S>>>,
}

impl<S> Clone for SharedScheduler<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SampleSource> SharedScheduler<S> {
    /// Wraps a scheduler.
    #[must_use]
    pub fn new(scheduler: RefreshScheduler<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(scheduler)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RefreshScheduler<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`RefreshScheduler::poll`].
    pub fn poll(&self, now: Instant) -> bool {
        self.lock().poll(now)
    }

    /// See [`RefreshScheduler::tick`].
    pub fn tick(&self) -> TickSample {
        self.lock().tick()
    }

    /// Runs `f` against a consistent view of every buffer.
    pub fn read<T>(&self, f: impl FnOnce(DisplayFeed<'_>) -> T) -> T {
        let guard = self.lock();
        f(guard.feed())
    }

    /// Number of completed ticks.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.lock().tick_count()
    }
}
