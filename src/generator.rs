//! Synthetic temperature sampling.
//!
//! - [`Clock`]: where "now" comes from ([`SystemClock`] or [`ManualClock`])
//! - [`SampleSource`]: the seam the scheduler pulls one tick of readings from
//! - [`SampleGenerator`]: uniform random values per channel profile
//!
//! Both the random source and the clock are injectable so runs can be
//! reproduced exactly in tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveDateTime, SubsecRound};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::channel::Channel;
use crate::config::{ChannelProfile, Config};
use crate::reading::Reading;

/// Source of wall-clock time for reading timestamps.
pub trait Clock: Send + Sync {
    /// Returns the current local date-time.
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Settable clock; clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    secs: Arc<AtomicI64>,
}

impl ManualClock {
    /// Creates a clock frozen at `start` (sub-second part dropped).
    #[must_use]
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            secs: Arc::new(AtomicI64::new(start.and_utc().timestamp())),
        }
    }

    /// Moves the clock to `time`.
    pub fn set(&self, time: NaiveDateTime) {
        self.secs.store(time.and_utc().timestamp(), Ordering::SeqCst);
    }

    /// Moves the clock forward by `secs` seconds.
    pub fn advance_secs(&self, secs: i64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        DateTime::from_timestamp(self.secs.load(Ordering::SeqCst), 0)
            .map(|dt| dt.naive_utc())
            .unwrap_or_default()
    }
}

/// One reading per channel, all taken at the same clock instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSample {
    /// Daytime reading.
    pub day: Reading,
    /// Night-time reading.
    pub night: Reading,
}

impl TickSample {
    /// Returns the reading for a channel.
    #[must_use]
    pub fn get(&self, channel: Channel) -> Reading {
        match channel {
            Channel::Day => self.day,
            Channel::Night => self.night,
        }
    }
}

/// Producer of readings for the refresh scheduler.
///
/// Implementations must not fail: a tick always yields a full sample.
pub trait SampleSource {
    /// Produces one reading per channel for the current tick.
    fn sample_tick(&mut self) -> TickSample;
}

/// Uniform random generator over per-channel value ranges.
#[derive(Debug, Clone)]
pub struct SampleGenerator<R = StdRng, C = SystemClock> {
    rng: R,
    clock: C,
    day: ChannelProfile,
    night: ChannelProfile,
}

impl SampleGenerator<StdRng, SystemClock> {
    /// Generator seeded from OS entropy, using the wall clock.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(StdRng::from_entropy(), SystemClock, config)
    }

    /// Generator with a fixed seed, using the wall clock.
    #[must_use]
    pub fn seeded(config: &Config, seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), SystemClock, config)
    }
}

impl<R: Rng, C: Clock> SampleGenerator<R, C> {
    /// Creates a generator with the configured channel profiles.
    #[must_use]
    pub fn new(rng: R, clock: C, config: &Config) -> Self {
        Self {
            rng,
            clock,
            day: config.profile(Channel::Day),
            night: config.profile(Channel::Night),
        }
    }

    /// Generates a reading for `channel` at the clock's current time.
    pub fn generate(&mut self, channel: Channel) -> Reading {
        let now = self.clock.now();
        self.generate_at(channel, now)
    }

    /// Generates a reading for `channel` as of `now`.
    ///
    /// The value is uniform over the channel range, rounded to one decimal.
    /// The timestamp is `now` truncated to the second, shifted by the
    /// channel's hour offset.
    ///
    /// Profiles that never passed [`Config::validate`] still produce a
    /// reading: a range too wide to sample yields its lower bound, and an
    /// offset outside chrono's range leaves the timestamp unshifted.
    pub fn generate_at(&mut self, channel: Channel, now: NaiveDateTime) -> Reading {
        let profile = match channel {
            Channel::Day => self.day,
            Channel::Night => self.night,
        };
        let (lo, hi) = if profile.min <= profile.max {
            (profile.min, profile.max)
        } else {
            (profile.max, profile.min)
        };

        let value = if lo < hi && (hi - lo).is_finite() {
            round_tenths(self.rng.gen_range(lo..=hi)).clamp(lo, hi)
        } else {
            lo
        };

        let now = now.trunc_subsecs(0);
        let timestamp = Duration::try_hours(profile.offset_hours)
            .and_then(|offset| now.checked_add_signed(offset))
            .unwrap_or(now);

        Reading::new(value, timestamp)
    }

    /// Generates both channels from a single clock read.
    pub fn generate_tick(&mut self) -> TickSample {
        let now = self.clock.now();
        TickSample {
            day: self.generate_at(Channel::Day, now),
            night: self.generate_at(Channel::Night, now),
        }
    }
}

impl<R: Rng, C: Clock> SampleSource for SampleGenerator<R, C> {
    fn sample_tick(&mut self) -> TickSample {
        self.generate_tick()
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_milli_opt(14, 0, 5, 750)
            .unwrap()
    }

    fn generator(seed: u64) -> SampleGenerator<StdRng, ManualClock> {
        SampleGenerator::new(
            StdRng::seed_from_u64(seed),
            ManualClock::new(start()),
            &Config::default(),
        )
    }

    #[test]
    fn test_values_stay_in_channel_ranges() {
        let mut gen = generator(7);

        for _ in 0..500 {
            let tick = gen.generate_tick();
            assert!((104.0..=113.0).contains(&tick.day.value()), "day {}", tick.day.value());
            assert!((77.0..=86.0).contains(&tick.night.value()), "night {}", tick.night.value());
        }
    }

    #[test]
    fn test_values_have_one_decimal() {
        let mut gen = generator(11);

        for _ in 0..100 {
            let v = gen.generate(Channel::Day).value();
            assert!(((v * 10.0).round() - v * 10.0).abs() < 1e-6, "{v} not rounded");
        }
    }

    #[test]
    fn test_night_is_twelve_hours_behind_day() {
        let mut gen = generator(3);
        let tick = gen.generate_tick();

        assert_eq!(tick.day.timestamp() - tick.night.timestamp(), Duration::hours(12));
        assert_eq!(tick.day.timestamp_text(), "2024-07-01 14:00:05");
        assert_eq!(tick.night.timestamp_text(), "2024-07-01 02:00:05");
    }

    #[test]
    fn test_same_seed_reproduces_values() {
        let mut a = generator(42);
        let mut b = generator(42);

        for _ in 0..20 {
            assert_eq!(a.generate_tick(), b.generate_tick());
        }
    }

    #[test]
    fn test_degenerate_range_yields_bound() {
        let mut config = Config::default();
        config.channels.day.min = 100.0;
        config.channels.day.max = 100.0;
        let mut gen = SampleGenerator::new(StdRng::seed_from_u64(1), ManualClock::new(start()), &config);

        assert_eq!(gen.generate(Channel::Day).value(), 100.0);
    }

    #[test]
    fn test_reversed_range_does_not_panic() {
        let mut config = Config::default();
        config.channels.day.min = 113.0;
        config.channels.day.max = 104.0;
        let mut gen = SampleGenerator::new(StdRng::seed_from_u64(1), ManualClock::new(start()), &config);

        let v = gen.generate(Channel::Day).value();
        assert!((104.0..=113.0).contains(&v));
    }

    #[test]
    fn test_unsampleable_range_yields_lower_bound() {
        let mut config = Config::default();
        config.channels.day.min = -1.0e308;
        config.channels.day.max = 1.0e308;
        let mut gen = SampleGenerator::new(StdRng::seed_from_u64(1), ManualClock::new(start()), &config);

        assert_eq!(gen.generate(Channel::Day).value(), -1.0e308);
    }

    #[test]
    fn test_out_of_range_offset_leaves_timestamp_unshifted() {
        let mut config = Config::default();
        config.channels.night.offset_hours = 9_000_000_000_000_000;
        let mut gen = SampleGenerator::new(StdRng::seed_from_u64(1), ManualClock::new(start()), &config);

        let tick = gen.generate_tick();
        assert_eq!(tick.night.timestamp(), tick.day.timestamp());
        assert_eq!(tick.night.timestamp_text(), "2024-07-01 14:00:05");
    }

    #[test]
    fn test_manual_clock_advance_is_shared() {
        let clock = ManualClock::new(start());
        let handle = clock.clone();

        handle.advance_secs(3);
        assert_eq!(clock.now(), start().trunc_subsecs(0) + Duration::seconds(3));
    }

    #[test]
    fn test_tick_sample_get() {
        let mut gen = generator(5);
        let tick = gen.sample_tick();

        assert_eq!(tick.get(Channel::Day), tick.day);
        assert_eq!(tick.get(Channel::Night), tick.night);
    }
}
