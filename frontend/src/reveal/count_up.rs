use std::future::Future;

/// A timed progression from zero to `target`.
///
/// Values are computed from the tick index with integer arithmetic, so the
/// sequence depends only on `(target, duration_ms, tick_ms)` and the last
/// frame is always exactly `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountUp {
    pub target: u64,
    pub duration_ms: u32,
    pub tick_ms: u32,
}

impl CountUp {
    pub fn new(target: u64, duration_ms: u32, tick_ms: u32) -> Self {
        CountUp {
            target,
            duration_ms,
            tick_ms: tick_ms.max(1),
        }
    }

    /// Number of ticks until the final value, at least one.
    pub fn tick_count(&self) -> u64 {
        let ticks = (self.duration_ms as u64).div_ceil(self.tick_ms as u64);
        ticks.max(1)
    }

    pub fn value_at(&self, tick: u64) -> u64 {
        let ticks = self.tick_count();
        if tick >= ticks {
            return self.target;
        }
        let value = (self.target as u128 * tick as u128 / ticks as u128) as u64;
        value.min(self.target)
    }

    /// Values emitted on ticks 1..=tick_count.
    pub fn frames(&self) -> impl Iterator<Item = u64> + '_ {
        (1..=self.tick_count()).map(move |tick| self.value_at(tick))
    }
}

/// Drives a count-up, sleeping `tick_ms` before every frame.
///
/// `sleep` is the timer source: gloo's `TimeoutFuture` in the browser, an
/// immediately ready future in tests.
pub async fn run_count_up<S, F, E>(count: CountUp, mut sleep: S, mut emit: E)
where
    S: FnMut(u32) -> F,
    F: Future<Output = ()>,
    E: FnMut(u64),
{
    for value in count.frames() {
        sleep(count.tick_ms).await;
        emit(value);
    }
}
