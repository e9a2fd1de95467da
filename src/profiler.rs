use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SectionStats {
    pub total: Duration,
    pub calls: u64,
}

impl SectionStats {
    pub fn mean(&self) -> Duration {
        if self.calls == 0 {
            Duration::ZERO
        } else {
            self.total / self.calls as u32
        }
    }
}

/// Simple scoped profiler recording cumulative time and call count per section.
#[derive(Default)]
pub struct Profiler {
    pub sections: HashMap<&'static str, SectionStats>,
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &'static str, elapsed: Duration) {
        let entry = self.sections.entry(name).or_default();
        entry.total += elapsed;
        entry.calls += 1;
    }

    pub fn finish(&mut self, guard: &ProfilerGuard) {
        self.record(guard.name, guard.start.elapsed());
    }

    /// Sections ordered by total time, longest first.
    pub fn report_sorted(&self) -> Vec<(&'static str, SectionStats)> {
        let mut v: Vec<_> = self.sections.iter().map(|(n, s)| (*n, *s)).collect();
        v.sort_by(|a, b| b.1.total.cmp(&a.1.total));
        v
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    pub fn print_and_clear(&mut self) {
        for (name, stats) in self.report_sorted() {
            println!(
                "{:<20} {:>12?} {:>8} calls {:>12?}/call",
                name,
                stats.total,
                stats.calls,
                stats.mean()
            );
        }
        self.clear();
    }
}

pub struct ProfilerGuard {
    name: &'static str,
    start: Instant,
}

/// Start a profiling section. Returns a guard that will update the global
/// profiler when dropped.
pub fn start(name: &'static str) -> ProfilerGuard {
    ProfilerGuard { name, start: Instant::now() }
}

#[cfg(feature = "profiling")]
impl Drop for ProfilerGuard {
    fn drop(&mut self) {
        crate::PROFILER.lock().finish(self);
    }
}

/// Macro helper to profile a scope only when the `profiling` feature is enabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _guard = $crate::profiler::start($name);
    };
}
