//! Wall-clock timer for step timing
//!
//! `Instant` is unavailable on `wasm32-unknown-unknown`, so the worker build
//! reads the JS clock instead.

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    #[cfg(target_arch = "wasm32")]
    started_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    started: std::time::Instant,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        PerfTimer {
            #[cfg(target_arch = "wasm32")]
            started_ms: now_ms(),
            #[cfg(not(target_arch = "wasm32"))]
            started: std::time::Instant::now(),
        }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            (now_ms() - self.started_ms).max(0.0)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.started.elapsed().as_secs_f64() * 1000.0
        }
    }
}
