use crate::domain::PhaseMode;
use serde::Serialize;

pub const ALPHA_MAX: u8 = 255;

/// Window boundaries of the cross-fade cycle, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseWindows {
    pub fade_out_end: f64,
    pub tri_hold_end: f64,
    pub tri_fade_end: f64,
    pub geo_fade_end: f64,
    pub cycle: f64,
}

impl PhaseWindows {
    pub const REFERENCE: Self = Self {
        fade_out_end: 1.5,
        tri_hold_end: 11.5,
        tri_fade_end: 13.0,
        geo_fade_end: 14.5,
        cycle: 23.0,
    };
}

impl Default for PhaseWindows {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Alphas {
    pub geo: u8,
    pub tri: u8,
}

impl Alphas {
    pub const GEO_ONLY: Self = Self {
        geo: ALPHA_MAX,
        tri: 0,
    };
    pub const TRI_ONLY: Self = Self {
        geo: 0,
        tri: ALPHA_MAX,
    };
}

fn ramp(cycle_time: f64, lo: f64, hi: f64, from: u8, to: u8) -> u8 {
    let t = ((cycle_time - lo) / (hi - lo)).clamp(0.0, 1.0);
    let value = (f64::from(to) - f64::from(from)).mul_add(t, f64::from(from));
    value.floor().clamp(0.0, f64::from(ALPHA_MAX)) as u8
}

/// Alphas of the automatic cycle at a given position within it.
pub fn auto_alphas(windows: &PhaseWindows, cycle_time: f64) -> Alphas {
    let w = windows;
    if cycle_time < w.fade_out_end {
        Alphas {
            geo: ramp(cycle_time, 0.0, w.fade_out_end, ALPHA_MAX, 0),
            tri: 0,
        }
    } else if cycle_time < w.tri_hold_end {
        Alphas::TRI_ONLY
    } else if cycle_time < w.tri_fade_end {
        Alphas {
            geo: 0,
            tri: ramp(cycle_time, w.tri_hold_end, w.tri_fade_end, ALPHA_MAX, 0),
        }
    } else if cycle_time < w.geo_fade_end {
        Alphas {
            geo: ramp(cycle_time, w.tri_fade_end, w.geo_fade_end, 0, ALPHA_MAX),
            tri: 0,
        }
    } else {
        Alphas::GEO_ONLY
    }
}

/// Free-running cycle clock; a manual lock pins the alphas but never pauses the clock.
#[derive(Debug, Clone)]
pub struct PhaseScheduler {
    windows: PhaseWindows,
    elapsed: f64,
    mode: PhaseMode,
}

impl PhaseScheduler {
    pub const fn new(windows: PhaseWindows) -> Self {
        Self {
            windows,
            elapsed: 0.0,
            mode: PhaseMode::Auto,
        }
    }

    pub const fn mode(&self) -> PhaseMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PhaseMode) {
        if mode != self.mode {
            log::debug!("phase {} -> {}", self.mode.label(), mode.label());
        }
        self.mode = mode;
    }

    /// Locks onto whichever mode is dominant right now, or releases an existing lock.
    pub fn toggle_lock(&mut self) {
        let next = match self.mode {
            PhaseMode::Auto => {
                let alphas = self.alphas();
                if alphas.geo >= alphas.tri {
                    PhaseMode::Geo
                } else {
                    PhaseMode::Tri
                }
            }
            PhaseMode::Geo | PhaseMode::Tri => PhaseMode::Auto,
        };
        self.set_mode(next);
    }

    pub fn advance(&mut self, delta_seconds: f64) {
        if delta_seconds.is_finite() && delta_seconds > 0.0 {
            self.elapsed += delta_seconds;
        }
    }

    pub fn cycle_time(&self) -> f64 {
        self.elapsed.rem_euclid(self.windows.cycle)
    }

    pub fn alphas(&self) -> Alphas {
        match self.mode {
            PhaseMode::Auto => auto_alphas(&self.windows, self.cycle_time()),
            PhaseMode::Geo => Alphas::GEO_ONLY,
            PhaseMode::Tri => Alphas::TRI_ONLY,
        }
    }
}

impl Default for PhaseScheduler {
    fn default() -> Self {
        Self::new(PhaseWindows::REFERENCE)
    }
}
