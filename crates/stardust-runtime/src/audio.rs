//! Audio spectrum input
//!
//! Device capture lives outside this crate. A `SpectrumSource` hands the
//! simulation a slice of normalized magnitudes per frame, or `None` when no
//! audio is available, which is a steady state and not an error.

/// Bin count of an analyser with a 256-sample FFT
pub const DEFAULT_BIN_COUNT: usize = 128;

/// Decibel floor mapped to magnitude 0
const DB_FLOOR: f32 = -100.0;

/// Anything that can produce a normalized frequency-magnitude array per frame
pub trait SpectrumSource {
    /// Whether the underlying device was acquired
    fn is_available(&self) -> bool;

    /// Latest magnitudes, refreshed at render cadence
    fn poll(&mut self) -> Option<&[f32]>;
}

/// A source that never produces audio
#[derive(Default)]
pub struct NoAudio;

impl SpectrumSource for NoAudio {
    fn is_available(&self) -> bool {
        false
    }

    fn poll(&mut self) -> Option<&[f32]> {
        None
    }
}

/// `max(0, (db + 100) / 100) * sensitivity`
pub fn normalize_decibels(db: f32, sensitivity: f32) -> f32 {
    if !db.is_finite() {
        return 0.0;
    }
    ((db - DB_FLOOR) / -DB_FLOOR).max(0.0) * sensitivity
}

/// Holds the normalized bins produced from decibel frames
pub struct SpectrumAnalyzer {
    bins: Vec<f32>,
    sensitivity: f32,
    has_data: bool,
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_BIN_COUNT, 1.0)
    }
}

impl SpectrumAnalyzer {
    pub fn new(bin_count: usize, sensitivity: f32) -> Self {
        Self {
            bins: vec![0.0; bin_count],
            sensitivity,
            has_data: false,
        }
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    /// Replace the bins from one analyser frame of decibel values.
    /// Extra input values are ignored; missing ones leave their bin at 0.
    pub fn ingest_decibels(&mut self, decibels: &[f32]) {
        for (i, bin) in self.bins.iter_mut().enumerate() {
            *bin = decibels
                .get(i)
                .map(|db| normalize_decibels(*db, self.sensitivity))
                .unwrap_or(0.0);
        }
        self.has_data = true;
    }

    /// Replace the bins with already-normalized magnitudes
    pub fn ingest_magnitudes(&mut self, magnitudes: &[f32]) {
        for (i, bin) in self.bins.iter_mut().enumerate() {
            let v = magnitudes.get(i).copied().unwrap_or(0.0);
            *bin = if v.is_finite() { v.max(0.0) } else { 0.0 };
        }
        self.has_data = true;
    }

    pub fn bins(&self) -> &[f32] {
        &self.bins
    }

    /// Bins if any frame was ingested, `None` otherwise
    pub fn spectrum(&self) -> Option<&[f32]> {
        self.has_data.then_some(self.bins.as_slice())
    }

    pub fn reset(&mut self) {
        self.bins.iter_mut().for_each(|b| *b = 0.0);
        self.has_data = false;
    }
}
