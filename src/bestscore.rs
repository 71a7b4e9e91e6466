//! Best-score persistence
//!
//! A single integer in LocalStorage under a versioned key. Missing or
//! unparsable values read as 0; storage failures are ignored, never fatal.

/// Handle to the persisted best score
#[derive(Debug, Clone, Copy, Default)]
pub struct BestScore {
    pub value: u32,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_best_score_v1";

    /// Record a finished run's score. Returns true if it raised the best.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            self.save();
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(value) = serde_json::from_str::<u32>(&raw) {
                    log::info!("Loaded best score: {}", value);
                    return Self { value };
                }
                log::warn!("Best score entry unparsable, starting from 0");
            }
        }

        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(raw) = serde_json::to_string(&self.value) {
                let _ = storage.set_item(Self::STORAGE_KEY, &raw);
                log::info!("Best score saved: {}", self.value);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
