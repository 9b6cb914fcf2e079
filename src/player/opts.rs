use std::{path::Path, time::Duration};

use anyhow::Context;

use crate::{
    foundation::{
        core::ScreenMetrics,
        error::{PanecastError, PanecastResult},
    },
    surface::pool::DEFAULT_POOL_CAPACITY,
};

/// Environment variable overriding [`PlayerOpts::pool_capacity`].
pub const ENV_POOL_CAPACITY: &str = "PANECAST_POOL_CAPACITY";
/// Environment variable overriding [`PlayerOpts::idle_sleep_ms`].
pub const ENV_IDLE_SLEEP_MS: &str = "PANECAST_IDLE_SLEEP_MS";

/// Playback configuration.
///
/// Loaded from JSON (every field optional), then environment overrides, then CLI flags.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayerOpts {
    /// Physical surfaces allocated for the whole run.
    pub pool_capacity: usize,
    /// Sleep when no new frame is due yet, in milliseconds.
    pub idle_sleep_ms: u64,
    /// Display the playback surface is fitted to.
    pub screen: ScreenMetrics,
    /// Refresh rate used to pace the refresh wait; `None` disables pacing.
    pub refresh_hz: Option<u32>,
    /// Whether to load and start the background track.
    pub audio: bool,
}

impl Default for PlayerOpts {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
            idle_sleep_ms: 1,
            screen: ScreenMetrics::default(),
            refresh_hz: Some(60),
            audio: true,
        }
    }
}

impl PlayerOpts {
    pub fn from_path(path: &Path) -> PanecastResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read player options '{}'", path.display()))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> PanecastResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| PanecastError::validation(format!("invalid player options: {e}")))
    }

    /// Apply `PANECAST_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Unparseable or zero values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(n) = lookup(ENV_POOL_CAPACITY)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            self.pool_capacity = n;
        }
        if let Some(ms) = lookup(ENV_IDLE_SLEEP_MS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&n| n > 0)
        {
            self.idle_sleep_ms = ms;
        }
        self
    }

    pub fn idle_sleep(&self) -> Duration {
        Duration::from_millis(self.idle_sleep_ms)
    }

    pub fn validate(&self) -> PanecastResult<()> {
        if self.pool_capacity == 0 {
            return Err(PanecastError::validation("pool_capacity must be > 0"));
        }
        if self.idle_sleep_ms == 0 {
            return Err(PanecastError::validation(
                "idle_sleep_ms must be > 0 so idle ticks do not spin",
            ));
        }
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(PanecastError::validation("screen size must be non-zero"));
        }
        if self.refresh_hz == Some(0) {
            return Err(PanecastError::validation("refresh_hz must be > 0 when set"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/opts.rs"]
mod tests;
