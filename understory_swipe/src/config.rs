// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognizer options.

use core::fmt;

/// Default distance, in pixels, one axis must travel before the gesture locks.
pub const DEFAULT_SLIDE_THRESHOLD: f64 = 5.0;

/// Options recognized by [`Swipe`](crate::Swipe).
///
/// ```
/// use understory_swipe::SwipeConfig;
///
/// let config = SwipeConfig::default()
///     .with_no_slide_click(true)
///     .with_slide_threshold(12.0)
///     .unwrap();
/// assert_eq!(config.slide_threshold(), 12.0);
/// assert!(SwipeConfig::default().with_slide_threshold(-1.0).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwipeConfig {
    /// Bind hover to pointer events instead of mouse events.
    pub use_pointer_hover: bool,
    /// Bind start/move/end listeners in the capture phase.
    pub use_capture: bool,
    slide_threshold: f64,
    /// Swallow the click that follows a slide instead of forwarding it.
    pub no_slide_click: bool,
    /// Stop propagation of every handled input event before dispatch.
    pub stop_propagation: bool,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            use_pointer_hover: false,
            use_capture: false,
            slide_threshold: DEFAULT_SLIDE_THRESHOLD,
            no_slide_click: false,
            stop_propagation: false,
        }
    }
}

impl SwipeConfig {
    /// Set `use_pointer_hover`.
    #[must_use]
    pub const fn with_pointer_hover(mut self, enabled: bool) -> Self {
        self.use_pointer_hover = enabled;
        self
    }

    /// Set `use_capture`.
    #[must_use]
    pub const fn with_capture(mut self, enabled: bool) -> Self {
        self.use_capture = enabled;
        self
    }

    /// Set `no_slide_click`.
    #[must_use]
    pub const fn with_no_slide_click(mut self, enabled: bool) -> Self {
        self.no_slide_click = enabled;
        self
    }

    /// Set `stop_propagation`.
    #[must_use]
    pub const fn with_stop_propagation(mut self, enabled: bool) -> Self {
        self.stop_propagation = enabled;
        self
    }

    /// Distance one axis must travel before the gesture locks to it.
    pub const fn slide_threshold(&self) -> f64 {
        self.slide_threshold
    }

    /// Set the slide threshold, rejecting negative and non-finite values.
    pub fn with_slide_threshold(mut self, threshold: f64) -> Result<Self, ConfigError> {
        check_threshold(threshold)?;
        self.slide_threshold = threshold;
        Ok(self)
    }

    /// Check the options for values the recognizer cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold(self.slide_threshold)
    }
}

fn check_threshold(threshold: f64) -> Result<(), ConfigError> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold(threshold))
    }
}

/// Error returned for unusable options.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The slide threshold is negative or not finite.
    InvalidThreshold(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidThreshold(t) => write!(
                f,
                "slide threshold must be finite and non-negative, got {t}"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}
