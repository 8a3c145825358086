//! Application-wide constants
//!
//! Default values and fixed limits used by the store, the render pipeline
//! and the user-facing surfaces, kept in one place.

/// Configuration defaults applied at startup
pub mod defaults {
    /// Placeholder payload used whenever the content field is blank
    pub const CONTENT: &str = "https://example.com";

    /// Rendered width/height in pixels
    pub const SIZE: u32 = 300;

    /// Outer quiet-zone margin in pixels
    pub const MARGIN: u32 = 10;

    /// Fraction of the inner area a logo may cover
    pub const LOGO_SIZE_RATIO: f32 = 0.4;

    /// Gap kept clear around the logo, in pixels
    pub const LOGO_MARGIN: u32 = 5;

    /// Flat color for dots and corners
    pub const FOREGROUND: &str = "#000000";

    /// Flat background color
    pub const BACKGROUND: &str = "#FFFFFF";

    /// End color offered when a gradient is first enabled
    pub const GRADIENT_END: &str = "#0575E6";
}

/// Render synchronizer timing
pub mod sync {
    /// Quiet interval before a pending render push executes
    pub const DEBOUNCE_MS: u64 = 150;
}

/// Input ranges enforced by the GUI and CLI (the store accepts anything)
pub mod limits {
    pub const SIZE_MIN: u32 = 100;
    pub const SIZE_MAX: u32 = 1000;
    pub const MARGIN_MAX: u32 = 50;
    pub const LOGO_SIZE_MIN: f32 = 0.1;
    pub const LOGO_SIZE_MAX: f32 = 0.5;
    pub const LOGO_MARGIN_MAX: u32 = 20;
    pub const ROTATION_MAX_DEG: f32 = 360.0;
}

/// Export naming
pub mod export {
    /// Default file stem for downloads
    pub const FILE_NAME: &str = "qr-code";
}

/// Settings file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "qr-studio";

    /// Settings file name
    pub const FILENAME: &str = "settings.json";
}
