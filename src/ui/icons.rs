//! Icon and separator tokens for the dzen2 status line.
//!
//! dzen2 renders `^i(path)` as an inline XBM image and `^p`/`^c` as
//! positioning and circle primitives; the separator below draws a small dot
//! padded on both sides.

pub const ICON_POWER_AC: &str = "^i(/usr/share/barline/icons/power-ac.xbm)";
pub const ICON_POWER_BAT: &str = "^i(/usr/share/barline/icons/power-bat.xbm)";
pub const ICON_TEMP: &str = "^i(/usr/share/barline/icons/temp.xbm)";
pub const ICON_LOAD: &str = "^i(/usr/share/barline/icons/load.xbm)";
pub const ICON_VOLUME_HIGH: &str = "^i(/usr/share/barline/icons/vol-hi.xbm)";
pub const ICON_VOLUME_MUTE: &str = "^i(/usr/share/barline/icons/vol-mute.xbm)";

/// Marker shown when the power source cannot be determined
pub const UNKNOWN_POWER: &str = "[?]";

/// Decorative field separator, identical between every pair of fields
pub const SEPARATOR: &str = " ^p(5)^c(5)^p(5) ";
