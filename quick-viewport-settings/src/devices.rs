//! Catalog of common device viewport sizes.
//!
//! Used by options surfaces to pre-fill the preset form; the core resize
//! path never consults this table.

use crate::types::Preset;

/// A named device viewport size, keyed by a stable slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevicePreset {
    /// Stable catalog key (e.g. `"iphone-15-pro"`).
    pub slug: &'static str,
    /// Human-readable device name.
    pub name: &'static str,
    /// Viewport width in CSS pixels.
    pub width: u32,
    /// Viewport height in CSS pixels.
    pub height: u32,
}

impl DevicePreset {
    /// Convert a catalog entry into a user preset, reusing the slug as id.
    pub fn to_preset(&self) -> Preset {
        Preset {
            id: self.slug.to_string(),
            name: self.name.to_string(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Catalog entries, grouped mobile / tablet / desktop.
pub const DEVICE_PRESETS: &[DevicePreset] = &[
    // Mobile devices
    DevicePreset { slug: "iphone-15-pro", name: "iPhone 15 Pro", width: 393, height: 852 },
    DevicePreset { slug: "iphone-15-pro-max", name: "iPhone 15 Pro Max", width: 430, height: 932 },
    DevicePreset { slug: "iphone-se", name: "iPhone SE", width: 375, height: 667 },
    DevicePreset { slug: "pixel-7", name: "Google Pixel 7", width: 412, height: 915 },
    DevicePreset { slug: "galaxy-s23", name: "Samsung Galaxy S23", width: 360, height: 780 },
    // Tablets
    DevicePreset { slug: "ipad-mini", name: "iPad Mini", width: 744, height: 1133 },
    DevicePreset { slug: "ipad-air", name: "iPad Air", width: 820, height: 1180 },
    DevicePreset { slug: "ipad-pro-11", name: "iPad Pro 11\"", width: 834, height: 1194 },
    DevicePreset { slug: "ipad-pro-13", name: "iPad Pro 13\"", width: 1024, height: 1366 },
    // Desktop
    DevicePreset { slug: "desktop-1080p", name: "Desktop 1080p", width: 1920, height: 1080 },
    DevicePreset { slug: "desktop-1440p", name: "Desktop 1440p", width: 2560, height: 1440 },
    DevicePreset { slug: "macbook-air", name: "MacBook Air", width: 1440, height: 900 },
    DevicePreset { slug: "macbook-pro-14", name: "MacBook Pro 14\"", width: 1512, height: 982 },
];

/// Look up a catalog entry by slug.
pub fn find_device(slug: &str) -> Option<&'static DevicePreset> {
    DEVICE_PRESETS.iter().find(|d| d.slug == slug)
}
