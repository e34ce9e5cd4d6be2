// Utility functions for the storefront kit

/// Color utilities
pub mod color {
    use std::sync::OnceLock;

    use regex::Regex;

    fn hex_pattern() -> Option<&'static Regex> {
        static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
        PATTERN
            .get_or_init(|| Regex::new(r"^#?(?:([0-9a-fA-F]{6})|([0-9a-fA-F]{3}))$").ok())
            .as_ref()
    }

    /// Parse `#RRGGBB` or `#RGB` into its channels
    pub fn hex_to_rgb(color: &str) -> Option<(u8, u8, u8)> {
        let captures = hex_pattern()?.captures(color.trim())?;

        if let Some(long) = captures.get(1) {
            let value = u32::from_str_radix(long.as_str(), 16).ok()?;
            return Some(((value >> 16) as u8, (value >> 8) as u8, value as u8));
        }

        let short = captures.get(2)?.as_str();
        let mut channels = short
            .chars()
            .map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
        Some((channels.next()??, channels.next()??, channels.next()??))
    }

    /// `"r, g, b"` form used by `rgba(var(--x-rgb), a)` rules; black when unparseable
    pub fn rgb_triplet(color: &str) -> String {
        match hex_to_rgb(color) {
            Some((r, g, b)) => format!("{r}, {g}, {b}"),
            None => {
                log::warn!("Cannot derive RGB channels from color '{}'", color);
                "0, 0, 0".to_string()
            }
        }
    }

}
