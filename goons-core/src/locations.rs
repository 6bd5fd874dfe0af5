//! Location identifiers and their player-facing names.

/// Internal map id to display name.
const DISPLAY_NAMES: [(&str, &str); 11] = [
    ("bigmap", "Customs"),
    ("woods", "Woods"),
    ("shoreline", "Shoreline"),
    ("lighthouse", "Lighthouse"),
    ("tarkovstreets", "Streets of Tarkov"),
    ("interchange", "Interchange"),
    ("sandbox_high", "Ground Zero"),
    ("factory4_day", "Factory Day"),
    ("factory4_night", "Factory Night"),
    ("laboratory", "The Lab"),
    ("rezervbase", "Reserve"),
];

/// Display name for a location id, case-insensitively. Unknown ids yield `None`.
#[must_use]
pub fn display_name(location_id: &str) -> Option<&'static str> {
    let lowered = location_id.to_ascii_lowercase();
    DISPLAY_NAMES
        .iter()
        .find(|(id, _)| *id == lowered)
        .map(|(_, name)| *name)
}

/// Every location id with a known display name.
pub fn known_locations() -> impl Iterator<Item = &'static str> {
    DISPLAY_NAMES.iter().map(|(id, _)| *id)
}
