//! Premium presentation format priorities.
//!
//! Listings carry the format as a free-form label (`"IMAX"`, `"DOLBY_CINEMA"`,
//! ...) or nothing for a standard screening. The table here is consulted when
//! ordering a single movie's showtimes under `preferPremium` and when scoring
//! whole candidate itineraries against each other.

/// Known premium formats, ordered from most to least preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PremiumFormat {
    Imax,
    DolbyCinema,
    DolbyAtmos,
    Tcx,
    Goon,
    FourDx,
}

impl PremiumFormat {
    /// Every known format, highest priority first.
    pub const ALL: [PremiumFormat; 6] = [
        PremiumFormat::Imax,
        PremiumFormat::DolbyCinema,
        PremiumFormat::DolbyAtmos,
        PremiumFormat::Tcx,
        PremiumFormat::Goon,
        PremiumFormat::FourDx,
    ];

    /// The label used for this format in listing data.
    pub fn label(self) -> &'static str {
        match self {
            PremiumFormat::Imax => "IMAX",
            PremiumFormat::DolbyCinema => "DOLBY_CINEMA",
            PremiumFormat::DolbyAtmos => "DOLBY_ATMOS",
            PremiumFormat::Tcx => "TCX",
            PremiumFormat::Goon => "GOOON",
            PremiumFormat::FourDx => "4DX",
        }
    }

    /// Look up a listing label. Matching is exact.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }

    pub fn priority(self) -> u32 {
        match self {
            PremiumFormat::Imax => 100,
            PremiumFormat::DolbyCinema => 90,
            PremiumFormat::DolbyAtmos => 80,
            PremiumFormat::Tcx => 70,
            PremiumFormat::Goon => 60,
            PremiumFormat::FourDx => 50,
        }
    }
}

/// Priority for any unrecognized, non-null format label.
pub const OTHER_FORMAT_PRIORITY: u32 = 10;

/// Priority of a listing's format label; higher is more preferred.
///
/// `None` (a standard screening) scores 0 and an unrecognized label scores
/// [`OTHER_FORMAT_PRIORITY`].
///
/// ```
/// use showtime_engine::format_priority;
///
/// assert_eq!(format_priority(Some("IMAX")), 100);
/// assert_eq!(format_priority(Some("SCREENX")), 10);
/// assert_eq!(format_priority(None), 0);
/// ```
pub fn format_priority(format: Option<&str>) -> u32 {
    match format {
        None => 0,
        Some(label) => PremiumFormat::from_label(label)
            .map(PremiumFormat::priority)
            .unwrap_or(OTHER_FORMAT_PRIORITY),
    }
}
