//! Wards and vertical levels
//!
//! A district's ward is decided by the first letter of its identifier.
//! Identifiers without a ward prefix belong to the cliffside.

use std::fmt;

/// Top-level geographic grouping of districts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ward {
    Central,
    Menthis,
    Tavicks,
    Northedge,
    Dura,
    Cliffside,
}

/// Prefix table, tested in order; first match wins
const WARD_PREFIXES: [(char, Ward); 5] = [
    ('C', Ward::Central),
    ('M', Ward::Menthis),
    ('T', Ward::Tavicks),
    ('N', Ward::Northedge),
    ('D', Ward::Dura),
];

impl Ward {
    /// Determine the owning ward of a district identifier
    pub fn for_district(district_id: &str) -> Self {
        WARD_PREFIXES
            .iter()
            .find(|(prefix, _)| district_id.starts_with(*prefix))
            .map_or(Self::Cliffside, |(_, ward)| *ward)
    }

    /// Key of this ward's record in the dataset
    pub fn key(self) -> &'static str {
        match self {
            Self::Central => "central",
            Self::Menthis => "menthis",
            Self::Tavicks => "tavicks",
            Self::Northedge => "northedge",
            Self::Dura => "dura",
            Self::Cliffside => "cliffside",
        }
    }

    /// Display name, used when the dataset has no record for the ward
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Central => "Central Plateau",
            Self::Menthis => "Menthis Plateau",
            Self::Tavicks => "Tavick's Landing",
            Self::Northedge => "Northedge",
            Self::Dura => "Dura",
            Self::Cliffside => "Cliffside",
        }
    }

    /// Identifier prefix, `None` for the cliffside
    pub fn prefix(self) -> Option<char> {
        WARD_PREFIXES
            .iter()
            .find(|(_, ward)| *ward == self)
            .map(|(prefix, _)| *prefix)
    }

    /// Whether districts of this ward have upper, middle and lower levels
    pub fn is_tiered(self) -> bool {
        self != Self::Cliffside
    }

    /// Whether a dataset key names a ward rather than a district
    pub fn is_ward_key(key: &str) -> bool {
        Self::all().iter().any(|ward| ward.key() == key)
    }

    /// All wards in display order
    pub fn all() -> &'static [Ward] {
        &[
            Self::Central,
            Self::Menthis,
            Self::Tavicks,
            Self::Northedge,
            Self::Dura,
            Self::Cliffside,
        ]
    }
}

impl fmt::Display for Ward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Arrow shown beside a level heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
}

impl Direction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
        }
    }

    /// Bootstrap icon classes for the heading indicator
    pub fn icon_class(self) -> String {
        format!("heightIcon bi bi-arrow-{}-square-fill", self.name())
    }
}

/// One vertical layer of a tiered district
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Upper,
    Middle,
    Lower,
}

impl Level {
    /// Levels in the order they are displayed
    pub const ALL: [Level; 3] = [Level::Upper, Level::Middle, Level::Lower];

    /// JSON key of this level inside a tiered record
    pub fn key(self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Middle => "middle",
            Self::Lower => "lower",
        }
    }

    /// Heading prefix, e.g. "Upper"
    pub fn label(self) -> &'static str {
        match self {
            Self::Upper => "Upper",
            Self::Middle => "Middle",
            Self::Lower => "Lower",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Self::Upper => Direction::Up,
            Self::Middle => Direction::Right,
            Self::Lower => Direction::Down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_lookup() {
        assert_eq!(Ward::for_district("C12"), Ward::Central);
        assert_eq!(Ward::for_district("M1"), Ward::Menthis);
        assert_eq!(Ward::for_district("T6"), Ward::Tavicks);
        assert_eq!(Ward::for_district("N3"), Ward::Northedge);
        assert_eq!(Ward::for_district("D8"), Ward::Dura);
    }

    #[test]
    fn test_unprefixed_is_cliffside() {
        assert_eq!(Ward::for_district("X9"), Ward::Cliffside);
        assert_eq!(Ward::for_district("grayflood"), Ward::Cliffside);
        assert_eq!(Ward::for_district(""), Ward::Cliffside);
        // Prefixes are case-sensitive
        assert_eq!(Ward::for_district("c1"), Ward::Cliffside);
    }

    #[test]
    fn test_ward_keys_round_trip() {
        for ward in Ward::all() {
            assert!(Ward::is_ward_key(ward.key()));
            if let Some(prefix) = ward.prefix() {
                assert_eq!(Ward::for_district(&format!("{prefix}1")), *ward);
            }
        }
        assert!(!Ward::is_ward_key("C1"));
    }

    #[test]
    fn test_level_directions() {
        let directions: Vec<_> = Level::ALL.iter().map(|l| l.direction()).collect();
        assert_eq!(directions, vec![Direction::Up, Direction::Right, Direction::Down]);
        assert_eq!(
            Direction::Right.icon_class(),
            "heightIcon bi bi-arrow-right-square-fill"
        );
    }
}
