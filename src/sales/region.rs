use std::fmt::{self, Display};

const UNKNOWN_REGION_NAME: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    West,
    Mountain,
    Central,
    East,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::West, Region::Mountain, Region::Central, Region::East];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "w" => Some(Region::West),
            "m" => Some(Region::Mountain),
            "c" => Some(Region::Central),
            "e" => Some(Region::East),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Region::West => "w",
            Region::Mountain => "m",
            Region::Central => "c",
            Region::East => "e",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Region::West => "West",
            Region::Mountain => "Mountain",
            Region::Central => "Central",
            Region::East => "East",
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn name_of(code: &str) -> &'static str {
    Region::from_code(code)
        .map(|region| region.name())
        .unwrap_or(UNKNOWN_REGION_NAME)
}

pub fn is_valid(code: &str) -> bool {
    Region::from_code(code).is_some()
}

/// Renders the valid codes the way they're shown to the operator, e.g. `('w', 'm', 'c', 'e')`
pub fn valid_codes_display() -> String {
    let codes = Region::ALL
        .iter()
        .map(|region| format!("'{}'", region.code()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("({codes})")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("w", "West")]
    #[case("m", "Mountain")]
    #[case("c", "Central")]
    #[case("e", "East")]
    fn known_codes(#[case] code: &str, #[case] name: &str) {
        assert!(is_valid(code));
        assert_eq!(name, name_of(code));
        assert_eq!(code, Region::from_code(code).unwrap().code());
    }

    #[rstest]
    #[case("")]
    #[case("x")]
    #[case("W")]
    #[case("west")]
    #[case(" w")]
    fn unknown_codes(#[case] code: &str) {
        assert!(!is_valid(code));
        assert_eq!("Unknown", name_of(code));
    }

    #[test]
    fn codes_display() {
        assert_eq!("('w', 'm', 'c', 'e')", valid_codes_display());
    }
}
