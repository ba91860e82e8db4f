use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaCode {
    Tokyo,
    Kansai,
    Unsupported,
}

impl AreaCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tokyo => "tokyo",
            Self::Kansai => "kansai",
            Self::Unsupported => "unsupported",
        }
    }
}

/// A service area, selected by the leading digit of a postal code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Area {
    pub code: AreaCode,
    pub name: &'static str,
    /// Leading postal-code digit served by this area. `None` marks the
    /// catch-all area for every other prefix.
    pub postal_prefix: Option<char>,
}

impl Area {
    pub fn is_supported(&self) -> bool {
        self.code != AreaCode::Unsupported
    }

    /// Returns `true` if `postal_code` starts with this area's prefix.
    ///
    /// The catch-all area matches any non-empty code whose first character
    /// is not claimed by a supported area.
    pub fn matches_postal_code(
        &self,
        postal_code: &str,
    ) -> bool {
        let Some(first) = postal_code.chars().next() else {
            return false;
        };

        match self.postal_prefix {
            Some(prefix) => first == prefix,
            None => !crate::catalog::AREAS
                .iter()
                .any(|area| area.postal_prefix == Some(first)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AREAS, area};

    #[test]
    fn prefixed_areas_match_their_leading_digit() {
        assert!(area(AreaCode::Tokyo).matches_postal_code("1000001"));
        assert!(!area(AreaCode::Tokyo).matches_postal_code("5300001"));
        assert!(area(AreaCode::Kansai).matches_postal_code("5300001"));
    }

    #[test]
    fn catch_all_matches_every_unclaimed_digit() {
        let catch_all = area(AreaCode::Unsupported);

        for digit in '0'..='9' {
            let code = format!("{digit}000000");
            let claimed = AREAS
                .iter()
                .filter(|area| area.is_supported())
                .any(|area| area.matches_postal_code(&code));
            assert_eq!(catch_all.matches_postal_code(&code), !claimed, "{code}");
        }
        assert!(!catch_all.matches_postal_code(""));
    }
}
