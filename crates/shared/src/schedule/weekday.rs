use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::OffsetDateTime;

/// Calendar weekday keyed the way the backend stores it (`"monday"`, ...).
///
/// Declaration order is the canonical order used everywhere a week is
/// emitted: Monday first, Sunday last.
#[derive(
    Serialize,
    Deserialize,
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Position in canonical order, `0` for Monday.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Lunes",
            Weekday::Tuesday => "Martes",
            Weekday::Wednesday => "Miércoles",
            Weekday::Thursday => "Jueves",
            Weekday::Friday => "Viernes",
            Weekday::Saturday => "Sábado",
            Weekday::Sunday => "Domingo",
        }
    }

    /// Weekday of the local date, or of the UTC date when the local offset
    /// cannot be determined.
    pub fn today() -> Self {
        OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .weekday()
            .into()
    }
}

impl From<time::Weekday> for Weekday {
    fn from(value: time::Weekday) -> Self {
        match value {
            time::Weekday::Monday => Weekday::Monday,
            time::Weekday::Tuesday => Weekday::Tuesday,
            time::Weekday::Wednesday => Weekday::Wednesday,
            time::Weekday::Thursday => Weekday::Thursday,
            time::Weekday::Friday => Weekday::Friday,
            time::Weekday::Saturday => Weekday::Saturday,
            time::Weekday::Sunday => Weekday::Sunday,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_canonical_order() {
        let keys = Weekday::VARIANTS
            .iter()
            .map(|day| day.to_string())
            .collect::<Vec<_>>();

        assert_eq!(
            keys,
            vec![
                "monday",
                "tuesday",
                "wednesday",
                "thursday",
                "friday",
                "saturday",
                "sunday"
            ]
        );

        for (i, day) in Weekday::VARIANTS.iter().enumerate() {
            assert_eq!(day.index(), i);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(Weekday::from_str("tuesday").ok(), Some(Weekday::Tuesday));
        assert_eq!(Weekday::from_str("Sunday").ok(), Some(Weekday::Sunday));
        assert!(Weekday::from_str("funday").is_err());
        assert!(Weekday::from_str("").is_err());
    }

    #[test]
    fn test_from_time_weekday() {
        assert_eq!(Weekday::from(time::Weekday::Monday), Weekday::Monday);
        assert_eq!(Weekday::from(time::Weekday::Sunday), Weekday::Sunday);
        assert_eq!(Weekday::Wednesday.display_name(), "Miércoles");
    }
}
