mod weekday;

use std::collections::HashMap;

use serde::{Deserialize, Serialize, Serializer};
use strum::VariantArray;

pub use weekday::Weekday;

/// Hardcoded fallback assignment, in canonical order.
const DEFAULT_COLORS: [(&str, &str); 7] = [
    ("#ffffff", "Blanco"),
    ("#ec4899", "Rosa"),
    ("#8b5cf6", "Morado"),
    ("#6b7280", "Gris"),
    ("#dc2626", "Rojo Oscuro"),
    ("#ec4899", "Rosa"),
    ("#8b5cf6", "Morado"),
];

/// Color assigned to a single weekday.
///
/// `color` and `color_name` are only ever written together, and the display
/// name is always derived from `day`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DaySchedule {
    day: Weekday,
    color: String,
    color_name: String,
}

impl DaySchedule {
    pub fn new(day: Weekday, color: impl Into<String>, color_name: impl Into<String>) -> Self {
        Self {
            day,
            color: color.into(),
            color_name: color_name.into(),
        }
    }

    pub fn default_for(day: Weekday) -> Self {
        let (color, color_name) = DEFAULT_COLORS[day.index()];
        Self::new(day, color, color_name)
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn display_name(&self) -> &'static str {
        self.day.display_name()
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn color_name(&self) -> &str {
        &self.color_name
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayScheduleWire<'a> {
    day: Weekday,
    day_name: &'static str,
    color: &'a str,
    color_name: &'a str,
}

impl Serialize for DaySchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DayScheduleWire {
            day: self.day,
            day_name: self.display_name(),
            color: &self.color,
            color_name: &self.color_name,
        }
        .serialize(serializer)
    }
}

/// Day entry as received from the backend or read back from the cache.
///
/// Every field may be absent; [`normalize`] decides what to keep.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawDaySchedule {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub day_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub color_name: Option<String>,
}

impl RawDaySchedule {
    pub fn new(
        day: impl Into<String>,
        color: impl Into<String>,
        color_name: impl Into<String>,
    ) -> Self {
        Self {
            day: Some(day.into()),
            day_name: None,
            color: Some(color.into()),
            color_name: Some(color_name.into()),
        }
    }
}

impl From<&DaySchedule> for RawDaySchedule {
    fn from(value: &DaySchedule) -> Self {
        Self {
            day: Some(value.day.to_string()),
            day_name: Some(value.display_name().to_owned()),
            color: Some(value.color.to_owned()),
            color_name: Some(value.color_name.to_owned()),
        }
    }
}

/// Seven day entries, one per weekday, in canonical order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekSchedule([DaySchedule; 7]);

impl Default for WeekSchedule {
    fn default() -> Self {
        Self(std::array::from_fn(|i| {
            DaySchedule::default_for(Weekday::VARIANTS[i])
        }))
    }
}

impl WeekSchedule {
    pub fn get(&self, day: Weekday) -> &DaySchedule {
        &self.0[day.index()]
    }

    pub fn set_color(
        &mut self,
        day: Weekday,
        color: impl Into<String>,
        color_name: impl Into<String>,
    ) {
        let entry = &mut self.0[day.index()];
        entry.color = color.into();
        entry.color_name = color_name.into();
    }

    pub fn iter(&self) -> impl Iterator<Item = &DaySchedule> {
        self.0.iter()
    }

    pub fn to_raw(&self) -> Vec<RawDaySchedule> {
        self.0.iter().map(RawDaySchedule::from).collect()
    }
}

impl Serialize for WeekSchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'a> IntoIterator for &'a WeekSchedule {
    type Item = &'a DaySchedule;
    type IntoIter = std::slice::Iter<'a, DaySchedule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Rebuild a full week out of whatever entries were received.
///
/// Entries with a missing or unknown `day` are dropped, the last entry for a
/// day wins, and any day left without a usable `color`/`colorName` pair gets
/// its default pair.
pub fn normalize(raw: impl IntoIterator<Item = RawDaySchedule>) -> WeekSchedule {
    let mut lookup = HashMap::new();
    for entry in raw {
        let Some(day) = entry.day.as_deref().and_then(|d| d.parse::<Weekday>().ok()) else {
            continue;
        };
        lookup.insert(day, entry);
    }

    WeekSchedule(std::array::from_fn(|i| {
        let day = Weekday::VARIANTS[i];
        let pair = lookup.remove(&day).and_then(|entry| {
            let color = entry.color.filter(|c| !c.is_empty())?;
            let color_name = entry.color_name.filter(|c| !c.is_empty())?;
            Some((color, color_name))
        });

        match pair {
            Some((color, color_name)) => DaySchedule::new(day, color, color_name),
            None => DaySchedule::default_for(day),
        }
    }))
}
