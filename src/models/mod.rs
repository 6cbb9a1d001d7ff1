use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Month names as the booking calendar renders them, in code order.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar month carried as its two-digit code ("01" through "12").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCode(u8);

impl MonthCode {
    pub fn new(month: u8) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self(month))
    }

    /// Parse a two-digit code, e.g. "10".
    pub fn from_code(code: &str) -> Option<Self> {
        code.parse::<u8>().ok().and_then(Self::new)
    }

    /// Translate a rendered month name, e.g. "October", to its code.
    pub fn from_label(label: &str) -> Option<Self> {
        MONTH_NAMES
            .iter()
            .position(|name| label.eq_ignore_ascii_case(name))
            .map(|idx| Self(idx as u8 + 1))
    }

    /// The following month, wrapping December back to January.
    pub fn next(self) -> Self {
        if self.0 == 12 {
            Self(1)
        } else {
            Self(self.0 + 1)
        }
    }

    pub fn number(self) -> u32 {
        u32::from(self.0)
    }

    pub fn is_december(self) -> bool {
        self.0 == 12
    }
}

impl std::fmt::Display for MonthCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl Serialize for MonthCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Self::from_code(&code).ok_or_else(|| D::Error::custom(format!("invalid month code `{code}`")))
    }
}

/// Number of days in the given month, leap years included.
pub fn days_in_month(year: i32, month: MonthCode) -> u32 {
    let (next_year, next_month) = if month.is_december() {
        (year + 1, 1)
    } else {
        (year, month.number() + 1)
    };
    let first = NaiveDate::from_ymd_opt(year, month.number(), 1).expect("year validated at startup");
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("year validated at startup");
    (next_first - first).num_days() as u32
}

/// One check-in/check-out day pair, the unit one scan iteration covers.
///
/// `month` is where the check-in day lives; that is the month the calendar
/// gets navigated to, even when the check-out day spills into the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    pub check_in: u32,
    pub check_out: u32,
    pub month: MonthCode,
}

impl Stay {
    /// Unique "DD-DD-MM" key for this stay. The month component follows the
    /// check-out day, so a stay crossing month end reports the next month.
    pub fn key(&self) -> String {
        let month = if self.check_out < self.check_in {
            self.month.next()
        } else {
            self.month
        };
        format!("{:02}-{:02}-{}", self.check_in, self.check_out, month)
    }
}

/// One room type's offer for a stay, as rendered on the results page.
///
/// Price and size stay as display strings; the site's formatting varies too
/// much to parse them without losing information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOffer {
    pub name: String,
    pub price: String,
    pub room_size: String,
}

/// What scanning one stay concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StayOutcome {
    /// The site reported the stay as unavailable, with its description text.
    Unavailable { description: String },
    /// Offers in page order. An empty list is a valid outcome.
    Available { offers: Vec<RoomOffer> },
}

/// Every scanned stay keyed by its date key, in key order.
pub type ResultSet = BTreeMap<String, StayOutcome>;

impl Serialize for StayOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct OfferFields<'a> {
            price: &'a str,
            room_size: &'a str,
        }

        match self {
            StayOutcome::Unavailable { description } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("unavailable", description)?;
                map.end()
            }
            StayOutcome::Available { offers } => {
                let mut map = serializer.serialize_map(Some(offers.len()))?;
                for offer in offers {
                    map.serialize_entry(
                        &offer.name,
                        &OfferFields {
                            price: &offer.price,
                            room_size: &offer.room_size,
                        },
                    )?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn month(n: u8) -> MonthCode {
        MonthCode::new(n).unwrap()
    }

    #[test]
    fn month_codes_render_zero_padded() {
        assert_eq!(month(3).to_string(), "03");
        assert_eq!(month(12).to_string(), "12");
    }

    #[test]
    fn month_code_bounds() {
        assert!(MonthCode::new(0).is_none());
        assert!(MonthCode::new(13).is_none());
        assert_eq!(MonthCode::from_code("10"), Some(month(10)));
        assert_eq!(MonthCode::from_code("00"), None);
        assert_eq!(MonthCode::from_code("oct"), None);
    }

    #[test]
    fn month_labels_resolve_case_insensitively() {
        assert_eq!(MonthCode::from_label("October"), Some(month(10)));
        assert_eq!(MonthCode::from_label("january"), Some(month(1)));
        assert_eq!(MonthCode::from_label("Octember"), None);
    }

    #[test]
    fn december_wraps_to_january() {
        assert_eq!(month(12).next(), month(1));
        assert_eq!(month(9).next(), month(10));
    }

    #[test]
    fn month_code_survives_json() {
        assert_eq!(serde_json::to_string(&month(7)).unwrap(), "\"07\"");
        let parsed: MonthCode = serde_json::from_str("\"11\"").unwrap();
        assert_eq!(parsed, month(11));
        assert!(serde_json::from_str::<MonthCode>("\"13\"").is_err());
    }

    #[test]
    fn month_lengths_follow_the_calendar() {
        assert_eq!(days_in_month(2024, month(10)), 31);
        assert_eq!(days_in_month(2024, month(11)), 30);
        assert_eq!(days_in_month(2024, month(2)), 29);
        assert_eq!(days_in_month(2023, month(2)), 28);
        assert_eq!(days_in_month(2024, month(12)), 31);
    }

    #[test]
    fn stay_keys_are_zero_padded() {
        let stay = Stay {
            check_in: 5,
            check_out: 6,
            month: month(3),
        };
        assert_eq!(stay.key(), "05-06-03");
    }

    #[test]
    fn stay_key_month_follows_the_check_out_day() {
        let wrapped = Stay {
            check_in: 31,
            check_out: 1,
            month: month(10),
        };
        assert_eq!(wrapped.key(), "31-01-11");

        let year_end = Stay {
            check_in: 31,
            check_out: 1,
            month: month(12),
        };
        assert_eq!(year_end.key(), "31-01-01");
    }

    #[test]
    fn unavailable_serializes_as_a_tagged_map() {
        let outcome = StayOutcome::Unavailable {
            description: "No rooms left for these dates".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({ "unavailable": "No rooms left for these dates" })
        );
    }

    #[test]
    fn offers_serialize_keyed_by_room_name() {
        let outcome = StayOutcome::Available {
            offers: vec![
                RoomOffer {
                    name: "Ocean Suite".to_string(),
                    price: "AED 4,200".to_string(),
                    room_size: "75 m²".to_string(),
                },
                RoomOffer {
                    name: "Resort Deluxe Room".to_string(),
                    price: "AED 2,900".to_string(),
                    room_size: "50 m²".to_string(),
                },
            ],
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "Ocean Suite": { "price": "AED 4,200", "room_size": "75 m²" },
                "Resort Deluxe Room": { "price": "AED 2,900", "room_size": "50 m²" },
            })
        );
    }

    #[test]
    fn no_offers_serializes_as_an_empty_map() {
        let outcome = StayOutcome::Available { offers: Vec::new() };
        assert_eq!(serde_json::to_value(&outcome).unwrap(), json!({}));
    }
}
