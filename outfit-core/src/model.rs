use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Raw weather observation, already resolved to four numeric readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub uv_index: f64,
    pub wind_kph: f64,
}

impl WeatherReading {
    pub fn new(temperature_c: f64, humidity_percent: f64, uv_index: f64, wind_kph: f64) -> Self {
        Self { temperature_c, humidity_percent, uv_index, wind_kph }
    }

    /// Check the domain constraints. Runs before any computation.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        let fields = [
            ("temperature", self.temperature_c),
            ("humidity", self.humidity_percent),
            ("uv_index", self.uv_index),
            ("wind_speed", self.wind_kph),
        ];
        if let Some((field, value)) = fields.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(InvalidInput::NotFinite { field, value });
        }

        if !(0.0..=100.0).contains(&self.humidity_percent) {
            return Err(InvalidInput::HumidityOutOfRange(self.humidity_percent));
        }
        if self.uv_index < 0.0 {
            return Err(InvalidInput::NegativeUvIndex(self.uv_index));
        }
        if self.wind_kph < 0.0 {
            return Err(InvalidInput::NegativeWindSpeed(self.wind_kph));
        }

        Ok(())
    }
}

/// Clothing category, ordered hottest to coldest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Very Hot")]
    VeryHot,
    Hot,
    Warm,
    Mild,
    Cool,
    Cold,
    #[serde(rename = "Very Cold")]
    VeryCold,
    Freezing,
}

impl Category {
    pub const fn all() -> &'static [Category] {
        &[
            Category::VeryHot,
            Category::Hot,
            Category::Warm,
            Category::Mild,
            Category::Cool,
            Category::Cold,
            Category::VeryCold,
            Category::Freezing,
        ]
    }

    /// Severity score: odd values 1..=15, lower is hotter.
    pub fn score(&self) -> u8 {
        match self {
            Category::VeryHot => 1,
            Category::Hot => 3,
            Category::Warm => 5,
            Category::Mild => 7,
            Category::Cool => 9,
            Category::Cold => 11,
            Category::VeryCold => 13,
            Category::Freezing => 15,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::VeryHot => "Very Hot",
            Category::Hot => "Hot",
            Category::Warm => "Warm",
            Category::Mild => "Mild",
            Category::Cool => "Cool",
            Category::Cold => "Cold",
            Category::VeryCold => "Very Cold",
            Category::Freezing => "Freezing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a single evaluation. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingRecommendation {
    pub score: u8,
    pub category: Category,
    /// Rounded to one decimal for presentation.
    pub effective_temp_c: f64,
    pub variant_a_items: Vec<String>,
    pub variant_b_items: Vec<String>,
    pub accessories: BTreeSet<String>,
}

impl ClothingRecommendation {
    /// Every distinct item named by the recommendation, in sorted order.
    pub fn all_items(&self) -> BTreeSet<&str> {
        self.variant_a_items
            .iter()
            .chain(&self.variant_b_items)
            .chain(&self.accessories)
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_are_odd_and_increase_towards_cold() {
        let scores: Vec<u8> = Category::all().iter().map(Category::score).collect();
        assert_eq!(scores, vec![1, 3, 5, 7, 9, 11, 13, 15]);
    }

    #[test]
    fn category_serializes_by_label() {
        for category in Category::all() {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
    }

    #[test]
    fn humidity_must_be_a_percentage() {
        assert_eq!(
            WeatherReading::new(20.0, 150.0, 1.0, 1.0).validate(),
            Err(InvalidInput::HumidityOutOfRange(150.0))
        );
        assert!(WeatherReading::new(20.0, -0.5, 1.0, 1.0).validate().is_err());
        assert!(WeatherReading::new(20.0, 0.0, 0.0, 0.0).validate().is_ok());
        assert!(WeatherReading::new(20.0, 100.0, 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn negative_uv_and_wind_are_rejected() {
        assert_eq!(
            WeatherReading::new(20.0, 50.0, -1.0, 1.0).validate(),
            Err(InvalidInput::NegativeUvIndex(-1.0))
        );
        assert_eq!(
            WeatherReading::new(20.0, 50.0, 1.0, -3.0).validate(),
            Err(InvalidInput::NegativeWindSpeed(-3.0))
        );
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let err = WeatherReading::new(f64::NAN, 50.0, 1.0, 1.0).validate().unwrap_err();
        assert!(matches!(err, InvalidInput::NotFinite { field: "temperature", .. }));

        let err = WeatherReading::new(10.0, 50.0, f64::INFINITY, 1.0).validate().unwrap_err();
        assert!(matches!(err, InvalidInput::NotFinite { field: "uv_index", .. }));
    }

    #[test]
    fn all_items_merges_and_dedups() {
        let rec = ClothingRecommendation {
            score: 13,
            category: Category::VeryCold,
            effective_temp_c: 1.0,
            variant_a_items: vec!["Boots".into(), "Coat".into()],
            variant_b_items: vec!["Boots".into(), "Skirt".into()],
            accessories: ["Scarf".to_string()].into_iter().collect(),
        };

        let items: Vec<&str> = rec.all_items().into_iter().collect();
        assert_eq!(items, vec!["Boots", "Coat", "Scarf", "Skirt"]);
    }
}
