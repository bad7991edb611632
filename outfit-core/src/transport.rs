//! JSON shapes exchanged with callers, and the boundary checks on them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    classifier::classify,
    error::{InvalidInput, RequestError},
    model::{Category, ClothingRecommendation, WeatherReading},
};

pub const MISSING_FIELDS_MESSAGE: &str = "Missing weather data fields";
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input for recommendations";
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON data";
pub const MISSING_TRANSLATE_FIELDS_MESSAGE: &str = "Missing text or target_lang";

/// Incoming recommendation request. Values stay loosely typed until
/// [`RecommendationRequest::to_reading`] so missing and malformed fields
/// can be told apart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub temperature: Option<Value>,
    #[serde(default)]
    pub humidity: Option<Value>,
    #[serde(default)]
    pub uv_index: Option<Value>,
    #[serde(default)]
    pub wind_speed: Option<Value>,
}

impl RecommendationRequest {
    pub fn from_values(temperature: f64, humidity: f64, uv_index: f64, wind_speed: f64) -> Self {
        Self {
            temperature: Some(Value::from(temperature)),
            humidity: Some(Value::from(humidity)),
            uv_index: Some(Value::from(uv_index)),
            wind_speed: Some(Value::from(wind_speed)),
        }
    }

    /// Every field must be present before any is coerced.
    pub fn to_reading(&self) -> Result<WeatherReading, RequestError> {
        let fields = [
            ("temperature", &self.temperature),
            ("humidity", &self.humidity),
            ("uv_index", &self.uv_index),
            ("wind_speed", &self.wind_speed),
        ];

        let mut present = Vec::with_capacity(fields.len());
        for (name, value) in fields {
            match value {
                None | Some(Value::Null) => return Err(RequestError::MissingField(name)),
                Some(v) => present.push((name, v)),
            }
        }

        let mut numbers = [0.0; 4];
        for (slot, (name, value)) in numbers.iter_mut().zip(present) {
            *slot = coerce_number(name, value)?;
        }
        let [temperature, humidity, uv_index, wind_speed] = numbers;

        Ok(WeatherReading::new(temperature, humidity, uv_index, wind_speed))
    }

    /// Boundary checks, then classification.
    pub fn evaluate(&self) -> Result<ClothingRecommendation, RequestError> {
        let reading = self.to_reading()?;
        Ok(classify(&reading)?)
    }
}

/// JSON numbers pass through; strings are parsed the way a float literal is.
fn coerce_number(field: &'static str, value: &Value) -> Result<f64, InvalidInput> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| InvalidInput::NotNumeric { field, raw: value.to_string() })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationLists {
    pub male: Vec<String>,
    pub female: Vec<String>,
    pub accessories: Vec<String>,
}

/// Wire shape of a recommendation, optionally enriched with image URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub clothing_score: u8,
    pub category: Category,
    pub effective_temp_c: f64,
    pub recommendations: RecommendationLists,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<BTreeMap<String, Vec<String>>>,
}

impl From<ClothingRecommendation> for RecommendationResponse {
    fn from(rec: ClothingRecommendation) -> Self {
        Self {
            clothing_score: rec.score,
            category: rec.category,
            effective_temp_c: rec.effective_temp_c,
            recommendations: RecommendationLists {
                male: rec.variant_a_items,
                female: rec.variant_b_items,
                accessories: rec.accessories.into_iter().collect(),
            },
            images: None,
        }
    }
}

impl RecommendationResponse {
    pub fn with_images(mut self, images: BTreeMap<String, Vec<String>>) -> Self {
        self.images = Some(images);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub target_lang: Option<String>,
}

impl TranslateRequest {
    /// Both fields, if present and non-empty.
    pub fn fields(&self) -> Option<(&str, &str)> {
        let text = self.text.as_deref().filter(|s| !s.is_empty())?;
        let lang = self.target_lang.as_deref().filter(|s| !s.is_empty())?;
        Some((text, lang))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }

    /// Client-facing message for a recommendation request failure.
    pub fn for_request(err: &RequestError) -> Self {
        match err {
            RequestError::MissingField(_) => Self::new(MISSING_FIELDS_MESSAGE),
            RequestError::Invalid(_) => Self::new(INVALID_INPUT_MESSAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> RecommendationRequest {
        serde_json::from_value(value).expect("request should deserialize")
    }

    #[test]
    fn missing_key_is_reported_before_range_checks() {
        let req = request(json!({ "temperature": 20, "humidity": 150, "uv_index": 1 }));
        assert_eq!(req.to_reading(), Err(RequestError::MissingField("wind_speed")));
    }

    #[test]
    fn null_counts_as_missing() {
        let req = request(json!({ "temperature": null, "humidity": 50, "uv_index": 1, "wind_speed": 3 }));
        assert_eq!(req.evaluate(), Err(RequestError::MissingField("temperature")));
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let req = request(json!({ "temperature": "32", "humidity": " 70 ", "uv_index": 8, "wind_speed": 10.0 }));
        let reading = req.to_reading().unwrap();
        assert_eq!(reading, WeatherReading::new(32.0, 70.0, 8.0, 10.0));
    }

    #[test]
    fn non_numeric_values_are_invalid_input() {
        let req = request(json!({ "temperature": "warm", "humidity": 50, "uv_index": 1, "wind_speed": 3 }));
        let err = req.evaluate().unwrap_err();
        assert!(matches!(err, RequestError::Invalid(InvalidInput::NotNumeric { field: "temperature", .. })));

        let req = request(json!({ "temperature": 20, "humidity": [50], "uv_index": 1, "wind_speed": 3 }));
        assert!(matches!(req.evaluate(), Err(RequestError::Invalid(_))));
    }

    #[test]
    fn out_of_range_humidity_is_invalid_input() {
        let req = RecommendationRequest::from_values(20.0, 150.0, 1.0, 1.0);
        assert_eq!(
            req.evaluate(),
            Err(RequestError::Invalid(InvalidInput::HumidityOutOfRange(150.0)))
        );
        assert_eq!(
            ErrorBody::for_request(&req.evaluate().unwrap_err()).error,
            INVALID_INPUT_MESSAGE
        );
    }

    #[test]
    fn response_uses_the_wire_field_names() {
        let rec = RecommendationRequest::from_values(32.0, 70.0, 8.0, 10.0).evaluate().unwrap();
        let body = serde_json::to_value(RecommendationResponse::from(rec)).unwrap();

        assert_eq!(body["clothing_score"], 1);
        assert_eq!(body["category"], "Very Hot");
        assert_eq!(body["effective_temp_c"], 32.6);
        assert_eq!(body["recommendations"]["male"][0], "Tank top / Vest");
        assert_eq!(body["recommendations"]["female"][0], "Tank top / Sundress");
        assert_eq!(
            body["recommendations"]["accessories"],
            json!(["Consider Sunscreen", "Hat recommended (wide-brimmed if very sunny)", "Sunglasses recommended"])
        );
        assert!(body.get("images").is_none());
    }

    #[test]
    fn images_are_attached_when_present() {
        let rec = RecommendationRequest::from_values(27.0, 40.0, 0.0, 0.0).evaluate().unwrap();
        let images = BTreeMap::from([("T-shirt".to_string(), vec!["https://img/1".to_string()])]);
        let body = serde_json::to_value(RecommendationResponse::from(rec).with_images(images)).unwrap();

        assert_eq!(body["images"]["T-shirt"], json!(["https://img/1"]));
    }

    #[test]
    fn translate_request_needs_both_fields() {
        let full: TranslateRequest = serde_json::from_value(json!({ "text": "Scarf", "target_lang": "de" })).unwrap();
        assert_eq!(full.fields(), Some(("Scarf", "de")));

        let empty: TranslateRequest = serde_json::from_value(json!({ "text": "", "target_lang": "de" })).unwrap();
        assert_eq!(empty.fields(), None);

        let missing: TranslateRequest = serde_json::from_value(json!({ "text": "Scarf" })).unwrap();
        assert_eq!(missing.fields(), None);
    }
}
