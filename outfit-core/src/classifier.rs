//! Maps a validated reading to a clothing category and item lists.

use std::collections::BTreeSet;

use crate::{
    effective::compute_effective_temperature,
    error::InvalidInput,
    model::{Category, ClothingRecommendation, WeatherReading},
};

pub const VERY_HOT_THRESHOLD_C: f64 = 30.0;
pub const HOT_THRESHOLD_C: f64 = 25.0;
pub const WARM_THRESHOLD_C: f64 = 20.0;
pub const MILD_THRESHOLD_C: f64 = 15.0;
pub const COOL_THRESHOLD_C: f64 = 10.0;
pub const COLD_THRESHOLD_C: f64 = 5.0;
pub const VERY_COLD_THRESHOLD_C: f64 = 0.0;

/// Static clothing data for one band.
#[derive(Debug)]
pub struct Outfit {
    pub variant_a: &'static [&'static str],
    pub variant_b: &'static [&'static str],
    pub accessories: &'static [&'static str],
}

impl Category {
    /// Lowest effective temperature (inclusive) that falls in this band.
    /// `None` for the open-ended coldest band.
    pub fn lower_bound_c(&self) -> Option<f64> {
        match self {
            Category::VeryHot => Some(VERY_HOT_THRESHOLD_C),
            Category::Hot => Some(HOT_THRESHOLD_C),
            Category::Warm => Some(WARM_THRESHOLD_C),
            Category::Mild => Some(MILD_THRESHOLD_C),
            Category::Cool => Some(COOL_THRESHOLD_C),
            Category::Cold => Some(COLD_THRESHOLD_C),
            Category::VeryCold => Some(VERY_COLD_THRESHOLD_C),
            Category::Freezing => None,
        }
    }

    /// First band, hottest to coldest, whose lower bound the value reaches.
    pub fn for_effective_temperature(effective_c: f64) -> Category {
        Category::all()
            .iter()
            .copied()
            .find(|c| c.lower_bound_c().is_none_or(|bound| effective_c >= bound))
            .unwrap_or(Category::Freezing)
    }

    pub fn outfit(&self) -> &'static Outfit {
        match self {
            Category::VeryHot => &VERY_HOT,
            Category::Hot => &HOT,
            Category::Warm => &WARM,
            Category::Mild => &MILD,
            Category::Cool => &COOL,
            Category::Cold => &COLD,
            Category::VeryCold => &VERY_COLD,
            Category::Freezing => &FREEZING,
        }
    }
}

static VERY_HOT: Outfit = Outfit {
    variant_a: &["Tank top / Vest", "Shorts (lightweight)", "Sandals / Flip-flops"],
    variant_b: &["Tank top / Sundress", "Shorts / Skirt (lightweight)", "Sandals / Flip-flops"],
    accessories: &[],
};

static HOT: Outfit = Outfit {
    variant_a: &["T-shirt", "Shorts / Light Trousers (Linen/Cotton)", "Sneakers / Sandals"],
    variant_b: &["T-shirt / Blouse", "Shorts / Skirt / Light Trousers", "Sneakers / Sandals"],
    accessories: &[],
};

static WARM: Outfit = Outfit {
    variant_a: &["T-shirt / Polo Shirt", "Jeans / Chinos", "Sneakers / Loafers"],
    variant_b: &["T-shirt / Blouse", "Jeans / Trousers / Skirt", "Flats / Sneakers"],
    accessories: &["Light Jacket/Cardigan (optional, evenings)"],
};

static MILD: Outfit = Outfit {
    variant_a: &[
        "Long-sleeve Shirt / T-shirt + Light Jumper/Hoodie",
        "Jeans / Chinos",
        "Closed Shoes / Sneakers",
    ],
    variant_b: &[
        "Long-sleeve Top / Blouse + Cardigan/Light Jumper",
        "Jeans / Trousers",
        "Closed Shoes / Ankle Boots",
    ],
    accessories: &["Light Jacket recommended"],
};

static COOL: Outfit = Outfit {
    variant_a: &["Jumper / Sweater / Fleece", "Jeans / Trousers", "Jacket", "Closed Shoes / Boots"],
    variant_b: &["Jumper / Sweater / Fleece", "Jeans / Trousers", "Jacket / Coat", "Boots / Closed Shoes"],
    accessories: &["Scarf (optional)"],
};

static COLD: Outfit = Outfit {
    variant_a: &["Warm Jumper / Fleece", "Warm Trousers", "Warm Jacket / Coat", "Boots"],
    variant_b: &["Warm Jumper / Fleece", "Warm Trousers / Jeans", "Warm Coat", "Boots"],
    accessories: &["Scarf", "Hat (optional)"],
};

static VERY_COLD: Outfit = Outfit {
    variant_a: &[
        "Base Layer (Thermals)",
        "Heavy Jumper / Fleece",
        "Insulated Coat",
        "Warm Trousers",
        "Winter Boots",
    ],
    variant_b: &[
        "Base Layer (Thermals)",
        "Heavy Jumper / Fleece",
        "Insulated Coat",
        "Warm Trousers",
        "Winter Boots",
    ],
    accessories: &["Warm Hat", "Gloves", "Scarf"],
};

static FREEZING: Outfit = Outfit {
    variant_a: &[
        "Heavy Base Layer (Thermals)",
        "Fleece Mid-layer",
        "Heavy Insulated Parka/Coat",
        "Insulated Trousers",
        "Heavy Winter Boots",
    ],
    variant_b: &[
        "Heavy Base Layer (Thermals)",
        "Fleece Mid-layer",
        "Heavy Insulated Parka/Coat",
        "Insulated Trousers",
        "Heavy Winter Boots",
    ],
    accessories: &["Warm Hat (covering ears)", "Insulated Gloves", "Neck Gaiter / Heavy Scarf"],
};

/// What fires a conditional accessory rule.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    UvAtLeast(f64),
    WindAbove(f64),
}

impl Trigger {
    fn fires(&self, reading: &WeatherReading) -> bool {
        match *self {
            Trigger::UvAtLeast(min) => reading.uv_index >= min,
            Trigger::WindAbove(min) => reading.wind_kph > min,
        }
    }
}

#[derive(Debug)]
pub struct AccessoryRule {
    pub trigger: Trigger,
    pub items: &'static [&'static str],
}

pub const SUNSCREEN: &str = "Consider Sunscreen";
pub const SUNGLASSES: &str = "Sunglasses recommended";
pub const SUN_HAT: &str = "Hat recommended (wide-brimmed if very sunny)";
pub const WINDPROOF_LAYER: &str = "Windproof outer layer recommended";
pub const SECURE_HAT: &str = "Secure hat if worn";

/// Independent of the temperature band; rules stack.
pub static ACCESSORY_RULES: &[AccessoryRule] = &[
    AccessoryRule { trigger: Trigger::UvAtLeast(3.0), items: &[SUNSCREEN] },
    AccessoryRule { trigger: Trigger::UvAtLeast(6.0), items: &[SUNGLASSES, SUN_HAT] },
    AccessoryRule { trigger: Trigger::WindAbove(30.0), items: &[WINDPROOF_LAYER] },
    AccessoryRule { trigger: Trigger::WindAbove(50.0), items: &[SECURE_HAT] },
];

/// Validate a reading and produce its recommendation.
pub fn classify(reading: &WeatherReading) -> Result<ClothingRecommendation, InvalidInput> {
    reading.validate()?;

    let effective =
        compute_effective_temperature(reading.temperature_c, reading.humidity_percent, reading.wind_kph);
    let category = Category::for_effective_temperature(effective);
    let outfit = category.outfit();

    let conditional = ACCESSORY_RULES
        .iter()
        .filter(|rule| rule.trigger.fires(reading))
        .flat_map(|rule| rule.items.iter());
    let accessories: BTreeSet<String> = outfit
        .accessories
        .iter()
        .chain(conditional)
        .map(|item| item.to_string())
        .collect();

    tracing::debug!(
        effective_c = effective,
        category = %category,
        "classified weather reading"
    );

    Ok(ClothingRecommendation {
        score: category.score(),
        category,
        effective_temp_c: round_to_tenth(effective),
        variant_a_items: to_owned_list(outfit.variant_a),
        variant_b_items: to_owned_list(outfit.variant_b),
        accessories,
    })
}

/// Evaluate four raw readings. Pure: identical inputs give identical output.
pub fn evaluate(
    temperature_c: f64,
    humidity_percent: f64,
    uv_index: f64,
    wind_speed_kph: f64,
) -> Result<ClothingRecommendation, InvalidInput> {
    classify(&WeatherReading::new(temperature_c, humidity_percent, uv_index, wind_speed_kph))
}

// Rounded from the exact binary value, so 0.05 steps are not nudged by a multiply.
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
