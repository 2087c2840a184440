//! Category normalization and canonical section ordering.
//!
//! Upstream rows label their category inconsistently: canonical slugs,
//! Russian and English aliases, numeric backend ids, or free text. The
//! normalizer folds all of them onto six canonical categories and collects
//! the rest under `other`, so grouping and section ordering stay stable no
//! matter which backend produced the row.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Main storefront category resolved from a raw payload label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// Shoes of every kind.
    Footwear,
    /// Clothing.
    Clothes,
    /// Bags and backpacks.
    Bags,
    /// Accessories.
    Accessories,
    /// Perfume.
    Fragrance,
    /// Hats and caps.
    Headwear,
    /// Anything the normalizer could not place; carries the normalized text.
    Other(String),
}

impl Category {
    /// Canonical slug order of the home page sections.
    pub const CANONICAL_ORDER: [&'static str; 6] = [
        "footwear",
        "clothes",
        "bags",
        "accessories",
        "fragrance",
        "headwear",
    ];

    /// Resolves a raw category label.
    ///
    /// The pipeline: trim, lowercase and unify dash variants; map numeric
    /// backend ids; look the text up in the alias dictionary; fall back to
    /// substring heuristics, checking footwear before clothes so `summer
    /// shoes` does not land in clothing.
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        if lowered.is_empty() {
            return Category::Other("other".to_string());
        }
        let dashed: String = lowered
            .chars()
            .map(|ch| if matches!(ch, '\u{2014}' | '\u{2013}' | '\u{2212}') { '-' } else { ch })
            .collect();
        let text = dashed.split_whitespace().collect::<Vec<_>>().join(" ");

        if let Ok(number) = text.parse::<f64>() {
            if !number.is_nan() {
                return Category::from_backend_id(number);
            }
        }

        match text.as_str() {
            "footwear" | "shoes" | "shoe" | "sneakers" | "sneaker" | "boots" | "boot"
            | "sandals" | "sandal" | "обувь" | "кроссовки" => return Category::Footwear,
            "clothes" | "clothing" | "garments" | "apparel" | "одежда" => {
                return Category::Clothes
            }
            "bags" | "bag" | "backpack" | "рюкзак" | "сумки" | "сумка" | "сумки-и-рюкзаки" => {
                return Category::Bags
            }
            "accessories" | "accessory" | "аксессуары" | "аксессуар" => {
                return Category::Accessories
            }
            "fragrance" | "fragrances" | "perfume" | "perfumes" | "парфюмерия" => {
                return Category::Fragrance
            }
            "headwear" | "hats" | "hat" | "caps" | "cap" | "beanie" | "шапки"
            | "головные уборы" | "головные-уборы" => return Category::Headwear,
            _ => {}
        }

        if contains_any(&text, &["shoe", "sneak", "foot", "boot", "sand"]) {
            return Category::Footwear;
        }
        if contains_any(&text, &["bag", "pack", "рюкзак", "сумк"]) {
            return Category::Bags;
        }
        if contains_any(&text, &["accessor", "аксесс"]) {
            return Category::Accessories;
        }
        if contains_any(&text, &["perf", "fragr", "парф"]) {
            return Category::Fragrance;
        }
        if contains_any(&text, &["hat", "cap", "beanie", "head", "шапк", "кепк"]) {
            return Category::Headwear;
        }
        if has_clothes_token(&text) {
            return Category::Clothes;
        }

        Category::Other(text)
    }

    fn from_backend_id(number: f64) -> Self {
        if number == 1.0 {
            Category::Footwear
        } else if number == 2.0 {
            Category::Clothes
        } else if number == 3.0 {
            Category::Headwear
        } else if number == 4.0 {
            Category::Fragrance
        } else if number == 5.0 {
            Category::Bags
        } else if number == 6.0 {
            Category::Accessories
        } else {
            Category::Other("other".to_string())
        }
    }

    /// Canonical grouping key; every unplaced category maps to `other`.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Footwear => "footwear",
            Category::Clothes => "clothes",
            Category::Bags => "bags",
            Category::Accessories => "accessories",
            Category::Fragrance => "fragrance",
            Category::Headwear => "headwear",
            Category::Other(_) => "other",
        }
    }

    /// Slug preserving the normalized source text of unplaced categories.
    pub fn slug(&self) -> &str {
        match self {
            Category::Other(text) => text,
            _ => self.key(),
        }
    }

    /// Storefront display label for the canonical categories.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Category::Footwear => Some("Обувь"),
            Category::Clothes => Some("Одежда"),
            Category::Bags => Some("Сумки"),
            Category::Accessories => Some("Аксессуары"),
            Category::Fragrance => Some("Парфюмерия"),
            Category::Headwear => Some("Головные уборы"),
            Category::Other(_) => None,
        }
    }

    /// Numeric backend id used for section anchors.
    pub fn backend_id(&self) -> Option<u8> {
        match self {
            Category::Footwear => Some(1),
            Category::Clothes => Some(2),
            Category::Headwear => Some(3),
            Category::Fragrance => Some(4),
            Category::Bags => Some(5),
            Category::Accessories => Some(6),
            Category::Other(_) => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.slug())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ok(Category::parse(&text))
    }
}

/// Normalizes a subcategory slug, folding singular and spelling variants.
pub fn normalize_subcategory(raw: &str) -> Option<String> {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    let folded = match lowered.as_str() {
        "tee" | "tees" | "tshirt" | "tshirts" => "tshirts",
        "sneaker" | "sneakers" => "sneakers",
        "boot" | "boots" => "boots",
        "sandal" | "sandals" => "sandals",
        other => other,
    };
    Some(folded.to_string())
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

/// Clothing is matched on whole words only, so free text like `tablecloth`
/// stays out of the clothes section.
fn has_clothes_token(text: &str) -> bool {
    text.split(|ch: char| !ch.is_ascii_alphanumeric() && ch != '_')
        .any(|token| {
            matches!(
                token,
                "cloth" | "cloths" | "apparel" | "apparels" | "garment" | "garments"
            )
        })
}
