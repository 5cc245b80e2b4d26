//! Product knowledge: the built-in facts and catalog-derived sentences.

use serde::{Deserialize, Serialize};

/// The default product facts, in retrieval-index order.
pub const DEFAULT_KNOWLEDGE: [&str; 5] = [
    "Our earbuds have 40ms low-latency mode and 8 hours battery backup.",
    "Headphones come with active noise cancellation and powerful bass.",
    "Smartwatches track heart rate, steps, calories, and sleep quality.",
    "Bluetooth speakers provide 24-hour battery and waterproof design.",
    "All products come with a 1-year replacement warranty.",
];

/// The default knowledge as owned strings.
pub fn default_knowledge() -> Vec<String> {
    DEFAULT_KNOWLEDGE.iter().map(|s| s.to_string()).collect()
}

/// One entry of a storefront product catalog (`products.json`).
///
/// Fields the chatbot does not use (ids, images, stock) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    /// Price in rupees.
    pub price: f64,
    /// Average rating out of 5.
    pub rating: f64,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Product {
    /// Render the product as one knowledge sentence.
    ///
    /// `"{name} is a {category} priced at ₹{price}. It has a rating of
    /// {rating}/5. Features: {features}."`; the features clause is left out
    /// when the product lists none.
    pub fn fact(&self) -> String {
        let mut sentence = format!(
            "{} is a {} priced at ₹{}. It has a rating of {}/5.",
            self.name, self.category, self.price, self.rating
        );
        if !self.features.is_empty() {
            sentence.push_str(&format!(" Features: {}.", self.features.join(", ")));
        }
        sentence
    }
}

/// Knowledge sentences for a catalog, in catalog order.
pub fn catalog_knowledge(products: &[Product]) -> Vec<String> {
    products.iter().map(Product::fact).collect()
}
