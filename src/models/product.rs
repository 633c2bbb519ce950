use serde::{Deserialize, Serialize};

/// One row of the product catalog as it appears in the source CSV
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "Name")]
    pub name: String,
    /// Free-text feature used for similarity; empty cells load as `None`
    #[serde(rename = "Tags", default)]
    pub tags: Option<String>,
    #[serde(rename = "ReviewCount", default)]
    pub review_count: Option<f64>,
    #[serde(rename = "Brand", default)]
    pub brand: Option<String>,
    #[serde(rename = "ImageURL", default)]
    pub image_url: Option<String>,
    #[serde(rename = "Rating", default)]
    pub rating: Option<f64>,
}

impl Product {
    /// Creates a product with only the fields that drive ranking
    pub fn new(name: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Some(tags.into()),
            review_count: None,
            brand: None,
            image_url: None,
            rating: None,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Tag text to vectorize, treating blank tags like missing ones
    pub fn tag_text(&self) -> Option<&str> {
        self.tags.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Display projection of a product returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductView {
    pub name: String,
    pub review_count: Option<f64>,
    pub brand: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<f64>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            review_count: product.review_count,
            brand: product.brand.clone(),
            image_url: product.image_url.clone(),
            rating: product.rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_drops_tags() {
        let product = Product {
            review_count: Some(120.0),
            image_url: Some("https://img.example/red.png".to_string()),
            rating: Some(4.5),
            ..Product::new("Red Shoe", "red shoe leather").with_brand("Acme")
        };

        let view = ProductView::from(&product);
        assert_eq!(view.name, "Red Shoe");
        assert_eq!(view.brand.as_deref(), Some("Acme"));
        assert_eq!(view.rating, Some(4.5));
        assert_eq!(view.review_count, Some(120.0));

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("tags").is_none());
        assert_eq!(json["image_url"], "https://img.example/red.png");
    }

    #[test]
    fn test_blank_tags_have_no_text() {
        let product = Product::new("Blank", "   ");
        assert_eq!(product.tag_text(), None);
        assert_eq!(Product::new("Hat", "red hat").tag_text(), Some("red hat"));
    }
}
