use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::models::{Product, ProductView};

pub const TRUNCATE_LENGTH: usize = 30;

/// Placeholder images shown next to trending products
pub const PRODUCT_IMAGE_URLS: [&str; 8] = [
    "static/img/img_1.png",
    "static/img/img_2.png",
    "static/img/img_3.png",
    "static/img/img_4.png",
    "static/img/img_5.png",
    "static/img/img_6.png",
    "static/img/img_7.png",
    "static/img/img_8.png",
];

pub const DISPLAY_PRICES: [u32; 10] = [40, 50, 60, 70, 100, 122, 106, 50, 30, 50];

/// Shortens `text` to `length` characters, appending `...` when anything was cut
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() > length {
        let head: String = text.chars().take(length).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

pub fn random_image_url() -> &'static str {
    PRODUCT_IMAGE_URLS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(PRODUCT_IMAGE_URLS[0])
}

pub fn random_price() -> u32 {
    DISPLAY_PRICES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(DISPLAY_PRICES[0])
}

/// A trending product decorated for the landing page
#[derive(Debug, Clone, Serialize)]
pub struct TrendingProduct {
    #[serde(flatten)]
    pub product: ProductView,
    pub display_name: String,
    pub display_image_url: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendingPage {
    pub products: Vec<TrendingProduct>,
    pub price: u32,
}

/// Decorates the given products with truncated names, random images and one random price
pub fn trending_page(products: &[Product]) -> TrendingPage {
    let products = products
        .iter()
        .map(|p| TrendingProduct {
            product: ProductView::from(p),
            display_name: truncate(&p.name, TRUNCATE_LENGTH),
            display_image_url: random_image_url(),
        })
        .collect();

    TrendingPage {
        products,
        price: random_price(),
    }
}
