use serde::{Deserialize, Serialize};

/// Most images a product may carry
pub const MAX_PRODUCT_IMAGES: usize = 8;

/// Product as returned by the admin API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub discounted_price: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Active,
    OutOfStock,
}

impl Product {
    pub fn stock_status(&self) -> StockStatus {
        if self.stock > 0 {
            StockStatus::Active
        } else {
            StockStatus::OutOfStock
        }
    }

    /// Price the customer pays
    pub fn effective_price(&self) -> f64 {
        self.discounted_price
            .or_else(|| discounted_price(self.price, self.discount))
            .unwrap_or(self.price)
    }
}

/// Search and paging for the product list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductQuery {
    pub search: String,
    pub page: u32,
    pub limit: u32,
    pub all: bool,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            limit: 10,
            all: false,
        }
    }
}

/// One page of the product list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl ProductPage {
    /// Whether products remain past this page, given the query that fetched it
    pub fn has_more(&self, query: &ProductQuery) -> bool {
        if query.all {
            return false;
        }
        let before = u64::from(query.page.max(1) - 1) * u64::from(query.limit);
        before + (self.products.len() as u64) < self.total
    }
}

/// A new product as submitted by the add form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub price: f64,
    pub discount: f64,
    pub discounted_price: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub is_new: bool,
    pub images: Vec<String>,
    pub colors: Vec<String>,
    pub stock: i64,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Product name is required")]
    MissingName,
    #[error("A product can have at most 8 images, got {0}")]
    TooManyImages(usize),
    #[error("Price must be a non-negative number")]
    InvalidPrice,
    #[error("Discount must be between 0 and 100")]
    InvalidDiscount,
}

impl ProductDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }
        if self.images.len() > MAX_PRODUCT_IMAGES {
            return Err(DraftError::TooManyImages(self.images.len()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DraftError::InvalidPrice);
        }
        if !self.discount.is_finite() || !(0.0..=100.0).contains(&self.discount) {
            return Err(DraftError::InvalidDiscount);
        }
        Ok(())
    }

    /// Recompute the discounted price and drop blank feature lines
    pub fn normalized(mut self) -> Self {
        self.discounted_price = discounted_price(self.price, self.discount);
        self.features.retain(|f| !f.trim().is_empty());
        self
    }
}

/// `price - price * discount / 100` rounded to cents; `None` without a discount
pub fn discounted_price(price: f64, discount: f64) -> Option<f64> {
    if !price.is_finite() || !discount.is_finite() || discount <= 0.0 {
        return None;
    }
    let value = price - (price * discount / 100.0);
    Some((value * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_discounted_price() {
        assert_eq!(discounted_price(100.0, 15.0), Some(85.0));
        assert_eq!(discounted_price(19.99, 10.0), Some(17.99));
        assert_eq!(discounted_price(100.0, 0.0), None);
        assert_eq!(discounted_price(f64::NAN, 10.0), None);
    }

    #[test]
    fn test_product_from_api_json() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Wireless Headphones",
            "brand": "Sony",
            "price": 200,
            "discount": 10,
            "discountedPrice": 180,
            "isNew": true,
            "images": ["https://cdn.example.com/a.png"],
            "stock": 0
        }))
        .unwrap();

        assert_eq!(product.id, "p1");
        assert!(product.is_new);
        assert_eq!(product.effective_price(), 180.0);
        assert_eq!(product.stock_status(), StockStatus::OutOfStock);
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = ProductDraft {
            name: "Lamp".to_string(),
            price: 40.0,
            ..Default::default()
        };
        assert!(draft.validate().is_ok());

        draft.images = vec!["img".to_string(); MAX_PRODUCT_IMAGES + 1];
        assert_eq!(draft.validate(), Err(DraftError::TooManyImages(9)));

        draft.images.truncate(MAX_PRODUCT_IMAGES);
        draft.discount = 120.0;
        assert_eq!(draft.validate(), Err(DraftError::InvalidDiscount));

        draft.name = "  ".to_string();
        assert_eq!(draft.validate(), Err(DraftError::MissingName));
    }

    #[test]
    fn test_draft_normalization() {
        let draft = ProductDraft {
            name: "Lamp".to_string(),
            price: 50.0,
            discount: 20.0,
            features: vec!["LED".to_string(), "".to_string(), " ".to_string()],
            ..Default::default()
        }
        .normalized();

        assert_eq!(draft.discounted_price, Some(40.0));
        assert_eq!(draft.features, vec!["LED".to_string()]);

        let wire = serde_json::to_value(&draft).unwrap();
        assert_eq!(wire["discountedPrice"], 40.0);
        assert_eq!(wire["isNew"], false);
    }

    #[test]
    fn test_has_more_tracks_position_across_pages() {
        let product: Product =
            serde_json::from_value(json!({"_id": "p", "name": "Lamp"})).unwrap();
        let page = |n: usize| ProductPage {
            total: 25,
            products: vec![product.clone(); n],
        };
        let query = |page: u32| ProductQuery {
            page,
            ..Default::default()
        };

        assert!(page(10).has_more(&query(1)));
        assert!(page(10).has_more(&query(2)));
        assert!(!page(5).has_more(&query(3)));
        assert!(!page(0).has_more(&query(4)));

        let all = ProductQuery {
            all: true,
            ..Default::default()
        };
        assert!(!page(10).has_more(&all));
    }

    #[test]
    fn test_query_defaults() {
        let query: ProductQuery = serde_json::from_value(json!({"search": "lamp"})).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert!(!query.all);
    }
}
