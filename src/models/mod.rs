pub mod product;

pub use product::{
    discounted_price, DraftError, Product, ProductDraft, ProductPage, ProductQuery, StockStatus,
    MAX_PRODUCT_IMAGES,
};
