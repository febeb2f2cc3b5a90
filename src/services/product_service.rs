use crate::api::{ApiClient, ApiEnvelope, GatewayError};
use crate::models::{DraftError, Product, ProductDraft, ProductPage, ProductQuery};

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("Invalid product: {0}")]
    Invalid(#[from] DraftError),
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Invalid product id '{0}'")]
    InvalidId(String),
    #[error("{0}")]
    Rejected(String),
}

/// `/products/{id}`; ids are opaque but never carry path syntax
fn product_path(id: &str) -> Result<String, ProductError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ProductError::InvalidId(id.to_string()));
    }
    Ok(format!("/products/{}", id))
}

/// Product CRUD against the remote admin API
pub struct ProductService {
    client: ApiClient,
}

impl ProductService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ProductQuery) -> Result<ProductPage, ProductError> {
        let envelope: ApiEnvelope<ProductPage> = self.client.post("/products", query).await?;
        if !envelope.is_ok() {
            return Err(ProductError::Rejected(
                envelope.message_or("Failed to load products").to_string(),
            ));
        }
        Ok(envelope.data.unwrap_or_default())
    }

    pub async fn get(&self, id: &str) -> Result<Product, ProductError> {
        let path = product_path(id)?;
        let envelope: ApiEnvelope<Product> = self
            .client
            .get(&path)
            .await
            .map_err(|e| match e.status() {
                Some(reqwest::StatusCode::NOT_FOUND) => ProductError::NotFound(id.to_string()),
                _ => e.into(),
            })?;

        match envelope.data {
            Some(product) if envelope.is_ok() => Ok(product),
            _ => Err(ProductError::NotFound(id.to_string())),
        }
    }

    /// Validate, normalize and submit a new product; returns the API's message
    pub async fn add(&self, draft: ProductDraft) -> Result<String, ProductError> {
        draft.validate()?;
        let draft = draft.normalized();

        let envelope: ApiEnvelope<serde_json::Value> =
            self.client.post("/products/add", &draft).await?;
        if envelope.is_ok() {
            Ok(envelope.message_or("Product submitted successfully!").to_string())
        } else {
            Err(ProductError::Rejected(
                envelope.message_or("Failed to submit product").to_string(),
            ))
        }
    }

    pub async fn delete(&self, id: &str) -> Result<String, ProductError> {
        let envelope: ApiEnvelope<serde_json::Value> =
            self.client.delete(&product_path(id)?).await?;
        if envelope.is_ok() {
            tracing::info!("Deleted product {}", id);
            Ok(envelope.message_or("Product deleted").to_string())
        } else {
            Err(ProductError::Rejected(
                envelope.message_or("Failed to delete product").to_string(),
            ))
        }
    }

    /// Upload product media as multipart form data
    pub async fn upload(
        &self,
        endpoint: &str,
        form: reqwest::multipart::Form,
    ) -> Result<serde_json::Value, ProductError> {
        let envelope: ApiEnvelope<serde_json::Value> = self.client.post_form(endpoint, form).await?;
        if envelope.is_ok() {
            Ok(envelope.data.unwrap_or(serde_json::Value::Null))
        } else {
            Err(ProductError::Rejected(envelope.message_or("Upload failed").to_string()))
        }
    }
}
