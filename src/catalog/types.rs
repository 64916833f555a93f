use serde::{Deserialize, Deserializer, Serialize};

/// Product category. Only the name is displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
  #[serde(default)]
  pub name: String,
}

/// A product as served by the catalog endpoint.
///
/// Extra fields in the payload (slugs, timestamps, nested category ids)
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: i64,
  pub title: String,
  pub price: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<Category>,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub images: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let v: Option<Vec<String>> = Option::deserialize(deserializer)?;
  Ok(v.unwrap_or_default())
}

#[cfg(test)]
impl Product {
  pub fn new(id: i64, title: &str, price: f64) -> Self {
    Self {
      id,
      title: title.to_string(),
      price,
      description: None,
      category: None,
      images: Vec::new(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_deserialize_full_record() {
    let json = r#"{
      "id": 4,
      "title": "Handmade Fresh Table",
      "slug": "handmade-fresh-table",
      "price": 687,
      "description": "Andy shoes are designed to keeping in...",
      "category": { "id": 5, "name": "Others", "image": "https://placehold.co/600x400" },
      "images": ["https://placehold.co/600x400", "https://placehold.co/600x401"]
    }"#;

    let product: Product = serde_json::from_str(json).unwrap();
    assert_eq!(product.id, 4);
    assert_eq!(product.price, 687.0);
    assert_eq!(product.category.unwrap().name, "Others");
    assert_eq!(product.images.len(), 2);
  }

  #[test]
  fn test_deserialize_sparse_record() {
    let json = r#"{ "id": 1, "title": "Apple", "price": 10.5, "category": null, "images": null }"#;

    let product: Product = serde_json::from_str(json).unwrap();
    assert_eq!(product.description, None);
    assert_eq!(product.category, None);
    assert!(product.images.is_empty());
  }

  #[test]
  fn test_missing_title_is_rejected() {
    let json = r#"{ "id": 1, "price": 10 }"#;
    assert!(serde_json::from_str::<Product>(json).is_err());
  }
}
