use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ItemError {
    #[error("The title value must be set")]
    EmptyTitle,
    #[error("Price must not be negative")]
    NegativePrice,
}

/// Inventory item that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewItem {
    title: String,
    description: Option<String>,
    price_cents: i64,
}

impl NewItem {
    pub fn parse(
        title: String,
        description: Option<String>,
        price_cents: i64,
    ) -> Result<Self, ItemError> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(ItemError::EmptyTitle);
        }
        if price_cents < 0 {
            return Err(ItemError::NegativePrice);
        }
        Ok(Self {
            title,
            description,
            price_cents,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price_cents(&self) -> i64 {
        self.price_cents
    }
}

/// Persisted inventory item. Price is stored in minor currency units.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        let item = NewItem::parse("Widget".to_string(), None, 1999).unwrap();
        assert_eq!(item.title(), "Widget");
        assert_eq!(item.price_cents(), 1999);
    }

    #[test]
    fn test_empty_title_rejected() {
        let result = NewItem::parse("  ".to_string(), None, 100);
        assert_eq!(result.unwrap_err(), ItemError::EmptyTitle);
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = NewItem::parse("Widget".to_string(), None, -1);
        assert_eq!(result.unwrap_err(), ItemError::NegativePrice);
    }
}
