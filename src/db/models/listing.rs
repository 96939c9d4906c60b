//! Marketplace listings.

use serde::Serialize;
use sqlx::FromRow;

/// Raw listing row; `images` holds a JSON-encoded array of URLs.
#[derive(Debug, Clone, FromRow)]
pub struct ListingRow {
    pub id: i64,
    pub price: f64,
    pub mileage: i64,
    pub images: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub city: String,
}

/// A listing with its image collection decoded into an ordered sequence.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub id: i64,
    pub price: f64,
    pub mileage: i64,
    pub images: Vec<String>,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub city: String,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        // NULL, empty, or undecodable image data becomes an empty sequence,
        // never null.
        let images = row
            .images
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| serde_json::from_str::<Vec<String>>(s).ok())
            .unwrap_or_default();

        Self {
            id: row.id,
            price: row.price,
            mileage: row.mileage,
            images,
            make: row.make,
            model: row.model,
            year: row.year,
            city: row.city,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub success: bool,
    pub listings: Vec<Listing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(images: Option<&str>) -> ListingRow {
        ListingRow {
            id: 1,
            price: 15000.0,
            mileage: 42000,
            images: images.map(|s| s.to_string()),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2019,
            city: "Accra".to_string(),
        }
    }

    #[test]
    fn decodes_image_array_in_order() {
        let listing = Listing::from(row(Some(r#"["a.jpg","b.jpg"]"#)));
        assert_eq!(listing.images, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
    }

    #[test]
    fn null_images_become_empty_sequence() {
        let listing = Listing::from(row(None));
        assert!(listing.images.is_empty());
    }

    #[test]
    fn empty_images_become_empty_sequence() {
        let listing = Listing::from(row(Some("")));
        assert!(listing.images.is_empty());
    }

    #[test]
    fn undecodable_images_become_empty_sequence() {
        let listing = Listing::from(row(Some("not-json")));
        assert!(listing.images.is_empty());
    }
}
