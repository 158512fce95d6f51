//! Conversion from provider wire shapes to [`ProductPriceRecord`].

use rust_decimal::Decimal;
use shopsmart_core::{GeoPoint, ProductPriceRecord, Store};

use crate::error::ProviderError;
use crate::types::ProviderProduct;

/// Maps a provider store identifier to a [`Store`].
///
/// Known chains match case-insensitively after trimming. Anything else is
/// kept verbatim as [`Store::Other`].
#[must_use]
pub fn normalize_store_id(raw: &str) -> Store {
    match raw.trim().to_lowercase().as_str() {
        "woolworths" => Store::Woolworths,
        "coles" => Store::Coles,
        "iga" => Store::Iga,
        "aldi" => Store::Aldi,
        "costco" => Store::Costco,
        _ => Store::Other(raw.to_owned()),
    }
}

/// Converts one provider product into a record.
///
/// # Errors
///
/// Returns [`ProviderError::Normalization`] if the product has a blank id or
/// name, or a negative price.
pub fn normalize_product(product: ProviderProduct) -> Result<ProductPriceRecord, ProviderError> {
    if product.id.trim().is_empty() {
        return Err(ProviderError::Normalization {
            product_id: product.id,
            reason: "blank product id".into(),
        });
    }
    if product.name.trim().is_empty() {
        return Err(ProviderError::Normalization {
            product_id: product.id,
            reason: "blank product name".into(),
        });
    }
    if product.price < Decimal::ZERO || product.unit_price < Decimal::ZERO {
        return Err(ProviderError::Normalization {
            product_id: product.id,
            reason: "negative price".into(),
        });
    }

    // A lone latitude or longitude is useless for distance.
    let coordinates = match (product.latitude, product.longitude) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        _ => None,
    };

    Ok(ProductPriceRecord {
        store: normalize_store_id(&product.store),
        id: product.id,
        name: product.name,
        price: product.price,
        unit_price: product.unit_price,
        unit: product.unit,
        location: product.location,
        suburb: product.suburb,
        last_updated: product.last_updated,
        category: product.category,
        dietary_info: product.dietary_info,
        brand: product.brand,
        size: product.size,
        description: product.description,
        image_url: product.image_url,
        coordinates,
    })
}

/// Normalizes a batch, dropping (and logging) products that fail.
pub(crate) fn normalize_products(products: Vec<ProviderProduct>) -> Vec<ProductPriceRecord> {
    products
        .into_iter()
        .filter_map(|product| match normalize_product(product) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "skipping provider product");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn product(store: &str) -> ProviderProduct {
        ProviderProduct {
            id: "p1".to_owned(),
            name: "Milk 1L".to_owned(),
            store: store.to_owned(),
            price: Decimal::new(230, 2),
            unit_price: Decimal::new(230, 2),
            unit: "per litre".to_owned(),
            location: "456 Pitt St, Sydney NSW 2000".to_owned(),
            suburb: "Sydney CBD".to_owned(),
            last_updated: Utc.with_ymd_and_hms(2024, 1, 15, 9, 45, 0).unwrap(),
            image_url: None,
            category: Some("Dairy".to_owned()),
            dietary_info: None,
            brand: None,
            size: Some("1L".to_owned()),
            description: None,
            latitude: Some(-33.8688),
            longitude: Some(151.209),
        }
    }

    #[test]
    fn known_store_ids_are_case_insensitive() {
        assert_eq!(normalize_store_id("coles"), Store::Coles);
        assert_eq!(normalize_store_id(" WOOLWORTHS "), Store::Woolworths);
        assert_eq!(normalize_store_id("iga"), Store::Iga);
        assert_eq!(normalize_store_id("Aldi"), Store::Aldi);
        assert_eq!(normalize_store_id("costco"), Store::Costco);
    }

    #[test]
    fn unknown_store_ids_pass_through_unchanged() {
        assert_eq!(
            normalize_store_id("harris-farm"),
            Store::Other("harris-farm".to_owned())
        );
    }

    #[test]
    fn product_maps_to_record() {
        let record = normalize_product(product("coles")).unwrap();
        assert_eq!(record.store, Store::Coles);
        assert_eq!(record.size.as_deref(), Some("1L"));
        assert_eq!(record.coordinates, Some(GeoPoint::new(-33.8688, 151.209)));
    }

    #[test]
    fn half_a_coordinate_is_dropped() {
        let mut p = product("coles");
        p.longitude = None;
        assert!(normalize_product(p).unwrap().coordinates.is_none());
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut p = product("coles");
        p.price = Decimal::new(-1, 0);
        assert!(matches!(
            normalize_product(p),
            Err(ProviderError::Normalization { ref reason, .. }) if reason == "negative price"
        ));
    }

    #[test]
    fn batch_skips_bad_products() {
        let mut bad = product("aldi");
        bad.name = "  ".to_owned();
        let records = normalize_products(vec![product("coles"), bad]);
        assert_eq!(records.len(), 1);
    }
}
