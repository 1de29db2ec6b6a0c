//! # Product Catalog
//!
//! Static lookup data for the six catalog products: price, weight and
//! rating. The compare table and the order conversion value read from
//! here. This is replaceable content, not behavior; a product missing
//! from the catalog simply shows up without details.

use sweethome_core::Money;

/// Catalog details for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfo {
    pub name: &'static str,
    pub price: Money,
    /// Display weight/portion label ("1.5 kg", "6 pcs").
    pub weight: &'static str,
    /// Display rating label ("4.9/5").
    pub rating: &'static str,
}

/// The catalog as shipped with the site.
const PRODUCTS: &[ProductInfo] = &[
    ProductInfo {
        name: "Tenderness Cake",
        price: Money::from_rubles(45),
        weight: "1.5 kg",
        rating: "4.9/5",
    },
    ProductInfo {
        name: "Honey Paradise Cake",
        price: Money::from_rubles(60),
        weight: "2 kg",
        rating: "4.8/5",
    },
    ProductInfo {
        name: "Rainbow Cupcakes",
        price: Money::from_rubles(20),
        weight: "6 pcs",
        rating: "4.5/5",
    },
    ProductInfo {
        name: "Chocolate Cupcakes",
        price: Money::from_rubles(25),
        weight: "4 pcs",
        rating: "4.7/5",
    },
    ProductInfo {
        name: "Oatmeal Cookies",
        price: Money::from_rubles(15),
        weight: "350 g",
        rating: "4.9/5",
    },
    ProductInfo {
        name: "Apple Pie",
        price: Money::from_rubles(32),
        weight: "1 kg",
        rating: "4.6/5",
    },
];

/// Looks up a product by its display name.
pub fn find(name: &str) -> Option<&'static ProductInfo> {
    PRODUCTS.iter().find(|p| p.name == name.trim())
}

/// Conversion value of an ordered product for analytics.
///
/// Unknown products contribute zero, matching the original behavior of
/// treating unrecognized form input as worthless rather than an error.
pub fn order_value(product: Option<&str>) -> Money {
    product
        .and_then(find)
        .map(|p| p.price)
        .unwrap_or(Money::zero())
}

/// All catalog products.
pub fn all() -> &'static [ProductInfo] {
    PRODUCTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_product() {
        let pie = find("Apple Pie").unwrap();
        assert_eq!(pie.price, Money::from_rubles(32));
        assert_eq!(pie.weight, "1 kg");
    }

    #[test]
    fn test_find_unknown_product() {
        assert!(find("Moon Cheese").is_none());
    }

    #[test]
    fn test_order_value() {
        assert_eq!(order_value(Some("Honey Paradise Cake")), Money::from_rubles(60));
        assert_eq!(order_value(Some("Moon Cheese")), Money::zero());
        assert_eq!(order_value(None), Money::zero());
    }
}
