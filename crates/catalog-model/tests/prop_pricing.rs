/// Property-based tests for discounted prices and item text roundtrips.
use catalog_model::{Catalog, ClothingItem, Decimal, ToPlain};
use plain_codec::{decode, encode, Value};
use proptest::prelude::*;

/// Prices from 0.00 to 999999.99.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Discount percentages from 0.00 to 100.00.
fn arb_discount() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

proptest! {
    #[test]
    fn discount_never_raises_price(price in arb_price(), discount in arb_discount()) {
        let item = ClothingItem::new("Item", "item", 1, price, discount);
        let discounted = item.price_with_discount();
        prop_assert!(discounted <= price);
        prop_assert!(discounted >= Decimal::ZERO);
    }

    #[test]
    fn valid_amounts_pass_validation(price in arb_price(), discount in arb_discount()) {
        let item = ClothingItem::new("Item", "item", 1, price, discount);
        prop_assert!(item.validate().is_ok());
    }

    #[test]
    fn item_text_roundtrips(price in arb_price(), discount in arb_discount(), indent in 0usize..5) {
        let mut catalog = Catalog::new();
        let category = catalog.add_category("Shirts", "shirts").unwrap();
        let id = catalog
            .add_item(ClothingItem::new("Item", "item", category, price, discount))
            .unwrap();
        let item = catalog.item_by_slug("item").unwrap();
        prop_assert_eq!(item.id, id);

        let plain = item.to_plain(&catalog);
        let expected_price: f64 = price.to_string().parse().unwrap();
        prop_assert_eq!(plain.get("price"), Some(&Value::Float(expected_price)));

        let text = encode(&plain, Some(indent)).unwrap();
        prop_assert_eq!(decode(&text).unwrap(), plain);
    }
}
