//! Product type conversion functions.

use crate::shopify::types::{
    PageInfo, PriceRange, Product, ProductOption, ProductPage, ProductVariant,
};

use super::super::queries::{ProductConnectionFields, ProductFields, VariantFields};
use super::{convert_money, convert_selected_option, convert_sized_image};

/// Flatten one page of the products connection.
pub fn convert_product_page(connection: ProductConnectionFields) -> ProductPage {
    ProductPage {
        products: connection
            .edges
            .into_iter()
            .map(|edge| convert_product(edge.node))
            .collect(),
        page_info: PageInfo {
            has_next_page: connection.page_info.has_next_page,
            end_cursor: connection.page_info.end_cursor,
        },
    }
}

pub fn convert_product(product: ProductFields) -> Product {
    Product {
        id: product.id,
        handle: product.handle,
        title: product.title,
        description: product.description,
        description_html: product.description_html,
        tags: product.tags,
        kind: product.product_type,
        vendor: product.vendor,
        available_for_sale: product.available_for_sale,
        images: product.images.into_nodes().map(convert_sized_image).collect(),
        variants: product.variants.into_nodes().map(convert_variant).collect(),
        price_range: PriceRange {
            min_variant_price: convert_money(product.price_range.min_variant_price),
            max_variant_price: convert_money(product.price_range.max_variant_price),
        },
        options: product
            .options
            .into_iter()
            .map(|o| ProductOption {
                id: o.id,
                name: o.name,
                values: o.values,
            })
            .collect(),
    }
}

fn convert_variant(variant: VariantFields) -> ProductVariant {
    ProductVariant {
        id: variant.id,
        title: variant.title,
        available_for_sale: variant.available_for_sale,
        price: convert_money(variant.price),
        compare_at_price: variant.compare_at_price.map(convert_money),
        selected_options: variant
            .selected_options
            .into_iter()
            .map(convert_selected_option)
            .collect(),
        image: variant.image.map(convert_sized_image),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product_json(handle: &str) -> serde_json::Value {
        serde_json::json!({
            "id": format!("gid://shopify/Product/{handle}"),
            "handle": handle,
            "title": "Sabertooth Playmat",
            "description": "A playmat.",
            "descriptionHtml": "<p>A playmat.</p>",
            "tags": ["Playmats"],
            "productType": "Playmat",
            "vendor": "Gold Sabertooth",
            "availableForSale": true,
            "images": {
                "edges": [{
                    "node": {
                        "id": "gid://shopify/ProductImage/1",
                        "url": "https://cdn.shopify.com/playmat.png",
                        "altText": null,
                        "width": 1200,
                        "height": 800
                    }
                }]
            },
            "variants": {
                "edges": [{
                    "node": {
                        "id": "gid://shopify/ProductVariant/1",
                        "title": "Default Title",
                        "availableForSale": true,
                        "price": { "amount": "29.9", "currencyCode": "USD" },
                        "compareAtPrice": null,
                        "selectedOptions": [{ "name": "Title", "value": "Default Title" }],
                        "image": null
                    }
                }]
            },
            "priceRange": {
                "minVariantPrice": { "amount": "29.9", "currencyCode": "USD" },
                "maxVariantPrice": { "amount": "29.9", "currencyCode": "USD" }
            },
            "options": [{ "id": "gid://shopify/ProductOption/1", "name": "Title", "values": ["Default Title"] }]
        })
    }

    #[test]
    fn test_convert_product_page() {
        let json = serde_json::json!({
            "edges": [{ "node": product_json("sabertooth-playmat") }],
            "pageInfo": { "hasNextPage": true, "endCursor": "cursor-1" }
        });
        let page = convert_product_page(serde_json::from_value(json).unwrap());

        assert_eq!(page.products.len(), 1);
        assert!(page.page_info.has_next_page);
        assert_eq!(page.page_info.end_cursor.as_deref(), Some("cursor-1"));

        let product = &page.products[0];
        assert_eq!(product.kind, "Playmat");
        assert_eq!(product.images[0].width, Some(1200));
        assert_eq!(product.variants[0].price.amount, Decimal::new(299, 1));
        assert_eq!(product.options[0].values, vec!["Default Title".to_string()]);
    }

    #[test]
    fn test_product_with_wrong_field_type_is_rejected() {
        let mut json = product_json("broken");
        json["tags"] = serde_json::json!("Playmats");
        assert!(serde_json::from_value::<ProductFields>(json).is_err());
    }
}
