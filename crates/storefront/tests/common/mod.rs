//! Shared fixtures for tests that talk to a mock Storefront API.

#![allow(dead_code)]

use goldsabertooth_storefront::config::ShopifyStorefrontConfig;
use goldsabertooth_storefront::shopify::StorefrontClient;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-storefront-token";
pub const ENDPOINT: &str = "/api/2024-07/graphql.json";
pub const CART_ID: &str = "gid://shopify/Cart/c1";

/// Client pointed at `server`.
pub fn client(server: &MockServer) -> StorefrontClient {
    let config =
        ShopifyStorefrontConfig::new("gold-sabertooth.myshopify.com", TOKEN).with_base_url(server.uri());
    StorefrontClient::new(&config)
}

/// Matcher for one named GraphQL operation.
pub fn operation(name: &str) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("X-Shopify-Storefront-Access-Token", TOKEN))
        .and(body_partial_json(json!({ "operationName": name })))
}

pub fn data(payload: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": payload }))
}

fn money(amount: &str) -> Value {
    json!({ "amount": amount, "currencyCode": "USD" })
}

/// A cart with one line per `(line_id, variant_id, quantity)`.
pub fn cart_json(lines: &[(&str, &str, i64)]) -> Value {
    let total: i64 = lines.iter().map(|(_, _, quantity)| quantity).sum();
    let edges: Vec<Value> = lines
        .iter()
        .map(|(line_id, variant_id, quantity)| {
            json!({
                "node": {
                    "id": line_id,
                    "quantity": quantity,
                    "merchandise": {
                        "id": variant_id,
                        "title": "Default Title",
                        "selectedOptions": [{ "name": "Title", "value": "Default Title" }],
                        "product": {
                            "id": "gid://shopify/Product/p1",
                            "handle": "sabertooth-playmat",
                            "title": "Sabertooth Playmat",
                            "featuredImage": null
                        }
                    },
                    "cost": {
                        "totalAmount": money("29.9"),
                        "subtotalAmount": money("29.9"),
                        "compareAtAmountPerQuantity": null
                    }
                }
            })
        })
        .collect();

    json!({
        "id": CART_ID,
        "checkoutUrl": "https://gold-sabertooth.myshopify.com/cart/c/c1",
        "totalQuantity": total,
        "lines": { "edges": edges },
        "cost": {
            "totalAmount": money("29.9"),
            "subtotalAmount": money("29.9"),
            "totalTaxAmount": null,
            "totalDutyAmount": null
        },
        "createdAt": "2024-07-01T12:00:00Z",
        "updatedAt": "2024-07-01T12:05:00Z"
    })
}

/// Successful cart mutation payload under `field`.
pub fn cart_payload(field: &str, cart: Value) -> ResponseTemplate {
    data(json!({ field: { "cart": cart, "userErrors": [] } }))
}

/// Cart mutation rejected with user errors.
pub fn user_errors(field: &str, messages: &[&str]) -> ResponseTemplate {
    let errors: Vec<Value> = messages
        .iter()
        .map(|message| json!({ "code": "INVALID", "field": ["lines"], "message": message }))
        .collect();
    data(json!({ field: { "cart": null, "userErrors": errors } }))
}

pub fn product_json(handle: &str, tags: &[&str]) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{handle}"),
        "handle": handle,
        "title": "Sabertooth Playmat",
        "description": "A playmat.",
        "descriptionHtml": "<p>A playmat.</p>",
        "tags": tags,
        "productType": "Playmat",
        "vendor": "Gold Sabertooth",
        "availableForSale": true,
        "images": { "edges": [] },
        "variants": {
            "edges": [{
                "node": {
                    "id": format!("gid://shopify/ProductVariant/{handle}"),
                    "title": "Default Title",
                    "availableForSale": true,
                    "price": money("29.9"),
                    "compareAtPrice": null,
                    "selectedOptions": [],
                    "image": null
                }
            }]
        },
        "priceRange": {
            "minVariantPrice": money("29.9"),
            "maxVariantPrice": money("29.9")
        },
        "options": []
    })
}

pub fn products_page(products: Vec<Value>, end_cursor: Option<&str>) -> ResponseTemplate {
    let edges: Vec<Value> = products.into_iter().map(|p| json!({ "node": p })).collect();
    data(json!({
        "products": {
            "edges": edges,
            "pageInfo": { "hasNextPage": end_cursor.is_some(), "endCursor": end_cursor }
        }
    }))
}
