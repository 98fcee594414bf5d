//! GraphQL operations for the Shopify Storefront API.
//!
//! Each operation is a unit struct implementing [`GraphQLQuery`] with its
//! document, variables and response shape. Response structs mirror the
//! Storefront schema (camelCase, edge/node connections) and are strict: a
//! missing non-null field fails deserialization.

use chrono::{DateTime, Utc};
use graphql_client::{GraphQLQuery, QueryBody};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shopify::types::{
    CartId, CartLineId, CartLineInput, CartLineUpdateInput, ProductId, VariantId,
};

// =============================================================================
// Fragments
// =============================================================================

macro_rules! product_fragment {
    () => {
        r"
fragment ProductFields on Product {
  id
  handle
  title
  description
  descriptionHtml
  tags
  productType
  vendor
  availableForSale
  images(first: 10) {
    edges {
      node {
        id
        url
        altText
        width
        height
      }
    }
  }
  variants(first: 10) {
    edges {
      node {
        id
        title
        availableForSale
        price {
          amount
          currencyCode
        }
        compareAtPrice {
          amount
          currencyCode
        }
        selectedOptions {
          name
          value
        }
        image {
          url
          altText
          width
          height
        }
      }
    }
  }
  priceRange {
    minVariantPrice {
      amount
      currencyCode
    }
    maxVariantPrice {
      amount
      currencyCode
    }
  }
  options {
    id
    name
    values
  }
}
"
    };
}

macro_rules! cart_fragment {
    () => {
        r"
fragment CartFields on Cart {
  id
  checkoutUrl
  totalQuantity
  lines(first: 100) {
    edges {
      node {
        id
        quantity
        merchandise {
          ... on ProductVariant {
            id
            title
            selectedOptions {
              name
              value
            }
            product {
              id
              handle
              title
              featuredImage {
                id
                url
                altText
                width
                height
              }
            }
          }
        }
        cost {
          totalAmount {
            amount
            currencyCode
          }
          subtotalAmount {
            amount
            currencyCode
          }
          compareAtAmountPerQuantity {
            amount
            currencyCode
          }
        }
      }
    }
  }
  cost {
    totalAmount {
      amount
      currencyCode
    }
    subtotalAmount {
      amount
      currencyCode
    }
    totalTaxAmount {
      amount
      currencyCode
    }
    totalDutyAmount {
      amount
      currencyCode
    }
  }
  createdAt
  updatedAt
}
"
    };
}

// =============================================================================
// Shared Wire Types
// =============================================================================

/// A GraphQL connection, reduced to its edges.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

/// One edge of a connection.
#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    /// Drop the edge/node wrapping.
    pub fn into_nodes(self) -> impl Iterator<Item = T> {
        self.edges.into_iter().map(|edge| edge.node)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyV2 {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFields {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// Product and variant images must carry their dimensions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizedImageFields {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
    pub alt_text: Option<String>,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectedOptionFields {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoFields {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

// =============================================================================
// Product Wire Types
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub id: ProductId,
    pub handle: String,
    pub title: String,
    pub description: String,
    pub description_html: String,
    pub tags: Vec<String>,
    pub product_type: String,
    pub vendor: String,
    pub available_for_sale: bool,
    pub images: Connection<SizedImageFields>,
    pub variants: Connection<VariantFields>,
    pub price_range: PriceRangeFields,
    pub options: Vec<ProductOptionFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantFields {
    pub id: VariantId,
    pub title: String,
    pub available_for_sale: bool,
    pub price: MoneyV2,
    pub compare_at_price: Option<MoneyV2>,
    pub selected_options: Vec<SelectedOptionFields>,
    pub image: Option<SizedImageFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeFields {
    pub min_variant_price: MoneyV2,
    pub max_variant_price: MoneyV2,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductOptionFields {
    pub id: String,
    pub name: String,
    pub values: Vec<String>,
}

// =============================================================================
// Cart Wire Types
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartFields {
    pub id: CartId,
    pub checkout_url: String,
    pub total_quantity: i64,
    pub lines: Connection<CartLineFields>,
    pub cost: CartCostFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartLineFields {
    pub id: CartLineId,
    pub quantity: i64,
    pub merchandise: MerchandiseFields,
    pub cost: CartLineCostFields,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseFields {
    pub id: VariantId,
    pub title: String,
    pub selected_options: Vec<SelectedOptionFields>,
    pub product: MerchandiseProductFields,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseProductFields {
    pub id: ProductId,
    pub handle: String,
    pub title: String,
    pub featured_image: Option<ImageFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCostFields {
    pub total_amount: MoneyV2,
    pub subtotal_amount: MoneyV2,
    pub compare_at_amount_per_quantity: Option<MoneyV2>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCostFields {
    pub total_amount: MoneyV2,
    pub subtotal_amount: MoneyV2,
    pub total_tax_amount: Option<MoneyV2>,
    pub total_duty_amount: Option<MoneyV2>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartUserErrorFields {
    pub code: Option<String>,
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Payload shared by every cart mutation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    pub cart: Option<CartFields>,
    pub user_errors: Vec<CartUserErrorFields>,
}

// =============================================================================
// Product Queries
// =============================================================================

pub struct GetProducts;

#[derive(Debug, Clone, Serialize)]
pub struct GetProductsVariables {
    pub first: i64,
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetProductsData {
    pub products: ProductConnectionFields,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnectionFields {
    pub edges: Vec<Edge<ProductFields>>,
    pub page_info: PageInfoFields,
}

impl GraphQLQuery for GetProducts {
    type Variables = GetProductsVariables;
    type ResponseData = GetProductsData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: concat!(
                r"
query GetProducts($first: Int!, $after: String, $query: String) {
  products(first: $first, after: $after, query: $query) {
    edges {
      node {
        ...ProductFields
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
",
                product_fragment!()
            ),
            operation_name: "GetProducts",
        }
    }
}

pub struct GetProductByHandle;

#[derive(Debug, Clone, Serialize)]
pub struct GetProductByHandleVariables {
    pub handle: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetProductByHandleData {
    pub product: Option<ProductFields>,
}

impl GraphQLQuery for GetProductByHandle {
    type Variables = GetProductByHandleVariables;
    type ResponseData = GetProductByHandleData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: concat!(
                r"
query GetProductByHandle($handle: String!) {
  product(handle: $handle) {
    ...ProductFields
  }
}
",
                product_fragment!()
            ),
            operation_name: "GetProductByHandle",
        }
    }
}

// =============================================================================
// Cart Operations
// =============================================================================

pub struct CreateCart;

#[derive(Debug, Clone, Serialize)]
pub struct CreateCartVariables {
    pub input: CartInput,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CartInput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<CartLineInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartData {
    pub cart_create: Option<CartMutationPayload>,
}

impl GraphQLQuery for CreateCart {
    type Variables = CreateCartVariables;
    type ResponseData = CreateCartData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: concat!(
                r"
mutation CreateCart($input: CartInput) {
  cartCreate(input: $input) {
    cart {
      ...CartFields
    }
    userErrors {
      code
      field
      message
    }
  }
}
",
                cart_fragment!()
            ),
            operation_name: "CreateCart",
        }
    }
}

pub struct GetCart;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCartVariables {
    pub cart_id: CartId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetCartData {
    pub cart: Option<CartFields>,
}

impl GraphQLQuery for GetCart {
    type Variables = GetCartVariables;
    type ResponseData = GetCartData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: concat!(
                r"
query GetCart($cartId: ID!) {
  cart(id: $cartId) {
    ...CartFields
  }
}
",
                cart_fragment!()
            ),
            operation_name: "GetCart",
        }
    }
}

pub struct AddToCart;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartVariables {
    pub cart_id: CartId,
    pub lines: Vec<CartLineInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartData {
    pub cart_lines_add: Option<CartMutationPayload>,
}

impl GraphQLQuery for AddToCart {
    type Variables = AddToCartVariables;
    type ResponseData = AddToCartData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: concat!(
                r"
mutation AddToCart($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart {
      ...CartFields
    }
    userErrors {
      code
      field
      message
    }
  }
}
",
                cart_fragment!()
            ),
            operation_name: "AddToCart",
        }
    }
}

pub struct UpdateCartLines;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartLinesVariables {
    pub cart_id: CartId,
    pub lines: Vec<CartLineUpdateInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartLinesData {
    pub cart_lines_update: Option<CartMutationPayload>,
}

impl GraphQLQuery for UpdateCartLines {
    type Variables = UpdateCartLinesVariables;
    type ResponseData = UpdateCartLinesData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: concat!(
                r"
mutation UpdateCartLines($cartId: ID!, $lines: [CartLineUpdateInput!]!) {
  cartLinesUpdate(cartId: $cartId, lines: $lines) {
    cart {
      ...CartFields
    }
    userErrors {
      code
      field
      message
    }
  }
}
",
                cart_fragment!()
            ),
            operation_name: "UpdateCartLines",
        }
    }
}

pub struct RemoveFromCart;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartVariables {
    pub cart_id: CartId,
    pub line_ids: Vec<CartLineId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartData {
    pub cart_lines_remove: Option<CartMutationPayload>,
}

impl GraphQLQuery for RemoveFromCart {
    type Variables = RemoveFromCartVariables;
    type ResponseData = RemoveFromCartData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: concat!(
                r"
mutation RemoveFromCart($cartId: ID!, $lineIds: [ID!]!) {
  cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {
    cart {
      ...CartFields
    }
    userErrors {
      code
      field
      message
    }
  }
}
",
                cart_fragment!()
            ),
            operation_name: "RemoveFromCart",
        }
    }
}
