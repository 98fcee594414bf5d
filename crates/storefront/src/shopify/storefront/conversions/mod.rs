//! Type conversion functions for Shopify Storefront API responses.
//!
//! Wire structs from `queries` are flattened here into the domain types the
//! rest of the crate works with.

pub mod cart;
pub mod products;

pub use cart::{convert_cart, join_user_errors};
pub use products::{convert_product, convert_product_page};

use crate::shopify::types::{Image, Money, SelectedOption};

use super::queries::{ImageFields, MoneyV2, SelectedOptionFields, SizedImageFields};

fn convert_money(money: MoneyV2) -> Money {
    Money::new(money.amount, money.currency_code)
}

fn convert_image(image: ImageFields) -> Image {
    Image {
        id: image.id,
        url: image.url,
        alt_text: image.alt_text,
        width: image.width,
        height: image.height,
    }
}

fn convert_sized_image(image: SizedImageFields) -> Image {
    Image {
        id: image.id,
        url: image.url,
        alt_text: image.alt_text,
        width: Some(image.width),
        height: Some(image.height),
    }
}

fn convert_selected_option(option: SelectedOptionFields) -> SelectedOption {
    SelectedOption {
        name: option.name,
        value: option.value,
    }
}
