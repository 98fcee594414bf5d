//! Cart type conversion functions.

use crate::shopify::types::{
    Cart, CartCost, CartLine, CartLineCost, CartMerchandise, CartMerchandiseProduct,
    CartUserError,
};

use super::super::queries::{
    CartCostFields, CartFields, CartLineCostFields, CartLineFields, CartUserErrorFields,
    MerchandiseFields,
};
use super::{convert_image, convert_money, convert_selected_option};

/// Flatten a cart, keeping lines in server order.
pub fn convert_cart(cart: CartFields) -> Cart {
    Cart {
        id: cart.id,
        checkout_url: cart.checkout_url,
        total_quantity: cart.total_quantity,
        lines: cart.lines.into_nodes().map(convert_cart_line).collect(),
        cost: convert_cart_cost(cart.cost),
        created_at: cart.created_at,
        updated_at: cart.updated_at,
    }
}

fn convert_cart_line(line: CartLineFields) -> CartLine {
    CartLine {
        id: line.id,
        quantity: line.quantity,
        merchandise: convert_merchandise(line.merchandise),
        cost: convert_line_cost(line.cost),
    }
}

fn convert_merchandise(merchandise: MerchandiseFields) -> CartMerchandise {
    CartMerchandise {
        id: merchandise.id,
        title: merchandise.title,
        selected_options: merchandise
            .selected_options
            .into_iter()
            .map(convert_selected_option)
            .collect(),
        product: CartMerchandiseProduct {
            id: merchandise.product.id,
            handle: merchandise.product.handle,
            title: merchandise.product.title,
            featured_image: merchandise.product.featured_image.map(convert_image),
        },
    }
}

fn convert_line_cost(cost: CartLineCostFields) -> CartLineCost {
    CartLineCost {
        total_amount: convert_money(cost.total_amount),
        subtotal_amount: convert_money(cost.subtotal_amount),
        compare_at_amount_per_quantity: cost.compare_at_amount_per_quantity.map(convert_money),
    }
}

fn convert_cart_cost(cost: CartCostFields) -> CartCost {
    CartCost {
        subtotal: convert_money(cost.subtotal_amount),
        total: convert_money(cost.total_amount),
        total_tax: cost.total_tax_amount.map(convert_money),
        total_duty: cost.total_duty_amount.map(convert_money),
    }
}

pub fn convert_user_error(error: CartUserErrorFields) -> CartUserError {
    CartUserError {
        code: error.code,
        field: error.field,
        message: error.message,
    }
}

/// Join mutation user errors into one message, in the order Shopify sent them.
pub fn join_user_errors(errors: Vec<CartUserErrorFields>) -> String {
    errors
        .into_iter()
        .map(|e| convert_user_error(e).message)
        .collect::<Vec<_>>()
        .join("; ")
}
