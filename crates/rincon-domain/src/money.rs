//! Cart totals and Chilean peso display.
//!
//! All arithmetic is exact `Decimal`; nothing is rounded before it is sent
//! to the backend. Rounding only happens in [`format_price`].

use rust_decimal::prelude::*;

use crate::cart::CartLine;

/// IVA applied on top of the cart subtotal (19%).
pub const TAX_RATE: Decimal = Decimal::from_parts(19, 0, 0, false, 2);

/// Money summary of a cart, also sent as the order header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CartTotals {
    /// Σ price × quantity over the lines, plus IVA. Lines without an embedded
    /// product count as price zero. No discounts are applied.
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let subtotal: Decimal = lines.iter().map(line_amount).sum();
        let discount = Decimal::ZERO;
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal,
            discount,
            tax,
            total: subtotal + tax - discount,
        }
    }
}

/// Unit price × quantity for one cart line.
pub fn line_amount(line: &CartLine) -> Decimal {
    let price = line.product.as_ref().map(|p| p.price).unwrap_or_default();
    price * Decimal::from(line.quantity)
}

/// Format as whole pesos with `.` thousands separators: `$12.990`.
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("$-{grouped}")
    } else {
        format!("${grouped}")
    }
}
