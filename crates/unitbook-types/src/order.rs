//! Order types for the UnitBook matching engine.
//!
//! Every order is for exactly one unit of the asset. A market order has no
//! price; a limit order always has one. The split is carried by
//! [`OrderKind`], so a priced market order cannot be constructed.
//!
//! [`OrderRequest`] is the loosely-typed wire form (type tag plus optional
//! price) and must go through `TryFrom` before it reaches the book.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, Timestamp, UnitbookError};

/// Which side of the book this order is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// The side an order of this side executes against.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// The type tag of an order, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderType {
    Limit,
    Market,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limit => write!(f, "LIMIT"),
            Self::Market => write!(f, "MARKET"),
        }
    }
}

/// Market or limit, with the limit price where one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    Market,
    Limit { price: Decimal },
}

/// A one-unit order as fed into the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub placed_at: Timestamp,
    pub side: OrderSide,
    pub kind: OrderKind,
}

impl Order {
    #[must_use]
    pub fn market(placed_at: Timestamp, side: OrderSide) -> Self {
        Self {
            placed_at,
            side,
            kind: OrderKind::Market,
        }
    }

    #[must_use]
    pub fn limit(placed_at: Timestamp, side: OrderSide, price: Decimal) -> Self {
        Self {
            placed_at,
            side,
            kind: OrderKind::Limit { price },
        }
    }

    #[must_use]
    pub fn order_type(&self) -> OrderType {
        match self.kind {
            OrderKind::Market => OrderType::Market,
            OrderKind::Limit { .. } => OrderType::Limit,
        }
    }

    /// Limit price, or `None` for a market order.
    #[must_use]
    pub fn price(&self) -> Option<Decimal> {
        match self.kind {
            OrderKind::Market => None,
            OrderKind::Limit { price } => Some(price),
        }
    }

    #[must_use]
    pub fn is_market(&self) -> bool {
        matches!(self.kind, OrderKind::Market)
    }

    /// Check the value-level invariants the type cannot express.
    ///
    /// # Errors
    /// `NonPositivePrice` if a limit order is priced at or below zero.
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            OrderKind::Limit { price } if price <= Decimal::ZERO => {
                Err(UnitbookError::NonPositivePrice(price))
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            OrderKind::Market => write!(f, "MARKET {} ({})", self.side, self.placed_at),
            OrderKind::Limit { price } => {
                write!(f, "LIMIT {} @ {} ({})", self.side, price, self.placed_at)
            }
        }
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// Limit order priced in cents, e.g. `dummy_limit(3, OrderSide::Buy, 7550)`.
    pub fn dummy_limit(placed_at: u64, side: OrderSide, price_cents: i64) -> Self {
        Self::limit(
            Timestamp(placed_at),
            side,
            Decimal::new(price_cents, crate::constants::PRICE_SCALE),
        )
    }

    pub fn dummy_market(placed_at: u64, side: OrderSide) -> Self {
        Self::market(Timestamp(placed_at), side)
    }
}

// ---------------------------------------------------------------------------
// OrderRequest: loosely-typed wire form
// ---------------------------------------------------------------------------

/// An order as it arrives from outside (JSON replay files, hosts).
///
/// Type and price are independent fields here; the `TryFrom` conversion
/// rejects the combinations [`Order`] cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub placed_at: Timestamp,
    pub order_type: OrderType,
    pub side: OrderSide,
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl TryFrom<OrderRequest> for Order {
    type Error = UnitbookError;

    fn try_from(req: OrderRequest) -> Result<Self> {
        let order = match (req.order_type, req.price) {
            (OrderType::Market, None) => Order::market(req.placed_at, req.side),
            (OrderType::Limit, Some(price)) => Order::limit(req.placed_at, req.side, price),
            (OrderType::Market, Some(price)) => {
                return Err(UnitbookError::InvalidOrder {
                    reason: format!("market order at {} carries a price ({price})", req.placed_at),
                });
            }
            (OrderType::Limit, None) => {
                return Err(UnitbookError::InvalidOrder {
                    reason: format!("limit order at {} has no price", req.placed_at),
                });
            }
        };
        order.validate()?;
        Ok(order)
    }
}

impl From<Order> for OrderRequest {
    fn from(order: Order) -> Self {
        Self {
            placed_at: order.placed_at,
            order_type: order.order_type(),
            side: order.side,
            price: order.price(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn limit_order_exposes_price() {
        let order = Order::limit(Timestamp(1), OrderSide::Buy, dec(7500));
        assert_eq!(order.price(), Some(dec(7500)));
        assert_eq!(order.order_type(), OrderType::Limit);
        assert!(!order.is_market());
    }

    #[test]
    fn market_order_has_no_price() {
        let order = Order::market(Timestamp(2), OrderSide::Sell);
        assert_eq!(order.price(), None);
        assert_eq!(order.order_type(), OrderType::Market);
        assert!(order.is_market());
    }

    #[test]
    fn dummy_constructors_use_cent_prices() {
        let limit = Order::dummy_limit(3, OrderSide::Buy, 7550);
        assert_eq!(limit, Order::limit(Timestamp(3), OrderSide::Buy, dec(7550)));
        let market = Order::dummy_market(4, OrderSide::Sell);
        assert_eq!(market, Order::market(Timestamp(4), OrderSide::Sell));
    }

    #[test]
    fn order_side_opposite() {
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert_eq!(OrderSide::Sell.opposite(), OrderSide::Buy);
    }

    #[test]
    fn order_display() {
        assert_eq!(
            format!("{}", Order::limit(Timestamp(1), OrderSide::Buy, dec(7500))),
            "LIMIT BUY @ 75.00 (t=1)"
        );
        assert_eq!(
            format!("{}", Order::market(Timestamp(4), OrderSide::Sell)),
            "MARKET SELL (t=4)"
        );
    }

    #[test]
    fn validate_rejects_non_positive_limit_price() {
        let zero = Order::limit(Timestamp(1), OrderSide::Buy, Decimal::ZERO);
        assert!(matches!(
            zero.validate(),
            Err(UnitbookError::NonPositivePrice(_))
        ));
        let negative = Order::limit(Timestamp(1), OrderSide::Sell, dec(-100));
        assert!(negative.validate().is_err());
        assert!(Order::market(Timestamp(1), OrderSide::Buy).validate().is_ok());
    }

    #[test]
    fn request_limit_without_price_rejected() {
        let req = OrderRequest {
            placed_at: Timestamp(1),
            order_type: OrderType::Limit,
            side: OrderSide::Buy,
            price: None,
        };
        let err = Order::try_from(req).unwrap_err();
        assert!(matches!(err, UnitbookError::InvalidOrder { .. }));
    }

    #[test]
    fn request_market_with_price_rejected() {
        let req = OrderRequest {
            placed_at: Timestamp(1),
            order_type: OrderType::Market,
            side: OrderSide::Sell,
            price: Some(dec(7400)),
        };
        let err = Order::try_from(req).unwrap_err();
        assert!(format!("{err}").contains("carries a price"));
    }

    #[test]
    fn request_converts_both_ways() {
        let order = Order::limit(Timestamp(9), OrderSide::Sell, dec(7612));
        let req = OrderRequest::from(order);
        assert_eq!(req.price, Some(dec(7612)));
        assert_eq!(Order::try_from(req).unwrap(), order);
    }

    #[test]
    fn request_parses_from_json_without_price() {
        let req: OrderRequest = serde_json::from_str(
            r#"{"placed_at": 3, "order_type": "Market", "side": "Buy"}"#,
        )
        .unwrap();
        let order = Order::try_from(req).unwrap();
        assert_eq!(order, Order::market(Timestamp(3), OrderSide::Buy));
    }

    #[test]
    fn order_json_shape() {
        let json = serde_json::to_value(Order::limit(Timestamp(1), OrderSide::Buy, dec(7500))).unwrap();
        assert_eq!(json["kind"]["type"], "LIMIT");
        assert_eq!(json["kind"]["price"], "75.00");
        assert_eq!(json["placed_at"], 1);
    }
}
