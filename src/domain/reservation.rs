// ==========================================
// 预订改期引擎 - 预订 / 产品领域模型
// ==========================================
// 红线: 预订与产品是调用方传入的只读输入，引擎不做任何回写
// ==========================================

use crate::domain::types::ProductType;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// PartyComposition - 出行人构成
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyComposition {
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32, // 婴儿不计价
}

impl PartyComposition {
    pub fn new(adults: u32, children: u32, infants: u32) -> Self {
        Self {
            adults,
            children,
            infants,
        }
    }

    pub fn has_children(&self) -> bool {
        self.children > 0
    }

    pub fn travelers(&self) -> u32 {
        self.adults + self.children + self.infants
    }
}

// ==========================================
// Reservation - 预订
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    #[serde(flatten)]
    pub party: PartyComposition,
    pub travel_date: NaiveDate,        // 当前出行日期
    pub price_per_person: Decimal,     // 当前成人单价
    #[serde(default)]
    pub price_per_kid: Option<Decimal>,// 当前儿童单价
    pub total_price: Decimal,          // 当前总价
    pub currency: String,
}

// ==========================================
// Product - 产品
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reservation_wire_format() {
        let raw = json!({
            "id": "R-100",
            "adults": 2,
            "children": 1,
            "travelDate": "2030-07-10",
            "pricePerPerson": "5000",
            "pricePerKid": "2500",
            "totalPrice": "12500",
            "currency": "MXN"
        });

        let reservation: Reservation = serde_json::from_value(raw).unwrap();
        assert_eq!(reservation.party, PartyComposition::new(2, 1, 0));
        assert_eq!(reservation.party.travelers(), 3);
        assert_eq!(reservation.total_price, Decimal::new(12500, 0));
        assert_eq!(reservation.price_per_kid, Some(Decimal::new(2500, 0)));
    }

    #[test]
    fn test_product_type_field() {
        let product: Product =
            serde_json::from_value(json!({"id": "P-1", "name": "Maya", "type": "circuit"})).unwrap();
        assert_eq!(product.product_type, ProductType::Circuit);
    }
}
