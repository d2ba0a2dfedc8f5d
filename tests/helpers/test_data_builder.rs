// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use reservation_date_change::domain::{
    ChildPriceRange, DeadlinePolicy, Installment, InstallmentStatus, PartyComposition,
    PaymentPlan, PlanType, Product, ProductType, Reservation, Season,
};
use rust_decimal::Decimal;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn money(amount: i64) -> Decimal {
    Decimal::new(amount, 0)
}

pub fn product() -> Product {
    Product {
        id: "P-CANCUN".to_string(),
        name: "Cancún 5 días".to_string(),
        product_type: ProductType::Package,
    }
}

// ==========================================
// Reservation 构建器
// ==========================================

pub struct ReservationBuilder {
    party: PartyComposition,
    travel_date: NaiveDate,
    price_per_person: Decimal,
    price_per_kid: Option<Decimal>,
    total_price: Option<Decimal>,
}

impl ReservationBuilder {
    pub fn new() -> Self {
        Self {
            party: PartyComposition::new(2, 0, 0),
            travel_date: date(2030, 7, 15),
            price_per_person: money(5000),
            price_per_kid: None,
            total_price: None,
        }
    }

    pub fn party(mut self, adults: u32, children: u32, infants: u32) -> Self {
        self.party = PartyComposition::new(adults, children, infants);
        self
    }

    pub fn travel_date(mut self, travel_date: NaiveDate) -> Self {
        self.travel_date = travel_date;
        self
    }

    pub fn prices(mut self, per_person: i64, per_kid: Option<i64>) -> Self {
        self.price_per_person = money(per_person);
        self.price_per_kid = per_kid.map(money);
        self
    }

    pub fn total(mut self, total: i64) -> Self {
        self.total_price = Some(money(total));
        self
    }

    pub fn build(self) -> Reservation {
        // 未指定总价时按单价推算
        let total_price = self.total_price.unwrap_or_else(|| {
            self.price_per_person * Decimal::from(self.party.adults)
                + self.price_per_kid.unwrap_or_default() * Decimal::from(self.party.children)
        });
        Reservation {
            id: "R-100".to_string(),
            party: self.party,
            travel_date: self.travel_date,
            price_per_person: self.price_per_person,
            price_per_kid: self.price_per_kid,
            total_price,
            currency: "MXN".to_string(),
        }
    }
}

// ==========================================
// PaymentPlan 构建器
// ==========================================

pub struct PaymentPlanBuilder {
    plan_type: PlanType,
    allows_date_change: Option<bool>,
    deadline_days: u32,
    installments: Vec<Installment>,
}

impl PaymentPlanBuilder {
    pub fn cash() -> Self {
        Self {
            plan_type: PlanType::Cash,
            allows_date_change: Some(true),
            deadline_days: 0,
            installments: Vec::new(),
        }
    }

    pub fn installments(statuses: &[InstallmentStatus]) -> Self {
        let installments = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| Installment {
                number: i as u32 + 1,
                amount: money(2500),
                due_date: date(2030, 1 + i as u32, 10),
                status: *status,
            })
            .collect();
        Self {
            plan_type: PlanType::Installments,
            allows_date_change: Some(true),
            deadline_days: 0,
            installments,
        }
    }

    pub fn allows_date_change(mut self, allows: Option<bool>) -> Self {
        self.allows_date_change = allows;
        self
    }

    pub fn deadline_days(mut self, days: u32) -> Self {
        self.deadline_days = days;
        self
    }

    pub fn build(self) -> PaymentPlan {
        PaymentPlan {
            id: "PP-100".to_string(),
            plan_type: self.plan_type,
            total_cost: money(12500),
            currency: "MXN".to_string(),
            allows_date_change: self.allows_date_change,
            change_deadline: DeadlinePolicy::days_before(self.deadline_days),
            installments: self.installments,
        }
    }
}

// ==========================================
// Season 构建器
// ==========================================

pub struct SeasonBuilder {
    season: Season,
}

impl SeasonBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            season: Season {
                id: id.to_string(),
                name: format!("Temporada {}", id),
                start_date: date(2030, 7, 1),
                end_date: date(2030, 8, 31),
                is_active: true,
                adult_base_price: money(5000),
                child_prices: Vec::new(),
                price_id: None,
            },
        }
    }

    pub fn range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.season.start_date = start;
        self.season.end_date = end;
        self
    }

    pub fn adult_price(mut self, price: i64) -> Self {
        self.season.adult_base_price = money(price);
        self
    }

    pub fn adult_price_exact(mut self, price: Decimal) -> Self {
        self.season.adult_base_price = price;
        self
    }

    pub fn child_price(mut self, price: i64) -> Self {
        self.season.child_prices.push(ChildPriceRange {
            name: format!("Niños {}", self.season.child_prices.len() + 1),
            min_age: 3,
            max_age: 11,
            price: money(price),
        });
        self
    }

    pub fn inactive(mut self) -> Self {
        self.season.is_active = false;
        self
    }

    pub fn price_id(mut self, price_id: &str) -> Self {
        self.season.price_id = Some(price_id.to_string());
        self
    }

    pub fn build(self) -> Season {
        self.season
    }
}
