// ==========================================
// 预订改期引擎 - 季节价格计算引擎
// ==========================================
// 职责: 按所选季节与出行人构成计算新总价，并校验新日期
// 输入: Season + PartyComposition + 新日期 + 今天
// 输出: SelectedDateData 或 DateValidationError
// ==========================================
// 定价规则:
// 1) 成人单价 = season.adult_base_price
// 2) 儿童单价 = 第一个儿童价格区间的价格；无区间时 = 成人单价 × 兜底比例
// 3) 新总价 = 成人数 × 成人单价 + 儿童数 × 儿童单价（婴儿不计价）
// 4) 金额溢出 Decimal 范围时拒绝该季节，不做截断
// ==========================================

use crate::config::DateChangePolicyConfig;
use crate::domain::money::round_currency;
use crate::domain::reservation::PartyComposition;
use crate::domain::season::Season;
use crate::domain::selection::SelectedDateData;
use crate::i18n::{t, t_with_args};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

/// 新日期校验失败
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateValidationError {
    /// 新日期必须晚于今天
    #[error("新日期必须晚于今天: date={date}, today={today}")]
    PastDate { date: NaiveDate, today: NaiveDate },

    /// 新日期必须落在季节区间内
    #[error("新日期不在季节区间内: date={date}, range={start}..{end}")]
    OutOfSeason {
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// 季节价格与人数相乘后超出金额范围
    #[error("季节价格超出可计算范围: season_id={season_id}")]
    PriceOutOfRange { season_id: String },
}

impl DateValidationError {
    /// 区间越界时的可选日期范围（用于提示）
    pub fn valid_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            DateValidationError::OutOfSeason { start, end, .. } => Some((*start, *end)),
            DateValidationError::PastDate { .. } | DateValidationError::PriceOutOfRange { .. } => {
                None
            }
        }
    }

    /// 界面提示文案（本地化）
    pub fn message(&self) -> String {
        match self {
            DateValidationError::PastDate { .. } => t("validation.past_date"),
            DateValidationError::OutOfSeason { start, end, .. } => {
                let start = start.to_string();
                let end = end.to_string();
                t_with_args(
                    "validation.out_of_season",
                    &[("start", start.as_str()), ("end", end.as_str())],
                )
            }
            DateValidationError::PriceOutOfRange { .. } => t("validation.price_out_of_range"),
        }
    }
}

/// 不含日期的季节报价（用于季节列表展示）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonQuote {
    pub adult_unit_price: Decimal,
    pub child_unit_price: Decimal,
    pub total_price: Decimal,
}

// ==========================================
// SeasonPriceCalculator - 季节价格计算器
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
pub struct SeasonPriceCalculator {
    child_price_fallback_ratio: Decimal,
}

impl SeasonPriceCalculator {
    /// 使用默认策略创建
    pub fn new() -> Self {
        Self::with_policy(&DateChangePolicyConfig::default())
    }

    pub fn with_policy(policy: &DateChangePolicyConfig) -> Self {
        Self {
            child_price_fallback_ratio: policy.child_price_fallback_ratio,
        }
    }

    // ==========================================
    // 单价与总价
    // ==========================================

    /// 儿童单价
    ///
    /// 多个区间时只取第一个区间，不按年龄匹配
    pub fn child_unit_price(&self, season: &Season) -> Result<Decimal, DateValidationError> {
        match season.first_child_range() {
            Some(range) => Ok(range.price),
            None => season
                .adult_base_price
                .checked_mul(self.child_price_fallback_ratio)
                .map(round_currency)
                .ok_or_else(|| out_of_range(season)),
        }
    }

    /// 报价（不校验日期）
    pub fn quote(
        &self,
        season: &Season,
        party: &PartyComposition,
    ) -> Result<SeasonQuote, DateValidationError> {
        let adult_unit_price = season.adult_base_price;
        let child_unit_price = self.child_unit_price(season)?;
        let total_price = Decimal::from(party.adults)
            .checked_mul(adult_unit_price)
            .zip(Decimal::from(party.children).checked_mul(child_unit_price))
            .and_then(|(adults, children)| adults.checked_add(children))
            .ok_or_else(|| out_of_range(season))?;

        Ok(SeasonQuote {
            adult_unit_price,
            child_unit_price,
            total_price,
        })
    }

    // ==========================================
    // 日期校验
    // ==========================================

    /// 校验新日期
    ///
    /// 顺序: 先校验是否晚于今天（仅比较日期），再校验季节区间（含首尾）
    pub fn validate_date(
        &self,
        season: &Season,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), DateValidationError> {
        if date <= today {
            return Err(DateValidationError::PastDate { date, today });
        }
        if !season.contains(date) {
            return Err(DateValidationError::OutOfSeason {
                date,
                start: season.start_date,
                end: season.end_date,
            });
        }
        Ok(())
    }

    /// 日期选择器的可选范围: [max(今天+1, start), end]
    ///
    /// 季节已整体过去时返回 None
    pub fn date_bounds(&self, season: &Season, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let tomorrow = today.checked_add_days(Days::new(1))?;
        let earliest = tomorrow.max(season.start_date);
        if earliest > season.end_date {
            None
        } else {
            Some((earliest, season.end_date))
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算新日期的选择结果
    #[instrument(skip(self, season, party), fields(season_id = %season.id))]
    pub fn calculate(
        &self,
        season: &Season,
        party: &PartyComposition,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<SelectedDateData, DateValidationError> {
        if let Err(e) = self.validate_date(season, date, today) {
            tracing::debug!(error = %e, "新日期校验未通过");
            return Err(e);
        }

        let quote = match self.quote(season, party) {
            Ok(quote) => quote,
            Err(e) => {
                tracing::warn!(error = %e, "季节报价溢出");
                return Err(e);
            }
        };
        tracing::debug!(
            adult = %quote.adult_unit_price,
            child = %quote.child_unit_price,
            total = %quote.total_price,
            "新日期价格已计算"
        );

        Ok(SelectedDateData {
            date,
            price_per_person: quote.adult_unit_price,
            price_per_kid: quote.child_unit_price,
            new_total_price: quote.total_price,
            season_id: Some(season.id.clone()),
            season_name: Some(season.name.clone()),
            price_id: season.price_id.clone(),
        })
    }
}

fn out_of_range(season: &Season) -> DateValidationError {
    DateValidationError::PriceOutOfRange {
        season_id: season.id.clone(),
    }
}

impl Default for SeasonPriceCalculator {
    fn default() -> Self {
        Self::new()
    }
}
