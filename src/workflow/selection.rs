// ==========================================
// 预订改期引擎 - 季节选择子状态
// ==========================================
// 职责: SelectingDate 步骤内的季节加载状态、所选季节、所选日期
// 规则:
// - 外部返回的季节只保留 is_active = true 的
// - 过滤后为空是独立状态（Empty），区别于加载失败（Failed）
// - 切换季节总是清空已选日期，必须按新季节区间重新校验
// ==========================================

use crate::domain::season::Season;
use crate::engine::season_price::DateValidationError;
use crate::repository::error::{GatewayError, GatewayResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 季节列表加载状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeasonLoadState {
    Idle,
    Loading,
    Loaded { seasons: Vec<Season> },
    Empty,
    Failed { message: String },
}

impl SeasonLoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SeasonLoadState::Loading)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonSelection {
    load_state: SeasonLoadState,
    selected_season_id: Option<String>,
    chosen_date: Option<NaiveDate>,
    validation_error: Option<DateValidationError>,
}

impl SeasonSelection {
    pub fn new() -> Self {
        Self {
            load_state: SeasonLoadState::Idle,
            selected_season_id: None,
            chosen_date: None,
            validation_error: None,
        }
    }

    pub fn load_state(&self) -> &SeasonLoadState {
        &self.load_state
    }

    /// 可选（已激活）季节
    pub fn seasons(&self) -> &[Season] {
        match &self.load_state {
            SeasonLoadState::Loaded { seasons } => seasons,
            _ => &[],
        }
    }

    pub fn selected_season(&self) -> Option<&Season> {
        let id = self.selected_season_id.as_deref()?;
        self.seasons().iter().find(|s| s.id == id)
    }

    pub fn chosen_date(&self) -> Option<NaiveDate> {
        self.chosen_date
    }

    pub fn validation_error(&self) -> Option<&DateValidationError> {
        self.validation_error.as_ref()
    }

    // ==========================================
    // 加载
    // ==========================================

    /// 标记开始加载
    ///
    /// 已在加载中时返回 false，调用方不得再发请求
    pub fn begin_load(&mut self) -> bool {
        if self.load_state.is_loading() {
            return false;
        }
        self.load_state = SeasonLoadState::Loading;
        true
    }

    /// 记录加载结果
    pub fn finish_load(
        &mut self,
        result: GatewayResult<Vec<Season>>,
        failure_message: impl FnOnce(&GatewayError) -> String,
    ) {
        self.load_state = match result {
            Ok(seasons) => {
                let active: Vec<Season> = seasons.into_iter().filter(|s| s.is_active).collect();
                if active.is_empty() {
                    SeasonLoadState::Empty
                } else {
                    SeasonLoadState::Loaded { seasons: active }
                }
            }
            Err(e) => SeasonLoadState::Failed {
                message: failure_message(&e),
            },
        };

        // 原选择不在新列表中时一并清空
        if self.selected_season().is_none() {
            self.selected_season_id = None;
            self.chosen_date = None;
            self.validation_error = None;
        }
    }

    // ==========================================
    // 选择
    // ==========================================

    /// 选择季节；返回 false 表示该季节不在可选列表中
    pub fn select_season(&mut self, season_id: &str) -> bool {
        if !self.seasons().iter().any(|s| s.id == season_id) {
            return false;
        }
        self.selected_season_id = Some(season_id.to_string());
        self.chosen_date = None;
        self.validation_error = None;
        true
    }

    /// 记录日期校验结果
    pub fn record_date(&mut self, date: NaiveDate, outcome: Result<(), DateValidationError>) {
        match outcome {
            Ok(()) => {
                self.chosen_date = Some(date);
                self.validation_error = None;
            }
            Err(e) => {
                self.chosen_date = None;
                self.validation_error = Some(e);
            }
        }
    }
}

impl Default for SeasonSelection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn season(id: &str, active: bool) -> Season {
        Season {
            id: id.to_string(),
            name: id.to_string(),
            start_date: NaiveDate::from_ymd_opt(2030, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2030, 8, 31).unwrap(),
            is_active: active,
            adult_base_price: Decimal::new(5000, 0),
            child_prices: vec![],
            price_id: None,
        }
    }

    #[test]
    fn test_inactive_seasons_are_filtered() {
        let mut selection = SeasonSelection::new();
        assert!(selection.begin_load());
        assert!(!selection.begin_load());

        selection.finish_load(Ok(vec![season("A", true), season("B", false)]), |e| e.to_string());
        assert_eq!(selection.seasons().len(), 1);
        assert!(!selection.select_season("B"));
        assert!(selection.select_season("A"));
    }

    #[test]
    fn test_empty_differs_from_failure() {
        let mut selection = SeasonSelection::new();
        selection.begin_load();
        selection.finish_load(Ok(vec![season("B", false)]), |e| e.to_string());
        assert_eq!(selection.load_state(), &SeasonLoadState::Empty);

        selection.begin_load();
        selection.finish_load(Err(GatewayError::rejected("boom")), |e| format!("failed: {}", e));
        assert!(matches!(
            selection.load_state(),
            SeasonLoadState::Failed { message } if message.contains("boom")
        ));
    }

    #[test]
    fn test_switching_season_clears_date() {
        let mut selection = SeasonSelection::new();
        selection.begin_load();
        selection.finish_load(Ok(vec![season("A", true), season("C", true)]), |e| e.to_string());

        selection.select_season("A");
        let date = NaiveDate::from_ymd_opt(2030, 7, 10).unwrap();
        selection.record_date(date, Ok(()));
        assert_eq!(selection.chosen_date(), Some(date));

        selection.select_season("C");
        assert_eq!(selection.chosen_date(), None);
        assert!(selection.validation_error().is_none());
    }
}
