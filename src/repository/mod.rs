// ==========================================
// 预订改期引擎 - 外部协作接口层
// ==========================================
// 红线: 这里只定义接口与请求结构，不含业务逻辑
// ==========================================
// 职责: 季节查询、改期提交两个外部调用的边界
// ==========================================

pub mod error;
pub mod reservation_gateway;
pub mod season_catalog;

// 重导出核心接口
pub use error::{GatewayError, GatewayResult};
pub use reservation_gateway::{DateChangeRequest, ReservationDateChanger};
pub use season_catalog::{InMemorySeasonCatalog, SeasonCatalog};
