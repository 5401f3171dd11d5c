//! # prodplan
//!
//! 生產排程優化：為每個物料選擇機台、計算經濟批量與各項成本
//!
//! ```no_run
//! use prodplan::{Catalog, Objective, PlanCalculator, PlannerConfig};
//!
//! let catalog = Catalog::from_json_str("{\"items\": [], \"machines\": []}").unwrap();
//! let result = PlanCalculator::new(PlannerConfig::default())
//!     .calculate(&catalog, Objective::Cost, 4)
//!     .unwrap();
//! println!("{}", result.to_json_string().unwrap());
//! ```

pub mod logging;

pub use plan_calc;
pub use plan_core;
pub use plan_optimizer;

pub use plan_calc::{PlanCalculator, PlanResult, PlanSummary, PlanWarning, WarningKind, WarningSeverity};
pub use plan_core::{
    Catalog, Item, LotSizingRule, Machine, MachineUtilization, Objective, PlanEntry, PlanEntryStatus, PlanError,
    PlannerConfig, Priority, Tool,
};
pub use plan_optimizer::{
    ComparisonResult, LotRuleComparator, LotRuleOutcome, ScenarioComparator, ScenarioOutcome,
};
pub use rust_decimal::Decimal;
