//! 機台適用性判定

use plan_core::{Item, Machine};

/// 適用性判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// 可生產
    Eligible {
        /// 需更換的刀具數
        tool_changes_needed: u32,
    },
    /// 機台缺少必要刀具
    MissingTools(Vec<String>),
    /// 換刀後刀具數超過刀庫容量
    MagazineOverflow {
        /// 換刀後預計裝載刀具數
        resident: usize,
        /// 刀庫容量
        capacity: u32,
    },
}

impl Eligibility {
    /// 檢查是否可生產
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible { .. })
    }
}

/// 機台適用性過濾器
pub struct EligibilityFilter;

impl EligibilityFilter {
    /// 需更換的刀具數 = |所需刀具 - 目前裝載刀具|
    pub fn tool_changes_needed(item: &Item, machine: &Machine) -> u32 {
        let missing = item
            .required_tools
            .iter()
            .filter(|tool| !machine.has_resident_tool(tool))
            .count();
        u32::try_from(missing).unwrap_or(u32::MAX)
    }

    /// 判定機台是否可生產該物料
    ///
    /// 條件：
    /// 1. 所需刀具皆在機台可用刀具中
    /// 2. |目前裝載| - 換刀數 + |所需刀具| <= 刀庫容量
    pub fn check(item: &Item, machine: &Machine) -> Eligibility {
        let missing: Vec<String> = item
            .required_tools
            .iter()
            .filter(|tool| !machine.available_tools.contains(*tool))
            .cloned()
            .collect();

        if !missing.is_empty() {
            return Eligibility::MissingTools(missing);
        }

        let tool_changes_needed = Self::tool_changes_needed(item, machine);

        // 簡化模型：不需換的刀具留在刀庫中，換入的刀具取代相同數量的舊刀
        let resident = (machine.current_tools.len() + item.required_tools.len())
            .saturating_sub(tool_changes_needed as usize);

        if resident > machine.magazine_capacity as usize {
            return Eligibility::MagazineOverflow {
                resident,
                capacity: machine.magazine_capacity,
            };
        }

        Eligibility::Eligible {
            tool_changes_needed,
        }
    }

    /// 篩選可生產該物料的機台（保持宣告順序）
    pub fn eligible_machines<'a>(
        item: &Item,
        machines: &'a [Machine],
    ) -> Vec<(&'a Machine, u32)> {
        machines
            .iter()
            .filter_map(|machine| match Self::check(item, machine) {
                Eligibility::Eligible {
                    tool_changes_needed,
                } => Some((machine, tool_changes_needed)),
                rejected => {
                    tracing::trace!(
                        "機台 {} 不適用於物料 {}: {:?}",
                        machine.id,
                        item.id,
                        rejected
                    );
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn tools(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn make_item(required: &[&str]) -> Item {
        Item::new("ATL-2043".to_string(), Decimal::from(1380), Decimal::from(450))
            .with_required_tools(tools(required))
    }

    fn make_machine(capacity: u32, available: &[&str], current: &[&str]) -> Machine {
        Machine::new("M-001".to_string(), Decimal::from(85), capacity)
            .with_available_tools(tools(available))
            .with_current_tools(tools(current))
    }

    #[test]
    fn test_all_tools_resident() {
        let item = make_item(&["T-001", "T-003", "T-007"]);
        let machine = make_machine(12, &["T-001", "T-003", "T-005", "T-007"], &["T-001", "T-003", "T-007"]);

        assert_eq!(
            EligibilityFilter::check(&item, &machine),
            Eligibility::Eligible {
                tool_changes_needed: 0
            }
        );
    }

    #[test]
    fn test_tool_changes_counted() {
        let item = make_item(&["T-001", "T-005", "T-009"]);
        let machine = make_machine(
            12,
            &["T-001", "T-003", "T-005", "T-007", "T-009"],
            &["T-001", "T-003", "T-007"],
        );

        assert_eq!(EligibilityFilter::tool_changes_needed(&item, &machine), 2);
        assert!(EligibilityFilter::check(&item, &machine).is_eligible());
    }

    #[test]
    fn test_missing_tool_not_eligible() {
        let item = make_item(&["T-003", "T-006", "T-010"]);
        let machine = make_machine(8, &["T-002", "T-004", "T-006", "T-008", "T-010"], &["T-002"]);

        assert_eq!(
            EligibilityFilter::check(&item, &machine),
            Eligibility::MissingTools(vec!["T-003".to_string()])
        );
    }

    #[test]
    fn test_magazine_overflow() {
        // 裝載 3 把，需要 3 把且皆需換入：3 - 3 + 3 = 3 <= 3 可生產
        let item = make_item(&["T-004", "T-005", "T-006"]);
        let full = make_machine(
            3,
            &["T-001", "T-002", "T-003", "T-004", "T-005", "T-006"],
            &["T-001", "T-002", "T-003"],
        );
        assert!(EligibilityFilter::check(&item, &full).is_eligible());

        // 裝載 3 把，需要其中 2 把加 1 把新刀：3 - 1 + 3 = 5 > 4
        let item = make_item(&["T-001", "T-002", "T-004"]);
        let tight = make_machine(
            4,
            &["T-001", "T-002", "T-003", "T-004"],
            &["T-001", "T-002", "T-003"],
        );
        assert_eq!(
            EligibilityFilter::check(&item, &tight),
            Eligibility::MagazineOverflow {
                resident: 5,
                capacity: 4
            }
        );
    }

    #[test]
    fn test_eligible_machines_keep_declaration_order() {
        let item = make_item(&["T-001"]);
        let machines = vec![
            make_machine(4, &["T-001"], &[]),
            Machine::new("M-002".to_string(), Decimal::from(70), 4)
                .with_available_tools(tools(&["T-002"])),
            Machine::new("M-003".to_string(), Decimal::from(90), 4)
                .with_available_tools(tools(&["T-001", "T-002"]))
                .with_current_tools(tools(&["T-001"])),
        ];

        let eligible = EligibilityFilter::eligible_machines(&item, &machines);
        let ids: Vec<_> = eligible.iter().map(|(m, _)| m.id.as_str()).collect();

        assert_eq!(ids, vec!["M-001", "M-003"]);
        assert_eq!(eligible[0].1, 1);
        assert_eq!(eligible[1].1, 0);
    }

    #[test]
    fn test_item_without_tools_fits_anywhere() {
        let item = make_item(&[]);
        let machine = make_machine(1, &["T-001"], &["T-001"]);

        assert_eq!(
            EligibilityFilter::check(&item, &machine),
            Eligibility::Eligible {
                tool_changes_needed: 0
            }
        );
    }
}
