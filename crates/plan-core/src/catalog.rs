//! 物料/機台目錄

use serde::{Deserialize, Serialize};

use crate::{Item, Machine, Tool};

/// 排程輸入目錄
///
/// 物料與機台之間只透過ID關聯，每次排程都由目錄重新建立
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// 待生產物料（保持輸入順序）
    pub items: Vec<Item>,

    /// 候選機台（保持宣告順序，同分時前者優先）
    pub machines: Vec<Machine>,

    /// 刀具（僅供展示層使用）
    #[serde(default)]
    pub tools: Vec<Tool>,
}

impl Catalog {
    /// 創建新的目錄
    pub fn new(items: Vec<Item>, machines: Vec<Machine>) -> Self {
        Self {
            items,
            machines,
            tools: Vec::new(),
        }
    }

    /// 建構器模式：設置刀具
    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }

    /// 從 JSON 載入目錄
    ///
    /// 刀具資料在此驗證；物料與機台由排程計算逐筆驗證，無效者排除而不中斷
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        for tool in &catalog.tools {
            tool.validate()?;
        }
        Ok(catalog)
    }

    /// 輸出為 JSON
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 依ID查找物料
    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// 依ID查找機台
    pub fn machine(&self, machine_id: &str) -> Option<&Machine> {
        self.machines.iter().find(|m| m.id == machine_id)
    }

    /// 依ID查找刀具
    pub fn tool(&self, tool_id: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.id == tool_id)
    }

    /// 檢查目錄是否為空
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
