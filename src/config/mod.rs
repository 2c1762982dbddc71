// ==========================================
// 培训管理系统 - 配置层
// ==========================================
// 职责: 导入配置加载; 配置值不可变,显式注入各组件
// ==========================================

pub mod import_config;

pub use import_config::ImportConfig;
