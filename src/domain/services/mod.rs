// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 检查清单服务（checklist_service）：对已解析的页面执行十项检查
/// - 统计服务（statistics_service）：基于结构化结果计算汇总统计
pub mod checklist_service;
pub mod statistics_service;
