// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用例模块
///
/// 每个用例代表一个完整的业务流程：
/// - 批量检查（audit_use_case）
/// - 站点列表提取（extract_sites_use_case）
/// - 摘要重建（summary_use_case）
pub mod audit_use_case;
pub mod extract_sites_use_case;
pub mod summary_use_case;
