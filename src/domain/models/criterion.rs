// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 合规检查项
///
/// 固定的十个检查项，声明顺序即报告中的展示顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKey {
    /// 隐私政策
    PrivacyPolicy,
    /// 个人数据处理同意复选框
    PdConsentCheckboxes,
    /// 复选框默认未勾选
    CheckboxNotChecked,
    /// 同意记录（日志）
    ConsentLogging,
    /// Cookie 弹窗
    CookiePopup,
    /// Cookie 分类
    CookieCategories,
    /// 个人数据存储在俄罗斯境内
    PdStorageRussia,
    /// 在 RKN 登记
    RknRegistration,
    /// 数据主体联系邮箱
    DataSubjectEmail,
    /// 第三方服务审计
    ThirdPartyAudit,
}

impl CriterionKey {
    /// 全部检查项，按展示顺序排列
    pub const ALL: [CriterionKey; 10] = [
        CriterionKey::PrivacyPolicy,
        CriterionKey::PdConsentCheckboxes,
        CriterionKey::CheckboxNotChecked,
        CriterionKey::ConsentLogging,
        CriterionKey::CookiePopup,
        CriterionKey::CookieCategories,
        CriterionKey::PdStorageRussia,
        CriterionKey::RknRegistration,
        CriterionKey::DataSubjectEmail,
        CriterionKey::ThirdPartyAudit,
    ];

    /// 检查项总数
    pub const COUNT: usize = Self::ALL.len();

    /// 机器可读的标识符
    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionKey::PrivacyPolicy => "privacy_policy",
            CriterionKey::PdConsentCheckboxes => "pd_consent_checkboxes",
            CriterionKey::CheckboxNotChecked => "checkbox_not_checked",
            CriterionKey::ConsentLogging => "consent_logging",
            CriterionKey::CookiePopup => "cookie_popup",
            CriterionKey::CookieCategories => "cookie_categories",
            CriterionKey::PdStorageRussia => "pd_storage_russia",
            CriterionKey::RknRegistration => "rkn_registration",
            CriterionKey::DataSubjectEmail => "data_subject_email",
            CriterionKey::ThirdPartyAudit => "third_party_audit",
        }
    }

    /// 报告中使用的带序号标题
    pub fn title(&self) -> &'static str {
        match self {
            CriterionKey::PrivacyPolicy => "1. Политика конфиденциальности",
            CriterionKey::PdConsentCheckboxes => "2. Чекбоксы согласия на обработку ПДн",
            CriterionKey::CheckboxNotChecked => "3. Чекбокс не отмечен по умолчанию",
            CriterionKey::ConsentLogging => "4. Фиксация согласия (логирование)",
            CriterionKey::CookiePopup => "5. Всплывающее окно о cookie",
            CriterionKey::CookieCategories => "6. Разделение cookie на категории",
            CriterionKey::PdStorageRussia => "7. Хранение ПДн на территории РФ",
            CriterionKey::RknRegistration => "8. Регистрация в РКН",
            CriterionKey::DataSubjectEmail => "9. Email для обращений субъектов данных",
            CriterionKey::ThirdPartyAudit => "10. Аудит сторонних сервисов",
        }
    }

    /// 未通过时给出的改进建议
    pub fn recommendation(&self) -> &'static str {
        match self {
            CriterionKey::PrivacyPolicy => {
                "Разработать и опубликовать актуальную политику конфиденциальности"
            }
            CriterionKey::PdConsentCheckboxes => {
                "Добавить чекбоксы согласия на обработку персональных данных во все формы"
            }
            CriterionKey::CheckboxNotChecked => {
                "Убедиться, что чекбоксы согласия не отмечены по умолчанию"
            }
            CriterionKey::ConsentLogging => {
                "Реализовать систему логирования согласий пользователей"
            }
            CriterionKey::CookiePopup => "Добавить всплывающее окно с информацией о cookie-файлах",
            CriterionKey::CookieCategories => {
                "Внедрить разделение cookie на обязательные и прочие категории с возможностью выбора пользователем"
            }
            CriterionKey::PdStorageRussia => {
                "Убедиться, что персональные данные хранятся на серверах в РФ"
            }
            CriterionKey::RknRegistration => {
                "Проверить необходимость регистрации в РКН как оператора персональных данных"
            }
            CriterionKey::DataSubjectEmail => {
                "Добавить контактную информацию для обращений субъектов персональных данных"
            }
            CriterionKey::ThirdPartyAudit => {
                "Провести аудит взаимодействия со сторонними сервисами и документировать его результаты"
            }
        }
    }
}

impl fmt::Display for CriterionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CriterionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CriterionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown criterion: {}", s))
    }
}
