// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::domain::models::criterion::CriterionKey;
use crate::domain::models::site_check::Checks;
use crate::utils::errors::AuditError;

// Keyword lists are matched as lower-cased substrings, not tokens.

const PRIVACY_KEYWORDS: &[&str] = &[
    "политика конфиденциальности",
    "privacy policy",
    "privacy",
    "конфиденциальность",
    "обработка персональных данных",
    "персональные данные",
    "политика обработки",
];

const PRIVACY_URL_KEYWORDS: &[&str] = &["privacy", "confidential", "policy"];

const CONSENT_KEYWORDS: &[&str] = &[
    "согласие",
    "согласен",
    "соглашаюсь",
    "consent",
    "agree",
    "персональные данные",
    "personal data",
    "обработка",
    "processing",
];

const LOGGING_KEYWORDS: &[&str] = &[
    "логирование",
    "фиксация",
    "запись",
    "журнал",
    "log",
    "logging",
    "согласие",
    "consent",
    "timestamp",
    "время",
    "дата",
    "ip",
];

const COOKIE_KEYWORDS: &[&str] = &["cookie", "куки", "файлы cookie", "cookies", "куки-файлы"];

const POPUP_SELECTORS: &str = r#".popup, .modal, .overlay, .cookie, .notification, [class*="popup"], [class*="modal"], [class*="cookie"]"#;

const COOKIE_CATEGORY_KEYWORDS: &[&str] = &[
    "обязательные",
    "необходимые",
    "required",
    "essential",
    "аналитические",
    "analytics",
    "маркетинговые",
    "marketing",
    "функциональные",
    "functional",
    "рекламные",
    "advertising",
];

/// 至少出现的 cookie 分类关键词数
const MIN_COOKIE_CATEGORIES: usize = 2;

const RUSSIA_KEYWORDS: &[&str] = &[
    "россия",
    "рф",
    "российской федерации",
    "территория рф",
    "russia",
    "russian federation",
    "российские серверы",
];

const RKN_KEYWORDS: &[&str] = &[
    "ркн",
    "роскомнадзор",
    "рособрнадзор",
    "roskomnadzor",
    "регистрация",
    "registration",
    "оператор персональных данных",
];

const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b";

const SUBJECT_KEYWORDS: &[&str] = &[
    "субъект данных",
    "data subject",
    "обращение",
    "запрос",
    "контакт",
    "связаться",
    "обратная связь",
];

const THIRD_PARTY_SERVICES: &[&str] = &[
    "google",
    "facebook",
    "yandex",
    "vk",
    "twitter",
    "instagram",
    "analytics",
    "tracking",
    "pixel",
    "tag",
    "gtag",
    "fbq",
];

const AUDIT_KEYWORDS: &[&str] = &[
    "аудит",
    "проверка",
    "анализ",
    "audit",
    "review",
    "сторонние сервисы",
    "third party",
    "внешние сервисы",
];

/// 已解析的页面
///
/// 页面文本包含所有文本节点（包括 script 和 style 的内容），只计算一次
pub struct Page {
    url: String,
    document: Html,
    text: String,
    lower_text: String,
}

impl Page {
    /// 解析 HTML 文档
    ///
    /// # 参数
    ///
    /// * `url` - 规范化后的页面地址
    /// * `html` - 已解码的页面内容
    pub fn parse(url: &str, html: &str) -> Self {
        let document = Html::parse_document(html);
        let text: String = document.root_element().text().collect();
        let lower_text = text.to_lowercase();
        Self {
            url: url.to_string(),
            document,
            text,
            lower_text,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// 检查清单评估器
///
/// 十个互相独立的判定，每个判定都是页面的纯函数，找不到匹配内容时返回 false
pub struct ChecklistEvaluator {
    links: Selector,
    consent_candidates: Selector,
    checkboxes: Selector,
    popups: Selector,
    scripts: Selector,
    email: Regex,
}

impl ChecklistEvaluator {
    /// 编译所有选择器和正则表达式
    pub fn new() -> Result<Self, AuditError> {
        Ok(Self {
            links: parse_selector("a[href]")?,
            consent_candidates: parse_selector(
                r#"input, div[type="checkbox"], label[type="checkbox"]"#,
            )?,
            checkboxes: parse_selector(r#"input[type="checkbox"]"#)?,
            popups: parse_selector(POPUP_SELECTORS)?,
            scripts: parse_selector("script[src]")?,
            email: Regex::new(EMAIL_PATTERN)?,
        })
    }

    /// 对页面执行全部检查
    pub fn evaluate(&self, page: &Page) -> Checks {
        Checks::evaluate(|key| self.check(key, page))
    }

    /// 解析 HTML 并执行全部检查
    pub fn evaluate_html(&self, url: &str, html: &str) -> Checks {
        self.evaluate(&Page::parse(url, html))
    }

    /// 执行单个检查项
    pub fn check(&self, key: CriterionKey, page: &Page) -> bool {
        match key {
            CriterionKey::PrivacyPolicy => self.privacy_policy(page),
            CriterionKey::PdConsentCheckboxes => self.pd_consent_checkboxes(page),
            CriterionKey::CheckboxNotChecked => self.checkbox_not_checked(page),
            CriterionKey::ConsentLogging => contains_any(&page.lower_text, LOGGING_KEYWORDS),
            CriterionKey::CookiePopup => self.cookie_popup(page),
            CriterionKey::CookieCategories => {
                count_matches(&page.lower_text, COOKIE_CATEGORY_KEYWORDS) >= MIN_COOKIE_CATEGORIES
            }
            CriterionKey::PdStorageRussia => contains_any(&page.lower_text, RUSSIA_KEYWORDS),
            CriterionKey::RknRegistration => contains_any(&page.lower_text, RKN_KEYWORDS),
            CriterionKey::DataSubjectEmail => self.data_subject_email(page),
            CriterionKey::ThirdPartyAudit => self.third_party_audit(page),
        }
    }

    fn privacy_policy(&self, page: &Page) -> bool {
        let linked = page.document.select(&self.links).any(|link| {
            let text = element_text(&link).to_lowercase();
            let href = link.value().attr("href").unwrap_or_default().to_lowercase();
            PRIVACY_KEYWORDS
                .iter()
                .any(|keyword| text.contains(keyword) || href.contains(keyword))
        });

        linked || contains_any(&page.url.to_lowercase(), PRIVACY_URL_KEYWORDS)
    }

    fn pd_consent_checkboxes(&self, page: &Page) -> bool {
        page.document
            .select(&self.consent_candidates)
            .any(|candidate| {
                let mut nearby = String::new();
                if let Some(parent) = candidate.parent().and_then(ElementRef::wrap) {
                    nearby.push_str(&element_text(&parent).to_lowercase());
                }
                if let Some(sibling) = candidate.next_siblings().find_map(ElementRef::wrap) {
                    nearby.push_str(&element_text(&sibling).to_lowercase());
                }
                contains_any(&nearby, CONSENT_KEYWORDS)
            })
    }

    /// 没有复选框时视为满足
    fn checkbox_not_checked(&self, page: &Page) -> bool {
        let checkboxes: Vec<ElementRef> = page.document.select(&self.checkboxes).collect();
        checkboxes.is_empty()
            || checkboxes
                .iter()
                .any(|checkbox| checkbox.value().attr("checked").is_none())
    }

    fn cookie_popup(&self, page: &Page) -> bool {
        page.document
            .select(&self.popups)
            .any(|element| contains_any(&element_text(&element).to_lowercase(), COOKIE_KEYWORDS))
    }

    fn data_subject_email(&self, page: &Page) -> bool {
        self.email.is_match(&page.text) && contains_any(&page.lower_text, SUBJECT_KEYWORDS)
    }

    /// 没有识别到第三方脚本时视为满足
    fn third_party_audit(&self, page: &Page) -> bool {
        let uses_third_party = page.document.select(&self.scripts).any(|script| {
            let src = script.value().attr("src").unwrap_or_default().to_lowercase();
            contains_any(&src, THIRD_PARTY_SERVICES)
        });

        !uses_third_party || contains_any(&page.lower_text, AUDIT_KEYWORDS)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, AuditError> {
    Selector::parse(selector).map_err(|e| AuditError::Selector(format!("{}: {}", selector, e)))
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect()
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

fn count_matches(haystack: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|keyword| haystack.contains(*keyword))
        .count()
}

#[cfg(test)]
#[path = "checklist_service_test.rs"]
mod tests;
