use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate};
use std::fmt::Write;

pub const DEFAULT_DISPLAY_FORMAT: &str = "%m-%d-%Y";

/// 檢查 strftime 格式字串是否可被 chrono 使用
pub fn is_valid_display_format(display_format: &str) -> bool {
    !StrftimeItems::new(display_format).any(|item| matches!(item, Item::Error))
}

/// 將 Alma 回傳的日期轉為顯示格式
///
/// Alma 會回傳 `2013-11-12Z`、`2013-11-12` 或完整的 RFC 3339 時間戳。
/// 無法解析時回傳 `None`，呼叫端不應因日期格式而整筆失敗。
pub fn convert_to_display_date(raw: &str, display_format: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let date = match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => timestamp.date_naive(),
        Err(_) => match NaiveDate::parse_from_str(raw.trim_end_matches('Z'), "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!("Unparseable date '{}': {}", raw, e);
                return None;
            }
        },
    };

    let mut formatted = String::new();
    if write!(formatted, "{}", date.format(display_format)).is_err() {
        tracing::warn!("⚠️ Invalid display date format '{}'", display_format);
        return None;
    }
    Some(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_zulu_date() {
        assert_eq!(
            convert_to_display_date("2013-11-12Z", DEFAULT_DISPLAY_FORMAT),
            Some("11-12-2013".to_string())
        );
    }

    #[test]
    fn test_convert_timestamp() {
        assert_eq!(
            convert_to_display_date("2017-05-10T14:00:00.123Z", "%Y/%m/%d"),
            Some("2017/05/10".to_string())
        );
    }

    #[test]
    fn test_convert_invalid_or_empty() {
        assert_eq!(convert_to_display_date("", DEFAULT_DISPLAY_FORMAT), None);
        assert_eq!(convert_to_display_date("yesterday", DEFAULT_DISPLAY_FORMAT), None);
    }

    #[test]
    fn test_invalid_format_yields_none() {
        assert_eq!(convert_to_display_date("2013-11-12Z", "%Q"), None);
        assert_eq!(convert_to_display_date("2017-05-10T14:00:00Z", "%d.%m.%"), None);
    }

    #[test]
    fn test_is_valid_display_format() {
        assert!(is_valid_display_format(DEFAULT_DISPLAY_FORMAT));
        assert!(is_valid_display_format("%d.%m.%Y"));
        assert!(!is_valid_display_format("%Q"));
        assert!(!is_valid_display_format("%Y-%"));
    }
}
