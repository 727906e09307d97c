//! Namespace - 이벤트 이름 해석
//!
//! 1. 설정이 없으면 그대로
//! 2. 카탈로그 alias 면 매핑된 이름으로 치환
//! 3. 이미 네임스페이스를 포함하면 그대로 (부분 문자열 검사)
//! 4. 아니면 `ns:name`, 네임스페이스가 비어 있으면 `name`
//!
//! 3번은 접두어가 아니라 포함 여부만 봅니다. 네임스페이스 `foo` 는
//! `xfooy` 같은 무관한 이름에도 걸립니다.

use mixin_foundation::strings::NS_SEPARATOR;
use mixin_foundation::EventsConfig;

/// 최종 이벤트 이름 계산
pub fn resolve(event: &str, config: Option<&EventsConfig>) -> String {
    let Some(config) = config else {
        return event.to_string();
    };

    let event = config
        .catalog
        .get(event)
        .map(String::as_str)
        .unwrap_or(event);

    if contains_ns(event, config) || config.ns.is_empty() {
        return event.to_string();
    }
    format!("{}{}{}", config.ns, NS_SEPARATOR, event)
}

/// 공백이 아닌 네임스페이스가 있는지
pub fn has_ns(config: &EventsConfig) -> bool {
    !config.ns.trim().is_empty()
}

/// 이벤트 이름이 네임스페이스를 포함하는지
pub fn contains_ns(event: &str, config: &EventsConfig) -> bool {
    has_ns(config) && event.contains(config.ns.as_str())
}
