//! Events Config - 이벤트 네임스페이스/카탈로그 설정
//!
//! 런타임에는 `eventsConfig` 필드에 `Value` 로 저장되며,
//! 읽을 때마다 이 타입으로 해석합니다.

use crate::strings::{EVENTS_CATALOG, EVENTS_NS};
use crate::value::{Object, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 이벤트 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsConfig {
    /// 네임스페이스 (빈 문자열이면 접두어 없음)
    #[serde(default)]
    pub ns: String,

    /// alias → 이벤트 이름
    #[serde(default)]
    pub catalog: BTreeMap<String, String>,
}

impl EventsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Value 변환
    // ========================================================================

    /// 필드 값에서 해석
    ///
    /// 객체가 아니거나 `catalog` 가 없으면 `None` (네임스페이스 해석 불가).
    /// 문자열이 아닌 카탈로그 항목은 무시합니다.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let catalog = map.get(EVENTS_CATALOG)?.as_object()?;

        Some(Self {
            ns: map
                .get(EVENTS_NS)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            catalog: catalog
                .iter()
                .filter_map(|(alias, event)| Some((alias.clone(), event.as_str()?.to_string())))
                .collect(),
        })
    }

    /// 필드 값으로 변환
    pub fn to_value(&self) -> Value {
        let catalog: Object = self
            .catalog
            .iter()
            .map(|(alias, event)| (alias.clone(), Value::from(event.as_str())))
            .collect();

        let mut map = Object::new();
        map.insert(EVENTS_NS.to_string(), Value::from(self.ns.as_str()));
        map.insert(EVENTS_CATALOG.to_string(), Value::Object(catalog));
        Value::Object(map)
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: EventsConfig) {
        if !other.ns.is_empty() {
            self.ns = other.ns;
        }
        self.catalog.extend(other.catalog);
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn ns(mut self, ns: impl Into<String>) -> Self {
        self.ns = ns.into();
        self
    }

    pub fn event(mut self, alias: impl Into<String>, event: impl Into<String>) -> Self {
        self.catalog.insert(alias.into(), event.into());
        self
    }
}
