//! Declaration - JSON 으로 선언하는 mixin 데이터
//!
//! 함수는 JSON 에 담을 수 없으므로 데이터 필드만 선언합니다.
//! `into_object()` 결과를 그대로 mixin 소스로 `include` 하면 됩니다.

use super::EventsConfig;
use crate::storage::JsonStore;
use crate::strings::{ACCESSOR, CLASS_OPTIONS, DEFAULTS, EVENTS_CONFIG, MIXINS, OWN};
use crate::value::{Object, Value};
use crate::Result;
use serde::{Deserialize, Serialize};

/// 선언 파일명
pub const DECLARATION_FILE: &str = "mixin.json";

/// 데이터 전용 선언
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    /// 데이터 mixin 소스 목록
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixins: Option<Vec<Value>>,

    /// 이벤트 설정
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_config: Option<EventsConfig>,

    /// 기본 상태
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Value>,

    /// 화이트리스트 옵션 키
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_options: Option<Vec<String>>,

    /// 인스턴스별 복제 속성
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub own: Option<Vec<String>>,

    /// 접근 위임 대상 필드
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessor: Option<String>,

    /// 그 밖의 필드 (그대로 병합)
    #[serde(flatten)]
    pub fields: Object,
}

impl Declaration {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 저장소에서 로드
    pub fn load(store: &JsonStore) -> Result<Self> {
        store.load(DECLARATION_FILE)
    }

    /// 저장소에서 로드 (없으면 None)
    pub fn load_optional(store: &JsonStore) -> Result<Option<Self>> {
        store.load_optional(DECLARATION_FILE)
    }

    /// 저장소에 저장
    pub fn save(&self, store: &JsonStore) -> Result<()> {
        store.save(DECLARATION_FILE, self)
    }

    // ========================================================================
    // 변환 / 병합
    // ========================================================================

    /// mixin 소스 객체로 변환
    pub fn into_object(self) -> Object {
        let mut object = self.fields;

        if let Some(mixins) = self.mixins {
            object.insert(MIXINS.to_string(), Value::Array(mixins));
        }
        if let Some(events_config) = self.events_config {
            object.insert(EVENTS_CONFIG.to_string(), events_config.to_value());
        }
        if let Some(defaults) = self.defaults {
            object.insert(DEFAULTS.to_string(), defaults);
        }
        if let Some(options) = self.class_options {
            object.insert(CLASS_OPTIONS.to_string(), strings_to_value(options));
        }
        if let Some(own) = self.own {
            object.insert(OWN.to_string(), strings_to_value(own));
        }
        if let Some(accessor) = self.accessor {
            object.insert(ACCESSOR.to_string(), Value::from(accessor));
        }
        object
    }

    /// 다른 선언과 병합 (other가 우선)
    pub fn merge(&mut self, other: Declaration) {
        if other.mixins.is_some() {
            self.mixins = other.mixins;
        }
        if let Some(overlay) = other.events_config {
            match self.events_config.as_mut() {
                Some(base) => base.merge(overlay),
                None => self.events_config = Some(overlay),
            }
        }
        if other.defaults.is_some() {
            self.defaults = other.defaults;
        }
        if other.class_options.is_some() {
            self.class_options = other.class_options;
        }
        if other.own.is_some() {
            self.own = other.own;
        }
        if other.accessor.is_some() {
            self.accessor = other.accessor;
        }
        self.fields.extend(other.fields);
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn events_config(mut self, config: EventsConfig) -> Self {
        self.events_config = Some(config);
        self
    }

    pub fn defaults(mut self, defaults: impl Into<Value>) -> Self {
        self.defaults = Some(defaults.into());
        self
    }

    pub fn class_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn own<I, S>(mut self, own: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.own = Some(own.into_iter().map(Into::into).collect());
        self
    }

    pub fn accessor(mut self, accessor: impl Into<String>) -> Self {
        self.accessor = Some(accessor.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

fn strings_to_value(items: Vec<String>) -> Value {
    Value::Array(items.into_iter().map(Value::from).collect())
}
