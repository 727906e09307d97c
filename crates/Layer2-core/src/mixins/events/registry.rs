//! Registered events - 등록 핸들러 참조

use mixin_foundation::{Function, Instance, Value};

/// 등록된 핸들러
///
/// `Named` 는 등록 시점이 아니라 attach / detach / 디스패치 때마다
/// 소유 인스턴스에서 메서드를 다시 찾습니다.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerRef {
    /// 직접 등록한 함수
    Direct(Function),
    /// 소유 인스턴스의 메서드 이름
    Named(String),
}

impl HandlerRef {
    /// 필드 값에서 해석. 함수/문자열이 아니면 `None`
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Function(f) => Some(Self::Direct(f.clone())),
            Value::String(name) => Some(Self::Named(name.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Direct(f) => Value::Function(f.clone()),
            Self::Named(name) => Value::from(name.as_str()),
        }
    }

    /// 현재 호출할 함수. `Named` 인데 메서드가 없으면 `None`
    pub fn resolve(&self, owner: &Instance) -> Option<Function> {
        match self {
            Self::Direct(f) => Some(f.clone()),
            Self::Named(name) => owner.resolve_method(name),
        }
    }
}

impl From<Function> for HandlerRef {
    fn from(f: Function) -> Self {
        Self::Direct(f)
    }
}

impl From<&str> for HandlerRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for HandlerRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}
