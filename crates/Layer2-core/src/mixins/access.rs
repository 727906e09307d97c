//! ClassAccess - 경로 기반 getter / setter
//!
//! `__accessor` 가 가리키는 필드가 있으면 그 필드 안에서,
//! 없으면 대상 자신의 필드에서 점(`.`) 경로로 값을 읽고 씁니다.
//!
//! ```text
//! __accessor = "store"
//!
//! access_get("user.name")  →  store.user.name
//! access_set("user.age", 3) → store.user.age = 3
//! ```
//!
//! 쓰기는 경로의 첫 필드를 자신의 필드로 복제한 뒤 수정하므로
//! 프로토타입의 값은 바뀌지 않습니다.

use crate::args::{arg, arg_str};
use crate::delegate::{create, Mixin};
use mixin_foundation::strings::{ACCESS, ACCESSOR, APPLY_ACCESS};
use mixin_foundation::{
    get_path, has_path, remove_path, set_path, Function, Instance, Object, Result, Value,
};
use tracing::debug;

pub trait ClassAccess {
    /// 접근 대상 결정 (`__access` 에 필드 이름 또는 Null 저장)
    fn apply_access(&self) -> Result<&Self>;

    /// 경로의 값. 함수면 대상을 `this` 로 호출한 결과, 없으면 `default`
    fn access_get(&self, path: &str, default: Value) -> Result<Value>;

    /// 경로에 값 설정 (중간 객체는 생성)
    fn access_set(&self, path: &str, value: impl Into<Value>) -> &Self;

    fn access_has(&self, path: &str) -> bool;

    /// 경로의 값 제거 (제거된 값 반환)
    fn forget(&self, path: &str) -> Option<Value>;
}

impl ClassAccess for Instance {
    fn apply_access(&self) -> Result<&Self> {
        let accessor = self
            .result(ACCESSOR)?
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|key| !key.is_empty() && self.has(key));

        debug!(instance = %self.id(), accessor = ?accessor, "Applying access target");
        self.set(ACCESS, Value::from(accessor));
        Ok(self)
    }

    fn access_get(&self, path: &str, default: Value) -> Result<Value> {
        let path = scoped(self, path);
        let (head, rest) = split(&path);

        let value = match (self.get(head), rest) {
            (value, None) => value,
            (Some(Value::Object(container)), Some(rest)) => get_path(&container, rest).cloned(),
            _ => None,
        };

        match value {
            Some(Value::Function(f)) => f.call(self, &[]),
            Some(value) => Ok(value),
            None => Ok(default),
        }
    }

    fn access_set(&self, path: &str, value: impl Into<Value>) -> &Self {
        let path = scoped(self, path);
        let (head, rest) = split(&path);

        let Some(rest) = rest else {
            self.set(head, value);
            return self;
        };

        let mut container = self
            .get(head)
            .and_then(Value::into_object)
            .unwrap_or_default();
        set_path(&mut container, rest, value.into());
        self.set(head, container);
        self
    }

    fn access_has(&self, path: &str) -> bool {
        let path = scoped(self, path);
        match split(&path) {
            (head, None) => self.has(head),
            (head, Some(rest)) => self
                .get(head)
                .and_then(Value::into_object)
                .is_some_and(|container| has_path(&container, rest)),
        }
    }

    fn forget(&self, path: &str) -> Option<Value> {
        let path = scoped(self, path);
        let (head, rest) = split(&path);

        let Some(rest) = rest else {
            return self.remove(head);
        };

        let mut container = self.get(head).and_then(Value::into_object)?;
        let removed = remove_path(&mut container, rest)?;
        self.set(head, container);
        Some(removed)
    }
}

/// 접근 대상 필드가 있으면 경로 앞에 붙임
fn scoped(target: &Instance, path: &str) -> String {
    match target.get(ACCESS) {
        Some(Value::String(key)) if !key.is_empty() => format!("{}.{}", key, path),
        _ => path.to_string(),
    }
}

/// 첫 필드 이름과 나머지 경로
fn split(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

/// ClassAccess mixin (설치 시 `applyAccess` 호출)
pub fn class_access() -> Mixin {
    let mut object = Object::new();
    object.insert(ACCESSOR.to_string(), Value::Null);
    object.insert(ACCESS.to_string(), Value::Null);
    object.insert(
        APPLY_ACCESS.to_string(),
        Value::from(Function::new(APPLY_ACCESS, |this, _| {
            this.apply_access()?;
            Ok(Value::Null)
        })),
    );
    object.insert(
        "get".to_string(),
        Value::from(Function::new("get", |this, args| {
            this.access_get(&arg_str(args, 0, "get")?, arg(args, 1))
        })),
    );
    object.insert(
        "set".to_string(),
        Value::from(Function::new("set", |this, args| {
            this.access_set(&arg_str(args, 0, "set")?, arg(args, 1));
            Ok(Value::Null)
        })),
    );
    object.insert(
        "has".to_string(),
        Value::from(Function::new("has", |this, args| {
            Ok(Value::from(this.access_has(&arg_str(args, 0, "has")?)))
        })),
    );
    object.insert(
        "forget".to_string(),
        Value::from(Function::new("forget", |this, args| {
            Ok(Value::from(this.forget(&arg_str(args, 0, "forget")?)))
        })),
    );
    create("classAccess", object, Some(APPLY_ACCESS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviour::Behaviour;
    use serde_json::json;

    fn with_store() -> Instance {
        let target = Instance::new();
        target.set("__accessor", "store");
        target.set("store", json!({ "user": { "name": "kim" } }));
        target.include(class_access(), false).unwrap();
        target
    }

    #[test]
    fn test_accessor_field() {
        let target = with_store();
        assert_eq!(target.get(ACCESS), Some(Value::from("store")));

        assert_eq!(
            target.access_get("user.name", Value::Null).unwrap(),
            Value::from("kim")
        );
        assert!(target.access_has("user"));
        assert!(!target.access_has("user.age"));

        target.access_set("user.age", 3);
        assert_eq!(
            target.get("store"),
            Some(Value::from(json!({ "user": { "name": "kim", "age": 3 } })))
        );

        assert_eq!(target.forget("user.name"), Some(Value::from("kim")));
        assert!(!target.access_has("user.name"));
    }

    #[test]
    fn test_without_accessor_uses_target() {
        let target = Instance::new();
        target.include(class_access(), false).unwrap();
        assert_eq!(target.get(ACCESS), Some(Value::Null));

        target.access_set("config.depth", 2);
        assert_eq!(target.get("config"), Some(Value::from(json!({ "depth": 2 }))));
        assert_eq!(target.access_get("config.depth", Value::Null).unwrap(), Value::from(2));

        target.access_set("flag", true);
        assert!(target.access_has("flag"));
        assert_eq!(target.forget("flag"), Some(Value::from(true)));
        assert!(!target.has("flag"));
    }

    #[test]
    fn test_missing_accessor_field_falls_back() {
        let target = Instance::new();
        target.set("__accessor", "nowhere");
        target.include(class_access(), false).unwrap();

        assert_eq!(target.get(ACCESS), Some(Value::Null));
        target.access_set("x", 1);
        assert_eq!(target.get("x"), Some(Value::from(1)));
    }

    #[test]
    fn test_get_default_and_function_value() {
        let target = with_store();
        assert_eq!(
            target.access_get("user.missing", Value::from("none")).unwrap(),
            Value::from("none")
        );

        target.access_set(
            "user.greeting",
            Function::anonymous(|this, _| {
                let name = this.access_get("user.name", Value::Null)?;
                Ok(Value::from(format!("hi {}", name.as_str().unwrap_or(""))))
            }),
        );
        assert_eq!(
            target.access_get("user.greeting", Value::Null).unwrap(),
            Value::from("hi kim")
        );
    }

    #[test]
    fn test_set_does_not_touch_prototype() {
        let proto = Instance::new();
        proto.set("store", json!({ "count": 1 }));
        proto.set("__accessor", "store");

        let target = Instance::create(&proto);
        target.apply_access().unwrap();
        target.access_set("count", 2);

        assert_eq!(target.access_get("count", Value::Null).unwrap(), Value::from(2));
        assert_eq!(proto.get("store"), Some(Value::from(json!({ "count": 1 }))));
    }

    #[test]
    fn test_dynamic_methods() {
        let target = with_store();
        let name = target.call("get", &[Value::from("user.name")]).unwrap();
        assert_eq!(name, Value::from("kim"));

        target
            .call("set", &[Value::from("user.name"), Value::from("lee")])
            .unwrap();
        assert_eq!(
            target.call("has", &[Value::from("user.name")]).unwrap(),
            Value::from(true)
        );
        assert_eq!(
            target.call("forget", &[Value::from("user.name")]).unwrap(),
            Value::from("lee")
        );
    }
}
