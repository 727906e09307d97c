//! Delegate - mixin 설치 도우미
//!
//! - `provide(target)`: 합성 능력(`include`, `getMixins`, ...)을 대상에 설치
//! - `create(name, object, init)`: 설치 후 초기화 메서드를 부르는 `Mixin` 생성
//!
//! `Mixin` 은 `Value::Function` 으로 바꿔 `include` 에 바로 넘길 수 있습니다.

use crate::args::{arg, arg_bool};
use crate::behaviour::Behaviour;
use mixin_foundation::strings::MIXINS;
use mixin_foundation::{Function, Instance, MergeStrategy, Object, Result, Value};
use tracing::debug;

// ============================================================================
// provide
// ============================================================================

/// 합성 메서드 객체 (`include`, `getMixins`, `applyMixins`, `extendMixins`)
pub fn composition_methods() -> Object {
    let mut object = Object::new();

    object.insert(
        "include".into(),
        Value::from(Function::new("include", |this, args| {
            this.include(arg(args, 0), arg_bool(args, 1, false))?;
            Ok(Value::Null)
        })),
    );
    object.insert(
        "getMixins".into(),
        Value::from(Function::new("getMixins", |this, args| {
            this.get_mixins(arg(args, 0)).map(Value::from)
        })),
    );
    object.insert(
        "applyMixins".into(),
        Value::from(Function::new("applyMixins", |this, args| {
            this.apply_mixins(arg(args, 0), arg_bool(args, 1, false))?;
            Ok(Value::Null)
        })),
    );
    object.insert(
        "extendMixins".into(),
        Value::from(Function::new("extendMixins", |this, args| {
            this.extend_mixins(arg(args, 0)).map(Value::from)
        })),
    );

    object
}

/// 대상에 합성 능력 설치
///
/// 메서드는 덮어쓰고, `mixins` 선언은 없을 때만 빈 목록으로 채웁니다.
pub fn provide(target: &Instance) -> &Instance {
    target.merge(&composition_methods(), MergeStrategy::Overwrite);
    if !target.has(MIXINS) {
        target.set(MIXINS, Value::array());
    }
    debug!(instance = %target.id(), "Provided mixin behaviour");
    target
}

// ============================================================================
// Mixin
// ============================================================================

/// 설치 가능한 mixin (객체 + 선택적 초기화 메서드 이름)
#[derive(Debug, Clone)]
pub struct Mixin {
    name: String,
    object: Object,
    init_method: Option<String>,
}

/// mixin 생성
pub fn create(name: impl Into<String>, object: Object, init_method: Option<&str>) -> Mixin {
    Mixin {
        name: name.into(),
        object,
        init_method: init_method.map(str::to_string),
    }
}

impl Mixin {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object(&self) -> &Object {
        &self.object
    }

    pub fn init_method(&self) -> Option<&str> {
        self.init_method.as_deref()
    }

    /// 대상에 설치하고, `call` 이면 초기화 메서드 호출
    ///
    /// 메서드(함수 값)는 덮어쓰고 데이터는 deep-fill 로 채워서
    /// 대상에 이미 선언된 상태가 우선합니다.
    pub fn apply(&self, target: &Instance, call: bool) -> Result<()> {
        let (methods, data): (Object, Object) = self
            .object
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .partition(|(_, v)| v.is_function());

        target.merge(&methods, MergeStrategy::Overwrite);
        target.merge(&data, MergeStrategy::DeepFill);

        debug!(
            instance = %target.id(),
            mixin = %self.name,
            methods = methods.len(),
            fields = data.len(),
            "Installed mixin"
        );

        if call {
            if let Some(init) = &self.init_method {
                target.call(init, &[])?;
            }
        }
        Ok(())
    }

    /// `include` 에 넘길 수 있는 initializer 함수
    pub fn to_function(&self) -> Function {
        let mixin = self.clone();
        Function::new(self.name.clone(), move |this, _| {
            mixin.apply(this, true)?;
            Ok(Value::Null)
        })
    }
}

impl From<Mixin> for Value {
    fn from(mixin: Mixin) -> Self {
        Value::Function(mixin.to_function())
    }
}

impl From<&Mixin> for Value {
    fn from(mixin: &Mixin) -> Self {
        Value::Function(mixin.to_function())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixin_foundation::Error;
    use serde_json::json;

    fn counter_mixin() -> Mixin {
        let mut object = Value::from(json!({ "count": 0, "state": { "ready": false } }))
            .into_object()
            .unwrap();
        object.insert(
            "start".into(),
            Value::from(Function::new("start", |this, _| {
                this.set("count", 10);
                Ok(Value::Null)
            })),
        );
        create("counter", object, Some("start"))
    }

    #[test]
    fn test_provide_installs_behaviour() {
        let target = Instance::new();
        provide(&target);

        assert_eq!(target.get(MIXINS), Some(Value::array()));
        target
            .call("include", &[Value::from(json!({ "a": 1 }))])
            .unwrap();
        assert_eq!(target.get("a"), Some(Value::from(1)));

        let list = target.call("getMixins", &[Value::from(json!({ "b": 2 }))]).unwrap();
        assert_eq!(list.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_provide_keeps_declared_mixins() {
        let target = Instance::new();
        let declared = Value::from(vec![Value::from(json!({ "x": 1 }))]);
        target.set(MIXINS, declared.clone());

        provide(&target);
        assert_eq!(target.get(MIXINS), Some(declared));
    }

    #[test]
    fn test_apply_calls_init_method() {
        let target = Instance::new();
        counter_mixin().apply(&target, true).unwrap();
        assert_eq!(target.get("count"), Some(Value::from(10)));

        let target = Instance::new();
        counter_mixin().apply(&target, false).unwrap();
        assert_eq!(target.get("count"), Some(Value::from(0)));
    }

    #[test]
    fn test_apply_keeps_declared_data() {
        let target = Instance::new();
        target.set("state", json!({ "ready": true }));

        counter_mixin().apply(&target, false).unwrap();
        assert_eq!(target.get("state"), Some(Value::from(json!({ "ready": true }))));
    }

    #[test]
    fn test_apply_keeps_prototype_declared_data() {
        let proto = Instance::new();
        proto.set("count", 5);
        proto.set("state", json!({ "ready": true }));
        let child = Instance::create(&proto);

        counter_mixin().apply(&child, false).unwrap();

        assert_eq!(child.get("count"), Some(Value::from(5)));
        assert_eq!(child.get("state"), Some(Value::from(json!({ "ready": true }))));
        assert!(!child.has_own("state"));
        // 메서드는 자신의 필드로 설치
        assert!(child.has_own("start"));
    }

    #[test]
    fn test_provide_on_prototype_child() {
        let proto = Instance::new();
        proto.set(MIXINS, vec![Value::from(json!({ "x": 1 }))]);
        let child = Instance::create(&proto);

        provide(&child);
        assert!(!child.has_own(MIXINS));
        child.call("applyMixins", &[]).unwrap();
        assert_eq!(child.get("x"), Some(Value::from(1)));
    }

    #[test]
    fn test_mixin_as_include_source() {
        let target = Instance::new();
        target.include(counter_mixin(), false).unwrap();

        assert_eq!(target.get("count"), Some(Value::from(10)));
        assert!(target.resolve_method("start").is_some());
    }

    #[test]
    fn test_missing_init_method_fails() {
        let mixin = create("broken", Object::new(), Some("nope"));
        let err = mixin.apply(&Instance::new(), true).unwrap_err();
        assert!(matches!(err, Error::MethodNotFound(_)));
    }
}
