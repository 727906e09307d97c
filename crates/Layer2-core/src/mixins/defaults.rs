//! ClassDefaults - 기본 상태 채우기

use crate::args::arg_object;
use crate::delegate::{create, Mixin};
use mixin_foundation::strings::{APPLY_DEFAULTS, DEFAULTS};
use mixin_foundation::{Function, Instance, MergeStrategy, Object, Result, Value};

pub trait ClassDefaults {
    /// `defaults` (객체 또는 producer) 와 `extra` 를 순서대로 deep-fill
    fn apply_defaults(&self, extra: &Object) -> Result<&Self>;
}

impl ClassDefaults for Instance {
    fn apply_defaults(&self, extra: &Object) -> Result<&Self> {
        let defaults = self
            .result(DEFAULTS)?
            .and_then(Value::into_object)
            .unwrap_or_default();

        self.merge(&defaults, MergeStrategy::DeepFill);
        self.merge(extra, MergeStrategy::DeepFill);
        Ok(self)
    }
}

/// ClassDefaults mixin (설치 시 `applyDefaults` 호출)
pub fn class_defaults() -> Mixin {
    let mut object = Object::new();
    object.insert(DEFAULTS.to_string(), Value::object());
    object.insert(
        APPLY_DEFAULTS.to_string(),
        Value::from(Function::new(APPLY_DEFAULTS, |this, args| {
            this.apply_defaults(&arg_object(args, 0))?;
            Ok(Value::Null)
        })),
    );
    create("classDefaults", object, Some(APPLY_DEFAULTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviour::Behaviour;
    use serde_json::json;

    fn object(json: serde_json::Value) -> Object {
        Value::from(json).into_object().unwrap()
    }

    #[test]
    fn test_defaults_fill_gaps_only() {
        let target = Instance::new();
        target.set("defaults", json!({ "size": 1, "style": { "color": "red", "bold": false } }));
        target.set("style", json!({ "bold": true }));

        target.apply_defaults(&Object::new()).unwrap();

        assert_eq!(target.get("size"), Some(Value::from(1)));
        assert_eq!(
            target.get("style"),
            Some(Value::from(json!({ "color": "red", "bold": true })))
        );
    }

    #[test]
    fn test_declared_defaults_win_over_extra() {
        let target = Instance::new();
        target.set("defaults", json!({ "size": 1 }));

        target
            .apply_defaults(&object(json!({ "size": 2, "label": "x" })))
            .unwrap();

        assert_eq!(target.get("size"), Some(Value::from(1)));
        assert_eq!(target.get("label"), Some(Value::from("x")));
    }

    #[test]
    fn test_defaults_producer() {
        let target = Instance::new();
        target.set(
            "defaults",
            Function::producer(|| Value::from(json!({ "items": [] }))),
        );

        target.apply_defaults(&Object::new()).unwrap();
        assert_eq!(target.get("items"), Some(Value::array()));
    }

    #[test]
    fn test_defaults_fill_inherited_state_on_copy() {
        let proto = Instance::new();
        proto.set("defaults", json!({ "size": 1, "style": { "color": "red" } }));
        proto.set("size", 7);
        proto.set("style", json!({ "bold": true }));

        let child = Instance::create(&proto);
        child.apply_defaults(&Object::new()).unwrap();

        assert_eq!(child.get("size"), Some(Value::from(7)));
        assert!(!child.has_own("size"));
        assert_eq!(
            child.get("style"),
            Some(Value::from(json!({ "color": "red", "bold": true })))
        );
        assert_eq!(proto.get("style"), Some(Value::from(json!({ "bold": true }))));
    }

    #[test]
    fn test_mixin_applies_on_include() {
        let target = Instance::new();
        target.set("defaults", json!({ "ready": false }));

        target.include(class_defaults(), false).unwrap();

        // 선언된 defaults 는 mixin 의 빈 defaults 로 덮이지 않음
        assert_eq!(target.get("ready"), Some(Value::from(false)));
        assert!(target.resolve_method(APPLY_DEFAULTS).is_some());
    }
}
