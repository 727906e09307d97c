//! ClassOwn - 프로토타입 값을 인스턴스 소유로 복제
//!
//! `own` 에 나열된 속성이 프로토타입에서만 읽히고 있으면
//! 값을 복사해 자신의 필드로 만듭니다. 이후 변경은 프로토타입이나
//! 다른 인스턴스에 보이지 않습니다.

use crate::args::{arg, string_list, strings_to_value};
use crate::delegate::{create, Mixin};
use mixin_foundation::strings::{APPLY_OWN, OWN};
use mixin_foundation::{Function, Instance, Object, Result, Value};
use tracing::trace;

pub trait ClassOwn {
    /// `extra` 뒤에 선언된 `own` 을 이어 붙인 목록
    fn own_properties(&self, extra: &[String]) -> Result<Vec<String>>;

    /// 선언된 `own` 과 `extra` 의 속성을 자신의 필드로 복제
    fn apply_own(&self, extra: &[String]) -> Result<&Self>;

    /// `own` 을 `own_properties(extra)` 로 교체하고 반환
    fn extend_own(&self, extra: &[String]) -> Result<Vec<String>>;
}

impl ClassOwn for Instance {
    fn own_properties(&self, extra: &[String]) -> Result<Vec<String>> {
        let mut own = extra.to_vec();
        own.extend(declared_own(self)?);
        Ok(own)
    }

    fn apply_own(&self, extra: &[String]) -> Result<&Self> {
        let mut own = declared_own(self)?;
        own.extend_from_slice(extra);

        for prop in &own {
            if self.has_own(prop) {
                continue;
            }
            if let Some(value) = self.get(prop) {
                trace!(instance = %self.id(), prop = %prop, "Copying inherited value to own field");
                self.set(prop.as_str(), value);
            }
        }
        Ok(self)
    }

    fn extend_own(&self, extra: &[String]) -> Result<Vec<String>> {
        let own = self.own_properties(extra)?;
        self.set(OWN, strings_to_value(&own));
        Ok(own)
    }
}

fn declared_own(target: &Instance) -> Result<Vec<String>> {
    Ok(string_list(target.result(OWN)?.as_ref()))
}

/// ClassOwn mixin (설치 시 `applyOwn` 호출)
pub fn class_own() -> Mixin {
    let mut object = Object::new();
    object.insert(OWN.to_string(), Value::array());
    object.insert(
        APPLY_OWN.to_string(),
        Value::from(Function::new(APPLY_OWN, |this, args| {
            this.apply_own(&string_list(Some(&arg(args, 0))))?;
            Ok(Value::Null)
        })),
    );
    object.insert(
        "getOwn".to_string(),
        Value::from(Function::new("getOwn", |this, args| {
            let own = this.own_properties(&string_list(Some(&arg(args, 0))))?;
            Ok(strings_to_value(&own))
        })),
    );
    object.insert(
        "extendOwn".to_string(),
        Value::from(Function::new("extendOwn", |this, args| {
            let own = this.extend_own(&string_list(Some(&arg(args, 0))))?;
            Ok(strings_to_value(&own))
        })),
    );
    create("classOwn", object, Some(APPLY_OWN))
}
