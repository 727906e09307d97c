//! ClassOptions - 화이트리스트 옵션 복사
//!
//! `classOptions` (배열 또는 producer) 에 나열된 키만 골라
//! 생성 옵션 객체에서 대상으로 복사합니다.

use crate::args::{arg, string_list, strings_to_value};
use crate::delegate::{create, Mixin};
use mixin_foundation::strings::{APPLY_CLASS_OPTIONS, CLASS_OPTIONS};
use mixin_foundation::{Function, Instance, MergeStrategy, Object, Result, Value};
use tracing::debug;

pub trait ClassOptions {
    /// 선언된 옵션 키 뒤에 `extra` 를 이어 붙인 목록
    fn get_class_options(&self, extra: &[String]) -> Result<Vec<String>>;

    /// `from` (없으면 대상 자신) 에서 옵션 키만 골라낸 객체
    fn pick_class_options(&self, from: Option<&Object>, extra: &[String]) -> Result<Object>;

    /// 골라낸 옵션을 대상 필드에 덮어쓰기
    fn apply_class_options(&self, from: Option<&Object>) -> Result<&Self>;

    /// `classOptions` 를 `get_class_options(extra)` 로 교체하고 반환
    fn extend_class_options(&self, extra: &[String]) -> Result<Vec<String>>;
}

impl ClassOptions for Instance {
    fn get_class_options(&self, extra: &[String]) -> Result<Vec<String>> {
        let mut options = string_list(self.result(CLASS_OPTIONS)?.as_ref());
        options.extend_from_slice(extra);
        Ok(options)
    }

    fn pick_class_options(&self, from: Option<&Object>, extra: &[String]) -> Result<Object> {
        let keys = self.get_class_options(extra)?;
        let picked = keys
            .into_iter()
            .filter_map(|key| {
                let value = match from {
                    Some(from) => from.get(&key).cloned(),
                    None => self.get(&key),
                }?;
                Some((key, value))
            })
            .collect();
        Ok(picked)
    }

    fn apply_class_options(&self, from: Option<&Object>) -> Result<&Self> {
        let picked = self.pick_class_options(from, &[])?;
        if !picked.is_empty() {
            debug!(
                instance = %self.id(),
                keys = ?picked.keys().collect::<Vec<_>>(),
                "Applying class options"
            );
        }
        self.merge(&picked, MergeStrategy::Overwrite);
        Ok(self)
    }

    fn extend_class_options(&self, extra: &[String]) -> Result<Vec<String>> {
        let options = self.get_class_options(extra)?;
        self.set(CLASS_OPTIONS, strings_to_value(&options));
        Ok(options)
    }
}

/// ClassOptions mixin (설치 시 `applyClassOptions` 호출)
pub fn class_options() -> Mixin {
    let mut object = Object::new();
    object.insert(CLASS_OPTIONS.to_string(), Value::array());
    object.insert(
        APPLY_CLASS_OPTIONS.to_string(),
        Value::from(Function::new(APPLY_CLASS_OPTIONS, |this, args| {
            let from = arg(args, 0);
            this.apply_class_options(from.as_object())?;
            Ok(Value::Null)
        })),
    );
    object.insert(
        "getClassOptions".to_string(),
        Value::from(Function::new("getClassOptions", |this, args| {
            let options = this.get_class_options(&string_list(Some(&arg(args, 0))))?;
            Ok(strings_to_value(&options))
        })),
    );
    object.insert(
        "pickClassOptions".to_string(),
        Value::from(Function::new("pickClassOptions", |this, args| {
            let from = arg(args, 0);
            let extra = string_list(Some(&arg(args, 1)));
            this.pick_class_options(from.as_object(), &extra).map(Value::Object)
        })),
    );
    object.insert(
        "extendClassOptions".to_string(),
        Value::from(Function::new("extendClassOptions", |this, args| {
            let options = this.extend_class_options(&string_list(Some(&arg(args, 0))))?;
            Ok(strings_to_value(&options))
        })),
    );
    create("classOptions", object, Some(APPLY_CLASS_OPTIONS))
}
