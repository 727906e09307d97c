//! Merge - 병합 전략
//!
//! - `overwrite`: 최상위 키 단위로 source 값을 그대로 덮어씀
//! - `deep_fill`: 비어 있는 키만 채움. 양쪽이 모두 객체일 때만 재귀

use super::{Object, Value};

/// 병합 전략
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// 얕은 덮어쓰기 (마지막 소스 우선)
    Overwrite,
    /// 빈 자리 채우기 (기존 값 우선)
    #[default]
    DeepFill,
}

impl MergeStrategy {
    /// `force_include` 플래그에서 전략 선택
    pub fn from_force(force: bool) -> Self {
        if force {
            Self::Overwrite
        } else {
            Self::DeepFill
        }
    }

    /// source 를 target 에 병합
    pub fn apply(self, target: &mut Object, source: &Object) {
        match self {
            Self::Overwrite => overwrite(target, source),
            Self::DeepFill => deep_fill(target, source),
        }
    }
}

/// source 의 모든 키를 target 에 그대로 설정
pub fn overwrite(target: &mut Object, source: &Object) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

/// target 에 없는 키만 source 의 깊은 복사본으로 채움
///
/// 기존 값이 객체이고 들어오는 값도 객체일 때만 내부로 내려갑니다.
/// 배열과 함수는 원자 값으로 취급되어 합쳐지지 않습니다.
pub fn deep_fill(target: &mut Object, source: &Object) {
    for (key, incoming) in source {
        match target.get_mut(key) {
            None => {
                target.insert(key.clone(), incoming.clone());
            }
            Some(Value::Object(existing)) => {
                if let Value::Object(nested) = incoming {
                    deep_fill(existing, nested);
                }
            }
            Some(_) => {}
        }
    }
}
