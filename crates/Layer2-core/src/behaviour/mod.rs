//! Behaviour - mixin 합성 엔진
//!
//! 대상 인스턴스에 mixin 소스를 순서대로 적용합니다.
//!
//! - 객체 소스: `force_include` 이면 overwrite, 아니면 deep-fill 로 병합
//! - 함수 소스: 대상을 `this` 로 하여 한 번 호출 (반환값은 버림)
//! - 그 밖의 값: 조용히 무시 (에러 아님)
//!
//! ## 사용법
//!
//! ```ignore
//! use mixin_core::Behaviour;
//!
//! let target = Instance::new();
//! target.set("mixins", vec![Value::from(json!({ "size": 1 }))]);
//!
//! // 선언된 mixin + 추가 mixin 을 지금 적용
//! target.apply_mixins(vec![extra.into()], false)?;
//!
//! // 선언 목록을 누적 확장 (중복 제거 없음)
//! target.extend_mixins(vec![other.into()])?;
//! ```

use mixin_foundation::strings::MIXINS;
use mixin_foundation::{Function, Instance, MergeStrategy, Result, Value};
use tracing::{debug, trace};

// ============================================================================
// MixinsDecl
// ============================================================================

/// `mixins` 필드 선언
#[derive(Debug, Clone, PartialEq)]
pub enum MixinsDecl {
    /// 고정 목록
    Fixed(Vec<Value>),
    /// 호출할 때마다 목록을 만드는 producer
    Lazy(Function),
}

impl MixinsDecl {
    /// 필드 값에서 해석. 배열/함수가 아니면 빈 목록
    pub fn from_value(value: Option<Value>) -> Self {
        match value {
            Some(Value::Array(items)) => Self::Fixed(items),
            Some(Value::Function(producer)) => Self::Lazy(producer),
            _ => Self::Fixed(Vec::new()),
        }
    }

    /// 목록으로 해석. producer 는 매번 다시 호출 (캐시 없음)
    pub fn resolve(&self, target: &Instance) -> Result<Vec<Value>> {
        match self {
            Self::Fixed(items) => Ok(items.clone()),
            Self::Lazy(producer) => match producer.call(target, &[])? {
                Value::Array(items) => Ok(items),
                _ => Ok(Vec::new()),
            },
        }
    }
}

impl From<MixinsDecl> for Value {
    fn from(decl: MixinsDecl) -> Self {
        match decl {
            MixinsDecl::Fixed(items) => Value::Array(items),
            MixinsDecl::Lazy(producer) => Value::Function(producer),
        }
    }
}

/// mixin 인자를 소스 목록으로 정규화
///
/// 배열은 항목 그대로, 객체/함수는 단일 항목, 그 밖의 값은 빈 목록.
pub fn mixin_list(mixin: &Value) -> Vec<Value> {
    match mixin {
        Value::Array(items) => items.clone(),
        Value::Object(_) | Value::Function(_) => vec![mixin.clone()],
        _ => Vec::new(),
    }
}

// ============================================================================
// Behaviour trait
// ============================================================================

/// 합성 연산
pub trait Behaviour {
    /// mixin 하나 또는 목록을 적용
    fn include(&self, mixin: impl Into<Value>, force_include: bool) -> Result<&Self>;

    /// 선언된 mixin 목록 뒤에 `extra` 를 이어 붙인 목록 (대상은 변경하지 않음)
    fn get_mixins(&self, extra: impl Into<Value>) -> Result<Vec<Value>>;

    /// `include(get_mixins(extra), force_include)`
    fn apply_mixins(&self, extra: impl Into<Value>, force_include: bool) -> Result<&Self>;

    /// 선언된 mixin 목록을 `get_mixins(extra)` 로 교체하고 반환
    fn extend_mixins(&self, extra: impl Into<Value>) -> Result<Vec<Value>>;
}

impl Behaviour for Instance {
    fn include(&self, mixin: impl Into<Value>, force_include: bool) -> Result<&Self> {
        let mixin = mixin.into();
        let sources = mixin_list(&mixin);

        if sources.is_empty() && !mixin.is_array() {
            debug!(
                instance = %self.id(),
                kind = mixin.type_name(),
                "Ignoring non-mixin value"
            );
        }

        for source in &sources {
            mix(self, source, force_include)?;
        }
        Ok(self)
    }

    fn get_mixins(&self, extra: impl Into<Value>) -> Result<Vec<Value>> {
        let mut mixins = MixinsDecl::from_value(self.get(MIXINS)).resolve(self)?;
        mixins.extend(mixin_list(&extra.into()));
        Ok(mixins)
    }

    fn apply_mixins(&self, extra: impl Into<Value>, force_include: bool) -> Result<&Self> {
        let mixins = self.get_mixins(extra)?;
        self.include(mixins, force_include)
    }

    fn extend_mixins(&self, extra: impl Into<Value>) -> Result<Vec<Value>> {
        let mixins = self.get_mixins(extra)?;
        debug!(
            instance = %self.id(),
            count = mixins.len(),
            "Extending declared mixins"
        );
        self.set(MIXINS, mixins.clone());
        Ok(mixins)
    }
}

/// 소스 하나 적용
fn mix(target: &Instance, source: &Value, force_include: bool) -> Result<()> {
    match source {
        Value::Function(init) => {
            trace!(instance = %target.id(), init = ?init, "Running initializer mixin");
            init.call(target, &[])?;
        }
        Value::Object(object) => {
            target.merge(object, MergeStrategy::from_force(force_include));
        }
        other => {
            trace!(
                instance = %target.id(),
                kind = other.type_name(),
                "Skipping non-mixin list entry"
            );
        }
    }
    Ok(())
}
