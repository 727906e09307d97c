//! Instance - 합성 대상 객체
//!
//! 필드(상태 + 메서드), 선택적 프로토타입, 이벤트 리스너 테이블을 가진
//! 공유 핸들입니다. 내부 상태는 `Arc<RwLock<_>>` 로 보호되며,
//! 사용자 코드(메서드, initializer, 핸들러)를 호출하는 동안에는 락을 잡지 않습니다.
//! 그래서 핸들러 안에서 같은 인스턴스의 메서드를 다시 호출해도 안전합니다.
//!
//! ## 사용법
//!
//! ```ignore
//! use mixin_foundation::{Instance, Function, Value};
//!
//! let proto = Instance::new();
//! proto.set("greet", Function::new("greet", |this, _| {
//!     Ok(this.get("name").unwrap_or_default())
//! }));
//!
//! let widget = Instance::create(&proto);
//! widget.set("name", "widget");
//! assert_eq!(widget.call("greet", &[])?, Value::from("widget"));
//! ```

use crate::event::{EventTable, Listening};
use crate::value::{deep_fill, overwrite, Function, MergeStrategy, Object, Value};
use crate::{Error, Result};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use tracing::trace;
use uuid::Uuid;

// ============================================================================
// Instance ID
// ============================================================================

/// 인스턴스 고유 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(Uuid);

impl InstanceId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Instance
// ============================================================================

pub(crate) struct InstanceState {
    pub(crate) id: InstanceId,
    pub(crate) fields: Object,
    pub(crate) proto: Option<Instance>,
    pub(crate) events: EventTable,
    pub(crate) listening: Vec<Listening>,
}

/// 합성 가능한 객체 핸들 (clone 은 같은 객체를 가리킴)
#[derive(Clone)]
pub struct Instance {
    pub(crate) inner: Arc<RwLock<InstanceState>>,
}

/// 약한 참조 (리스너 컨텍스트용)
#[derive(Clone)]
pub struct WeakInstance {
    inner: Weak<RwLock<InstanceState>>,
}

impl WeakInstance {
    pub fn upgrade(&self) -> Option<Instance> {
        self.inner.upgrade().map(|inner| Instance { inner })
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl Instance {
    /// 빈 인스턴스 생성
    pub fn new() -> Self {
        Self::from_object(Object::new())
    }

    /// 초기 필드로 생성
    pub fn from_object(fields: Object) -> Self {
        Self::build(fields, None)
    }

    /// `proto` 를 프로토타입으로 하는 인스턴스 생성
    ///
    /// 자신에게 없는 필드/메서드는 프로토타입 체인에서 읽습니다.
    /// 쓰기는 항상 자신의 필드에만 반영됩니다.
    pub fn create(proto: &Instance) -> Self {
        Self::build(Object::new(), Some(proto.clone()))
    }

    fn build(fields: Object, proto: Option<Instance>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(InstanceState {
                id: InstanceId::new(),
                fields,
                proto,
                events: EventTable::default(),
                listening: Vec::new(),
            })),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.inner.read().id
    }

    /// 같은 객체인지 확인
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn downgrade(&self) -> WeakInstance {
        WeakInstance {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn prototype(&self) -> Option<Instance> {
        self.inner.read().proto.clone()
    }

    // ========================================================================
    // 필드 조회
    // ========================================================================

    /// 필드 조회 (프로토타입 체인 포함)
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let next = {
                let state = current.inner.read();
                if let Some(value) = state.fields.get(key) {
                    return Some(value.clone());
                }
                state.proto.clone()
            };
            current = next?;
        }
    }

    /// 자신의 필드만 조회
    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.inner.read().fields.get(key).cloned()
    }

    /// 필드 존재 여부 (프로토타입 체인 포함)
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// 자신의 필드 존재 여부
    pub fn has_own(&self, key: &str) -> bool {
        self.inner.read().fields.contains_key(key)
    }

    /// 자신의 필드 스냅샷
    pub fn fields(&self) -> Object {
        self.inner.read().fields.clone()
    }

    /// lodash `result` 와 같은 조회: 함수면 인자 없이 호출한 결과, 아니면 값 그대로
    pub fn result(&self, key: &str) -> Result<Option<Value>> {
        match self.get(key) {
            Some(Value::Function(f)) => f.call(self, &[]).map(Some),
            other => Ok(other),
        }
    }

    // ========================================================================
    // 필드 변경
    // ========================================================================

    /// 필드 설정 (이전 값 반환)
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.inner.write().fields.insert(key.into(), value.into())
    }

    /// 자신의 필드 제거
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.inner.write().fields.remove(key)
    }

    /// 자신의 필드를 읽기 락 아래에서 조회
    ///
    /// 클로저 안에서 같은 인스턴스에 다시 접근하면 안 됩니다.
    pub fn read<R>(&self, f: impl FnOnce(&Object) -> R) -> R {
        f(&self.inner.read().fields)
    }

    /// 자신의 필드를 쓰기 락 아래에서 변경
    ///
    /// 클로저 안에서 같은 인스턴스에 다시 접근하면 안 됩니다.
    pub fn update<R>(&self, f: impl FnOnce(&mut Object) -> R) -> R {
        f(&mut self.inner.write().fields)
    }

    /// 객체를 자신의 필드에 병합
    ///
    /// deep-fill 은 프로토타입에서 읽히는 값도 이미 있는 값으로 봅니다.
    /// 상속된 객체에 채울 키가 있으면 복사본을 자신의 필드로 만든 뒤 채우고,
    /// 프로토타입은 건드리지 않습니다.
    pub fn merge(&self, source: &Object, strategy: MergeStrategy) {
        trace!(
            instance = %self.id(),
            keys = source.len(),
            ?strategy,
            "Merging object into instance"
        );
        match strategy {
            MergeStrategy::Overwrite => overwrite(&mut self.inner.write().fields, source),
            MergeStrategy::DeepFill => self.fill(source),
        }
    }

    fn fill(&self, source: &Object) {
        let Some(proto) = self.prototype() else {
            deep_fill(&mut self.inner.write().fields, source);
            return;
        };

        let missing: Vec<String> = self.read(|fields| {
            source
                .keys()
                .filter(|key| !fields.contains_key(*key))
                .cloned()
                .collect()
        });
        let inherited: Object = missing
            .into_iter()
            .filter_map(|key| {
                let value = proto.get(&key)?;
                Some((key, value))
            })
            .collect();

        let mut pending = Object::new();
        for (key, incoming) in source {
            match (inherited.get(key), incoming) {
                (None, _) => {
                    pending.insert(key.clone(), incoming.clone());
                }
                (Some(Value::Object(existing)), Value::Object(nested)) => {
                    let mut copy = existing.clone();
                    deep_fill(&mut copy, nested);
                    if copy != *existing {
                        trace!(instance = %self.id(), key = %key, "Copying inherited object to fill gaps");
                        pending.insert(key.clone(), Value::Object(copy));
                    }
                }
                (Some(_), _) => {}
            }
        }

        deep_fill(&mut self.inner.write().fields, &pending);
    }

    // ========================================================================
    // 메서드 호출
    // ========================================================================

    /// 이름으로 메서드 찾기 (프로토타입 체인 포함)
    pub fn resolve_method(&self, name: &str) -> Option<Function> {
        match self.get(name)? {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// 메서드를 이 인스턴스에 바인딩하여 호출
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        match self.get(name) {
            Some(Value::Function(f)) => f.call(self, args),
            Some(other) => Err(Error::NotCallable(format!(
                "{} is {}",
                name,
                other.type_name()
            ))),
            None => Err(Error::MethodNotFound(name.to_string())),
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.read();
        f.debug_struct("Instance")
            .field("id", &state.id)
            .field("fields", &state.fields.keys().collect::<Vec<_>>())
            .field("has_proto", &state.proto.is_some())
            .finish()
    }
}
