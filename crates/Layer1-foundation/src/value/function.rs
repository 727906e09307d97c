//! Function - 식별 가능한 호출 객체
//!
//! 메서드, initializer mixin, 이벤트 핸들러가 모두 `Function` 으로 표현됩니다.
//! 동등성은 생성 시 부여된 ID 로만 판단하므로, 같은 클로저를 두 번 감싸면
//! 서로 다른 함수가 됩니다. `off` 가 구독을 찾을 때 이 ID 를 사용합니다.

use super::Value;
use crate::instance::Instance;
use crate::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 함수 시그니처: `this` 로 바인딩된 인스턴스와 인자 목록
pub type MethodFn = dyn Fn(&Instance, &[Value]) -> Result<Value> + Send + Sync;

static FUNCTION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// 함수 고유 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(u64);

impl FunctionId {
    fn next() -> Self {
        Self(FUNCTION_COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for FunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fn-{}", self.0)
    }
}

/// 호출 가능한 값
#[derive(Clone)]
pub struct Function {
    id: FunctionId,
    name: Option<Arc<str>>,
    inner: Arc<MethodFn>,
}

impl Function {
    /// 이름 있는 함수 생성 (디버깅/로그용 이름)
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            id: FunctionId::next(),
            name: Some(Arc::from(name.into())),
            inner: Arc::new(f),
        }
    }

    /// 익명 함수 생성
    pub fn anonymous<F>(f: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            id: FunctionId::next(),
            name: None,
            inner: Arc::new(f),
        }
    }

    /// 반환값이 없는 콜백 (이벤트 핸들러용)
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> Result<()> + Send + Sync + 'static,
    {
        Self::anonymous(move |this, args| {
            f(this, args)?;
            Ok(Value::Null)
        })
    }

    /// 인자 없이 값을 만드는 producer (`mixins`, `defaults` 등 지연 선언용)
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self::anonymous(move |_, _| Ok(f()))
    }

    pub fn id(&self) -> FunctionId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// `this` 에 바인딩하여 호출
    pub fn call(&self, this: &Instance, args: &[Value]) -> Result<Value> {
        (self.inner)(this, args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Function {}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "[Function {} ({})]", name, self.id),
            None => write!(f, "[Function ({})]", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_identity() {
        let a = Function::anonymous(|_, _| Ok(Value::Null));
        let b = Function::anonymous(|_, _| Ok(Value::Null));

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_function_call_binds_this() {
        let target = Instance::new();
        target.set("name", "widget");

        let greet = Function::new("greet", |this, args| {
            let suffix = args.first().and_then(Value::as_str).unwrap_or("");
            let name = this.get("name").unwrap_or_default();
            Ok(Value::from(format!("{}{}", name.as_str().unwrap_or(""), suffix)))
        });

        let out = greet.call(&target, &[Value::from("!")]).unwrap();
        assert_eq!(out, Value::from("widget!"));
        assert_eq!(greet.name(), Some("greet"));
    }

    #[test]
    fn test_producer_ignores_arguments() {
        let produce = Function::producer(|| Value::from(42));
        let out = produce.call(&Instance::new(), &[Value::from("ignored")]).unwrap();
        assert_eq!(out, Value::from(42));
    }
}
