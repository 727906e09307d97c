//! mixin-core: Composition Runtime
//!
//! Layer2 - mixin 합성 엔진과 이벤트 overlay
//!
//! # 주요 모듈
//!
//! - `behaviour`: 합성 엔진 (`include`, `get_mixins`, `apply_mixins`, `extend_mixins`)
//! - `delegate`: 합성 능력 설치(`provide`) 및 `Mixin` 생성(`create`)
//! - `mixins`: ClassEvents / ClassOptions / ClassDefaults / ClassOwn / ClassAccess
//!
//! # 사용 예시
//!
//! ```ignore
//! use mixin_core::{class_defaults, class_events, provide, Behaviour, ClassEvents};
//! use mixin_foundation::{Declaration, Instance, JsonStore, Value};
//!
//! // 선언 로드 (없으면 기본값)
//! let store = JsonStore::project(".");
//! let decl = Declaration::load_optional(&store)?.unwrap_or_default();
//!
//! let panel = Instance::from_object(decl.into_object());
//! provide(&panel);
//!
//! // 선언된 mixin + 기본 mixin 적용
//! panel.apply_mixins(vec![class_events().into(), class_defaults().into()], false)?;
//!
//! panel.register_event("open", "onOpen");
//! panel.attach_registered_events(true);
//! panel.fire("open", Value::Null)?;
//! ```

mod args;

pub mod behaviour;
pub mod delegate;
pub mod mixins;

// Re-exports: Behaviour
pub use behaviour::{mixin_list, Behaviour, MixinsDecl};

// Re-exports: Delegate
pub use delegate::{composition_methods, create, provide, Mixin};

// Re-exports: Mixins
pub use mixins::{
    // Events
    class_events,
    ClassEvents,
    HandlerRef,
    // Options
    class_options,
    ClassOptions,
    // Defaults
    class_defaults,
    ClassDefaults,
    // Own
    class_own,
    ClassOwn,
    // Access
    class_access,
    ClassAccess,
};
