//! # mixin-foundation
//!
//! Foundation layer for the mixin engine:
//! - Value: 동적 값 모델 + 병합 전략 (overwrite / deep-fill)
//! - Instance: 합성 대상 객체 (필드, 프로토타입, 메서드 호출)
//! - Event: 인스턴스 단위 발행/구독 기본 연산
//! - Config: EventsConfig, JSON 선언
//! - Storage: JsonStore
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  mixin-core (Behaviour, Delegate, Class* mixins)        │
//! │                     │                                   │
//! │                     ▼                                   │
//! │  ┌──────────────────────────────────────────────────┐   │
//! │  │ Instance                                         │   │
//! │  │  ├── fields: Object  ◀── merge (overwrite/fill)  │   │
//! │  │  ├── proto: Option<Instance>                     │   │
//! │  │  └── events: on / off / trigger / listen_to      │   │
//! │  └──────────────────────────────────────────────────┘   │
//! │                     │                                   │
//! │          Value / Function / EventsConfig                │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod instance;
pub mod storage;
pub mod strings;
pub mod value;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Value (값 모델)
// ============================================================================
pub use value::{
    // Merge
    deep_fill,
    overwrite,
    // Path
    get_path,
    has_path,
    remove_path,
    set_path,
    // Types
    Function,
    FunctionId,
    MergeStrategy,
    MethodFn,
    Object,
    Value,
};

// ============================================================================
// Instance (합성 대상)
// ============================================================================
pub use instance::{Instance, InstanceId, WeakInstance};

// ============================================================================
// Event (발행/구독)
// ============================================================================
pub use event::{Events, ListenerId, ALL_EVENTS};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{Declaration, EventsConfig, DECLARATION_FILE};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::JsonStore;
