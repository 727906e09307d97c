//! Mixins - 합성 대상에 설치하는 기본 mixin 모음
//!
//! | mixin           | 초기화 메서드        | 상태 필드                          |
//! |-----------------|----------------------|------------------------------------|
//! | `class_events`  | -                    | `eventsConfig`, `__registeredEvents` |
//! | `class_options` | `applyClassOptions`  | `classOptions`                     |
//! | `class_defaults`| `applyDefaults`      | `defaults`                         |
//! | `class_own`     | `applyOwn`           | `own`                              |
//! | `class_access`  | `applyAccess`        | `__accessor`, `__access`           |
//!
//! 각 mixin 은 `Mixin` 값이라 `include` 에 바로 넘길 수 있고,
//! 같은 연산을 Rust trait 으로도 제공합니다.

pub mod access;
pub mod defaults;
pub mod events;
pub mod options;
pub mod own;

pub use access::{class_access, ClassAccess};
pub use defaults::{class_defaults, ClassDefaults};
pub use events::{class_events, ClassEvents, HandlerRef};
pub use options::{class_options, ClassOptions};
pub use own::{class_own, ClassOwn};
