//! Field Name Constants
//!
//! mixin 들이 합성 대상에 심는 필드 이름을 한 곳에 모아 둡니다.
//! JSON 선언(`Declaration`)과 런타임 필드가 같은 이름을 쓰도록 유지합니다.
//!
//! # Usage
//!
//! ```ignore
//! use mixin_foundation::strings::{EVENTS_CONFIG, MIXINS};
//!
//! let ns = instance.get(EVENTS_CONFIG);
//! ```

// ============================================================================
// Composition
// ============================================================================

/// 선언된 mixin 목록 (배열 또는 producer)
pub const MIXINS: &str = "mixins";

// ============================================================================
// Events
// ============================================================================

/// 이벤트 설정 `{ ns, catalog }`
pub const EVENTS_CONFIG: &str = "eventsConfig";
/// 이벤트 네임스페이스 키 (`eventsConfig` 내부)
pub const EVENTS_NS: &str = "ns";
/// 이벤트 카탈로그 키 (`eventsConfig` 내부)
pub const EVENTS_CATALOG: &str = "catalog";
/// 등록 이벤트 테이블
pub const REGISTERED_EVENTS: &str = "__registeredEvents";
/// 네임스페이스와 이벤트 이름 구분자
pub const NS_SEPARATOR: &str = ":";

// ============================================================================
// Collaborator mixins
// ============================================================================

/// 기본 상태 (객체 또는 producer)
pub const DEFAULTS: &str = "defaults";
/// 화이트리스트 옵션 키 목록
pub const CLASS_OPTIONS: &str = "classOptions";
/// 인스턴스별로 복제할 속성 목록
pub const OWN: &str = "own";
/// 접근 위임 대상 필드 이름
pub const ACCESSOR: &str = "__accessor";
/// 해석된 접근 위임 대상
pub const ACCESS: &str = "__access";

// ============================================================================
// Init methods
// ============================================================================

/// ClassDefaults 초기화 메서드
pub const APPLY_DEFAULTS: &str = "applyDefaults";
/// ClassOptions 초기화 메서드
pub const APPLY_CLASS_OPTIONS: &str = "applyClassOptions";
/// ClassOwn 초기화 메서드
pub const APPLY_OWN: &str = "applyOwn";
/// ClassAccess 초기화 메서드
pub const APPLY_ACCESS: &str = "applyAccess";
