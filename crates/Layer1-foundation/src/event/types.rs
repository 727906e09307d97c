//! Event Types - 리스너 테이블 구성 요소

use crate::instance::{InstanceId, WeakInstance};
use crate::value::{Function, FunctionId};
use std::sync::atomic::{AtomicU64, Ordering};

/// 모든 이벤트를 받는 예약 이벤트 이름
///
/// `"all"` 리스너는 `[이벤트 이름, payload]` 를 인자로 받습니다.
pub const ALL_EVENTS: &str = "all";

static LISTENER_COUNTER: AtomicU64 = AtomicU64::new(1);

// ============================================================================
// ListenerId
// ============================================================================

/// 이벤트 리스너 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) fn next() -> Self {
        Self(LISTENER_COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

// ============================================================================
// Listener
// ============================================================================

/// 이벤트 소스 쪽에 저장되는 구독 정보
#[derive(Clone)]
pub(crate) struct Listener {
    pub(crate) id: ListenerId,
    pub(crate) callback: Function,
    /// 콜백이 바인딩될 인스턴스
    pub(crate) context: WeakInstance,
    /// 한 번 호출 후 자동 제거
    pub(crate) once: bool,
    /// `listen_to` 로 등록한 구독자
    pub(crate) listener: Option<InstanceId>,
}

impl Listener {
    pub(crate) fn matches(
        &self,
        callback: Option<FunctionId>,
        listener: Option<InstanceId>,
    ) -> bool {
        callback.map_or(true, |id| self.callback.id() == id)
            && listener.map_or(true, |id| self.listener == Some(id))
    }
}

// ============================================================================
// Listening
// ============================================================================

/// 구독자 쪽에 저장되는 `listen_to` 추적 정보
#[derive(Clone)]
pub(crate) struct Listening {
    pub(crate) source: WeakInstance,
    pub(crate) source_id: InstanceId,
    pub(crate) event: String,
    pub(crate) callback: FunctionId,
}
