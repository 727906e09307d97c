//! Event Bus - 인스턴스 단위 발행/구독
//!
//! 각 `Instance` 가 자신의 리스너 테이블을 가지며, `Events` trait 으로
//! on / off / trigger / listen_to / listen_to_once 를 제공합니다.
//!
//! 디스패치는 동기식이고 재진입 가능합니다. 리스너 목록을 복사한 뒤
//! 락을 풀고 호출하므로, 핸들러가 다른 이벤트를 바로 발행할 수 있습니다.

use super::types::{Listener, ListenerId, Listening, ALL_EVENTS};
use crate::instance::{Instance, InstanceId};
use crate::value::{Function, FunctionId, Value};
use crate::Result;
use std::collections::HashMap;
use tracing::{debug, trace};

// ============================================================================
// EventTable
// ============================================================================

/// 이벤트 이름별 리스너 목록
#[derive(Default)]
pub(crate) struct EventTable {
    handlers: HashMap<String, Vec<Listener>>,
}

impl EventTable {
    fn add(&mut self, event: &str, listener: Listener) {
        self.handlers
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }

    /// 조건에 맞는 리스너 제거 (제거된 목록 반환)
    fn remove(
        &mut self,
        event: Option<&str>,
        callback: Option<FunctionId>,
        listener: Option<InstanceId>,
    ) -> Vec<(String, Listener)> {
        let mut removed = Vec::new();

        for (name, listeners) in self.handlers.iter_mut() {
            if event.is_some_and(|e| e != name) {
                continue;
            }
            listeners.retain(|l| {
                if l.matches(callback, listener) {
                    removed.push((name.clone(), l.clone()));
                    false
                } else {
                    true
                }
            });
        }

        self.handlers.retain(|_, listeners| !listeners.is_empty());
        removed
    }

    /// 디스패치용 스냅샷. once 리스너와 컨텍스트가 사라진 리스너는 여기서 제거
    fn take_for_dispatch(&mut self, event: &str) -> (Vec<Listener>, Vec<Listener>) {
        let Some(listeners) = self.handlers.get_mut(event) else {
            return (Vec::new(), Vec::new());
        };

        listeners.retain(|l| l.context.is_alive());
        let snapshot = listeners.clone();
        let fired_once: Vec<Listener> = snapshot.iter().filter(|l| l.once).cloned().collect();
        listeners.retain(|l| !l.once);

        if listeners.is_empty() {
            self.handlers.remove(event);
        }
        (snapshot, fired_once)
    }

    fn count(&self, event: &str) -> usize {
        self.handlers.get(event).map_or(0, Vec::len)
    }
}

// ============================================================================
// Events trait
// ============================================================================

/// 발행/구독 기본 연산
pub trait Events {
    /// 이벤트 구독 (콜백은 이 인스턴스에 바인딩)
    fn on(&self, event: &str, callback: Function) -> &Self;

    /// 한 번만 호출되는 구독
    fn once(&self, event: &str, callback: Function) -> &Self;

    /// 구독 해제. `None` 은 "전부" 를 의미
    fn off(&self, event: Option<&str>, callback: Option<&Function>) -> &Self;

    /// 이벤트 발행. 핸들러 에러는 그대로 전파되고 남은 핸들러는 호출되지 않음
    fn trigger(&self, event: &str, payload: Value) -> Result<&Self>;

    /// `source` 의 이벤트를 구독 (콜백은 이 인스턴스에 바인딩)
    fn listen_to(&self, source: &Instance, event: &str, callback: Function) -> &Self;

    /// `source` 의 이벤트를 한 번만 구독
    fn listen_to_once(&self, source: &Instance, event: &str, callback: Function) -> &Self;

    /// `listen_to` 로 만든 구독 해제
    fn stop_listening(
        &self,
        source: Option<&Instance>,
        event: Option<&str>,
        callback: Option<&Function>,
    ) -> &Self;

    /// 이벤트의 리스너 수
    fn listener_count(&self, event: &str) -> usize;
}

impl Instance {
    fn subscribe(&self, event: &str, callback: Function, context: &Instance, once: bool) {
        let listener = if context.ptr_eq(self) {
            None
        } else {
            Some(context.id())
        };
        let id = ListenerId::next();

        debug!(
            source = %self.id(),
            listener_id = %id,
            event,
            callback = ?callback,
            once,
            "Registering event listener"
        );

        self.inner.write().events.add(
            event,
            Listener {
                id,
                callback,
                context: context.downgrade(),
                once,
                listener,
            },
        );
    }

    fn listen(&self, source: &Instance, event: &str, callback: Function, once: bool) {
        let callback_id = callback.id();
        source.subscribe(event, callback, self, once);

        if source.ptr_eq(self) {
            return;
        }
        let source_id = source.id();
        let mut state = self.inner.write();
        state.listening.retain(|l| l.source.is_alive());
        state.listening.push(Listening {
            source: source.downgrade(),
            source_id,
            event: event.to_string(),
            callback: callback_id,
        });
    }

    fn unsubscribe(
        &self,
        event: Option<&str>,
        callback: Option<FunctionId>,
        listener: Option<InstanceId>,
    ) {
        let removed = self.inner.write().events.remove(event, callback, listener);
        if removed.is_empty() {
            return;
        }

        debug!(
            source = %self.id(),
            event = event.unwrap_or("*"),
            count = removed.len(),
            "Unregistered event listeners"
        );
        self.forget_listening(&removed);
    }

    /// 제거된 `listen_to` 구독을 구독자 쪽 추적 목록에서도 지움
    fn forget_listening(&self, removed: &[(String, Listener)]) {
        let source_id = self.id();
        for (event, listener) in removed {
            if listener.listener.is_none() {
                continue;
            }
            let Some(subscriber) = listener.context.upgrade() else {
                continue;
            };
            let callback = listener.callback.id();
            let mut state = subscriber.inner.write();
            if let Some(pos) = state.listening.iter().position(|l| {
                l.source_id == source_id && l.event == *event && l.callback == callback
            }) {
                state.listening.remove(pos);
            }
        }
    }

    fn dispatch(&self, listeners: &[Listener], args: &[Value]) -> Result<()> {
        for listener in listeners {
            let Some(context) = listener.context.upgrade() else {
                continue;
            };
            trace!(
                source = %self.id(),
                listener_id = %listener.id,
                "Delivering event to listener"
            );
            listener.callback.call(&context, args)?;
        }
        Ok(())
    }
}

impl Events for Instance {
    fn on(&self, event: &str, callback: Function) -> &Self {
        self.subscribe(event, callback, self, false);
        self
    }

    fn once(&self, event: &str, callback: Function) -> &Self {
        self.subscribe(event, callback, self, true);
        self
    }

    fn off(&self, event: Option<&str>, callback: Option<&Function>) -> &Self {
        self.unsubscribe(event, callback.map(Function::id), None);
        self
    }

    fn trigger(&self, event: &str, payload: Value) -> Result<&Self> {
        let ((direct, direct_once), (all, all_once)) = {
            let mut state = self.inner.write();
            let direct = state.events.take_for_dispatch(event);
            let all = if event == ALL_EVENTS {
                (Vec::new(), Vec::new())
            } else {
                state.events.take_for_dispatch(ALL_EVENTS)
            };
            (direct, all)
        };

        trace!(
            source = %self.id(),
            event,
            listeners = direct.len() + all.len(),
            "Triggering event"
        );

        let fired_once: Vec<(String, Listener)> = direct_once
            .into_iter()
            .map(|l| (event.to_string(), l))
            .chain(all_once.into_iter().map(|l| (ALL_EVENTS.to_string(), l)))
            .collect();
        self.forget_listening(&fired_once);

        self.dispatch(&direct, std::slice::from_ref(&payload))?;
        self.dispatch(&all, &[Value::from(event), payload])?;
        Ok(self)
    }

    fn listen_to(&self, source: &Instance, event: &str, callback: Function) -> &Self {
        self.listen(source, event, callback, false);
        self
    }

    fn listen_to_once(&self, source: &Instance, event: &str, callback: Function) -> &Self {
        self.listen(source, event, callback, true);
        self
    }

    fn stop_listening(
        &self,
        source: Option<&Instance>,
        event: Option<&str>,
        callback: Option<&Function>,
    ) -> &Self {
        let own_id = self.id();

        // 자기 자신을 대상으로 한 listen_to 는 on 과 같으므로 off 로 처리
        if source.is_some_and(|s| s.ptr_eq(self)) {
            return self.off(event, callback);
        }

        let targets: Vec<Listening> = {
            let state = self.inner.read();
            state
                .listening
                .iter()
                .filter(|l| source.map_or(true, |s| s.id() == l.source_id))
                .filter(|l| event.map_or(true, |e| e == l.event))
                .filter(|l| callback.map_or(true, |c| c.id() == l.callback))
                .cloned()
                .collect()
        };

        for listening in &targets {
            if let Some(source) = listening.source.upgrade() {
                source.unsubscribe(
                    Some(&listening.event),
                    Some(listening.callback),
                    Some(own_id),
                );
            }
        }

        // 소스가 이미 사라진 추적 정보도 정리
        self.inner.write().listening.retain(|l| {
            l.source.is_alive()
                && !targets.iter().any(|t| {
                    t.source_id == l.source_id && t.event == l.event && t.callback == l.callback
                })
        });
        self
    }

    fn listener_count(&self, event: &str) -> usize {
        self.inner.read().events.count(event)
    }
}
