//! ClassEvents - 네임스페이스 이벤트 overlay
//!
//! 발행/구독 기본 연산(`Events`) 위에 다음을 얹습니다.
//!
//! - `namespace.rs` - alias 치환 + 네임스페이스 접두어
//! - `registry.rs` - 등록 핸들러 (`HandlerRef`)
//!
//! 등록 이벤트는 최종 이벤트 이름을 키로 `__registeredEvents` 필드에 저장되며,
//! `attach_registered_events` / `detach_registered_events` 로 한꺼번에
//! 붙였다 뗄 수 있습니다.
//!
//! ## 사용법
//!
//! ```ignore
//! use mixin_core::{class_events, Behaviour, ClassEvents};
//!
//! let panel = Instance::new();
//! panel.include(class_events(), false)?;
//! panel.set_ns("panel");
//!
//! panel.register_event("open", "onOpen");   // 이름으로 등록 (late binding)
//! panel.attach_registered_events(true);
//! panel.fire("open", Value::Null)?;         // "panel:open" 발행
//! panel.detach_registered_events();
//! ```
//!
//! 주의: `Named` 핸들러는 detach 시점의 메서드로 `off` 합니다.
//! attach 이후 메서드를 바꾸면 이전 구독은 떨어지지 않습니다.

pub mod namespace;
pub mod registry;

pub use registry::HandlerRef;

use crate::args::{arg, arg_bool, arg_fn, arg_str};
use crate::delegate::{create, Mixin};
use mixin_foundation::strings::{EVENTS_CATALOG, EVENTS_CONFIG, EVENTS_NS, REGISTERED_EVENTS};
use mixin_foundation::{
    Error, Events, EventsConfig, Function, Instance, Object, Result, Value,
};
use std::collections::BTreeMap;
use tracing::debug;

// ============================================================================
// ClassEvents trait
// ============================================================================

/// 네임스페이스 이벤트 연산
pub trait ClassEvents {
    /// 현재 이벤트 설정 (`eventsConfig` 가 없거나 카탈로그가 없으면 `None`)
    fn events_config(&self) -> Option<EventsConfig>;

    fn get_ns(&self) -> String;
    fn set_ns(&self, ns: &str) -> &Self;
    fn has_ns(&self) -> bool;

    fn get_ns_event(&self, alias: &str) -> Option<String>;
    fn set_ns_event(&self, alias: &str, event: &str) -> &Self;
    fn has_ns_event(&self, alias: &str) -> bool;

    /// 카탈로그 확장. 객체가 아니면 무시
    fn extend_ns_event_catalog(&self, catalog: &Value) -> &Self;

    /// 최종 이벤트 이름
    fn ns_event(&self, event: &str) -> String;

    /// 이벤트 이름이 네임스페이스를 포함하는지
    fn event_with_ns(&self, event: &str) -> bool;

    /// 네임스페이스 이벤트 발행
    fn fire(&self, event: &str, payload: Value) -> Result<&Self>;

    /// `source` (기본: 자신) 의 네임스페이스 이벤트 구독
    ///
    /// 동적 메서드 `when` / `after` 는 `Value` 로 인스턴스를 넘길 수 없어
    /// 항상 자신을 소스로 씁니다. 다른 인스턴스를 구독하려면 이 trait 을 쓰세요.
    fn when(&self, event: &str, callback: Function, source: Option<&Instance>) -> &Self;

    /// `when` 과 같지만 한 번 호출 후 제거
    fn after(&self, event: &str, callback: Function, source: Option<&Instance>) -> &Self;

    /// 이벤트 등록 (같은 최종 이름이면 교체)
    fn register_event(&self, event: &str, handler: impl Into<HandlerRef>) -> &Self;

    /// 등록 해제 (없으면 no-op)
    fn unregister_event(&self, event: &str) -> &Self;

    /// 등록 테이블 (최종 이벤트 이름 → 핸들러)
    fn registered_events(&self) -> BTreeMap<String, HandlerRef>;

    /// 등록 핸들러를 지금 시점 기준으로 해석
    fn resolve_handler(&self, event: &str) -> Option<Function>;

    /// 등록 이벤트 전부 구독. `detach_first` 가 false 면 중복 구독될 수 있음
    fn attach_registered_events(&self, detach_first: bool) -> &Self;

    /// 등록 이벤트 전부 구독 해제 (현재 해석된 핸들러 기준)
    fn detach_registered_events(&self) -> &Self;

    /// 등록과 동시에 구독
    fn on_registered(&self, event: &str, handler: impl Into<HandlerRef>) -> &Self;
}

impl ClassEvents for Instance {
    fn events_config(&self) -> Option<EventsConfig> {
        EventsConfig::from_value(&self.get(EVENTS_CONFIG)?)
    }

    fn get_ns(&self) -> String {
        self.events_config().map(|c| c.ns).unwrap_or_default()
    }

    fn set_ns(&self, ns: &str) -> &Self {
        edit_events_config(self, |config| {
            config.insert(EVENTS_NS.to_string(), Value::from(ns));
        });
        self
    }

    fn has_ns(&self) -> bool {
        self.events_config()
            .map(|c| namespace::has_ns(&c))
            .unwrap_or(false)
    }

    fn get_ns_event(&self, alias: &str) -> Option<String> {
        self.events_config()?.catalog.remove(alias)
    }

    fn set_ns_event(&self, alias: &str, event: &str) -> &Self {
        edit_events_config(self, |config| {
            if let Some(catalog) = config.get_mut(EVENTS_CATALOG).and_then(Value::as_object_mut) {
                catalog.insert(alias.to_string(), Value::from(event));
            }
        });
        self
    }

    fn has_ns_event(&self, alias: &str) -> bool {
        self.events_config()
            .is_some_and(|c| c.catalog.contains_key(alias))
    }

    fn extend_ns_event_catalog(&self, catalog: &Value) -> &Self {
        let Some(entries) = catalog.as_object() else {
            return self;
        };
        edit_events_config(self, |config| {
            if let Some(catalog) = config.get_mut(EVENTS_CATALOG).and_then(Value::as_object_mut) {
                catalog.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        });
        self
    }

    fn ns_event(&self, event: &str) -> String {
        namespace::resolve(event, self.events_config().as_ref())
    }

    fn event_with_ns(&self, event: &str) -> bool {
        self.events_config()
            .is_some_and(|c| namespace::contains_ns(event, &c))
    }

    fn fire(&self, event: &str, payload: Value) -> Result<&Self> {
        self.trigger(&self.ns_event(event), payload)?;
        Ok(self)
    }

    fn when(&self, event: &str, callback: Function, source: Option<&Instance>) -> &Self {
        let event = self.ns_event(event);
        self.listen_to(source.unwrap_or(self), &event, callback)
    }

    fn after(&self, event: &str, callback: Function, source: Option<&Instance>) -> &Self {
        let event = self.ns_event(event);
        self.listen_to_once(source.unwrap_or(self), &event, callback)
    }

    fn register_event(&self, event: &str, handler: impl Into<HandlerRef>) -> &Self {
        let event = self.ns_event(event);
        let handler = handler.into();
        debug!(instance = %self.id(), event = %event, handler = ?handler, "Registering event");

        let mut registry = registry_of(self);
        registry.insert(event, handler.to_value());
        self.set(REGISTERED_EVENTS, registry);
        self
    }

    fn unregister_event(&self, event: &str) -> &Self {
        let event = self.ns_event(event);
        let mut registry = registry_of(self);
        if registry.remove(&event).is_some() {
            debug!(instance = %self.id(), event = %event, "Unregistered event");
            self.set(REGISTERED_EVENTS, registry);
        }
        self
    }

    fn registered_events(&self) -> BTreeMap<String, HandlerRef> {
        registry_of(self)
            .iter()
            .filter_map(|(event, handler)| {
                Some((event.clone(), HandlerRef::from_value(handler)?))
            })
            .collect()
    }

    fn resolve_handler(&self, event: &str) -> Option<Function> {
        let event = self.ns_event(event);
        let handler = registry_of(self).get(&event).and_then(HandlerRef::from_value)?;
        handler.resolve(self)
    }

    fn attach_registered_events(&self, detach_first: bool) -> &Self {
        if detach_first {
            self.detach_registered_events();
        }

        for (event, handler) in self.registered_events() {
            match handler.resolve(self) {
                Some(callback) => {
                    self.on(&event, callback);
                }
                None => debug!(
                    instance = %self.id(),
                    event = %event,
                    handler = ?handler,
                    "Registered handler not found, skipping attach"
                ),
            }
        }
        self
    }

    fn detach_registered_events(&self) -> &Self {
        for (event, handler) in self.registered_events() {
            if let Some(callback) = handler.resolve(self) {
                self.off(Some(&event), Some(&callback));
            }
        }
        self
    }

    fn on_registered(&self, event: &str, handler: impl Into<HandlerRef>) -> &Self {
        let handler = handler.into();
        self.register_event(event, handler.clone());
        if let Some(callback) = handler.resolve(self) {
            self.on(&self.ns_event(event), callback);
        }
        self
    }
}

/// `eventsConfig` 를 자신의 필드로 꺼내 수정 후 다시 저장
///
/// 프로토타입에만 있던 설정은 이 시점에 인스턴스 소유로 복제됩니다.
fn edit_events_config(target: &Instance, edit: impl FnOnce(&mut Object)) {
    let mut config = target
        .get(EVENTS_CONFIG)
        .and_then(Value::into_object)
        .unwrap_or_default();

    if !config.get(EVENTS_NS).is_some_and(|v| v.as_str().is_some()) {
        config.insert(EVENTS_NS.to_string(), Value::from(""));
    }
    if !config.get(EVENTS_CATALOG).is_some_and(Value::is_object) {
        config.insert(EVENTS_CATALOG.to_string(), Value::object());
    }

    edit(&mut config);
    target.set(EVENTS_CONFIG, config);
}

fn registry_of(target: &Instance) -> Object {
    target
        .get(REGISTERED_EVENTS)
        .and_then(Value::into_object)
        .unwrap_or_default()
}

// ============================================================================
// Mixin
// ============================================================================

/// ClassEvents mixin (초기화 메서드 없음)
pub fn class_events() -> Mixin {
    let mut object = Object::new();
    object.insert(EVENTS_CONFIG.to_string(), EventsConfig::new().to_value());
    object.insert(REGISTERED_EVENTS.to_string(), Value::object());

    let mut method = |name: &'static str, f: fn(&Instance, &[Value]) -> Result<Value>| {
        object.insert(name.to_string(), Value::from(Function::new(name, f)));
    };

    // 발행/구독 기본 연산
    method("on", |this, args| {
        this.on(&arg_str(args, 0, "on")?, arg_fn(args, 1, "on")?);
        Ok(Value::Null)
    });
    method("once", |this, args| {
        this.once(&arg_str(args, 0, "once")?, arg_fn(args, 1, "once")?);
        Ok(Value::Null)
    });
    method("off", |this, args| {
        let event = arg(args, 0);
        let callback = arg(args, 1);
        this.off(event.as_str(), callback.as_function());
        Ok(Value::Null)
    });
    method("trigger", |this, args| {
        this.trigger(&arg_str(args, 0, "trigger")?, arg(args, 1))?;
        Ok(Value::Null)
    });

    // 네임스페이스 이벤트
    method("fire", |this, args| {
        this.fire(&arg_str(args, 0, "fire")?, arg(args, 1))?;
        Ok(Value::Null)
    });
    // 소스는 항상 자신 (다른 소스는 ClassEvents::when / after)
    method("when", |this, args| {
        this.when(&arg_str(args, 0, "when")?, arg_fn(args, 1, "when")?, None);
        Ok(Value::Null)
    });
    method("after", |this, args| {
        this.after(&arg_str(args, 0, "after")?, arg_fn(args, 1, "after")?, None);
        Ok(Value::Null)
    });

    // 네임스페이스 / 카탈로그
    method("getNs", |this, _| Ok(Value::from(this.get_ns())));
    method("setNs", |this, args| {
        this.set_ns(&arg_str(args, 0, "setNs")?);
        Ok(Value::Null)
    });
    method("hasNs", |this, _| Ok(Value::from(this.has_ns())));
    method("getNsEvent", |this, args| {
        Ok(Value::from(this.get_ns_event(&arg_str(args, 0, "getNsEvent")?)))
    });
    method("setNsEvent", |this, args| {
        this.set_ns_event(
            &arg_str(args, 0, "setNsEvent")?,
            &arg_str(args, 1, "setNsEvent")?,
        );
        Ok(Value::Null)
    });
    method("hasNsEvent", |this, args| {
        Ok(Value::from(this.has_ns_event(&arg_str(args, 0, "hasNsEvent")?)))
    });
    method("extendNsEventCatalog", |this, args| {
        this.extend_ns_event_catalog(&arg(args, 0));
        Ok(Value::Null)
    });
    method("nsEvent", |this, args| {
        Ok(Value::from(this.ns_event(&arg_str(args, 0, "nsEvent")?)))
    });
    method("eventWithNs", |this, args| {
        Ok(Value::from(this.event_with_ns(&arg_str(args, 0, "eventWithNs")?)))
    });

    // 등록 이벤트
    method("registerEvent", |this, args| {
        let event = arg_str(args, 0, "registerEvent")?;
        let handler = HandlerRef::from_value(&arg(args, 1)).ok_or_else(|| {
            Error::invalid_argument("registerEvent", "handler must be a function or method name")
        })?;
        this.register_event(&event, handler);
        Ok(Value::Null)
    });
    method("unregisterEvent", |this, args| {
        this.unregister_event(&arg_str(args, 0, "unregisterEvent")?);
        Ok(Value::Null)
    });
    method("attachRegisteredEvents", |this, args| {
        this.attach_registered_events(arg_bool(args, 0, true));
        Ok(Value::Null)
    });
    method("detachRegisteredEvents", |this, _| {
        this.detach_registered_events();
        Ok(Value::Null)
    });

    create("classEvents", object, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviour::Behaviour;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, Function) {
        let count = Arc::new(AtomicUsize::new(0));
        let hits = count.clone();
        let callback = Function::callback(move |_, _| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        (count, callback)
    }

    fn evented(ns: &str) -> Instance {
        let target = Instance::new();
        target.include(class_events(), false).unwrap();
        target.set_ns(ns);
        target
    }

    #[test]
    fn test_mixin_installs_state_and_methods() {
        let target = Instance::new();
        target.include(class_events(), false).unwrap();

        assert_eq!(target.events_config(), Some(EventsConfig::new()));
        assert!(target.registered_events().is_empty());
        assert!(target.resolve_method("fire").is_some());
        assert!(target.resolve_method("attachRegisteredEvents").is_some());
    }

    #[test]
    fn test_mixin_keeps_declared_config() {
        let target = Instance::new();
        target.set(
            EVENTS_CONFIG,
            EventsConfig::new().ns("app").event("ready", "app:ready").to_value(),
        );

        target.include(class_events(), false).unwrap();
        assert_eq!(target.get_ns(), "app");
        assert_eq!(target.get_ns_event("ready").as_deref(), Some("app:ready"));
    }

    #[test]
    fn test_mixin_keeps_prototype_config() {
        let proto = Instance::new();
        proto.set_ns("app");
        proto.set_ns_event("ready", "app:ready");

        let child = Instance::create(&proto);
        child.include(class_events(), false).unwrap();

        assert_eq!(child.get_ns(), "app");
        assert_eq!(child.ns_event("x"), "app:x");
        assert_eq!(child.ns_event("ready"), "app:ready");
        assert!(child.resolve_method("fire").is_some());
    }

    #[test]
    fn test_ns_accessors() {
        let target = evented("");
        assert!(!target.has_ns());

        target.set_ns("ui");
        assert_eq!(target.get_ns(), "ui");
        assert!(target.has_ns());

        target.set_ns_event("open", "ui:open");
        assert!(target.has_ns_event("open"));
        assert!(!target.has_ns_event("close"));

        target.extend_ns_event_catalog(&Value::from_iter([("close", "ui:close")]));
        target.extend_ns_event_catalog(&Value::from("ignored"));
        assert_eq!(target.get_ns_event("close").as_deref(), Some("ui:close"));

        assert_eq!(target.ns_event("open"), "ui:open");
        assert_eq!(target.ns_event("resize"), "ui:resize");
        assert!(target.event_with_ns("ui:resize"));
    }

    #[test]
    fn test_setters_create_missing_config() {
        let target = Instance::new();
        assert_eq!(target.events_config(), None);
        assert_eq!(target.ns_event("bar"), "bar");

        target.set_ns("foo");
        assert_eq!(target.ns_event("bar"), "foo:bar");
    }

    #[test]
    fn test_setters_do_not_touch_prototype() {
        let proto = Instance::new();
        proto.include(class_events(), false).unwrap();
        proto.set_ns("shared");

        let child = Instance::create(&proto);
        assert_eq!(child.get_ns(), "shared");

        child.set_ns("mine");
        assert_eq!(child.get_ns(), "mine");
        assert_eq!(proto.get_ns(), "shared");
    }

    #[test]
    fn test_fire_uses_namespace() {
        let target = evented("app");
        let (count, callback) = counter();
        target.on("app:saved", callback);

        target.fire("saved", Value::Null).unwrap();
        target.fire("app:saved", Value::Null).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_when_and_after() {
        let target = evented("app");
        let (persistent, on_each) = counter();
        let (single, on_first) = counter();

        target.when("tick", on_each, None);
        target.after("tick", on_first, None);

        target.fire("tick", Value::Null).unwrap();
        target.fire("tick", Value::Null).unwrap();

        assert_eq!(persistent.load(Ordering::SeqCst), 2);
        assert_eq!(single.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_when_on_other_source() {
        let listener = evented("app");
        let source = Instance::new();
        let (count, callback) = counter();

        listener.when("ready", callback, Some(&source));
        source.trigger("app:ready", Value::Null).unwrap();
        source.trigger("ready", Value::Null).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_register_replaces_same_final_name() {
        let target = evented("app");
        let (first, a) = counter();
        let (second, b) = counter();

        target.register_event("x", a);
        target.register_event("app:x", b);
        assert_eq!(target.registered_events().len(), 1);

        target.attach_registered_events(true);
        target.fire("x", Value::Null).unwrap();

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_attach_detach_round_trip() {
        let target = evented("app");
        let (count, callback) = counter();
        target.register_event("x", callback);

        target.attach_registered_events(true);
        target.fire("x", Value::Null).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        target.detach_registered_events();
        target.fire("x", Value::Null).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // detach 후에도 등록은 유지
        assert_eq!(target.registered_events().len(), 1);
        target.attach_registered_events(true);
        target.fire("x", Value::Null).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_attach_twice_is_idempotent() {
        let target = evented("app");
        let (count, callback) = counter();
        target.register_event("x", callback);

        target.attach_registered_events(true);
        target.attach_registered_events(true);
        target.fire("x", Value::Null).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(target.listener_count("app:x"), 1);
    }

    #[test]
    fn test_attach_without_detach_duplicates() {
        let target = evented("app");
        let (count, callback) = counter();
        target.register_event("x", callback);

        target.attach_registered_events(true);
        target.attach_registered_events(false);
        target.fire("x", Value::Null).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_named_handler_late_binding() {
        let target = evented("app");
        let (old_count, old_method) = counter();
        let (new_count, new_method) = counter();

        target.set("onX", old_method);
        target.register_event("x", "onX");
        target.attach_registered_events(true);

        // attach 후 메서드 교체: 디스패치는 구독 당시 함수, resolve 는 새 함수
        target.set("onX", new_method.clone());
        assert_eq!(target.resolve_handler("x"), Some(new_method));

        // detach 는 새 함수로 off 하므로 이전 구독이 남음
        target.detach_registered_events();
        target.fire("x", Value::Null).unwrap();

        assert_eq!(old_count.load(Ordering::SeqCst), 1);
        assert_eq!(new_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_named_handler_bound_to_owner() {
        let target = evented("app");
        target.set(
            "onSave",
            Function::callback(|this, args| {
                this.set("saved", args.first().cloned().unwrap_or_default());
                Ok(())
            }),
        );
        target.register_event("save", "onSave");
        target.attach_registered_events(true);

        target.fire("save", Value::from(3)).unwrap();
        assert_eq!(target.get("saved"), Some(Value::from(3)));
    }

    #[test]
    fn test_missing_named_handler_is_skipped() {
        let target = evented("app");
        target.register_event("x", "nope");

        target.attach_registered_events(true);
        assert_eq!(target.listener_count("app:x"), 0);
        assert!(target.resolve_handler("x").is_none());
    }

    #[test]
    fn test_unregister() {
        let target = evented("app");
        let (_, callback) = counter();
        target.register_event("x", callback);

        target.unregister_event("never");
        target.unregister_event("x");
        assert!(target.registered_events().is_empty());
        assert!(target.resolve_handler("x").is_none());
    }

    #[test]
    fn test_on_registered() {
        let target = evented("app");
        let (count, callback) = counter();

        target.on_registered("x", callback);
        target.fire("x", Value::Null).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        target.detach_registered_events();
        target.fire("x", Value::Null).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dynamic_methods() {
        let target = evented("app");
        let (count, callback) = counter();

        target
            .call("registerEvent", &[Value::from("x"), Value::from(callback)])
            .unwrap();
        target.call("attachRegisteredEvents", &[]).unwrap();
        target.call("fire", &[Value::from("x")]).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert_eq!(
            target.call("nsEvent", &[Value::from("y")]).unwrap(),
            Value::from("app:y")
        );
        assert!(matches!(
            target.call("registerEvent", &[Value::from("x"), Value::from(1)]),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
