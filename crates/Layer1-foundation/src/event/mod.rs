//! Event System - 이벤트 발행/구독 기본 연산
//!
//! 이벤트 overlay(네임스페이스, 등록 이벤트)가 올라가는 바닥 계층입니다.
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Instance (source)                       │
//! │  trigger(event, payload) ───────────────────────────────┐   │
//! │         │                                                │   │
//! │         ▼                                                ▼   │
//! │  ┌──────────────┐  ┌──────────────┐        ┌──────────────┐ │
//! │  │ on(event)    │  │ once(event)  │  ...   │ on("all")    │ │
//! │  │ this=source  │  │ 호출 후 제거 │        │ [name, data] │ │
//! │  └──────────────┘  └──────────────┘        └──────────────┘ │
//! │         ▲                                                   │
//! │         └── listen_to(source, ..) : this=listener           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 사용법
//!
//! ```ignore
//! use mixin_foundation::{Events, Function, Instance, Value};
//!
//! let panel = Instance::new();
//! let cb = Function::callback(|_this, args| {
//!     println!("changed: {:?}", args);
//!     Ok(())
//! });
//!
//! panel.on("change", cb.clone());
//! panel.trigger("change", Value::from(1))?;
//! panel.off(Some("change"), Some(&cb));
//! ```

pub mod bus;
pub mod types;

// Re-exports
pub use bus::Events;
pub use types::{ListenerId, ALL_EVENTS};

pub(crate) use bus::EventTable;
pub(crate) use types::Listening;
