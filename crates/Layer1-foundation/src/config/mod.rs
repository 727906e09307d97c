//! Config - 선언 설정
//!
//! - `events.rs` - EventsConfig (네임스페이스 + 카탈로그)
//! - `declaration.rs` - JSON 선언 (데이터 mixin 소스)

mod declaration;
mod events;

pub use declaration::{Declaration, DECLARATION_FILE};
pub use events::EventsConfig;
