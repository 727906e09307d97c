//! 동적 메서드 인자 해석 헬퍼

use mixin_foundation::{Error, Function, Object, Result, Value};

/// i 번째 인자 (없으면 Null)
pub(crate) fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or_default()
}

/// i 번째 인자를 문자열로
pub(crate) fn arg_str(args: &[Value], index: usize, method: &str) -> Result<String> {
    args.get(index)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_argument(method, format!("argument {} must be a string", index)))
}

/// i 번째 인자를 함수로
pub(crate) fn arg_fn(args: &[Value], index: usize, method: &str) -> Result<Function> {
    args.get(index)
        .and_then(Value::as_function)
        .cloned()
        .ok_or_else(|| {
            Error::invalid_argument(method, format!("argument {} must be a function", index))
        })
}

/// i 번째 인자를 bool 로 (없거나 bool 이 아니면 기본값)
pub(crate) fn arg_bool(args: &[Value], index: usize, default: bool) -> bool {
    args.get(index).and_then(Value::as_bool).unwrap_or(default)
}

/// i 번째 인자를 객체로 (객체가 아니면 빈 객체)
pub(crate) fn arg_object(args: &[Value], index: usize) -> Object {
    args.get(index)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// 문자열 배열 해석. 배열이 아니면 빈 목록, 문자열이 아닌 항목은 건너뜀
pub(crate) fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn strings_to_value(items: &[String]) -> Value {
    Value::Array(items.iter().map(|s| Value::from(s.as_str())).collect())
}
