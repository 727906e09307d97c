//! 점 경로(`a.b.c`) 기반 접근

use super::{Object, Value};

fn segments(path: &str) -> Vec<&str> {
    path.split('.').filter(|s| !s.is_empty()).collect()
}

/// 경로의 값 조회
pub fn get_path<'a>(object: &'a Object, path: &str) -> Option<&'a Value> {
    let parts = segments(path);
    let (last, parents) = parts.split_last()?;

    let mut current = object;
    for part in parents {
        current = current.get(*part)?.as_object()?;
    }
    current.get(*last)
}

/// 경로 존재 여부
pub fn has_path(object: &Object, path: &str) -> bool {
    get_path(object, path).is_some()
}

/// 경로에 값 설정
///
/// 중간 경로가 없거나 객체가 아니면 빈 객체로 만듭니다.
pub fn set_path(object: &mut Object, path: &str, value: Value) {
    let parts = segments(path);
    let Some((last, parents)) = parts.split_last() else {
        return;
    };

    let mut current = object;
    for part in parents {
        let slot = current
            .entry(part.to_string())
            .or_insert_with(Value::object);
        if !slot.is_object() {
            *slot = Value::object();
        }
        let Value::Object(map) = slot else {
            return;
        };
        current = map;
    }
    current.insert(last.to_string(), value);
}

/// 경로의 값 제거
pub fn remove_path(object: &mut Object, path: &str) -> Option<Value> {
    let parts = segments(path);
    let (last, parents) = parts.split_last()?;

    let mut current = object;
    for part in parents {
        current = current.get_mut(*part)?.as_object_mut()?;
    }
    current.remove(*last)
}
