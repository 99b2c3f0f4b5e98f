//! Path evaluation over a decoded JSON document.

use serde_json::Value;

use super::{Segment, Selector};

/// One step from a node to a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Key(String),
    Index(usize),
}

impl From<&Step> for Value {
    fn from(step: &Step) -> Self {
        match step {
            Step::Key(key) => Value::String(key.clone()),
            Step::Index(idx) => Value::from(*idx),
        }
    }
}

/// A matched node and the steps that lead to it from the root.
#[derive(Debug, Clone)]
pub struct Match<'a> {
    pub path: Vec<Step>,
    pub value: &'a Value,
}

/// Apply `segments` to `root`, yielding matches in evaluation order.
pub(crate) fn evaluate<'a>(segments: &[Segment], root: &'a Value) -> Vec<Match<'a>> {
    let mut current = vec![Match { path: Vec::new(), value: root }];

    for segment in segments {
        let mut next = Vec::new();
        for m in &current {
            match segment {
                Segment::Child(selector) => {
                    for (step, value) in select(selector, m.value) {
                        let mut path = m.path.clone();
                        path.push(step);
                        next.push(Match { path, value });
                    }
                }
                Segment::Descendant(selector) => {
                    let mut path = m.path.clone();
                    descend(selector, m.value, &mut path, &mut next);
                }
            }
        }
        current = next;
    }

    current
}

/// Children of `value` picked by `selector`, in selector order.
fn select<'a>(selector: &Selector, value: &'a Value) -> Vec<(Step, &'a Value)> {
    match (selector, value) {
        (Selector::Wildcard, _) => children(value).collect(),
        (Selector::Keys(keys), Value::Object(map)) => keys
            .iter()
            .filter_map(|key| map.get(key).map(|v| (Step::Key(key.clone()), v)))
            .collect(),
        (Selector::Indices(indices), Value::Array(items)) => indices
            .iter()
            .filter_map(|&i| resolve_index(i, items.len()))
            .map(|i| (Step::Index(i), &items[i]))
            .collect(),
        (Selector::Slice { start, end }, Value::Array(items)) => {
            let (start, end) = slice_bounds(*start, *end, items.len());
            (start..end).map(|i| (Step::Index(i), &items[i])).collect()
        }
        _ => Vec::new(),
    }
}

/// Walk every descendant of `value` in document order, collecting those
/// the selector picks out of their parent.
fn descend<'a>(selector: &Selector, value: &'a Value, path: &mut Vec<Step>, out: &mut Vec<Match<'a>>) {
    let len = match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        _ => return,
    };

    for (step, child) in children(value) {
        let hit = matches(selector, &step, len);
        path.push(step);
        if hit {
            out.push(Match { path: path.clone(), value: child });
        }
        descend(selector, child, path, out);
        path.pop();
    }
}

fn matches(selector: &Selector, step: &Step, parent_len: usize) -> bool {
    match (selector, step) {
        (Selector::Wildcard, _) => true,
        (Selector::Keys(keys), Step::Key(key)) => keys.contains(key),
        (Selector::Indices(indices), Step::Index(idx)) => {
            indices.iter().any(|&i| resolve_index(i, parent_len) == Some(*idx))
        }
        (Selector::Slice { start, end }, Step::Index(idx)) => {
            let (start, end) = slice_bounds(*start, *end, parent_len);
            (start..end).contains(idx)
        }
        _ => false,
    }
}

fn children(value: &Value) -> Box<dyn Iterator<Item = (Step, &Value)> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter().enumerate().map(|(i, v)| (Step::Index(i), v))),
        Value::Object(map) => Box::new(map.iter().map(|(k, v)| (Step::Key(k.clone()), v))),
        _ => Box::new(std::iter::empty()),
    }
}

/// Negative indices count from the end.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { len + index } else { index };
    (0..len).contains(&resolved).then(|| resolved as usize)
}

/// Half-open `[start, end)` clamped to `0..=len`.
fn slice_bounds(start: Option<i64>, end: Option<i64>, len: usize) -> (usize, usize) {
    let clamp = |bound: i64| -> usize {
        let len = len as i64;
        let b = if bound < 0 { len + bound } else { bound };
        b.clamp(0, len) as usize
    };
    let start = start.map_or(0, clamp);
    let end = end.map_or(len, clamp);
    (start, end.max(start))
}
