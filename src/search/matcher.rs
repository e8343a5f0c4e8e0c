use super::path::{encode, Accessor};
use crate::document::node::Value;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// A predicate hit inside a container.
///
/// `container` is the mapping or sequence that directly holds the accepted
/// pair, `value` is the accepted value itself, and `path` is the path from the
/// document root ending with `accessor`.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    pub container: &'a Value,
    pub accessor: Accessor<'a>,
    pub value: &'a Value,
    pub path: String,
}

/// A container being walked, with the position of its next entry.
struct Frame<'a> {
    container: &'a Value,
    path: String,
    next: usize,
}

/// Lazy depth-first search over a document.
///
/// Each call to `next` resumes the walk where the previous one stopped. Entries
/// are visited in insertion order for mappings and position order for
/// sequences. When the predicate accepts a pair, the match is yielded and the
/// walk does not descend into that pair's value. When the predicate fails, the
/// error is yielded once and the walk ends, unless errors are ignored, in which
/// case the pair counts as a non-match and its value is still searched.
pub struct Matches<'a, P, E> {
    stack: Vec<Frame<'a>>,
    predicate: P,
    ignore_errors: bool,
    _error: PhantomData<fn() -> E>,
}

impl<'a, P, E> Matches<'a, P, E>
where
    P: FnMut(Accessor<'_>, &Value) -> Result<bool, E>,
{
    pub fn new(root: &'a Value, predicate: P, ignore_errors: bool) -> Self {
        tracing::debug!(kind = ?root.kind(), ignore_errors, "starting nested search");

        let mut matches = Self {
            stack: Vec::new(),
            predicate,
            ignore_errors,
            _error: PhantomData,
        };
        matches.descend(root, String::new());
        matches
    }

    fn descend(&mut self, node: &'a Value, path: String) {
        if node.is_container() {
            self.stack.push(Frame {
                container: node,
                path,
                next: 0,
            });
        }
    }
}

fn entry_at(container: &Value, position: usize) -> Option<(Accessor<'_>, &Value)> {
    match container {
        Value::Mapping(entries) => entries
            .get_index(position)
            .map(|(key, value)| (Accessor::Key(key), value)),
        Value::Sequence(items) => items
            .get(position)
            .map(|value| (Accessor::Index(position), value)),
        _ => None,
    }
}

impl<'a, P, E> Iterator for Matches<'a, P, E>
where
    P: FnMut(Accessor<'_>, &Value) -> Result<bool, E>,
{
    type Item = Result<Match<'a>, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let container = frame.container;
            let Some((accessor, child)) = entry_at(container, frame.next) else {
                self.stack.pop();
                continue;
            };
            frame.next += 1;
            let child_path = encode(&frame.path, accessor);

            match (self.predicate)(accessor, child) {
                Ok(true) => {
                    return Some(Ok(Match {
                        container,
                        accessor,
                        value: child,
                        path: child_path,
                    }));
                }
                Ok(false) => self.descend(child, child_path),
                Err(_) if self.ignore_errors => {
                    tracing::trace!(path = %child_path, "predicate error ignored");
                    self.descend(child, child_path);
                }
                Err(err) => {
                    self.stack.clear();
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<'a, P, E> FusedIterator for Matches<'a, P, E> where
    P: FnMut(Accessor<'_>, &Value) -> Result<bool, E>
{
}
