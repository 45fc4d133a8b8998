//! The cache tree and query orchestrator.
//!
//! Every address segment that has ever been observed gets a node holding the
//! character offset where its value begins. A node starts unscanned, becomes a
//! branch when a population pass enumerates its keys, and becomes a leaf the
//! first time a query terminates exactly on it. The tree only grows; nothing
//! is evicted for the lifetime of the cache.

use std::collections::HashMap;
use std::path::PathBuf;

use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde_json::Value;
use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::scan::Scanner;
use crate::source::{FileSource, MemorySource, Source};
use crate::{CacheOptions, Error, Result};

mod dump;

type NodeId = usize;
type SegmentBuf<'a> = SmallVec<[&'a str; 8]>;

const ROOT: NodeId = 0;

enum NodeState {
    /// Offset known, content never examined.
    Unscanned,
    /// Keys of the object at this offset, enumerated in full.
    Branch(HashMap<SmolStr, NodeId>),
    /// Fully parsed value; never rescanned.
    Leaf(Value),
}

struct Node {
    position: u64,
    state: NodeState,
}

/// Lazy, cached, path-addressed view of one JSON document.
///
/// Queries take `&mut self`; concurrent access has to be serialized by the
/// caller. Each cache miss opens a fresh scan of the backing source, because
/// the source only supports forward skipping, not seeking.
pub struct JsonCache<S: Source> {
    source: S,
    options: CacheOptions,
    nodes: Vec<Node>,
}

impl JsonCache<FileSource> {
    /// Creates a cache over a JSON file on disk.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(FileSource::new(path))
    }
}

impl JsonCache<MemorySource> {
    /// Creates a cache over an in-memory JSON document.
    pub fn from_str(document: impl AsRef<str>) -> Self {
        Self::new(MemorySource::new(document.as_ref()))
    }
}

impl<S: Source> JsonCache<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, CacheOptions::default())
    }

    pub fn with_options(source: S, options: CacheOptions) -> Self {
        Self {
            source,
            options,
            nodes: vec![Node {
                position: 0,
                state: NodeState::Unscanned,
            }],
        }
    }

    /// Resolves `address` to the value it names, reading only as much of the
    /// document as necessary.
    ///
    /// Offsets of every sibling key encountered along the way are cached, so
    /// later queries into the same object levels do not rescan them.
    pub fn get(&mut self, address: &str) -> Result<Value> {
        let separator = self.options.separator;
        let segments: SegmentBuf = address.split(separator).collect();
        let mut node_id = ROOT;
        let mut offset = 0;
        loop {
            match &self.nodes[node_id].state {
                NodeState::Leaf(value) => {
                    trace!("leaf hit for '{address}' after {offset} segment(s)");
                    return resolve_in_value(value, &segments, offset, separator);
                }
                NodeState::Unscanned => {
                    return self.populate(node_id, &segments, offset);
                }
                NodeState::Branch(_) if offset == segments.len() => {
                    // The address names a container whose keys are already
                    // cached. Parse it fresh rather than disturb the branch.
                    let position = self.nodes[node_id].position;
                    debug!("address '{address}' names a populated container at offset {position}");
                    return self.parse_value_at(position);
                }
                NodeState::Branch(children) => {
                    let segment = segments[offset];
                    match children.get(segment) {
                        Some(&child) => {
                            trace!("cached offset for segment '{segment}'");
                            node_id = child;
                            offset += 1;
                        }
                        None => {
                            return Err(Error::key_not_found(
                                segment,
                                join_address(&segments[..offset], separator),
                            ))
                        }
                    }
                }
            }
        }
    }

    /// Resolves `address` and deserializes the value into `T`.
    pub fn get_as<T: DeserializeOwned>(&mut self, address: &str) -> Result<T> {
        let value = self.get(address)?;
        serde_json::from_value(value).map_err(|err| Error::Deserialize(err.to_string()))
    }

    /// Scans one or more object levels starting at `node_id`'s offset,
    /// caching every sibling key seen on the way to the sought segment.
    fn populate(&mut self, node_id: NodeId, segments: &[&str], offset: usize) -> Result<Value> {
        let separator = self.options.separator;
        let position = self.nodes[node_id].position;
        debug!(
            "populating '{}' from offset {position}, {} segment(s) remaining",
            join_address(&segments[..offset], separator),
            segments.len() - offset
        );
        let reader = self.source.open()?;
        let mut scanner = Scanner::open_at(reader, position)?;
        let mut deferred = None;
        let result = self.populate_level(&mut scanner, node_id, segments, offset, &mut deferred)?;
        if let Some(err) = deferred {
            return Err(err);
        }
        result.ok_or_else(|| Error::syntax("population finished without a result", position))
    }

    /// One level of population. Hard errors (syntax, I/O) abort immediately;
    /// lookup and type failures are parked in `deferred` so the enumeration of
    /// the current level always runs to completion and its sibling offsets
    /// stay cached.
    fn populate_level(
        &mut self,
        scanner: &mut Scanner<S::Reader>,
        node_id: NodeId,
        segments: &[&str],
        offset: usize,
        deferred: &mut Option<Error>,
    ) -> Result<Option<Value>> {
        let separator = self.options.separator;

        if offset == segments.len() {
            // The scanner sits at the target value. Materialize it with an
            // independent scan; the shared scan is left untouched so the
            // caller can skip past the value.
            let position = scanner.position();
            let value = self.parse_value_at(position)?;
            debug!(
                "materialized leaf '{}' at offset {position}",
                join_address(segments, separator)
            );
            self.nodes[node_id].state = NodeState::Leaf(value.clone());
            return Ok(Some(value));
        }

        if scanner.peek_clean()? != Some('{') {
            defer(
                deferred,
                Error::not_an_object(join_address(&segments[..offset], separator)),
            );
            return Ok(None);
        }

        let target = segments[offset];
        let mut children: HashMap<SmolStr, NodeId> = HashMap::new();
        let mut result = None;
        let mut found = false;
        while let Some(key) = scanner.next_key()? {
            let child_id = self.new_node(scanner.position());
            let is_target = key == target;
            children.insert(SmolStr::from(key), child_id);
            if is_target {
                found = true;
                result = self.populate_level(scanner, child_id, segments, offset + 1, deferred)?;
                match scanner.peek_clean()? {
                    // The nested level consumed the child object through its
                    // closing brace; only the separator is left to handle.
                    Some(',') => {
                        scanner.read_clean()?;
                    }
                    Some('}') => {}
                    // The child value was left unconsumed: either it became a
                    // leaf through an independent scan, or it was not an
                    // object. Skip it in this scan and keep enumerating.
                    _ => scanner.skip_value()?,
                }
            } else {
                scanner.skip_value()?;
            }
        }
        self.nodes[node_id].state = NodeState::Branch(children);
        if !found {
            defer(
                deferred,
                Error::key_not_found(target, join_address(&segments[..offset], separator)),
            );
        }
        Ok(result)
    }

    /// Opens an independent scan at `position` and reads one full value.
    fn parse_value_at(&self, position: u64) -> Result<Value> {
        let reader = self.source.open()?;
        let mut scanner = Scanner::open_at(reader, position)?;
        scanner.read_value()
    }

    fn new_node(&mut self, position: u64) -> NodeId {
        self.nodes.push(Node {
            position,
            state: NodeState::Unscanned,
        });
        self.nodes.len() - 1
    }
}

/// Walks the remaining segments through an already-parsed value.
fn resolve_in_value(
    value: &Value,
    segments: &[&str],
    offset: usize,
    separator: char,
) -> Result<Value> {
    let mut current = value;
    for (idx, segment) in segments[offset..].iter().enumerate() {
        let Value::Object(map) = current else {
            return Err(Error::not_an_object(join_address(
                &segments[..offset + idx],
                separator,
            )));
        };
        current = map.get(*segment).ok_or_else(|| {
            Error::key_not_found(*segment, join_address(&segments[..offset + idx], separator))
        })?;
    }
    Ok(current.clone())
}

fn join_address(segments: &[&str], separator: char) -> String {
    let mut out = String::new();
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            out.push(separator);
        }
        out.push_str(segment);
    }
    out
}

fn defer(slot: &mut Option<Error>, err: Error) {
    if slot.is_none() {
        *slot = Some(err);
    }
}
