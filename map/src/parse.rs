use indexmap::{IndexMap, IndexSet};

use crate::segment::{is_seg_addr, Segment};
use crate::symbol::Symbol;

/// Group label of segments that stay resident for the program's lifetime.
pub const ROOT_GROUP: &str = "AUTO";
/// The fixed-size resident data group checked against the 64KB limit.
pub const DATA_GROUP: &str = "DGROUP";

/// A duplicate name seen while filling a table. The later entry replaced
/// the earlier one; callers decide how loudly to report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collision {
    Segment(String),
    Symbol(String),
}

/// Everything the checks need, extracted from one linker map.
///
/// The map format is an informal build-tool report, not a grammar: each line
/// is matched against the handful of known shapes and skipped otherwise.
#[derive(Debug, Default)]
pub struct MapFile {
    /// Byte size of the resident data group; 0 when no size line was found.
    pub dgroup_size: u32,
    pub segments: IndexMap<String, Segment>,
    pub symbols: IndexMap<String, Symbol>,
    /// Normalized base addresses (uppercase, no offset) of the overlay
    /// regions, one per `Overlay section` marker.
    pub overlay_bases: IndexSet<String>,
    pub collisions: Vec<Collision>,
}

impl MapFile {
    /// Single pass over the map text. Tables keep the file's own order so
    /// every downstream listing is deterministic.
    pub fn parse(text: &str) -> MapFile {
        let mut map = MapFile::default();
        let mut dgroup: Option<u32> = None;

        for line in text.lines() {
            if dgroup.is_none() {
                if let Some(size) = parse_dgroup(line) {
                    dgroup = Some(size);
                    continue;
                }
            }
            if let Some(seg) = Segment::parse(line) {
                if let Some(prev) = map.segments.insert(seg.name.clone(), seg) {
                    map.collisions.push(Collision::Segment(prev.name));
                }
                continue;
            }
            if let Some(sym) = Symbol::parse(line) {
                if let Some(prev) = map.symbols.insert(sym.name.clone(), sym) {
                    map.collisions.push(Collision::Symbol(prev.name));
                }
                continue;
            }
            if let Some(base) = parse_overlay_base(line) {
                map.overlay_bases.insert(base);
            }
        }

        map.dgroup_size = dgroup.unwrap_or(0);
        map
    }
}

/// `DGROUP SSSS:OOOO size` - the group table row for the resident data
/// group. Only the first match counts.
fn parse_dgroup(line: &str) -> Option<u32> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < 3 || words[0] != DATA_GROUP {
        return None;
    }
    if !is_seg_addr(words[1]) {
        return None;
    }
    u32::from_str_radix(words[2], 16).ok()
}

/// `Overlay section N address XXXX:...` - the segment part before the colon
/// is the base address of one discardable region.
fn parse_overlay_base(line: &str) -> Option<String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < 5 || words[0] != "Overlay" || words[1] != "section" || words[3] != "address" {
        return None;
    }
    if !words[2].chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (base, _) = words[4].split_once(':')?;
    if !crate::segment::is_hex(base) {
        return None;
    }
    Some(base.to_ascii_uppercase())
}

// ----------------------------------------------------------------------------
