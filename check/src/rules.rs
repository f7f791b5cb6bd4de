use std::cmp::Reverse;

use color_print::cprintln;
use map::{MapFile, SegClass, DATA_GROUP};

use crate::catalog::Catalog;
use crate::mode::{BuildMode, HARD_LIMIT};
use crate::report::Report;

/// Segment-name substrings that mark content belonging to an overlay or the
/// one-time init phase. Such content must never be retained in DGROUP.
const DISCARD_MARKERS: [&str; 2] = ["OVL_", "INIT_"];

/// Composition listing cap for the DGROUP report.
const COMPOSITION_TOP: usize = 5;

/// Code-segment suffix the linker derives from an object module's base name.
const CODE_SEG_SUFFIX: &str = "_TEXT";

/// One verification rule. Every rule runs to completion on every invocation;
/// none short-circuits another, so a single run reports the complete
/// failure set.
pub trait Rule {
    fn check(&self, map: &MapFile, catalog: &Catalog, out: &mut Report);
}

/// The full rule set, in report order.
pub fn all(mode: BuildMode) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(SizeCheck { mode }),
        Box::new(RequiredSymbols),
        Box::new(RequiredSegments),
        Box::new(OptionalSymbols),
        Box::new(ForbiddenOverlay),
        Box::new(DgroupFolding),
    ]
}

// ----------------------------------------------------------------------------
// a. DGROUP size against the mode thresholds

pub struct SizeCheck {
    pub mode: BuildMode,
}

impl Rule for SizeCheck {
    fn check(&self, map: &MapFile, _: &Catalog, out: &mut Report) {
        cprintln!("\n<bold>=== Checking DGROUP Size ({} mode) ===</>", self.mode);

        let size = map.dgroup_size;
        if size == 0 {
            out.warn("Could not determine DGROUP size from map file");
            cprintln!("  <yellow>WARN</>: no DGROUP size line found");
            return;
        }

        let headroom = HARD_LIMIT as i64 - size as i64;
        println!(
            "  DGROUP: 0x{:X} ({} bytes, {:.1} KB)",
            size,
            size,
            size as f64 / 1024.0
        );
        println!(
            "  Headroom: {} bytes ({:.1} KB)",
            headroom,
            headroom as f64 / 1024.0
        );
        println!(
            "  Mode thresholds: max=0x{:X}, warn=0x{:X}",
            self.mode.max_size(),
            self.mode.warn_size()
        );

        if size >= self.mode.max_size() {
            out.error(format!(
                "CRITICAL: DGROUP 0x{:X} exceeds the {} limit 0x{:X}",
                size,
                self.mode,
                self.mode.max_size()
            ));
            cprintln!("  <red>FAIL</>: DGROUP over the mode limit");
        } else if size >= self.mode.warn_size() {
            out.warn(format!(
                "DGROUP 0x{:X} is approaching the {} limit, {} bytes headroom",
                size, self.mode, headroom
            ));
            cprintln!("  <yellow>WARN</>: DGROUP in the warning zone");
        } else {
            cprintln!("  Status: <green>OK</>");
        }
    }
}

// ----------------------------------------------------------------------------
// b. Required symbol groups

pub struct RequiredSymbols;

impl Rule for RequiredSymbols {
    fn check(&self, map: &MapFile, catalog: &Catalog, out: &mut Report) {
        cprintln!("\n<bold>=== Checking Required Symbols ===</>");

        for group in &catalog.symbol_groups {
            if group.aliases.is_empty() {
                out.error(format!(
                    "REQUIRED [{}]: catalog lists no aliases for this entry point",
                    group.name
                ));
                cprintln!("  <red>FAIL</>: {} - empty alias list", group.name);
                continue;
            }

            // First alias present decides; an overlay hit is final, later
            // spellings are not fallbacks.
            let found = group
                .aliases
                .iter()
                .find(|alias| map.symbols.contains_key(alias.as_str()));

            match found {
                None => {
                    out.error(format!(
                        "REQUIRED [{}]: no symbol found from {:?}",
                        group.name, group.aliases
                    ));
                    cprintln!("  <red>FAIL</>: {} - no symbols found", group.name);
                }
                Some(alias) => {
                    let sym = &map.symbols[alias.as_str()];
                    if map.symbol_in_overlay(sym) {
                        out.error(format!(
                            "REQUIRED [{}]: found '{}' but it is in OVERLAY at {}",
                            group.name,
                            alias,
                            sym.full_addr()
                        ));
                        cprintln!("  <red>FAIL</>: {} - '{}' in overlay", group.name, alias);
                    } else {
                        cprintln!("  <green>OK</>: {} - '{}' in ROOT", group.name, alias);
                    }
                }
            }
        }
    }
}

// ----------------------------------------------------------------------------
// c. Required root segments

pub struct RequiredSegments;

impl Rule for RequiredSegments {
    fn check(&self, map: &MapFile, catalog: &Catalog, out: &mut Report) {
        cprintln!("\n<bold>=== Checking Required ROOT Segments ===</>");

        for req in &catalog.root_segments {
            match map.segment_is_root(&req.name) {
                // the owning module may be excluded from this configuration
                None => {
                    out.warn(format!("Segment {} not found ({})", req.name, req.desc));
                    cprintln!("  <yellow>WARN</>: {} not found", req.name);
                }
                Some(true) => {
                    let size = map.segments[req.name.as_str()].size;
                    cprintln!("  <green>OK</>: {} in ROOT ({} bytes)", req.name, size);
                }
                Some(false) => {
                    let seg = &map.segments[req.name.as_str()];
                    out.error(format!(
                        "CRITICAL: {} not in ROOT ({}); found group={}, class={}",
                        req.name, req.desc, seg.group, seg.class
                    ));
                    cprintln!("  <red>FAIL</>: {} not in ROOT", req.name);
                }
            }
        }
    }
}

// ----------------------------------------------------------------------------
// d. Optional symbols

pub struct OptionalSymbols;

impl Rule for OptionalSymbols {
    fn check(&self, map: &MapFile, catalog: &Catalog, out: &mut Report) {
        cprintln!("\n<bold>=== Checking Optional Symbols ===</>");

        let mut found = 0;
        let mut misplaced = 0;
        for name in &catalog.optional_symbols {
            // compilers differ on the trailing-underscore decoration
            let variants = [
                name.clone(),
                name.trim_end_matches('_').to_string(),
                format!("{}_", name),
            ];
            if let Some(sym) = variants.iter().find_map(|v| map.symbols.get(v.as_str())) {
                found += 1;
                if map.symbol_in_overlay(sym) {
                    misplaced += 1;
                    out.error(format!(
                        "Optional symbol '{}' found in OVERLAY at {}",
                        sym.name,
                        sym.full_addr()
                    ));
                }
            }
        }
        println!("  Found: {}, in overlay: {}", found, misplaced);
    }
}

// ----------------------------------------------------------------------------
// e. Forbidden overlay objects

pub struct ForbiddenOverlay;

impl Rule for ForbiddenOverlay {
    fn check(&self, map: &MapFile, catalog: &Catalog, out: &mut Report) {
        cprintln!("\n<bold>=== Checking Forbidden Overlay Placements ===</>");

        for obj in &catalog.forbidden_objects {
            let base = obj.strip_suffix(".obj").unwrap_or(obj);
            let seg_name = format!("{}{}", base, CODE_SEG_SUFFIX);
            match map.segments.get(seg_name.as_str()) {
                Some(seg) if seg.class == SegClass::OvlCode => {
                    out.error(format!(
                        "CRITICAL: {} is in OVERLAY ({} has class {})",
                        obj, seg_name, seg.class
                    ));
                    cprintln!("  <red>FAIL</>: {} in overlay", obj);
                }
                Some(_) => {
                    cprintln!("  <green>OK</>: {} in ROOT", obj);
                }
                None => {
                    out.note(format!(
                        "{} segment not found (may be folded into _TEXT)",
                        obj
                    ));
                    println!("  INFO: {} segment not found", obj);
                }
            }
        }
    }
}

// ----------------------------------------------------------------------------
// f. DGROUP folding and composition

pub struct DgroupFolding;

impl Rule for DgroupFolding {
    fn check(&self, map: &MapFile, _: &Catalog, out: &mut Report) {
        cprintln!("\n<bold>=== Checking DGROUP Composition ===</>");

        let mut members: Vec<_> = map
            .segments
            .values()
            .filter(|seg| seg.group == DATA_GROUP)
            .collect();

        for seg in &members {
            if DISCARD_MARKERS.iter().any(|m| seg.name.contains(m)) {
                out.error(format!(
                    "CRITICAL: overlay segment {} folded into DGROUP",
                    seg.name
                ));
                cprintln!("  <red>FAIL</>: {} folded into DGROUP", seg.name);
            }
        }

        // stable sort: ties keep the file's own order
        members.sort_by_key(|seg| Reverse(seg.size));
        println!("  Segments: {}", members.len());
        for seg in members.iter().take(COMPOSITION_TOP) {
            out.note(format!("DGROUP <- {}: {} bytes", seg.name, seg.size));
            println!("    {}: {} bytes", seg.name, seg.size);
        }
    }
}

// ----------------------------------------------------------------------------
