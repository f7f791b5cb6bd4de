use color_print::cprintln;
use map::{MapFile, SegClass};

/// Dump what the extractor saw, for triaging a surprising verdict.
pub fn print_verbose(map: &MapFile) {
    cprintln!("\n<bold>=== Overlay Sections ===</>");
    if map.overlay_bases.is_empty() {
        println!("  (none)");
    }
    for base in &map.overlay_bases {
        println!("  base {}", base);
    }

    cprintln!("\n<bold>=== All Code Segments ===</>");
    for seg in map.segments.values() {
        if seg.class == SegClass::Code {
            println!(
                "  {}: {} @ {} ({:X} bytes)",
                seg.name, seg.group, seg.addr, seg.size
            );
        }
    }
}
