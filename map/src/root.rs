use crate::parse::{MapFile, ROOT_GROUP};
use crate::segment::SegClass;
use crate::symbol::Symbol;

/// Residency classification. These two predicates are the sole authority
/// the checks use to decide resident vs. discardable; both read nothing but
/// the parsed tables.
impl MapFile {
    /// True iff the symbol's segment address is the base of an overlay
    /// region, i.e. the symbol vanishes when initialization memory is
    /// released.
    pub fn symbol_in_overlay(&self, sym: &Symbol) -> bool {
        self.overlay_bases
            .contains(sym.segment.to_ascii_uppercase().as_str())
    }

    /// Tri-state residency test for a named segment. `None` means the
    /// segment is not in the table at all; absence alone is not a failure.
    /// Root means resident-code group AND code class: the resident data
    /// group itself does not count, nor does resident-group data.
    pub fn segment_is_root(&self, name: &str) -> Option<bool> {
        let seg = self.segments.get(name)?;
        Some(seg.group == ROOT_GROUP && seg.class == SegClass::Code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MapFile {
        MapFile::parse(
            "\
_TEXT       CODE      AUTO      0010:0000  8F20
OVL_TEXT    _OVLCODE  OVL       2F10:0000  1200
_DATA       DATA      DGROUP    0200:0000  6000
AUTO_DATA   DATA      AUTO      0200:6000  0100
DG_CODE     CODE      DGROUP    0200:7000  0200
Overlay section 1 address 2F10:
0010:0004  in_root
2f10:0040  in_overlay
",
        )
    }

    #[test]
    fn test_symbol_in_overlay() {
        let map = sample();
        assert!(map.symbol_in_overlay(&map.symbols["in_overlay"]));
        assert!(!map.symbol_in_overlay(&map.symbols["in_root"]));
    }

    #[test]
    fn test_segment_is_root() {
        let map = sample();
        assert_eq!(map.segment_is_root("_TEXT"), Some(true));
        // overlay code is not root
        assert_eq!(map.segment_is_root("OVL_TEXT"), Some(false));
        // the resident data group is not root
        assert_eq!(map.segment_is_root("_DATA"), Some(false));
        // resident-group data fails the class half of the predicate
        assert_eq!(map.segment_is_root("AUTO_DATA"), Some(false));
        // code class under the data group fails the group half
        assert_eq!(map.segment_is_root("DG_CODE"), Some(false));
        // unknown is unknown, not a failure
        assert_eq!(map.segment_is_root("missing_TEXT"), None);
    }
}
