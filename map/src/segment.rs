use strum::{Display, EnumString};

// ----------------------------------------------------------------------------
// Segment class

/// Linker segment classes that appear in the map's segment table. A line
/// whose class token is not one of these is not a segment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum SegClass {
    #[strum(serialize = "CODE")]
    Code,
    #[strum(serialize = "DATA")]
    Data,
    #[strum(serialize = "BSS")]
    Bss,
    #[strum(serialize = "STACK")]
    Stack,
    #[strum(serialize = "BEGDATA")]
    BegData,
    #[strum(serialize = "FAR_DATA")]
    FarData,
    #[strum(serialize = "EMU")]
    Emu,
    #[strum(serialize = "CONST")]
    Const,
    #[strum(serialize = "_OVLCODE")]
    OvlCode,
}

// ----------------------------------------------------------------------------
// Segment

/// One row of the linker's segment table. Built once during parsing and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Segment {
    pub name: String,
    pub class: SegClass,
    pub group: String,
    pub addr: String,
    pub size: u32,
}

impl Segment {
    /// Parse a segment table line: `name class group SSSS:OOOO size`.
    /// Size is a hexadecimal byte count.
    pub fn parse(line: &str) -> Option<Segment> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() < 5 {
            return None;
        }
        if !is_word(words[0]) {
            return None;
        }
        let class: SegClass = words[1].parse().ok()?;
        if !is_seg_addr(words[3]) {
            return None;
        }
        let size = u32::from_str_radix(words[4], 16).ok()?;
        Some(Segment {
            name: words[0].to_string(),
            class,
            group: words[2].to_string(),
            addr: words[3].to_string(),
            size,
        })
    }
}

pub(crate) fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}

pub(crate) fn is_seg_addr(s: &str) -> bool {
    match s.split_once(':') {
        Some((seg, off)) => is_hex(seg) && is_hex(off),
        None => false,
    }
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names() {
        assert_eq!("CODE".parse::<SegClass>().unwrap(), SegClass::Code);
        assert_eq!("FAR_DATA".parse::<SegClass>().unwrap(), SegClass::FarData);
        assert_eq!("_OVLCODE".parse::<SegClass>().unwrap(), SegClass::OvlCode);
        assert!("TEXT".parse::<SegClass>().is_err());
        assert_eq!(SegClass::OvlCode.to_string(), "_OVLCODE");
    }

    #[test]
    fn test_segment_line() {
        let seg = Segment::parse("_TEXT    CODE    AUTO    0010:0000    8F20").unwrap();
        assert_eq!(seg.name, "_TEXT");
        assert_eq!(seg.class, SegClass::Code);
        assert_eq!(seg.group, "AUTO");
        assert_eq!(seg.addr, "0010:0000");
        assert_eq!(seg.size, 0x8F20);
    }

    #[test]
    fn test_reject_non_segment_lines() {
        // table header
        assert!(Segment::parse("Segment  Class  Group  Address  Size").is_none());
        // unknown class
        assert!(Segment::parse("_TEXT  TEXT  AUTO  0010:0000  8F20").is_none());
        // malformed address
        assert!(Segment::parse("_TEXT  CODE  AUTO  00100000  8F20").is_none());
        // non-hex size
        assert!(Segment::parse("_TEXT  CODE  AUTO  0010:0000  8FZ0").is_none());
        assert!(Segment::parse("").is_none());
    }
}
