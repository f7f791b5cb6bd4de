use crate::segment::is_hex;

/// One row of the linker's symbol table: a named address inside a segment.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub segment: String,
    pub offset: String,
}

impl Symbol {
    /// Parse a symbol table line: `SSSS:OOOO[*+] name`. The trailing marker
    /// flags public/relocatable entries in the map; it carries no meaning
    /// for residency checks and is dropped.
    pub fn parse(line: &str) -> Option<Symbol> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() < 2 {
            return None;
        }
        let addr = words[0].trim_end_matches(|c| c == '*' || c == '+');
        let (segment, offset) = addr.split_once(':')?;
        if !is_hex(segment) || !is_hex(offset) {
            return None;
        }
        Some(Symbol {
            name: words[1].to_string(),
            segment: segment.to_string(),
            offset: offset.to_string(),
        })
    }

    pub fn full_addr(&self) -> String {
        format!("{}:{}", self.segment, self.offset)
    }
}
