use std::fs::File;
use std::io::BufReader;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::Error;

/// One logical resident entry point, with the alias spellings different
/// build configurations export it under. Order matters: the first alias
/// present in the symbol table decides the check.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolGroup {
    pub name: String,
    pub aliases: Vec<String>,
}

/// A TSR infrastructure segment that must be linked into the root.
#[derive(Debug, Clone, Deserialize)]
pub struct RootSegment {
    pub name: String,
    pub desc: String,
}

/// The rule catalog: what must be resident, what must never be in overlay.
/// Built once at startup and handed to the rules by reference, never
/// mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub symbol_groups: Vec<SymbolGroup>,
    pub root_segments: Vec<RootSegment>,
    pub optional_symbols: Vec<String>,
    pub forbidden_objects: Vec<String>,
}

impl Catalog {
    /// Load a replacement catalog from a YAML file, or fall back to the
    /// built-in one.
    pub fn arg(file: Option<String>) -> Result<Catalog, Error> {
        match file {
            Some(fname) => {
                let file =
                    File::open(&fname).map_err(|e| Error::CatalogOpen(fname.clone(), e))?;
                serde_yaml::from_reader(BufReader::new(file))
                    .map_err(|e| Error::CatalogParse(fname, e))
            }
            None => Ok(BUILTIN.clone()),
        }
    }
}

fn group(name: &str, aliases: &[&str]) -> SymbolGroup {
    SymbolGroup {
        name: name.to_string(),
        aliases: aliases.iter().map(|s| s.to_string()).collect(),
    }
}

fn root_seg(name: &str, desc: &str) -> RootSegment {
    RootSegment {
        name: name.to_string(),
        desc: desc.to_string(),
    }
}

fn strs(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog {
    symbol_groups: vec![
        // Packet Driver API entry (INT 60h)
        group(
            "packet_api",
            &["packet_driver_isr", "_packet_driver_isr", "packet_api_entry"],
        ),
        // Multiplex API entry (INT 2Fh)
        group(
            "multiplex_api",
            &[
                "multiplex_handler_",
                "int2f_handler",
                "multiplex_handler",
                "_int2f_isr",
            ],
        ),
        // PCI BIOS shim entry (INT 1Ah)
        group(
            "pci_shim",
            &["_pci_shim_isr", "pci_shim_handler", "pci_shim_handler_"],
        ),
        // NIC IRQ dispatcher
        group(
            "nic_irq",
            &[
                "nic_irq_handler",
                "_nic_isr",
                "hardware_handle_3c509b_irq",
                "hardware_handle_3c515_irq",
            ],
        ),
        // Install/uninstall lifecycle
        group(
            "lifecycle",
            &[
                "install_packet_api_vector",
                "install_interrupts",
                "initialize_tsr_defense",
            ],
        ),
    ],
    root_segments: vec![
        root_seg("_TEXT", "Main ASM modules (pktapi, nicirq, tsrcom, pciisr)"),
        root_seg("rt_stubs_TEXT", "Consolidated runtime stubs"),
    ],
    optional_symbols: strs(&[
        // NIC vtables
        "g_3c509b_ops",
        "g_3c515_ops",
        "_3c509b_ops",
        // NIC ops on the runtime path; init counterparts live in overlay
        "_3c509b_send_packet_",
        "_3c509b_receive_packet_",
        "_3c515_send_packet_",
        "_3c515_receive_packet_",
        // Logging API
        "log_info_",
        "log_error_",
        "log_warning_",
        "log_debug_",
        // Additional ISR/handler symbols
        "nic_3c509_handler",
        "nic_3c515_handler",
        "pcmcia_irq_isr",
        "pcmcia_isr_install",
        "pcmcia_isr_uninstall",
        "_set_chain_vector",
        "chain_to_bios",
        // Deferred work
        "queue_deferred_work",
        "deferred_work_queue_process",
        // Vector management
        "validate_interrupt_vectors",
        "safe_port_read",
    ]),
    forbidden_objects: strs(&["rt_stubs.obj", "3cvortex.obj", "3cboom.obj"]),
});
