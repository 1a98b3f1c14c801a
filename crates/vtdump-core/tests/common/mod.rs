//! Canned `readelf` output shared by the pipeline tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use vtdump_core::error::{ExtractError, Result};
use vtdump_core::inspector::{BinaryInspector, Listing};
use vtdump_core::types::SectionId;

/// Inspector that answers from fixed text and records every request.
#[derive(Default)]
pub struct CannedInspector
{
    pub sections: String,
    pub symbols: String,
    pub relocations: String,
    pub dumps: HashMap<SectionId, String>,
    calls: RefCell<Vec<Listing>>,
}

impl CannedInspector
{
    pub fn calls(&self) -> Vec<Listing>
    {
        self.calls.borrow().clone()
    }

    pub fn hex_dump_calls(&self) -> Vec<SectionId>
    {
        self.calls
            .borrow()
            .iter()
            .filter_map(|listing| match listing {
                Listing::HexDump(id) => Some(*id),
                _ => None,
            })
            .collect()
    }
}

impl BinaryInspector for CannedInspector
{
    fn listing(&self, _path: &Path, listing: Listing) -> Result<String>
    {
        self.calls.borrow_mut().push(listing);
        match listing {
            Listing::Sections => Ok(self.sections.clone()),
            Listing::Symbols => Ok(self.symbols.clone()),
            Listing::Relocations => Ok(self.relocations.clone()),
            Listing::HexDump(id) => self.dumps.get(&id).cloned().ok_or_else(|| ExtractError::ToolInvocation {
                tool: "readelf".to_string(),
                mode: listing.to_string(),
                message: format!("readelf: Warning: Section {id} was not dumped because it does not exist"),
            }),
        }
    }
}

pub const LINKED_SECTIONS: &str = "\
There are 4 section headers, starting at offset 0x3100:

Section Headers:
  [Nr] Name              Type            Address          Off    Size   ES Flg Lk Inf Al
  [ 0]                   NULL            0000000000000000 000000 000000 00      0   0  0
  [ 1] .text             PROGBITS        0000000000002000 002000 000100 00  AX  0   0 16
  [ 2] .rodata           PROGBITS        0000000000002100 002100 000010 00   A  0   0  8
  [ 3] .data.rel.ro      PROGBITS        0000000000001000 001000 000040 00  WA  0   0  8
Key to Flags:
  W (write), A (alloc), X (execute), M (merge), S (strings), I (info)
";

pub const LINKED_SYMBOLS: &str = "\

Symbol table '.dynsym' contains 3 entries:
   Num:    Value          Size Type    Bind   Vis      Ndx Name
     0: 0000000000000000     0 NOTYPE  LOCAL  DEFAULT  UND 
     1: 0000000000000000     0 FUNC    GLOBAL DEFAULT  UND __cxa_pure_virtual@CXXABI_1.3 (2)
     2: 0000000000001000    16 OBJECT  WEAK   DEFAULT    3 _ZTV1A

Symbol table '.symtab' contains 36 entries:
   Num:    Value          Size Type    Bind   Vis      Ndx Name
    29: 0000000000000000     0 FILE    LOCAL  DEFAULT  ABS shapes.cpp
    30: 0000000000002000    11 FUNC    GLOBAL DEFAULT    1 _Z1fv
    31: 0000000000001000    16 OBJECT  WEAK   DEFAULT    3 _ZTV1A
    32: 0000000000001010    24 OBJECT  WEAK   DEFAULT    3 _ZTV1B
    33: 0000000000002010    11 FUNC    WEAK   DEFAULT    1 _ZN1B3barEv
    34: 0000000000001028    24 OBJECT  WEAK   DEFAULT    3 _ZTV1C
    35: 0000000000000000     0 OBJECT  GLOBAL DEFAULT  UND _ZTVN10__cxxabiv117__class_type_infoE@CXXABI_1.3 (2)
";

pub const LINKED_DUMP_3: &str = "\

Hex dump of section '.data.rel.ro':
  0x00001000 00200000 00000000 00000000 00000000 . ..............
  0x00001010 00000000 00000000 10200000 00000000 ......... ......
  0x00001020 f0ffffff ffffffff 00000000 00000000 ................
  0x00001030 00000000 00000000 10200000 00000000 ......... ......

";

pub fn linked() -> CannedInspector
{
    CannedInspector {
        sections: LINKED_SECTIONS.to_string(),
        symbols: LINKED_SYMBOLS.to_string(),
        dumps: HashMap::from([(3, LINKED_DUMP_3.to_string())]),
        ..CannedInspector::default()
    }
}

pub const OBJECT_SECTIONS: &str = "\
There are 7 section headers, starting at offset 0x640:

Section Headers:
  [Nr] Name              Type            Address          Off    Size   ES Flg Lk Inf Al
  [ 0]                   NULL            0000000000000000 000000 000000 00      0   0  0
  [ 1] .text             PROGBITS        0000000000000000 000040 000060 00  AX  0   0 16
  [ 2] .rela.text        RELA            0000000000000000 000500 000018 18   I  6   1  8
  [ 3] .data.rel.ro      PROGBITS        0000000000000000 0000a0 000030 00  WA  0   0  8
  [ 4] .rela.data.rel.ro RELA            0000000000000000 000518 000060 18   I  6   3  8
  [ 5] .rodata           PROGBITS        0000000000000000 0000d0 000010 00   A  0   0  8
  [ 6] .symtab           SYMTAB          0000000000000000 0000e0 000180 18      7   4  8
";

pub const OBJECT_SYMBOLS: &str = "\

Symbol table '.symtab' contains 16 entries:
   Num:    Value          Size Type    Bind   Vis      Ndx Name
     0: 0000000000000000     0 NOTYPE  LOCAL  DEFAULT  UND 
     1: 0000000000000000     0 FILE    LOCAL  DEFAULT  ABS shapes.cpp
     2: 0000000000000000     0 SECTION LOCAL  DEFAULT    1 .text
     3: 0000000000000000    16 FUNC    GLOBAL DEFAULT    1 _ZN1A3fooEv
     4: 0000000000000040    16 FUNC    GLOBAL DEFAULT    1 _ZN1AD2Ev
     5: 0000000000000040    16 FUNC    GLOBAL DEFAULT    1 _ZN1AD1Ev
     6: 0000000000000050    16 FUNC    GLOBAL DEFAULT    1 _ZN1AD0Ev
     7: 0000000000000000    40 OBJECT  WEAK   DEFAULT    3 _ZTV1A
     8: 0000000000000028     8 OBJECT  WEAK   DEFAULT    3 _ZTV1B
     9: 0000000000000000    16 OBJECT  WEAK   DEFAULT    5 _ZTC1D0_1B
    10: 0000000000000000     0 NOTYPE  GLOBAL DEFAULT  UND _Z1fv
";

pub const OBJECT_RELOCATIONS: &str = "\

Relocation section '.rela.text' at offset 0x500 contains 1 entry:
    Offset             Info             Type               Symbol's Value  Symbol's Name + Addend
0000000000000004  0000000a00000004 R_X86_64_PLT32         0000000000000000 _Z1fv - 4

Relocation section '.rela.data.rel.ro' at offset 0x518 contains 4 entries:
    Offset             Info             Type               Symbol's Value  Symbol's Name + Addend
0000000000000008  0000000600000001 R_X86_64_64            0000000000000050 _ZN1AD0Ev + 0
0000000000000010  0000000200000001 R_X86_64_64            0000000000000000 .text + 0
0000000000000018  0000000200000001 R_X86_64_64            0000000000000000 .text + 40
0000000000000020  0000000800000001 R_X86_64_64            0000000000000028 _ZTV1B + 10
";

pub const OBJECT_DUMP_3: &str = "\

Hex dump of section '.data.rel.ro':
 NOTE: This section has relocations against it, but these have NOT been applied to this dump.
  0x00000000 00000000 00000000 00000000 00000000 ................
  0x00000010 00000000 00000000 00000000 00000000 ................
  0x00000020 00000000 00000000 f0ffffff ffffffff ................

";

pub const OBJECT_DUMP_5: &str = "\

Hex dump of section '.rodata':
  0x00000000 10000000 00000000 00004000 00000000 ..........@.....

";

pub fn object() -> CannedInspector
{
    CannedInspector {
        sections: OBJECT_SECTIONS.to_string(),
        symbols: OBJECT_SYMBOLS.to_string(),
        relocations: OBJECT_RELOCATIONS.to_string(),
        dumps: HashMap::from([(3, OBJECT_DUMP_3.to_string()), (5, OBJECT_DUMP_5.to_string())]),
        ..CannedInspector::default()
    }
}
